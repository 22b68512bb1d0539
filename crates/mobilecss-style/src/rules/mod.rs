//! Declarations, rule sets and stylesheets.

mod rule;
mod rule_set;
mod stylesheet;

pub use rule::Declaration;
pub use rule_set::{RuleContext, RuleSet};
pub use stylesheet::{CssItem, GroupRule, StyleSheet};
