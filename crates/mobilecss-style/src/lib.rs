//! CSS color engine for mobile app theming.
//!
//! This crate reads a stylesheet and produces a second stylesheet that
//! recolors it, featuring:
//!
//! - **CSS Parsing**: A structured model of rule sets, group rules and typed values
//! - **Color Extraction**: Every declaration whose whole value is a color, ranked by usage
//! - **Override Generation**: `!important` rules that replace selected colors
//! - **Rendering**: Serialize any stylesheet back to CSS text
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use mobilecss_style::prelude::*;
//!
//! let base = parse_css(".header { color: #fff; } .footer { background-color: #fff; }")?;
//!
//! // Colors the administrator can change, most used first
//! let colors = extract_color_usage(&base);
//! assert_eq!(colors[0], ColorUsage::new("#fff", 2));
//!
//! // Replace white with the brand color
//! let replacements = HashMap::from([("#fff".to_string(), "#138f87".to_string())]);
//! let overrides = generate_overrides(&base, &replacements)?;
//!
//! assert_eq!(overrides.rule_sets().count(), 2);
//! let css = render_css(&overrides);
//! assert!(css.contains("background-color: #138f87 !important;"));
//! # Ok::<(), mobilecss_style::Error>(())
//! ```

pub mod overrides;
pub mod palette;
pub mod parser;
pub mod render;
pub mod rules;
pub mod types;

mod error;

pub use error::{Error, Result};
pub use overrides::generate_overrides;
pub use palette::{ColorTally, ColorUsage, extract_color_usage, extract_colors, rank_colors};
pub use parser::{ParseError, parse_color, parse_css};
pub use render::render_css;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::overrides::generate_overrides;
    pub use crate::palette::{ColorUsage, extract_color_usage};
    pub use crate::parser::parse_css;
    pub use crate::render::render_css;
    pub use crate::rules::{CssItem, Declaration, GroupRule, RuleContext, RuleSet, StyleSheet};
    pub use crate::types::{Color, ColorForm, Literal, LiteralKind, Value};
    pub use crate::{Error, Result};
}
