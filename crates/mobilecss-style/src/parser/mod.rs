//! CSS parsing module.
//!
//! [`parse_css`] turns stylesheet text into a [`StyleSheet`](crate::rules::StyleSheet);
//! [`parse_color`] validates a single color such as a user-supplied replacement.

mod color;
mod css_parser;
mod error;

pub use color::parse_color;
pub use css_parser::parse_css;
pub use error::ParseError;
