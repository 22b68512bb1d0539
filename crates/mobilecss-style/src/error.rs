//! Error types for the color engine.

use crate::parser::ParseError;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing stylesheets or generating overrides.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// CSS parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A replacement value is not a color the parser understands.
    #[error("Cannot replace '{color}' with '{replacement}': {message}")]
    UnresolvableColor {
        color: String,
        replacement: String,
        message: String,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse(ParseError::new(message, line, column))
    }

    /// Create an unresolvable color error.
    pub fn unresolvable_color(
        color: impl Into<String>,
        replacement: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnresolvableColor {
            color: color.into(),
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Returns true for malformed-input errors.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns true when a replacement color could not be resolved.
    pub fn is_unresolvable_color(&self) -> bool {
        matches!(self, Self::UnresolvableColor { .. })
    }
}
