//! Single declaration definition.

use std::fmt;

use crate::types::Value;

/// A `property: value` pair inside a rule set.
///
/// Each declaration has:
/// - The property name as written (custom properties keep their `--` prefix)
/// - One value
/// - The `!important` flag
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name.
    pub property: String,
    /// The declared value.
    pub value: Value,
    /// Whether the declaration carries `!important`.
    pub important: bool,
}

impl Declaration {
    /// Create a normal declaration.
    pub fn new(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    /// Create a declaration flagged `!important`.
    pub fn important(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            important: true,
            ..Self::new(property, value)
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Literal, LiteralKind};

    #[test]
    fn declaration_display() {
        let decl = Declaration::new("width", Literal::new(LiteralKind::Dimension, "10px"));
        assert_eq!(decl.to_string(), "width: 10px");
        assert!(!decl.important);
    }

    #[test]
    fn important_declaration_display() {
        let decl = Declaration::important("color", Color::from_hex("#138f87").unwrap());
        assert!(decl.important);
        assert_eq!(decl.to_string(), "color: #138f87 !important");
    }
}
