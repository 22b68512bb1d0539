//! Declaration value types.
//!
//! A declaration value is either a single color, a single typed literal, a
//! list of components, or tokens outside the modelled subset. Only
//! [`Value::Color`] takes part in color extraction and overriding; every
//! other variant is carried through verbatim.
//!
//! # Example
//!
//! ```
//! use mobilecss_style::prelude::*;
//!
//! let sheet = parse_css(".a { color: #fff; margin: 0 auto; }").unwrap();
//! let rule_set = sheet.rule_sets().next().unwrap();
//!
//! assert!(rule_set.declarations[0].value.is_color());
//! assert!(matches!(rule_set.declarations[1].value, Value::List(_)));
//! assert_eq!(rule_set.declarations[1].value.to_string(), "0 auto");
//! ```

use std::fmt;

use super::Color;

/// The type of a non-color value component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A number with a unit: lengths, angles, times, resolutions.
    Dimension,
    /// A percentage.
    Percentage,
    /// A unitless number.
    Number,
    /// A keyword such as `auto` or `inherit`.
    Identifier,
    /// A quoted string.
    String,
    /// `url(...)`, quoted or not.
    Url,
    /// Any function other than a color function, e.g. `calc()` or `var()`.
    Function,
}

/// A typed non-color component, keeping its source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// What kind of component this is.
    pub kind: LiteralKind,
    /// The component exactly as written.
    pub text: String,
}

impl Literal {
    /// Create a literal.
    pub fn new(kind: LiteralKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Separator between two components of a [`ValueList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// Whitespace, as in `margin: 0 auto`.
    Space,
    /// A comma, as in `font-family: a, b`.
    Comma,
    /// A slash, as in `font: 12px/1.5 serif`.
    Slash,
}

impl Separator {
    fn as_css(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Comma => ", ",
            Separator::Slash => " / ",
        }
    }
}

/// Two or more value components with the separators between them.
///
/// There is always exactly one separator fewer than there are items.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    items: Vec<Value>,
    separators: Vec<Separator>,
}

impl ValueList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            items: vec![],
            separators: vec![],
        }
    }

    /// Append a component. The separator is ignored for the first component.
    pub fn push(&mut self, separator: Separator, value: Value) {
        if !self.items.is_empty() {
            self.separators.push(separator);
        }
        self.items.push(value);
    }

    /// The components of the list.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// The separators between components.
    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no components.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collapse into a single value when the list holds one component.
    pub(crate) fn into_value(mut self) -> Value {
        if self.items.len() == 1 {
            self.items.remove(0)
        } else {
            Value::List(self)
        }
    }
}

impl Default for ValueList {
    fn default() -> Self {
        Self::new()
    }
}

/// A declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The whole value is one color.
    Color(Color),
    /// The whole value is one non-color component.
    Literal(Literal),
    /// Several components.
    List(ValueList),
    /// Well-formed tokens the parser does not classify, kept verbatim.
    Unsupported(String),
}

impl Value {
    /// Check if the whole value is a color.
    pub fn is_color(&self) -> bool {
        matches!(self, Value::Color(_))
    }

    /// Get the color if the whole value is one.
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(color) => Some(color),
            _ => None,
        }
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Value::Color(color)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::Literal(literal)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Color(color) => write!(f, "{}", color),
            Value::Literal(literal) => f.write_str(&literal.text),
            Value::List(list) => {
                for (i, item) in list.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(list.separators[i - 1].as_css())?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Unsupported(text) => f.write_str(text),
        }
    }
}
