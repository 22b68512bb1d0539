//! Colors and declaration values.

mod color;
mod value;

pub(crate) use color::ColorArguments;
pub use color::{Color, ColorForm};
pub use value::{Literal, LiteralKind, Separator, Value, ValueList};
