//! Color values and their canonical keys.
//!
//! A [`Color`] is identified purely by its text: two colors are the same
//! color when their keys are identical. Hex digits, color names and function
//! names are lower-cased and functional arguments are re-joined with a single
//! separator, but no numeric or color-space conversion takes place, so
//! `#fff` and `#ffffff` stay distinct keys.
//!
//! # Example
//!
//! ```
//! use mobilecss_style::prelude::*;
//!
//! let color = Color::parse("#FFF").unwrap();
//! assert_eq!(color.key(), "#fff");
//! assert_eq!(color.form(), ColorForm::Hex);
//!
//! let rgba = Color::parse("rgba(0,0,0,.5)").unwrap();
//! assert_eq!(rgba.key(), "rgba(0, 0, 0, .5)");
//!
//! assert!(Color::parse("notacolor").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// CSS named colors, sorted for binary search.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure",
    "beige", "bisque", "black", "blanchedalmond", "blue",
    "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson",
    "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray",
    "darkgreen", "darkgrey", "darkkhaki", "darkmagenta", "darkolivegreen",
    "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet",
    "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue",
    "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro",
    "ghostwhite", "gold", "goldenrod", "gray", "green",
    "greenyellow", "grey", "honeydew", "hotpink", "indianred",
    "indigo", "ivory", "khaki", "lavender", "lavenderblush",
    "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink",
    "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
    "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid",
    "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin",
    "navajowhite", "navy", "oldlace", "olive", "olivedrab",
    "orange", "orangered", "orchid", "palegoldenrod", "palegreen",
    "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru",
    "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon",
    "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle",
    "tomato", "transparent", "turquoise", "violet", "wheat",
    "white", "whitesmoke", "yellow", "yellowgreen",
];

/// The syntax a color was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorForm {
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    Hex,
    /// `rgb()` or `rgba()`.
    Rgb,
    /// `hsl()` or `hsla()`.
    Hsl,
    /// A CSS color keyword such as `teal` or `transparent`.
    Named,
}

/// Arguments of a functional color, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColorArguments {
    pub components: Vec<String>,
    pub alpha: Option<String>,
    /// Comma-separated (`rgb(1, 2, 3)`) rather than space-separated syntax.
    pub legacy: bool,
}

/// A color value keyed by its canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    key: String,
    form: ColorForm,
}

impl Color {
    /// Parse a single color from text.
    ///
    /// Accepts every syntax the stylesheet parser recognizes as a color.
    /// Surrounding whitespace is ignored; anything else makes the parse fail.
    pub fn parse(text: &str) -> Result<Self> {
        crate::parser::parse_color(text).map_err(Error::from)
    }

    /// Create a hex color from the digits after `#`.
    ///
    /// Returns `None` unless there are 3, 4, 6 or 8 hex digits.
    pub fn from_hex(digits: &str) -> Option<Self> {
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !matches!(digits.len(), 3 | 4 | 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            key: format!("#{}", digits.to_ascii_lowercase()),
            form: ColorForm::Hex,
        })
    }

    /// Create a named color. Returns `None` for unknown keywords.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS.binary_search(&name.as_str()).ok()?;
        Some(Self {
            key: name,
            form: ColorForm::Named,
        })
    }

    pub(crate) fn functional(form: ColorForm, function: &str, args: ColorArguments) -> Self {
        let components: Vec<String> = args
            .components
            .iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let alpha = args.alpha.map(|a| a.to_ascii_lowercase());

        let inner = if args.legacy {
            let mut parts = components;
            parts.extend(alpha);
            parts.join(", ")
        } else {
            match alpha {
                Some(alpha) => format!("{} / {}", components.join(" "), alpha),
                None => components.join(" "),
            }
        };

        Self {
            key: format!("{}({})", function.to_ascii_lowercase(), inner),
            form,
        }
    }

    /// The canonical key used for equality and replacement lookups.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The syntax the color was written in.
    pub fn form(&self) -> ColorForm {
        self.form
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
