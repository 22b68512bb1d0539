//! Color syntax recognition.
//!
//! Shared by the stylesheet parser, which calls [`color_from_token`] for every
//! value component, and by [`parse_color`], which validates stand-alone color
//! text such as user-supplied replacements.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use super::ParseError;
use crate::types::{Color, ColorArguments, ColorForm};

/// Parse text holding exactly one color.
pub fn parse_color(text: &str) -> std::result::Result<Color, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    parser.skip_whitespace();
    let location = parser.current_source_location();

    let token = match parser.next() {
        Ok(token) => token.clone(),
        Err(_) => return Err(ParseError::at("Expected a color", location)),
    };

    let color = match &token {
        Token::Function(name) if !is_color_function(name) => None,
        _ => color_from_token(&mut parser, &token),
    };
    let color = color.ok_or_else(|| {
        ParseError::at(format!("'{}' is not a recognized color", text.trim()), location)
    })?;

    parser.skip_whitespace();
    if !parser.is_exhausted() {
        return Err(ParseError::at(
            "Unexpected content after color",
            parser.current_source_location(),
        ));
    }

    Ok(color)
}

/// Check if a function name introduces a color.
pub(crate) fn is_color_function(name: &str) -> bool {
    color_function_form(name).is_some()
}

fn color_function_form(name: &str) -> Option<ColorForm> {
    match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => Some(ColorForm::Rgb),
        "hsl" | "hsla" => Some(ColorForm::Hsl),
        _ => None,
    }
}

/// Interpret a token just returned by `parser.next()` as a color.
///
/// For color functions the argument block is consumed whether or not the
/// arguments are valid. Returns `None` when the token is not a color.
pub(crate) fn color_from_token<'i>(parser: &mut Parser<'i, '_>, token: &Token<'i>) -> Option<Color> {
    match token {
        Token::Hash(hash) | Token::IDHash(hash) => Color::from_hex(hash),
        Token::Ident(name) => Color::named(name),
        Token::Function(name) => {
            let form = color_function_form(name)?;
            parser
                .parse_nested_block(|p| parse_color_arguments(p, form))
                .ok()
                .map(|args| Color::functional(form, name, args))
        }
        _ => None,
    }
}

/// Parse the arguments of `rgb()`/`hsl()` in comma or space syntax.
fn parse_color_arguments<'i>(
    parser: &mut Parser<'i, '_>,
    form: ColorForm,
) -> std::result::Result<ColorArguments, CssParseError<'i, ()>> {
    let mut components: Vec<String> = vec![];
    let mut alpha = None;
    let mut commas = 0;
    let mut slash = false;
    // A component is expected after a comma or a slash.
    let mut expecting = true;

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let start = parser.position();
        let token = parser.next()?.clone();

        match token {
            Token::Comma => {
                if expecting || slash {
                    return Err(parser.new_custom_error(()));
                }
                commas += 1;
                expecting = true;
            }
            Token::Delim('/') => {
                if expecting || slash || commas > 0 || components.len() != 3 {
                    return Err(parser.new_custom_error(()));
                }
                slash = true;
                expecting = true;
            }
            ref token => {
                let index = if slash { 3 } else { components.len() };
                if !component_allowed(form, index, token) || alpha.is_some() {
                    return Err(parser.new_custom_error(()));
                }
                let text = parser.slice_from(start).to_string();
                if slash {
                    alpha = Some(text);
                } else {
                    components.push(text);
                }
                expecting = false;
            }
        }
    }

    if expecting {
        return Err(parser.new_custom_error(()));
    }

    let legacy = commas > 0;
    if legacy {
        if !matches!(components.len(), 3 | 4) || commas != components.len() - 1 {
            return Err(parser.new_custom_error(()));
        }
        if components.len() == 4 {
            alpha = components.pop();
        }
    } else if components.len() != 3 {
        return Err(parser.new_custom_error(()));
    }

    Ok(ColorArguments {
        components,
        alpha,
        legacy,
    })
}

/// Check a token against the argument position it appears in.
///
/// Index 3 is the alpha channel.
fn component_allowed(form: ColorForm, index: usize, token: &Token<'_>) -> bool {
    match token {
        Token::Number { .. } => index <= 3,
        Token::Percentage { .. } => index <= 3 && !(form == ColorForm::Hsl && index == 0),
        Token::Dimension { unit, .. } => {
            form == ColorForm::Hsl
                && index == 0
                && matches!(
                    unit.to_ascii_lowercase().as_str(),
                    "deg" | "rad" | "grad" | "turn"
                )
        }
        Token::Ident(name) => index <= 3 && name.eq_ignore_ascii_case("none"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> String {
        parse_color(text).unwrap().key().to_string()
    }

    #[test]
    fn hex_colors() {
        assert_eq!(key("#FFF"), "#fff");
        assert_eq!(key("#abcd"), "#abcd");
        assert_eq!(key("#138F87"), "#138f87");
        assert_eq!(key("#11223344"), "#11223344");
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#xyz").is_err());
    }

    #[test]
    fn rgb_colors() {
        assert_eq!(key("rgb(255,0,0)"), "rgb(255, 0, 0)");
        assert_eq!(key("RGBA( 0 , 0 , 0 , .5 )"), "rgba(0, 0, 0, .5)");
        assert_eq!(key("rgb(10% 20% 30%)"), "rgb(10% 20% 30%)");
        assert_eq!(key("rgb(1 2 3 / 50%)"), "rgb(1 2 3 / 50%)");
        assert_eq!(parse_color("rgb(1,2,3)").unwrap().form(), ColorForm::Rgb);
    }

    #[test]
    fn hsl_colors() {
        assert_eq!(key("hsl(120, 50%, 50%)"), "hsl(120, 50%, 50%)");
        assert_eq!(key("hsla(120deg,50%,50%,0.3)"), "hsla(120deg, 50%, 50%, 0.3)");
        assert_eq!(key("hsl(0.5turn 10% 10%)"), "hsl(0.5turn 10% 10%)");
        assert_eq!(parse_color("hsl(1,2%,3%)").unwrap().form(), ColorForm::Hsl);
    }

    #[test]
    fn malformed_functions() {
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("rgb(1, 2 3)").is_err());
        assert!(parse_color("rgb(1 2 3 /)").is_err());
        assert!(parse_color("rgb(1px, 2, 3)").is_err());
        assert!(parse_color("rgb(1, 2, 3,)").is_err());
        assert!(parse_color("hsl(10%, 2%, 3%)").is_err());
        assert!(parse_color("calc(1px)").is_err());
    }

    #[test]
    fn named_and_unknown() {
        assert_eq!(key(" Teal "), "teal");
        let err = parse_color("notacolor").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 1);
        assert!(err.message.contains("notacolor"));
    }
}
