//! CSS syntax parser using the `cssparser` crate.
//!
//! This module contains the core parsing logic for stylesheets. The parser
//! walks the token stream and builds a [`StyleSheet`] of rule sets, group
//! rules and opaque items, classifying every declaration value on the way.

use cssparser::{
    BasicParseErrorKind, Delimiter, ParseError as CssParseError, ParseErrorKind, Parser,
    ParserInput, SourceLocation, SourcePosition, Token,
};

use super::ParseError;
use super::color::{color_from_token, is_color_function};
use crate::Result;
use crate::rules::{CssItem, Declaration, GroupRule, RuleContext, RuleSet, StyleSheet};
use crate::types::{Literal, LiteralKind, Separator, Value, ValueList};

type CssResult<'i, T> = std::result::Result<T, CssParseError<'i, ParseError>>;

/// Contents of an at-rule block, decided by whether it nests further blocks.
enum BlockBody {
    Declarations(Vec<Declaration>),
    Items(Vec<CssItem>),
    /// Declarations mixed with nested rules, kept verbatim.
    Mixed,
}

/// Parse a CSS stylesheet string into a [`StyleSheet`].
///
/// # Arguments
///
/// * `css` - A string slice containing CSS stylesheet content.
///
/// # Returns
///
/// Returns the parsed stylesheet with items in source order.
///
/// # Errors
///
/// Malformed input is never skipped: unbalanced braces, unclosed blocks,
/// rules without a block, empty selectors and broken declarations all fail
/// the whole parse with a [`ParseError`] pointing at the offending location.
/// Well-formed constructs outside the modelled subset are kept as
/// [`CssItem::Opaque`] instead.
///
/// # Example
///
/// ```
/// use mobilecss_style::prelude::*;
///
/// let css = ".a { color: #fff; } @media print { .b { color: red !important; } }";
/// let sheet = parse_css(css).unwrap();
/// assert_eq!(sheet.len(), 2);
/// assert_eq!(sheet.rule_sets().count(), 2);
///
/// assert!(parse_css(".a { color: }").is_err());
/// ```
pub fn parse_css(css: &str) -> Result<StyleSheet> {
    let css = css.strip_prefix('\u{feff}').unwrap_or(css);
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let items = parse_items(&mut parser, false).map_err(into_parse_error)?;

    tracing::debug!(items = items.len(), "Parsed stylesheet");
    Ok(StyleSheet { items })
}

/// Parse a sequence of rules, either at the top level or inside a group rule.
fn parse_items<'i>(parser: &mut Parser<'i, '_>, nested: bool) -> CssResult<'i, Vec<CssItem>> {
    let mut items = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let state = parser.state();
        let location = parser.current_source_location();
        let token = parser.next()?.clone();

        match token {
            // HTML comment markers are only ignored at the top level
            Token::CDO | Token::CDC if !nested => {}
            Token::AtKeyword(name) => {
                let item = parse_at_rule(parser, name.to_string(), state.position(), location)?;
                items.push(item);
            }
            Token::CloseCurlyBracket => {
                return Err(syntax_error(parser, location, "Unexpected '}'"));
            }
            _ => {
                parser.reset(&state);
                items.push(parse_qualified_rule(parser)?);
            }
        }
    }

    Ok(items)
}

/// Parse a selector block: `selector, selector { declarations }`.
fn parse_qualified_rule<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, CssItem> {
    let start = parser.position();
    let location = parser.current_source_location();
    let mut selectors = vec![];
    let mut selector_start = start;

    // Collect selectors until we hit the curly brace block
    loop {
        let before = parser.position();
        let token_location = parser.current_source_location();

        match parser.next().cloned() {
            Ok(Token::Comma) => {
                push_selector(parser, &mut selectors, selector_start..before, token_location)?;
                selector_start = parser.position();
            }
            Ok(Token::CurlyBracketBlock) => {
                push_selector(parser, &mut selectors, selector_start..before, token_location)?;
                break;
            }
            Ok(Token::Semicolon) | Err(_) => {
                return Err(syntax_error(parser, location, "Expected '{' after selector"));
            }
            Ok(Token::CloseCurlyBracket) => {
                return Err(syntax_error(parser, token_location, "Unexpected '}' in selector"));
            }
            Ok(Token::BadString(_)) | Ok(Token::BadUrl(_)) => {
                return Err(syntax_error(parser, token_location, "Malformed token in selector"));
            }
            // `[attr]`, `:not(...)`: consume the contents so `before` lands after the block
            Ok(Token::Function(_)) | Ok(Token::ParenthesisBlock) | Ok(Token::SquareBracketBlock) => {
                skip_block(parser);
            }
            Ok(_) => {}
        }
    }

    let declarations = parse_block(parser, location, |p| {
        let state = p.state();
        if contains_block(p) {
            // Nested style rules are not modelled
            while p.next().is_ok() {}
            return Ok(None);
        }
        p.reset(&state);
        parse_declarations(p).map(Some)
    })?;

    match declarations {
        Some(declarations) => Ok(CssItem::RuleSet(RuleSet::new(
            RuleContext::Selectors(selectors),
            declarations,
        ))),
        None => {
            tracing::debug!(selectors = ?selectors, "Keeping nested rule block verbatim");
            Ok(CssItem::Opaque(parser.slice_from(start).trim().to_string()))
        }
    }
}

fn push_selector<'i>(
    parser: &Parser<'i, '_>,
    selectors: &mut Vec<String>,
    range: std::ops::Range<SourcePosition>,
    location: SourceLocation,
) -> CssResult<'i, ()> {
    let selector = normalize_whitespace(parser.slice(range));
    if selector.is_empty() {
        return Err(syntax_error(parser, location, "Empty selector"));
    }
    selectors.push(selector);
    Ok(())
}

/// Parse an at-rule after its `@name` token.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: String,
    start: SourcePosition,
    location: SourceLocation,
) -> CssResult<'i, CssItem> {
    let prelude_start = parser.position();

    let prelude = loop {
        let before = parser.position();
        let token_location = parser.current_source_location();

        match parser.next().cloned() {
            Ok(Token::Semicolon) => {
                // Statement at-rules (@import, @charset, @namespace) are kept as-is
                return Ok(CssItem::Opaque(parser.slice_from(start).trim().to_string()));
            }
            Ok(Token::CurlyBracketBlock) => {
                break normalize_whitespace(parser.slice(prelude_start..before));
            }
            Ok(Token::CloseCurlyBracket) => {
                return Err(syntax_error(parser, token_location, "Unexpected '}' in at-rule"));
            }
            Ok(Token::BadString(_)) | Ok(Token::BadUrl(_)) => {
                return Err(syntax_error(parser, token_location, "Malformed token in at-rule"));
            }
            Ok(Token::Function(_)) | Ok(Token::ParenthesisBlock) | Ok(Token::SquareBracketBlock) => {
                skip_block(parser);
            }
            Ok(_) => {}
            Err(_) => {
                return Err(syntax_error(
                    parser,
                    location,
                    format!("Expected ';' or '{{' after '@{}'", name),
                ));
            }
        }
    };

    let body = parse_block(parser, location, |p| parse_block_body(p))?;

    Ok(match body {
        BlockBody::Declarations(declarations) => {
            CssItem::RuleSet(RuleSet::new(RuleContext::at_rule(name, prelude), declarations))
        }
        BlockBody::Items(items) => CssItem::Group(GroupRule::new(name, prelude, items)),
        BlockBody::Mixed => {
            tracing::debug!(name = %name, "Keeping mixed at-rule block verbatim");
            CssItem::Opaque(parser.slice_from(start).trim().to_string())
        }
    })
}

/// Parse the inside of an at-rule block.
///
/// Blocks that contain further `{}` blocks hold rules, everything else holds
/// declarations. A block of rules that turns out to also hold declarations
/// (`@page` with margin boxes) is [`BlockBody::Mixed`] when every entry is
/// well-formed; otherwise the error from reading it as rules is returned.
fn parse_block_body<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, BlockBody> {
    let state = parser.state();
    let nests_blocks = contains_block(parser);
    parser.reset(&state);

    if !nests_blocks {
        return Ok(BlockBody::Declarations(parse_declarations(parser)?));
    }

    match parse_items(parser, true) {
        Ok(items) => Ok(BlockBody::Items(items)),
        Err(err) => {
            parser.reset(&state);
            match parse_mixed_body(parser) {
                Ok(()) => Ok(BlockBody::Mixed),
                Err(_) => Err(err),
            }
        }
    }
}

/// Validate a block of declarations interleaved with nested rules.
fn parse_mixed_body<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, ()> {
    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            return Ok(());
        }

        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }

        let state = parser.state();
        let location = parser.current_source_location();
        let token = parser.next()?.clone();
        if let Token::AtKeyword(name) = token {
            parse_at_rule(parser, name.to_string(), state.position(), location)?;
            continue;
        }
        parser.reset(&state);

        if starts_nested_rule(parser) {
            parse_qualified_rule(parser)?;
        } else {
            parse_declaration(parser)?;
        }
    }
}

/// Whether a `{}` block comes before the next `;`.
fn starts_nested_rule(parser: &mut Parser<'_, '_>) -> bool {
    let state = parser.state();
    let _ = parser.parse_until_before(Delimiter::Semicolon | Delimiter::CurlyBracketBlock, |p| {
        while p.next().is_ok() {}
        Ok::<_, CssParseError<'_, ()>>(())
    });
    let nested = matches!(parser.next(), Ok(Token::CurlyBracketBlock));
    parser.reset(&state);
    nested
}

fn contains_block(parser: &mut Parser<'_, '_>) -> bool {
    while let Ok(token) = parser.next() {
        if matches!(token, Token::CurlyBracketBlock) {
            return true;
        }
    }
    false
}

/// Parse the `{}` block whose opening token was just returned.
///
/// `cssparser` closes blocks implicitly at end of input; a missing `}` is
/// still an error here.
fn parse_block<'i, T>(
    parser: &mut Parser<'i, '_>,
    location: SourceLocation,
    parse: impl for<'tt> FnOnce(&mut Parser<'i, 'tt>) -> CssResult<'i, T>,
) -> CssResult<'i, T> {
    let (value, end) = parser.parse_nested_block(|p| {
        let value = parse(p)?;
        p.skip_whitespace();
        Ok((value, p.position()))
    })?;

    if parser.slice(end..parser.position()).ends_with('}') {
        Ok(value)
    } else {
        Err(syntax_error(parser, location, "Unclosed block"))
    }
}

/// Parse CSS declarations.
fn parse_declarations<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Vec<Declaration>> {
    let mut declarations = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        // Empty declarations (`;;`) are allowed
        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }

        declarations.push(parse_declaration(parser)?);

        // Skip optional semicolon
        let _ = parser.try_parse(|p| p.expect_semicolon());
    }

    Ok(declarations)
}

/// Parse one `property: value [!important]` up to, not including, its `;`.
fn parse_declaration<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Declaration> {
    let location = parser.current_source_location();

    // Try to parse property name
    let property = match parser.next()?.clone() {
        Token::Ident(name) => name.to_string(),
        _ => return Err(syntax_error(parser, location, "Expected property name")),
    };

    // Expect colon
    parser.skip_whitespace();
    let colon_location = parser.current_source_location();
    if parser.expect_colon().is_err() {
        return Err(syntax_error(
            parser,
            colon_location,
            format!("Expected ':' after '{}'", property),
        ));
    }

    // Parse property value
    let (value, important) = parser
        .parse_until_before(Delimiter::Semicolon, |p| parse_value(p, &property, location))?;

    tracing::trace!(property = %property, value = %value, important, "Parsed declaration");
    Ok(Declaration {
        property,
        value,
        important,
    })
}

/// Parse a declaration value up to the next `;`, including `!important`.
fn parse_value<'i>(
    parser: &mut Parser<'i, '_>,
    property: &str,
    location: SourceLocation,
) -> CssResult<'i, (Value, bool)> {
    let mut list = ValueList::new();
    let mut pending: Option<Separator> = None;
    let mut important = false;

    loop {
        let start = parser.position();
        let token_location = parser.current_source_location();

        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Comment(_) => {}
            Token::WhiteSpace(_) => {
                if !list.is_empty() && pending.is_none() {
                    pending = Some(Separator::Space);
                }
            }
            Token::Comma | Token::Delim('/') => {
                if list.is_empty() || matches!(pending, Some(Separator::Comma | Separator::Slash)) {
                    return Err(syntax_error(parser, token_location, "Unexpected separator"));
                }
                pending = Some(if token == Token::Comma {
                    Separator::Comma
                } else {
                    Separator::Slash
                });
            }
            Token::Delim('!') => {
                parser.skip_whitespace();
                if parser.expect_ident_matching("important").is_err() {
                    return Err(syntax_error(
                        parser,
                        token_location,
                        "Expected 'important' after '!'",
                    ));
                }
                parser.skip_whitespace();
                if !parser.is_exhausted() {
                    return Err(syntax_error(
                        parser,
                        parser.current_source_location(),
                        "Unexpected content after '!important'",
                    ));
                }
                important = true;
                break;
            }
            Token::BadString(_) | Token::BadUrl(_) => {
                return Err(syntax_error(parser, token_location, "Malformed token in value"));
            }
            Token::CloseParenthesis | Token::CloseSquareBracket | Token::CloseCurlyBracket => {
                return Err(syntax_error(parser, token_location, "Unbalanced bracket in value"));
            }
            token => {
                let component = parse_component(parser, start, &token);
                list.push(pending.take().unwrap_or(Separator::Space), component);
            }
        }
    }

    if matches!(pending, Some(Separator::Comma | Separator::Slash)) {
        return Err(syntax_error(parser, location, "Value ends with a separator"));
    }

    if list.is_empty() {
        // Custom properties may be empty; everything else needs a value
        if property.starts_with("--") {
            return Ok((Value::Unsupported(String::new()), important));
        }
        return Err(syntax_error(
            parser,
            location,
            format!("Expected value for '{}'", property),
        ));
    }

    Ok((list.into_value(), important))
}

/// Classify one value component. `token` was just consumed from `parser`.
fn parse_component<'i>(parser: &mut Parser<'i, '_>, start: SourcePosition, token: &Token<'i>) -> Value {
    if let Some(color) = color_from_token(parser, token) {
        return Value::Color(color);
    }

    let kind = match token {
        Token::Ident(_) => Some(LiteralKind::Identifier),
        Token::Dimension { .. } => Some(LiteralKind::Dimension),
        Token::Percentage { .. } => Some(LiteralKind::Percentage),
        Token::Number { .. } => Some(LiteralKind::Number),
        Token::QuotedString(_) => Some(LiteralKind::String),
        Token::UnquotedUrl(_) => Some(LiteralKind::Url),
        // color_from_token already consumed the block of a color function
        Token::Function(name) if is_color_function(name) => None,
        Token::Function(name) => {
            skip_block(parser);
            if name.eq_ignore_ascii_case("url") {
                Some(LiteralKind::Url)
            } else {
                Some(LiteralKind::Function)
            }
        }
        Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
            skip_block(parser);
            None
        }
        _ => None,
    };

    let text = parser.slice_from(start);
    match kind {
        Some(kind) => Value::Literal(Literal::new(kind, text)),
        None => Value::Unsupported(text.to_string()),
    }
}

/// Consume the block whose opening token was just returned.
fn skip_block(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(|p| {
        while p.next().is_ok() {}
        Ok::<_, CssParseError<'_, ()>>(())
    });
}

/// Collapse whitespace runs to one space and trim, leaving quoted strings and
/// escaped characters as written.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut quote = None;
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                out.extend(chars.next());
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_ascii_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);

        match c {
            '"' | '\'' => quote = Some(c),
            '\\' => out.extend(chars.next()),
            _ => {}
        }
    }

    out
}

fn syntax_error<'i>(
    parser: &Parser<'i, '_>,
    location: SourceLocation,
    message: impl Into<String>,
) -> CssParseError<'i, ParseError> {
    parser.new_custom_error(ParseError::at(message, location))
}

fn into_parse_error(error: CssParseError<'_, ParseError>) -> ParseError {
    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            ParseError::at("Unexpected end of input", error.location)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            ParseError::at(format!("Unexpected token {:?}", token), error.location)
        }
        ParseErrorKind::Basic(other) => ParseError::at(format!("{:?}", other), error.location),
    }
}
