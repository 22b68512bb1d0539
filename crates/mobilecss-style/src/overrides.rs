//! Override stylesheet generation.
//!
//! For every declaration whose color is being replaced, the generator emits a
//! rule set with the same selectors (or at-rule) holding a single
//! `!important` declaration with the new color. Loaded after the base
//! stylesheet, the result recolors the app without touching the original.

use std::collections::HashMap;

use crate::parser::parse_color;
use crate::rules::{CssItem, Declaration, GroupRule, RuleSet, StyleSheet};
use crate::types::Color;
use crate::{Error, Result};

/// Generate an override stylesheet.
///
/// `replacements` maps color keys, as reported by
/// [`extract_color_usage`](crate::palette::extract_color_usage), to
/// replacement color text. Lookup is by exact key.
///
/// # Errors
///
/// Every replacement is validated before anything is generated. The first
/// invalid one, in key order, fails the call with
/// [`Error::UnresolvableColor`].
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use mobilecss_style::prelude::*;
///
/// let base = parse_css(".foo { color: #fff; margin: 0 }").unwrap();
/// let replacements = HashMap::from([("#fff".to_string(), "#138f87".to_string())]);
///
/// let overrides = generate_overrides(&base, &replacements).unwrap();
/// assert_eq!(render_css(&overrides), ".foo {\n\tcolor: #138f87 !important;\n}\n");
/// ```
pub fn generate_overrides(
    sheet: &StyleSheet,
    replacements: &HashMap<String, String>,
) -> Result<StyleSheet> {
    let resolved = resolve_replacements(replacements)?;
    let mut overrides = StyleSheet::new();

    if resolved.is_empty() {
        return Ok(overrides);
    }

    sheet.visit_rule_sets(|groups, rule_set| {
        for declaration in rule_set.iter() {
            let Some(replacement) = declaration
                .value
                .as_color()
                .and_then(|color| resolved.get(color.key()))
            else {
                continue;
            };

            let mut rule = RuleSet::with_context_of(rule_set);
            rule.push(Declaration::important(
                declaration.property.clone(),
                replacement.clone(),
            ));

            overrides.push(wrap_in_groups(groups, rule));
        }
    });

    tracing::debug!(
        replacements = resolved.len(),
        rules = overrides.len(),
        "Generated override stylesheet"
    );
    Ok(overrides)
}

/// Parse every replacement into a color, checking keys in sorted order.
fn resolve_replacements(replacements: &HashMap<String, String>) -> Result<HashMap<&str, Color>> {
    let mut keys: Vec<&String> = replacements.keys().collect();
    keys.sort();

    let mut resolved = HashMap::with_capacity(keys.len());
    for key in keys {
        let text = &replacements[key];
        let color = parse_color(text)
            .map_err(|err| Error::unresolvable_color(key.as_str(), text.as_str(), err.message))?;
        resolved.insert(key.as_str(), color);
    }

    Ok(resolved)
}

/// Wrap a rule set in empty copies of its enclosing group rules.
fn wrap_in_groups(groups: &[&GroupRule], rule: RuleSet) -> CssItem {
    groups
        .iter()
        .rev()
        .fold(CssItem::RuleSet(rule), |item, group| {
            let mut wrapper = GroupRule::with_context_of(group);
            wrapper.items.push(item);
            CssItem::Group(wrapper)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_css;
    use crate::rules::RuleContext;

    fn replacements(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_matching_declarations() {
        let base = parse_css(".foo, .bar { color: #fff; background: #000; width: 1px }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "#138F87")])).unwrap();

        let rules: Vec<&RuleSet> = out.rule_sets().collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].context, RuleContext::selectors([".foo", ".bar"]));
        assert_eq!(rules[0].declarations[0].property, "color");
        assert_eq!(rules[0].declarations[0].value.to_string(), "#138f87");
        assert!(rules[0].declarations[0].important);
    }

    #[test]
    fn one_rule_set_per_matching_declaration() {
        let base = parse_css(".a { color: #fff; border-color: #fff } .b { color: #fff }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "red")])).unwrap();

        let properties: Vec<(String, String)> = out
            .rule_sets()
            .map(|r| (r.context.to_string(), r.declarations[0].property.clone()))
            .collect();
        assert_eq!(
            properties,
            [
                (".a".to_string(), "color".to_string()),
                (".a".to_string(), "border-color".to_string()),
                (".b".to_string(), "color".to_string()),
            ]
        );
    }

    #[test]
    fn no_match_produces_nothing() {
        let base = parse_css(".foo { color: #abc }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "#000")])).unwrap();
        assert!(out.is_empty());

        let out = generate_overrides(&base, &HashMap::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn colors_inside_lists_are_not_replaced() {
        let base = parse_css(".foo { border: 1px solid #fff }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "#000")])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn at_rule_context_is_copied() {
        let base = parse_css("@page :first { color: #fff; margin: 1cm }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "#000")])).unwrap();
        assert_eq!(out.render(), "@page :first {\n\tcolor: #000 !important;\n}\n");
    }

    #[test]
    fn group_rules_are_wrapped() {
        let base = parse_css(
            "@media screen { @supports (display: grid) { .a { color: #fff; margin: 0 } } .b { color: #000 } }",
        )
        .unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "blue")])).unwrap();
        assert_eq!(
            out.render(),
            "@media screen {\n\t@supports (display: grid) {\n\t\t.a {\n\t\t\tcolor: blue !important;\n\t\t}\n\t}\n}\n"
        );
    }

    #[test]
    fn invalid_replacement_fails_before_output() {
        let base = parse_css(".foo { color: #fff } .bar { color: #000 }").unwrap();
        let err = generate_overrides(
            &base,
            &replacements(&[("#fff", "notacolor"), ("#000", "#111"), ("#aaa", "also bad")]),
        )
        .unwrap_err();

        match err {
            Error::UnresolvableColor {
                color, replacement, ..
            } => {
                assert_eq!(color, "#aaa");
                assert_eq!(replacement, "also bad");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lookup_is_by_exact_key() {
        let base = parse_css(".a { color: #ffffff } .b { color: #FFF }").unwrap();
        let out = generate_overrides(&base, &replacements(&[("#fff", "#000")])).unwrap();
        let contexts: Vec<String> = out.rule_sets().map(|r| r.context.to_string()).collect();
        assert_eq!(contexts, [".b"]);
    }
}
