//! Stylesheet serialization.
//!
//! Output uses one declaration per line with tab indentation. Formatting is
//! not meant to match any style guide; parsing the rendered text yields the
//! same stylesheet again.

use std::fmt::{self, Write};

use crate::rules::{CssItem, GroupRule, RuleContext, RuleSet, StyleSheet};

/// Render a stylesheet to CSS text.
///
/// # Example
///
/// ```
/// use mobilecss_style::prelude::*;
///
/// let sheet = parse_css("@media print{.a{color:red}}").unwrap();
/// assert_eq!(render_css(&sheet), "@media print {\n\t.a {\n\t\tcolor: red;\n\t}\n}\n");
/// ```
pub fn render_css(sheet: &StyleSheet) -> String {
    sheet.to_string()
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.items, 0)
    }
}

impl fmt::Display for RuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleContext::Selectors(selectors) => f.write_str(&selectors.join(", ")),
            RuleContext::AtRule { name, arguments } => write_at_prelude(f, name, arguments),
        }
    }
}

fn write_items(f: &mut impl Write, items: &[CssItem], depth: usize) -> fmt::Result {
    for item in items {
        match item {
            CssItem::RuleSet(rule_set) => write_rule_set(f, rule_set, depth)?,
            CssItem::Group(group) => write_group(f, group, depth)?,
            CssItem::Opaque(text) => {
                indent(f, depth)?;
                f.write_str(text)?;
                f.write_char('\n')?;
            }
        }
    }
    Ok(())
}

fn write_rule_set(f: &mut impl Write, rule_set: &RuleSet, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "{} {{", rule_set.context)?;
    for declaration in &rule_set.declarations {
        indent(f, depth + 1)?;
        writeln!(f, "{};", declaration)?;
    }
    indent(f, depth)?;
    f.write_str("}\n")
}

fn write_group(f: &mut impl Write, group: &GroupRule, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    write_at_prelude(f, &group.name, &group.prelude)?;
    f.write_str(" {\n")?;
    write_items(f, &group.items, depth + 1)?;
    indent(f, depth)?;
    f.write_str("}\n")
}

fn write_at_prelude(f: &mut impl Write, name: &str, prelude: &str) -> fmt::Result {
    if prelude.is_empty() {
        write!(f, "@{}", name)
    } else {
        write!(f, "@{} {}", name, prelude)
    }
}

fn indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_char('\t')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Declaration;
    use crate::types::{Color, Literal, LiteralKind};

    #[test]
    fn render_selector_block() {
        let mut rule_set = RuleSet::new(RuleContext::selectors([".foo", "a:hover"]), vec![]);
        rule_set.push(Declaration::important("color", Color::from_hex("138f87").unwrap()));
        rule_set.push(Declaration::new("margin", Literal::new(LiteralKind::Number, "0")));

        let mut sheet = StyleSheet::new();
        sheet.push_rule_set(rule_set);

        assert_eq!(
            render_css(&sheet),
            ".foo, a:hover {\n\tcolor: #138f87 !important;\n\tmargin: 0;\n}\n"
        );
    }

    #[test]
    fn render_at_rule_without_arguments() {
        let mut sheet = StyleSheet::new();
        sheet.push_rule_set(RuleSet::new(RuleContext::at_rule("font-face", ""), vec![]));
        assert_eq!(sheet.render(), "@font-face {\n}\n");
    }

    #[test]
    fn render_opaque_inside_group() {
        let mut sheet = StyleSheet::new();
        sheet.push(CssItem::Group(GroupRule::new(
            "supports",
            "(display: grid)",
            vec![CssItem::Opaque("@import \"a.css\";".to_string())],
        )));
        assert_eq!(
            sheet.render(),
            "@supports (display: grid) {\n\t@import \"a.css\";\n}\n"
        );
    }

    #[test]
    fn render_empty_sheet() {
        assert_eq!(render_css(&StyleSheet::new()), "");
    }
}
