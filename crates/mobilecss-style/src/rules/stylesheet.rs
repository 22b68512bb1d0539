//! Stylesheet documents.

use super::RuleSet;
use crate::Result;

/// A top-level or nested entry of a stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CssItem {
    /// A selector block or at-rule block of declarations.
    RuleSet(RuleSet),
    /// An at-rule whose block contains further items, such as `@media`.
    Group(GroupRule),
    /// Well-formed content outside the modelled subset, kept verbatim.
    ///
    /// Covers at-rule statements like `@import` and `@charset` and rules that
    /// nest other rules inside a selector block.
    Opaque(String),
}

/// An at-rule containing nested rules, such as `@media` or `@supports`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRule {
    /// The at-rule name without `@`.
    pub name: String,
    /// The prelude between the name and the block, whitespace-normalized.
    pub prelude: String,
    /// The nested items, in source order.
    pub items: Vec<CssItem>,
}

impl GroupRule {
    /// Create a group rule.
    pub fn new(name: impl Into<String>, prelude: impl Into<String>, items: Vec<CssItem>) -> Self {
        Self {
            name: name.into(),
            prelude: prelude.into(),
            items,
        }
    }

    /// Create an empty group rule with the name and prelude of `other`.
    pub fn with_context_of(other: &GroupRule) -> Self {
        Self::new(other.name.clone(), other.prelude.clone(), vec![])
    }
}

/// A parsed stylesheet: an ordered sequence of items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    /// The top-level items in source order.
    pub items: Vec<CssItem>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { items: vec![] }
    }

    /// Parse a stylesheet from CSS text.
    pub fn from_css(css: &str) -> Result<Self> {
        crate::parser::parse_css(css)
    }

    /// Render the stylesheet back to CSS text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Append an item.
    pub fn push(&mut self, item: CssItem) {
        self.items.push(item);
    }

    /// Append a rule set at the top level.
    pub fn push_rule_set(&mut self, rule_set: RuleSet) {
        self.items.push(CssItem::RuleSet(rule_set));
    }

    /// Get the number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over top-level items.
    pub fn iter(&self) -> impl Iterator<Item = &CssItem> {
        self.items.iter()
    }

    /// Iterate over every rule set in document order, including those
    /// nested inside group rules.
    pub fn rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        let mut found = vec![];
        self.visit_rule_sets(|_, rule_set| found.push(rule_set));
        found.into_iter()
    }

    /// Call `visitor` for every rule set in document order.
    ///
    /// The first argument lists the group rules enclosing the rule set,
    /// outermost first.
    pub fn visit_rule_sets<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(&[&'a GroupRule], &'a RuleSet),
    {
        let mut groups = vec![];
        visit_items(&self.items, &mut groups, &mut visitor);
    }
}

fn visit_items<'a, F>(items: &'a [CssItem], groups: &mut Vec<&'a GroupRule>, visitor: &mut F)
where
    F: FnMut(&[&'a GroupRule], &'a RuleSet),
{
    for item in items {
        match item {
            CssItem::RuleSet(rule_set) => visitor(groups, rule_set),
            CssItem::Group(group) => {
                groups.push(group);
                visit_items(&group.items, groups, visitor);
                groups.pop();
            }
            CssItem::Opaque(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleContext;

    fn rule_set(selector: &str) -> RuleSet {
        RuleSet::new(RuleContext::selectors([selector]), vec![])
    }

    #[test]
    fn stylesheet_creation() {
        let mut sheet = StyleSheet::new();
        assert!(sheet.is_empty());

        sheet.push_rule_set(rule_set(".a"));
        sheet.push(CssItem::Opaque("@charset \"utf-8\";".to_string()));

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rule_sets().count(), 1);
    }

    #[test]
    fn visit_reports_enclosing_groups() {
        let inner = GroupRule::new("supports", "(display: grid)", vec![CssItem::RuleSet(rule_set(".b"))]);
        let outer = GroupRule::new(
            "media",
            "screen",
            vec![CssItem::RuleSet(rule_set(".a")), CssItem::Group(inner)],
        );
        let mut sheet = StyleSheet::new();
        sheet.push(CssItem::Group(outer));
        sheet.push_rule_set(rule_set(".c"));

        let mut seen = vec![];
        sheet.visit_rule_sets(|groups, rule_set| {
            let path: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
            seen.push((path, rule_set.context.clone()));
        });

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, vec!["media"]);
        assert_eq!(seen[1].0, vec!["media", "supports"]);
        assert!(seen[2].0.is_empty());
        assert_eq!(seen[2].1, RuleContext::selectors([".c"]));
    }

    #[test]
    fn group_context_copy() {
        let group = GroupRule::new("media", "print", vec![CssItem::RuleSet(rule_set(".a"))]);
        let copy = GroupRule::with_context_of(&group);
        assert_eq!(copy.name, "media");
        assert_eq!(copy.prelude, "print");
        assert!(copy.items.is_empty());
    }
}
