//! Rule sets: a context plus declarations.

use super::Declaration;

/// Where a rule set's declarations apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleContext {
    /// A selector block such as `.a, .b { ... }`.
    Selectors(Vec<String>),
    /// An at-rule whose block holds declarations, such as `@font-face { ... }`.
    AtRule {
        /// The at-rule name without `@`.
        name: String,
        /// The prelude between the name and the block, whitespace-normalized.
        arguments: String,
    },
}

impl RuleContext {
    /// Create a selector context.
    pub fn selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selectors(selectors.into_iter().map(Into::into).collect())
    }

    /// Create an at-rule context.
    pub fn at_rule(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::AtRule {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A selector block or at-rule block with its declarations in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The selectors or at-rule this rule set belongs to.
    pub context: RuleContext,
    /// The declarations, in source order.
    pub declarations: Vec<Declaration>,
}

impl RuleSet {
    /// Create a rule set.
    pub fn new(context: RuleContext, declarations: Vec<Declaration>) -> Self {
        Self {
            context,
            declarations,
        }
    }

    /// Create an empty rule set with a copy of `other`'s context.
    ///
    /// Declarations are not copied.
    pub fn with_context_of(other: &RuleSet) -> Self {
        Self::new(other.context.clone(), vec![])
    }

    /// Add a declaration.
    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Get the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the rule set has no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate over declarations.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn context_copy_drops_declarations() {
        let mut original = RuleSet::new(RuleContext::selectors([".foo", ".bar"]), vec![]);
        original.push(Declaration::new("color", Color::from_hex("fff").unwrap()));
        original.push(Declaration::new("background", Color::from_hex("000").unwrap()));

        let copy = RuleSet::with_context_of(&original);

        assert_eq!(copy.context, original.context);
        assert!(copy.is_empty());
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn at_rule_context() {
        let context = RuleContext::at_rule("page", ":first");
        assert_eq!(
            context,
            RuleContext::AtRule {
                name: "page".to_string(),
                arguments: ":first".to_string(),
            }
        );
    }
}
