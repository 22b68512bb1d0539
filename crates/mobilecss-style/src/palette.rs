//! Color extraction and ranking.
//!
//! Only declarations whose whole value is a single color are counted; a color
//! inside a shorthand such as `border: 1px solid #fff` is left alone, as is
//! anything kept opaque by the parser.

use std::collections::HashMap;

use crate::rules::StyleSheet;

/// Usage counts of every color key in a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTally {
    /// Color key to number of declarations using it.
    pub counts: HashMap<String, usize>,
    /// Keys in the order they were first encountered.
    pub first_seen: Vec<String>,
}

impl ColorTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more use of `key`.
    pub fn record(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.first_seen.push(key.to_string());
            }
        }
    }

    /// Get the count for a key, zero when the key was never seen.
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    /// Check if no color was seen.
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Rank the tallied colors.
    pub fn rank(&self) -> Vec<ColorUsage> {
        rank_colors(&self.counts, &self.first_seen)
    }
}

/// A color key with its usage count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorUsage {
    /// The canonical color key.
    pub color: String,
    /// Number of declarations using the color.
    pub count: usize,
}

impl ColorUsage {
    /// Create a usage entry.
    pub fn new(color: impl Into<String>, count: usize) -> Self {
        Self {
            color: color.into(),
            count,
        }
    }
}

/// Count color usage across every rule set, including those nested in
/// group rules.
pub fn extract_colors(sheet: &StyleSheet) -> ColorTally {
    let mut tally = ColorTally::new();

    for rule_set in sheet.rule_sets() {
        for declaration in rule_set.iter() {
            if let Some(color) = declaration.value.as_color() {
                tally.record(color.key());
            }
        }
    }

    tracing::debug!(colors = tally.len(), "Extracted colors");
    tally
}

/// Order colors by count, most used first.
///
/// Ties are broken by the position of the key in `first_seen`. Keys missing
/// from `first_seen` sort after all listed keys, alphabetically, so the
/// result never depends on map iteration order.
pub fn rank_colors(counts: &HashMap<String, usize>, first_seen: &[String]) -> Vec<ColorUsage> {
    let position: HashMap<&str, usize> = first_seen
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_str(), i))
        .collect();

    let mut ranked: Vec<(&String, usize)> = counts.iter().map(|(key, &count)| (key, count)).collect();
    ranked.sort_by(|(a_key, a_count), (b_key, b_count)| {
        let a_pos = position.get(a_key.as_str()).copied().unwrap_or(usize::MAX);
        let b_pos = position.get(b_key.as_str()).copied().unwrap_or(usize::MAX);
        b_count
            .cmp(a_count)
            .then(a_pos.cmp(&b_pos))
            .then_with(|| a_key.cmp(b_key))
    });

    ranked
        .into_iter()
        .map(|(key, count)| ColorUsage::new(key.clone(), count))
        .collect()
}

/// Extract and rank the colors of a stylesheet.
///
/// # Example
///
/// ```
/// use mobilecss_style::prelude::*;
///
/// let sheet = parse_css("a { color: #fff } b { color: #fff } c { color: #000 }").unwrap();
/// let usage = extract_color_usage(&sheet);
/// assert_eq!(usage, [ColorUsage::new("#fff", 2), ColorUsage::new("#000", 1)]);
/// ```
pub fn extract_color_usage(sheet: &StyleSheet) -> Vec<ColorUsage> {
    extract_colors(sheet).rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_css;

    fn usage(css: &str) -> Vec<(String, usize)> {
        extract_color_usage(&parse_css(css).unwrap())
            .into_iter()
            .map(|u| (u.color, u.count))
            .collect()
    }

    #[test]
    fn counts_each_declaration() {
        let found = usage(".a { color: #FFF; background-color: #fff } .b { color: red; color: red }");
        assert_eq!(found, [("#fff".to_string(), 2), ("red".to_string(), 2)]);
    }

    #[test]
    fn only_whole_value_colors_count() {
        let found = usage(".a { border: 1px solid #fff; background: #000 url(a.png); color: #abc }");
        assert_eq!(found, [("#abc".to_string(), 1)]);
    }

    #[test]
    fn nested_rule_sets_are_counted() {
        let css = r#"
            @charset "utf-8";
            .a { color: #111 }
            @media (max-width: 600px) {
                .a { color: #222 }
                @supports (display: grid) { .b { color: #222 } }
            }
            @font-face { font-family: X; color: #111 }
        "#;
        assert_eq!(
            usage(css),
            [("#111".to_string(), 2), ("#222".to_string(), 2)]
        );
    }

    #[test]
    fn distinct_spellings_stay_distinct() {
        let found = usage(".a { color: #fff } .b { color: #ffffff } .c { color: white }");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn tally_records_first_seen_order() {
        let tally = extract_colors(&parse_css(".a { color: #222 } .b { color: #111; color: #222 }").unwrap());
        assert_eq!(tally.first_seen, ["#222", "#111"]);
        assert_eq!(tally.count("#222"), 2);
        assert_eq!(tally.count("#333"), 0);
    }

    #[test]
    fn rank_ties_follow_first_seen() {
        let counts: HashMap<String, usize> = [("#b", 1), ("#a", 3), ("#c", 1), ("#d", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let first_seen = ["#c", "#a", "#b"].map(String::from);

        let ranked = rank_colors(&counts, &first_seen);
        let keys: Vec<&str> = ranked.iter().map(|u| u.color.as_str()).collect();
        assert_eq!(keys, ["#a", "#c", "#b", "#d"]);
    }

    #[test]
    fn empty_stylesheet_has_no_colors() {
        assert!(extract_colors(&StyleSheet::new()).is_empty());
        assert!(usage("a { margin: 0 }").is_empty());
    }
}
