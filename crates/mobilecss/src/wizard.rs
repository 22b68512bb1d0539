//! The three-step recoloring workflow.
//!
//! 1. Load the base stylesheet and show its colors, most used first.
//! 2. Collect replacement colors and the administrator's custom CSS,
//!    pre-filled from the previously published file.
//! 3. Generate the override stylesheet and publish it.
//!
//! [`WizardSession`] carries the parsed stylesheet from step 1 to step 3 so
//! the base CSS is parsed once per session.

use std::collections::HashMap;

use mobilecss_style::prelude::*;

use crate::generated::{self, GeneratedFile};
use crate::store::{CssFileStore, PublishedFile};
use crate::{Error, Result};

/// State kept between the steps of one recoloring session.
#[derive(Debug, Clone)]
pub struct WizardSession {
    stylesheet: StyleSheet,
    colors: Vec<ColorUsage>,
}

impl WizardSession {
    /// Parse the base stylesheet and rank its colors.
    pub fn start(base_css: &str) -> Result<Self> {
        let stylesheet = parse_css(base_css)?;
        let colors = extract_color_usage(&stylesheet);

        tracing::debug!(colors = colors.len(), "Started session");
        Ok(Self { stylesheet, colors })
    }

    /// The colors of the base stylesheet, most used first.
    pub fn colors(&self) -> &[ColorUsage] {
        &self.colors
    }

    /// The parsed base stylesheet.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    /// The custom CSS of the currently published file, empty if there is
    /// none.
    pub fn existing_custom_css(&self, store: &CssFileStore) -> Result<String> {
        Ok(store
            .read()?
            .map(|text| generated::existing_custom_css(&text))
            .unwrap_or_default())
    }

    /// Generate the override stylesheet and publish it with `custom_css`.
    ///
    /// Replacements that are blank or equal to their original color are
    /// skipped.
    pub fn finish(
        &self,
        replacements: &HashMap<String, String>,
        custom_css: &str,
        store: &CssFileStore,
        current_url: Option<&str>,
    ) -> Result<PublishedFile> {
        let replacements = effective_replacements(replacements);
        let overrides = generate_overrides(&self.stylesheet, &replacements)?;

        tracing::debug!(
            replacements = replacements.len(),
            rules = overrides.len(),
            "Generated overrides"
        );

        let file = GeneratedFile::new(custom_css.trim_end_matches('\n'), render_css(&overrides));
        store.publish(&file.render(), current_url)
    }
}

/// Drop replacements the administrator left blank or unchanged.
fn effective_replacements(replacements: &HashMap<String, String>) -> HashMap<String, String> {
    replacements
        .iter()
        .filter_map(|(original, replacement)| {
            let replacement = replacement.trim();
            if replacement.is_empty() || is_same_color(original, replacement) {
                return None;
            }
            Some((original.clone(), replacement.to_string()))
        })
        .collect()
}

fn is_same_color(original: &str, replacement: &str) -> bool {
    match Color::parse(replacement) {
        Ok(color) => color.key() == original,
        Err(_) => replacement == original,
    }
}

/// Parse a `FROM=TO` command line replacement.
///
/// `FROM` is reduced to its color key when it is a color, so `#FFF=...`
/// matches declarations written as `#fff`.
pub fn parse_replacement(arg: &str) -> Result<(String, String)> {
    let (from, to) = arg
        .split_once('=')
        .ok_or_else(|| Error::InvalidReplacement(arg.to_string()))?;
    let (from, to) = (from.trim(), to.trim());

    if from.is_empty() || to.is_empty() {
        return Err(Error::InvalidReplacement(arg.to_string()));
    }

    let key = Color::parse(from)
        .map(|color| color.key().to_string())
        .unwrap_or_else(|_| from.to_string());
    Ok((key, to.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn start_ranks_colors() {
        let session = WizardSession::start("a { color: #111 } b { color: #222; background: #222 }").unwrap();
        let colors: Vec<(&str, usize)> = session
            .colors()
            .iter()
            .map(|u| (u.color.as_str(), u.count))
            .collect();
        assert_eq!(colors, [("#222", 2), ("#111", 1)]);
        assert_eq!(session.stylesheet().len(), 2);
    }

    #[test]
    fn start_rejects_malformed_css() {
        assert!(matches!(WizardSession::start("a { color: red"), Err(Error::Style(_))));
    }

    #[test]
    fn blank_and_unchanged_replacements_are_skipped() {
        let effective = effective_replacements(&map(&[
            ("#fff", ""),
            ("#000", "  "),
            ("#abc", "#ABC"),
            ("red", "red"),
            ("#111", "#222"),
        ]));
        assert_eq!(effective, map(&[("#111", "#222")]));
    }

    #[test]
    fn replacement_arguments() {
        assert_eq!(
            parse_replacement("#FFF=#138f87").unwrap(),
            ("#fff".to_string(), "#138f87".to_string())
        );
        assert_eq!(
            parse_replacement(" White = rgb(0, 0, 0) ").unwrap(),
            ("white".to_string(), "rgb(0, 0, 0)".to_string())
        );
        assert!(matches!(parse_replacement("#fff"), Err(Error::InvalidReplacement(_))));
        assert!(matches!(parse_replacement("=#fff"), Err(Error::InvalidReplacement(_))));
        assert!(matches!(parse_replacement("#fff="), Err(Error::InvalidReplacement(_))));
    }
}
