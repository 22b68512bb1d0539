//! The layout of a published stylesheet.
//!
//! A published file carries the administrator's hand-written CSS between two
//! marker comments, followed by the generated color overrides:
//!
//! ```text
//! /* This is an automatically generated file. DO NOT EDIT */
//!
//! /* START ADDLCSS */
//! <custom css>
//! /* END ADDLCSS */
//!
//! <override css>
//! ```
//!
//! The markers let the next run recover the custom CSS so it can be edited
//! again instead of being lost.

use std::fmt;

/// First line of every generated file.
pub const HEADER: &str = "/* This is an automatically generated file. DO NOT EDIT */";
/// Comment opening the custom CSS section.
pub const START_MARKER: &str = "/* START ADDLCSS */";
/// Comment closing the custom CSS section.
pub const END_MARKER: &str = "/* END ADDLCSS */";

/// One of the two custom CSS markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    /// The marker comment text.
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Start => START_MARKER,
            Marker::End => END_MARKER,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated file is missing one of its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Generated file has no '{marker}' marker")]
pub struct MissingMarkerError {
    /// The marker that was not found.
    pub marker: Marker,
}

/// The two sections of a published stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFile {
    /// CSS written by the administrator, kept across runs.
    pub custom_css: String,
    /// The generated color overrides.
    pub override_css: String,
}

impl GeneratedFile {
    /// Create a generated file from its sections.
    pub fn new(custom_css: impl Into<String>, override_css: impl Into<String>) -> Self {
        Self {
            custom_css: custom_css.into(),
            override_css: override_css.into(),
        }
    }

    /// Render the file contents.
    pub fn render(&self) -> String {
        format!(
            "{HEADER}\n\n{START_MARKER}\n{}\n{END_MARKER}\n\n{}",
            self.custom_css, self.override_css
        )
    }

    /// Split a published file back into its sections.
    ///
    /// # Errors
    ///
    /// Returns [`MissingMarkerError`] when either marker is absent.
    pub fn parse(text: &str) -> Result<Self, MissingMarkerError> {
        let (_, rest) = text.split_once(START_MARKER).ok_or(MissingMarkerError {
            marker: Marker::Start,
        })?;
        let (custom, rest) = rest.split_once(END_MARKER).ok_or(MissingMarkerError {
            marker: Marker::End,
        })?;

        let custom = custom.strip_prefix('\n').unwrap_or(custom);
        let custom = custom.strip_suffix('\n').unwrap_or(custom);

        let mut overrides = rest;
        for _ in 0..2 {
            overrides = overrides.strip_prefix('\n').unwrap_or(overrides);
        }

        Ok(Self::new(custom, overrides))
    }
}

impl fmt::Display for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Get the custom CSS of a previously published file.
///
/// Files without markers, such as ones written by hand, yield an empty
/// string.
pub fn existing_custom_css(text: &str) -> String {
    match GeneratedFile::parse(text) {
        Ok(file) => file.custom_css,
        Err(err) => {
            tracing::debug!(error = %err, "No custom CSS in published file");
            String::new()
        }
    }
}
