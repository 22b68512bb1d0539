//! Error types for the front end.

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for front-end operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading configuration, generating or publishing CSS.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parsing or override generation failed.
    #[error(transparent)]
    Style(#[from] mobilecss_style::Error),

    /// A file could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The configuration file is not valid TOML for [`Config`](crate::config::Config).
    #[error("Invalid configuration in '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A command line replacement is not of the form `FROM=TO`.
    #[error("Invalid replacement '{0}', expected FROM=TO")]
    InvalidReplacement(String),
}

impl Error {
    /// Create an I/O error for a path.
    pub fn io(source: io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if the error is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = Error::io(io::Error::new(io::ErrorKind::NotFound, "gone"), "out/a.css");
        assert!(err.is_io());
        assert_eq!(err.to_string(), "I/O error on 'out/a.css': gone");
    }

    #[test]
    fn style_error_is_transparent() {
        let err = Error::from(mobilecss_style::Error::parse("Unexpected '}'", 1, 4));
        assert_eq!(err.to_string(), "CSS parse error at 1:4: Unexpected '}'");
    }

    #[test]
    fn invalid_replacement_display() {
        let err = Error::InvalidReplacement("#fff".to_string());
        assert_eq!(err.to_string(), "Invalid replacement '#fff', expected FROM=TO");
    }
}
