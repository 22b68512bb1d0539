//! Configuration loading.
//!
//! Settings live in a TOML file, `mobilecss.toml` by default:
//!
//! ```toml
//! [output]
//! directory = "public"
//! file_name = "mobilecss.css"
//! public_url = "https://example.org/mobilecss.css"
//! current_url = "https://example.org/mobilecss.css#0"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how the generated stylesheet is published.
    pub output: OutputConfig,
}

/// Publishing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the stylesheet is written to.
    pub directory: PathBuf,
    /// File name of the stylesheet inside `directory`.
    pub file_name: String,
    /// URL under which clients fetch the stylesheet, without fragment.
    pub public_url: String,
    /// The URL clients are currently configured with, if any.
    pub current_url: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("public"),
            file_name: "mobilecss.css".to_string(),
            public_url: "/mobilecss.css".to_string(),
            current_url: None,
        }
    }
}

impl Config {
    /// Default configuration file name.
    pub const DEFAULT_PATH: &'static str = "mobilecss.toml";

    /// Load configuration from a file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read and
    /// [`Error::Config`] if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No configuration file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(e, path)),
        };

        Self::from_toml(&content, path)
    }

    /// Parse configuration text; `path` is only used for error reporting.
    pub fn from_toml(content: &str, path: impl AsRef<Path>) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
            [output]
            directory = "/srv/www"
            file_name = "theme.css"
            public_url = "https://example.org/theme.css"
            current_url = "https://example.org/theme.css#0"
            "#,
            "mobilecss.toml",
        )
        .unwrap();

        assert_eq!(config.output.directory, PathBuf::from("/srv/www"));
        assert_eq!(config.output.file_name, "theme.css");
        assert_eq!(config.output.public_url, "https://example.org/theme.css");
        assert_eq!(
            config.output.current_url.as_deref(),
            Some("https://example.org/theme.css#0")
        );
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = Config::from_toml("[output]\nfile_name = \"a.css\"\n", "x.toml").unwrap();
        assert_eq!(config.output.file_name, "a.css");
        assert_eq!(config.output.directory, PathBuf::from("public"));
        assert_eq!(config.output.current_url, None);

        assert_eq!(Config::from_toml("", "x.toml").unwrap(), Config::default());
    }

    #[test]
    fn invalid_config() {
        let err = Config::from_toml("[output]\ndirectory = 3\n", "bad.toml").unwrap_err();
        assert!(matches!(err, Error::Config { ref path, .. } if path == Path::new("bad.toml")));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mobilecss.toml");
        std::fs::write(&path, "[output]\npublic_url = \"https://m.example/a.css\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.public_url, "https://m.example/a.css");
    }
}
