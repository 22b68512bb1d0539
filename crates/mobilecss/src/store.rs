//! Storage for the published stylesheet.

use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::writer::AtomicWriter;
use crate::{Error, Result};

/// The single published stylesheet file and the URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssFileStore {
    directory: PathBuf,
    file_name: String,
    public_url: String,
}

/// Where a stylesheet was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFile {
    /// The file on disk.
    pub path: PathBuf,
    /// The URL to give to clients, including the cache-busting fragment.
    pub url: String,
}

impl CssFileStore {
    /// Create a store.
    pub fn new(
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            public_url: public_url.into(),
        }
    }

    /// Create a store from the output settings.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(
            config.directory.clone(),
            config.file_name.clone(),
            config.public_url.clone(),
        )
    }

    /// The path of the published file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Read the currently published stylesheet, `None` if nothing has been
    /// published yet.
    pub fn read(&self) -> Result<Option<String>> {
        let path = self.path();
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(e, &path)),
        }
    }

    /// Replace the published stylesheet.
    ///
    /// `current_url` is the URL clients currently use; the returned URL always
    /// differs from it so clients notice the update.
    pub fn publish(&self, css: &str, current_url: Option<&str>) -> Result<PublishedFile> {
        std::fs::create_dir_all(&self.directory).map_err(|e| Error::io(e, &self.directory))?;

        let path = self.path();
        AtomicWriter::write(&path, |w| w.write_str(css))?;

        let url = cache_busting_url(&self.public_url, current_url);
        tracing::info!(path = %path.display(), url = %url, bytes = css.len(), "Published stylesheet");

        Ok(PublishedFile { path, url })
    }
}

/// Append a fragment to `public_url` that differs from the one on
/// `current_url`.
///
/// Clients only reload the stylesheet when its URL changes, so each publish
/// alternates between `#0` and `#1`: `#1` if the current URL ends in `0`,
/// `#0` otherwise.
pub fn cache_busting_url(public_url: &str, current_url: Option<&str>) -> String {
    let base = public_url.split_once('#').map_or(public_url, |(base, _)| base);
    let fragment = match current_url {
        Some(url) if url.ends_with('0') => "1",
        _ => "0",
    };
    format!("{}#{}", base, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_toggles() {
        let url = "https://example.org/mobilecss.css";
        assert_eq!(
            cache_busting_url(url, Some("https://example.org/mobilecss.css#0")),
            "https://example.org/mobilecss.css#1"
        );
        assert_eq!(
            cache_busting_url(url, Some("https://example.org/mobilecss.css#1")),
            "https://example.org/mobilecss.css#0"
        );
        assert_eq!(cache_busting_url(url, Some("")), "https://example.org/mobilecss.css#0");
        assert_eq!(cache_busting_url(url, None), "https://example.org/mobilecss.css#0");
    }

    #[test]
    fn existing_fragment_is_replaced() {
        assert_eq!(cache_busting_url("/a.css#7", Some("/a.css#0")), "/a.css#1");
    }

    #[test]
    fn read_before_publish() {
        let dir = tempfile::tempdir().unwrap();
        let store = CssFileStore::new(dir.path(), "a.css", "/a.css");
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn publish_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CssFileStore::new(dir.path().join("out"), "a.css", "/a.css");

        let published = store.publish(".a { color: red }", Some("/a.css#0")).unwrap();
        assert_eq!(published.path, dir.path().join("out").join("a.css"));
        assert_eq!(published.url, "/a.css#1");
        assert_eq!(store.read().unwrap().as_deref(), Some(".a { color: red }"));

        let published = store.publish(".b { color: blue }", Some(&published.url)).unwrap();
        assert_eq!(published.url, "/a.css#0");
        assert_eq!(store.read().unwrap().as_deref(), Some(".b { color: blue }"));
    }
}
