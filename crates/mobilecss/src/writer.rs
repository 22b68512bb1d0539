//! Atomic file replacement.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Performs atomic file writes using a temporary file and rename.
///
/// Clients polling the published stylesheet must never observe a partially
/// written file. The write either succeeds completely or leaves the original
/// file untouched.
///
/// # How it works
///
/// 1. Creates a temporary file in the same directory as the target
/// 2. Writes data to the temporary file
/// 3. Syncs the temporary file to disk
/// 4. Renames the temporary file to the target path
///
/// If any step fails, the temporary file is removed.
pub(crate) struct AtomicWriter {
    target_path: PathBuf,
    temp_path: PathBuf,
    /// Taken on commit.
    writer: Option<BufWriter<fs::File>>,
    committed: bool,
}

impl AtomicWriter {
    /// Creates a new atomic writer for the given target path.
    pub(crate) fn new(path: impl AsRef<Path>) -> Result<Self> {
        let target_path = path.as_ref().to_path_buf();

        // Same directory keeps the rename on one filesystem
        let parent = target_path.parent().unwrap_or(Path::new("."));
        let file_name = target_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        let temp_name = format!(".{}.tmp.{}", file_name, std::process::id());
        let temp_path = parent.join(&temp_name);

        let file = fs::File::create(&temp_path).map_err(|e| Error::io(e, &temp_path))?;

        Ok(Self {
            target_path,
            temp_path,
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Performs an atomic write with a closure.
    pub(crate) fn write<F>(path: impl AsRef<Path>, f: F) -> Result<()>
    where
        F: FnOnce(&mut AtomicWriter) -> Result<()>,
    {
        let mut writer = Self::new(path)?;
        f(&mut writer)?;
        writer.commit()
    }

    /// Writes a string to the temporary file.
    pub(crate) fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_all(s.as_bytes())
            .map_err(|e| Error::io(e, &self.target_path))
    }

    /// Flushes, syncs and renames the temporary file over the target.
    pub(crate) fn commit(mut self) -> Result<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(consumed)
            .map_err(|e| Error::io(e, &self.target_path))?;

        let file = writer
            .into_inner()
            .map_err(|e| Error::io(e.into_error(), &self.target_path))?;
        file.sync_all().map_err(|e| Error::io(e, &self.target_path))?;

        // Close the handle before renaming
        drop(file);

        fs::rename(&self.temp_path, &self.target_path)
            .map_err(|e| Error::io(e, &self.target_path))?;

        self.committed = true;
        tracing::debug!(path = %self.target_path.display(), "Replaced file");
        Ok(())
    }
}

fn consumed() -> io::Error {
    io::Error::other("AtomicWriter already consumed")
}

impl Write for AtomicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.as_mut().ok_or_else(consumed)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.as_mut().ok_or_else(consumed)?.flush()
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.committed {
            // Clean up temp file on failure
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.css");
        fs::write(&path, "old").unwrap();

        AtomicWriter::write(&path, |w| w.write_str(".a { color: red }")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), ".a { color: red }");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.css");
        fs::write(&path, "old").unwrap();

        let result = AtomicWriter::write(&path, |w| {
            w.write_str("partial")?;
            Err(Error::InvalidReplacement("stop".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.css");
        let err = AtomicWriter::write(&path, |w| w.write_str("x")).unwrap_err();
        assert!(err.is_io());
    }
}
