//! File sink for persisted log lines
//!
//! Every write opens the file, writes, and closes it again. Nothing is held
//! open between calls, so each append or rewrite stands on its own. A rewrite
//! goes through a temporary file in the same directory that replaces the sink
//! in one rename, so a failed rewrite leaves the previous content in place.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::LogError;

/// Destination file for rendered entries, one per line
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file if needed
    pub fn append_line(&self, line: &str) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        writeln!(file, "{}", line).map_err(|e| self.write_error(e))
    }

    /// Replace the file with every line in order
    pub fn rewrite<I>(&self, lines: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut content = String::new();
        for line in lines {
            content.push_str(&line);
            content.push('\n');
        }

        let mut staged = NamedTempFile::new_in(self.directory()).map_err(|e| self.write_error(e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| self.write_error(e))?;
        staged
            .persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;
        Ok(())
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_error(&self, source: std::io::Error) -> LogError {
        LogError::SinkWrite {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_and_extends() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path().join("app.log"));

        sink.append_line("first").unwrap();
        sink.append_line("second").unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path().join("app.log"));

        sink.append_line("stale").unwrap();
        sink.rewrite(vec!["a".to_string(), "b".to_string()]).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "a\nb\n");
    }

    #[test]
    fn test_rewrite_with_nothing_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path().join("app.log"));

        sink.append_line("stale").unwrap();
        sink.rewrite(Vec::new()).unwrap();

        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "");
    }

    #[test]
    fn test_failed_rewrite_keeps_target_and_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.log");
        // a non-empty directory cannot be replaced by a file rename
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "kept").unwrap();
        let sink = FileSink::new(target.clone());

        let err = sink.rewrite(vec!["line".to_string()]).unwrap_err();

        assert!(matches!(err, LogError::SinkWrite { .. }));
        assert_eq!(fs::read_to_string(target.join("keep")).unwrap(), "kept");
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("app.log")]);
    }

    #[test]
    fn test_rewrite_relative_path_uses_current_directory() {
        let sink = FileSink::new("app.log");
        assert_eq!(sink.directory(), Path::new("."));
    }

    #[test]
    fn test_missing_directory_is_sink_error() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::new(temp_dir.path().join("missing").join("app.log"));

        let err = sink.append_line("line").unwrap_err();
        assert!(matches!(err, LogError::SinkWrite { .. }));

        let err = sink.rewrite(vec!["line".to_string()]).unwrap_err();
        assert!(matches!(err, LogError::SinkWrite { .. }));
    }
}
