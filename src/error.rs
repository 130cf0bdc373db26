//! Error types for the logging ledger

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by severities, entries and the ledger
#[derive(Debug, Error)]
pub enum LogError {
    /// Severity rank outside 1..=8
    #[error("severity rank {rank} is outside 1..=8")]
    OutOfRange { rank: u8 },

    /// Position does not name an existing ledger slot
    #[error("index {index} is out of range for a ledger of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// The sink file could not be appended to or rewritten
    #[error(
        "failed to write log sink {}: {}",
        .path.display(),
        SinkErrorKind::of(.source).describe()
    )]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Categories of sink write failures for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied
    PermissionDenied,
    /// File or parent directory missing
    NotFound,
    /// Other IO error
    Other,
}

/// errno values that mean the sink ran out of space (ENOSPC, EDQUOT Linux, EDQUOT macOS)
#[cfg(unix)]
const NO_SPACE_ERRNOS: [i32; 3] = [28, 122, 69];

impl SinkErrorKind {
    /// Classify an IO error from a sink write
    pub fn of(e: &std::io::Error) -> Self {
        use std::io::ErrorKind;

        match e.kind() {
            ErrorKind::WriteZero => return SinkErrorKind::DiskFull,
            ErrorKind::PermissionDenied => return SinkErrorKind::PermissionDenied,
            ErrorKind::NotFound => return SinkErrorKind::NotFound,
            _ => {}
        }

        #[cfg(unix)]
        if e.raw_os_error().is_some_and(|code| NO_SPACE_ERRNOS.contains(&code)) {
            return SinkErrorKind::DiskFull;
        }

        SinkErrorKind::Other
    }

    /// Short human-readable reason
    pub fn describe(&self) -> &'static str {
        match self {
            SinkErrorKind::DiskFull => "disk full",
            SinkErrorKind::PermissionDenied => "permission denied",
            SinkErrorKind::NotFound => "file or directory not found",
            SinkErrorKind::Other => "i/o error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_categorize_by_kind() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(SinkErrorKind::of(&e), SinkErrorKind::PermissionDenied);

        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(SinkErrorKind::of(&e), SinkErrorKind::NotFound);

        let e = io::Error::new(io::ErrorKind::WriteZero, "short");
        assert_eq!(SinkErrorKind::of(&e), SinkErrorKind::DiskFull);

        let e = io::Error::new(io::ErrorKind::Interrupted, "eintr");
        assert_eq!(SinkErrorKind::of(&e), SinkErrorKind::Other);
    }

    #[cfg(unix)]
    #[test]
    fn test_categorize_enospc() {
        let e = io::Error::from_raw_os_error(28);
        assert_eq!(SinkErrorKind::of(&e), SinkErrorKind::DiskFull);
    }

    #[test]
    fn test_sink_write_message() {
        let err = LogError::SinkWrite {
            path: PathBuf::from("/missing/app.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/app.log"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_index_message() {
        let err = LogError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 3 is out of range for a ledger of 3 entries"
        );
    }
}
