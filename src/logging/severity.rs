//! Syslog-style severity ranks
//!
//! Rank 1 is the most urgent, rank 8 the least. A `Severity` can only be built
//! from a rank inside that range, so its label lookup never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Labels indexed by `rank - 1`
const LABELS: [&str; 8] = [
    "EMERGENCY",
    "ALERT",
    "CRITICAL",
    "ERROR",
    "WARNING",
    "NOTICE",
    "INFO",
    "DEBUG",
];

/// Urgency of a log entry
///
/// Ordering follows the rank, so `Severity::ERROR < Severity::DEBUG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const EMERGENCY: Severity = Severity(1);
    pub const ALERT: Severity = Severity(2);
    pub const CRITICAL: Severity = Severity(3);
    pub const ERROR: Severity = Severity(4);
    pub const WARNING: Severity = Severity(5);
    pub const NOTICE: Severity = Severity(6);
    pub const INFO: Severity = Severity(7);
    pub const DEBUG: Severity = Severity(8);

    /// Build a severity from a raw rank, rejecting anything outside 1..=8
    pub fn new(rank: u8) -> Result<Self, LogError> {
        Self::label_of(rank).map(|_| Severity(rank))
    }

    /// Look up the label for a raw rank
    pub fn label_of(rank: u8) -> Result<&'static str, LogError> {
        match rank {
            1..=8 => Ok(LABELS[usize::from(rank - 1)]),
            _ => Err(LogError::OutOfRange { rank }),
        }
    }

    /// Raw urgency value
    pub fn rank(&self) -> u8 {
        self.0
    }

    /// Uppercase label for this severity
    pub fn label(&self) -> &'static str {
        LABELS[usize::from(self.0 - 1)]
    }

    /// Whether an entry of this severity passes a sink threshold
    pub fn clears(&self, threshold: Severity) -> bool {
        self.0 <= threshold.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::INFO
    }
}

impl TryFrom<u8> for Severity {
    type Error = LogError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Severity::new(rank)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
