//! A single timestamped, leveled log record

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use uuid::Uuid;

use super::severity::Severity;
use crate::error::LogError;

/// Stable identifier of an entry, unaffected by re-sorting
pub type EntryId = Uuid;

/// Wall-clock format used by `render`; `%.3f` truncates to milliseconds
const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// One log record
///
/// Setters change the record in place. When the entry already lives in a
/// `Ledger`, go through `Ledger::modify` so ordering is re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    timestamp: DateTime<FixedOffset>,
    severity: Severity,
    text: String,
}

impl Entry {
    /// Create an entry stamped with the current local time
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self::default().with_severity(severity).with_text(text)
    }

    /// Replace the timestamp
    pub fn with_time(mut self, timestamp: impl Into<DateTime<FixedOffset>>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Replace the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replace the message text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_time(&mut self, timestamp: impl Into<DateTime<FixedOffset>>) {
        self.timestamp = timestamp.into();
    }

    /// Change the severity by raw rank
    pub fn set_severity(&mut self, rank: u8) -> Result<(), LogError> {
        self.severity = Severity::new(rank)?;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Render as `HH:MM:SS.mmm[LABEL] text`
    pub fn render(&self) -> String {
        format!(
            "{}[{}] {}",
            self.timestamp.format(TIME_FORMAT),
            self.severity.label(),
            self.text
        )
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Local::now().into(),
            severity: Severity::default(),
            text: String::new(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32, micros: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 21, h, m, s)
            .unwrap()
            + chrono::Duration::microseconds(i64::from(micros))
    }

    #[test]
    fn test_render_exact_format() {
        let entry =
            Entry::new(Severity::WARNING, "disk almost full").with_time(at(14, 30, 45, 123_456));
        assert_eq!(entry.render(), "14:30:45.123[WARNING] disk almost full");
    }

    #[test]
    fn test_render_truncates_milliseconds() {
        let entry = Entry::new(Severity::DEBUG, "x").with_time(at(9, 5, 7, 999_999));
        assert_eq!(entry.render(), "09:05:07.999[DEBUG] x");
    }

    #[test]
    fn test_render_empty_text_keeps_space() {
        let entry = Entry::default().with_time(at(0, 0, 0, 0));
        assert_eq!(entry.render(), "00:00:00.000[INFO] ");
    }

    #[test]
    fn test_render_uses_entry_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let entry = Entry::new(Severity::NOTICE, "shifted")
            .with_time(at(12, 0, 0, 0).with_timezone(&offset));
        assert_eq!(entry.render(), "14:00:00.000[NOTICE] shifted");
    }

    #[test]
    fn test_defaults() {
        let before: DateTime<FixedOffset> = Local::now().into();
        let entry = Entry::default();
        let after: DateTime<FixedOffset> = Local::now().into();

        assert_eq!(entry.severity(), Severity::INFO);
        assert_eq!(entry.text(), "");
        assert!(before <= entry.timestamp() && entry.timestamp() <= after);
    }

    #[test]
    fn test_setters() {
        let mut entry = Entry::new(Severity::INFO, "before");
        let id = entry.id();

        entry.set_text("after");
        entry.set_severity(3).unwrap();
        entry.set_time(at(1, 2, 3, 4_000));

        assert_eq!(entry.id(), id);
        assert_eq!(entry.render(), "01:02:03.004[CRITICAL] after");
    }

    #[test]
    fn test_set_severity_out_of_range_keeps_old() {
        let mut entry = Entry::new(Severity::NOTICE, "msg");
        assert!(entry.set_severity(9).is_err());
        assert_eq!(entry.severity(), Severity::NOTICE);
    }

    #[test]
    fn test_ids_are_distinct() {
        assert_ne!(Entry::default().id(), Entry::default().id());
    }
}
