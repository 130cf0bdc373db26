//! Time-ordered buffer of log entries
//!
//! The ledger keeps its entries non-decreasing by timestamp and mirrors a
//! level-filtered copy of them into a [`FileSink`]. Mutations that keep the
//! order intact cost a single appended line; a mutation that breaks it makes
//! the ledger re-sort and rewrite the whole file.
//!
//! Indices are only valid until the next mutating call, since a re-sort may
//! shift positions. Use [`Ledger::position`] with an [`EntryId`] to find an
//! entry again later.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};

use super::entry::{Entry, EntryId};
use super::severity::Severity;
use super::sink::FileSink;
use crate::error::{LogError, SinkErrorKind};

/// Text rendered for a ledger with no entries
pub const EMPTY_PLACEHOLDER: &str = "(empty log)";

/// Message appended by [`Ledger::finalize`]
pub const FINAL_MESSAGE: &str = "Program exit as expected, log file saved!";

/// Resolved construction settings for a ledger
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    /// Entries at or above this urgency are echoed to the console
    pub max_print_level: Severity,
    /// Entries at or above this urgency are persisted to the sink
    pub max_output_level: Severity,
    /// Sink file path
    pub file_path: PathBuf,
    /// Master switch for console echo
    pub console_enabled: bool,
    /// Offset used when the ledger stamps new entries
    pub offset: FixedOffset,
}

impl LedgerSettings {
    /// Settings with the default thresholds (print INFO, persist DEBUG) in UTC
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            max_print_level: Severity::INFO,
            max_output_level: Severity::DEBUG,
            file_path: file_path.into(),
            console_enabled: true,
            offset: Utc.fix(),
        }
    }
}

/// Ordered collection of entries with console echo and file persistence
pub struct Ledger<W: Write = io::Stdout> {
    entries: Vec<Entry>,
    settings: LedgerSettings,
    sink: FileSink,
    console: W,
    sink_failures: u64,
}

impl Ledger<io::Stdout> {
    /// Create a ledger that echoes to standard output
    pub fn new(settings: LedgerSettings) -> Self {
        Self::with_console(settings, io::stdout())
    }
}

impl<W: Write> Ledger<W> {
    /// Create a ledger that echoes to the given writer
    pub fn with_console(settings: LedgerSettings, console: W) -> Self {
        let sink = FileSink::new(settings.file_path.clone());
        Self {
            entries: Vec::new(),
            settings,
            sink,
            console,
            sink_failures: 0,
        }
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn file_path(&self) -> &Path {
        self.sink.path()
    }

    /// Build an entry stamped with the current time in the configured offset
    pub fn entry(&self, severity: Severity, text: impl Into<String>) -> Entry {
        Entry::new(severity, text).with_time(Utc::now().with_timezone(&self.settings.offset))
    }

    /// Add an entry at the end, then settle ordering and persistence
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        self.settle(last);
    }

    /// Overwrite the entry at `index`
    pub fn replace(&mut self, index: usize, entry: Entry) -> Result<(), LogError> {
        self.check_index(index)?;
        self.entries[index] = entry;
        self.settle(index);
        Ok(())
    }

    /// Remove and return the entry at `index`, then rewrite the sink
    pub fn remove(&mut self, index: usize) -> Result<Entry, LogError> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.persist_all();
        Ok(removed)
    }

    /// Mutate the entry at `index` in place and re-check its ordering
    ///
    /// This is how setter changes on a stored entry are reported back to the
    /// ledger.
    pub fn modify<F>(&mut self, index: usize, f: F) -> Result<(), LogError>
    where
        F: FnOnce(&mut Entry),
    {
        self.check_index(index)?;
        f(&mut self.entries[index]);
        self.settle(index);
        Ok(())
    }

    /// Check the whole sequence, re-sorting and rewriting if it is out of order
    ///
    /// Nothing is echoed or appended when the order already holds.
    pub fn verify(&mut self) {
        if !self.is_ordered_at(0) {
            self.resort();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Current index of the entry with the given id
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Number of sink writes that failed so far
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }

    /// All entries, one rendered line each, or [`EMPTY_PLACEHOLDER`]
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_PLACEHOLDER.to_string();
        }

        self.entries
            .iter()
            .map(Entry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Record the final exit message and hand back the sink path
    pub fn finalize(mut self) -> PathBuf {
        let entry = self.entry(Severity::INFO, FINAL_MESSAGE);
        self.append(entry);
        self.sink.path().to_path_buf()
    }

    fn check_index(&self, index: usize) -> Result<(), LogError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(LogError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Post-mutation protocol anchored at `index`
    fn settle(&mut self, index: usize) {
        self.echo(index);

        if self.is_ordered_at(index) {
            let entry = &self.entries[index];
            if entry.severity().clears(self.settings.max_output_level) {
                tracing::trace!(index, "appending entry to sink");
                let result = self.sink.append_line(&entry.render());
                self.record(result);
            }
        } else {
            tracing::debug!(index, "entry out of order");
            self.resort();
        }
    }

    fn resort(&mut self) {
        tracing::debug!(len = self.entries.len(), "re-sorting ledger");
        sort_chronologically(&mut self.entries);
        self.persist_all();
    }

    fn echo(&mut self, index: usize) {
        if !self.settings.console_enabled {
            return;
        }

        let entry = &self.entries[index];
        if entry.severity().clears(self.settings.max_print_level) {
            if let Err(e) = writeln!(self.console, "{}", entry.render()) {
                tracing::debug!("console echo failed: {}", e);
            }
        }
    }

    /// Ordering check around `index`; at 0 the whole sequence is checked
    fn is_ordered_at(&self, index: usize) -> bool {
        if index == 0 {
            return self
                .entries
                .windows(2)
                .all(|pair| pair[0].timestamp() <= pair[1].timestamp());
        }

        let current = self.entries[index].timestamp();
        let after_prev = self.entries[index - 1].timestamp() <= current;
        let before_next = self
            .entries
            .get(index + 1)
            .map_or(true, |next| current <= next.timestamp());

        after_prev && before_next
    }

    fn persist_all(&mut self) {
        let threshold = self.settings.max_output_level;
        let lines: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.severity().clears(threshold))
            .map(Entry::render)
            .collect();

        tracing::debug!(lines = lines.len(), "rewriting sink");
        let result = self.sink.rewrite(lines);
        self.record(result);
    }

    fn record(&mut self, result: Result<(), LogError>) {
        if let Err(e) = result {
            self.sink_failures += 1;
            match &e {
                LogError::SinkWrite { source, .. } => tracing::warn!(
                    kind = ?SinkErrorKind::of(source),
                    "{}",
                    e
                ),
                _ => tracing::warn!("{}", e),
            }
        }
    }
}

impl<W: Write> fmt::Display for Ledger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Stable sort by ascending timestamp; equal timestamps keep their order
pub fn sort_chronologically(entries: &mut [Entry]) {
    entries.sort_by_key(Entry::timestamp);
}
