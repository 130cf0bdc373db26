//! Leveled, time-ordered logging
//!
//! Entries are buffered in a [`Ledger`], echoed to the console when urgent
//! enough, and persisted to a level-filtered sink file.

mod entry;
mod ledger;
mod severity;
mod sink;

pub use entry::{Entry, EntryId};
pub use ledger::{
    sort_chronologically, Ledger, LedgerSettings, EMPTY_PLACEHOLDER, FINAL_MESSAGE,
};
pub use severity::Severity;
pub use sink::FileSink;
