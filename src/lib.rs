//! Chronolog - leveled logging ledger with ordered file persistence
//!
//! This library provides the severity scale, log entries, the ordering ledger
//! and the configuration that sets it up.

pub mod config;
pub mod error;
pub mod logging;
