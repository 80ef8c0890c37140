//! # pert-storage
//!
//! Durable, append-only persistence for calibration:
//! - the outcome log: one JSON [`OutcomeRecord`](pert_core::OutcomeRecord) per line
//! - the multiplier history: one human-readable line per accepted adjustment
//!
//! Appends hold an exclusive advisory lock and are flushed and synced before
//! returning. Reads skip malformed lines and report them instead of failing.

pub mod history;
pub mod jsonl;
mod ledger;
pub mod memory;
pub mod traits;

pub use history::{AdjustmentEntry, HistoryLog, MultiplierHistory};
pub use jsonl::JsonlOutcomeStore;
pub use memory::InMemoryOutcomeStore;
pub use traits::{OutcomeLog, OutcomeStore};
