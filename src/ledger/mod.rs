//! Timestamp-ordered modification ledger.
//!
//! ## Key Types
//!
//! - `ModificationLedger`: per-kind logs of continuous edits, replayed on
//!   every query
//! - `TypeChange`, `ColorChange`, `KeywordChange`, `PtOverride`: record
//!   payloads
//! - `TimestampLog`: the ordered map underneath
//!
//! ## Replay Rules
//!
//! - Type: per record, strip flagged classes, subtract the remove set, add
//!   the add set.
//! - Color: additive records union, others replace.
//! - Keywords: start from printed keywords (or empty if any record removes
//!   them), apply remove-all, removals by name, then adds; instances
//!   removed by identity anywhere are dropped at the end.
//! - Power/toughness: characteristic-defining records first, then the
//!   rest, last value per axis wins.

mod log;
mod modification;
mod records;

pub use log::TimestampLog;
pub use modification::ModificationLedger;
pub use records::{
    ColorChange, KeywordChange, Modification, PtOverride, PtPair, RemoveClasses, TypeChange,
};
