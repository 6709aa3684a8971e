//! Counter and damage ledgers.
//!
//! ## Key Types
//!
//! - `CounterType`: P/T counters, named counters, keyword counters
//! - `CounterLedger`: non-negative per-type counts
//! - `DamageLedger`: marked damage and per-source turn totals
//!
//! Both ledgers are plain bookkeeping. Replacement effects, the
//! "can't have counters" predicate and per-unit triggers are applied by
//! [`GameObject`](crate::object::GameObject), which owns them.

pub mod damage;
pub mod kind;
pub mod ledger;

pub use damage::{DamageLedger, DamageTotals};
pub use kind::CounterType;
pub use ledger::{CounterDelta, CounterLedger};
