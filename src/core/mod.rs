//! Core types: identities, timestamps, zones, configuration.
//!
//! These are the building blocks shared by every other module.

pub mod config;
pub mod entity;
pub mod timestamp;
pub mod zone;

pub use config::{CompilerConfig, RulesConfig};
pub use entity::{ObjectId, PlayerId};
pub use timestamp::{MonotonicClock, Timestamp, TimestampSource};
pub use zone::Zone;
