//! Contracts with the host engine.
//!
//! ## Key Types
//!
//! - [`EngineHooks`]: trigger dispatch, replacement dispatch, change
//!   notification, global rule predicates and the ability factory
//! - [`ChangeSet`]: which aspects of an object changed
//! - [`NoopHooks`] / [`RecordingHooks`]: ready-made implementations

mod change;
mod dispatch;
mod event;

pub use change::ChangeSet;
pub use dispatch::{
    ChangeListener, EngineHooks, NoopHooks, RecordingHooks, ReplacementDispatch, ReplacementFn,
    StaticRules, TriggerDispatch,
};
pub use event::{ReplacementKind, ReplacementParams, ReplacementResult, TriggerKind, TriggerParams};
