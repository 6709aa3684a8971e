//! # ccg-layers
//!
//! Characteristic resolution and keyword compilation for card game
//! objects.
//!
//! ## Design Principles
//!
//! 1. **Recompute, don't cache**: effective type, color, keywords and
//!    power/toughness are a pure function of the current face and the
//!    timestamp-ordered modification ledger.
//!
//! 2. **Timestamps order everything**: replay order depends on record
//!    timestamps only. Removing a record by timestamp is the same as never
//!    having added it.
//!
//! 3. **The host owns the game**: triggers, replacements, static
//!    prohibitions and ability building are reached through the traits in
//!    [`hooks`]. This crate never resolves anything itself.
//!
//! ## Modules
//!
//! - `core`: Object and player ids, timestamps, zones, configuration
//! - `characteristics`: Colors, mana costs, type lines, power/toughness
//! - `keywords`: Keyword grammar, instances and reminder text
//! - `behavior`: Recipes and the keyword compiler
//! - `ledger`: Timestamp-ordered modification ledger
//! - `counters`: Counter and damage bookkeeping
//! - `object`: Card definitions, representations and game objects
//! - `hooks`: Host collaborator traits and change notification
//! - `error`: Content errors

pub mod behavior;
pub mod characteristics;
pub mod core;
pub mod counters;
pub mod error;
pub mod hooks;
pub mod keywords;
pub mod ledger;
pub mod object;

// Re-export commonly used types
pub use crate::core::{
    CompilerConfig, MonotonicClock, ObjectId, PlayerId, RulesConfig, Timestamp, TimestampSource,
    Zone,
};

pub use crate::error::{CardError, Result};

pub use crate::characteristics::{Color, ColorSet, Cost, ManaCost, PtValue, TypeLine};

pub use crate::keywords::{Keyword, KeywordId, KeywordInstance};

pub use crate::behavior::{
    expand, retract, AbilityFactory, BehaviorHandle, BehaviorId, CompiledBehavior, Origin, Recipe,
    ScriptFactory,
};

pub use crate::ledger::{ColorChange, KeywordChange, ModificationLedger, PtOverride, TypeChange};

pub use crate::counters::{CounterDelta, CounterLedger, CounterType, DamageLedger};

pub use crate::object::{
    CardDefinition, CardId, CardRegistry, FaceDefinition, FaceName, GameObject, ObjectRegistry,
    Representation,
};

pub use crate::hooks::{
    ChangeListener, ChangeSet, EngineHooks, NoopHooks, RecordingHooks, ReplacementDispatch,
    ReplacementKind, ReplacementParams, ReplacementResult, StaticRules, TriggerDispatch,
    TriggerKind, TriggerParams,
};
