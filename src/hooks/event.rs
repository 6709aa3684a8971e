//! Trigger and replacement events raised by objects.
//!
//! The crate raises these; the host's trigger scheduler and replacement
//! dispatcher decide what happens. Parameters are built with the same
//! builder pattern used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::core::ObjectId;
use crate::counters::CounterType;
use crate::object::FaceName;

/// Kinds of trigger events raised by an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// One counter was put on the object. Raised once per counter.
    CounterAdded,
    /// One or more counters of a type were put on the object in one
    /// operation. Raised once, after the per-unit events.
    CounterAddedOnce,
    /// One counter was removed. Raised once per counter.
    CounterRemoved,
    /// The object was dealt damage.
    DamageDone,
    Taps,
    Untaps,
    /// The object turned face up.
    TurnedFaceUp,
    /// The object's current representation changed.
    FaceSwitched,
}

impl TriggerKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TriggerKind::CounterAdded => "CounterAdded",
            TriggerKind::CounterAddedOnce => "CounterAddedOnce",
            TriggerKind::CounterRemoved => "CounterRemoved",
            TriggerKind::DamageDone => "DamageDone",
            TriggerKind::Taps => "Taps",
            TriggerKind::Untaps => "Untaps",
            TriggerKind::TurnedFaceUp => "TurnedFaceUp",
            TriggerKind::FaceSwitched => "FaceSwitched",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Contextual data for a trigger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerParams {
    /// The object the event happened to.
    pub object: ObjectId,
    /// What caused it, if known.
    pub source: Option<ObjectId>,
    pub counter: Option<CounterType>,
    /// Amount involved (damage dealt, counters in the batch).
    pub amount: i64,
    pub is_combat: bool,
    pub face: Option<FaceName>,
}

impl TriggerParams {
    /// Create parameters for an event on `object`.
    #[must_use]
    pub fn new(object: ObjectId) -> Self {
        Self {
            object,
            source: None,
            counter: None,
            amount: 0,
            is_combat: false,
            face: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_counter(mut self, counter: CounterType) -> Self {
        self.counter = Some(counter);
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_combat(mut self, is_combat: bool) -> Self {
        self.is_combat = is_combat;
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: FaceName) -> Self {
        self.face = Some(face);
        self
    }
}

/// Events that replacement effects may modify or prevent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementKind {
    AddCounter,
    DamageDone,
    Untap,
}

/// Mutable parameters handed to the replacement dispatcher.
///
/// A replacement that changes the event writes the new values back
/// (usually `amount`) and returns [`ReplacementResult::Updated`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementParams {
    pub kind: ReplacementKind,
    pub object: ObjectId,
    pub source: Option<ObjectId>,
    pub counter: Option<CounterType>,
    pub amount: i64,
    pub is_combat: bool,
}

impl ReplacementParams {
    #[must_use]
    pub fn new(kind: ReplacementKind, object: ObjectId) -> Self {
        Self {
            kind,
            object,
            source: None,
            counter: None,
            amount: 0,
            is_combat: false,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: Option<ObjectId>) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_counter(mut self, counter: CounterType) -> Self {
        self.counter = Some(counter);
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_combat(mut self, is_combat: bool) -> Self {
        self.is_combat = is_combat;
        self
    }
}

/// Outcome of running replacement effects on an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementResult {
    /// Nothing applied; proceed with the original parameters.
    NotReplaced,
    /// Parameters were modified; proceed with the new ones.
    Updated,
    /// The event does not happen.
    PreventedEntirely,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_params_builder() {
        let params = TriggerParams::new(ObjectId(1))
            .with_source(ObjectId(2))
            .with_counter(CounterType::PlusOnePlusOne)
            .with_amount(3)
            .with_combat(true);

        assert_eq!(params.object, ObjectId(1));
        assert_eq!(params.source, Some(ObjectId(2)));
        assert_eq!(params.counter, Some(CounterType::PlusOnePlusOne));
        assert_eq!(params.amount, 3);
        assert!(params.is_combat);
        assert_eq!(params.face, None);
    }

    #[test]
    fn test_replacement_params_serialization() {
        let params = ReplacementParams::new(ReplacementKind::DamageDone, ObjectId(7))
            .with_source(Some(ObjectId(3)))
            .with_amount(4);
        let json = serde_json::to_string(&params).unwrap();
        let back: ReplacementParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
