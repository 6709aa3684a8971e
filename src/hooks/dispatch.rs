//! Collaborator traits implemented by the host engine.
//!
//! Objects call out through these at the points where rules outside this
//! crate get a say: before counters are added, before damage is marked,
//! before an untap, and after every logical operation that changed
//! characteristics.
//!
//! [`EngineHooks`] bundles all of them, so hosts pass a single
//! `&mut impl EngineHooks`.

use tracing::trace;

use super::change::ChangeSet;
use super::event::{ReplacementParams, ReplacementResult, TriggerKind, TriggerParams};
use crate::behavior::{AbilityFactory, BehaviorHandle, Recipe, ScriptFactory};
use crate::core::ObjectId;
use crate::counters::CounterType;
use crate::keywords::Keyword;

/// The host's triggered-ability scheduler.
pub trait TriggerDispatch {
    /// Queue triggers watching `kind`. `can_be_reflexive` is set when the
    /// event came from resolving one of the object's own abilities.
    fn run_trigger(&mut self, kind: TriggerKind, params: TriggerParams, can_be_reflexive: bool);
}

/// The host's replacement-effect dispatcher.
pub trait ReplacementDispatch {
    /// Apply replacement effects. Implementations that change the event
    /// write the new values into `params`.
    fn run_replacement(&mut self, params: &mut ReplacementParams) -> ReplacementResult;
}

/// Receives one notification per logical operation.
pub trait ChangeListener {
    fn characteristics_changed(&mut self, object: ObjectId, changes: ChangeSet);
}

/// Global rule predicates consulted during mutation and replay.
pub trait StaticRules {
    /// Whether `object` may currently receive counters of this type.
    fn can_receive_counters(&self, object: ObjectId, counter: &CounterType) -> bool {
        let _ = (object, counter);
        true
    }

    /// Whether `object` may not gain `keyword` ("can't have or gain
    /// flying"). Consulted for keyword additions only.
    fn is_keyword_forbidden(&self, object: ObjectId, keyword: &Keyword) -> bool {
        let _ = (object, keyword);
        false
    }
}

/// Everything an object needs from its host.
pub trait EngineHooks:
    TriggerDispatch + ReplacementDispatch + ChangeListener + StaticRules + AbilityFactory
{
}

impl<T> EngineHooks for T where
    T: TriggerDispatch + ReplacementDispatch + ChangeListener + StaticRules + AbilityFactory
{
}

/// Hooks that accept everything and record nothing.
#[derive(Clone, Debug, Default)]
pub struct NoopHooks {
    factory: ScriptFactory,
}

impl NoopHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TriggerDispatch for NoopHooks {
    fn run_trigger(&mut self, _kind: TriggerKind, _params: TriggerParams, _can_be_reflexive: bool) {}
}

impl ReplacementDispatch for NoopHooks {
    fn run_replacement(&mut self, _params: &mut ReplacementParams) -> ReplacementResult {
        ReplacementResult::NotReplaced
    }
}

impl ChangeListener for NoopHooks {
    fn characteristics_changed(&mut self, _object: ObjectId, _changes: ChangeSet) {}
}

impl StaticRules for NoopHooks {}

impl AbilityFactory for NoopHooks {
    fn build(&mut self, host: ObjectId, recipe: &Recipe) -> BehaviorHandle {
        self.factory.build(host, recipe)
    }

    fn release(&mut self, handle: BehaviorHandle) {
        self.factory.release(handle);
    }
}

/// Signature of a scripted replacement used by [`RecordingHooks`].
pub type ReplacementFn = fn(&mut ReplacementParams) -> ReplacementResult;

/// Hooks that record every call, for tests and host debugging.
///
/// ```
/// use ccg_layers::core::ObjectId;
/// use ccg_layers::hooks::{ChangeListener, ChangeSet, RecordingHooks};
///
/// let mut hooks = RecordingHooks::new();
/// hooks.characteristics_changed(ObjectId(1), ChangeSet::COLOR);
/// assert_eq!(hooks.notifications, vec![(ObjectId(1), ChangeSet::COLOR)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    /// Every trigger raised, in order.
    pub triggers: Vec<(TriggerKind, TriggerParams, bool)>,
    /// Replacement parameters as they were offered (before modification).
    pub replacements: Vec<ReplacementParams>,
    pub notifications: Vec<(ObjectId, ChangeSet)>,
    /// Counter types no object may receive.
    pub forbidden_counters: Vec<CounterType>,
    /// Keyword names no object may gain.
    pub forbidden_keywords: Vec<String>,
    /// Scripted replacement applied to every event.
    pub replacement: Option<ReplacementFn>,
    pub factory: ScriptFactory,
}

impl RecordingHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid a counter type (builder pattern).
    #[must_use]
    pub fn with_forbidden_counter(mut self, counter: CounterType) -> Self {
        self.forbidden_counters.push(counter);
        self
    }

    /// Forbid a keyword by name (builder pattern).
    #[must_use]
    pub fn with_forbidden_keyword(mut self, name: impl Into<String>) -> Self {
        self.forbidden_keywords.push(name.into());
        self
    }

    /// Install a scripted replacement (builder pattern).
    #[must_use]
    pub fn with_replacement(mut self, replacement: ReplacementFn) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Triggers of one kind, in order.
    pub fn triggers_of(&self, kind: TriggerKind) -> impl Iterator<Item = &TriggerParams> {
        self.triggers
            .iter()
            .filter(move |(k, ..)| *k == kind)
            .map(|(_, params, _)| params)
    }

    /// Forget everything recorded so far, keeping configuration.
    pub fn clear(&mut self) {
        self.triggers.clear();
        self.replacements.clear();
        self.notifications.clear();
    }
}

impl TriggerDispatch for RecordingHooks {
    fn run_trigger(&mut self, kind: TriggerKind, params: TriggerParams, can_be_reflexive: bool) {
        trace!(kind = %kind, object = %params.object, "trigger");
        self.triggers.push((kind, params, can_be_reflexive));
    }
}

impl ReplacementDispatch for RecordingHooks {
    fn run_replacement(&mut self, params: &mut ReplacementParams) -> ReplacementResult {
        self.replacements.push(params.clone());
        match self.replacement {
            Some(replace) => replace(params),
            None => ReplacementResult::NotReplaced,
        }
    }
}

impl ChangeListener for RecordingHooks {
    fn characteristics_changed(&mut self, object: ObjectId, changes: ChangeSet) {
        self.notifications.push((object, changes));
    }
}

impl StaticRules for RecordingHooks {
    fn can_receive_counters(&self, _object: ObjectId, counter: &CounterType) -> bool {
        !self.forbidden_counters.contains(counter)
    }

    fn is_keyword_forbidden(&self, _object: ObjectId, keyword: &Keyword) -> bool {
        self.forbidden_keywords.iter().any(|name| keyword.matches(name))
    }
}

impl AbilityFactory for RecordingHooks {
    fn build(&mut self, host: ObjectId, recipe: &Recipe) -> BehaviorHandle {
        self.factory.build(host, recipe)
    }

    fn release(&mut self, handle: BehaviorHandle) {
        self.factory.release(handle);
    }
}
