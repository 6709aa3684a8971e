//! Ability factory: turns recipes into host-executable behaviors.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::recipe::Recipe;
use crate::core::ObjectId;

/// Opaque handle to a behavior built by the host.
///
/// The crate stores it next to the recipe and hands it back through
/// [`AbilityFactory::release`] when the behavior is retracted or its
/// representation removed. It never looks inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BehaviorHandle(pub u64);

impl BehaviorHandle {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BehaviorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Behavior({})", self.0)
    }
}

/// Builds executable behaviors from recipes.
pub trait AbilityFactory {
    /// Build the behavior described by `recipe` for `host`.
    fn build(&mut self, host: ObjectId, recipe: &Recipe) -> BehaviorHandle;

    /// The behavior built for `handle` is no longer attached anywhere.
    fn release(&mut self, _handle: BehaviorHandle) {}
}

/// Factory that keeps the rendered script of every recipe it was given.
///
/// Useful for hosts whose engine consumes scripts directly, and for tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptFactory {
    next: u64,
    scripts: FxHashMap<BehaviorHandle, (ObjectId, String)>,
}

impl ScriptFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The script built for `handle`.
    #[must_use]
    pub fn script(&self, handle: BehaviorHandle) -> Option<&str> {
        self.scripts.get(&handle).map(|(_, s)| s.as_str())
    }

    /// Host of the behavior built for `handle`.
    #[must_use]
    pub fn host(&self, handle: BehaviorHandle) -> Option<ObjectId> {
        self.scripts.get(&handle).map(|(host, _)| *host)
    }

    /// Number of behaviors built and not yet released.
    #[must_use]
    pub fn built(&self) -> usize {
        self.scripts.len()
    }
}

impl AbilityFactory for ScriptFactory {
    fn build(&mut self, host: ObjectId, recipe: &Recipe) -> BehaviorHandle {
        let handle = BehaviorHandle(self.next);
        self.next += 1;
        let script = recipe.to_string();
        trace!(host = %host, handle = %handle, script = %script, "built behavior");
        self.scripts.insert(handle, (host, script));
        handle
    }

    fn release(&mut self, handle: BehaviorHandle) {
        if self.scripts.remove(&handle).is_some() {
            trace!(handle = %handle, "released behavior");
        }
    }
}
