//! Compiled behaviors and the per-representation container.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::factory::BehaviorHandle;
use super::recipe::{BehaviorKind, Recipe};
use crate::core::ObjectId;
use crate::keywords::KeywordId;

/// What a behavior was compiled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// A keyword instance.
    Keyword(KeywordId),
    /// The n-th printed ability of the face.
    Printed(u32),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Keyword(id) => write!(f, "{}", id),
            Origin::Printed(n) => write!(f, "Printed({})", n),
        }
    }
}

/// Identity of one compiled behavior: its origin plus a slot number
/// within that origin's expansion.
///
/// Expansion is deterministic, so re-expanding the same origin produces
/// the same ids and replaces instead of duplicating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BehaviorId {
    pub origin: Origin,
    pub slot: u16,
}

impl BehaviorId {
    #[must_use]
    pub const fn new(origin: Origin, slot: u16) -> Self {
        Self { origin, slot }
    }
}

impl std::fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.origin, self.slot)
    }
}

/// A behavior attached to a representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledBehavior {
    pub id: BehaviorId,
    pub recipe: Recipe,
    /// The object the behavior acts for. Non-owning.
    pub host: ObjectId,
    /// From a printed keyword (as opposed to a granted one).
    pub intrinsic: bool,
    pub handle: BehaviorHandle,
}

impl CompiledBehavior {
    #[must_use]
    pub const fn kind(&self) -> BehaviorKind {
        self.recipe.kind()
    }
}

/// The behaviors attached to one representation, ordered by id.
///
/// Entries are boxed: a recipe is large and `OrdMap` nodes hold their
/// values inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behaviors {
    entries: OrdMap<BehaviorId, Box<CompiledBehavior>>,
}

impl Behaviors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behavior. One already attached under the same id is
    /// replaced and returned.
    pub fn attach(&mut self, behavior: CompiledBehavior) -> Option<CompiledBehavior> {
        self.entries
            .insert(behavior.id, Box::new(behavior))
            .map(|old| *old)
    }

    /// Detach every behavior compiled from `origin`.
    pub fn retract_origin(&mut self, origin: Origin) -> Vec<CompiledBehavior> {
        let ids: Vec<BehaviorId> = self
            .entries
            .keys()
            .filter(|id| id.origin == origin)
            .copied()
            .collect();
        ids.into_iter()
            .filter_map(|id| self.entries.remove(&id))
            .map(|behavior| *behavior)
            .collect()
    }

    /// Point every static ability at `host`. Returns how many changed.
    pub fn rehome(&mut self, host: ObjectId) -> usize {
        let stale: Vec<BehaviorId> = self
            .entries
            .values()
            .filter(|b| b.kind() == BehaviorKind::Static && b.host != host)
            .map(|b| b.id)
            .collect();
        for id in &stale {
            if let Some(behavior) = self.entries.get_mut(id) {
                behavior.host = host;
            }
        }
        stale.len()
    }

    #[must_use]
    pub fn get(&self, id: BehaviorId) -> Option<&CompiledBehavior> {
        self.entries.get(&id).map(Box::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledBehavior> {
        self.entries.values().map(Box::as_ref)
    }

    /// Behaviors of one kind, in id order.
    pub fn of_kind(&self, kind: BehaviorKind) -> impl Iterator<Item = &CompiledBehavior> {
        self.iter().filter(move |b| b.kind() == kind)
    }

    /// Behaviors compiled from `origin`, in slot order.
    pub fn from_origin(&self, origin: Origin) -> impl Iterator<Item = &CompiledBehavior> {
        self.iter().filter(move |b| b.id.origin == origin)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{Effect, StaticChange, TriggerEvent};

    fn behavior(origin: Origin, slot: u16, recipe: Recipe) -> CompiledBehavior {
        CompiledBehavior {
            id: BehaviorId::new(origin, slot),
            recipe,
            host: ObjectId(1),
            intrinsic: true,
            handle: BehaviorHandle(u64::from(slot)),
        }
    }

    #[test]
    fn test_attach_replaces_same_id() {
        let origin = Origin::Keyword(KeywordId(0));
        let mut behaviors = Behaviors::new();
        let recipe = Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing);
        assert!(behaviors.attach(behavior(origin, 0, recipe.clone())).is_none());
        assert!(behaviors.attach(behavior(origin, 0, recipe)).is_some());
        assert_eq!(behaviors.len(), 1);
    }

    #[test]
    fn test_retract_origin() {
        let a = Origin::Keyword(KeywordId(0));
        let b = Origin::Keyword(KeywordId(1));
        let recipe = Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing);
        let mut behaviors = Behaviors::new();
        behaviors.attach(behavior(a, 0, recipe.clone()));
        behaviors.attach(behavior(a, 1, recipe.clone()));
        behaviors.attach(behavior(b, 0, recipe));

        assert_eq!(behaviors.retract_origin(a).len(), 2);
        assert!(behaviors.retract_origin(a).is_empty());
        assert_eq!(behaviors.from_origin(b).count(), 1);
    }

    #[test]
    fn test_rehome_only_statics() {
        let origin = Origin::Printed(0);
        let mut behaviors = Behaviors::new();
        behaviors.attach(behavior(
            origin,
            0,
            Recipe::static_self(StaticChange::Colorless),
        ));
        behaviors.attach(behavior(
            origin,
            1,
            Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing),
        ));

        assert_eq!(behaviors.rehome(ObjectId(9)), 1);
        assert_eq!(behaviors.rehome(ObjectId(9)), 0);
        let statics: Vec<_> = behaviors.of_kind(BehaviorKind::Static).collect();
        assert_eq!(statics[0].host, ObjectId(9));
        let triggers: Vec<_> = behaviors.of_kind(BehaviorKind::Trigger).collect();
        assert_eq!(triggers[0].host, ObjectId(1));
    }
}
