//! Live objects by id, and the id-to-id relation lookups.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::game_object::GameObject;
use crate::core::ObjectId;

/// Every live object in a game.
///
/// Relations between objects are stored as ids on each object; this is
/// where they are resolved.
///
/// ```
/// use ccg_layers::core::{ObjectId, PlayerId, RulesConfig};
/// use ccg_layers::hooks::NoopHooks;
/// use ccg_layers::object::{FaceName, GameObject, ObjectRegistry, Representation};
///
/// let mut hooks = NoopHooks::new();
/// let mut objects = ObjectRegistry::new();
/// for id in [1, 2] {
///     let rep = Representation::new(FaceName::Original, "Clone");
///     objects.insert(GameObject::new(ObjectId(id), PlayerId(0), rep, RulesConfig::default(), &mut hooks));
/// }
///
/// objects.link_clone(ObjectId(2), ObjectId(1));
/// assert_eq!(objects.cloning(ObjectId(2)).map(|o| o.id()), Some(ObjectId(1)));
/// assert_eq!(objects.clones_of(ObjectId(1)).count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
    objects: FxHashMap<ObjectId, GameObject>,
}

impl ObjectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any object with the same id.
    pub fn insert(&mut self, object: GameObject) -> Option<GameObject> {
        self.objects.insert(object.id(), object)
    }

    /// Remove an object. Links other objects hold to it are cleared.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let removed = self.objects.remove(&id)?;
        for object in self.objects.values_mut() {
            let relations = object.relations_mut();
            relations.cloned_by.retain(|c| *c != id);
            for link in [
                &mut relations.cloning,
                &mut relations.meld_partner,
                &mut relations.paired_with,
            ] {
                if *link == Some(id) {
                    *link = None;
                }
            }
        }
        debug!(object = %id, "object removed");
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    // === Relations ===

    /// Record that `copy` is copying `original`. Returns false if either
    /// object is missing.
    pub fn link_clone(&mut self, copy: ObjectId, original: ObjectId) -> bool {
        if copy == original || !self.contains(copy) || !self.contains(original) {
            return false;
        }
        if let Some(previous) = self.get(copy).and_then(|o| o.relations().cloning) {
            if let Some(old) = self.get_mut(previous) {
                old.relations_mut().cloned_by.retain(|c| *c != copy);
            }
        }
        if let Some(object) = self.get_mut(copy) {
            object.relations_mut().cloning = Some(original);
        }
        if let Some(object) = self.get_mut(original) {
            let cloned_by = &mut object.relations_mut().cloned_by;
            if !cloned_by.contains(&copy) {
                cloned_by.push(copy);
            }
        }
        true
    }

    /// Stop `copy` copying whatever it copies.
    pub fn unlink_clone(&mut self, copy: ObjectId) -> bool {
        let Some(original) = self.get_mut(copy).and_then(|o| o.relations_mut().cloning.take()) else {
            return false;
        };
        if let Some(object) = self.get_mut(original) {
            object.relations_mut().cloned_by.retain(|c| *c != copy);
        }
        true
    }

    /// Pair two objects (soulbond). Any earlier pairings are broken.
    pub fn pair(&mut self, a: ObjectId, b: ObjectId) -> bool {
        self.set_mutual(a, b, |o| &mut o.relations_mut().paired_with)
    }

    /// Make two objects meld partners.
    pub fn set_meld_partners(&mut self, a: ObjectId, b: ObjectId) -> bool {
        self.set_mutual(a, b, |o| &mut o.relations_mut().meld_partner)
    }

    fn set_mutual(
        &mut self,
        a: ObjectId,
        b: ObjectId,
        link: fn(&mut GameObject) -> &mut Option<ObjectId>,
    ) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        for (this, other) in [(a, b), (b, a)] {
            let previous = self.get_mut(this).and_then(|o| link(o).replace(other));
            if let Some(previous) = previous.filter(|p| *p != other) {
                if let Some(old) = self.get_mut(previous) {
                    *link(old) = None;
                }
            }
        }
        true
    }

    /// Objects currently copying `id`.
    pub fn clones_of(&self, id: ObjectId) -> impl Iterator<Item = &GameObject> {
        self.get(id)
            .map(|o| o.relations().cloned_by.clone())
            .unwrap_or_default()
            .into_iter()
            .filter_map(move |c| self.get(c))
    }

    /// The object `id` is copying.
    #[must_use]
    pub fn cloning(&self, id: ObjectId) -> Option<&GameObject> {
        self.get(id)?.relations().cloning.and_then(|o| self.get(o))
    }

    #[must_use]
    pub fn meld_partner(&self, id: ObjectId) -> Option<&GameObject> {
        self.get(id)?.relations().meld_partner.and_then(|o| self.get(o))
    }

    #[must_use]
    pub fn paired_with(&self, id: ObjectId) -> Option<&GameObject> {
        self.get(id)?.relations().paired_with.and_then(|o| self.get(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, RulesConfig};
    use crate::hooks::NoopHooks;
    use crate::object::{FaceName, Representation};

    fn registry(ids: &[u32]) -> ObjectRegistry {
        let mut hooks = NoopHooks::new();
        let mut objects = ObjectRegistry::new();
        for id in ids {
            let rep = Representation::new(FaceName::Original, format!("Object {}", id));
            objects.insert(GameObject::new(ObjectId(*id), PlayerId(0), rep, RulesConfig::default(), &mut hooks));
        }
        objects
    }

    #[test]
    fn test_relink_clone_moves_back_reference() {
        let mut objects = registry(&[1, 2, 3]);
        assert!(objects.link_clone(ObjectId(3), ObjectId(1)));
        assert!(objects.link_clone(ObjectId(3), ObjectId(2)));
        assert_eq!(objects.clones_of(ObjectId(1)).count(), 0);
        assert_eq!(objects.clones_of(ObjectId(2)).count(), 1);

        assert!(objects.unlink_clone(ObjectId(3)));
        assert!(!objects.unlink_clone(ObjectId(3)));
        assert!(objects.cloning(ObjectId(3)).is_none());
    }

    #[test]
    fn test_pairing_breaks_previous() {
        let mut objects = registry(&[1, 2, 3]);
        assert!(objects.pair(ObjectId(1), ObjectId(2)));
        assert!(objects.pair(ObjectId(1), ObjectId(3)));
        assert_eq!(objects.paired_with(ObjectId(1)).map(|o| o.id()), Some(ObjectId(3)));
        assert!(objects.paired_with(ObjectId(2)).is_none());
        assert!(!objects.pair(ObjectId(1), ObjectId(1)));
    }

    #[test]
    fn test_remove_clears_links() {
        let mut objects = registry(&[1, 2]);
        objects.set_meld_partners(ObjectId(1), ObjectId(2));
        objects.link_clone(ObjectId(2), ObjectId(1));
        assert!(objects.remove(ObjectId(2)).is_some());
        let survivor = objects.get(ObjectId(1)).unwrap();
        assert!(survivor.relations().meld_partner.is_none());
        assert!(survivor.relations().cloned_by.is_empty());
        assert!(objects.meld_partner(ObjectId(1)).is_none());
    }
}
