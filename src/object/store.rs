//! The named representations of one object and which one is current.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::face::FaceName;
use super::representation::Representation;
use crate::behavior::{expand, turn_face_up, AbilityFactory, BehaviorId, CompiledBehavior, Origin};
use crate::characteristics::Cost;
use crate::core::{ObjectId, RulesConfig};
use crate::error::{CardError, Result};
use crate::keywords::{Keyword, KeywordIdAllocator};

/// Representations keyed by face name, plus the current pointer.
///
/// Exactly one face is current at all times, and the original face is
/// always present. Representations are boxed to keep map nodes small.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationStore {
    faces: OrdMap<FaceName, Box<Representation>>,
    current: FaceName,
}

impl RepresentationStore {
    /// Create a store holding `original` as the current face.
    #[must_use]
    pub fn new(original: Representation) -> Self {
        let mut faces = OrdMap::new();
        faces.insert(
            FaceName::Original,
            Box::new(Representation { face: FaceName::Original, ..original }),
        );
        Self {
            faces,
            current: FaceName::Original,
        }
    }

    #[must_use]
    pub fn current_name(&self) -> FaceName {
        self.current
    }

    /// The current representation.
    #[must_use]
    pub fn current(&self) -> &Representation {
        // `current` always names a stored face: switching checks presence
        // and removal falls back to the original, which is never removed.
        &self.faces[&self.current]
    }

    pub fn current_mut(&mut self) -> &mut Representation {
        let face = self.current;
        &mut self.faces[&face]
    }

    #[must_use]
    pub fn get(&self, face: FaceName) -> Option<&Representation> {
        self.faces.get(&face).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, face: FaceName) -> Option<&mut Representation> {
        self.faces.get_mut(&face).map(Box::as_mut)
    }

    #[must_use]
    pub fn contains(&self, face: FaceName) -> bool {
        self.faces.contains_key(&face)
    }

    /// Face names in a fixed order.
    pub fn faces(&self) -> impl Iterator<Item = FaceName> + '_ {
        self.faces.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Return the representation for `face`, synthesizing the face-down
    /// representation the first time it is asked for.
    ///
    /// `exiled` picks the blank exile variant over the standard 2/2. It
    /// only matters on first synthesis; later calls return the stored
    /// face unchanged. When the original face has Morph, Megamorph or
    /// Disguise, the synthesized face gets the special action that turns
    /// it face up for that cost.
    ///
    /// Any other absent face is an error and nothing is created.
    pub fn get_or_create(
        &mut self,
        face: FaceName,
        exiled: bool,
        host: ObjectId,
        config: &RulesConfig,
        keyword_ids: &mut KeywordIdAllocator,
        factory: &mut dyn AbilityFactory,
    ) -> Result<&Representation> {
        if !self.faces.contains_key(&face) {
            if face != FaceName::FaceDown {
                warn!(object = %host, face = ?face, "unknown representation requested");
                return Err(CardError::UnknownRepresentation(face));
            }
            let rep = self.synthesize_face_down(exiled, host, config, keyword_ids, factory);
            debug!(object = %host, exiled, "face-down representation synthesized");
            self.faces.insert(FaceName::FaceDown, Box::new(rep));
        }
        self.faces
            .get(&face)
            .map(Box::as_ref)
            .ok_or(CardError::UnknownRepresentation(face))
    }

    fn synthesize_face_down(
        &self,
        exiled: bool,
        host: ObjectId,
        config: &RulesConfig,
        keyword_ids: &mut KeywordIdAllocator,
        factory: &mut dyn AbilityFactory,
    ) -> Representation {
        if exiled {
            return Representation::exiled_face_down();
        }
        let mut rep = Representation::face_down(config);
        let Some(original) = self.faces.get(&FaceName::Original) else {
            return rep;
        };

        let face_up = original
            .keywords
            .iter()
            .find_map(|k| turn_face_up(&k.keyword).map(|recipe| (k.keyword.clone(), recipe)));
        if let Some((keyword, recipe)) = face_up {
            let handle = factory.build(host, &recipe);
            rep.behaviors.attach(CompiledBehavior {
                id: BehaviorId::new(Origin::Printed(0), 0),
                recipe,
                host,
                intrinsic: true,
                handle,
            });
            if matches!(keyword, Keyword::Disguise(_)) {
                let ward = keyword_ids.instance(Keyword::Ward(Cost::generic(2)));
                expand(&mut rep, host, &ward, true, factory);
                rep.keywords.push(ward);
            }
        }
        rep
    }

    /// Make `face` current. Returns false if it already is or the store
    /// has no such face.
    ///
    /// Static abilities of the new face are re-homed to `host`.
    pub fn switch_to(&mut self, face: FaceName, host: ObjectId) -> bool {
        if face == self.current || !self.faces.contains_key(&face) {
            return false;
        }
        let from = self.current;
        self.current = face;
        let rehomed = self
            .faces
            .get_mut(&face)
            .map_or(0, |rep| rep.behaviors.rehome(host));
        debug!(object = %host, from = ?from, to = ?face, rehomed, "face switched");
        true
    }

    /// Exchange the representations stored under two names. The current
    /// pointer follows its representation to the other name.
    pub fn swap(&mut self, a: FaceName, b: FaceName) -> bool {
        if a == b {
            return false;
        }
        let (Some(rep_a), Some(rep_b)) = (self.faces.remove(&a), self.faces.remove(&b)) else {
            return false;
        };
        self.faces.insert(a, Box::new(Representation { face: a, ..*rep_b }));
        self.faces.insert(b, Box::new(Representation { face: b, ..*rep_a }));
        if self.current == a {
            self.current = b;
        } else if self.current == b {
            self.current = a;
        }
        true
    }

    /// Install an alternate representation. Returns the one it replaced.
    pub fn add_alternate(&mut self, face: FaceName, rep: Representation) -> Option<Representation> {
        self.faces
            .insert(face, Box::new(Representation { face, ..rep }))
            .map(|old| *old)
    }

    /// Remove a representation. The original face cannot be removed;
    /// removing the current face makes the original current.
    pub fn remove(&mut self, face: FaceName) -> Option<Representation> {
        if face == FaceName::Original {
            return None;
        }
        let removed = self.faces.remove(&face)?;
        if self.current == face {
            self.current = FaceName::Original;
        }
        Some(*removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{BehaviorKind, Recipe, ScriptFactory, StaticChange};
    use crate::characteristics::PtValue;
    use crate::keywords::KeywordInstance;

    fn store_with(keywords: Vec<Keyword>) -> (RepresentationStore, KeywordIdAllocator) {
        let mut ids = KeywordIdAllocator::new();
        let instances: Vec<_> = keywords.into_iter().map(|k| ids.instance(k)).collect();
        let original = Representation::new(FaceName::Original, "Hidden Thing").with_keywords(instances);
        (RepresentationStore::new(original), ids)
    }

    fn face_down<'a>(
        store: &'a mut RepresentationStore,
        exiled: bool,
        ids: &mut KeywordIdAllocator,
        factory: &mut ScriptFactory,
    ) -> Result<&'a Representation> {
        store.get_or_create(FaceName::FaceDown, exiled, ObjectId(1), &RulesConfig::default(), ids, factory)
    }

    #[test]
    fn test_face_down_synthesized_once() {
        let (mut store, mut ids) = store_with(Vec::new());
        let mut factory = ScriptFactory::new();

        let first = face_down(&mut store, false, &mut ids, &mut factory).unwrap().clone();
        assert_eq!(first.power, Some(PtValue::Fixed(2)));
        let second = face_down(&mut store, true, &mut ids, &mut factory).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unknown_face_is_error() {
        let (mut store, mut ids) = store_with(Vec::new());
        let mut factory = ScriptFactory::new();
        let err = store
            .get_or_create(FaceName::Transformed, false, ObjectId(1), &RulesConfig::default(), &mut ids, &mut factory)
            .unwrap_err();
        assert_eq!(err, CardError::UnknownRepresentation(FaceName::Transformed));
        assert!(!store.contains(FaceName::Transformed));
    }

    #[test]
    fn test_morph_face_down_can_turn_up() {
        let (mut store, mut ids) = store_with(vec![Keyword::Morph(Cost::generic(3))]);
        let mut factory = ScriptFactory::new();
        let rep = face_down(&mut store, false, &mut ids, &mut factory).unwrap();
        assert_eq!(rep.behaviors.of_kind(BehaviorKind::Activated).count(), 1);
        assert!(rep.keywords.is_empty());
    }

    #[test]
    fn test_disguise_face_down_has_ward() {
        let (mut store, mut ids) = store_with(vec![Keyword::Disguise(Cost::generic(2))]);
        let mut factory = ScriptFactory::new();
        let rep = face_down(&mut store, false, &mut ids, &mut factory).unwrap();
        assert!(rep.has_keyword("Ward"));
        assert_eq!(rep.behaviors.of_kind(BehaviorKind::Trigger).count(), 1);
    }

    #[test]
    fn test_switch_to_twice() {
        let (mut store, _) = store_with(Vec::new());
        store.add_alternate(FaceName::Transformed, Representation::new(FaceName::Original, "Back"));
        assert!(store.switch_to(FaceName::Transformed, ObjectId(1)));
        assert!(!store.switch_to(FaceName::Transformed, ObjectId(1)));
        assert_eq!(store.current().name, "Back");
        assert_eq!(store.current().face, FaceName::Transformed);
        assert!(!store.switch_to(FaceName::Meld, ObjectId(1)));
    }

    #[test]
    fn test_switch_rehomes_statics() {
        let (mut store, _) = store_with(Vec::new());
        let mut back = Representation::new(FaceName::Transformed, "Back");
        let recipe = Recipe::static_self(StaticChange::Colorless);
        back.behaviors.attach(CompiledBehavior {
            id: BehaviorId::new(Origin::Printed(0), 0),
            recipe,
            host: ObjectId(99),
            intrinsic: true,
            handle: crate::behavior::BehaviorHandle(0),
        });
        store.add_alternate(FaceName::Transformed, back);
        store.switch_to(FaceName::Transformed, ObjectId(5));
        assert!(store.current().behaviors.iter().all(|b| b.host == ObjectId(5)));
    }

    #[test]
    fn test_swap_moves_current() {
        let (mut store, _) = store_with(Vec::new());
        store.add_alternate(FaceName::Meld, Representation::new(FaceName::Meld, "Melded"));
        assert!(store.swap(FaceName::Original, FaceName::Meld));
        assert_eq!(store.current_name(), FaceName::Meld);
        assert_eq!(store.current().name, "Hidden Thing");
        assert_eq!(store.get(FaceName::Original).unwrap().name, "Melded");
        assert!(!store.swap(FaceName::Original, FaceName::Flipped));
    }

    #[test]
    fn test_remove_current_resets_to_original() {
        let (mut store, _) = store_with(Vec::new());
        store.add_alternate(FaceName::Animated, Representation::new(FaceName::Animated, "Golem"));
        store.switch_to(FaceName::Animated, ObjectId(1));
        assert!(store.remove(FaceName::Animated).is_some());
        assert_eq!(store.current_name(), FaceName::Original);
        assert!(store.remove(FaceName::Original).is_none());
        assert!(store.remove(FaceName::Animated).is_none());
    }

    #[test]
    fn test_keyword_instances_keep_ids() {
        let (store, _) = store_with(vec![Keyword::Flying, Keyword::Haste]);
        let ids: Vec<_> = store.current().keywords.iter().map(|k: &KeywordInstance| k.id.raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
