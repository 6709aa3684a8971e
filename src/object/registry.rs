//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions for a game and turns
//! them into [`GameObject`]s.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use super::game_object::GameObject;
use crate::behavior::AbilityFactory;
use crate::core::{ObjectId, PlayerId, RulesConfig};
use crate::error::{CardError, Result};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_layers::core::{ObjectId, PlayerId};
/// use ccg_layers::hooks::NoopHooks;
/// use ccg_layers::object::{CardDefinition, CardId, CardRegistry, FaceDefinition};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), FaceDefinition::new("Bushi Tenderfoot")))
///     .unwrap();
///
/// let mut hooks = NoopHooks::new();
/// let object = registry
///     .instantiate(CardId::new(1), ObjectId(10), PlayerId(0), &mut hooks)
///     .unwrap();
/// assert_eq!(object.name(), "Bushi Tenderfoot");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    config: RulesConfig,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for every object instantiated from now on (builder
    /// pattern).
    #[must_use]
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Register a card definition.
    ///
    /// Fails with `DuplicateCard` if the id is already taken, or with the
    /// error from [`CardDefinition::validate`]; the registry is unchanged.
    pub fn register(&mut self, card: CardDefinition) -> Result<()> {
        card.validate()?;
        if self.cards.contains_key(&card.id) {
            return Err(CardError::DuplicateCard(card.id.raw()));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Build a new object from a registered card.
    pub fn instantiate(
        &self,
        card: CardId,
        id: ObjectId,
        owner: PlayerId,
        factory: &mut dyn AbilityFactory,
    ) -> Result<GameObject> {
        let definition = self
            .cards
            .get(&card)
            .ok_or(CardError::UnknownCard(card.raw()))?;
        GameObject::from_definition(id, owner, definition, self.config.clone(), factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NoopHooks;
    use crate::object::FaceDefinition;

    fn card(id: u32, name: &str) -> CardDefinition {
        CardDefinition::new(CardId(id), FaceDefinition::new(name))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(card(1, "Test Card")).unwrap();
        assert_eq!(registry.get(CardId(1)).unwrap().name(), "Test Card");
        assert!(registry.get(CardId(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(card(1, "Card A")).unwrap();
        assert_eq!(registry.register(card(1, "Card B")), Err(CardError::DuplicateCard(1)));
        assert_eq!(registry.get(CardId(1)).unwrap().name(), "Card A");
    }

    #[test]
    fn test_instantiate_unknown_card() {
        let registry = CardRegistry::new();
        let mut hooks = NoopHooks::new();
        let err = registry
            .instantiate(CardId(7), ObjectId(1), PlayerId(0), &mut hooks)
            .unwrap_err();
        assert_eq!(err, CardError::UnknownCard(7));
    }

    #[test]
    fn test_find_with_predicate() {
        let mut registry = CardRegistry::new();
        registry.register(card(1, "Goblin")).unwrap();
        registry.register(card(2, "Bolt")).unwrap();
        let found: Vec<_> = registry.find(|c| c.name().starts_with('G')).collect();
        assert_eq!(found.len(), 1);
    }
}
