//! Card definitions: structured per-face printed data.
//!
//! A `CardDefinition` is immutable content. Instantiating it (see
//! [`CardRegistry::instantiate`](super::CardRegistry::instantiate)) parses
//! the keyword tags and builds a fresh [`GameObject`](super::GameObject).

use serde::{Deserialize, Serialize};

use super::face::FaceName;
use super::representation::Representation;
use crate::behavior::Recipe;
use crate::characteristics::{ColorSet, ManaCost, PtValue, TypeLine};
use crate::core::CompilerConfig;
use crate::error::{CardError, Result};
use crate::keywords::{Keyword, KeywordIdAllocator};

/// Unique identifier for a card definition.
///
/// This identifies the printed card, not a specific object in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Printed data of one face.
///
/// Keywords stay as tags until instantiation so that a bad tag is
/// reported against the card being loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceDefinition {
    pub name: String,
    pub mana_cost: ManaCost,
    /// Color indicator. When absent, colors come from the mana cost.
    pub colors: Option<ColorSet>,
    pub types: TypeLine,
    pub power: Option<PtValue>,
    pub toughness: Option<PtValue>,
    pub keywords: Vec<String>,
    /// Printed non-keyword abilities, already in recipe form.
    pub abilities: Vec<Recipe>,
}

impl FaceDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mana_cost(mut self, cost: ManaCost) -> Self {
        self.mana_cost = cost;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorSet) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: TypeLine) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_pt(mut self, power: PtValue, toughness: PtValue) -> Self {
        self.power = Some(power);
        self.toughness = Some(toughness);
        self
    }

    /// Add a keyword tag such as `"Bushido:2"` (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, tag: impl Into<String>) -> Self {
        self.keywords.push(tag.into());
        self
    }

    /// Add a printed ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, recipe: Recipe) -> Self {
        self.abilities.push(recipe);
        self
    }

    /// Build the representation for `face`, allocating keyword ids from
    /// `ids`. Behaviors are not compiled here.
    pub fn representation(
        &self,
        face: FaceName,
        config: &CompilerConfig,
        ids: &mut KeywordIdAllocator,
    ) -> Result<Representation> {
        let keywords = self
            .keywords
            .iter()
            .map(|tag| Keyword::parse_with(tag, config).map(|k| ids.instance(k)))
            .collect::<Result<Vec<_>>>()?;

        let mut rep = Representation::new(face, self.name.clone())
            .with_mana_cost(self.mana_cost.clone())
            .with_types(self.types.clone())
            .with_keywords(keywords);
        if let Some(colors) = self.colors {
            rep = rep.with_colors(colors);
        }
        rep.power = self.power;
        rep.toughness = self.toughness;
        Ok(rep)
    }
}

/// A card: an original face plus any printed alternates.
///
/// ## Example
///
/// ```
/// use ccg_layers::characteristics::{PtValue, TypeLine};
/// use ccg_layers::object::{CardDefinition, CardId, FaceDefinition, FaceName};
///
/// let card = CardDefinition::new(
///     CardId::new(1),
///     FaceDefinition::new("Village Ironsmith")
///         .with_types(TypeLine::parse("Creature — Human Werewolf"))
///         .with_pt(PtValue::Fixed(1), PtValue::Fixed(1))
///         .with_keyword("First Strike"),
/// )
/// .with_face(
///     FaceName::Transformed,
///     FaceDefinition::new("Ironfang")
///         .with_types(TypeLine::parse("Creature — Werewolf"))
///         .with_pt(PtValue::Fixed(3), PtValue::Fixed(1)),
/// );
///
/// assert_eq!(card.name(), "Village Ironsmith");
/// assert_eq!(card.faces.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    /// Faces in declaration order; the first is the original.
    pub faces: Vec<(FaceName, FaceDefinition)>,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: CardId, original: FaceDefinition) -> Self {
        Self {
            id,
            faces: vec![(FaceName::Original, original)],
        }
    }

    /// Add or replace an alternate face (builder pattern).
    #[must_use]
    pub fn with_face(mut self, name: FaceName, face: FaceDefinition) -> Self {
        match self.faces.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = face,
            None => self.faces.push((name, face)),
        }
        self
    }

    /// Name of the original face.
    #[must_use]
    pub fn name(&self) -> &str {
        self.faces.first().map_or("", |(_, f)| f.name.as_str())
    }

    #[must_use]
    pub fn face(&self, name: FaceName) -> Option<&FaceDefinition> {
        self.faces.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    /// Check the face list: the original comes first and no face name
    /// repeats.
    pub fn validate(&self) -> Result<()> {
        match self.faces.first() {
            Some((FaceName::Original, _)) => {}
            _ => return Err(CardError::UnknownRepresentation(FaceName::Original)),
        }
        for (i, (name, _)) in self.faces.iter().enumerate() {
            if self.faces[..i].iter().any(|(seen, _)| seen == name) {
                return Err(CardError::DuplicateFace(*name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardError;

    #[test]
    fn test_representation_parses_keywords() {
        let face = FaceDefinition::new("Samurai")
            .with_keyword("Bushido:1")
            .with_keyword("Flying");
        let mut ids = KeywordIdAllocator::new();
        let rep = face
            .representation(FaceName::Original, &CompilerConfig::default(), &mut ids)
            .unwrap();
        assert_eq!(rep.keywords.len(), 2);
        assert_eq!(rep.keywords[0].keyword, Keyword::Bushido(1));
        assert_eq!(rep.keywords[1].id.raw(), 1);
    }

    #[test]
    fn test_malformed_keyword_rejected() {
        let face = FaceDefinition::new("Broken").with_keyword("Bushido:two");
        let mut ids = KeywordIdAllocator::new();
        let err = face
            .representation(FaceName::Original, &CompilerConfig::default(), &mut ids)
            .unwrap_err();
        assert!(matches!(err, CardError::MalformedKeyword { .. }));
    }

    #[test]
    fn test_color_indicator_overrides_cost() {
        let face = FaceDefinition::new("Dryad Arbor")
            .with_mana_cost(ManaCost::none())
            .with_colors(ColorSet::GREEN);
        let mut ids = KeywordIdAllocator::new();
        let rep = face
            .representation(FaceName::Original, &CompilerConfig::default(), &mut ids)
            .unwrap();
        assert_eq!(rep.colors, ColorSet::GREEN);
    }

    #[test]
    fn test_with_face_replaces() {
        let card = CardDefinition::new(CardId(1), FaceDefinition::new("Front"))
            .with_face(FaceName::Transformed, FaceDefinition::new("Back"))
            .with_face(FaceName::Transformed, FaceDefinition::new("Other Back"));
        assert_eq!(card.faces.len(), 2);
        assert_eq!(card.face(FaceName::Transformed).unwrap().name, "Other Back");
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_validate_face_list() {
        let back_first = CardDefinition {
            id: CardId(2),
            faces: vec![
                (FaceName::Transformed, FaceDefinition::new("Back")),
                (FaceName::Original, FaceDefinition::new("Front")),
            ],
        };
        assert_eq!(
            back_first.validate(),
            Err(CardError::UnknownRepresentation(FaceName::Original))
        );

        let twice = CardDefinition {
            id: CardId(3),
            faces: vec![
                (FaceName::Original, FaceDefinition::new("Front")),
                (FaceName::Original, FaceDefinition::new("Impostor")),
            ],
        };
        assert_eq!(twice.validate(), Err(CardError::DuplicateFace(FaceName::Original)));

        let empty = CardDefinition { id: CardId(4), faces: Vec::new() };
        assert!(empty.validate().is_err());
    }
}
