//! One face of an object: its printed characteristics and compiled
//! behaviors.

use serde::{Deserialize, Serialize};

use super::face::FaceName;
use crate::behavior::{Behaviors, Variables};
use crate::characteristics::{CardType, ColorSet, ManaCost, PtValue, TypeLine};
use crate::core::RulesConfig;
use crate::keywords::KeywordInstance;

/// Printed characteristics of one face plus everything compiled onto it.
///
/// ```
/// use ccg_layers::characteristics::{ManaCost, PtValue, TypeLine};
/// use ccg_layers::object::{FaceName, Representation};
///
/// let rep = Representation::new(FaceName::Original, "Raging Goblin")
///     .with_mana_cost(ManaCost::parse("R").unwrap())
///     .with_types(TypeLine::parse("Creature — Goblin Berserker"))
///     .with_pt(PtValue::Fixed(1), PtValue::Fixed(1));
///
/// assert!(rep.types.is_creature());
/// assert_eq!(rep.colors.count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    pub face: FaceName,
    pub name: String,
    pub mana_cost: ManaCost,
    pub power: Option<PtValue>,
    pub toughness: Option<PtValue>,
    pub types: TypeLine,
    pub colors: ColorSet,
    /// Printed keywords, in printed order.
    pub keywords: Vec<KeywordInstance>,
    pub behaviors: Behaviors,
    pub variables: Variables,
}

impl Representation {
    #[must_use]
    pub fn new(face: FaceName, name: impl Into<String>) -> Self {
        Self {
            face,
            name: name.into(),
            ..Self::default()
        }
    }

    /// The standard face-down representation: a nameless, colorless
    /// creature with the configured power/toughness and no text.
    #[must_use]
    pub fn face_down(config: &RulesConfig) -> Self {
        Self::new(FaceName::FaceDown, "")
            .with_types(TypeLine::new().with_card_type(CardType::Creature))
            .with_pt(
                PtValue::Fixed(config.face_down_power),
                PtValue::Fixed(config.face_down_toughness),
            )
    }

    /// Face-down in exile: no name, no types, no power/toughness.
    #[must_use]
    pub fn exiled_face_down() -> Self {
        Self::new(FaceName::FaceDown, "")
    }

    /// Set the mana cost; colors follow it (builder pattern).
    #[must_use]
    pub fn with_mana_cost(mut self, cost: ManaCost) -> Self {
        self.colors = cost.colors();
        self.mana_cost = cost;
        self
    }

    /// Set colors explicitly, e.g. for a color indicator (builder pattern).
    #[must_use]
    pub fn with_colors(mut self, colors: ColorSet) -> Self {
        self.colors = colors;
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

    /// Append printed keywords (builder pattern).
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = KeywordInstance>) -> Self {
        self.keywords.extend(keywords);
        self
    }

    /// Whether a printed keyword answers to `name`.
    #[must_use]
    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(name))
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "[{}]", self.face)?;
        } else {
            write!(f, "{} [{}]", self.name, self.face)?;
        }
        if !self.types.is_empty() {
            write!(f, " {}", self.types)?;
        }
        if let (Some(p), Some(t)) = (self.power, self.toughness) {
            write!(f, " {}/{}", p, t)?;
        }
        Ok(())
    }
}
