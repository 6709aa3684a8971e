//! Type lines: supertypes, card types and subtypes.
//!
//! Subtypes are open-ended text (new creature types appear every set), so
//! they are stored as `Subtype` strings and classified on demand. Type
//! modification records use the classification to remove, for example,
//! "all creature types" without touching land types.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Supertype {
    Basic,
    Legendary,
    Snow,
    World,
    Ongoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    Kindred,
    Land,
    Artifact,
    Enchantment,
    Creature,
    Planeswalker,
    Battle,
    Instant,
    Sorcery,
}

impl Supertype {
    pub const ALL: [Supertype; 5] = [
        Supertype::Basic,
        Supertype::Legendary,
        Supertype::Snow,
        Supertype::World,
        Supertype::Ongoing,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Supertype::Basic => "Basic",
            Supertype::Legendary => "Legendary",
            Supertype::Snow => "Snow",
            Supertype::World => "World",
            Supertype::Ongoing => "Ongoing",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl CardType {
    pub const ALL: [CardType; 9] = [
        CardType::Kindred,
        CardType::Land,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Creature,
        CardType::Planeswalker,
        CardType::Battle,
        CardType::Instant,
        CardType::Sorcery,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardType::Kindred => "Kindred",
            CardType::Land => "Land",
            CardType::Artifact => "Artifact",
            CardType::Enchantment => "Enchantment",
            CardType::Creature => "Creature",
            CardType::Planeswalker => "Planeswalker",
            CardType::Battle => "Battle",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("Tribal") {
            return Some(CardType::Kindred);
        }
        Self::ALL.into_iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Whether this type is a permanent type.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery | CardType::Kindred)
    }
}

/// Which family of subtypes a subtype belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtypeClass {
    Land,
    Artifact,
    Enchantment,
    Spell,
    Planeswalker,
    Battle,
    Creature,
}

const LAND_TYPES: &[&str] = &[
    "Plains", "Island", "Swamp", "Mountain", "Forest", "Desert", "Gate", "Lair", "Locus",
    "Mine", "Power-Plant", "Tower", "Urza's", "Cave", "Sphere", "Town",
];

const ARTIFACT_TYPES: &[&str] = &[
    "Attraction", "Blood", "Bobblehead", "Clue", "Contraption", "Equipment", "Food",
    "Fortification", "Gold", "Incubator", "Map", "Powerstone", "Treasure", "Vehicle",
];

const ENCHANTMENT_TYPES: &[&str] = &[
    "Aura", "Background", "Cartouche", "Case", "Class", "Curse", "Role", "Room", "Rune",
    "Saga", "Shard", "Shrine",
];

const SPELL_TYPES: &[&str] = &["Adventure", "Arcane", "Lesson", "Omen", "Trap"];

const PLANESWALKER_TYPES: &[&str] = &[
    "Ajani", "Chandra", "Elspeth", "Garruk", "Gideon", "Jace", "Karn", "Liliana", "Nissa",
    "Sorin", "Teferi", "Ugin", "Vraska",
];

/// A subtype such as `Goblin`, `Equipment` or `Island`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subtype(pub String);

impl Subtype {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify this subtype. Anything not in a known list is a creature
    /// type, since that is the family new content extends most often.
    #[must_use]
    pub fn class(&self) -> SubtypeClass {
        let name = self.0.as_str();
        let listed = |list: &[&str]| list.iter().any(|t| t.eq_ignore_ascii_case(name));
        if listed(LAND_TYPES) {
            SubtypeClass::Land
        } else if listed(ARTIFACT_TYPES) {
            SubtypeClass::Artifact
        } else if listed(ENCHANTMENT_TYPES) {
            SubtypeClass::Enchantment
        } else if listed(SPELL_TYPES) {
            SubtypeClass::Spell
        } else if listed(PLANESWALKER_TYPES) {
            SubtypeClass::Planeswalker
        } else if name.eq_ignore_ascii_case("Siege") {
            SubtypeClass::Battle
        } else {
            SubtypeClass::Creature
        }
    }
}

impl From<&str> for Subtype {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete type line.
///
/// ```
/// use ccg_layers::characteristics::{CardType, Supertype, TypeLine};
///
/// let line = TypeLine::parse("Legendary Creature — Human Samurai");
/// assert!(line.has_supertype(Supertype::Legendary));
/// assert!(line.has_card_type(CardType::Creature));
/// assert!(line.has_subtype("Samurai"));
/// assert_eq!(line.to_string(), "Legendary Creature — Human Samurai");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeLine {
    pub supertypes: SmallVec<[Supertype; 2]>,
    pub card_types: SmallVec<[CardType; 2]>,
    pub subtypes: Vec<Subtype>,
    /// Has every creature type (changeling-style).
    pub all_creature_types: bool,
}

impl TypeLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a printed type line such as `"Artifact Creature — Golem"`.
    ///
    /// Words left of the dash that are neither supertypes nor card types
    /// are kept as subtypes rather than rejected.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let (left, right) = match text.split_once('—').or_else(|| text.split_once(" - ")) {
            Some((l, r)) => (l, r),
            None => (text, ""),
        };
        let mut line = TypeLine::new();
        for word in left.split_whitespace() {
            if let Some(st) = Supertype::from_name(word) {
                line.add_supertype(st);
            } else if let Some(ct) = CardType::from_name(word) {
                line.add_card_type(ct);
            } else {
                line.add_subtype(word);
            }
        }
        for word in right.split_whitespace() {
            line.add_subtype(word);
        }
        line
    }

    #[must_use]
    pub fn with_card_type(mut self, card_type: CardType) -> Self {
        self.add_card_type(card_type);
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: Supertype) -> Self {
        self.add_supertype(supertype);
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<Subtype>) -> Self {
        self.add_subtype(subtype);
        self
    }

    pub fn add_supertype(&mut self, supertype: Supertype) {
        if !self.supertypes.contains(&supertype) {
            self.supertypes.push(supertype);
        }
    }

    pub fn add_card_type(&mut self, card_type: CardType) {
        if !self.card_types.contains(&card_type) {
            self.card_types.push(card_type);
            self.card_types.sort();
        }
    }

    pub fn add_subtype(&mut self, subtype: impl Into<Subtype>) {
        let subtype = subtype.into();
        if !self.subtypes.contains(&subtype) {
            self.subtypes.push(subtype);
        }
    }

    #[must_use]
    pub fn has_supertype(&self, supertype: Supertype) -> bool {
        self.supertypes.contains(&supertype)
    }

    #[must_use]
    pub fn has_card_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    /// Whether the line has the named subtype, counting "all creature
    /// types" for creature subtypes.
    #[must_use]
    pub fn has_subtype(&self, name: &str) -> bool {
        if self.subtypes.iter().any(|s| s.0.eq_ignore_ascii_case(name)) {
            return true;
        }
        self.all_creature_types && Subtype::new(name).class() == SubtypeClass::Creature
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.has_card_type(CardType::Creature)
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.has_card_type(CardType::Land)
    }

    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.card_types.iter().any(|t| t.is_permanent())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
            && self.card_types.is_empty()
            && self.subtypes.is_empty()
            && !self.all_creature_types
    }

    /// Add everything in `other` to this line.
    pub fn add_all(&mut self, other: &TypeLine) {
        for st in &other.supertypes {
            self.add_supertype(*st);
        }
        for ct in &other.card_types {
            self.add_card_type(*ct);
        }
        for sub in &other.subtypes {
            self.add_subtype(sub.clone());
        }
        self.all_creature_types |= other.all_creature_types;
    }

    /// Remove everything in `other` from this line.
    pub fn remove_all(&mut self, other: &TypeLine) {
        self.supertypes.retain(|st| !other.supertypes.contains(st));
        self.card_types.retain(|ct| !other.card_types.contains(ct));
        self.subtypes
            .retain(|s| !other.subtypes.iter().any(|o| o.0.eq_ignore_ascii_case(&s.0)));
        if other.all_creature_types {
            self.all_creature_types = false;
        }
    }

    /// Remove every subtype of the given class.
    pub fn remove_subtypes_of(&mut self, class: SubtypeClass) {
        self.subtypes.retain(|s| s.class() != class);
        if class == SubtypeClass::Creature {
            self.all_creature_types = false;
        }
    }
}

impl std::fmt::Display for TypeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut words: Vec<&str> = self.supertypes.iter().map(|s| s.name()).collect();
        words.extend(self.card_types.iter().map(|t| t.name()));
        f.write_str(&words.join(" "))?;
        if !self.subtypes.is_empty() || self.all_creature_types {
            f.write_str(" —")?;
            if self.all_creature_types {
                f.write_str(" All creature types")?;
            }
            for sub in &self.subtypes {
                write!(f, " {}", sub)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_classes() {
        assert_eq!(Subtype::new("Island").class(), SubtypeClass::Land);
        assert_eq!(Subtype::new("Equipment").class(), SubtypeClass::Artifact);
        assert_eq!(Subtype::new("Aura").class(), SubtypeClass::Enchantment);
        assert_eq!(Subtype::new("Arcane").class(), SubtypeClass::Spell);
        assert_eq!(Subtype::new("Samurai").class(), SubtypeClass::Creature);
    }

    #[test]
    fn test_parse_and_display() {
        let line = TypeLine::parse("Artifact Creature — Golem");
        assert!(line.has_card_type(CardType::Artifact));
        assert!(line.is_creature());
        assert!(line.has_subtype("golem"));
        assert_eq!(line.to_string(), "Artifact Creature — Golem");
    }

    #[test]
    fn test_card_types_sorted() {
        let line = TypeLine::new()
            .with_card_type(CardType::Creature)
            .with_card_type(CardType::Artifact);
        assert_eq!(line.to_string(), "Artifact Creature");
    }

    #[test]
    fn test_tribal_alias() {
        let line = TypeLine::parse("Tribal Instant — Goblin");
        assert!(line.has_card_type(CardType::Kindred));
    }

    #[test]
    fn test_add_and_remove() {
        let mut line = TypeLine::parse("Creature — Elf Druid");
        line.add_all(&TypeLine::parse("Artifact — Equipment"));
        assert!(line.has_card_type(CardType::Artifact));
        assert!(line.has_subtype("Equipment"));

        line.remove_all(&TypeLine::parse("Creature — Druid"));
        assert!(!line.is_creature());
        assert!(!line.has_subtype("Druid"));
        assert!(line.has_subtype("Elf"));
    }

    #[test]
    fn test_remove_subtypes_of_class() {
        let mut line = TypeLine::parse("Artifact Creature Land — Forest Equipment Golem");
        line.remove_subtypes_of(SubtypeClass::Creature);
        assert!(!line.has_subtype("Golem"));
        assert!(line.has_subtype("Forest"));
        assert!(line.has_subtype("Equipment"));
    }

    #[test]
    fn test_all_creature_types() {
        let mut line = TypeLine::parse("Creature — Shapeshifter");
        line.all_creature_types = true;
        assert!(line.has_subtype("Goblin"));
        assert!(!line.has_subtype("Island"));
        line.remove_subtypes_of(SubtypeClass::Creature);
        assert!(!line.has_subtype("Goblin"));
    }
}
