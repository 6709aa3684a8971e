//! Modification record payloads.
//!
//! Each record is one continuous effect's edit to one characteristic.
//! Records are pure data: replay lives in
//! [`ModificationLedger`](super::ModificationLedger).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::characteristics::{ColorSet, PtValue, SubtypeClass, TypeLine};
use crate::error::Result;
use crate::keywords::{KeywordId, KeywordInstance};

/// Whole classes of types a type change strips before applying its sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoveClasses {
    pub supertypes: bool,
    pub card_types: bool,
    pub all_subtypes: bool,
    pub land_types: bool,
    pub creature_types: bool,
    pub artifact_types: bool,
    pub enchantment_types: bool,
}

impl RemoveClasses {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Strip the flagged classes from `line`. Each flag is independent.
    pub fn apply(&self, line: &mut TypeLine) {
        if self.supertypes {
            line.supertypes.clear();
        }
        if self.card_types {
            line.card_types.clear();
        }
        if self.all_subtypes {
            line.subtypes.clear();
            line.all_creature_types = false;
        }
        if self.land_types {
            line.remove_subtypes_of(SubtypeClass::Land);
        }
        if self.creature_types {
            line.remove_subtypes_of(SubtypeClass::Creature);
        }
        if self.artifact_types {
            line.remove_subtypes_of(SubtypeClass::Artifact);
        }
        if self.enchantment_types {
            line.remove_subtypes_of(SubtypeClass::Enchantment);
        }
    }
}

/// Adds and removes types.
///
/// Replay applies class removals, then the remove set, then the add set,
/// so "loses all creature types and becomes a Zombie" keeps the Zombie.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub add: TypeLine,
    pub remove: TypeLine,
    pub remove_classes: RemoveClasses,
}

impl TypeChange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Types to add (builder pattern).
    #[must_use]
    pub fn adding(mut self, add: TypeLine) -> Self {
        self.add = add;
        self
    }

    /// Types to remove (builder pattern).
    #[must_use]
    pub fn removing(mut self, remove: TypeLine) -> Self {
        self.remove = remove;
        self
    }

    /// Classes to strip (builder pattern).
    #[must_use]
    pub fn removing_classes(mut self, classes: RemoveClasses) -> Self {
        self.remove_classes = classes;
        self
    }

    /// Gain every creature type (builder pattern).
    #[must_use]
    pub fn with_all_creature_types(mut self) -> Self {
        self.add.all_creature_types = true;
        self
    }

    pub(crate) fn apply(&self, line: &mut TypeLine) {
        self.remove_classes.apply(line);
        line.remove_all(&self.remove);
        line.add_all(&self.add);
    }
}

/// Sets or adds colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorChange {
    pub colors: ColorSet,
    /// Add to the running colors instead of replacing them.
    pub additive: bool,
}

impl ColorChange {
    /// "Becomes <colors>" (replaces).
    #[must_use]
    pub fn set(colors: ColorSet) -> Self {
        Self {
            colors,
            additive: false,
        }
    }

    /// "Is <colors> in addition to its other colors".
    #[must_use]
    pub fn add(colors: ColorSet) -> Self {
        Self {
            colors,
            additive: true,
        }
    }

    /// Build from color names as effects write them (`"red, green"`).
    ///
    /// Fails with [`CardError::InvalidColor`](crate::error::CardError) on an
    /// unknown name.
    pub fn from_names(names: &str, additive: bool) -> Result<Self> {
        Ok(Self {
            colors: ColorSet::parse_names(names)?,
            additive,
        })
    }

    pub(crate) fn apply(&self, colors: ColorSet) -> ColorSet {
        if self.additive {
            colors.union(self.colors)
        } else {
            self.colors
        }
    }
}

/// Grants and removes keywords.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordChange {
    /// Keyword instances granted by this effect.
    pub add: Vec<KeywordInstance>,
    /// Keywords removed by name or full tag ("loses flying").
    pub remove: SmallVec<[String; 2]>,
    /// Specific instances removed by identity.
    pub remove_instances: SmallVec<[KeywordId; 2]>,
    /// "Loses all abilities" up to this point in timestamp order.
    pub remove_all: bool,
    /// Replay starts from an empty set instead of the printed keywords.
    pub remove_intrinsic: bool,
}

impl KeywordChange {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant instances (builder pattern).
    #[must_use]
    pub fn granting(mut self, add: impl IntoIterator<Item = KeywordInstance>) -> Self {
        self.add.extend(add);
        self
    }

    /// Remove keywords by name (builder pattern).
    #[must_use]
    pub fn removing(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.remove.extend(names.into_iter().map(Into::into));
        self
    }

    /// Remove specific instances (builder pattern).
    #[must_use]
    pub fn removing_instances(mut self, ids: impl IntoIterator<Item = KeywordId>) -> Self {
        self.remove_instances.extend(ids);
        self
    }

    /// Lose all keywords (builder pattern).
    #[must_use]
    pub fn removing_all(mut self) -> Self {
        self.remove_all = true;
        self
    }

    /// Lose the printed keywords (builder pattern).
    #[must_use]
    pub fn removing_intrinsic(mut self) -> Self {
        self.remove_intrinsic = true;
        self
    }
}

/// Sets power and/or toughness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PtOverride {
    pub power: Option<i32>,
    pub toughness: Option<i32>,
    /// From a characteristic-defining ability. Replays before every
    /// ordinary override regardless of timestamp.
    pub characteristic_defining: bool,
}

impl PtOverride {
    /// Set both axes.
    #[must_use]
    pub fn set(power: i32, toughness: i32) -> Self {
        Self {
            power: Some(power),
            toughness: Some(toughness),
            characteristic_defining: false,
        }
    }

    #[must_use]
    pub fn power(power: i32) -> Self {
        Self {
            power: Some(power),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn toughness(toughness: i32) -> Self {
        Self {
            toughness: Some(toughness),
            ..Self::default()
        }
    }

    /// Mark as characteristic-defining (builder pattern).
    #[must_use]
    pub fn defining(mut self) -> Self {
        self.characteristic_defining = true;
        self
    }
}

/// Effective power/toughness. `None` on an axis means no override: use
/// the printed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PtPair {
    pub power: Option<i32>,
    pub toughness: Option<i32>,
}

impl PtPair {
    /// Fill unset axes from the printed values.
    #[must_use]
    pub fn or_base(self, power: Option<PtValue>, toughness: Option<PtValue>) -> (i32, i32) {
        (
            self.power
                .unwrap_or_else(|| power.map_or(0, PtValue::base_value)),
            self.toughness
                .unwrap_or_else(|| toughness.map_or(0, PtValue::base_value)),
        )
    }
}

/// Any one record, for persistence and bulk operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modification {
    Type(TypeChange),
    Color(ColorChange),
    Keyword(KeywordChange),
    PowerToughness(PtOverride),
}

impl Modification {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Modification::Type(_) => "type",
            Modification::Color(_) => "color",
            Modification::Keyword(_) => "keyword",
            Modification::PowerToughness(_) => "power_toughness",
        }
    }
}
