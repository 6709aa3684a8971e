//! Change sets for "characteristics changed" notifications.

use serde::{Deserialize, Serialize};

/// A set of changed object aspects.
///
/// ```
/// use ccg_layers::hooks::ChangeSet;
///
/// let changes = ChangeSet::TYPE | ChangeSet::KEYWORDS;
/// assert!(changes.contains(ChangeSet::TYPE));
/// assert!(!changes.contains(ChangeSet::COLOR));
/// assert_eq!(changes.to_string(), "type|keywords");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeSet(u16);

impl ChangeSet {
    pub const EMPTY: ChangeSet = ChangeSet(0);
    pub const TYPE: ChangeSet = ChangeSet(1 << 0);
    pub const COLOR: ChangeSet = ChangeSet(1 << 1);
    pub const KEYWORDS: ChangeSet = ChangeSet(1 << 2);
    pub const POWER_TOUGHNESS: ChangeSet = ChangeSet(1 << 3);
    pub const COUNTERS: ChangeSet = ChangeSet(1 << 4);
    pub const DAMAGE: ChangeSet = ChangeSet(1 << 5);
    pub const TAPPED: ChangeSet = ChangeSet(1 << 6);
    pub const FACE: ChangeSet = ChangeSet(1 << 7);
    pub const ALL: ChangeSet = ChangeSet((1 << 8) - 1);
    /// Everything a new current representation can change.
    pub const FACE_SWITCH: ChangeSet = ChangeSet(
        Self::FACE.0 | Self::TYPE.0 | Self::COLOR.0 | Self::KEYWORDS.0 | Self::POWER_TOUGHNESS.0,
    );

    const NAMES: [(ChangeSet, &'static str); 8] = [
        (Self::TYPE, "type"),
        (Self::COLOR, "color"),
        (Self::KEYWORDS, "keywords"),
        (Self::POWER_TOUGHNESS, "power_toughness"),
        (Self::COUNTERS, "counters"),
        (Self::DAMAGE, "damage"),
        (Self::TAPPED, "tapped"),
        (Self::FACE, "face"),
    ];

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every aspect in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: ChangeSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: ChangeSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: ChangeSet) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for ChangeSet {
    type Output = ChangeSet;

    fn bitor(self, rhs: ChangeSet) -> ChangeSet {
        ChangeSet(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ChangeSet {
    fn bitor_assign(&mut self, rhs: ChangeSet) {
        self.insert(rhs);
    }
}

impl std::fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_contains() {
        let mut changes = ChangeSet::EMPTY;
        assert!(changes.is_empty());
        changes |= ChangeSet::COUNTERS;
        changes |= ChangeSet::POWER_TOUGHNESS;
        assert!(changes.contains(ChangeSet::COUNTERS));
        assert!(changes.intersects(ChangeSet::POWER_TOUGHNESS | ChangeSet::TYPE));
        assert!(!changes.contains(ChangeSet::POWER_TOUGHNESS | ChangeSet::TYPE));
    }

    #[test]
    fn test_all_covers_every_flag() {
        for (flag, _) in ChangeSet::NAMES {
            assert!(ChangeSet::ALL.contains(flag));
        }
        assert_eq!(ChangeSet::EMPTY.to_string(), "none");
    }
}
