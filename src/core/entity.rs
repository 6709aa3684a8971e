//! Object and player identification.
//!
//! Every game object (card, token, copy) has an `ObjectId` that stays the
//! same while the object changes faces, controllers or characteristics.
//! Players are identified separately by `PlayerId`.
//!
//! ## Usage
//!
//! ```
//! use ccg_layers::core::{ObjectId, PlayerId};
//!
//! let bear = ObjectId::new(10);
//! assert_eq!(bear.raw(), 10);
//! assert_eq!(format!("{}", bear), "Object(10)");
//!
//! let alice = PlayerId::new(0);
//! assert_eq!(alice.index(), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identity of a game object.
///
/// Relations between objects (cloner, meld partner, paired creature) are
/// stored as `ObjectId` values and resolved through an
/// [`ObjectRegistry`](crate::object::ObjectRegistry), never as owning
/// references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Create a new object ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id = ObjectId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(ObjectId::from(42), id);
    }

    #[test]
    fn test_object_id_ordering() {
        assert!(ObjectId(1) < ObjectId(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ObjectId(7)), "Object(7)");
        assert_eq!(format!("{}", PlayerId(1)), "Player 1");
    }

    #[test]
    fn test_serialization() {
        let id = ObjectId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
