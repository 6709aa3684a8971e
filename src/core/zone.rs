//! Zones referenced by compiled behaviors.
//!
//! Zone movement itself belongs to the host engine. Recipes only name
//! zones (a trigger on "dies" watches Battlefield → Graveyard, Flashback
//! casts from Graveyard, ...).

use serde::{Deserialize, Serialize};

/// A game zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Stack,
    Exile,
    Command,
}

impl Zone {
    /// Short name used when rendering recipes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Library => "Library",
            Zone::Hand => "Hand",
            Zone::Battlefield => "Battlefield",
            Zone::Graveyard => "Graveyard",
            Zone::Stack => "Stack",
            Zone::Exile => "Exile",
            Zone::Command => "Command",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
