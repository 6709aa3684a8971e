//! Representation names.

use serde::{Deserialize, Serialize};

/// Name of one of an object's representations.
///
/// `FaceDown` is synthetic: no definition prints it, and it is built the
/// first time it is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FaceName {
    #[default]
    Original,
    Transformed,
    Flipped,
    FaceDown,
    Meld,
    LeftSplit,
    RightSplit,
    /// Temporary alternate installed by an animation effect.
    Animated,
}

impl FaceName {
    pub const ALL: [FaceName; 8] = [
        FaceName::Original,
        FaceName::Transformed,
        FaceName::Flipped,
        FaceName::FaceDown,
        FaceName::Meld,
        FaceName::LeftSplit,
        FaceName::RightSplit,
        FaceName::Animated,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FaceName::Original => "Original",
            FaceName::Transformed => "Transformed",
            FaceName::Flipped => "Flipped",
            FaceName::FaceDown => "FaceDown",
            FaceName::Meld => "Meld",
            FaceName::LeftSplit => "LeftSplit",
            FaceName::RightSplit => "RightSplit",
            FaceName::Animated => "Animated",
        }
    }

    /// Whether the face is built on demand rather than printed.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, FaceName::FaceDown)
    }
}

impl std::fmt::Display for FaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
