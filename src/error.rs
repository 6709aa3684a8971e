//! Error types.
//!
//! Every variant is a content-definition error: bad card data, not bad
//! game state. Routine no-ops (switching to the current face, removing a
//! record that is not there) are reported through return values instead.

use thiserror::Error;

use crate::object::FaceName;

/// Errors raised while loading or modifying an object's definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// A keyword tag did not match its grammar.
    #[error("malformed keyword '{tag}': {reason}")]
    MalformedKeyword {
        /// The offending tag as written.
        tag: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A representation was requested that the object does not have.
    #[error("unknown representation: {0}")]
    UnknownRepresentation(FaceName),

    /// A color name was not recognized.
    #[error("invalid color: '{0}'")]
    InvalidColor(String),

    /// A mana or keyword cost could not be read.
    #[error("malformed cost '{0}'")]
    MalformedCost(String),

    /// A printed power or toughness could not be read.
    #[error("malformed power/toughness '{0}'")]
    MalformedPowerToughness(String),

    /// A card definition lists the same face twice.
    #[error("face {0} defined twice")]
    DuplicateFace(FaceName),

    /// A card definition id was registered twice.
    #[error("card {0} already registered")]
    DuplicateCard(u32),

    /// A card definition id was not found.
    #[error("card {0} not found")]
    UnknownCard(u32),
}

impl CardError {
    /// Shorthand for a malformed keyword error.
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKeyword {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CardError::malformed("Bushido X2", "magnitude must be a number");
        assert_eq!(
            err.to_string(),
            "malformed keyword 'Bushido X2': magnitude must be a number"
        );
        assert_eq!(
            CardError::InvalidColor("purple".into()).to_string(),
            "invalid color: 'purple'"
        );
        assert_eq!(
            CardError::UnknownRepresentation(FaceName::Flipped).to_string(),
            "unknown representation: Flipped"
        );
        assert_eq!(
            CardError::DuplicateFace(FaceName::Transformed).to_string(),
            "face Transformed defined twice"
        );
    }
}
