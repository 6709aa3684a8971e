//! Printed power and toughness values.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// A printed power or toughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PtValue {
    /// Fixed numeric value (e.g., 4)
    Fixed(i32),
    /// Star value, determined by a characteristic-defining ability (e.g., *)
    Star,
    /// Star plus a number (e.g., *+1 or 1+*)
    StarPlus(i32),
}

impl PtValue {
    /// Returns the base numeric value, treating Star as 0.
    #[must_use]
    pub fn base_value(self) -> i32 {
        match self {
            PtValue::Fixed(n) => n,
            PtValue::Star => 0,
            PtValue::StarPlus(n) => n,
        }
    }

    /// Whether the value depends on a characteristic-defining ability.
    #[must_use]
    pub fn is_variable(self) -> bool {
        !matches!(self, PtValue::Fixed(_))
    }

    /// Read a printed value: `"3"`, `"-1"`, `"*"`, `"*+1"`, `"1+*"`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let malformed = || CardError::MalformedPowerToughness(text.to_string());
        if text == "*" {
            return Ok(PtValue::Star);
        }
        if let Some(rest) = text.strip_prefix("*+") {
            return rest.parse().map(PtValue::StarPlus).map_err(|_| malformed());
        }
        if let Some(rest) = text.strip_suffix("+*") {
            return rest.parse().map(PtValue::StarPlus).map_err(|_| malformed());
        }
        text.parse().map(PtValue::Fixed).map_err(|_| malformed())
    }
}

impl Default for PtValue {
    fn default() -> Self {
        PtValue::Fixed(0)
    }
}

impl std::fmt::Display for PtValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PtValue::Fixed(n) => write!(f, "{}", n),
            PtValue::Star => f.write_str("*"),
            PtValue::StarPlus(n) => write!(f, "*+{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(PtValue::parse("3").unwrap(), PtValue::Fixed(3));
        assert_eq!(PtValue::parse("-1").unwrap(), PtValue::Fixed(-1));
        assert_eq!(PtValue::parse("*").unwrap(), PtValue::Star);
        assert_eq!(PtValue::parse("*+1").unwrap(), PtValue::StarPlus(1));
        assert_eq!(PtValue::parse("1+*").unwrap(), PtValue::StarPlus(1));
        assert!(PtValue::parse("two").is_err());
    }

    #[test]
    fn test_base_value() {
        assert_eq!(PtValue::Fixed(4).base_value(), 4);
        assert_eq!(PtValue::Star.base_value(), 0);
        assert_eq!(PtValue::StarPlus(2).base_value(), 2);
        assert!(PtValue::Star.is_variable());
        assert!(!PtValue::Fixed(1).is_variable());
    }
}
