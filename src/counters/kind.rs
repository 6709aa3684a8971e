//! Counter types.

use serde::{Deserialize, Serialize};

use crate::keywords::Keyword;

/// A kind of counter that can be placed on an object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterType {
    // === Power/toughness counters ===
    PlusOnePlusOne,
    MinusOneMinusOne,
    PlusOnePlusZero,
    PlusZeroPlusOne,
    MinusOneMinusZero,
    MinusZeroMinusOne,
    PlusTwoPlusTwo,
    MinusTwoMinusOne,
    MinusZeroMinusTwo,
    MinusTwoMinusTwo,
    PlusOnePlusTwo,

    // === Named counters the compiler refers to ===
    Loyalty,
    Time,
    Fade,
    Age,
    Level,
    Charge,
    Lore,
    Shield,
    Stun,
    Finality,

    /// A keyword counter ("flying counter"). The object has the keyword
    /// while the counter is on it.
    Keyword(Keyword),

    /// Any other counter, by name.
    Named(String),
}

const PT_COUNTERS: &[(CounterType, &str, i32, i32)] = &[
    (CounterType::PlusOnePlusOne, "+1/+1", 1, 1),
    (CounterType::MinusOneMinusOne, "-1/-1", -1, -1),
    (CounterType::PlusOnePlusZero, "+1/+0", 1, 0),
    (CounterType::PlusZeroPlusOne, "+0/+1", 0, 1),
    (CounterType::MinusOneMinusZero, "-1/-0", -1, 0),
    (CounterType::MinusZeroMinusOne, "-0/-1", 0, -1),
    (CounterType::PlusTwoPlusTwo, "+2/+2", 2, 2),
    (CounterType::MinusTwoMinusOne, "-2/-1", -2, -1),
    (CounterType::MinusZeroMinusTwo, "-0/-2", 0, -2),
    (CounterType::MinusTwoMinusTwo, "-2/-2", -2, -2),
    (CounterType::PlusOnePlusTwo, "+1/+2", 1, 2),
];

const NAMED_COUNTERS: &[(CounterType, &str)] = &[
    (CounterType::Loyalty, "loyalty"),
    (CounterType::Time, "time"),
    (CounterType::Fade, "fade"),
    (CounterType::Age, "age"),
    (CounterType::Level, "level"),
    (CounterType::Charge, "charge"),
    (CounterType::Lore, "lore"),
    (CounterType::Shield, "shield"),
    (CounterType::Stun, "stun"),
    (CounterType::Finality, "finality"),
];

/// Keywords that exist as counters.
const KEYWORD_COUNTERS: &[Keyword] = &[
    Keyword::Flying,
    Keyword::FirstStrike,
    Keyword::DoubleStrike,
    Keyword::Deathtouch,
    Keyword::Hexproof,
    Keyword::Indestructible,
    Keyword::Lifelink,
    Keyword::Menace,
    Keyword::Reach,
    Keyword::Trample,
    Keyword::Vigilance,
    Keyword::Haste,
];

impl CounterType {
    /// Power/toughness contributed by one counter of this type.
    #[must_use]
    pub fn pt_bonus(&self) -> Option<(i32, i32)> {
        PT_COUNTERS
            .iter()
            .find(|(kind, ..)| kind == self)
            .map(|(_, _, p, t)| (*p, *t))
    }

    /// The keyword granted by a keyword counter.
    #[must_use]
    pub fn granted_keyword(&self) -> Option<&Keyword> {
        match self {
            CounterType::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Read a counter name as written on cards (`"+1/+1"`, `"time"`,
    /// `"flying"`). Anything unrecognised becomes `Named`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if let Some((kind, ..)) = PT_COUNTERS.iter().find(|(_, n, ..)| *n == name) {
            return kind.clone();
        }
        if let Some((kind, _)) = NAMED_COUNTERS
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
        {
            return kind.clone();
        }
        if let Some(k) = KEYWORD_COUNTERS.iter().find(|k| k.matches(name)) {
            return CounterType::Keyword(k.clone());
        }
        CounterType::Named(name.to_string())
    }

    /// Name as written on cards.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some((_, n, ..)) = PT_COUNTERS.iter().find(|(kind, ..)| kind == self) {
            return (*n).to_string();
        }
        if let Some((_, n)) = NAMED_COUNTERS.iter().find(|(kind, _)| kind == self) {
            return (*n).to_string();
        }
        match self {
            CounterType::Keyword(k) => k.name().to_ascii_lowercase(),
            CounterType::Named(n) => n.clone(),
            _ => String::new(),
        }
    }
}

impl std::fmt::Display for CounterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_bonus() {
        assert_eq!(CounterType::PlusOnePlusOne.pt_bonus(), Some((1, 1)));
        assert_eq!(CounterType::MinusTwoMinusOne.pt_bonus(), Some((-2, -1)));
        assert_eq!(CounterType::Time.pt_bonus(), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CounterType::from_name("+1/+1"), CounterType::PlusOnePlusOne);
        assert_eq!(CounterType::from_name("Time"), CounterType::Time);
        assert_eq!(
            CounterType::from_name("flying"),
            CounterType::Keyword(Keyword::Flying)
        );
        assert_eq!(
            CounterType::from_name("oil"),
            CounterType::Named("oil".into())
        );
    }

    #[test]
    fn test_names_round_trip() {
        for (kind, ..) in PT_COUNTERS {
            assert_eq!(&CounterType::from_name(&kind.name()), kind);
        }
        for (kind, _) in NAMED_COUNTERS {
            assert_eq!(&CounterType::from_name(&kind.name()), kind);
        }
        assert_eq!(CounterType::Keyword(Keyword::FirstStrike).to_string(), "first strike");
    }
}
