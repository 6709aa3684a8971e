//! Conditions on compiled behaviors.
//!
//! A condition gates a trigger ("if it has no time counters"), a static
//! ability ("as long as it's paired") or a branch of an effect program.
//! The crate does not know the game state, so evaluation asks a
//! [`ConditionFacts`] implementation supplied by the host.

use serde::{Deserialize, Serialize};

use crate::core::Zone;
use crate::counters::CounterType;

/// Comparison operator for numeric conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    AtLeast,
    AtMost,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, left: u32, right: u32) -> bool {
        match self {
            Comparison::Equal => left == right,
            Comparison::AtLeast => left >= right,
            Comparison::AtMost => left <= right,
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Comparison::Equal => "EQ",
            Comparison::AtLeast => "GE",
            Comparison::AtMost => "LE",
        }
    }
}

/// A condition on the host object or the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Counters of a type on the host compared to a value.
    CounterCount {
        counter: CounterType,
        cmp: Comparison,
        value: u32,
    },

    /// An opponent was dealt damage this turn (Bloodthirst, Spectacle).
    OpponentDamagedThisTurn,

    /// The host was cast paying a named alternative or additional cost
    /// ("Kicked", "Evoked", "Dashed").
    Paid(String),

    /// The host was cast from a zone.
    CastFrom(Zone),

    /// Some object matching a host-defined filter exists.
    IsPresent(String),

    /// The host is face down.
    FaceDown,

    // === Combinators ===
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),

    #[default]
    Always,

    /// Evaluated by host code.
    Custom(String),
}

impl Condition {
    /// "Has no <counter> counters on it".
    #[must_use]
    pub fn no_counters(counter: CounterType) -> Self {
        Self::CounterCount {
            counter,
            cmp: Comparison::Equal,
            value: 0,
        }
    }

    /// "Has at least one <counter> counter on it".
    #[must_use]
    pub fn has_counters(counter: CounterType) -> Self {
        Self::CounterCount {
            counter,
            cmp: Comparison::AtLeast,
            value: 1,
        }
    }

    #[must_use]
    pub fn paid(name: impl Into<String>) -> Self {
        Self::Paid(name.into())
    }

    #[must_use]
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    #[must_use]
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::Always => other,
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    #[must_use]
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }

    /// Check the condition against host-supplied facts.
    pub fn evaluate(&self, facts: &dyn ConditionFacts) -> bool {
        match self {
            Condition::CounterCount {
                counter,
                cmp,
                value,
            } => cmp.holds(facts.counters(counter), *value),
            Condition::OpponentDamagedThisTurn => facts.opponent_damaged_this_turn(),
            Condition::Paid(name) => facts.paid(name),
            Condition::CastFrom(zone) => facts.cast_from() == Some(*zone),
            Condition::IsPresent(filter) => facts.is_present(filter),
            Condition::FaceDown => facts.face_down(),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(facts)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(facts)),
            Condition::Not(inner) => !inner.evaluate(facts),
            Condition::Always => true,
            Condition::Custom(name) => facts.custom(name),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::CounterCount {
                counter,
                cmp,
                value,
            } => write!(f, "Counters${}_{}{}", counter, cmp.symbol(), value),
            Condition::OpponentDamagedThisTurn => f.write_str("OppDamagedThisTurn"),
            Condition::Paid(name) => write!(f, "Paid${}", name),
            Condition::CastFrom(zone) => write!(f, "CastFrom${}", zone),
            Condition::IsPresent(filter) => write!(f, "IsPresent${}", filter),
            Condition::FaceDown => f.write_str("FaceDown"),
            Condition::All(cs) | Condition::Any(cs) => {
                let sep = if matches!(self, Condition::All(_)) { " & " } else { " | " };
                let parts: Vec<String> = cs.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(sep))
            }
            Condition::Not(inner) => write!(f, "!{}", inner),
            Condition::Always => f.write_str("True"),
            Condition::Custom(name) => write!(f, "Custom${}", name),
        }
    }
}

/// Game facts a condition may ask about, answered by the host.
///
/// Every method has a conservative default so hosts implement only what
/// their content uses.
pub trait ConditionFacts {
    fn counters(&self, _counter: &CounterType) -> u32 {
        0
    }

    fn opponent_damaged_this_turn(&self) -> bool {
        false
    }

    fn paid(&self, _name: &str) -> bool {
        false
    }

    fn cast_from(&self) -> Option<Zone> {
        None
    }

    fn is_present(&self, _filter: &str) -> bool {
        false
    }

    fn face_down(&self) -> bool {
        false
    }

    fn custom(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Facts {
        time: u32,
        kicked: bool,
    }

    impl ConditionFacts for Facts {
        fn counters(&self, counter: &CounterType) -> u32 {
            if *counter == CounterType::Time {
                self.time
            } else {
                0
            }
        }

        fn paid(&self, name: &str) -> bool {
            self.kicked && name == "Kicked"
        }
    }

    #[test]
    fn test_counter_conditions() {
        let facts = Facts {
            time: 0,
            kicked: false,
        };
        assert!(Condition::no_counters(CounterType::Time).evaluate(&facts));
        assert!(!Condition::has_counters(CounterType::Time).evaluate(&facts));

        let facts = Facts {
            time: 2,
            kicked: false,
        };
        assert!(Condition::has_counters(CounterType::Time).evaluate(&facts));
    }

    #[test]
    fn test_combinators() {
        let facts = Facts {
            time: 1,
            kicked: true,
        };
        let cond = Condition::paid("Kicked").and(Condition::has_counters(CounterType::Time));
        assert!(cond.evaluate(&facts));
        assert!(!cond.clone().negate().evaluate(&facts));

        let either = Condition::OpponentDamagedThisTurn.or(Condition::paid("Kicked"));
        assert!(either.evaluate(&facts));
        assert!(!Condition::OpponentDamagedThisTurn.evaluate(&facts));
    }

    #[test]
    fn test_and_with_always_collapses() {
        let cond = Condition::Always.and(Condition::FaceDown);
        assert_eq!(cond, Condition::FaceDown);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Condition::no_counters(CounterType::Time).to_string(),
            "Counters$time_EQ0"
        );
        assert_eq!(Condition::paid("Kicked").negate().to_string(), "!Paid$Kicked");
    }
}
