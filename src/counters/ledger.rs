//! Per-type counter counts.
//!
//! Counts are non-negative. A negative amount passed to `add` is treated
//! as zero; `remove` clamps at zero. Both return a [`CounterDelta`] with
//! the count before and after, which the owning object uses to dispatch
//! one trigger per unit.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::kind::CounterType;
use crate::keywords::Keyword;

/// The effect of one add or remove on a single counter type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDelta {
    pub counter: CounterType,
    pub before: u32,
    pub after: u32,
}

impl CounterDelta {
    fn unchanged(counter: CounterType, count: u32) -> Self {
        Self {
            counter,
            before: count,
            after: count,
        }
    }

    /// Number of counters added (or removed, for a removal).
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.after.abs_diff(self.before)
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Counter counts for one object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterLedger {
    counts: FxHashMap<CounterType, u32>,
}

impl CounterLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count of a counter type (0 if none).
    #[must_use]
    pub fn get(&self, counter: &CounterType) -> u32 {
        self.counts.get(counter).copied().unwrap_or(0)
    }

    /// Add counters. Negative amounts add nothing.
    pub fn add(&mut self, counter: CounterType, amount: i32) -> CounterDelta {
        let before = self.get(&counter);
        let amount = u32::try_from(amount).unwrap_or(0);
        if amount == 0 {
            return CounterDelta::unchanged(counter, before);
        }
        let after = before.saturating_add(amount);
        self.counts.insert(counter.clone(), after);
        CounterDelta {
            counter,
            before,
            after,
        }
    }

    /// Remove counters, never going below zero.
    pub fn remove(&mut self, counter: CounterType, amount: i32) -> CounterDelta {
        let before = self.get(&counter);
        let amount = u32::try_from(amount).unwrap_or(0);
        let after = before.saturating_sub(amount);
        if after == before {
            return CounterDelta::unchanged(counter, before);
        }
        if after == 0 {
            self.counts.remove(&counter);
        } else {
            self.counts.insert(counter.clone(), after);
        }
        CounterDelta {
            counter,
            before,
            after,
        }
    }

    /// Set a count directly (used when restoring a snapshot).
    pub fn set(&mut self, counter: CounterType, count: u32) {
        if count == 0 {
            self.counts.remove(&counter);
        } else {
            self.counts.insert(counter, count);
        }
    }

    /// Remove every counter, returning what was there.
    pub fn clear(&mut self) -> Vec<(CounterType, u32)> {
        self.counts.drain().collect()
    }

    /// Iterate non-zero counts in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&CounterType, u32)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counters of all types.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Combined power/toughness contribution of all P/T counters.
    #[must_use]
    pub fn pt_bonus(&self) -> (i32, i32) {
        self.iter().fold((0, 0), |(p, t), (counter, n)| {
            let n = i32::try_from(n).unwrap_or(i32::MAX);
            match counter.pt_bonus() {
                Some((dp, dt)) => (
                    p.saturating_add(dp.saturating_mul(n)),
                    t.saturating_add(dt.saturating_mul(n)),
                ),
                None => (p, t),
            }
        })
    }

    /// Keywords granted by keyword counters currently present.
    #[must_use]
    pub fn keyword_grants(&self) -> Vec<Keyword> {
        let mut grants: Vec<Keyword> = self
            .counts
            .keys()
            .filter_map(|c| c.granted_keyword().cloned())
            .collect();
        grants.sort_by(|a, b| a.name().cmp(b.name()));
        grants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut ledger = CounterLedger::new();
        let delta = ledger.add(CounterType::PlusOnePlusOne, 3);
        assert_eq!((delta.before, delta.after), (0, 3));
        assert_eq!(delta.amount(), 3);

        let delta = ledger.remove(CounterType::PlusOnePlusOne, 2);
        assert_eq!((delta.before, delta.after), (3, 1));
        assert_eq!(ledger.get(&CounterType::PlusOnePlusOne), 1);
    }

    #[test]
    fn test_negative_add_is_zero() {
        let mut ledger = CounterLedger::new();
        let delta = ledger.add(CounterType::Time, -5);
        assert!(delta.is_noop());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let mut ledger = CounterLedger::new();
        ledger.add(CounterType::Time, 2);
        let delta = ledger.remove(CounterType::Time, 10);
        assert_eq!((delta.before, delta.after), (2, 0));
        assert_eq!(delta.amount(), 2);
        assert!(ledger.is_empty());

        let delta = ledger.remove(CounterType::Time, 1);
        assert!(delta.is_noop());
    }

    #[test]
    fn test_pt_bonus() {
        let mut ledger = CounterLedger::new();
        ledger.add(CounterType::PlusOnePlusOne, 2);
        ledger.add(CounterType::MinusOneMinusOne, 1);
        ledger.add(CounterType::PlusOnePlusZero, 1);
        ledger.add(CounterType::Charge, 4);
        assert_eq!(ledger.pt_bonus(), (2, 1));
        assert_eq!(ledger.total(), 8);
    }

    #[test]
    fn test_keyword_grants() {
        let mut ledger = CounterLedger::new();
        ledger.add(CounterType::Keyword(Keyword::Trample), 1);
        ledger.add(CounterType::Keyword(Keyword::Flying), 1);
        assert_eq!(ledger.keyword_grants(), vec![Keyword::Flying, Keyword::Trample]);
    }
}
