//! Timestamp-ordered logs.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// An ordered log of values keyed by timestamp.
///
/// Iteration is always in timestamp order, whatever order the values were
/// inserted in. Backed by a persistent map, so cloning an object's whole
/// ledger is cheap. Values are boxed to keep map nodes small.
///
/// ```
/// use ccg_layers::core::Timestamp;
/// use ccg_layers::ledger::TimestampLog;
///
/// let mut log = TimestampLog::new();
/// log.insert(Timestamp(7), "late");
/// log.insert(Timestamp(3), "early");
/// let order: Vec<_> = log.values().copied().collect();
/// assert_eq!(order, vec!["early", "late"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de> + Clone"
))]
pub struct TimestampLog<T: Clone> {
    entries: OrdMap<Timestamp, Box<T>>,
}

impl<T: Clone> Default for TimestampLog<T> {
    fn default() -> Self {
        Self {
            entries: OrdMap::new(),
        }
    }
}

impl<T: Clone> TimestampLog<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. A value already at `ts` is replaced and returned.
    pub fn insert(&mut self, ts: Timestamp, value: T) -> Option<T> {
        self.entries.insert(ts, Box::new(value)).map(|old| *old)
    }

    /// Remove the value at `ts`, if any.
    pub fn remove(&mut self, ts: Timestamp) -> Option<T> {
        self.entries.remove(&ts).map(|old| *old)
    }

    #[must_use]
    pub fn get(&self, ts: Timestamp) -> Option<&T> {
        self.entries.get(&ts).map(Box::as_ref)
    }

    #[must_use]
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.entries.contains_key(&ts)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, &T)> {
        self.entries.iter().map(|(ts, v)| (*ts, v.as_ref()))
    }

    /// Values in timestamp order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(Box::as_ref)
    }

    /// Timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.entries.keys().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_timestamp() {
        let mut log = TimestampLog::new();
        assert_eq!(log.insert(Timestamp(1), 10), None);
        assert_eq!(log.insert(Timestamp(1), 20), Some(10));
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(Timestamp(1)), Some(&20));
    }

    #[test]
    fn test_remove() {
        let mut log = TimestampLog::new();
        log.insert(Timestamp(2), 'b');
        log.insert(Timestamp(1), 'a');
        assert_eq!(log.remove(Timestamp(2)), Some('b'));
        assert_eq!(log.remove(Timestamp(2)), None);
        assert!(!log.contains(Timestamp(2)));
        assert_eq!(log.timestamps().collect::<Vec<_>>(), vec![Timestamp(1)]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = TimestampLog::new();
        a.insert(Timestamp(1), 1);
        let mut b = a.clone();
        b.insert(Timestamp(2), 2);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }
}
