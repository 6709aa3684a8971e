//! Timestamps for continuous modifications.
//!
//! Every modification record is stamped by the host engine from a single
//! monotonic allocator. This crate never invents timestamps; it only
//! orders and looks records up by them.

use serde::{Deserialize, Serialize};

/// Position of an effect in the game's global timestamp order.
///
/// Also used as the handle for "this specific effect's edit" when the
/// effect ends and removes its record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a new timestamp.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Monotonic timestamp allocator owned by the host engine.
pub trait TimestampSource {
    /// Allocate the next timestamp. Must be strictly greater than every
    /// timestamp returned before.
    fn next_timestamp(&mut self) -> Timestamp;
}

/// Simple counter-backed allocator for hosts without their own clock.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MonotonicClock {
    next: u64,
}

impl MonotonicClock {
    /// Create a clock whose first timestamp is `@1`.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Create a clock resuming after `last`.
    #[must_use]
    pub fn resume_after(last: Timestamp) -> Self {
        Self { next: last.0 + 1 }
    }

    /// Peek at the value the next call will return.
    #[must_use]
    pub fn peek(&self) -> Timestamp {
        Timestamp(self.next.max(1))
    }
}

impl TimestampSource for MonotonicClock {
    fn next_timestamp(&mut self) -> Timestamp {
        let ts = self.peek();
        self.next = ts.0 + 1;
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = MonotonicClock::new();
        let a = clock.next_timestamp();
        let b = clock.next_timestamp();
        let c = clock.next_timestamp();
        assert!(a < b && b < c);
        assert_eq!(a, Timestamp(1));
    }

    #[test]
    fn test_default_clock_skips_zero() {
        let mut clock = MonotonicClock::default();
        assert_eq!(clock.next_timestamp(), Timestamp(1));
    }

    #[test]
    fn test_resume_after() {
        let mut clock = MonotonicClock::resume_after(Timestamp(41));
        assert_eq!(clock.peek(), Timestamp(42));
        assert_eq!(clock.next_timestamp(), Timestamp(42));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Timestamp(5)), "@5");
    }
}
