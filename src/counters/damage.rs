//! Turn-scoped damage bookkeeping.
//!
//! Marked damage stays on a permanent until cleanup; per-source totals
//! answer "was this dealt damage by X this turn" questions. Everything
//! here is reset by [`DamageLedger::clear_turn`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::ObjectId;

/// Combat and non-combat totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTotals {
    pub combat: u32,
    pub noncombat: u32,
}

impl DamageTotals {
    #[must_use]
    pub fn total(self) -> u32 {
        self.combat.saturating_add(self.noncombat)
    }

    fn record(&mut self, amount: u32, is_combat: bool) {
        let slot = if is_combat {
            &mut self.combat
        } else {
            &mut self.noncombat
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Damage received and dealt by one object this turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageLedger {
    marked: u32,
    assigned: u32,
    deathtouch: bool,
    received: FxHashMap<ObjectId, DamageTotals>,
    dealt: DamageTotals,
}

impl DamageLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record damage received from `source` this turn.
    pub fn record_damage(&mut self, source: ObjectId, amount: u32, is_combat: bool) {
        if amount == 0 {
            return;
        }
        self.received
            .entry(source)
            .or_default()
            .record(amount, is_combat);
    }

    /// Record damage this object dealt this turn.
    pub fn record_dealt(&mut self, amount: u32, is_combat: bool) {
        self.dealt.record(amount, is_combat);
    }

    /// Mark damage on the object. `deathtouch` remembers that a source
    /// with deathtouch dealt it.
    pub fn mark(&mut self, amount: u32, deathtouch: bool) {
        self.marked = self.marked.saturating_add(amount);
        self.deathtouch |= deathtouch && amount > 0;
    }

    /// Combat damage assigned but not yet dealt.
    pub fn assign(&mut self, amount: u32) {
        self.assigned = self.assigned.saturating_add(amount);
    }

    pub fn clear_assigned(&mut self) {
        self.assigned = 0;
    }

    #[must_use]
    pub fn marked(&self) -> u32 {
        self.marked
    }

    #[must_use]
    pub fn assigned(&self) -> u32 {
        self.assigned
    }

    /// Whether damage from a deathtouch source is marked.
    #[must_use]
    pub fn has_deathtouch_damage(&self) -> bool {
        self.deathtouch
    }

    #[must_use]
    pub fn received_from(&self, source: ObjectId) -> DamageTotals {
        self.received.get(&source).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total_received(&self) -> DamageTotals {
        self.received
            .values()
            .fold(DamageTotals::default(), |acc, t| DamageTotals {
                combat: acc.combat.saturating_add(t.combat),
                noncombat: acc.noncombat.saturating_add(t.noncombat),
            })
    }

    #[must_use]
    pub fn dealt(&self) -> DamageTotals {
        self.dealt
    }

    /// Sources that dealt damage to this object this turn.
    #[must_use]
    pub fn sources(&self) -> Vec<ObjectId> {
        let mut sources: Vec<ObjectId> = self.received.keys().copied().collect();
        sources.sort();
        sources
    }

    /// Reset at end of turn.
    pub fn clear_turn(&mut self) {
        *self = Self::default();
    }
}
