//! The modification ledger and its replay rules.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::log::TimestampLog;
use super::records::{ColorChange, KeywordChange, Modification, PtOverride, PtPair, TypeChange};
use crate::characteristics::{ColorSet, TypeLine};
use crate::core::Timestamp;
use crate::error::Result;
use crate::hooks::ChangeSet;
use crate::keywords::{Keyword, KeywordId, KeywordInstance};

/// Every active continuous edit to one object's characteristics.
///
/// The ledger only stores records. Effective values are recomputed from
/// scratch on every query by replaying the records of one kind in
/// timestamp order; nothing is cached.
///
/// ```
/// use ccg_layers::characteristics::ColorSet;
/// use ccg_layers::core::Timestamp;
/// use ccg_layers::ledger::{ColorChange, ModificationLedger};
///
/// let mut ledger = ModificationLedger::new();
/// ledger.add_color_change(Timestamp(2), ColorChange::add(ColorSet::BLUE));
/// ledger.add_color_change(Timestamp(1), ColorChange::set(ColorSet::RED));
///
/// let colors = ledger.effective_color(ColorSet::GREEN);
/// assert_eq!(colors, ColorSet::RED.union(ColorSet::BLUE));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationLedger {
    types: TimestampLog<TypeChange>,
    colors: TimestampLog<ColorChange>,
    keywords: TimestampLog<KeywordChange>,
    pt: TimestampLog<PtOverride>,
}

impl ModificationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Type ===

    /// Record a type change. Returns the record it replaced at `ts`.
    pub fn add_type_change(&mut self, ts: Timestamp, change: TypeChange) -> Option<TypeChange> {
        trace!(ts = %ts, "type change added");
        self.types.insert(ts, change)
    }

    pub fn remove_type_change(&mut self, ts: Timestamp) -> Option<TypeChange> {
        trace!(ts = %ts, "type change removed");
        self.types.remove(ts)
    }

    /// Replay type changes over `base`.
    #[must_use]
    pub fn effective_type(&self, base: &TypeLine) -> TypeLine {
        let mut line = base.clone();
        for change in self.types.values() {
            change.apply(&mut line);
        }
        line
    }

    // === Color ===

    pub fn add_color_change(&mut self, ts: Timestamp, change: ColorChange) -> Option<ColorChange> {
        trace!(ts = %ts, additive = change.additive, "color change added");
        self.colors.insert(ts, change)
    }

    /// Record a color change written as color names.
    ///
    /// An unrecognized name fails with `InvalidColor` and leaves the
    /// ledger untouched.
    pub fn add_color_names(&mut self, ts: Timestamp, names: &str, additive: bool) -> Result<()> {
        let change = ColorChange::from_names(names, additive)?;
        self.add_color_change(ts, change);
        Ok(())
    }

    pub fn remove_color_change(&mut self, ts: Timestamp) -> Option<ColorChange> {
        trace!(ts = %ts, "color change removed");
        self.colors.remove(ts)
    }

    /// Replay color changes over `base`. A non-additive record replaces
    /// the running value; later additive records still layer on top.
    #[must_use]
    pub fn effective_color(&self, base: ColorSet) -> ColorSet {
        self.colors.values().fold(base, |colors, change| change.apply(colors))
    }

    // === Keywords ===

    pub fn add_keyword_change(
        &mut self,
        ts: Timestamp,
        change: KeywordChange,
    ) -> Option<KeywordChange> {
        trace!(ts = %ts, added = change.add.len(), "keyword change added");
        self.keywords.insert(ts, change)
    }

    pub fn remove_keyword_change(&mut self, ts: Timestamp) -> Option<KeywordChange> {
        trace!(ts = %ts, "keyword change removed");
        self.keywords.remove(ts)
    }

    #[must_use]
    pub fn keyword_change(&self, ts: Timestamp) -> Option<&KeywordChange> {
        self.keywords.get(ts)
    }

    /// Replay keyword changes over the printed keywords.
    ///
    /// `forbidden` filters keyword additions only; printed keywords are
    /// not affected by it.
    #[must_use]
    pub fn effective_keywords(
        &self,
        intrinsic: &[KeywordInstance],
        forbidden: impl Fn(&Keyword) -> bool,
    ) -> Vec<KeywordInstance> {
        let start_empty = self.keywords.values().any(|c| c.remove_intrinsic);
        let mut set: Vec<KeywordInstance> = if start_empty {
            Vec::new()
        } else {
            intrinsic.to_vec()
        };
        let mut removed: Vec<KeywordId> = Vec::new();

        for change in self.keywords.values() {
            if change.remove_all {
                set.clear();
            }
            if !change.remove.is_empty() {
                set.retain(|k| !change.remove.iter().any(|name| k.matches(name)));
            }
            set.extend(
                change
                    .add
                    .iter()
                    .filter(|k| !forbidden(&k.keyword))
                    .cloned(),
            );
            removed.extend(change.remove_instances.iter().copied());
        }

        if !removed.is_empty() {
            set.retain(|k| !removed.contains(&k.id));
        }
        set
    }

    /// Every instance granted by an active record, in timestamp order,
    /// whether or not replay currently keeps it.
    pub fn granted_instances(&self) -> impl Iterator<Item = &KeywordInstance> {
        self.keywords.values().flat_map(|c| c.add.iter())
    }

    // === Power/toughness ===

    pub fn add_pt_override(&mut self, ts: Timestamp, change: PtOverride) -> Option<PtOverride> {
        trace!(
            ts = %ts,
            defining = change.characteristic_defining,
            "power/toughness override added"
        );
        self.pt.insert(ts, change)
    }

    pub fn remove_pt_override(&mut self, ts: Timestamp) -> Option<PtOverride> {
        trace!(ts = %ts, "power/toughness override removed");
        self.pt.remove(ts)
    }

    /// Replay overrides: characteristic-defining ones first, then the
    /// rest, each in timestamp order with the last value per axis winning.
    #[must_use]
    pub fn effective_pt(&self) -> PtPair {
        let defining = self.pt.values().filter(|o| o.characteristic_defining);
        let ordinary = self.pt.values().filter(|o| !o.characteristic_defining);
        defining.chain(ordinary).fold(PtPair::default(), |pair, o| PtPair {
            power: o.power.or(pair.power),
            toughness: o.toughness.or(pair.toughness),
        })
    }

    // === Whole-ledger operations ===

    /// Remove every record of every kind stamped `ts`. Returns the
    /// aspects that had a record there.
    pub fn remove_at(&mut self, ts: Timestamp) -> ChangeSet {
        let mut changed = ChangeSet::EMPTY;
        if self.types.remove(ts).is_some() {
            changed |= ChangeSet::TYPE;
        }
        if self.colors.remove(ts).is_some() {
            changed |= ChangeSet::COLOR;
        }
        if self.keywords.remove(ts).is_some() {
            changed |= ChangeSet::KEYWORDS;
        }
        if self.pt.remove(ts).is_some() {
            changed |= ChangeSet::POWER_TOUGHNESS;
        }
        trace!(ts = %ts, changed = %changed, "records removed");
        changed
    }

    /// Insert a record of any kind (used to restore persisted state).
    pub fn insert(&mut self, ts: Timestamp, record: Modification) -> ChangeSet {
        match record {
            Modification::Type(c) => {
                self.add_type_change(ts, c);
                ChangeSet::TYPE
            }
            Modification::Color(c) => {
                self.add_color_change(ts, c);
                ChangeSet::COLOR
            }
            Modification::Keyword(c) => {
                self.add_keyword_change(ts, c);
                ChangeSet::KEYWORDS
            }
            Modification::PowerToughness(c) => {
                self.add_pt_override(ts, c);
                ChangeSet::POWER_TOUGHNESS
            }
        }
    }

    /// All records in timestamp order. Records sharing a timestamp come
    /// in the order type, color, keyword, power/toughness.
    #[must_use]
    pub fn records(&self) -> Vec<(Timestamp, Modification)> {
        let mut all: Vec<(Timestamp, u8, Modification)> = Vec::with_capacity(self.len());
        all.extend(self.types.iter().map(|(ts, c)| (ts, 0, Modification::Type(c.clone()))));
        all.extend(self.colors.iter().map(|(ts, c)| (ts, 1, Modification::Color(*c))));
        all.extend(
            self.keywords
                .iter()
                .map(|(ts, c)| (ts, 2, Modification::Keyword(c.clone()))),
        );
        all.extend(
            self.pt
                .iter()
                .map(|(ts, c)| (ts, 3, Modification::PowerToughness(*c))),
        );
        all.sort_by_key(|(ts, kind, _)| (*ts, *kind));
        all.into_iter().map(|(ts, _, m)| (ts, m)).collect()
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len() + self.colors.len() + self.keywords.len() + self.pt.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristics::{CardType, Color};
    use crate::keywords::KeywordIdAllocator;
    use crate::ledger::RemoveClasses;

    fn ts(n: u64) -> Timestamp {
        Timestamp(n)
    }

    #[test]
    fn test_no_records_returns_base() {
        let ledger = ModificationLedger::new();
        let base = TypeLine::parse("Creature — Bear");
        assert_eq!(ledger.effective_type(&base), base);
        assert_eq!(ledger.effective_color(ColorSet::GREEN), ColorSet::GREEN);
        assert_eq!(ledger.effective_pt(), PtPair::default());
    }

    #[test]
    fn test_type_changes_replay_in_timestamp_order() {
        let mut ledger = ModificationLedger::new();
        // Inserted out of order: the later timestamp strips subtypes the
        // earlier one added.
        ledger.add_type_change(
            ts(5),
            TypeChange::new().removing_classes(RemoveClasses {
                creature_types: true,
                ..RemoveClasses::none()
            }),
        );
        ledger.add_type_change(ts(2), TypeChange::new().adding(TypeLine::new().with_subtype("Elf")));

        let line = ledger.effective_type(&TypeLine::parse("Creature — Bear"));
        assert!(line.has_card_type(CardType::Creature));
        assert!(line.subtypes.is_empty());
    }

    #[test]
    fn test_color_set_then_add() {
        let mut ledger = ModificationLedger::new();
        ledger.add_color_change(ts(1), ColorChange::set(ColorSet::RED));
        ledger.add_color_change(ts(2), ColorChange::add(ColorSet::BLUE));
        ledger.add_color_change(ts(3), ColorChange::set(ColorSet::WHITE));
        ledger.add_color_change(ts(4), ColorChange::add(ColorSet::BLACK));
        let colors = ledger.effective_color(ColorSet::GREEN);
        assert!(colors.contains(Color::White));
        assert!(colors.contains(Color::Black));
        assert!(!colors.contains(Color::Red));
        assert!(!colors.contains(Color::Green));
    }

    #[test]
    fn test_invalid_color_name_leaves_ledger_untouched() {
        let mut ledger = ModificationLedger::new();
        let err = ledger.add_color_names(ts(1), "red, ochre", false).unwrap_err();
        assert_eq!(err, crate::error::CardError::InvalidColor("ochre".into()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_keyword_replay() {
        let mut alloc = KeywordIdAllocator::new();
        let flying = alloc.instance(Keyword::Flying);
        let reach = alloc.instance(Keyword::Reach);
        let trample = alloc.instance(Keyword::Trample);

        let mut ledger = ModificationLedger::new();
        ledger.add_keyword_change(ts(1), KeywordChange::new().granting([trample.clone()]));
        ledger.add_keyword_change(ts(2), KeywordChange::new().removing(["flying"]));

        let set = ledger.effective_keywords(&[flying.clone(), reach.clone()], |_| false);
        assert_eq!(set, vec![reach.clone(), trample.clone()]);

        ledger.add_keyword_change(ts(3), KeywordChange::new().removing_all());
        assert!(ledger.effective_keywords(&[flying, reach], |_| false).is_empty());
    }

    #[test]
    fn test_remove_intrinsic_starts_empty() {
        let mut alloc = KeywordIdAllocator::new();
        let flying = alloc.instance(Keyword::Flying);
        let haste = alloc.instance(Keyword::Haste);

        let mut ledger = ModificationLedger::new();
        ledger.add_keyword_change(ts(1), KeywordChange::new().granting([haste.clone()]));
        ledger.add_keyword_change(ts(2), KeywordChange::new().removing_intrinsic());
        assert_eq!(ledger.effective_keywords(&[flying], |_| false), vec![haste]);
    }

    #[test]
    fn test_remove_instance_by_identity() {
        let mut alloc = KeywordIdAllocator::new();
        let first = alloc.instance(Keyword::Flying);
        let second = alloc.instance(Keyword::Flying);

        let mut ledger = ModificationLedger::new();
        ledger.add_keyword_change(
            ts(1),
            KeywordChange::new().granting([first.clone(), second.clone()]),
        );
        ledger.add_keyword_change(ts(2), KeywordChange::new().removing_instances([first.id]));
        assert_eq!(ledger.effective_keywords(&[], |_| false), vec![second]);
    }

    #[test]
    fn test_forbidden_filters_adds_only() {
        let mut alloc = KeywordIdAllocator::new();
        let printed = alloc.instance(Keyword::Flying);
        let granted = alloc.instance(Keyword::Flying);

        let mut ledger = ModificationLedger::new();
        ledger.add_keyword_change(ts(1), KeywordChange::new().granting([granted]));
        let set = ledger.effective_keywords(&[printed.clone()], |k| *k == Keyword::Flying);
        assert_eq!(set, vec![printed]);
    }

    #[test]
    fn test_defining_override_replays_first() {
        let mut ledger = ModificationLedger::new();
        ledger.add_pt_override(ts(5), PtOverride::set(0, 0).defining());
        ledger.add_pt_override(ts(3), PtOverride::set(3, 3));
        assert_eq!(
            ledger.effective_pt(),
            PtPair {
                power: Some(3),
                toughness: Some(3)
            }
        );
    }

    #[test]
    fn test_pt_axes_independent() {
        let mut ledger = ModificationLedger::new();
        ledger.add_pt_override(ts(1), PtOverride::set(4, 4));
        ledger.add_pt_override(ts(2), PtOverride::power(1));
        assert_eq!(
            ledger.effective_pt(),
            PtPair {
                power: Some(1),
                toughness: Some(4)
            }
        );
    }

    #[test]
    fn test_remove_at_every_kind() {
        let mut ledger = ModificationLedger::new();
        ledger.add_color_change(ts(7), ColorChange::set(ColorSet::RED));
        ledger.add_pt_override(ts(7), PtOverride::set(1, 1));
        ledger.add_pt_override(ts(8), PtOverride::set(2, 2));

        let changed = ledger.remove_at(ts(7));
        assert_eq!(changed, ChangeSet::COLOR | ChangeSet::POWER_TOUGHNESS);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.remove_at(ts(7)), ChangeSet::EMPTY);
    }

    #[test]
    fn test_records_restore() {
        let mut ledger = ModificationLedger::new();
        ledger.add_pt_override(ts(2), PtOverride::set(1, 1));
        ledger.add_color_change(ts(2), ColorChange::set(ColorSet::RED));
        ledger.add_type_change(ts(1), TypeChange::new());

        let records = ledger.records();
        assert_eq!(records[0].0, ts(1));
        assert_eq!(records[1].1.kind_name(), "color");
        assert_eq!(records[2].1.kind_name(), "power_toughness");

        let mut restored = ModificationLedger::new();
        for (t, record) in records {
            restored.insert(t, record);
        }
        assert_eq!(restored, ledger);
    }
}
