//! Property tests for the modification ledger and counter bookkeeping.
//!
//! Replay must depend on timestamps alone, and removing a record must be
//! indistinguishable from never having added it.

use proptest::prelude::*;

use ccg_layers::characteristics::{Color, ColorSet, PtValue, TypeLine};
use ccg_layers::core::Timestamp;
use ccg_layers::counters::{CounterLedger, CounterType};
use ccg_layers::keywords::{Keyword, KeywordId, KeywordInstance};
use ccg_layers::ledger::{
    ColorChange, KeywordChange, Modification, ModificationLedger, PtOverride, TypeChange,
};

const SUBTYPES: [&str; 4] = ["Goblin", "Elf", "Wall", "Zombie"];

fn colors() -> impl Strategy<Value = ColorSet> {
    (0u8..32).prop_map(|bits| {
        Color::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .fold(ColorSet::COLORLESS, |set, (_, c)| set.with(*c))
    })
}

fn record(ts: u64) -> impl Strategy<Value = Modification> {
    prop_oneof![
        (colors(), any::<bool>()).prop_map(|(colors, additive)| {
            Modification::Color(if additive {
                ColorChange::add(colors)
            } else {
                ColorChange::set(colors)
            })
        }),
        (0..SUBTYPES.len(), any::<bool>()).prop_map(|(i, add)| {
            let line = TypeLine::new().with_subtype(SUBTYPES[i]);
            Modification::Type(if add {
                TypeChange::new().adding(line)
            } else {
                TypeChange::new().removing(line)
            })
        }),
        (-3i32..8, -3i32..8, any::<bool>()).prop_map(|(p, t, cda)| {
            let change = PtOverride::set(p, t);
            Modification::PowerToughness(if cda { change.defining() } else { change })
        }),
        any::<bool>().prop_map(move |grant| {
            Modification::Keyword(if grant {
                let id = KeywordId(u32::try_from(ts).unwrap());
                KeywordChange::new().granting([KeywordInstance::new(id, Keyword::Flying)])
            } else {
                KeywordChange::new().removing(["Flying"])
            })
        }),
    ]
}

const STAMPS: std::ops::Range<u64> = 0..2000;

/// Records with distinct timestamps, in arbitrary call order.
fn shuffled_records() -> impl Strategy<Value = Vec<(Timestamp, Modification)>> {
    prop::collection::btree_set(STAMPS, 0..12)
        .prop_flat_map(|stamps| {
            stamps
                .into_iter()
                .map(|ts| record(ts).prop_map(move |m| (Timestamp(ts), m)))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

type Effective = (TypeLine, ColorSet, (i32, i32), Vec<KeywordInstance>);

fn effective(ledger: &ModificationLedger) -> Effective {
    let base = TypeLine::parse("Creature — Goblin");
    let printed = [KeywordInstance::new(KeywordId(5000), Keyword::Flying)];
    (
        ledger.effective_type(&base),
        ledger.effective_color(ColorSet::RED),
        ledger
            .effective_pt()
            .or_base(Some(PtValue::Fixed(2)), Some(PtValue::Fixed(2))),
        ledger.effective_keywords(&printed, |_| false),
    )
}

fn build(records: &[(Timestamp, Modification)]) -> ModificationLedger {
    let mut ledger = ModificationLedger::new();
    for (ts, record) in records {
        ledger.insert(*ts, record.clone());
    }
    ledger
}

proptest! {
    /// Replay order follows timestamps, never insertion order.
    #[test]
    fn replay_ignores_call_order(records in shuffled_records()) {
        let mut sorted = records.clone();
        sorted.sort_by_key(|(ts, _)| *ts);
        prop_assert_eq!(effective(&build(&records)), effective(&build(&sorted)));
    }

    /// Removing a record by timestamp equals never inserting it, wherever
    /// it falls in the order.
    #[test]
    fn removal_is_inverse(
        records in shuffled_records(),
        extra_ts in STAMPS,
        extra in record(7777),
    ) {
        prop_assume!(records.iter().all(|(ts, _)| ts.0 != extra_ts));
        let without = build(&records);
        let mut with = build(&records);
        with.insert(Timestamp(extra_ts), extra);
        let changed = with.remove_at(Timestamp(extra_ts));

        prop_assert!(!changed.is_empty());
        prop_assert_eq!(with.records(), without.records());
        prop_assert_eq!(effective(&with), effective(&without));
    }

    /// `records()` is timestamp-ordered and replays to the same state.
    #[test]
    fn records_round_trip(records in shuffled_records()) {
        let ledger = build(&records);
        let listed = ledger.records();
        prop_assert!(listed.windows(2).all(|w| w[0].0 <= w[1].0));
        prop_assert_eq!(effective(&build(&listed)), effective(&ledger));
    }

    #[test]
    fn counters_add_then_remove_restores(start in 0u32..50, n in 0i32..50) {
        let mut ledger = CounterLedger::new();
        ledger.set(CounterType::Charge, start);
        ledger.add(CounterType::Charge, n);
        ledger.remove(CounterType::Charge, n);
        prop_assert_eq!(ledger.get(&CounterType::Charge), start);
    }

    #[test]
    fn counters_never_negative(start in 0u32..20, n in 0i32..100) {
        let mut ledger = CounterLedger::new();
        ledger.set(CounterType::Time, start);
        let delta = ledger.remove(CounterType::Time, n);
        prop_assert_eq!(delta.before, start);
        prop_assert_eq!(delta.after, start.saturating_sub(n.unsigned_abs()));
    }

    #[test]
    fn negative_add_is_zero_add(start in 0u32..20, n in 1i32..100) {
        let mut a = CounterLedger::new();
        let mut b = CounterLedger::new();
        a.set(CounterType::PlusOnePlusOne, start);
        b.set(CounterType::PlusOnePlusOne, start);
        prop_assert_eq!(
            a.add(CounterType::PlusOnePlusOne, -n),
            b.add(CounterType::PlusOnePlusOne, 0)
        );
        prop_assert_eq!(a, b);
    }
}
