//! Keyword compiler integration tests.
//!
//! Any parsed keyword, expanded any number of times, must retract
//! cleanly.

use proptest::prelude::*;

use ccg_layers::behavior::{expand, retract, BehaviorKind, ScriptFactory, VarValue};
use ccg_layers::core::ObjectId;
use ccg_layers::keywords::{Keyword, KeywordId, KeywordInstance};
use ccg_layers::object::{FaceName, Representation};

const TAGS: &[&str] = &[
    "Flying",
    "Bushido:2",
    "Rampage 1",
    "Annihilator 4",
    "Afterlife:1",
    "Modular:Sunburst",
    "Equip:2",
    "Cycling 1 U",
    "Swampcycling 2",
    "Suspend:3:1 R",
    "Amplify:1:Human,Soldier",
    "Escape:3 B B:4",
    "Kicker:1 R:2 G",
    "Flashback",
    "Flashback:3 R",
    "Cumulative upkeep:1",
    "Protection from red",
    "Champion a Faerie",
    "Undying",
    "Persist",
    "Morph:3",
    "Megamorph:5 R",
];

fn instance(id: u32, tag: &str) -> KeywordInstance {
    KeywordInstance::new(KeywordId(id), Keyword::parse(tag).unwrap())
}

#[test]
fn test_bushido_scenario() {
    let mut rep = Representation::new(FaceName::Original, "Samurai");
    let mut factory = ScriptFactory::new();
    let bushido = instance(0, "Bushido 2");

    expand(&mut rep, ObjectId(1), &bushido, true, &mut factory);
    let triggers: Vec<_> = rep.behaviors.of_kind(BehaviorKind::Trigger).collect();
    assert_eq!(triggers.len(), 2);
    assert_eq!(rep.behaviors.len(), 2);
    assert_eq!(rep.variables.get("Bushido0"), Some(&VarValue::Int(2)));
    for behavior in &triggers {
        assert!(
            behavior.recipe.effect.variables().contains(&"Bushido0"),
            "pump should read the shared magnitude"
        );
    }

    assert_eq!(retract(&mut rep, KeywordId(0), &mut factory), 2);
    assert!(rep.behaviors.is_empty());
    assert!(rep.variables.is_empty());
}

#[test]
fn test_every_tag_parses() {
    for tag in TAGS {
        assert!(Keyword::parse(tag).is_ok(), "tag '{}' should parse", tag);
    }
}

proptest! {
    /// Expanding repeatedly attaches one copy and holds one set of
    /// handles; retracting leaves nothing behind.
    #[test]
    fn expand_repeatedly_then_retract(tag in prop::sample::select(TAGS), times in 1usize..4) {
        let mut rep = Representation::new(FaceName::Original, "Subject");
        let mut factory = ScriptFactory::new();
        let keyword = instance(9, tag);

        let first = expand(&mut rep, ObjectId(1), &keyword, false, &mut factory);
        for _ in 1..times {
            prop_assert_eq!(expand(&mut rep, ObjectId(1), &keyword, false, &mut factory), first);
        }
        prop_assert_eq!(rep.behaviors.len(), first.behaviors);
        prop_assert_eq!(factory.built(), first.behaviors);

        prop_assert_eq!(retract(&mut rep, KeywordId(9), &mut factory), first.behaviors);
        prop_assert!(rep.behaviors.is_empty());
        prop_assert_eq!(factory.built(), 0);
        prop_assert!(rep.variables.is_empty());
        prop_assert_eq!(retract(&mut rep, KeywordId(9), &mut factory), 0);
    }

    /// Retracting one instance never disturbs another.
    #[test]
    fn retract_is_per_instance(a in prop::sample::select(TAGS), b in prop::sample::select(TAGS)) {
        let mut rep = Representation::new(FaceName::Original, "Subject");
        let mut factory = ScriptFactory::new();
        expand(&mut rep, ObjectId(1), &instance(0, a), true, &mut factory);
        let kept = expand(&mut rep, ObjectId(1), &instance(1, b), true, &mut factory);

        retract(&mut rep, KeywordId(0), &mut factory);
        prop_assert_eq!(rep.behaviors.len(), kept.behaviors);
        prop_assert!(rep.behaviors.iter().all(|behavior| behavior.id.origin
            == ccg_layers::behavior::Origin::Keyword(KeywordId(1))));
    }
}
