//! Activated-ability templates.

use super::{gain_keyword, plus_one_counters, with_magnitude, Plan};
use crate::behavior::effect::{Amount, Duration, Effect, EntryModifier, Subject};
use crate::behavior::recipe::{Activation, Recipe};
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;
use crate::keywords::Keyword;

/// Exile the host from the graveyard as part of the cost.
fn exile_self(cost: &Cost) -> Cost {
    cost.clone().with_action("ExileFromGrave", &["1", "Card.Self"])
}

fn discard_self(cost: &Cost) -> Cost {
    cost.clone().with_action("Discard", &["1", "Card.Self"])
}

fn graveyard_sorcery(cost: Cost) -> Activation {
    Activation::new(cost).from_zone(Zone::Graveyard).sorcery()
}

fn token_copy(except: &str, modifiers: Vec<EntryModifier>) -> Effect {
    Effect::TokenCopy {
        subject: Subject::This,
        amount: Amount::Fixed(1),
        except: except.to_string(),
        modifiers,
    }
}

pub(super) fn plan(keyword: &Keyword, var: &str) -> Option<Plan> {
    use Keyword as K;
    let plan = match keyword {
        K::Equip { cost, restriction } => {
            let (filter, description) = match restriction {
                Some(r) => (
                    format!("{}+YouCtrl", r.filter),
                    format!("target {} you control", r.description),
                ),
                None => (
                    "Creature.YouCtrl".to_string(),
                    "target creature you control".to_string(),
                ),
            };
            Plan::new().with(Recipe::activated(
                Activation::new(cost.clone()).sorcery(),
                Effect::Attach {
                    to: Subject::target(filter, description),
                },
            ))
        }
        K::Fortify(cost) => Plan::new().with(Recipe::activated(
            Activation::new(cost.clone()).sorcery(),
            Effect::Attach {
                to: Subject::target("Land.YouCtrl", "target land you control"),
            },
        )),
        K::Reconfigure(cost) => Plan::new()
            .with(Recipe::activated(
                Activation::new(cost.clone()).sorcery(),
                Effect::Attach {
                    to: Subject::target("Creature.Other+YouCtrl", "target creature you control"),
                },
            ))
            .with(Recipe::activated(
                Activation::new(cost.clone()).sorcery(),
                Effect::SetFlag {
                    name: "Unattach".into(),
                },
            )),
        K::Cycling(cost) => Plan::new().with(Recipe::activated(
            Activation::new(discard_self(cost)).from_zone(Zone::Hand),
            Effect::draw(1),
        )),
        K::Typecycling { kind, cost } => Plan::new().with(Recipe::activated(
            Activation::new(discard_self(cost)).from_zone(Zone::Hand),
            Effect::move_to(
                Subject::target(kind.clone(), format!("a {} card", kind)),
                Some(Zone::Library),
                Zone::Hand,
            ),
        )),
        K::Transmute(cost) => Plan::new().with(Recipe::activated(
            Activation::new(discard_self(cost))
                .from_zone(Zone::Hand)
                .sorcery(),
            Effect::move_to(
                Subject::target(
                    "Card.cmcEQSelfCMC",
                    "a card with the same mana value as the discarded card",
                ),
                Some(Zone::Library),
                Zone::Hand,
            ),
        )),
        K::Outlast(cost) => Plan::new().with(Recipe::activated(
            Activation::new(cost.clone().with_tap()).sorcery(),
            plus_one_counters(Subject::This, 1),
        )),
        K::LevelUp(cost) => Plan::new().with(Recipe::activated(
            Activation::new(cost.clone()).sorcery(),
            Effect::put_counters(Subject::This, CounterType::Level, 1),
        )),
        K::Scavenge(cost) => Plan::new().with(Recipe::activated(
            graveyard_sorcery(exile_self(cost)),
            plus_one_counters(
                Subject::target("Creature", "target creature"),
                Amount::count("ExiledCardPower"),
            ),
        )),
        K::Unearth(cost) => Plan::new().with(Recipe::activated(
            graveyard_sorcery(cost.clone()),
            Effect::batch([
                Effect::return_to_battlefield(
                    Zone::Graveyard,
                    vec![
                        EntryModifier::WithKeyword("Haste".into()),
                        EntryModifier::ExileIfLeaves,
                    ],
                ),
                Effect::delayed(
                    "EndOfTurn",
                    Effect::move_to(Subject::This, Some(Zone::Battlefield), Zone::Exile),
                ),
            ]),
        )),
        K::Embalm(cost) => Plan::new().with(Recipe::activated(
            graveyard_sorcery(exile_self(cost)),
            token_copy("white Zombie, no mana cost", Vec::new()),
        )),
        K::Eternalize(cost) => Plan::new().with(Recipe::activated(
            graveyard_sorcery(exile_self(cost)),
            token_copy("4/4 black Zombie, no mana cost", Vec::new()),
        )),
        K::Encore(cost) => Plan::new().with(Recipe::activated(
            graveyard_sorcery(exile_self(cost)),
            Effect::Repeat {
                times: Amount::count("Opponents"),
                effect: Box::new(Effect::batch([
                    token_copy(
                        "",
                        vec![
                            EntryModifier::Attacking,
                            EntryModifier::WithKeyword("Haste".into()),
                        ],
                    ),
                    Effect::delayed("EndOfTurn", Effect::sacrifice_self()),
                ])),
            },
        )),
        K::Ninjutsu(cost) => Plan::new().with(Recipe::activated(
            Activation::new(
                cost.clone()
                    .with_action("Return", &["1", "Creature.attacking+unblocked+YouCtrl"]),
            )
            .from_zone(Zone::Hand),
            Effect::ChangeZone {
                subject: Subject::This,
                from: Some(Zone::Hand),
                to: Zone::Battlefield,
                modifiers: vec![EntryModifier::Tapped, EntryModifier::Attacking],
            },
        )),
        K::Crew(n) => {
            let (plan, _) = with_magnitude(var, *n);
            let crew = format!("Creature.Other+untapped+withTotalPowerGE{}", n);
            plan.with(Recipe::activated(
                Activation::new(Cost::default().with_action("tapXType", &["Any", crew.as_str()])),
                Effect::batch([
                    Effect::Animate {
                        subject: Subject::This,
                        types: "Artifact Creature".into(),
                        duration: Duration::EndOfTurn,
                    },
                    gain_keyword("Crewed", Duration::EndOfTurn),
                ]),
            ))
        }
        _ => return None,
    };
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::recipe::Mode;
    use crate::keywords::EquipRestriction;

    fn activation(plan: &Plan, slot: usize) -> &Activation {
        match &plan.recipes[slot].mode {
            Mode::Activated(a) => a,
            other => panic!("Expected activated, got {:?}", other),
        }
    }

    #[test]
    fn test_equip_is_sorcery_speed() {
        let plan = plan(
            &Keyword::Equip {
                cost: Cost::generic(2),
                restriction: None,
            },
            "Equip0",
        )
        .unwrap();
        let activation = activation(&plan, 0);
        assert!(activation.sorcery_speed);
        assert_eq!(activation.zone, Zone::Battlefield);
    }

    #[test]
    fn test_equip_restriction_narrows_target() {
        let plan = plan(
            &Keyword::Equip {
                cost: Cost::generic(1),
                restriction: Some(EquipRestriction {
                    filter: "Creature.Legendary".into(),
                    description: "legendary creature".into(),
                }),
            },
            "Equip0",
        )
        .unwrap();
        match &plan.recipes[0].effect {
            Effect::Attach {
                to: Subject::Targeted { filter, description },
            } => {
                assert_eq!(filter, "Creature.Legendary+YouCtrl");
                assert_eq!(description, "target legendary creature you control");
            }
            other => panic!("Expected attach, got {:?}", other),
        }
    }

    #[test]
    fn test_cycling_discards_from_hand() {
        let plan = plan(&Keyword::Cycling(Cost::generic(2)), "Cycling0").unwrap();
        let activation = activation(&plan, 0);
        assert_eq!(activation.zone, Zone::Hand);
        assert_eq!(activation.cost.to_string(), "2 Discard<1/Card.Self>");
    }

    #[test]
    fn test_outlast_taps() {
        let plan = plan(&Keyword::Outlast(Cost::generic(1)), "Outlast0").unwrap();
        assert!(activation(&plan, 0).cost.has_tap());
    }

    #[test]
    fn test_unearth_from_graveyard() {
        let plan = plan(&Keyword::Unearth(Cost::generic(1)), "Unearth0").unwrap();
        assert_eq!(activation(&plan, 0).zone, Zone::Graveyard);
    }
}
