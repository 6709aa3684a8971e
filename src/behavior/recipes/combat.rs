//! Attack, block and combat-damage templates.

use super::{gain_keyword, plus_one_counters, with_magnitude, Plan};
use crate::behavior::condition::Condition;
use crate::behavior::effect::{Amount, Duration, Effect, EntryModifier, Subject};
use crate::behavior::recipe::{CastCost, CastSpec, Recipe, StaticChange, TriggerEvent};
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;
use crate::keywords::Keyword;

const SELF: &str = "Card.Self";

fn blocks() -> TriggerEvent {
    TriggerEvent::Blocks { valid: SELF.into() }
}

fn becomes_blocked() -> TriggerEvent {
    TriggerEvent::BecomesBlocked {
        valid: SELF.into(),
        by: None,
    }
}

fn deals_combat_damage_to_player() -> TriggerEvent {
    TriggerEvent::DamageDone {
        valid_source: SELF.into(),
        valid_target: "Player".into(),
        combat: true,
    }
}

fn defending_player() -> Subject {
    Subject::triggered("DefendingPlayer")
}

pub(super) fn plan(keyword: &Keyword, var: &str) -> Option<Plan> {
    use Keyword as K;
    let plan = match keyword {
        K::Bushido(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            let pump = Effect::pump(Subject::This, amount.clone(), amount);
            plan.with(Recipe::trigger(blocks(), pump.clone()))
                .with(Recipe::trigger(becomes_blocked(), pump))
        }
        K::Rampage(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                becomes_blocked(),
                Effect::Repeat {
                    times: Amount::count("BlockersBeyondFirst"),
                    effect: Box::new(Effect::pump(Subject::This, amount.clone(), amount)),
                },
            ))
        }
        K::Flanking => Plan::new().with(Recipe::trigger(
            TriggerEvent::BecomesBlocked {
                valid: SELF.into(),
                by: Some("Creature.withoutFlanking".into()),
            },
            Effect::pump(Subject::triggered("Blocker"), -1, -1),
        )),
        K::Exalted => Plan::new().with(Recipe::trigger(
            TriggerEvent::Attacks {
                valid: "Creature.YouCtrl".into(),
                alone: true,
            },
            Effect::pump(Subject::triggered("Attacker"), 1, 1),
        )),
        K::Annihilator(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_attacks(),
                Effect::Sacrifice {
                    player: defending_player(),
                    filter: "Permanent".into(),
                    amount,
                },
            ))
        }
        K::Afflict(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                becomes_blocked(),
                Effect::LoseLife {
                    player: defending_player(),
                    amount,
                },
            ))
        }
        K::Mentor => Plan::new().with(Recipe::trigger(
            TriggerEvent::self_attacks(),
            plus_one_counters(
                Subject::target(
                    "Creature.attacking+powerLTSelfPower",
                    "target attacking creature with lesser power",
                ),
                1,
            ),
        )),
        K::Training => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::self_attacks(),
                plus_one_counters(Subject::This, 1),
            )
            .with_condition(Condition::IsPresent(
                "Creature.attacking+Other+powerGTSelfPower".into(),
            )),
        ),
        K::Melee => Plan::new().with(Recipe::trigger(
            TriggerEvent::self_attacks(),
            Effect::pump(
                Subject::This,
                Amount::count("OpponentsAttackedThisCombat"),
                Amount::count("OpponentsAttackedThisCombat"),
            ),
        )),
        K::Dethrone => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::Attacks {
                    valid: SELF.into(),
                    alone: false,
                },
                plus_one_counters(Subject::This, 1),
            )
            .with_condition(Condition::Custom("DefenderHasMostLife".into())),
        ),
        K::Myriad => Plan::new().with(Recipe::trigger(
            TriggerEvent::self_attacks(),
            Effect::Repeat {
                times: Amount::count("OpponentsOtherThanDefending"),
                effect: Box::new(Effect::TokenCopy {
                    subject: Subject::This,
                    amount: Amount::Fixed(1),
                    except: String::new(),
                    modifiers: vec![
                        EntryModifier::Tapped,
                        EntryModifier::Attacking,
                        EntryModifier::ExileIfLeaves,
                    ],
                }),
            },
        )),
        K::BattleCry => Plan::new().with(Recipe::trigger(
            TriggerEvent::self_attacks(),
            Effect::pump(Subject::each("Creature.attacking+Other+YouCtrl"), 1, 0),
        )),
        K::Provoke => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::self_attacks(),
                Effect::batch([
                    Effect::Untap {
                        subject: Subject::target(
                            "Creature.DefenderCtrl",
                            "target creature defending player controls",
                        ),
                    },
                    Effect::SetFlag {
                        name: "MustBlockHost".into(),
                    },
                ]),
            )
            .optional(),
        ),
        K::Frenzy(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_attacks(),
                Effect::delayed(
                    "DeclareBlockers",
                    Effect::when(
                        Condition::Custom("Unblocked".into()),
                        Effect::pump(Subject::This, amount, 0),
                    ),
                ),
            ))
        }
        K::Enlist => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::self_attacks(),
                Effect::pay(
                    Cost::default()
                        .with_action("tapXType", &["1", "Creature.Other+nonAttacking+YouCtrl"]),
                    Effect::pump(Subject::This, Amount::count("EnlistedPower"), 0),
                ),
            )
            .optional(),
        ),
        K::Poisonous(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                deals_combat_damage_to_player(),
                Effect::put_counters(
                    Subject::triggered("Target"),
                    CounterType::Named("poison".into()),
                    amount,
                ),
            ))
        }
        K::Renown(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(
                Recipe::trigger(
                    deals_combat_damage_to_player(),
                    Effect::batch([
                        plus_one_counters(Subject::This, amount),
                        Effect::SetFlag {
                            name: "Renowned".into(),
                        },
                    ]),
                )
                .with_condition(Condition::Custom("NotRenowned".into())),
            )
        }
        K::Ingest => Plan::new().with(Recipe::trigger(
            deals_combat_damage_to_player(),
            Effect::move_to(
                Subject::triggered("TopOfLibrary"),
                Some(Zone::Library),
                Zone::Exile,
            ),
        )),
        K::Decayed => Plan::new()
            .with(Recipe::static_self(
                StaticChange::Restriction("CantBlock".into()),
            ))
            .with(Recipe::trigger(
                TriggerEvent::self_attacks(),
                Effect::delayed("EndCombat", Effect::sacrifice_self()),
            )),
        K::Dash(cost) | K::Blitz(cost) => {
            let dashed = matches!(keyword, K::Dash(_));
            let name = if dashed { "Dash" } else { "Blitz" };
            let at_end = if dashed {
                Effect::move_to(
                    Subject::This,
                    Some(Zone::Battlefield),
                    Zone::Hand,
                )
            } else {
                Effect::sacrifice_self()
            };
            let cast = Recipe::cast(
                CastSpec::new(
                    name,
                    Zone::Hand,
                    CastCost::Alternative(cost.clone()),
                ),
                Effect::batch([
                    gain_keyword("Haste", Duration::Permanent),
                    Effect::delayed("EndOfTurn", at_end),
                ]),
            );
            let plan = Plan::new().with(cast);
            if dashed {
                plan
            } else {
                plan.with(
                    Recipe::trigger(TriggerEvent::self_dies(), Effect::draw(1))
                        .with_condition(Condition::paid("Blitz")),
                )
            }
        }
        _ => return None,
    };
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::recipe::{BehaviorKind, Mode};
    use crate::behavior::vars::VarValue;

    #[test]
    fn test_bushido_triggers() {
        let plan = plan(&Keyword::Bushido(2), "Bushido0").unwrap();
        let events: Vec<_> = plan
            .recipes
            .iter()
            .filter_map(|r| r.trigger_event().map(TriggerEvent::mode_name))
            .collect();
        assert_eq!(events, vec!["Blocks", "AttackerBlocked"]);
        assert_eq!(plan.variables, vec![("Bushido0".into(), VarValue::Int(2))]);
    }

    #[test]
    fn test_exalted_watches_lone_attacker() {
        let plan = plan(&Keyword::Exalted, "Exalted0").unwrap();
        assert!(plan.variables.is_empty());
        match &plan.recipes[0].mode {
            Mode::Trigger(TriggerEvent::Attacks { alone, .. }) => assert!(alone),
            other => panic!("Expected attack trigger, got {:?}", other),
        }
    }

    #[test]
    fn test_blitz_adds_draw_trigger() {
        let cost = Cost::generic(2);
        let dash = plan(&Keyword::Dash(cost.clone()), "Dash0").unwrap();
        let blitz = plan(&Keyword::Blitz(cost), "Blitz0").unwrap();
        assert_eq!(dash.recipes.len(), 1);
        assert_eq!(blitz.recipes.len(), 2);
        assert_eq!(blitz.recipes[0].kind(), BehaviorKind::Castable);
        assert_eq!(blitz.recipes[1].condition, Condition::paid("Blitz"));
    }

    #[test]
    fn test_decayed_cant_block() {
        let plan = plan(&Keyword::Decayed, "Decayed0").unwrap();
        assert_eq!(plan.recipes[0].kind(), BehaviorKind::Static);
        assert_eq!(plan.recipes[1].kind(), BehaviorKind::Trigger);
    }

    #[test]
    fn test_non_combat_keyword_is_not_handled() {
        assert!(plan(&Keyword::Cascade, "Cascade0").is_none());
    }
}
