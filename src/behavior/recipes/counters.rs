//! Counter templates: counters on entry, counter-driven upkeep, and
//! returning from the graveyard with a counter.

use super::{gain_keyword, magnitude_amount, plus_one_counters, with_magnitude, Plan};
use crate::behavior::condition::Condition;
use crate::behavior::effect::{Amount, Duration, Effect, EntryModifier, Subject};
use crate::behavior::recipe::{Recipe, ReplacementEvent, StaticChange, TriggerEvent};
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;
use crate::keywords::Keyword;

fn enters_with(counter: CounterType, amount: impl Into<Amount>) -> Recipe {
    Recipe::replacement(
        ReplacementEvent::EntersBattlefield,
        Effect::put_counters(Subject::This, counter, amount),
    )
}

/// Return from the graveyard with a counter, unless it already had one.
fn comes_back(counter: CounterType) -> Recipe {
    Recipe::trigger(
        TriggerEvent::self_dies(),
        Effect::return_to_battlefield(
            Zone::Graveyard,
            vec![EntryModifier::WithCounters(counter.clone(), Amount::Fixed(1))],
        ),
    )
    .with_condition(Condition::no_counters(counter))
}

pub(super) fn plan(keyword: &Keyword, var: &str) -> Option<Plan> {
    use Keyword as K;
    let plan = match keyword {
        K::Modular(magnitude) => {
            let (plan, amount) = magnitude_amount(var, *magnitude);
            plan.with(enters_with(CounterType::PlusOnePlusOne, amount))
                .with(
                    Recipe::trigger(
                        TriggerEvent::self_dies(),
                        Effect::MoveCounters {
                            from: Subject::This,
                            to: Subject::target("Artifact.Creature", "target artifact creature"),
                            counter: CounterType::PlusOnePlusOne,
                            amount: Amount::Counters(CounterType::PlusOnePlusOne),
                        },
                    )
                    .optional(),
                )
        }
        K::Graft(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(enters_with(CounterType::PlusOnePlusOne, amount))
                .with(
                    Recipe::trigger(
                        TriggerEvent::EntersBattlefield {
                            valid: "Creature.Other".into(),
                        },
                        Effect::MoveCounters {
                            from: Subject::This,
                            to: Subject::triggered("Card"),
                            counter: CounterType::PlusOnePlusOne,
                            amount: Amount::Fixed(1),
                        },
                    )
                    .with_condition(Condition::has_counters(CounterType::PlusOnePlusOne))
                    .optional(),
                )
        }
        K::Sunburst => {
            let creature = Condition::IsPresent("Card.Self+Creature".into());
            Plan::new().with(Recipe::replacement(
                ReplacementEvent::EntersBattlefield,
                Effect::batch([
                    Effect::when(
                        creature.clone(),
                        plus_one_counters(Subject::This, Amount::ColorsSpent),
                    ),
                    Effect::when(
                        creature.negate(),
                        Effect::put_counters(Subject::This, CounterType::Charge, Amount::ColorsSpent),
                    ),
                ]),
            ))
        }
        K::Bloodthirst(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(
                enters_with(CounterType::PlusOnePlusOne, amount)
                    .with_condition(Condition::OpponentDamagedThisTurn),
            )
        }
        K::Amplify { amount, types } => {
            let (plan, per_card) = with_magnitude(var, *amount);
            let types_var = format!("{}Types", var);
            plan.with_var(types_var.clone(), types.clone()).with(Recipe::replacement(
                ReplacementEvent::EntersBattlefield,
                Effect::Repeat {
                    times: Amount::count(format!("RevealedFromHand.SVar{}", types_var)),
                    effect: Box::new(plus_one_counters(Subject::This, per_card)),
                },
            ))
        }
        K::Devour(n) => {
            let (plan, per_creature) = with_magnitude(var, *n);
            plan.with(Recipe::replacement(
                ReplacementEvent::EntersBattlefield,
                Effect::batch([
                    Effect::Sacrifice {
                        player: Subject::Controller,
                        filter: "Creature.Other".into(),
                        amount: Amount::count("AnyNumber"),
                    },
                    Effect::Repeat {
                        times: Amount::count("Devoured"),
                        effect: Box::new(plus_one_counters(Subject::This, per_creature)),
                    },
                ]),
            ))
        }
        K::Tribute(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::replacement(
                ReplacementEvent::EntersBattlefield,
                Effect::Choice(vec![
                    Effect::batch([
                        plus_one_counters(Subject::This, amount),
                        Effect::SetFlag {
                            name: "TributePaid".into(),
                        },
                    ]),
                    Effect::Nothing,
                ]),
            ))
        }
        K::Riot => Plan::new().with(Recipe::replacement(
            ReplacementEvent::EntersBattlefield,
            Effect::Choice(vec![
                plus_one_counters(Subject::This, 1),
                gain_keyword("Haste", Duration::Permanent),
            ]),
        )),
        K::Unleash => Plan::new()
            .with(
                Recipe::replacement(
                    ReplacementEvent::EntersBattlefield,
                    plus_one_counters(Subject::This, 1),
                )
                .optional(),
            )
            .with(
                Recipe::static_self(StaticChange::Restriction("CantBlock".into()))
                    .with_condition(Condition::has_counters(CounterType::PlusOnePlusOne)),
            ),
        K::Ravenous => Plan::new()
            .with(enters_with(CounterType::PlusOnePlusOne, Amount::count("ChosenX")))
            .with(
                Recipe::trigger(TriggerEvent::self_enters(), Effect::draw(1))
                    .with_condition(Condition::Custom("ChosenXAtLeast5".into())),
            ),
        K::Backup(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_enters(),
                plus_one_counters(Subject::target("Creature", "target creature"), amount),
            ))
        }
        K::Fabricate(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_enters(),
                Effect::Choice(vec![
                    plus_one_counters(Subject::This, amount.clone()),
                    Effect::token("c_1_1_a_servo", amount),
                ]),
            ))
        }
        K::Evolve => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::EntersBattlefield {
                    valid: "Creature.Other+YouCtrl".into(),
                },
                plus_one_counters(Subject::This, 1),
            )
            .with_condition(Condition::Custom("EvolveGreaterPowerOrToughness".into())),
        ),
        K::Undying => Plan::new().with(comes_back(CounterType::PlusOnePlusOne)),
        K::Persist => Plan::new().with(comes_back(CounterType::MinusOneMinusOne)),
        K::Vanishing(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            let plan = if *n > 0 {
                plan.with(enters_with(CounterType::Time, amount))
            } else {
                plan
            };
            plan.with(
                Recipe::trigger(
                    TriggerEvent::your_upkeep(),
                    Effect::remove_counters(Subject::This, CounterType::Time, 1),
                )
                .with_condition(Condition::has_counters(CounterType::Time)),
            )
            .with(
                Recipe::trigger(
                    TriggerEvent::CounterRemoved {
                        counter: CounterType::Time,
                    },
                    Effect::sacrifice_self(),
                )
                .with_condition(Condition::no_counters(CounterType::Time)),
            )
        }
        K::Fading(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(enters_with(CounterType::Fade, amount)).with(Recipe::trigger(
                TriggerEvent::your_upkeep(),
                Effect::unless(
                    Cost::default().with_action("SubCounter", &["1", "FADE"]),
                    Effect::sacrifice_self(),
                ),
            ))
        }
        K::CumulativeUpkeep(cost) => Plan::new().with(Recipe::trigger(
            TriggerEvent::your_upkeep(),
            Effect::batch([
                Effect::put_counters(Subject::This, CounterType::Age, 1),
                Effect::Unless {
                    cost: cost.clone(),
                    times: Amount::Counters(CounterType::Age),
                    otherwise: Box::new(Effect::sacrifice_self()),
                },
            ]),
        )),
        K::Absorb(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::replacement(
                ReplacementEvent::DamageDone,
                Effect::PreventDamage { amount },
            ))
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
    use crate::keywords::Magnitude;

    #[test]
    fn test_modular_sunburst_uses_colors_spent() {
        let plan = plan(&Keyword::Modular(Magnitude::Sunburst), "Modular0").unwrap();
        assert!(plan.variables.is_empty());
        assert_eq!(
            plan.recipes[0].effect,
            Effect::put_counters(Subject::This, CounterType::PlusOnePlusOne, Amount::ColorsSpent)
        );
        assert_eq!(plan.recipes[1].kind(), BehaviorKind::Trigger);
    }

    #[test]
    fn test_modular_fixed_sets_variable() {
        let plan = plan(&Keyword::Modular(Magnitude::Fixed(3)), "Modular2").unwrap();
        assert_eq!(plan.variables, vec![("Modular2".into(), VarValue::Int(3))]);
    }

    #[test]
    fn test_undying_checks_counters() {
        let plan = plan(&Keyword::Undying, "Undying0").unwrap();
        assert_eq!(
            plan.recipes[0].condition,
            Condition::no_counters(CounterType::PlusOnePlusOne)
        );
    }

    #[test]
    fn test_vanishing_three_parts() {
        let plan = plan(&Keyword::Vanishing(3), "Vanishing0").unwrap();
        let kinds: Vec<_> = plan.recipes.iter().map(Recipe::kind).collect();
        assert_eq!(
            kinds,
            vec![BehaviorKind::Replacement, BehaviorKind::Trigger, BehaviorKind::Trigger]
        );

        // Vanishing without a number skips the entry counters.
        let bare = plan_for(&Keyword::Vanishing(0));
        assert_eq!(bare.recipes.len(), 2);
    }

    fn plan_for(keyword: &Keyword) -> Plan {
        plan(keyword, "Test0").unwrap()
    }

    #[test]
    fn test_amplify_records_types() {
        let keyword = Keyword::Amplify {
            amount: 1,
            types: vec!["Dragon".into(), "Wizard".into()],
        };
        let plan = plan_for(&keyword);
        assert!(plan.variables.contains(&(
            "Test0Types".into(),
            VarValue::TextList(vec!["Dragon".into(), "Wizard".into()])
        )));
        assert!(matches!(plan.recipes[0].mode, Mode::Replacement(_)));
    }
}
