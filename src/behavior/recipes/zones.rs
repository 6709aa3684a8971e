//! Entry, death, spell-cast and zone-change templates, plus the static
//! keywords.

use super::{with_magnitude, Plan};
use crate::behavior::condition::Condition;
use crate::behavior::effect::{Amount, Effect, EntryModifier, Subject};
use crate::behavior::recipe::{Recipe, ReplacementEvent, StaticChange, TriggerEvent};
use crate::characteristics::{Color, Cost, ManaCost, ManaShard};
use crate::core::Zone;
use crate::keywords::Keyword;

fn self_cast() -> TriggerEvent {
    TriggerEvent::SpellCast {
        valid: "Card.Self".into(),
    }
}

/// Cast the revealed card without paying its mana cost.
fn cast_revealed(from: Zone) -> Effect {
    Effect::Cast {
        subject: Subject::triggered("Revealed"),
        from,
        without_paying: true,
    }
}

pub(super) fn plan(keyword: &Keyword, var: &str) -> Option<Plan> {
    use Keyword as K;
    let plan = match keyword {
        // === Static keywords ===
        K::Changeling => Plan::new()
            .with(Recipe::static_self(StaticChange::AllCreatureTypes).characteristic_defining()),
        K::Devoid => {
            Plan::new().with(Recipe::static_self(StaticChange::Colorless).characteristic_defining())
        }
        K::Affinity(kind) => Plan::new().with(Recipe::static_self(StaticChange::ReduceCost(
            Amount::count(format!("{}.YouCtrl", kind)),
        ))),

        // === Death and entry ===
        K::Afterlife(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_dies(),
                Effect::token("w_1_1_spirit_flying", amount),
            ))
        }
        K::Soulshift(n) => {
            let (plan, _) = with_magnitude(var, *n);
            plan.with(
                Recipe::trigger(
                    TriggerEvent::self_dies(),
                    Effect::move_to(
                        Subject::target(
                            format!("Spirit.YouCtrl+cmcLE{}", n),
                            format!("target Spirit card with mana value {} or less", n),
                        ),
                        Some(Zone::Graveyard),
                        Zone::Hand,
                    ),
                )
                .optional(),
            )
        }
        K::Exploit => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::self_enters(),
                Effect::Sacrifice {
                    player: Subject::Controller,
                    filter: "Creature".into(),
                    amount: Amount::Fixed(1),
                },
            )
            .optional(),
        ),
        K::LivingWeapon => Plan::new().with(Recipe::trigger(
            TriggerEvent::self_enters(),
            Effect::batch([
                Effect::token("b_0_0_phyrexian_germ", 1),
                Effect::Attach {
                    to: Subject::triggered("CreatedToken"),
                },
            ]),
        )),
        K::Champion(kind) => {
            let championed = format!("{}.Other+YouCtrl", kind);
            Plan::new()
                .with(Recipe::trigger(
                    TriggerEvent::self_enters(),
                    Effect::unless(
                        Cost::default().with_action("Exile", &["1", championed.as_str()]),
                        Effect::sacrifice_self(),
                    ),
                ))
                .with(Recipe::trigger(
                    TriggerEvent::LeavesBattlefield {
                        valid: "Card.Self".into(),
                    },
                    Effect::move_to(
                        Subject::triggered("Championed"),
                        Some(Zone::Exile),
                        Zone::Battlefield,
                    ),
                ))
        }
        K::Hideaway(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(Recipe::trigger(
                TriggerEvent::self_enters(),
                Effect::LookAtTop {
                    amount,
                    then: Box::new(Effect::ChangeZone {
                        subject: Subject::triggered("Chosen"),
                        from: Some(Zone::Library),
                        to: Zone::Exile,
                        modifiers: vec![EntryModifier::FaceDown],
                    }),
                },
            ))
        }
        K::UmbraArmor => Plan::new().with(Recipe::replacement(
            ReplacementEvent::Destroy {
                valid: "Creature.EnchantedBy".into(),
            },
            Effect::batch([
                Effect::SetFlag {
                    name: "RemoveAllDamage".into(),
                },
                Effect::Destroy {
                    subject: Subject::This,
                },
            ]),
        )),

        // === Spells ===
        K::Cascade => Plan::new().with(Recipe::trigger(
            self_cast(),
            Effect::RevealUntil {
                filter: "Card.nonLand+cmcLTSelfCMC".into(),
                then: Box::new(cast_revealed(Zone::Exile)),
            },
        )),
        K::Storm => Plan::new().with(Recipe::trigger(
            self_cast(),
            Effect::CopySpell {
                amount: Amount::count("SpellsCastBeforeThisTurn"),
            },
        )),
        K::Gravestorm => Plan::new().with(Recipe::trigger(
            self_cast(),
            Effect::CopySpell {
                amount: Amount::count("PermanentsPutIntoGraveyardThisTurn"),
            },
        )),
        K::Ripple(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(
                Recipe::trigger(
                    self_cast(),
                    Effect::LookAtTop {
                        amount,
                        then: Box::new(cast_revealed(Zone::Library)),
                    },
                )
                .optional(),
            )
        }
        K::Prowess => Plan::new().with(Recipe::trigger(
            TriggerEvent::SpellCast {
                valid: "Card.nonCreature+YouCtrl".into(),
            },
            Effect::pump(Subject::This, 1, 1),
        )),
        K::Extort => Plan::new().with(Recipe::trigger(
            TriggerEvent::SpellCast {
                valid: "Card.YouCtrl".into(),
            },
            Effect::pay(
                Cost::mana(ManaCost::from_shards([ManaShard::Hybrid(
                    Color::White,
                    Color::Black,
                )])),
                Effect::batch([
                    Effect::LoseLife {
                        player: Subject::each("Player.Opponent"),
                        amount: Amount::Fixed(1),
                    },
                    Effect::GainLife {
                        player: Subject::Controller,
                        amount: Amount::count("LifeLostThisWay"),
                    },
                ]),
            ),
        )),
        K::Ward(cost) => Plan::new().with(Recipe::trigger(
            TriggerEvent::BecomesTarget {
                valid: "Card.Self".into(),
                by: "Card.OppCtrl".into(),
            },
            Effect::CounterUnlessPaid { cost: cost.clone() },
        )),
        K::Echo(cost) => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::your_upkeep(),
                Effect::unless(cost.clone(), Effect::sacrifice_self()),
            )
            .with_condition(Condition::Custom("CameUnderControlSinceLastUpkeep".into())),
        ),

        // === Zone replacements ===
        K::Dredge(n) => {
            let (plan, amount) = with_magnitude(var, *n);
            plan.with(
                Recipe::replacement(
                    ReplacementEvent::Draw,
                    Effect::batch([
                        Effect::Mill {
                            player: Subject::Controller,
                            amount,
                        },
                        Effect::move_to(Subject::This, Some(Zone::Graveyard), Zone::Hand),
                    ]),
                )
                .with_condition(Condition::Custom(format!("LibraryAtLeast{}", n)))
                .optional(),
            )
        }
        K::Rebound => Plan::new().with(
            Recipe::replacement(
                ReplacementEvent::Moved {
                    from: Some(Zone::Stack),
                    to: Zone::Graveyard,
                },
                Effect::batch([
                    Effect::move_to(Subject::This, Some(Zone::Stack), Zone::Exile),
                    Effect::delayed(
                        "Upkeep",
                        Effect::Cast {
                            subject: Subject::This,
                            from: Zone::Exile,
                            without_paying: true,
                        },
                    ),
                ]),
            )
            .with_condition(Condition::CastFrom(Zone::Hand)),
        ),
        _ => return None,
    };
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::recipe::{BehaviorKind, Mode};

    #[test]
    fn test_cascade_reveals_and_casts() {
        let plan = plan(&Keyword::Cascade, "Cascade0").unwrap();
        let recipe = &plan.recipes[0];
        assert!(matches!(
            recipe.trigger_event(),
            Some(TriggerEvent::SpellCast { .. })
        ));
        let mut casts = 0;
        recipe.effect.walk(&mut |e| {
            if matches!(e, Effect::Cast { without_paying: true, .. }) {
                casts += 1;
            }
        });
        assert_eq!(casts, 1);
    }

    #[test]
    fn test_devoid_is_characteristic_defining() {
        let plan = plan(&Keyword::Devoid, "Devoid0").unwrap();
        match &plan.recipes[0].mode {
            Mode::Static(ability) => {
                assert!(ability.characteristic_defining);
                assert_eq!(ability.change, StaticChange::Colorless);
            }
            other => panic!("Expected static, got {:?}", other),
        }
    }

    #[test]
    fn test_ward_counters_unless_paid() {
        let cost = Cost::generic(2);
        let plan = plan(&Keyword::Ward(cost.clone()), "Ward0").unwrap();
        assert_eq!(plan.recipes[0].effect, Effect::CounterUnlessPaid { cost });
    }

    #[test]
    fn test_dredge_is_optional_replacement() {
        let plan = plan(&Keyword::Dredge(3), "Dredge0").unwrap();
        assert_eq!(plan.recipes[0].kind(), BehaviorKind::Replacement);
        assert!(plan.recipes[0].optional);
        assert_eq!(plan.recipes[0].effect.variables(), vec!["Dredge0"]);
    }
}
