//! Casting permissions and alternative, additional and optional costs.

use super::{magnitude_amount, plus_one_counters, Plan};
use crate::behavior::condition::Condition;
use crate::behavior::effect::{Amount, Duration, Effect, EntryModifier, Subject};
use crate::behavior::recipe::{
    Activation, CastCost, CastSpec, Recipe, ReplacementEvent, TriggerEvent, Whose,
};
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;
use crate::keywords::Keyword;

fn cast(name: &str, from: Zone, cost: CastCost, effect: Effect) -> Recipe {
    Recipe::cast(CastSpec::new(name, from, cost), effect)
}

fn alternative(name: &str, from: Zone, cost: &Cost) -> Recipe {
    cast(name, from, CastCost::Alternative(cost.clone()), Effect::Nothing)
}

fn optional(name: &str, cost: &Cost, repeatable: bool) -> Recipe {
    cast(
        name,
        Zone::Hand,
        CastCost::Optional {
            cost: cost.clone(),
            repeatable,
        },
        Effect::Nothing,
    )
}

/// If cast from `zone`, exile instead of going anywhere else.
fn exile_after_cast_from(zone: Zone) -> Recipe {
    Recipe::replacement(
        ReplacementEvent::Moved {
            from: Some(Zone::Stack),
            to: Zone::Graveyard,
        },
        Effect::move_to(Subject::This, Some(Zone::Stack), Zone::Exile),
    )
    .with_condition(Condition::CastFrom(zone))
}

/// Cast face down as a 2/2 for {3}.
fn face_down(name: &str) -> Recipe {
    cast(
        name,
        Zone::Hand,
        CastCost::Alternative(Cost::generic(3)),
        Effect::ChangeZone {
            subject: Subject::This,
            from: Some(Zone::Stack),
            to: Zone::Battlefield,
            modifiers: vec![EntryModifier::FaceDown],
        },
    )
}

pub(super) fn plan(keyword: &Keyword, var: &str) -> Option<Plan> {
    use Keyword as K;
    let plan = match keyword {
        // === Casting from other zones ===
        K::Flashback(cost) => {
            let cost = cost
                .as_ref()
                .map_or(CastCost::Printed, |c| CastCost::Alternative(c.clone()));
            Plan::new()
                .with(cast("Flashback", Zone::Graveyard, cost, Effect::Nothing))
                .with(exile_after_cast_from(Zone::Graveyard))
        }
        K::Retrace => Plan::new().with(cast(
            "Retrace",
            Zone::Graveyard,
            CastCost::Additional(Cost::default().with_action("Discard", &["1", "Land"])),
            Effect::Nothing,
        )),
        K::JumpStart => Plan::new()
            .with(cast(
                "JumpStart",
                Zone::Graveyard,
                CastCost::Additional(Cost::default().with_action("Discard", &["1", "Card"])),
                Effect::Nothing,
            ))
            .with(exile_after_cast_from(Zone::Graveyard)),
        K::Madness(cost) => Plan::new()
            .with(Recipe::replacement(
                ReplacementEvent::Moved {
                    from: Some(Zone::Hand),
                    to: Zone::Graveyard,
                },
                Effect::move_to(Subject::This, Some(Zone::Hand), Zone::Exile),
            ))
            .with(
                cast(
                    "Madness",
                    Zone::Exile,
                    CastCost::Alternative(cost.clone()),
                    Effect::Nothing,
                )
                .with_condition(Condition::Custom("DiscardedThisWay".into())),
            ),
        K::Disturb(cost) => Plan::new()
            .with(cast(
                "Disturb",
                Zone::Graveyard,
                CastCost::Alternative(cost.clone()),
                Effect::Transform,
            ))
            .with(exile_after_cast_from(Zone::Graveyard)),
        K::Escape { cost, exile } => {
            let count = exile.to_string();
            let cost = cost
                .clone()
                .with_action("ExileFromGrave", &[count.as_str(), "Card.Other"]);
            Plan::new()
                .with_var(var, *exile)
                .with(alternative("Escape", Zone::Graveyard, &cost))
        }
        K::Foretell(cost) => Plan::new()
            .with(Recipe::activated(
                Activation::new(Cost::generic(2)).from_zone(Zone::Hand).special(),
                Effect::ChangeZone {
                    subject: Subject::This,
                    from: Some(Zone::Hand),
                    to: Zone::Exile,
                    modifiers: vec![EntryModifier::FaceDown],
                },
            ))
            .with(
                alternative("Foretell", Zone::Exile, cost)
                    .with_condition(Condition::Custom("ForetoldBeforeThisTurn".into())),
            ),
        K::Plot(cost) => Plan::new()
            .with(Recipe::activated(
                Activation::new(cost.clone())
                    .from_zone(Zone::Hand)
                    .sorcery()
                    .special(),
                Effect::move_to(Subject::This, Some(Zone::Hand), Zone::Exile),
            ))
            .with(
                cast("Plot", Zone::Exile, CastCost::Alternative(Cost::generic(0)), Effect::Nothing)
                    .with_condition(Condition::Custom("PlottedBeforeThisTurn".into())),
            ),
        K::Suspend { time, cost } => {
            let (plan, amount) = magnitude_amount(var, *time);
            plan.with(Recipe::activated(
                Activation::new(cost.clone()).from_zone(Zone::Hand).special(),
                Effect::ChangeZone {
                    subject: Subject::This,
                    from: Some(Zone::Hand),
                    to: Zone::Exile,
                    modifiers: vec![EntryModifier::WithCounters(CounterType::Time, amount)],
                },
            ))
            .with(
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
                    Effect::batch([
                        Effect::Cast {
                            subject: Subject::This,
                            from: Zone::Exile,
                            without_paying: true,
                        },
                        Effect::grant(Subject::This, ["Haste"]),
                    ]),
                )
                .with_condition(Condition::no_counters(CounterType::Time)),
            )
        }
        K::Miracle(cost) => Plan::new().with(
            Recipe::trigger(
                TriggerEvent::Phase {
                    step: "Draw".into(),
                    whose: Whose::You,
                },
                Effect::pay(
                    cost.clone(),
                    Effect::Cast {
                        subject: Subject::This,
                        from: Zone::Hand,
                        without_paying: true,
                    },
                ),
            )
            .with_condition(Condition::Custom("FirstCardDrawnThisTurn".into()))
            .optional(),
        ),

        // === Face down ===
        K::Morph(_) | K::Megamorph(_) | K::Disguise(_) => {
            let plan = Plan::new().with(face_down(keyword.name()));
            match turn_face_up(keyword) {
                Some(recipe) => plan.with(recipe),
                None => plan,
            }
        }

        // === Alternative costs ===
        K::Evoke(cost) => Plan::new().with(alternative("Evoked", Zone::Hand, cost)).with(
            Recipe::trigger(TriggerEvent::self_enters(), Effect::sacrifice_self())
                .with_condition(Condition::paid("Evoked")),
        ),
        K::Spectacle(cost) => Plan::new().with(
            alternative("Spectacle", Zone::Hand, cost)
                .with_condition(Condition::OpponentDamagedThisTurn),
        ),
        K::Surge(cost) => Plan::new().with(
            alternative("Surge", Zone::Hand, cost)
                .with_condition(Condition::Custom("TeammateCastSpellThisTurn".into())),
        ),
        K::Prowl(cost) => Plan::new().with(
            alternative("Prowl", Zone::Hand, cost)
                .with_condition(Condition::Custom("SharedTypeDealtCombatDamage".into())),
        ),
        K::Emerge(cost) => {
            let cost = cost.clone().with_action("Sac", &["1", "Creature"]);
            Plan::new().with(alternative("Emerge", Zone::Hand, &cost))
        }
        K::Overload(cost) => Plan::new().with(cast(
            "Overloaded",
            Zone::Hand,
            CastCost::Alternative(cost.clone()),
            Effect::SetFlag {
                name: "TargetToEach".into(),
            },
        )),
        K::Bestow(cost) => Plan::new().with(cast(
            "Bestowed",
            Zone::Hand,
            CastCost::Alternative(cost.clone()),
            Effect::Animate {
                subject: Subject::This,
                types: "Aura Enchantment".into(),
                duration: Duration::Permanent,
            },
        )),

        // === Additional and optional costs ===
        K::Kicker { cost, second } => {
            let plan = Plan::new().with(optional("Kicked", cost, false));
            match second {
                Some(second) => plan.with(optional("Kicked2", second, false)),
                None => plan,
            }
        }
        K::Multikicker(cost) => Plan::new().with(optional("Multikicked", cost, true)),
        K::Buyback(cost) => Plan::new().with(optional("Buyback", cost, false)).with(
            Recipe::replacement(
                ReplacementEvent::Moved {
                    from: Some(Zone::Stack),
                    to: Zone::Graveyard,
                },
                Effect::move_to(Subject::This, Some(Zone::Stack), Zone::Hand),
            )
            .with_condition(Condition::paid("Buyback")),
        ),
        K::Entwine(cost) => Plan::new().with(optional("Entwined", cost, false)),
        K::Squad(cost) => Plan::new().with(optional("Squad", cost, true)).with(
            Recipe::trigger(
                TriggerEvent::self_enters(),
                Effect::TokenCopy {
                    subject: Subject::This,
                    amount: Amount::count("TimesSquadPaid"),
                    except: String::new(),
                    modifiers: Vec::new(),
                },
            )
            .with_condition(Condition::paid("Squad")),
        ),
        K::Replicate(cost) => Plan::new().with(optional("Replicate", cost, true)).with(
            Recipe::trigger(
                TriggerEvent::SpellCast {
                    valid: "Card.Self".into(),
                },
                Effect::CopySpell {
                    amount: Amount::count("TimesReplicatePaid"),
                },
            )
            .with_condition(Condition::paid("Replicate")),
        ),
        K::Splice { onto, cost } => Plan::new().with(
            Recipe::activated(
                Activation::new(cost.clone()).from_zone(Zone::Hand).special(),
                Effect::SetFlag {
                    name: format!("SpliceOnto{}", onto),
                },
            )
            .with_condition(Condition::Custom(format!("Casting{}Spell", onto))),
        ),
        _ => return None,
    };
    Some(plan)
}

/// Special action that turns a face-down permanent face up, for keywords
/// that let a permanent be face down.
///
/// ```
/// use ccg_layers::behavior::turn_face_up;
/// use ccg_layers::keywords::Keyword;
///
/// let morph = Keyword::parse("Morph:4 G").unwrap();
/// assert!(turn_face_up(&morph).is_some());
/// assert!(turn_face_up(&Keyword::Flying).is_none());
/// ```
#[must_use]
pub fn turn_face_up(keyword: &Keyword) -> Option<Recipe> {
    let (cost, effect) = match keyword {
        Keyword::Morph(cost) | Keyword::Disguise(cost) => (cost, Effect::TurnFaceUp),
        Keyword::Megamorph(cost) => (
            cost,
            Effect::batch([Effect::TurnFaceUp, plus_one_counters(Subject::This, 1)]),
        ),
        _ => return None,
    };
    Some(
        Recipe::activated(Activation::new(cost.clone()).special(), effect)
            .with_condition(Condition::FaceDown),
    )
}
