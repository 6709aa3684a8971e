//! Behavior recipes: the declarative description of one ability.
//!
//! A recipe says *when* something happens ([`Mode`]), *what* happens
//! ([`Effect`]) and under which [`Condition`]. The host's ability factory
//! turns the rendered recipe into whatever executable form its engine
//! uses; this crate keeps the recipe itself so copies and face switches
//! can rebuild behaviors without recompiling keywords.
//!
//! ## Key Types
//!
//! - `Recipe`: mode + effect + condition
//! - `Mode`: trigger, replacement, static, activated or castable
//! - `BehaviorKind`: the coarse category, used for lookups

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::effect::{Amount, Effect};
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;

/// Whose turn or step a phase trigger watches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Whose {
    #[default]
    You,
    Opponent,
    Each,
}

impl std::fmt::Display for Whose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Whose::You => "You",
            Whose::Opponent => "Opponent",
            Whose::Each => "Player",
        })
    }
}

/// Events a triggered ability watches.
///
/// `valid` fields are filter expressions understood by the host
/// ("Card.Self", "Creature.Other+YouCtrl").
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    Attacks { valid: String, alone: bool },
    Blocks { valid: String },
    BecomesBlocked { valid: String, by: Option<String> },
    EntersBattlefield { valid: String },
    Dies { valid: String },
    LeavesBattlefield { valid: String },
    SpellCast { valid: String },
    Phase { step: String, whose: Whose },
    BecomesTarget { valid: String, by: String },
    CounterRemoved { counter: CounterType },
    DamageDone { valid_source: String, valid_target: String, combat: bool },
    Sacrificed { valid: String },
    TurnedFaceUp,
    Crewed,
}

impl TriggerEvent {
    /// A trigger watching the host itself.
    #[must_use]
    pub fn self_attacks() -> Self {
        TriggerEvent::Attacks {
            valid: "Card.Self".into(),
            alone: false,
        }
    }

    #[must_use]
    pub fn self_enters() -> Self {
        TriggerEvent::EntersBattlefield {
            valid: "Card.Self".into(),
        }
    }

    #[must_use]
    pub fn self_dies() -> Self {
        TriggerEvent::Dies {
            valid: "Card.Self".into(),
        }
    }

    #[must_use]
    pub fn your_upkeep() -> Self {
        TriggerEvent::Phase {
            step: "Upkeep".into(),
            whose: Whose::You,
        }
    }

    #[must_use]
    pub const fn mode_name(&self) -> &'static str {
        match self {
            TriggerEvent::Attacks { .. } => "Attacks",
            TriggerEvent::Blocks { .. } => "Blocks",
            TriggerEvent::BecomesBlocked { .. } => "AttackerBlocked",
            TriggerEvent::EntersBattlefield { .. } => "ChangesZone",
            TriggerEvent::Dies { .. } => "ChangesZone",
            TriggerEvent::LeavesBattlefield { .. } => "ChangesZone",
            TriggerEvent::SpellCast { .. } => "SpellCast",
            TriggerEvent::Phase { .. } => "Phase",
            TriggerEvent::BecomesTarget { .. } => "BecomesTarget",
            TriggerEvent::CounterRemoved { .. } => "CounterRemoved",
            TriggerEvent::DamageDone { .. } => "DamageDone",
            TriggerEvent::Sacrificed { .. } => "Sacrificed",
            TriggerEvent::TurnedFaceUp => "TurnFaceUp",
            TriggerEvent::Crewed => "BecomesCrewed",
        }
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mode$ {}", self.mode_name())?;
        match self {
            TriggerEvent::Attacks { valid, alone } => {
                write!(f, " | ValidCard$ {}", valid)?;
                if *alone {
                    f.write_str(" | Alone$ True")?;
                }
                Ok(())
            }
            TriggerEvent::Blocks { valid } => write!(f, " | ValidCard$ {}", valid),
            TriggerEvent::BecomesBlocked { valid, by } => {
                write!(f, " | ValidCard$ {}", valid)?;
                if let Some(by) = by {
                    write!(f, " | ValidBlocker$ {}", by)?;
                }
                Ok(())
            }
            TriggerEvent::EntersBattlefield { valid } => {
                write!(f, " | Destination$ Battlefield | ValidCard$ {}", valid)
            }
            TriggerEvent::Dies { valid } => write!(
                f,
                " | Origin$ Battlefield | Destination$ Graveyard | ValidCard$ {}",
                valid
            ),
            TriggerEvent::LeavesBattlefield { valid } => {
                write!(f, " | Origin$ Battlefield | Destination$ Any | ValidCard$ {}", valid)
            }
            TriggerEvent::SpellCast { valid } => write!(f, " | ValidCard$ {}", valid),
            TriggerEvent::Phase { step, whose } => {
                write!(f, " | Phase$ {} | ValidPlayer$ {}", step, whose)
            }
            TriggerEvent::BecomesTarget { valid, by } => {
                write!(f, " | ValidTarget$ {} | ValidSource$ {}", valid, by)
            }
            TriggerEvent::CounterRemoved { counter } => {
                write!(f, " | ValidCard$ Card.Self | CounterType$ {}", counter)
            }
            TriggerEvent::DamageDone {
                valid_source,
                valid_target,
                combat,
            } => {
                write!(f, " | ValidSource$ {} | ValidTarget$ {}", valid_source, valid_target)?;
                if *combat {
                    f.write_str(" | CombatDamage$ True")?;
                }
                Ok(())
            }
            TriggerEvent::Sacrificed { valid } => write!(f, " | ValidCard$ {}", valid),
            TriggerEvent::TurnedFaceUp | TriggerEvent::Crewed => {
                f.write_str(" | ValidCard$ Card.Self")
            }
        }
    }
}

/// Events a replacement effect modifies.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementEvent {
    /// The host would move between zones.
    Moved { from: Option<Zone>, to: Zone },
    /// The host would enter the battlefield.
    EntersBattlefield,
    /// Its controller would draw a card.
    Draw,
    /// Damage would be dealt to the host.
    DamageDone,
    /// The enchanted or host permanent would be destroyed.
    Destroy { valid: String },
}

impl std::fmt::Display for ReplacementEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplacementEvent::Moved { from, to } => {
                f.write_str("Event$ Moved | ValidCard$ Card.Self")?;
                if let Some(from) = from {
                    write!(f, " | Origin$ {}", from)?;
                }
                write!(f, " | Destination$ {}", to)
            }
            ReplacementEvent::EntersBattlefield => {
                f.write_str("Event$ Moved | ValidCard$ Card.Self | Destination$ Battlefield")
            }
            ReplacementEvent::Draw => f.write_str("Event$ Draw | ValidPlayer$ You"),
            ReplacementEvent::DamageDone => f.write_str("Event$ DamageDone | ValidTarget$ Card.Self"),
            ReplacementEvent::Destroy { valid } => write!(f, "Event$ Destroy | ValidCard$ {}", valid),
        }
    }
}

/// What a continuous static ability does to the objects it affects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticChange {
    /// Is every creature type.
    AllCreatureTypes,
    Colorless,
    AddKeyword(String),
    Pump { power: Amount, toughness: Amount },
    /// Named restriction the host enforces ("CantBlock").
    Restriction(String),
    /// Spells cost less to cast.
    ReduceCost(Amount),
}

impl std::fmt::Display for StaticChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticChange::AllCreatureTypes => f.write_str("AddAllCreatureTypes$ True"),
            StaticChange::Colorless => f.write_str("SetColor$ Colorless"),
            StaticChange::AddKeyword(k) => write!(f, "AddKeyword$ {}", k),
            StaticChange::Pump { power, toughness } => {
                write!(f, "AddPower$ {} | AddToughness$ {}", power, toughness)
            }
            StaticChange::Restriction(r) => write!(f, "Mode$ {}", r),
            StaticChange::ReduceCost(n) => write!(f, "Mode$ ReduceCost | Amount$ {}", n),
        }
    }
}

/// A static ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticAbility {
    pub affected: String,
    pub change: StaticChange,
    /// Works in every zone and applies before ordinary effects.
    pub characteristic_defining: bool,
}

/// How an activated ability is used.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activation {
    pub cost: Cost,
    /// Only as a sorcery.
    pub sorcery_speed: bool,
    /// Zone the host must be in.
    pub zone: Zone,
    /// A special action (doesn't use the stack).
    pub special_action: bool,
}

impl Activation {
    #[must_use]
    pub fn new(cost: Cost) -> Self {
        Self {
            cost,
            sorcery_speed: false,
            zone: Zone::Battlefield,
            special_action: false,
        }
    }

    /// Sorcery speed (builder pattern).
    #[must_use]
    pub fn sorcery(mut self) -> Self {
        self.sorcery_speed = true;
        self
    }

    /// Activate from another zone (builder pattern).
    #[must_use]
    pub fn from_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Make it a special action (builder pattern).
    #[must_use]
    pub fn special(mut self) -> Self {
        self.special_action = true;
        self
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AB$ Cost$ {} | ActivationZone$ {}", self.cost, self.zone)?;
        if self.sorcery_speed {
            f.write_str(" | SorcerySpeed$ True")?;
        }
        if self.special_action {
            f.write_str(" | SpecialAction$ True")?;
        }
        Ok(())
    }
}

/// How a castable ability's cost relates to the printed mana cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastCost {
    /// Its mana cost.
    Printed,
    /// Instead of its mana cost.
    Alternative(Cost),
    /// In addition to its mana cost, mandatory.
    Additional(Cost),
    /// In addition to its mana cost, optional; `repeatable` for
    /// Multikicker and Replicate.
    Optional { cost: Cost, repeatable: bool },
}

impl std::fmt::Display for CastCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastCost::Printed => f.write_str("Cost$ ManaCost"),
            CastCost::Alternative(c) => write!(f, "AlternativeCost$ {}", c),
            CastCost::Additional(c) => write!(f, "AdditionalCost$ {}", c),
            CastCost::Optional { cost, repeatable } => {
                write!(f, "OptionalCost$ {}", cost)?;
                if *repeatable {
                    f.write_str(" | Repeatable$ True")?;
                }
                Ok(())
            }
        }
    }
}

/// A way to cast the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastSpec {
    /// Name recorded when cast this way ("Flashback", "Kicked").
    pub name: String,
    pub from: Zone,
    pub cost: CastCost,
}

impl CastSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, from: Zone, cost: CastCost) -> Self {
        Self {
            name: name.into(),
            from,
            cost,
        }
    }
}

impl std::fmt::Display for CastSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SP$ {} | MayPlayFrom$ {} | {}", self.name, self.from, self.cost)
    }
}

/// When a behavior acts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Trigger(TriggerEvent),
    Replacement(ReplacementEvent),
    Static(StaticAbility),
    Activated(Activation),
    Cast(CastSpec),
}

/// Coarse behavior category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BehaviorKind {
    Trigger,
    Replacement,
    Static,
    Activated,
    Castable,
}

impl Mode {
    #[must_use]
    pub const fn kind(&self) -> BehaviorKind {
        match self {
            Mode::Trigger(_) => BehaviorKind::Trigger,
            Mode::Replacement(_) => BehaviorKind::Replacement,
            Mode::Static(_) => BehaviorKind::Static,
            Mode::Activated(_) => BehaviorKind::Activated,
            Mode::Cast(_) => BehaviorKind::Castable,
        }
    }
}

/// One ability: when, what, and under which condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    pub mode: Mode,
    pub effect: Effect,
    pub condition: Condition,
    /// "You may".
    pub optional: bool,
    /// Text shown to players, usually the keyword's reminder text.
    pub description: String,
}

impl Recipe {
    fn with_mode(mode: Mode, effect: Effect) -> Self {
        Self {
            mode,
            effect,
            condition: Condition::Always,
            optional: false,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn trigger(event: TriggerEvent, effect: Effect) -> Self {
        Self::with_mode(Mode::Trigger(event), effect)
    }

    #[must_use]
    pub fn replacement(event: ReplacementEvent, effect: Effect) -> Self {
        Self::with_mode(Mode::Replacement(event), effect)
    }

    /// A static ability affecting the host itself.
    #[must_use]
    pub fn static_self(change: StaticChange) -> Self {
        Self::static_on("Card.Self", change)
    }

    #[must_use]
    pub fn static_on(affected: impl Into<String>, change: StaticChange) -> Self {
        Self::with_mode(
            Mode::Static(StaticAbility {
                affected: affected.into(),
                change,
                characteristic_defining: false,
            }),
            Effect::Nothing,
        )
    }

    #[must_use]
    pub fn activated(activation: Activation, effect: Effect) -> Self {
        Self::with_mode(Mode::Activated(activation), effect)
    }

    #[must_use]
    pub fn cast(spec: CastSpec, effect: Effect) -> Self {
        Self::with_mode(Mode::Cast(spec), effect)
    }

    /// Gate on a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Mark as optional (builder pattern).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the player-facing text (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark a static ability as characteristic-defining (builder pattern).
    /// No effect on other modes.
    #[must_use]
    pub fn characteristic_defining(mut self) -> Self {
        if let Mode::Static(ability) = &mut self.mode {
            ability.characteristic_defining = true;
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> BehaviorKind {
        self.mode.kind()
    }

    /// The trigger event, if this is a triggered ability.
    #[must_use]
    pub fn trigger_event(&self) -> Option<&TriggerEvent> {
        match &self.mode {
            Mode::Trigger(event) => Some(event),
            _ => None,
        }
    }
}

impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.mode {
            Mode::Trigger(event) => write!(f, "{} | Execute$ {}", event, self.effect)?,
            Mode::Replacement(event) => write!(f, "{} | ReplaceWith$ {}", event, self.effect)?,
            Mode::Static(ability) => {
                write!(f, "S$ Affected$ {} | {}", ability.affected, ability.change)?;
                if ability.characteristic_defining {
                    f.write_str(" | CharacteristicDefining$ True")?;
                }
            }
            Mode::Activated(activation) => write!(f, "{} | {}", activation, self.effect)?,
            Mode::Cast(spec) => write!(f, "{} | {}", spec, self.effect)?,
        }
        if self.condition != Condition::Always {
            write!(f, " | CheckSVar$ {}", self.condition)?;
        }
        if self.optional {
            f.write_str(" | OptionalDecider$ You")?;
        }
        if !self.description.is_empty() {
            write!(f, " | Description$ {}", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::effect::Subject;

    #[test]
    fn test_kind() {
        let recipe = Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing);
        assert_eq!(recipe.kind(), BehaviorKind::Trigger);
        assert!(recipe.trigger_event().is_some());

        let recipe = Recipe::static_self(StaticChange::Colorless);
        assert_eq!(recipe.kind(), BehaviorKind::Static);
        assert!(recipe.trigger_event().is_none());
    }

    #[test]
    fn test_characteristic_defining_only_marks_statics() {
        let recipe = Recipe::static_self(StaticChange::AllCreatureTypes).characteristic_defining();
        match &recipe.mode {
            Mode::Static(ability) => assert!(ability.characteristic_defining),
            other => panic!("Expected static, got {:?}", other),
        }

        let trigger = Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing)
            .characteristic_defining();
        assert_eq!(
            trigger,
            Recipe::trigger(TriggerEvent::self_dies(), Effect::Nothing)
        );
    }

    #[test]
    fn test_render_trigger() {
        let recipe = Recipe::trigger(
            TriggerEvent::Blocks {
                valid: "Card.Self".into(),
            },
            Effect::pump(Subject::This, Amount::var("Bushido0"), Amount::var("Bushido0")),
        );
        let script = recipe.to_string();
        assert!(script.starts_with("Mode$ Blocks | ValidCard$ Card.Self | Execute$ DB$ Pump"));
        assert!(script.contains("NumAtt$ SVar$Bushido0"));
    }

    #[test]
    fn test_render_condition_and_optional() {
        let recipe = Recipe::trigger(TriggerEvent::self_enters(), Effect::Nothing)
            .with_condition(Condition::paid("Kicked"))
            .optional();
        let script = recipe.to_string();
        assert!(script.contains("CheckSVar$ Paid$Kicked"));
        assert!(script.ends_with("OptionalDecider$ You"));
    }
}
