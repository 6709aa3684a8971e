//! Declarative effect programs.
//!
//! Compiled behaviors carry their bodies as data so that copies of an
//! object reproduce them without recompiling, and so that a host can
//! interpret them however its engine resolves abilities.
//!
//! ## Effect Families
//!
//! - Stats and counters: `Pump`, `PutCounters`, `RemoveCounters`, `MoveCounters`
//! - Zone movement: `ChangeZone`, `Sacrifice`, `Destroy`, `Draw`, `Discard`, `Mill`
//! - Life and damage: `DealDamage`, `GainLife`, `LoseLife`, `PreventDamage`
//! - Objects: `CreateToken`, `TokenCopy`, `CopySpell`, `Attach`, `Cast`
//! - Composite: `Batch`, `Choice`, `Conditional`, `Pay`, `Unless`, `Repeat`,
//!   `Delayed`

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::characteristics::Cost;
use crate::core::Zone;
use crate::counters::CounterType;

/// A number an effect uses, possibly computed at resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i32),
    /// A derived variable on the host representation.
    Var(String),
    /// Count of objects matching a host-defined filter.
    Count(String),
    /// Counters of a type on the host.
    Counters(CounterType),
    /// The amount carried by the triggering event.
    EventAmount,
    /// Colors of mana spent to cast the host.
    ColorsSpent,
}

impl Amount {
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Amount::Var(name.into())
    }

    #[must_use]
    pub fn count(filter: impl Into<String>) -> Self {
        Amount::Count(filter.into())
    }
}

impl From<i32> for Amount {
    fn from(n: i32) -> Self {
        Amount::Fixed(n)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Fixed(n) => write!(f, "{}", n),
            Amount::Var(name) => write!(f, "SVar${}", name),
            Amount::Count(filter) => write!(f, "Count${}", filter),
            Amount::Counters(c) => write!(f, "Counters${}", c),
            Amount::EventAmount => f.write_str("TriggerCount$Amount"),
            Amount::ColorsSpent => f.write_str("Count$Sunburst"),
        }
    }
}

/// Who or what an effect applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// The host object.
    This,
    /// The host's controller.
    Controller,
    /// An object or player from the triggering event ("Blocker",
    /// "Attacker", "DefendingPlayer", "Card").
    Triggered(String),
    /// A chosen target.
    Targeted { filter: String, description: String },
    /// Every object or player matching a filter.
    Each(String),
    /// The creature the host is attached to.
    Equipped,
    Enchanted,
}

impl Subject {
    #[must_use]
    pub fn triggered(role: impl Into<String>) -> Self {
        Subject::Triggered(role.into())
    }

    #[must_use]
    pub fn target(filter: impl Into<String>, description: impl Into<String>) -> Self {
        Subject::Targeted {
            filter: filter.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn each(filter: impl Into<String>) -> Self {
        Subject::Each(filter.into())
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::This => f.write_str("Self"),
            Subject::Controller => f.write_str("You"),
            Subject::Triggered(role) => write!(f, "Triggered{}", role),
            Subject::Targeted { filter, .. } => write!(f, "Targeted({})", filter),
            Subject::Each(filter) => write!(f, "Each({})", filter),
            Subject::Equipped => f.write_str("Equipped"),
            Subject::Enchanted => f.write_str("Enchanted"),
        }
    }
}

/// How long a one-shot modification lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    #[default]
    EndOfTurn,
    EndOfCombat,
    Permanent,
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Duration::EndOfTurn => "UntilEndOfTurn",
            Duration::EndOfCombat => "UntilEndOfCombat",
            Duration::Permanent => "Permanent",
        })
    }
}

/// How a moved or created object enters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryModifier {
    Tapped,
    Attacking,
    WithCounters(CounterType, Amount),
    Transformed,
    FaceDown,
    /// Gains a keyword (by tag) while it remains.
    WithKeyword(String),
    /// Exiled when it would leave the battlefield.
    ExileIfLeaves,
}

impl std::fmt::Display for EntryModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryModifier::Tapped => f.write_str("Tapped"),
            EntryModifier::Attacking => f.write_str("Attacking"),
            EntryModifier::WithCounters(c, n) => write!(f, "WithCounters({} {})", n, c),
            EntryModifier::Transformed => f.write_str("Transformed"),
            EntryModifier::FaceDown => f.write_str("FaceDown"),
            EntryModifier::WithKeyword(k) => write!(f, "WithKeyword({})", k),
            EntryModifier::ExileIfLeaves => f.write_str("ExileIfLeaves"),
        }
    }
}

/// An effect program.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    // === Stats and counters ===
    Pump {
        subject: Subject,
        power: Amount,
        toughness: Amount,
        /// Keyword tags granted alongside.
        keywords: Vec<String>,
        duration: Duration,
    },
    PutCounters {
        subject: Subject,
        counter: CounterType,
        amount: Amount,
    },
    RemoveCounters {
        subject: Subject,
        counter: CounterType,
        amount: Amount,
    },
    MoveCounters {
        from: Subject,
        to: Subject,
        counter: CounterType,
        amount: Amount,
    },

    // === Zone movement ===
    ChangeZone {
        subject: Subject,
        from: Option<Zone>,
        to: Zone,
        modifiers: Vec<EntryModifier>,
    },
    Sacrifice {
        /// Who sacrifices.
        player: Subject,
        filter: String,
        amount: Amount,
    },
    Destroy {
        subject: Subject,
    },
    Draw {
        player: Subject,
        amount: Amount,
    },
    Discard {
        player: Subject,
        amount: Amount,
    },
    Mill {
        player: Subject,
        amount: Amount,
    },

    // === Life and damage ===
    DealDamage {
        subject: Subject,
        amount: Amount,
    },
    GainLife {
        player: Subject,
        amount: Amount,
    },
    LoseLife {
        player: Subject,
        amount: Amount,
    },
    PreventDamage {
        amount: Amount,
    },

    // === Objects ===
    CreateToken {
        token: String,
        amount: Amount,
        modifiers: Vec<EntryModifier>,
    },
    TokenCopy {
        subject: Subject,
        amount: Amount,
        /// Copy exceptions ("white Zombie, no mana cost").
        except: String,
        modifiers: Vec<EntryModifier>,
    },
    CopySpell {
        amount: Amount,
    },
    Attach {
        to: Subject,
    },
    /// Cast a card without going through the normal casting rules.
    Cast {
        subject: Subject,
        from: Zone,
        without_paying: bool,
    },
    /// Reveal cards from the top of the library until one matches, then
    /// run `then` on it.
    RevealUntil {
        filter: String,
        then: Box<Effect>,
    },
    LookAtTop {
        amount: Amount,
        /// What happens to the cards looked at.
        then: Box<Effect>,
    },

    // === Host state ===
    TurnFaceUp,
    Transform,
    Tap {
        subject: Subject,
    },
    Untap {
        subject: Subject,
    },
    /// Counter the triggering spell or ability unless its controller pays.
    CounterUnlessPaid {
        cost: Cost,
    },
    /// Mark the host with a named flag ("Renowned", "MustBlock").
    SetFlag {
        name: String,
    },
    /// Becomes an artifact creature (or other `types`) for a while.
    Animate {
        subject: Subject,
        types: String,
        duration: Duration,
    },

    // === Composite ===
    Batch(Vec<Effect>),
    /// Choose one.
    Choice(Vec<Effect>),
    Conditional {
        condition: Condition,
        effect: Box<Effect>,
    },
    /// You may pay `cost`. If you do, `then` happens.
    Pay {
        cost: Cost,
        then: Box<Effect>,
    },
    /// Pay `cost` or `otherwise` happens.
    Unless {
        cost: Cost,
        /// Multiplier on the cost (cumulative upkeep).
        times: Amount,
        otherwise: Box<Effect>,
    },
    Repeat {
        times: Amount,
        effect: Box<Effect>,
    },
    /// Set up a delayed trigger at `step`.
    Delayed {
        step: String,
        effect: Box<Effect>,
    },
    Nothing,
}

impl Effect {
    /// +X/+X until end of turn.
    #[must_use]
    pub fn pump(subject: Subject, power: impl Into<Amount>, toughness: impl Into<Amount>) -> Self {
        Effect::Pump {
            subject,
            power: power.into(),
            toughness: toughness.into(),
            keywords: Vec::new(),
            duration: Duration::EndOfTurn,
        }
    }

    /// Grant keywords until end of turn.
    #[must_use]
    pub fn grant(subject: Subject, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Effect::Pump {
            subject,
            power: Amount::Fixed(0),
            toughness: Amount::Fixed(0),
            keywords: keywords.into_iter().map(Into::into).collect(),
            duration: Duration::EndOfTurn,
        }
    }

    #[must_use]
    pub fn put_counters(subject: Subject, counter: CounterType, amount: impl Into<Amount>) -> Self {
        Effect::PutCounters {
            subject,
            counter,
            amount: amount.into(),
        }
    }

    #[must_use]
    pub fn remove_counters(
        subject: Subject,
        counter: CounterType,
        amount: impl Into<Amount>,
    ) -> Self {
        Effect::RemoveCounters {
            subject,
            counter,
            amount: amount.into(),
        }
    }

    #[must_use]
    pub fn move_to(subject: Subject, from: Option<Zone>, to: Zone) -> Self {
        Effect::ChangeZone {
            subject,
            from,
            to,
            modifiers: Vec::new(),
        }
    }

    /// The host returns to the battlefield with modifiers.
    #[must_use]
    pub fn return_to_battlefield(from: Zone, modifiers: Vec<EntryModifier>) -> Self {
        Effect::ChangeZone {
            subject: Subject::This,
            from: Some(from),
            to: Zone::Battlefield,
            modifiers,
        }
    }

    #[must_use]
    pub fn sacrifice_self() -> Self {
        Effect::Sacrifice {
            player: Subject::Controller,
            filter: "Self".into(),
            amount: Amount::Fixed(1),
        }
    }

    #[must_use]
    pub fn draw(amount: impl Into<Amount>) -> Self {
        Effect::Draw {
            player: Subject::Controller,
            amount: amount.into(),
        }
    }

    #[must_use]
    pub fn token(token: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Effect::CreateToken {
            token: token.into(),
            amount: amount.into(),
            modifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        Effect::Batch(effects.into_iter().collect())
    }

    #[must_use]
    pub fn when(condition: Condition, effect: Effect) -> Self {
        Effect::Conditional {
            condition,
            effect: Box::new(effect),
        }
    }

    #[must_use]
    pub fn unless(cost: Cost, otherwise: Effect) -> Self {
        Effect::Unless {
            cost,
            times: Amount::Fixed(1),
            otherwise: Box::new(otherwise),
        }
    }

    #[must_use]
    pub fn pay(cost: Cost, then: Effect) -> Self {
        Effect::Pay {
            cost,
            then: Box::new(then),
        }
    }

    #[must_use]
    pub fn delayed(step: impl Into<String>, effect: Effect) -> Self {
        Effect::Delayed {
            step: step.into(),
            effect: Box::new(effect),
        }
    }

    /// Short name of the effect, used as the script verb.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Effect::Pump { .. } => "Pump",
            Effect::PutCounters { .. } => "PutCounter",
            Effect::RemoveCounters { .. } => "RemoveCounter",
            Effect::MoveCounters { .. } => "MoveCounter",
            Effect::ChangeZone { .. } => "ChangeZone",
            Effect::Sacrifice { .. } => "Sacrifice",
            Effect::Destroy { .. } => "Destroy",
            Effect::Draw { .. } => "Draw",
            Effect::Discard { .. } => "Discard",
            Effect::Mill { .. } => "Mill",
            Effect::DealDamage { .. } => "DealDamage",
            Effect::GainLife { .. } => "GainLife",
            Effect::LoseLife { .. } => "LoseLife",
            Effect::PreventDamage { .. } => "PreventDamage",
            Effect::CreateToken { .. } => "Token",
            Effect::TokenCopy { .. } => "CopyPermanent",
            Effect::CopySpell { .. } => "CopySpellAbility",
            Effect::Attach { .. } => "Attach",
            Effect::Cast { .. } => "Play",
            Effect::RevealUntil { .. } => "DigUntil",
            Effect::LookAtTop { .. } => "Dig",
            Effect::TurnFaceUp => "SetState",
            Effect::Transform => "Transform",
            Effect::Tap { .. } => "Tap",
            Effect::Untap { .. } => "Untap",
            Effect::CounterUnlessPaid { .. } => "Counter",
            Effect::SetFlag { .. } => "SetFlag",
            Effect::Animate { .. } => "Animate",
            Effect::Batch(_) => "Batch",
            Effect::Choice(_) => "Charm",
            Effect::Conditional { .. } => "If",
            Effect::Pay { .. } => "Pay",
            Effect::Unless { .. } => "Unless",
            Effect::Repeat { .. } => "Repeat",
            Effect::Delayed { .. } => "DelayedTrigger",
            Effect::Nothing => "Nothing",
        }
    }

    /// Visit every nested effect, depth first, including `self`.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Effect)) {
        visit(self);
        match self {
            Effect::Batch(effects) | Effect::Choice(effects) => {
                for e in effects {
                    e.walk(visit);
                }
            }
            Effect::Conditional { effect, .. }
            | Effect::Repeat { effect, .. }
            | Effect::Delayed { effect, .. } => effect.walk(visit),
            Effect::Unless { otherwise, .. } => otherwise.walk(visit),
            Effect::Pay { then, .. } => then.walk(visit),
            Effect::RevealUntil { then, .. } | Effect::LookAtTop { then, .. } => then.walk(visit),
            _ => {}
        }
    }

    /// Every variable name the program reads.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |e| {
            let amounts: Vec<&Amount> = match e {
                Effect::Pump {
                    power, toughness, ..
                } => vec![power, toughness],
                Effect::PutCounters { amount, .. }
                | Effect::RemoveCounters { amount, .. }
                | Effect::MoveCounters { amount, .. }
                | Effect::Sacrifice { amount, .. }
                | Effect::Draw { amount, .. }
                | Effect::Discard { amount, .. }
                | Effect::Mill { amount, .. }
                | Effect::DealDamage { amount, .. }
                | Effect::GainLife { amount, .. }
                | Effect::LoseLife { amount, .. }
                | Effect::PreventDamage { amount }
                | Effect::CreateToken { amount, .. }
                | Effect::TokenCopy { amount, .. }
                | Effect::CopySpell { amount }
                | Effect::LookAtTop { amount, .. } => vec![amount],
                Effect::Unless { times, .. } | Effect::Repeat { times, .. } => vec![times],
                _ => Vec::new(),
            };
            for amount in amounts {
                if let Amount::Var(name) = amount {
                    if !names.contains(&name.as_str()) {
                        names.push(name.as_str());
                    }
                }
            }
        });
        names
    }
}

fn join<T: std::fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DB$ {}", self.verb())?;
        match self {
            Effect::Pump {
                subject,
                power,
                toughness,
                keywords,
                duration,
            } => {
                write!(f, " | Defined$ {} | NumAtt$ {} | NumDef$ {}", subject, power, toughness)?;
                if !keywords.is_empty() {
                    write!(f, " | KW$ {}", keywords.join(" & "))?;
                }
                write!(f, " | Duration$ {}", duration)
            }
            Effect::PutCounters {
                subject,
                counter,
                amount,
            }
            | Effect::RemoveCounters {
                subject,
                counter,
                amount,
            } => write!(
                f,
                " | Defined$ {} | CounterType$ {} | CounterNum$ {}",
                subject, counter, amount
            ),
            Effect::MoveCounters {
                from,
                to,
                counter,
                amount,
            } => write!(
                f,
                " | Source$ {} | Defined$ {} | CounterType$ {} | CounterNum$ {}",
                from, to, counter, amount
            ),
            Effect::ChangeZone {
                subject,
                from,
                to,
                modifiers,
            } => {
                write!(f, " | Defined$ {}", subject)?;
                if let Some(from) = from {
                    write!(f, " | Origin$ {}", from)?;
                }
                write!(f, " | Destination$ {}", to)?;
                if !modifiers.is_empty() {
                    write!(f, " | With$ {}", join(modifiers, " & "))?;
                }
                Ok(())
            }
            Effect::Sacrifice {
                player,
                filter,
                amount,
            } => write!(f, " | Defined$ {} | SacValid$ {} | Amount$ {}", player, filter, amount),
            Effect::Destroy { subject } | Effect::Tap { subject } | Effect::Untap { subject } => {
                write!(f, " | Defined$ {}", subject)
            }
            Effect::Draw { player, amount }
            | Effect::Discard { player, amount }
            | Effect::Mill { player, amount }
            | Effect::GainLife { player, amount }
            | Effect::LoseLife { player, amount } => {
                write!(f, " | Defined$ {} | Amount$ {}", player, amount)
            }
            Effect::DealDamage { subject, amount } => {
                write!(f, " | Defined$ {} | NumDmg$ {}", subject, amount)
            }
            Effect::PreventDamage { amount } | Effect::CopySpell { amount } => {
                write!(f, " | Amount$ {}", amount)
            }
            Effect::CreateToken {
                token,
                amount,
                modifiers,
            } => {
                write!(f, " | TokenScript$ {} | TokenAmount$ {}", token, amount)?;
                if !modifiers.is_empty() {
                    write!(f, " | With$ {}", join(modifiers, " & "))?;
                }
                Ok(())
            }
            Effect::TokenCopy {
                subject,
                amount,
                except,
                modifiers,
            } => {
                write!(f, " | Defined$ {} | NumCopies$ {}", subject, amount)?;
                if !except.is_empty() {
                    write!(f, " | Except$ {}", except)?;
                }
                if !modifiers.is_empty() {
                    write!(f, " | With$ {}", join(modifiers, " & "))?;
                }
                Ok(())
            }
            Effect::Attach { to } => write!(f, " | Defined$ {}", to),
            Effect::Cast {
                subject,
                from,
                without_paying,
            } => write!(
                f,
                " | Defined$ {} | Origin$ {} | WithoutManaCost$ {}",
                subject, from, without_paying
            ),
            Effect::RevealUntil { filter, then } => {
                write!(f, " | Valid$ {} | Then$ ({})", filter, then)
            }
            Effect::LookAtTop { amount, then } => {
                write!(f, " | DigNum$ {} | Then$ ({})", amount, then)
            }
            Effect::TurnFaceUp => f.write_str(" | Mode$ TurnFaceUp"),
            Effect::Transform | Effect::Nothing => Ok(()),
            Effect::CounterUnlessPaid { cost } => write!(f, " | UnlessCost$ {}", cost),
            Effect::SetFlag { name } => write!(f, " | Flag$ {}", name),
            Effect::Animate {
                subject,
                types,
                duration,
            } => write!(
                f,
                " | Defined$ {} | Types$ {} | Duration$ {}",
                subject, types, duration
            ),
            Effect::Pay { cost, then } => write!(f, " | Cost$ {} | Then$ ({})", cost, then),
            Effect::Batch(effects) => write!(f, " | SubAbilities$ [{}]", join(effects, "; ")),
            Effect::Choice(effects) => write!(f, " | Choices$ [{}]", join(effects, "; ")),
            Effect::Conditional { condition, effect } => {
                write!(f, " | Condition$ {} | Then$ ({})", condition, effect)
            }
            Effect::Unless {
                cost,
                times,
                otherwise,
            } => write!(
                f,
                " | UnlessCost$ {} | UnlessTimes$ {} | Else$ ({})",
                cost, times, otherwise
            ),
            Effect::Repeat { times, effect } => {
                write!(f, " | RepeatNum$ {} | Then$ ({})", times, effect)
            }
            Effect::Delayed { step, effect } => write!(f, " | At$ {} | Then$ ({})", step, effect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_builder() {
        let effect = Effect::pump(Subject::This, Amount::var("Bushido1"), Amount::var("Bushido1"));
        match &effect {
            Effect::Pump {
                duration, keywords, ..
            } => {
                assert_eq!(*duration, Duration::EndOfTurn);
                assert!(keywords.is_empty());
            }
            other => panic!("Expected Pump, got {:?}", other),
        }
        assert_eq!(effect.variables(), vec!["Bushido1"]);
    }

    #[test]
    fn test_variables_walk_nested() {
        let effect = Effect::batch([
            Effect::draw(Amount::var("A")),
            Effect::when(
                Condition::Always,
                Effect::put_counters(Subject::This, CounterType::Time, Amount::var("B")),
            ),
            Effect::draw(Amount::var("A")),
        ]);
        assert_eq!(effect.variables(), vec!["A", "B"]);
    }

    #[test]
    fn test_display_script() {
        let effect = Effect::put_counters(Subject::This, CounterType::PlusOnePlusOne, 2);
        assert_eq!(
            effect.to_string(),
            "DB$ PutCounter | Defined$ Self | CounterType$ +1/+1 | CounterNum$ 2"
        );
        assert_eq!(Effect::Nothing.to_string(), "DB$ Nothing");
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::unless(Cost::parse("1 R").unwrap(), Effect::sacrifice_self());
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
