//! Keyword grammar: the closed set of keyword variants and the tag parser.
//!
//! Card content encodes keywords as short tags. Two spellings are
//! accepted:
//!
//! - colon form, one field per colon: `"Bushido:2"`, `"Suspend:3:1 R"`,
//!   `"Equip:1:Creature.Legendary:legendary creature"`
//! - printed form, fields after the name: `"Bushido 2"`, `"Equip 2"`,
//!   `"Protection from red"`, `"Islandwalk"`, `"Swampcycling 2"`
//!
//! Unknown names become [`Keyword::Other`] and behave as static text.
//! Known names with missing fields or non-numeric magnitudes are errors.
//! Extra trailing fields are tolerated unless
//! [`CompilerConfig::strict_field_count`] is set.
//!
//! ```
//! use ccg_layers::keywords::{Keyword, Magnitude};
//!
//! assert_eq!(Keyword::parse("Bushido 2").unwrap(), Keyword::Bushido(2));
//! assert_eq!(
//!     Keyword::parse("Modular:Sunburst").unwrap(),
//!     Keyword::Modular(Magnitude::Sunburst)
//! );
//! assert!(Keyword::parse("Bushido two").is_err());
//! assert_eq!(Keyword::Bushido(2).to_string(), "Bushido:2");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::characteristics::Cost;
use crate::core::CompilerConfig;
use crate::error::{CardError, Result};

/// A keyword magnitude that may be variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Magnitude {
    Fixed(u32),
    /// Chosen on casting (`Suspend X`).
    X,
    /// Number of colors of mana spent to cast the object.
    Sunburst,
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Magnitude::Fixed(n) => write!(f, "{}", n),
            Magnitude::X => f.write_str("X"),
            Magnitude::Sunburst => f.write_str("Sunburst"),
        }
    }
}

/// Restriction on what an Equip ability may target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipRestriction {
    /// Filter expression understood by the host engine.
    pub filter: String,
    /// Human-readable form ("legendary creature").
    pub description: String,
}

/// A keyword ability with its typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    // === Static text: presence is all that matters ===
    Flying,
    FirstStrike,
    DoubleStrike,
    Deathtouch,
    Defender,
    Fear,
    Flash,
    Haste,
    Hexproof,
    Indestructible,
    Intimidate,
    Lifelink,
    Menace,
    Reach,
    Shroud,
    Trample,
    Vigilance,
    Shadow,
    Horsemanship,
    Skulk,
    Banding,
    Infect,
    Wither,
    SplitSecond,
    Phasing,
    Fuse,
    Convoke,
    Delve,
    Improvise,
    Assist,
    Partner,
    Protection(String),
    Landwalk(String),
    Toxic(u32),
    Enchant(String),

    // === Static abilities ===
    Changeling,
    Devoid,
    Affinity(String),

    // === Triggered abilities and replacement effects ===
    Bushido(u32),
    Rampage(u32),
    Flanking,
    Bloodthirst(u32),
    Modular(Magnitude),
    Graft(u32),
    Evolve,
    Exalted,
    Undying,
    Persist,
    Cascade,
    Storm,
    Gravestorm,
    Ripple(u32),
    Vanishing(u32),
    Fading(u32),
    Dredge(u32),
    Annihilator(u32),
    Afflict(u32),
    Afterlife(u32),
    Mentor,
    Training,
    Exploit,
    Extort,
    Fabricate(u32),
    Renown(u32),
    Myriad,
    Melee,
    Dethrone,
    Soulshift(u32),
    Riot,
    Unleash,
    Devour(u32),
    Tribute(u32),
    Sunburst,
    Absorb(u32),
    Provoke,
    Poisonous(u32),
    Frenzy(u32),
    BattleCry,
    LivingWeapon,
    Decayed,
    Hideaway(u32),
    Enlist,
    Backup(u32),
    Prowess,
    Amplify { amount: u32, types: Vec<String> },
    Champion(String),
    Ward(Cost),
    Echo(Cost),
    CumulativeUpkeep(Cost),
    Ingest,
    Rebound,
    UmbraArmor,
    Ravenous,

    // === Activated abilities ===
    Equip {
        cost: Cost,
        restriction: Option<EquipRestriction>,
    },
    Fortify(Cost),
    Reconfigure(Cost),
    Cycling(Cost),
    Typecycling { kind: String, cost: Cost },
    Outlast(Cost),
    LevelUp(Cost),
    Transmute(Cost),
    Scavenge(Cost),
    Unearth(Cost),
    Embalm(Cost),
    Eternalize(Cost),
    Encore(Cost),
    Ninjutsu(Cost),
    Crew(u32),

    // === Casting permissions and alternative/additional costs ===
    /// `None` means "its mana cost".
    Flashback(Option<Cost>),
    Retrace,
    JumpStart,
    Madness(Cost),
    Morph(Cost),
    Megamorph(Cost),
    Disguise(Cost),
    Suspend { time: Magnitude, cost: Cost },
    Kicker { cost: Cost, second: Option<Cost> },
    Multikicker(Cost),
    Buyback(Cost),
    Entwine(Cost),
    Evoke(Cost),
    Dash(Cost),
    Blitz(Cost),
    Spectacle(Cost),
    Surge(Cost),
    Prowl(Cost),
    Emerge(Cost),
    Escape { cost: Cost, exile: u32 },
    Foretell(Cost),
    Plot(Cost),
    Miracle(Cost),
    Overload(Cost),
    Replicate(Cost),
    Bestow(Cost),
    Splice { onto: String, cost: Cost },
    Disturb(Cost),
    Squad(Cost),

    /// Any keyword text the grammar does not know. Treated as static text.
    Other(String),
}

/// Canonical keyword names, used to recognise the printed form.
pub const KNOWN_NAMES: &[&str] = &[
    "Flying", "First Strike", "Double Strike", "Deathtouch", "Defender", "Fear", "Flash",
    "Haste", "Hexproof", "Indestructible", "Intimidate", "Lifelink", "Menace", "Reach",
    "Shroud", "Trample", "Vigilance", "Shadow", "Horsemanship", "Skulk", "Banding", "Infect",
    "Wither", "Split second", "Phasing", "Fuse", "Convoke", "Delve", "Improvise", "Assist",
    "Partner", "Protection", "Landwalk", "Toxic", "Enchant", "Changeling", "Devoid",
    "Affinity", "Bushido", "Rampage", "Flanking", "Bloodthirst", "Modular", "Graft",
    "Evolve", "Exalted", "Undying", "Persist", "Cascade", "Storm", "Gravestorm", "Ripple",
    "Vanishing", "Fading", "Dredge", "Annihilator", "Afflict", "Afterlife", "Mentor",
    "Training", "Exploit", "Extort", "Fabricate", "Renown", "Myriad", "Melee", "Dethrone",
    "Soulshift", "Riot", "Unleash", "Devour", "Tribute", "Sunburst", "Absorb", "Provoke",
    "Poisonous", "Frenzy", "Battle cry", "Living weapon", "Decayed", "Hideaway", "Enlist",
    "Backup", "Prowess", "Amplify", "Champion", "Ward", "Echo", "Cumulative upkeep",
    "Ingest", "Rebound", "Umbra armor", "Ravenous", "Equip", "Fortify", "Reconfigure",
    "Cycling", "Typecycling", "Outlast", "Level up", "Transmute", "Scavenge", "Unearth",
    "Embalm", "Eternalize", "Encore", "Ninjutsu", "Crew", "Flashback", "Retrace",
    "Jump-start", "Madness", "Morph", "Megamorph", "Disguise", "Suspend", "Kicker",
    "Multikicker", "Buyback", "Entwine", "Evoke", "Dash", "Blitz", "Spectacle", "Surge",
    "Prowl", "Emerge", "Escape", "Foretell", "Plot", "Miracle", "Overload", "Replicate",
    "Bestow", "Splice", "Disturb", "Squad",
];

/// Older or alternate spellings.
const ALIASES: &[(&str, &str)] = &[
    ("Totem armor", "Umbra armor"),
    ("Jumpstart", "Jump-start"),
    ("TypeCycling", "Typecycling"),
    ("LevelUp", "Level up"),
    ("CumulativeUpkeep", "Cumulative upkeep"),
    ("Living Weapon", "Living weapon"),
    ("Battle Cry", "Battle cry"),
    ("Split Second", "Split second"),
];

fn canonical_name(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    KNOWN_NAMES
        .iter()
        .copied()
        .find(|n| n.eq_ignore_ascii_case(raw))
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(raw))
                .map(|(_, name)| *name)
        })
}

/// A tag split into its name and fields.
struct Fields<'a> {
    tag: &'a str,
    name: &'static str,
    args: Vec<String>,
    /// Written in printed form (fields after a space rather than colons).
    printed: bool,
    strict: bool,
}

impl<'a> Fields<'a> {
    fn split(tag: &'a str, strict: bool) -> Option<Self> {
        let fields = |name, args, printed| Fields {
            tag,
            name,
            args,
            printed,
            strict,
        };

        if let Some((head, rest)) = tag.split_once(':') {
            let args: Vec<String> = rest.split(':').map(|s| s.trim().to_string()).collect();
            if let Some(name) = canonical_name(head) {
                return Some(fields(name, args, false));
            }
            if let Some(kind) = strip_suffix_ci(head.trim(), "cycling") {
                let mut all = vec![kind.trim().to_string()];
                all.extend(args);
                return Some(fields("Typecycling", all, false));
            }
            if let Some(land) = strip_suffix_ci(head.trim(), "walk") {
                return Some(fields("Landwalk", vec![land.trim().to_string()], false));
            }
            return None;
        }

        if let Some(name) = canonical_name(tag) {
            return Some(fields(name, Vec::new(), true));
        }

        // Longest known name followed by a space.
        let mut best: Option<(&'static str, &str)> = None;
        for candidate in KNOWN_NAMES.iter().copied().chain(ALIASES.iter().map(|(a, _)| *a)) {
            if tag.len() > candidate.len()
                && tag.is_char_boundary(candidate.len())
                && tag[..candidate.len()].eq_ignore_ascii_case(candidate)
                && tag[candidate.len()..].starts_with(' ')
                && best.map_or(true, |(b, _)| candidate.len() > b.len())
            {
                best = Some((candidate, tag[candidate.len()..].trim()));
            }
        }
        if let Some((name, rest)) = best {
            let name = canonical_name(name)?;
            return Some(fields(name, vec![rest.to_string()], true));
        }

        // "Swampcycling 2", "Basic landcycling 1"
        let lower = tag.to_ascii_lowercase();
        if let Some(pos) = lower.find("cycling") {
            let end = pos + "cycling".len();
            if pos > 0 && (end == tag.len() || tag[end..].starts_with(' ')) {
                let kind = tag[..pos].trim().to_string();
                let mut args = vec![kind];
                let rest = tag[end..].trim();
                if !rest.is_empty() {
                    args.push(rest.to_string());
                }
                return Some(fields("Typecycling", args, true));
            }
        }

        // "Islandwalk", "Nonbasic landwalk"
        if let Some(land) = strip_suffix_ci(tag, "walk") {
            if !land.trim().is_empty() {
                return Some(fields("Landwalk", vec![land.trim().to_string()], true));
            }
        }
        None
    }

    fn error(&self, reason: impl Into<String>) -> CardError {
        CardError::malformed(self.tag, reason)
    }

    /// Check the number of fields. Missing fields are always an error;
    /// extra fields only in strict mode.
    fn arity(&self, min: usize, max: usize) -> Result<()> {
        if self.args.len() < min {
            return Err(self.error(format!(
                "{} expects at least {} field(s), found {}",
                self.name,
                min,
                self.args.len()
            )));
        }
        if self.strict && self.args.len() > max {
            return Err(self.error(format!(
                "{} expects at most {} field(s), found {}",
                self.name,
                max,
                self.args.len()
            )));
        }
        Ok(())
    }

    fn unit(&self, keyword: Keyword) -> Result<Keyword> {
        self.arity(0, 0)?;
        Ok(keyword)
    }

    fn field(&self, index: usize) -> Result<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.error(format!("missing field {}", index + 1)))
    }

    fn number(&self, index: usize) -> Result<u32> {
        let text = self.field(index)?;
        text.parse()
            .map_err(|_| self.error(format!("magnitude '{}' is not a number", text)))
    }

    fn magnitude(&self, min: usize, max: usize) -> Result<u32> {
        self.arity(min.max(1), max)?;
        self.number(0)
    }

    fn variable(&self, index: usize, allow_sunburst: bool) -> Result<Magnitude> {
        let text = self.field(index)?;
        if text.eq_ignore_ascii_case("X") {
            return Ok(Magnitude::X);
        }
        if allow_sunburst && text.eq_ignore_ascii_case("Sunburst") {
            return Ok(Magnitude::Sunburst);
        }
        text.parse()
            .map(Magnitude::Fixed)
            .map_err(|_| self.error(format!("magnitude '{}' is not a number", text)))
    }

    fn cost(&self, index: usize) -> Result<Cost> {
        let text = self.field(index)?;
        Cost::parse(text).map_err(|_| self.error(format!("cost '{}' is malformed", text)))
    }

    fn optional_cost(&self, index: usize) -> Result<Option<Cost>> {
        match self.args.get(index).map(|s| s.trim()) {
            None | Some("") => Ok(None),
            Some(_) => self.cost(index).map(Some),
        }
    }

    fn text(&self, index: usize, prefixes: &[&str]) -> Result<String> {
        let mut text = self.field(index)?;
        for prefix in prefixes {
            if let Some(rest) = strip_prefix_ci(text, prefix) {
                text = rest.trim_start();
            }
        }
        Ok(text.to_string())
    }

    fn cost_keyword(&self, build: fn(Cost) -> Keyword) -> Result<Keyword> {
        self.arity(1, 1)?;
        Ok(build(self.cost(0)?))
    }

    /// Split the single printed-form field into `first rest` at the first
    /// space, so that two-field grammars work without colons.
    fn split_printed(&mut self) {
        if self.printed && self.args.len() == 1 {
            if let Some((first, rest)) = self.args[0].clone().split_once(' ') {
                self.args = vec![first.trim().to_string(), rest.trim().to_string()];
            }
        }
    }
}

fn strip_suffix_ci<'s>(text: &'s str, suffix: &str) -> Option<&'s str> {
    if text.len() > suffix.len() && text.is_char_boundary(text.len() - suffix.len()) {
        let (head, tail) = text.split_at(text.len() - suffix.len());
        if tail.eq_ignore_ascii_case(suffix) {
            return Some(head);
        }
    }
    None
}

fn strip_prefix_ci<'s>(text: &'s str, prefix: &str) -> Option<&'s str> {
    if text.len() >= prefix.len() && text.is_char_boundary(prefix.len()) {
        let (head, tail) = text.split_at(prefix.len());
        if head.eq_ignore_ascii_case(prefix) {
            return Some(tail);
        }
    }
    None
}

impl Keyword {
    /// Parse a tag with the default (lenient) configuration.
    pub fn parse(tag: &str) -> Result<Self> {
        Self::parse_with(tag, &CompilerConfig::default())
    }

    /// Parse a tag.
    pub fn parse_with(tag: &str, config: &CompilerConfig) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CardError::malformed(tag, "empty keyword"));
        }
        let Some(mut f) = Fields::split(tag, config.strict_field_count) else {
            return Ok(Keyword::Other(tag.to_string()));
        };

        use Keyword as K;
        let keyword = match f.name {
            "Flying" => f.unit(K::Flying)?,
            "First Strike" => f.unit(K::FirstStrike)?,
            "Double Strike" => f.unit(K::DoubleStrike)?,
            "Deathtouch" => f.unit(K::Deathtouch)?,
            "Defender" => f.unit(K::Defender)?,
            "Fear" => f.unit(K::Fear)?,
            "Flash" => f.unit(K::Flash)?,
            "Haste" => f.unit(K::Haste)?,
            "Hexproof" => f.unit(K::Hexproof)?,
            "Indestructible" => f.unit(K::Indestructible)?,
            "Intimidate" => f.unit(K::Intimidate)?,
            "Lifelink" => f.unit(K::Lifelink)?,
            "Menace" => f.unit(K::Menace)?,
            "Reach" => f.unit(K::Reach)?,
            "Shroud" => f.unit(K::Shroud)?,
            "Trample" => f.unit(K::Trample)?,
            "Vigilance" => f.unit(K::Vigilance)?,
            "Shadow" => f.unit(K::Shadow)?,
            "Horsemanship" => f.unit(K::Horsemanship)?,
            "Skulk" => f.unit(K::Skulk)?,
            "Banding" => f.unit(K::Banding)?,
            "Infect" => f.unit(K::Infect)?,
            "Wither" => f.unit(K::Wither)?,
            "Split second" => f.unit(K::SplitSecond)?,
            "Phasing" => f.unit(K::Phasing)?,
            "Fuse" => f.unit(K::Fuse)?,
            "Convoke" => f.unit(K::Convoke)?,
            "Delve" => f.unit(K::Delve)?,
            "Improvise" => f.unit(K::Improvise)?,
            "Assist" => f.unit(K::Assist)?,
            "Partner" => f.unit(K::Partner)?,
            "Protection" => {
                f.arity(1, 2)?;
                // Colon form puts the description last: "Protection:Card.Red:red".
                let index = f.args.len() - 1;
                K::Protection(f.text(index, &["from "])?)
            }
            "Landwalk" => {
                f.arity(1, 1)?;
                K::Landwalk(f.text(0, &[])?)
            }
            "Toxic" => K::Toxic(f.magnitude(1, 1)?),
            "Enchant" => {
                f.arity(1, 2)?;
                K::Enchant(f.text(0, &[])?)
            }
            "Changeling" => f.unit(K::Changeling)?,
            "Devoid" => f.unit(K::Devoid)?,
            "Affinity" => {
                f.arity(1, 2)?;
                K::Affinity(f.text(0, &["for "])?)
            }
            "Bushido" => K::Bushido(f.magnitude(1, 1)?),
            "Rampage" => K::Rampage(f.magnitude(1, 1)?),
            "Flanking" => f.unit(K::Flanking)?,
            "Bloodthirst" => K::Bloodthirst(f.magnitude(1, 1)?),
            "Modular" => {
                f.arity(1, 1)?;
                K::Modular(f.variable(0, true)?)
            }
            "Graft" => K::Graft(f.magnitude(1, 1)?),
            "Evolve" => f.unit(K::Evolve)?,
            "Exalted" => f.unit(K::Exalted)?,
            "Undying" => f.unit(K::Undying)?,
            "Persist" => f.unit(K::Persist)?,
            "Cascade" => f.unit(K::Cascade)?,
            "Storm" => f.unit(K::Storm)?,
            "Gravestorm" => f.unit(K::Gravestorm)?,
            "Ripple" => K::Ripple(f.magnitude(1, 1)?),
            "Vanishing" => K::Vanishing(f.magnitude(1, 1)?),
            "Fading" => K::Fading(f.magnitude(1, 1)?),
            "Dredge" => K::Dredge(f.magnitude(1, 1)?),
            "Annihilator" => K::Annihilator(f.magnitude(1, 1)?),
            "Afflict" => K::Afflict(f.magnitude(1, 1)?),
            "Afterlife" => K::Afterlife(f.magnitude(1, 1)?),
            "Mentor" => f.unit(K::Mentor)?,
            "Training" => f.unit(K::Training)?,
            "Exploit" => f.unit(K::Exploit)?,
            "Extort" => f.unit(K::Extort)?,
            "Fabricate" => K::Fabricate(f.magnitude(1, 1)?),
            "Renown" => K::Renown(f.magnitude(1, 1)?),
            "Myriad" => f.unit(K::Myriad)?,
            "Melee" => f.unit(K::Melee)?,
            "Dethrone" => f.unit(K::Dethrone)?,
            "Soulshift" => K::Soulshift(f.magnitude(1, 1)?),
            "Riot" => f.unit(K::Riot)?,
            "Unleash" => f.unit(K::Unleash)?,
            "Devour" => K::Devour(f.magnitude(1, 2)?),
            "Tribute" => K::Tribute(f.magnitude(1, 1)?),
            "Sunburst" => f.unit(K::Sunburst)?,
            "Absorb" => K::Absorb(f.magnitude(1, 1)?),
            "Provoke" => f.unit(K::Provoke)?,
            "Poisonous" => K::Poisonous(f.magnitude(1, 1)?),
            "Frenzy" => K::Frenzy(f.magnitude(1, 1)?),
            "Battle cry" => f.unit(K::BattleCry)?,
            "Living weapon" => f.unit(K::LivingWeapon)?,
            "Decayed" => f.unit(K::Decayed)?,
            "Hideaway" => K::Hideaway(f.magnitude(1, 1)?),
            "Enlist" => f.unit(K::Enlist)?,
            "Backup" => K::Backup(f.magnitude(1, 1)?),
            "Prowess" => f.unit(K::Prowess)?,
            "Amplify" => {
                f.split_printed();
                f.arity(2, 2)?;
                let amount = f.number(0)?;
                let types = f
                    .field(1)?
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                K::Amplify { amount, types }
            }
            "Champion" => {
                f.arity(1, 2)?;
                K::Champion(f.text(0, &["an ", "a "])?)
            }
            "Ward" => f.cost_keyword(K::Ward)?,
            "Echo" => f.cost_keyword(K::Echo)?,
            "Cumulative upkeep" => f.cost_keyword(K::CumulativeUpkeep)?,
            "Ingest" => f.unit(K::Ingest)?,
            "Rebound" => f.unit(K::Rebound)?,
            "Umbra armor" => f.unit(K::UmbraArmor)?,
            "Ravenous" => f.unit(K::Ravenous)?,
            "Equip" => {
                f.arity(1, 3)?;
                let cost = f.cost(0)?;
                let restriction = match f.args.get(1) {
                    Some(filter) if !filter.is_empty() => Some(EquipRestriction {
                        filter: filter.clone(),
                        description: f.args.get(2).cloned().unwrap_or_else(|| filter.clone()),
                    }),
                    _ => None,
                };
                K::Equip { cost, restriction }
            }
            "Fortify" => f.cost_keyword(K::Fortify)?,
            "Reconfigure" => f.cost_keyword(K::Reconfigure)?,
            "Cycling" => f.cost_keyword(K::Cycling)?,
            "Typecycling" => {
                f.split_printed();
                f.arity(2, 2)?;
                K::Typecycling {
                    kind: f.text(0, &[])?,
                    cost: f.cost(1)?,
                }
            }
            "Outlast" => f.cost_keyword(K::Outlast)?,
            "Level up" => f.cost_keyword(K::LevelUp)?,
            "Transmute" => f.cost_keyword(K::Transmute)?,
            "Scavenge" => f.cost_keyword(K::Scavenge)?,
            "Unearth" => f.cost_keyword(K::Unearth)?,
            "Embalm" => f.cost_keyword(K::Embalm)?,
            "Eternalize" => f.cost_keyword(K::Eternalize)?,
            "Encore" => f.cost_keyword(K::Encore)?,
            "Ninjutsu" => f.cost_keyword(K::Ninjutsu)?,
            "Crew" => K::Crew(f.magnitude(1, 1)?),
            "Flashback" => {
                f.arity(0, 1)?;
                K::Flashback(f.optional_cost(0)?)
            }
            "Retrace" => f.unit(K::Retrace)?,
            "Jump-start" => f.unit(K::JumpStart)?,
            "Madness" => f.cost_keyword(K::Madness)?,
            "Morph" => f.cost_keyword(K::Morph)?,
            "Megamorph" => f.cost_keyword(K::Megamorph)?,
            "Disguise" => f.cost_keyword(K::Disguise)?,
            "Suspend" => {
                f.split_printed();
                f.arity(2, 2)?;
                K::Suspend {
                    time: f.variable(0, false)?,
                    cost: f.cost(1)?,
                }
            }
            "Kicker" => {
                f.arity(1, 2)?;
                K::Kicker {
                    cost: f.cost(0)?,
                    second: f.optional_cost(1)?,
                }
            }
            "Multikicker" => f.cost_keyword(K::Multikicker)?,
            "Buyback" => f.cost_keyword(K::Buyback)?,
            "Entwine" => f.cost_keyword(K::Entwine)?,
            "Evoke" => f.cost_keyword(K::Evoke)?,
            "Dash" => f.cost_keyword(K::Dash)?,
            "Blitz" => f.cost_keyword(K::Blitz)?,
            "Spectacle" => f.cost_keyword(K::Spectacle)?,
            "Surge" => f.cost_keyword(K::Surge)?,
            "Prowl" => f.cost_keyword(K::Prowl)?,
            "Emerge" => f.cost_keyword(K::Emerge)?,
            "Escape" => {
                f.arity(2, 2)?;
                K::Escape {
                    cost: f.cost(0)?,
                    exile: f.number(1)?,
                }
            }
            "Foretell" => f.cost_keyword(K::Foretell)?,
            "Plot" => f.cost_keyword(K::Plot)?,
            "Miracle" => f.cost_keyword(K::Miracle)?,
            "Overload" => f.cost_keyword(K::Overload)?,
            "Replicate" => f.cost_keyword(K::Replicate)?,
            "Bestow" => f.cost_keyword(K::Bestow)?,
            "Splice" => {
                let stripped = f
                    .args
                    .first()
                    .and_then(|a| strip_prefix_ci(a, "onto "))
                    .map(|rest| rest.trim().to_string());
                if let (true, Some(rest)) = (f.printed, stripped) {
                    f.args = vec![rest];
                }
                f.split_printed();
                f.arity(2, 2)?;
                K::Splice {
                    onto: f.text(0, &[])?,
                    cost: f.cost(1)?,
                }
            }
            "Disturb" => f.cost_keyword(K::Disturb)?,
            "Squad" => f.cost_keyword(K::Squad)?,
            _ => K::Other(tag.to_string()),
        };
        Ok(keyword)
    }

    /// Canonical keyword name (`"Bushido"`, `"First Strike"`).
    #[must_use]
    pub fn name(&self) -> &str {
        use Keyword as K;
        match self {
            K::Flying => "Flying",
            K::FirstStrike => "First Strike",
            K::DoubleStrike => "Double Strike",
            K::Deathtouch => "Deathtouch",
            K::Defender => "Defender",
            K::Fear => "Fear",
            K::Flash => "Flash",
            K::Haste => "Haste",
            K::Hexproof => "Hexproof",
            K::Indestructible => "Indestructible",
            K::Intimidate => "Intimidate",
            K::Lifelink => "Lifelink",
            K::Menace => "Menace",
            K::Reach => "Reach",
            K::Shroud => "Shroud",
            K::Trample => "Trample",
            K::Vigilance => "Vigilance",
            K::Shadow => "Shadow",
            K::Horsemanship => "Horsemanship",
            K::Skulk => "Skulk",
            K::Banding => "Banding",
            K::Infect => "Infect",
            K::Wither => "Wither",
            K::SplitSecond => "Split second",
            K::Phasing => "Phasing",
            K::Fuse => "Fuse",
            K::Convoke => "Convoke",
            K::Delve => "Delve",
            K::Improvise => "Improvise",
            K::Assist => "Assist",
            K::Partner => "Partner",
            K::Protection(_) => "Protection",
            K::Landwalk(_) => "Landwalk",
            K::Toxic(_) => "Toxic",
            K::Enchant(_) => "Enchant",
            K::Changeling => "Changeling",
            K::Devoid => "Devoid",
            K::Affinity(_) => "Affinity",
            K::Bushido(_) => "Bushido",
            K::Rampage(_) => "Rampage",
            K::Flanking => "Flanking",
            K::Bloodthirst(_) => "Bloodthirst",
            K::Modular(_) => "Modular",
            K::Graft(_) => "Graft",
            K::Evolve => "Evolve",
            K::Exalted => "Exalted",
            K::Undying => "Undying",
            K::Persist => "Persist",
            K::Cascade => "Cascade",
            K::Storm => "Storm",
            K::Gravestorm => "Gravestorm",
            K::Ripple(_) => "Ripple",
            K::Vanishing(_) => "Vanishing",
            K::Fading(_) => "Fading",
            K::Dredge(_) => "Dredge",
            K::Annihilator(_) => "Annihilator",
            K::Afflict(_) => "Afflict",
            K::Afterlife(_) => "Afterlife",
            K::Mentor => "Mentor",
            K::Training => "Training",
            K::Exploit => "Exploit",
            K::Extort => "Extort",
            K::Fabricate(_) => "Fabricate",
            K::Renown(_) => "Renown",
            K::Myriad => "Myriad",
            K::Melee => "Melee",
            K::Dethrone => "Dethrone",
            K::Soulshift(_) => "Soulshift",
            K::Riot => "Riot",
            K::Unleash => "Unleash",
            K::Devour(_) => "Devour",
            K::Tribute(_) => "Tribute",
            K::Sunburst => "Sunburst",
            K::Absorb(_) => "Absorb",
            K::Provoke => "Provoke",
            K::Poisonous(_) => "Poisonous",
            K::Frenzy(_) => "Frenzy",
            K::BattleCry => "Battle cry",
            K::LivingWeapon => "Living weapon",
            K::Decayed => "Decayed",
            K::Hideaway(_) => "Hideaway",
            K::Enlist => "Enlist",
            K::Backup(_) => "Backup",
            K::Prowess => "Prowess",
            K::Amplify { .. } => "Amplify",
            K::Champion(_) => "Champion",
            K::Ward(_) => "Ward",
            K::Echo(_) => "Echo",
            K::CumulativeUpkeep(_) => "Cumulative upkeep",
            K::Ingest => "Ingest",
            K::Rebound => "Rebound",
            K::UmbraArmor => "Umbra armor",
            K::Ravenous => "Ravenous",
            K::Equip { .. } => "Equip",
            K::Fortify(_) => "Fortify",
            K::Reconfigure(_) => "Reconfigure",
            K::Cycling(_) => "Cycling",
            K::Typecycling { .. } => "Typecycling",
            K::Outlast(_) => "Outlast",
            K::LevelUp(_) => "Level up",
            K::Transmute(_) => "Transmute",
            K::Scavenge(_) => "Scavenge",
            K::Unearth(_) => "Unearth",
            K::Embalm(_) => "Embalm",
            K::Eternalize(_) => "Eternalize",
            K::Encore(_) => "Encore",
            K::Ninjutsu(_) => "Ninjutsu",
            K::Crew(_) => "Crew",
            K::Flashback(_) => "Flashback",
            K::Retrace => "Retrace",
            K::JumpStart => "Jump-start",
            K::Madness(_) => "Madness",
            K::Morph(_) => "Morph",
            K::Megamorph(_) => "Megamorph",
            K::Disguise(_) => "Disguise",
            K::Suspend { .. } => "Suspend",
            K::Kicker { .. } => "Kicker",
            K::Multikicker(_) => "Multikicker",
            K::Buyback(_) => "Buyback",
            K::Entwine(_) => "Entwine",
            K::Evoke(_) => "Evoke",
            K::Dash(_) => "Dash",
            K::Blitz(_) => "Blitz",
            K::Spectacle(_) => "Spectacle",
            K::Surge(_) => "Surge",
            K::Prowl(_) => "Prowl",
            K::Emerge(_) => "Emerge",
            K::Escape { .. } => "Escape",
            K::Foretell(_) => "Foretell",
            K::Plot(_) => "Plot",
            K::Miracle(_) => "Miracle",
            K::Overload(_) => "Overload",
            K::Replicate(_) => "Replicate",
            K::Bestow(_) => "Bestow",
            K::Splice { .. } => "Splice",
            K::Disturb(_) => "Disturb",
            K::Squad(_) => "Squad",
            K::Other(text) => text,
        }
    }

    /// Whether this keyword expands to nothing and is only consulted by
    /// presence.
    #[must_use]
    pub fn is_static_text(&self) -> bool {
        use Keyword as K;
        matches!(
            self,
            K::Flying
                | K::FirstStrike
                | K::DoubleStrike
                | K::Deathtouch
                | K::Defender
                | K::Fear
                | K::Flash
                | K::Haste
                | K::Hexproof
                | K::Indestructible
                | K::Intimidate
                | K::Lifelink
                | K::Menace
                | K::Reach
                | K::Shroud
                | K::Trample
                | K::Vigilance
                | K::Shadow
                | K::Horsemanship
                | K::Skulk
                | K::Banding
                | K::Infect
                | K::Wither
                | K::SplitSecond
                | K::Phasing
                | K::Fuse
                | K::Convoke
                | K::Delve
                | K::Improvise
                | K::Assist
                | K::Partner
                | K::Protection(_)
                | K::Landwalk(_)
                | K::Toxic(_)
                | K::Enchant(_)
                | K::Other(_)
        )
    }

    /// Whether `pattern` names this keyword: either its name or its full
    /// tag, case-insensitive.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        self.name().eq_ignore_ascii_case(pattern) || self.to_string().eq_ignore_ascii_case(pattern)
    }

    /// The fixed magnitude of keywords that carry one.
    #[must_use]
    pub fn magnitude(&self) -> Option<u32> {
        use Keyword as K;
        match self {
            K::Toxic(n)
            | K::Bushido(n)
            | K::Rampage(n)
            | K::Bloodthirst(n)
            | K::Graft(n)
            | K::Ripple(n)
            | K::Vanishing(n)
            | K::Fading(n)
            | K::Dredge(n)
            | K::Annihilator(n)
            | K::Afflict(n)
            | K::Afterlife(n)
            | K::Fabricate(n)
            | K::Renown(n)
            | K::Soulshift(n)
            | K::Devour(n)
            | K::Tribute(n)
            | K::Absorb(n)
            | K::Poisonous(n)
            | K::Frenzy(n)
            | K::Hideaway(n)
            | K::Backup(n)
            | K::Crew(n) => Some(*n),
            K::Modular(Magnitude::Fixed(n)) => Some(*n),
            K::Amplify { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    /// Human-readable label: `"Bushido 2"`, `"Equip {2}"`, `"Islandwalk"`.
    #[must_use]
    pub fn label(&self) -> String {
        use Keyword as K;
        match self {
            K::Protection(q) => format!("Protection from {}", q),
            K::Landwalk(land) => format!("{}walk", land),
            K::Affinity(t) => format!("Affinity for {}", t),
            K::Enchant(t) => format!("Enchant {}", t),
            K::Champion(t) => format!("Champion a {}", t),
            K::Modular(m) => format!("Modular {}", m),
            K::Amplify { amount, .. } => format!("Amplify {}", amount),
            K::Typecycling { kind, cost } => format!("{}cycling {{{}}}", kind, cost),
            K::Suspend { time, cost } => format!("Suspend {}—{{{}}}", time, cost),
            K::Escape { cost, .. } => format!("Escape—{{{}}}", cost),
            K::Splice { onto, cost } => format!("Splice onto {} {{{}}}", onto, cost),
            K::Kicker { cost, second: Some(second) } => {
                format!("Kicker {{{}}} and/or {{{}}}", cost, second)
            }
            K::Flashback(None) => "Flashback".to_string(),
            K::Other(text) => text.clone(),
            _ => {
                if let Some(n) = self.magnitude() {
                    format!("{} {}", self.name(), n)
                } else if let Some(cost) = self.cost() {
                    format!("{} {{{}}}", self.name(), cost)
                } else {
                    self.name().to_string()
                }
            }
        }
    }

    /// The primary cost of cost-bearing keywords.
    #[must_use]
    pub fn cost(&self) -> Option<&Cost> {
        use Keyword as K;
        match self {
            K::Ward(c)
            | K::Echo(c)
            | K::CumulativeUpkeep(c)
            | K::Fortify(c)
            | K::Reconfigure(c)
            | K::Cycling(c)
            | K::Outlast(c)
            | K::LevelUp(c)
            | K::Transmute(c)
            | K::Scavenge(c)
            | K::Unearth(c)
            | K::Embalm(c)
            | K::Eternalize(c)
            | K::Encore(c)
            | K::Ninjutsu(c)
            | K::Madness(c)
            | K::Morph(c)
            | K::Megamorph(c)
            | K::Disguise(c)
            | K::Multikicker(c)
            | K::Buyback(c)
            | K::Entwine(c)
            | K::Evoke(c)
            | K::Dash(c)
            | K::Blitz(c)
            | K::Spectacle(c)
            | K::Surge(c)
            | K::Prowl(c)
            | K::Emerge(c)
            | K::Foretell(c)
            | K::Plot(c)
            | K::Miracle(c)
            | K::Overload(c)
            | K::Replicate(c)
            | K::Bestow(c)
            | K::Disturb(c)
            | K::Squad(c) => Some(c),
            K::Flashback(c) => c.as_ref(),
            K::Equip { cost, .. }
            | K::Typecycling { cost, .. }
            | K::Suspend { cost, .. }
            | K::Kicker { cost, .. }
            | K::Escape { cost, .. }
            | K::Splice { cost, .. } => Some(cost),
            _ => None,
        }
    }
}

impl FromStr for Keyword {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders the colon-form tag, which parses back to the same keyword.
impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Keyword as K;
        match self {
            K::Protection(q) => write!(f, "Protection:{}", q),
            K::Landwalk(land) => write!(f, "Landwalk:{}", land),
            K::Enchant(t) => write!(f, "Enchant:{}", t),
            K::Affinity(t) => write!(f, "Affinity:{}", t),
            K::Champion(t) => write!(f, "Champion:{}", t),
            K::Modular(m) => write!(f, "Modular:{}", m),
            K::Amplify { amount, types } => write!(f, "Amplify:{}:{}", amount, types.join(",")),
            K::Equip {
                cost,
                restriction: Some(r),
            } => write!(f, "Equip:{}:{}:{}", cost, r.filter, r.description),
            K::Typecycling { kind, cost } => write!(f, "Typecycling:{}:{}", kind, cost),
            K::Suspend { time, cost } => write!(f, "Suspend:{}:{}", time, cost),
            K::Kicker {
                cost,
                second: Some(second),
            } => write!(f, "Kicker:{}:{}", cost, second),
            K::Escape { cost, exile } => write!(f, "Escape:{}:{}", cost, exile),
            K::Splice { onto, cost } => write!(f, "Splice:{}:{}", onto, cost),
            K::Other(text) => f.write_str(text),
            _ => {
                if let Some(n) = self.magnitude() {
                    write!(f, "{}:{}", self.name(), n)
                } else if let Some(cost) = self.cost() {
                    write!(f, "{}:{}", self.name(), cost)
                } else {
                    f.write_str(self.name())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tag: &str) -> Keyword {
        Keyword::parse(tag).unwrap()
    }

    #[test]
    fn test_static_keywords() {
        assert_eq!(parse("Flying"), Keyword::Flying);
        assert_eq!(parse("first strike"), Keyword::FirstStrike);
        assert_eq!(parse("Double Strike"), Keyword::DoubleStrike);
        assert_eq!(parse("Split Second"), Keyword::SplitSecond);
        assert!(parse("Flying").is_static_text());
    }

    #[test]
    fn test_magnitude_both_forms() {
        assert_eq!(parse("Bushido 2"), Keyword::Bushido(2));
        assert_eq!(parse("Bushido:2"), Keyword::Bushido(2));
        assert_eq!(parse("Annihilator 4"), Keyword::Annihilator(4));
        assert_eq!(parse("Afterlife:1"), Keyword::Afterlife(1));
    }

    #[test]
    fn test_non_numeric_magnitude_is_error() {
        let err = Keyword::parse("Bushido two").unwrap_err();
        assert!(matches!(err, CardError::MalformedKeyword { .. }));
        assert!(Keyword::parse("Rampage:").is_err());
        assert!(Keyword::parse("Bushido").is_err());
    }

    #[test]
    fn test_modular_variants() {
        assert_eq!(parse("Modular:1"), Keyword::Modular(Magnitude::Fixed(1)));
        assert_eq!(parse("Modular:Sunburst"), Keyword::Modular(Magnitude::Sunburst));
        assert!(Keyword::parse("Modular:lots").is_err());
    }

    #[test]
    fn test_cost_keywords() {
        let equip = parse("Equip:2");
        assert!(matches!(equip, Keyword::Equip { restriction: None, .. }));
        assert_eq!(equip.cost().unwrap().to_string(), "2");

        let cycling = parse("Cycling 1 U");
        assert_eq!(cycling.cost().unwrap().to_string(), "1 U");

        assert!(Keyword::parse("Equip:2 Q Q<").is_err());
    }

    #[test]
    fn test_equip_restriction() {
        let equip = parse("Equip:1:Creature.Legendary:legendary creature");
        match equip {
            Keyword::Equip {
                restriction: Some(r),
                ..
            } => {
                assert_eq!(r.filter, "Creature.Legendary");
                assert_eq!(r.description, "legendary creature");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_printed_forms() {
        assert_eq!(parse("Protection from red"), Keyword::Protection("red".into()));
        assert_eq!(parse("Protection:Card.Red:red"), Keyword::Protection("red".into()));
        assert_eq!(parse("Islandwalk"), Keyword::Landwalk("Island".into()));
        assert_eq!(parse("Affinity for artifacts"), Keyword::Affinity("artifacts".into()));
        assert_eq!(parse("Champion a Faerie"), Keyword::Champion("Faerie".into()));
        assert_eq!(parse("Enchant creature"), Keyword::Enchant("creature".into()));
    }

    #[test]
    fn test_typecycling() {
        let k = parse("Swampcycling 2");
        assert_eq!(
            k,
            Keyword::Typecycling {
                kind: "Swamp".into(),
                cost: Cost::parse("2").unwrap()
            }
        );
        let k = parse("Basic landcycling:1");
        assert!(matches!(k, Keyword::Typecycling { ref kind, .. } if kind == "Basic land"));
        assert_eq!(parse("Typecycling:Plains:2"), parse("Plainscycling 2"));
    }

    #[test]
    fn test_two_field_grammars() {
        assert_eq!(
            parse("Suspend:3:1 R"),
            Keyword::Suspend {
                time: Magnitude::Fixed(3),
                cost: Cost::parse("1 R").unwrap()
            }
        );
        assert_eq!(parse("Suspend 3 1 R"), parse("Suspend:3:1 R"));
        assert!(matches!(parse("Suspend:X:X X R"), Keyword::Suspend { time: Magnitude::X, .. }));
        assert!(Keyword::parse("Suspend:3").is_err());

        assert_eq!(
            parse("Amplify:1:Human,Soldier"),
            Keyword::Amplify {
                amount: 1,
                types: vec!["Human".into(), "Soldier".into()]
            }
        );
        assert!(Keyword::parse("Amplify 1").is_err());

        assert_eq!(parse("Splice onto Arcane 1 R"), parse("Splice:Arcane:1 R"));
        assert!(matches!(parse("Escape:3 B B:4"), Keyword::Escape { exile: 4, .. }));
        assert!(Keyword::parse("Escape:3 B B").is_err());
    }

    #[test]
    fn test_kicker() {
        assert!(matches!(parse("Kicker:1 R"), Keyword::Kicker { second: None, .. }));
        assert!(matches!(parse("Kicker:1 R:2 G"), Keyword::Kicker { second: Some(_), .. }));
    }

    #[test]
    fn test_flashback_without_cost() {
        assert_eq!(parse("Flashback"), Keyword::Flashback(None));
        assert!(matches!(parse("Flashback:3 R"), Keyword::Flashback(Some(_))));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("Totem armor"), Keyword::UmbraArmor);
        assert_eq!(parse("Jumpstart"), Keyword::JumpStart);
        assert_eq!(parse("Cumulative upkeep:1"), parse("CumulativeUpkeep:1"));
    }

    #[test]
    fn test_unknown_becomes_other() {
        let k = parse("CARDNAME can't block.");
        assert_eq!(k, Keyword::Other("CARDNAME can't block.".into()));
        assert!(k.is_static_text());
        assert_eq!(k.name(), "CARDNAME can't block.");
    }

    #[test]
    fn test_flash_is_not_flashback() {
        assert_eq!(parse("Flash"), Keyword::Flash);
        assert!(matches!(parse("Flashback 2 R"), Keyword::Flashback(Some(_))));
    }

    #[test]
    fn test_extra_fields_lenient_and_strict() {
        // Trailing hint fields are tolerated by default.
        assert_eq!(parse("Bushido:2:AIHint"), Keyword::Bushido(2));
        assert_eq!(parse("Flying:Hint"), Keyword::Flying);

        let strict = CompilerConfig::new().strict();
        assert!(Keyword::parse_with("Bushido:2:AIHint", &strict).is_err());
        assert!(Keyword::parse_with("Bushido:2", &strict).is_ok());
    }

    #[test]
    fn test_display_round_trips() {
        for tag in [
            "Flying",
            "Bushido:2",
            "Modular:Sunburst",
            "Equip:1:Creature.Legendary:legendary creature",
            "Suspend:4:U",
            "Kicker:1 R:2 G",
            "Escape:3 B B:4",
            "Typecycling:Swamp:2",
            "Amplify:1:Human,Soldier",
            "Protection:red",
            "Flashback",
            "Ward:PayLife<3>",
        ] {
            let keyword = parse(tag);
            assert_eq!(parse(&keyword.to_string()), keyword, "tag {}", tag);
        }
    }

    #[test]
    fn test_matches() {
        let k = parse("Bushido 2");
        assert!(k.matches("Bushido"));
        assert!(k.matches("bushido:2"));
        assert!(!k.matches("Bushido:3"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(parse("Bushido:2").label(), "Bushido 2");
        assert_eq!(parse("Equip:2").label(), "Equip {2}");
        assert_eq!(parse("Islandwalk").label(), "Islandwalk");
        assert_eq!(parse("Protection from red").label(), "Protection from red");
    }

    #[test]
    fn test_known_names_resolve() {
        for name in KNOWN_NAMES {
            assert_eq!(canonical_name(name), Some(*name));
        }
    }
}
