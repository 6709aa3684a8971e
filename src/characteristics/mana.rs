//! Mana costs and keyword costs.
//!
//! Keyword tags carry costs in the compact space-separated form used by
//! card content (`"3 R"`, `"1 Sac<1/Creature>"`, `"T"`). Braced form
//! (`"{3}{R}"`) is accepted as well.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, ColorSet};
use crate::error::{CardError, Result};

/// One mana symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaShard {
    Generic(u32),
    X,
    Colored(Color),
    Colorless,
    Snow,
    Hybrid(Color, Color),
    /// Two generic or one colored (`2/W`).
    TwoHybrid(Color),
    Phyrexian(Color),
}

impl ManaShard {
    fn parse(token: &str) -> Option<Self> {
        if let Ok(n) = token.parse::<u32>() {
            return Some(ManaShard::Generic(n));
        }
        match token {
            "X" | "x" => return Some(ManaShard::X),
            "C" | "c" => return Some(ManaShard::Colorless),
            "S" | "s" => return Some(ManaShard::Snow),
            _ => {}
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(c), None, None, None) => Color::from_symbol(c).map(ManaShard::Colored),
            (Some(a), Some('/'), Some(b), None) => {
                if a == '2' {
                    return Color::from_symbol(b).map(ManaShard::TwoHybrid);
                }
                if b == 'P' || b == 'p' {
                    return Color::from_symbol(a).map(ManaShard::Phyrexian);
                }
                Some(ManaShard::Hybrid(Color::from_symbol(a)?, Color::from_symbol(b)?))
            }
            _ => None,
        }
    }

    /// Contribution to mana value.
    #[must_use]
    pub const fn mana_value(self) -> u32 {
        match self {
            ManaShard::Generic(n) => n,
            ManaShard::X => 0,
            ManaShard::TwoHybrid(_) => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorSet {
        match self {
            ManaShard::Colored(c) | ManaShard::TwoHybrid(c) | ManaShard::Phyrexian(c) => c.into(),
            ManaShard::Hybrid(a, b) => ColorSet::from(a).with(b),
            _ => ColorSet::COLORLESS,
        }
    }
}

impl std::fmt::Display for ManaShard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManaShard::Generic(n) => write!(f, "{}", n),
            ManaShard::X => f.write_str("X"),
            ManaShard::Colored(c) => write!(f, "{}", c.symbol()),
            ManaShard::Colorless => f.write_str("C"),
            ManaShard::Snow => f.write_str("S"),
            ManaShard::Hybrid(a, b) => write!(f, "{}/{}", a.symbol(), b.symbol()),
            ManaShard::TwoHybrid(c) => write!(f, "2/{}", c.symbol()),
            ManaShard::Phyrexian(c) => write!(f, "{}/P", c.symbol()),
        }
    }
}

/// A printed mana cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    shards: SmallVec<[ManaShard; 4]>,
}

impl ManaCost {
    /// The empty cost (no mana symbols at all).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A cost of `n` generic mana.
    #[must_use]
    pub fn generic(n: u32) -> Self {
        Self::from_shards([ManaShard::Generic(n)])
    }

    #[must_use]
    pub fn from_shards(shards: impl IntoIterator<Item = ManaShard>) -> Self {
        Self {
            shards: shards.into_iter().collect(),
        }
    }

    /// Read a mana cost.
    ///
    /// ```
    /// use ccg_layers::characteristics::ManaCost;
    ///
    /// let cost = ManaCost::parse("{2}{W/U}{R}").unwrap();
    /// assert_eq!(cost.mana_value(), 4);
    /// assert_eq!(cost.to_string(), "2 W/U R");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.replace(['{', '}'], " ");
        let mut shards = SmallVec::new();
        for token in normalized.split_whitespace() {
            if token.eq_ignore_ascii_case("no") || token.eq_ignore_ascii_case("cost") {
                continue;
            }
            let shard =
                ManaShard::parse(token).ok_or_else(|| CardError::MalformedCost(text.to_string()))?;
            shards.push(shard);
        }
        Ok(Self { shards })
    }

    #[must_use]
    pub fn shards(&self) -> &[ManaShard] {
        &self.shards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.shards.iter().map(|s| s.mana_value()).sum()
    }

    #[must_use]
    pub fn colors(&self) -> ColorSet {
        self.shards
            .iter()
            .fold(ColorSet::COLORLESS, |set, s| set.union(s.colors()))
    }

    #[must_use]
    pub fn has_x(&self) -> bool {
        self.shards.contains(&ManaShard::X)
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.shards.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" "))
    }
}

/// A non-mana part of a cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostPart {
    Tap,
    Untap,
    /// `Verb<arg/arg/...>` such as `Sac<1/Creature>` or `PayLife<2>`.
    Action { verb: String, args: Vec<String> },
}

impl std::fmt::Display for CostPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostPart::Tap => f.write_str("T"),
            CostPart::Untap => f.write_str("Q"),
            CostPart::Action { verb, args } => write!(f, "{}<{}>", verb, args.join("/")),
        }
    }
}

/// A cost carried by a keyword: mana plus optional extra parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub mana: ManaCost,
    pub parts: Vec<CostPart>,
}

impl Cost {
    /// A cost of exactly the given mana.
    #[must_use]
    pub fn mana(mana: ManaCost) -> Self {
        Self {
            mana,
            parts: Vec::new(),
        }
    }

    /// A cost of `n` generic mana.
    #[must_use]
    pub fn generic(n: u32) -> Self {
        Self::mana(ManaCost::generic(n))
    }

    /// Add a `Verb<args>` part (builder pattern).
    #[must_use]
    pub fn with_action(mut self, verb: &str, args: &[&str]) -> Self {
        self.parts.push(CostPart::Action {
            verb: verb.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        });
        self
    }

    /// Add a tap symbol (builder pattern).
    #[must_use]
    pub fn with_tap(mut self) -> Self {
        self.parts.push(CostPart::Tap);
        self
    }

    /// Read a keyword cost such as `"2 R"` or `"1 Sac<1/Creature.Other/another creature>"`.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || CardError::MalformedCost(text.to_string());
        let mut cost = Cost::default();
        let mut mana_text = String::new();

        for token in tokenize(text).ok_or_else(malformed)? {
            match token.as_str() {
                "T" => cost.parts.push(CostPart::Tap),
                "Q" => cost.parts.push(CostPart::Untap),
                _ => {
                    if let Some((verb, rest)) = token.split_once('<') {
                        let inner = rest.strip_suffix('>').ok_or_else(malformed)?;
                        if verb.is_empty() {
                            return Err(malformed());
                        }
                        cost.parts.push(CostPart::Action {
                            verb: verb.to_string(),
                            args: inner.split('/').map(str::to_string).collect(),
                        });
                    } else {
                        mana_text.push_str(&token);
                        mana_text.push(' ');
                    }
                }
            }
        }
        cost.mana = ManaCost::parse(&mana_text).map_err(|_| malformed())?;
        Ok(cost)
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.parts.is_empty() && self.mana.mana_value() == 0 && !self.mana.has_x()
    }

    #[must_use]
    pub fn has_tap(&self) -> bool {
        self.parts.contains(&CostPart::Tap)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.mana.is_empty() {
            parts.push(self.mana.to_string());
        }
        parts.extend(self.parts.iter().map(ToString::to_string));
        if parts.is_empty() {
            return f.write_str("0");
        }
        f.write_str(&parts.join(" "))
    }
}

/// Split on whitespace, keeping `<...>` groups (which may contain spaces)
/// intact. Returns `None` on unbalanced brackets.
fn tokenize(text: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;
    for c in text.replace(['{', '}'], " ").chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.checked_sub(1)?;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if depth != 0 {
        return None;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Some(tokens)
}
