//! Derived scalar variables on a representation.
//!
//! Recipes read numbers through named variables instead of literals, so
//! one recipe shape serves every magnitude. The compiler writes a
//! variable per keyword instance (`Bushido3` for the instance with id 3)
//! and removes it with the instance.
//!
//! ## Usage
//!
//! ```
//! use ccg_layers::behavior::{Origin, VarValue, Variables};
//! use ccg_layers::keywords::KeywordId;
//!
//! let mut vars = Variables::new();
//! let origin = Origin::Keyword(KeywordId::new(0));
//! vars.set("Bushido0", VarValue::Int(2), origin);
//! assert_eq!(vars.int("Bushido0"), Some(2));
//!
//! vars.retract_origin(origin);
//! assert!(vars.get("Bushido0").is_none());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::compiled::Origin;

/// Value stored in a variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarValue {
    Int(i64),
    Bool(bool),
    Text(String),
    IntList(Vec<i64>),
    TextList(Vec<String>),
}

impl VarValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            VarValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VarValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VarValue::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            VarValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            VarValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for VarValue {
    fn from(v: i64) -> Self {
        VarValue::Int(v)
    }
}

impl From<u32> for VarValue {
    fn from(v: u32) -> Self {
        VarValue::Int(i64::from(v))
    }
}

impl From<bool> for VarValue {
    fn from(v: bool) -> Self {
        VarValue::Bool(v)
    }
}

impl From<String> for VarValue {
    fn from(v: String) -> Self {
        VarValue::Text(v)
    }
}

impl From<&str> for VarValue {
    fn from(v: &str) -> Self {
        VarValue::Text(v.to_string())
    }
}

impl From<Vec<i64>> for VarValue {
    fn from(v: Vec<i64>) -> Self {
        VarValue::IntList(v)
    }
}

impl From<Vec<String>> for VarValue {
    fn from(v: Vec<String>) -> Self {
        VarValue::TextList(v)
    }
}

impl std::fmt::Display for VarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarValue::Int(v) => write!(f, "Number${}", v),
            VarValue::Bool(v) => write!(f, "{}", v),
            VarValue::Text(v) => f.write_str(v),
            VarValue::IntList(v) => {
                let parts: Vec<String> = v.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
            VarValue::TextList(v) => f.write_str(&v.join(",")),
        }
    }
}

/// A variable and the keyword instance (or printed ability) that wrote it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub value: VarValue,
    pub origin: Origin,
}

/// Named variables on one representation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    vars: FxHashMap<String, Variable>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any earlier value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VarValue>, origin: Origin) {
        self.vars.insert(
            name.into(),
            Variable {
                value: value.into(),
                origin,
            },
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.vars.get(name).map(|v| &v.value)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(VarValue::as_int)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<VarValue> {
        self.vars.remove(name).map(|v| v.value)
    }

    /// Remove every variable written by `origin`. Returns how many were
    /// removed.
    pub fn retract_origin(&mut self, origin: Origin) -> usize {
        let before = self.vars.len();
        self.vars.retain(|_, v| v.origin != origin);
        before - self.vars.len()
    }

    /// Names written by `origin`, sorted.
    #[must_use]
    pub fn names_from(&self, origin: Origin) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .vars
            .iter()
            .filter(|(_, v)| v.origin == origin)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}
