//! Keyword instances.
//!
//! Two "Flying" grants from different effects are different instances:
//! removing one must leave the other. Instances carry an id allocated by
//! the owning object so that removal and behavior retraction work by
//! identity rather than by text.

use serde::{Deserialize, Serialize};

use super::grammar::Keyword;

/// Identity of one keyword occurrence on one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeywordId(pub u32);

impl KeywordId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for KeywordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keyword#{}", self.0)
    }
}

/// A keyword together with its identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordInstance {
    pub id: KeywordId,
    pub keyword: Keyword,
}

impl KeywordInstance {
    #[must_use]
    pub fn new(id: KeywordId, keyword: Keyword) -> Self {
        Self { id, keyword }
    }

    /// Whether this instance answers to `name` (keyword name or full tag).
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.keyword.matches(name)
    }
}

impl std::fmt::Display for KeywordInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.keyword, self.id)
    }
}

/// Allocates keyword ids for one object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordIdAllocator {
    next: u32,
}

impl KeywordIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose next id follows `last`.
    #[must_use]
    pub fn resume_after(last: KeywordId) -> Self {
        Self { next: last.0 + 1 }
    }

    pub fn allocate(&mut self) -> KeywordId {
        let id = KeywordId(self.next);
        self.next += 1;
        id
    }

    /// Wrap a keyword in a fresh instance.
    pub fn instance(&mut self, keyword: Keyword) -> KeywordInstance {
        KeywordInstance::new(self.allocate(), keyword)
    }
}
