//! Runtime configuration.
//!
//! Hosts configure the crate at startup by providing:
//! - `RulesConfig`: face-down characteristics and face switching defaults
//! - `CompilerConfig`: how strictly keyword tags are validated
//!
//! Both load from JSON (or any serde format) with every field optional.

use serde::{Deserialize, Serialize};

/// Configuration for object construction and face handling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Power of the synthesized face-down representation.
    pub face_down_power: i32,

    /// Toughness of the synthesized face-down representation.
    pub face_down_toughness: i32,

    /// Whether `switch_face` propagates to derived state when the caller
    /// does not say otherwise.
    pub propagate_face_switch: bool,

    /// Compiler settings used when expanding keywords.
    pub compiler: CompilerConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            face_down_power: 2,
            face_down_toughness: 2,
            propagate_face_switch: true,
            compiler: CompilerConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the face-down power/toughness.
    #[must_use]
    pub fn with_face_down_pt(mut self, power: i32, toughness: i32) -> Self {
        self.face_down_power = power;
        self.face_down_toughness = toughness;
        self
    }

    /// Set whether face switches propagate by default.
    #[must_use]
    pub fn with_propagation(mut self, propagate: bool) -> Self {
        self.propagate_face_switch = propagate;
        self
    }

    /// Set the compiler configuration.
    #[must_use]
    pub fn with_compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = compiler;
        self
    }
}

/// Configuration for the keyword grammar and compiler.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Reject keyword tags that carry more fields than their grammar uses.
    ///
    /// Off by default: content often appends hint fields after the
    /// documented ones.
    pub strict_field_count: bool,
}

impl CompilerConfig {
    /// Create the default (lenient) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exact field counts.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict_field_count = true;
        self
    }
}
