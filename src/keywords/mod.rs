//! Keyword grammar library.
//!
//! ## Key Types
//!
//! - `Keyword`: closed set of keyword variants with typed parameters
//! - `KeywordInstance`: one occurrence of a keyword on one object
//! - `reminder_text`: the catalog's rules reminder for each variant
//!
//! Expansion of keywords into behaviors lives in [`crate::behavior`].

pub mod grammar;
pub mod instance;
pub mod reminder;

pub use grammar::{EquipRestriction, Keyword, Magnitude, KNOWN_NAMES};
pub use instance::{KeywordId, KeywordIdAllocator, KeywordInstance};
pub use reminder::reminder_text;
