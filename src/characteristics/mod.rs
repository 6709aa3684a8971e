//! Printed characteristic primitives.
//!
//! - `ColorSet`: five-color bit mask
//! - `TypeLine`: supertypes, card types, classified subtypes
//! - `ManaCost` / `Cost`: mana symbols and keyword costs
//! - `PtValue`: printed power/toughness, numeric or symbolic

pub mod color;
pub mod mana;
pub mod power;
pub mod types;

pub use color::{Color, ColorSet};
pub use mana::{Cost, CostPart, ManaCost, ManaShard};
pub use power::PtValue;
pub use types::{CardType, Subtype, SubtypeClass, Supertype, TypeLine};
