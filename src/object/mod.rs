//! Game objects and the card definitions they come from.
//!
//! ## Key Types
//!
//! - `CardDefinition` / `FaceDefinition`: immutable printed data
//! - `CardRegistry`: definition lookup and instantiation
//! - `Representation`: one face's characteristics and compiled behaviors
//! - `RepresentationStore`: an object's faces and which one is current
//! - `GameObject`: the live object; effective characteristics are
//!   recomputed from its face and modification ledger on every query
//! - `ObjectRegistry`: live objects by id, for relation lookups

pub mod definition;
pub mod face;
pub mod game_object;
pub mod objects;
pub mod registry;
pub mod representation;
pub mod store;

pub use definition::{CardDefinition, CardId, FaceDefinition};
pub use face::FaceName;
pub use game_object::{GameObject, Relations};
pub use objects::ObjectRegistry;
pub use registry::CardRegistry;
pub use representation::Representation;
pub use store::RepresentationStore;
