//! Keyword compilation into behaviors.
//!
//! ## Key Types
//!
//! - [`Recipe`]: declarative description of one ability (trigger,
//!   replacement, static, activated or castable) with its effect program
//! - [`plan`]: the fixed expansion template of each structural keyword
//! - [`expand`] / [`retract`]: attach and remove a keyword's behaviors on
//!   a representation
//! - [`Behaviors`] / [`Variables`]: what a representation carries
//! - [`AbilityFactory`]: the host hook that turns a recipe into something
//!   its engine can run
//!
//! ## Flow
//!
//! ```text
//! Keyword --plan--> Plan { recipes, variables }
//!                     |
//!                  expand ---> AbilityFactory::build ---> BehaviorHandle
//!                     |
//!          Representation { behaviors, variables }
//! ```

pub mod compiled;
pub mod compiler;
pub mod condition;
pub mod effect;
pub mod factory;
pub mod recipe;
pub mod recipes;
pub mod vars;

pub use compiled::{BehaviorId, Behaviors, CompiledBehavior, Origin};
pub use compiler::{expand, expand_intrinsic, retract, Expansion};
pub use condition::{Comparison, Condition, ConditionFacts};
pub use effect::{Amount, Duration, Effect, EntryModifier, Subject};
pub use factory::{AbilityFactory, BehaviorHandle, ScriptFactory};
pub use recipe::{
    Activation, BehaviorKind, CastCost, CastSpec, Mode, Recipe, ReplacementEvent, StaticAbility,
    StaticChange, TriggerEvent, Whose,
};
pub use recipes::{plan, turn_face_up, var_name, Plan};
pub use vars::{VarValue, Variable, Variables};
