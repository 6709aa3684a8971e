//! Attaching and retracting keyword expansions.
//!
//! The compiler is the only writer of keyword-derived behaviors and
//! variables on a [`Representation`]. Everything it attaches is tagged
//! with the keyword instance it came from, so [`retract`] removes exactly
//! what [`expand`] added and releases the handles the factory built.

use tracing::debug;

use super::compiled::{BehaviorId, CompiledBehavior, Origin};
use super::factory::AbilityFactory;
use super::recipes::plan;
use crate::core::ObjectId;
use crate::keywords::{KeywordId, KeywordInstance};
use crate::object::Representation;

/// What one expansion attached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expansion {
    pub behaviors: usize,
    pub variables: usize,
}

impl Expansion {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.behaviors == 0 && self.variables == 0
    }

    fn merge(self, other: Expansion) -> Expansion {
        Expansion {
            behaviors: self.behaviors + other.behaviors,
            variables: self.variables + other.variables,
        }
    }
}

/// Expand one keyword instance onto `rep`.
///
/// Anything previously attached for the same instance is retracted first,
/// so expanding twice leaves one copy.
///
/// ```
/// use ccg_layers::behavior::{expand, retract, ScriptFactory};
/// use ccg_layers::core::ObjectId;
/// use ccg_layers::keywords::{Keyword, KeywordId, KeywordInstance};
/// use ccg_layers::object::{FaceName, Representation};
///
/// let mut rep = Representation::new(FaceName::Original, "Samurai");
/// let bushido = KeywordInstance::new(KeywordId(0), Keyword::Bushido(2));
/// let mut factory = ScriptFactory::new();
///
/// expand(&mut rep, ObjectId(1), &bushido, true, &mut factory);
/// expand(&mut rep, ObjectId(1), &bushido, true, &mut factory);
/// assert_eq!(rep.behaviors.len(), 2);
///
/// assert_eq!(factory.built(), 2);
///
/// assert_eq!(retract(&mut rep, KeywordId(0), &mut factory), 2);
/// assert!(rep.behaviors.is_empty());
/// assert_eq!(factory.built(), 0);
/// ```
pub fn expand(
    rep: &mut Representation,
    host: ObjectId,
    instance: &KeywordInstance,
    intrinsic: bool,
    factory: &mut dyn AbilityFactory,
) -> Expansion {
    retract(rep, instance.id, factory);

    let origin = Origin::Keyword(instance.id);
    let plan = plan(&instance.keyword, instance.id);
    let expansion = Expansion {
        behaviors: plan.recipes.len(),
        variables: plan.variables.len(),
    };

    for (name, value) in plan.variables {
        rep.variables.set(name, value, origin);
    }
    for (slot, recipe) in plan.recipes.into_iter().enumerate() {
        let slot = u16::try_from(slot).unwrap_or(u16::MAX);
        let handle = factory.build(host, &recipe);
        rep.behaviors.attach(CompiledBehavior {
            id: BehaviorId::new(origin, slot),
            recipe,
            host,
            intrinsic,
            handle,
        });
    }

    if !expansion.is_empty() {
        debug!(
            object = %host,
            face = ?rep.face,
            keyword = %instance.keyword,
            behaviors = expansion.behaviors,
            variables = expansion.variables,
            "keyword expanded"
        );
    }
    expansion
}

/// Remove every behavior and variable compiled from keyword `id`,
/// releasing each behavior's handle. Returns the number of behaviors
/// removed; retracting twice returns 0.
pub fn retract(rep: &mut Representation, id: KeywordId, factory: &mut dyn AbilityFactory) -> usize {
    let origin = Origin::Keyword(id);
    let behaviors = rep.behaviors.retract_origin(origin);
    let removed = behaviors.len();
    for behavior in behaviors {
        factory.release(behavior.handle);
    }
    let vars = rep.variables.retract_origin(origin);
    if removed > 0 || vars > 0 {
        debug!(face = ?rep.face, keyword = %id, behaviors = removed, variables = vars, "keyword retracted");
    }
    removed
}

/// Expand every printed keyword of `rep`.
pub fn expand_intrinsic(
    rep: &mut Representation,
    host: ObjectId,
    factory: &mut dyn AbilityFactory,
) -> Expansion {
    let keywords = rep.keywords.clone();
    keywords
        .iter()
        .map(|instance| expand(rep, host, instance, true, factory))
        .fold(Expansion::default(), Expansion::merge)
}
