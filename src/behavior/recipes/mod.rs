//! Expansion templates, one per structural keyword.
//!
//! [`plan`] maps a keyword instance to the recipes and variables it
//! expands into. It is a pure function of the keyword's parameters and
//! the instance id, so running it twice yields identical plans.
//!
//! Templates are grouped by what the keyword does:
//!
//! - `combat`: attack and block triggers, combat damage triggers
//! - `counters`: counters on entry, counter-driven upkeep and death
//! - `zones`: death, entry, casting and zone-change abilities, statics
//! - `activated`: activated abilities and special actions
//! - `castable`: alternative, additional and optional casting costs

mod activated;
mod castable;
mod combat;
mod counters;
mod zones;

use serde::{Deserialize, Serialize};

use super::effect::{Amount, Duration, Effect, Subject};
use super::recipe::Recipe;
use super::vars::VarValue;
use crate::counters::CounterType;
use crate::keywords::{reminder_text, Keyword, KeywordId, Magnitude};

pub use castable::turn_face_up;

/// What one keyword instance expands into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Recipes in slot order.
    pub recipes: Vec<Recipe>,
    /// Variables the recipes read.
    pub variables: Vec<(String, VarValue)>,
}

impl Plan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe (builder pattern).
    #[must_use]
    pub fn with(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Add a variable (builder pattern).
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.variables.is_empty()
    }
}

/// Expansion plan for a keyword instance.
///
/// Static-text keywords plan to nothing. Recipes without their own
/// description get the keyword's reminder text.
///
/// ```
/// use ccg_layers::behavior::plan;
/// use ccg_layers::keywords::{Keyword, KeywordId};
///
/// let bushido = plan(&Keyword::Bushido(2), KeywordId::new(0));
/// assert_eq!(bushido.recipes.len(), 2);
/// assert_eq!(bushido.variables[0].0, "Bushido0");
///
/// assert!(plan(&Keyword::Flying, KeywordId::new(1)).is_empty());
/// ```
#[must_use]
pub fn plan(keyword: &Keyword, id: KeywordId) -> Plan {
    if keyword.is_static_text() {
        return Plan::new();
    }
    let var = var_name(keyword, id);
    let mut plan = combat::plan(keyword, &var)
        .or_else(|| counters::plan(keyword, &var))
        .or_else(|| zones::plan(keyword, &var))
        .or_else(|| activated::plan(keyword, &var))
        .or_else(|| castable::plan(keyword, &var))
        .unwrap_or_default();

    let reminder = reminder_text(keyword);
    for recipe in &mut plan.recipes {
        if recipe.description.is_empty() {
            recipe.description = reminder.clone();
        }
    }
    plan
}

/// Per-instance variable name: the keyword name without spaces or
/// punctuation, followed by the instance id (`Bushido3`).
#[must_use]
pub fn var_name(keyword: &Keyword, id: KeywordId) -> String {
    let base: String = keyword
        .name()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    format!("{}{}", base, id.raw())
}

// === Shared template pieces ===

/// Plan seeded with the keyword's magnitude variable.
fn with_magnitude(var: &str, n: u32) -> (Plan, Amount) {
    (Plan::new().with_var(var, n), Amount::var(var))
}

/// Amount for a possibly variable magnitude. Fixed magnitudes are stored
/// in `var` on the returned plan.
fn magnitude_amount(var: &str, magnitude: Magnitude) -> (Plan, Amount) {
    match magnitude {
        Magnitude::Fixed(n) => with_magnitude(var, n),
        Magnitude::X => (Plan::new(), Amount::count("ChosenX")),
        Magnitude::Sunburst => (Plan::new(), Amount::ColorsSpent),
    }
}

fn plus_one_counters(subject: Subject, amount: impl Into<Amount>) -> Effect {
    Effect::put_counters(subject, CounterType::PlusOnePlusOne, amount)
}

/// Grant a keyword to the host for good.
fn gain_keyword(keyword: &str, duration: Duration) -> Effect {
    Effect::Pump {
        subject: Subject::This,
        power: Amount::Fixed(0),
        toughness: Amount::Fixed(0),
        keywords: vec![keyword.to_string()],
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::recipe::{BehaviorKind, Mode};
    use crate::keywords::KNOWN_NAMES;

    #[test]
    fn test_static_text_plans_nothing() {
        for keyword in [
            Keyword::Flying,
            Keyword::Protection("red".into()),
            Keyword::Other("Custom text".into()),
        ] {
            assert!(plan(&keyword, KeywordId(0)).is_empty(), "{:?}", keyword);
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        let keyword = Keyword::parse("Suspend:3:1 R").unwrap();
        assert_eq!(plan(&keyword, KeywordId(1)), plan(&keyword, KeywordId(1)));
        assert_ne!(plan(&keyword, KeywordId(1)), plan(&keyword, KeywordId(2)));
    }

    #[test]
    fn test_var_name() {
        assert_eq!(var_name(&Keyword::Bushido(1), KeywordId(3)), "Bushido3");
        assert_eq!(var_name(&Keyword::BattleCry, KeywordId(0)), "Battlecry0");
        assert_eq!(var_name(&Keyword::JumpStart, KeywordId(2)), "Jumpstart2");
    }

    #[test]
    fn test_every_structural_keyword_expands() {
        for name in KNOWN_NAMES {
            let tag = sample_tag(name);
            let keyword = match Keyword::parse(&tag) {
                Ok(k) => k,
                Err(e) => panic!("{} failed to parse: {}", tag, e),
            };
            let plan = plan(&keyword, KeywordId(0));
            if keyword.is_static_text() {
                assert!(plan.is_empty(), "{} should not expand", tag);
            } else {
                assert!(!plan.recipes.is_empty(), "{} expanded to nothing", tag);
                for recipe in &plan.recipes {
                    assert!(!recipe.description.is_empty(), "{} has no description", tag);
                }
            }
        }
    }

    /// A parseable tag for every known keyword name.
    fn sample_tag(name: &str) -> String {
        match name {
            "Protection" => "Protection:red".into(),
            "Landwalk" => "Landwalk:Island".into(),
            "Enchant" => "Enchant:Creature".into(),
            "Affinity" => "Affinity:Artifact".into(),
            "Champion" => "Champion:Faerie".into(),
            "Modular" | "Toxic" | "Bushido" | "Rampage" | "Bloodthirst" | "Graft" | "Ripple"
            | "Vanishing" | "Fading" | "Dredge" | "Annihilator" | "Afflict" | "Afterlife"
            | "Fabricate" | "Renown" | "Soulshift" | "Devour" | "Tribute" | "Absorb"
            | "Poisonous" | "Frenzy" | "Hideaway" | "Backup" | "Crew" => format!("{}:2", name),
            "Amplify" => "Amplify:1:Dragon".into(),
            "Typecycling" => "Typecycling:Forest:2".into(),
            "Suspend" => "Suspend:3:1 R".into(),
            "Kicker" => "Kicker:1 G".into(),
            "Escape" => "Escape:R R:3".into(),
            "Splice" => "Splice:Arcane:1 R".into(),
            "Flashback" => "Flashback:3 R".into(),
            "Ward" | "Echo" | "Cumulative upkeep" | "Equip" | "Fortify" | "Reconfigure"
            | "Cycling" | "Outlast" | "Level up" | "Transmute" | "Scavenge" | "Unearth"
            | "Embalm" | "Eternalize" | "Encore" | "Ninjutsu" | "Madness" | "Morph"
            | "Megamorph" | "Disguise" | "Multikicker" | "Buyback" | "Entwine" | "Evoke"
            | "Dash" | "Blitz" | "Spectacle" | "Surge" | "Prowl" | "Emerge" | "Foretell"
            | "Plot" | "Miracle" | "Overload" | "Replicate" | "Bestow" | "Disturb" | "Squad" => {
                format!("{}:2", name)
            }
            other => other.to_string(),
        }
    }

    #[test]
    fn test_bushido_plan_shape() {
        let plan = plan(&Keyword::Bushido(2), KeywordId(4));
        assert_eq!(plan.variables, vec![("Bushido4".to_string(), VarValue::Int(2))]);
        assert_eq!(plan.recipes.len(), 2);
        assert!(plan.recipes.iter().all(|r| r.kind() == BehaviorKind::Trigger));
        for recipe in &plan.recipes {
            assert_eq!(recipe.effect.variables(), vec!["Bushido4"]);
        }
    }

    #[test]
    fn test_changeling_is_characteristic_defining() {
        let plan = plan(&Keyword::Changeling, KeywordId(0));
        match &plan.recipes[0].mode {
            Mode::Static(ability) => assert!(ability.characteristic_defining),
            other => panic!("Expected static, got {:?}", other),
        }
    }
}
