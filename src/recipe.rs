//! Recipe data: ingredients, cooking steps and recipes
//!
//! Recipes are built once at startup and live for the whole process; only
//! `Recipe::current_step` changes during play.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// An ingredient. `name` doubles as the sprite lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: u32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Sprite path under the asset root
    pub fn sprite_path(&self) -> String {
        format!("sprites/ingredients/{}.png", self.name)
    }
}

/// Which minigame a step runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Cut,
    Mix,
    Fry,
    Egg,
    EggEndless,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Cut => "cut",
            Action::Mix => "mix",
            Action::Fry => "fry",
            Action::Egg => "egg",
            Action::EggEndless => "egg_endless",
        }
    }

    /// Human-readable verb for banners
    pub fn label(&self) -> &'static str {
        match self {
            Action::Cut => "Cut",
            Action::Mix => "Mix",
            Action::Fry => "Fry",
            Action::Egg => "Crack Eggs",
            Action::EggEndless => "Endless Eggs",
        }
    }

    /// Whether the minigame for this action draws the first ingredient
    pub fn needs_ingredient(&self) -> bool {
        matches!(self, Action::Cut | Action::Mix | Action::Fry)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(Action::Cut),
            "mix" => Ok(Action::Mix),
            "fry" => Ok(Action::Fry),
            "egg" => Ok(Action::Egg),
            "egg_endless" => Ok(Action::EggEndless),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// One minigame's worth of parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingStep {
    pub action: Action,
    pub ingredients: Vec<Ingredient>,
    /// Cut count (cut), target seconds (fry), target turns (mix),
    /// or egg count (egg)
    pub duration: f32,
    /// Timing tolerance, informational only
    #[serde(default)]
    pub perfect_window: f32,
}

impl CookingStep {
    pub fn new(action: Action, ingredients: Vec<Ingredient>, duration: f32) -> Self {
        Self {
            action,
            ingredients,
            duration,
            perfect_window: 0.0,
        }
    }

    pub fn with_perfect_window(mut self, window: f32) -> Self {
        self.perfect_window = window;
        self
    }

    /// First ingredient, or an error for actions that need one
    pub fn primary_ingredient(&self) -> GameResult<&Ingredient> {
        self.ingredients
            .first()
            .ok_or(GameError::EmptyIngredients {
                action: self.action,
            })
    }

    /// Construction-time validation
    pub fn validate(&self) -> GameResult<()> {
        if self.action.needs_ingredient() {
            self.primary_ingredient()?;
        }
        Ok(())
    }
}

/// A playable level: ordered cooking steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    /// 1 (easy) to 5 (hard)
    pub difficulty: u8,
    pub steps: Vec<CookingStep>,
    /// Index of the next step to start
    #[serde(default)]
    pub current_step: usize,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        difficulty: u8,
        steps: Vec<CookingStep>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            difficulty: difficulty.clamp(1, 5),
            steps,
            current_step: 0,
        }
    }

    /// Rewind for a fresh playthrough
    pub fn reset(&mut self) {
        self.current_step = 0;
    }

    /// All ingredients used by any step, first occurrence order
    pub fn ingredients(&self) -> Vec<&Ingredient> {
        let mut out: Vec<&Ingredient> = Vec::new();
        for ingr in self.steps.iter().flat_map(|s| s.ingredients.iter()) {
            if !out.iter().any(|i| i.name == ingr.name) {
                out.push(ingr);
            }
        }
        out
    }
}

/// The built-in recipe catalogue
pub fn builtin_recipes() -> Vec<Recipe> {
    let carrot = Ingredient::new("Carrot", 1, "Whole");
    let onion = Ingredient::new("Onion", 1, "Whole");
    let tomato = Ingredient::new("Tomato", 2, "Whole");
    let batter = Ingredient::new("Batter", 1, "Cup");
    let egg = Ingredient::new("Egg", 3, "Whole");
    let bacon = Ingredient::new("Bacon", 4, "Strip");

    vec![
        Recipe::new(
            "cut_test",
            "Test recipe",
            1,
            vec![CookingStep::new(Action::Cut, vec![carrot.clone()], 5.0).with_perfect_window(1.5)],
        ),
        Recipe::new(
            "Garden Salad",
            "Chop the vegetables and toss them together.",
            2,
            vec![
                CookingStep::new(Action::Cut, vec![tomato.clone()], 4.0),
                CookingStep::new(Action::Cut, vec![carrot.clone()], 6.0),
                CookingStep::new(Action::Mix, vec![tomato, carrot.clone()], 3.0),
            ],
        ),
        Recipe::new(
            "Breakfast Fry-Up",
            "Crack the eggs, then keep the bacon in the hot spot.",
            3,
            vec![
                CookingStep::new(Action::Egg, vec![egg.clone()], 3.0).with_perfect_window(0.2),
                CookingStep::new(Action::Fry, vec![bacon], 8.0),
            ],
        ),
        Recipe::new(
            "Pancakes",
            "Whisk the batter smooth and fry it golden.",
            3,
            vec![
                CookingStep::new(Action::Egg, vec![egg.clone()], 2.0),
                CookingStep::new(Action::Mix, vec![batter.clone()], 4.0),
                CookingStep::new(Action::Fry, vec![batter], 10.0),
            ],
        ),
        Recipe::new(
            "French Onion Soup",
            "Lots of onions. Lots of cutting. Patience on the heat.",
            4,
            vec![
                CookingStep::new(Action::Cut, vec![onion.clone()], 8.0),
                CookingStep::new(Action::Fry, vec![onion.clone()], 12.0),
                CookingStep::new(Action::Mix, vec![onion], 5.0),
            ],
        ),
        Recipe::new(
            "Egg Marathon",
            "Crack eggs faster and faster until one slips.",
            5,
            vec![CookingStep::new(Action::EggEndless, vec![egg], 0.0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!("cut".parse::<Action>().unwrap(), Action::Cut);
        assert_eq!("EGG_ENDLESS".parse::<Action>().unwrap(), Action::EggEndless);
        assert!(matches!(
            "bake".parse::<Action>(),
            Err(GameError::UnknownAction(s)) if s == "bake"
        ));
    }

    #[test]
    fn test_action_serde_names() {
        let json = serde_json::to_string(&Action::EggEndless).unwrap();
        assert_eq!(json, "\"egg_endless\"");
        let step: CookingStep = serde_json::from_str(
            r#"{"action":"fry","ingredients":[{"name":"Bacon","quantity":1,"unit":"Strip"}],"duration":5.0}"#,
        )
        .unwrap();
        assert_eq!(step.action, Action::Fry);
        assert_eq!(step.perfect_window, 0.0);
    }

    #[test]
    fn test_validate_empty_ingredients() {
        let step = CookingStep::new(Action::Cut, Vec::new(), 3.0);
        assert!(matches!(
            step.validate(),
            Err(GameError::EmptyIngredients { action: Action::Cut })
        ));

        // Egg cracking draws its own sprites
        let step = CookingStep::new(Action::Egg, Vec::new(), 3.0);
        assert!(step.validate().is_ok());
    }

    #[test]
    fn test_builtin_recipes_are_valid() {
        let recipes = builtin_recipes();
        assert!(!recipes.is_empty());
        for recipe in &recipes {
            assert!(!recipe.steps.is_empty(), "{} has no steps", recipe.name);
            assert!((1..=5).contains(&recipe.difficulty));
            for step in &recipe.steps {
                step.validate().unwrap();
            }
        }
    }

    #[test]
    fn test_recipe_reset_and_ingredients() {
        let mut recipe = builtin_recipes().remove(1);
        recipe.current_step = 2;
        recipe.reset();
        assert_eq!(recipe.current_step, 0);

        let names: Vec<_> = recipe.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tomato", "Carrot"]);
    }
}
