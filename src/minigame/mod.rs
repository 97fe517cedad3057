//! Minigames
//!
//! Every minigame implements the same small contract and owns only its own
//! geometry, timing and score state. The orchestrator holds at most one
//! boxed instance at a time; dropping it releases everything it loaded.

pub mod cutting;
pub mod egg;
pub mod frying;
pub mod mixing;

pub use cutting::CuttingGame;
pub use egg::{EggCrackingGame, EggMode};
pub use frying::FryingGame;
pub use mixing::MixingGame;

use glam::Vec2;

use crate::consts::TICK_DT;
use crate::error::GameResult;
use crate::input::InputEvent;
use crate::recipe::{Action, CookingStep};
use crate::render::{AssetLoader, Canvas};

/// Explicit context threaded into minigame constructors
pub struct GameContext<'a> {
    /// Logical render resolution
    pub logical: Vec2,
    /// Texture source
    pub assets: &'a mut dyn AssetLoader,
    /// Clock reading at construction
    pub now_ms: u64,
    /// Seed for this instance's RNG
    pub seed: u64,
    /// Seconds covered by one logic tick
    pub tick_dt: f32,
}

impl<'a> GameContext<'a> {
    pub fn new(logical: Vec2, assets: &'a mut dyn AssetLoader, now_ms: u64, seed: u64) -> Self {
        Self {
            logical,
            assets,
            now_ms,
            seed,
            tick_dt: TICK_DT,
        }
    }

    /// Override the default fixed tick length
    pub fn with_tick_dt(mut self, tick_dt: f32) -> Self {
        self.tick_dt = tick_dt;
        self
    }
}

/// The capability set shared by all minigames
pub trait Minigame {
    /// Which step action this minigame plays
    fn action(&self) -> Action;

    /// Play begins (the intro transition has ended); timers restart here
    fn start(&mut self, _now_ms: u64) {}

    /// Advance one fixed logic tick
    fn update(&mut self, now_ms: u64);

    /// Apply one input event
    fn handle_input(&mut self, event: &InputEvent, now_ms: u64);

    /// Issue draw calls for the current state
    fn render(&self, canvas: &mut dyn Canvas, now_ms: u64);

    /// Once true, stays true for the life of the instance
    fn is_complete(&self) -> bool;

    /// Score in [0, 100]; meaningful only after completion
    fn score(&self) -> u32 {
        0
    }

    /// Inputs a competent player would produce right now (demo mode)
    fn autopilot(&self, _now_ms: u64) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Build the minigame for a step.
///
/// Steps whose minigame draws an ingredient must list at least one.
pub fn create_minigame(step: &CookingStep, ctx: &mut GameContext) -> GameResult<Box<dyn Minigame>> {
    step.validate()?;
    let game: Box<dyn Minigame> = match step.action {
        Action::Cut => Box::new(CuttingGame::new(step, ctx)?),
        Action::Mix => Box::new(MixingGame::new(step, ctx)?),
        Action::Fry => Box::new(FryingGame::new(step, ctx)?),
        Action::Egg => Box::new(EggCrackingGame::new(step, ctx, EggMode::Normal)),
        Action::EggEndless => Box::new(EggCrackingGame::new(step, ctx, EggMode::Endless)),
    };
    log::debug!("Created {} minigame (duration {})", step.action, step.duration);
    Ok(game)
}

/// Per-step seed: decorrelates steps while staying reproducible per run
pub fn step_seed(base_seed: u64, step_index: usize) -> u64 {
    (step_index as u64)
        .wrapping_add(1)
        .wrapping_mul(2654435761)
        .wrapping_add(base_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
    use crate::error::GameError;
    use crate::recipe::Ingredient;
    use crate::render::NullAssets;

    fn ctx(assets: &mut NullAssets) -> GameContext<'_> {
        GameContext::new(Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT), assets, 0, 1)
    }

    #[test]
    fn test_factory_dispatches_on_action() {
        let mut assets = NullAssets;
        let carrot = vec![Ingredient::new("Carrot", 1, "Whole")];
        for action in [Action::Cut, Action::Mix, Action::Fry, Action::Egg, Action::EggEndless] {
            let step = CookingStep::new(action, carrot.clone(), 3.0);
            let game = create_minigame(&step, &mut ctx(&mut assets)).unwrap();
            assert_eq!(game.action(), action);
            assert!(!game.is_complete());
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn test_factory_rejects_empty_ingredients() {
        let mut assets = NullAssets;
        let step = CookingStep::new(Action::Mix, Vec::new(), 3.0);
        let result = create_minigame(&step, &mut ctx(&mut assets));
        assert!(matches!(
            result,
            Err(GameError::EmptyIngredients { action: Action::Mix })
        ));
    }

    #[test]
    fn test_step_seed_differs_per_step() {
        assert_ne!(step_seed(99, 0), step_seed(99, 1));
        assert_eq!(step_seed(99, 3), step_seed(99, 3));
    }
}
