//! Recipe orchestration
//!
//! The `LevelManager` owns the recipe catalogue, the level-select
//! carousel and at most one running minigame. Selecting a recipe plays its
//! steps in order, each wrapped in a start and a finish transition; input
//! and updates reach the minigame only while it is playing.

use glam::Vec2;

use crate::carousel::{Carousel, CarouselAction};
use crate::consts::TICK_DT;
use crate::geom::Rect;
use crate::input::{InputEvent, Key};
use crate::minigame::{GameContext, Minigame, create_minigame, step_seed};
use crate::recipe::{Action, Recipe, builtin_recipes};
use crate::render::{Align, AssetLoader, Canvas, FontSize, colors, draw_progress_bar, fade};
use crate::settings::Settings;

/// Sub-phase of a running step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// Intro transition; counts ticks up to the transition length
    StartAnim { ticks: u32 },
    Playing,
    /// Outro transition; the next step starts when it ends
    FinishAnim { ticks: u32 },
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    LevelSelect,
    Step(StepPhase),
}

/// Score recorded for one finished step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub action: Action,
    pub score: u32,
}

pub struct LevelManager {
    recipes: Vec<Recipe>,
    carousel: Carousel,
    /// Index into `recipes` of the recipe in play (or last played)
    current: Option<usize>,
    minigame: Option<Box<dyn Minigame>>,
    screen: Screen,
    logical: Vec2,
    transition_ticks: u32,
    /// Seconds per logic tick, handed to each minigame
    tick_dt: f32,
    base_seed: u64,
    recipe_finished: bool,
    results: Vec<StepResult>,
    /// Results panel pending dismissal on the level-select screen
    show_results: bool,
}

impl LevelManager {
    pub fn new(recipes: Vec<Recipe>, logical: Vec2, transition_ticks: u32, base_seed: u64) -> Self {
        log::info!("Loaded {} recipes", recipes.len());
        Self {
            carousel: Carousel::new(recipes.len()),
            recipes,
            current: None,
            minigame: None,
            screen: Screen::LevelSelect,
            logical,
            transition_ticks,
            tick_dt: TICK_DT,
            base_seed,
            recipe_finished: false,
            results: Vec::new(),
            show_results: false,
        }
    }

    /// Built-in catalogue, laid out per `settings`
    pub fn from_settings(settings: &Settings, base_seed: u64) -> Self {
        Self::new(
            builtin_recipes(),
            Vec2::new(settings.logical_width, settings.logical_height),
            settings.transition_ticks,
            base_seed,
        )
        .with_tick_dt(settings.tick_dt())
    }

    /// Logic tick length for a non-default tick rate
    pub fn with_tick_dt(mut self, tick_dt: f32) -> Self {
        self.tick_dt = tick_dt;
        self
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.current.and_then(|i| self.recipes.get(i))
    }

    pub fn minigame(&self) -> Option<&dyn Minigame> {
        self.minigame.as_deref()
    }

    /// Scores of the recipe in play, or of the last finished one
    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    pub fn is_recipe_complete(&self) -> bool {
        self.recipe_finished
    }

    pub fn is_showing_results(&self) -> bool {
        self.show_results
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.screen,
            Screen::Step(StepPhase::StartAnim { .. }) | Screen::Step(StepPhase::FinishAnim { .. })
        )
    }

    /// Commit a recipe from the catalogue and start its first step
    pub fn select_recipe(&mut self, index: usize, assets: &mut dyn AssetLoader, now_ms: u64) {
        let Some(recipe) = self.recipes.get_mut(index) else {
            log::warn!("No recipe at index {}", index);
            return;
        };
        recipe.reset();
        log::info!("Selected recipe '{}' ({} steps)", recipe.name, recipe.steps.len());

        self.current = Some(index);
        self.recipe_finished = false;
        self.show_results = false;
        self.results.clear();
        self.advance_step(assets, now_ms);
    }

    /// Start the next step of the current recipe, skipping steps that cannot
    /// be built. With no steps left, finish the recipe and return to the
    /// level-select screen.
    pub fn advance_step(&mut self, assets: &mut dyn AssetLoader, now_ms: u64) {
        self.minigame = None;
        let Some(recipe) = self.current.and_then(|i| self.recipes.get_mut(i)) else {
            self.screen = Screen::LevelSelect;
            return;
        };

        while recipe.current_step < recipe.steps.len() {
            let index = recipe.current_step;
            recipe.current_step += 1;

            let step = &recipe.steps[index];
            let mut ctx = GameContext::new(self.logical, assets, now_ms, step_seed(self.base_seed, index))
                .with_tick_dt(self.tick_dt);
            match create_minigame(step, &mut ctx) {
                Ok(game) => {
                    log::info!("Step {}/{}: {}", index + 1, recipe.steps.len(), step.action);
                    self.minigame = Some(game);
                    self.screen = Screen::Step(StepPhase::StartAnim { ticks: 0 });
                    return;
                }
                Err(e) => log::warn!("Skipping step {} of '{}': {}", index + 1, recipe.name, e),
            }
        }

        self.finish_recipe();
    }

    fn finish_recipe(&mut self) {
        self.recipe_finished = true;
        self.minigame = None;
        self.screen = Screen::LevelSelect;
        self.show_results = true;
        if let Some(recipe) = self.current_recipe() {
            let scores: Vec<String> = self.results.iter().map(|r| format!("{}={}", r.action, r.score)).collect();
            log::info!("Finished '{}': [{}]", recipe.name, scores.join(", "));
        }
    }

    /// Drop the running recipe without recording a finish
    pub fn abandon(&mut self) {
        if let Some(recipe) = self.current_recipe() {
            log::info!("Abandoned '{}'", recipe.name);
        }
        self.minigame = None;
        self.screen = Screen::LevelSelect;
        self.recipe_finished = false;
        self.show_results = false;
    }

    /// One fixed logic tick
    pub fn update(&mut self, assets: &mut dyn AssetLoader, now_ms: u64) {
        match self.screen {
            Screen::LevelSelect => self.carousel.update(),
            Screen::Step(StepPhase::StartAnim { ticks }) => {
                let ticks = ticks + 1;
                if ticks >= self.transition_ticks {
                    if let Some(game) = self.minigame.as_mut() {
                        game.start(now_ms);
                    }
                    self.screen = Screen::Step(StepPhase::Playing);
                } else {
                    self.screen = Screen::Step(StepPhase::StartAnim { ticks });
                }
            }
            Screen::Step(StepPhase::Playing) => {
                let Some(game) = self.minigame.as_mut() else {
                    self.advance_step(assets, now_ms);
                    return;
                };
                game.update(now_ms);
                if game.is_complete() {
                    let result = StepResult {
                        action: game.action(),
                        score: game.score(),
                    };
                    log::info!("Step finished: {} scored {}", result.action, result.score);
                    self.results.push(result);
                    self.screen = Screen::Step(StepPhase::FinishAnim { ticks: 0 });
                }
            }
            Screen::Step(StepPhase::FinishAnim { ticks }) => {
                let ticks = ticks + 1;
                if ticks >= self.transition_ticks {
                    self.advance_step(assets, now_ms);
                } else {
                    self.screen = Screen::Step(StepPhase::FinishAnim { ticks });
                }
            }
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent, assets: &mut dyn AssetLoader, now_ms: u64) {
        match self.screen {
            Screen::LevelSelect => {
                if self.show_results {
                    if event.is_confirm() {
                        self.show_results = false;
                    }
                    return;
                }
                match self.carousel.handle_input(event, self.logical) {
                    CarouselAction::Select(index) => self.select_recipe(index, assets, now_ms),
                    CarouselAction::Moved => {
                        if let Some(recipe) = self.recipes.get(self.carousel.selected()) {
                            log::debug!("Browsing '{}'", recipe.name);
                        }
                    }
                    CarouselAction::None => {}
                }
            }
            Screen::Step(_) if *event == InputEvent::KeyDown(Key::Escape) => self.abandon(),
            Screen::Step(StepPhase::Playing) => {
                if let Some(game) = self.minigame.as_mut() {
                    game.handle_input(event, now_ms);
                }
            }
            Screen::Step(_) => {}
        }
    }

    /// Inputs for demo play: browse and pick recipes, then let each
    /// minigame drive itself
    pub fn autopilot(&self, now_ms: u64) -> Vec<InputEvent> {
        match self.screen {
            Screen::LevelSelect if self.show_results => {
                vec![InputEvent::KeyDown(Key::Enter), InputEvent::KeyDown(Key::Right)]
            }
            Screen::LevelSelect if !self.carousel.is_animating() => vec![InputEvent::KeyDown(Key::Enter)],
            Screen::Step(StepPhase::Playing) => self.minigame.as_ref().map(|g| g.autopilot(now_ms)).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, now_ms: u64) {
        let screen = Rect::new(0.0, 0.0, self.logical.x, self.logical.y);
        match self.screen {
            Screen::LevelSelect => {
                canvas.fill_rect(screen, colors::BACKGROUND);
                self.carousel.render(canvas, &self.recipes, self.logical);
                if self.show_results {
                    self.render_results(canvas);
                }
            }
            Screen::Step(phase) => {
                if let Some(game) = self.minigame.as_ref() {
                    game.render(canvas, now_ms);
                }
                match phase {
                    StepPhase::StartAnim { ticks } => self.render_start_anim(canvas, ticks),
                    StepPhase::FinishAnim { ticks } => self.render_finish_anim(canvas, ticks),
                    StepPhase::Playing => {}
                }
            }
        }
    }

    fn transition_progress(&self, ticks: u32) -> f32 {
        (ticks as f32 / self.transition_ticks.max(1) as f32).min(1.0)
    }

    fn center_text(&self, canvas: &mut dyn Canvas, text: &str, y: f32) {
        canvas.text(text, FontSize::Regular, Vec2::new(self.logical.x / 2.0, y), Align::Center, colors::WHITE);
    }

    /// Curtain lifting off the new minigame
    fn render_start_anim(&self, canvas: &mut dyn Canvas, ticks: u32) {
        let t = self.transition_progress(ticks);
        let h = self.logical.y * (1.0 - t);
        canvas.fill_rect(Rect::new(0.0, 0.0, self.logical.x, h), fade(colors::DIM, 0.85));

        if let Some(recipe) = self.current_recipe() {
            let n = recipe.current_step;
            if let Some(step) = n.checked_sub(1).and_then(|i| recipe.steps.get(i)) {
                self.center_text(canvas, &format!("Step {}: {}", n, step.action.label()), self.logical.y * 0.4 * (1.0 - t));
            }
        }
    }

    /// Curtain dropping over the finished minigame
    fn render_finish_anim(&self, canvas: &mut dyn Canvas, ticks: u32) {
        let t = self.transition_progress(ticks);
        canvas.fill_rect(Rect::new(0.0, 0.0, self.logical.x, self.logical.y * t), fade(colors::DIM, 0.85));
        if let Some(last) = self.results.last() {
            self.center_text(canvas, &format!("Step complete! Score: {}", last.score), self.logical.y * 0.4 * t);
        }
    }

    /// One bar per recorded score, with a numeric label
    fn render_results(&self, canvas: &mut dyn Canvas) {
        let full = Rect::new(0.0, 0.0, self.logical.x, self.logical.y);
        canvas.fill_rect(full, fade(colors::DIM, 0.6));

        let rows = self.results.len().max(1) as f32;
        let panel = Rect::centered(self.logical / 2.0, self.logical.x * 0.7, 90.0 + rows * 40.0);
        canvas.fill_rect(panel, colors::CARD);
        canvas.stroke_rect(panel, colors::BLACK);

        let title = match self.current_recipe() {
            Some(recipe) => format!("{} complete!", recipe.name),
            None => "Recipe complete!".to_string(),
        };
        canvas.text(
            &title,
            FontSize::Regular,
            Vec2::new(panel.center().x, panel.y + 14.0),
            Align::Center,
            colors::BLACK,
        );

        let bar_x = panel.x + 150.0;
        let bar_w = panel.right() - 30.0 - bar_x;
        for (i, result) in self.results.iter().enumerate() {
            let y = panel.y + 56.0 + i as f32 * 40.0;
            canvas.text(
                &format!("{}: {}", result.action.label(), result.score),
                FontSize::Small,
                Vec2::new(panel.x + 20.0, y + 6.0),
                Align::Left,
                colors::BLACK,
            );
            draw_progress_bar(canvas, Rect::new(bar_x, y, bar_w, 30.0), result.score.min(100) as f32 / 100.0);
        }

        canvas.text(
            "Press any key to continue",
            FontSize::Small,
            Vec2::new(panel.center().x, panel.bottom() - 24.0),
            Align::Center,
            colors::BLACK,
        );
    }
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), 0)
    }
}
