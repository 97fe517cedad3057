//! Frame driver
//!
//! One `frame` call applies the frame's input events, runs the logic ticks
//! that are due at the fixed rate, then renders. The host owns the window
//! and converts its events into `InputEvent`s in logical coordinates.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::clock::Clock;
use crate::input::InputEvent;
use crate::level::LevelManager;
use crate::render::{AssetLoader, Canvas, TextureCache};
use crate::scheduler::FrameScheduler;
use crate::settings::Settings;

pub struct App<C: Clock> {
    settings: Settings,
    clock: C,
    scheduler: FrameScheduler,
    levels: LevelManager,
    assets: Box<dyn AssetLoader>,
    /// Autopilot drives every screen (demo / attract mode)
    idle_mode: bool,
}

/// Seed from wall time when none is configured
fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl<C: Clock> App<C> {
    /// `loader` resolves sprite paths under the configured asset root
    pub fn new<L: AssetLoader + 'static>(settings: Settings, clock: C, loader: L) -> Self {
        let seed = settings.seed.unwrap_or_else(seed_from_time);
        log::info!("Game initialized with seed: {}", seed);

        let scheduler = FrameScheduler::new(clock.now_ms(), settings.tick_ms(), settings.max_frameskip);
        let levels = LevelManager::from_settings(&settings, seed);
        let assets: Box<dyn AssetLoader> = Box::new(TextureCache::new(settings.asset_root.clone(), loader));
        Self {
            settings,
            clock,
            scheduler,
            levels,
            assets,
            idle_mode: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn levels(&self) -> &LevelManager {
        &self.levels
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        if on != self.idle_mode {
            log::info!("Idle mode: {}", on);
        }
        self.idle_mode = on;
    }

    /// Start a recipe directly, bypassing the carousel
    pub fn select_recipe(&mut self, index: usize) {
        let now = self.clock.now_ms();
        self.levels.select_recipe(index, self.assets.as_mut(), now);
    }

    /// Drop the running recipe and return to level select
    pub fn abandon(&mut self) {
        self.levels.abandon();
    }

    /// Run one frame: events, then due logic ticks, then render.
    /// Returns the number of logic ticks run.
    pub fn frame(&mut self, events: &[InputEvent], canvas: &mut dyn Canvas) -> u32 {
        let now = self.clock.now_ms();

        for event in events {
            self.levels.handle_input(event, self.assets.as_mut(), now);
        }

        let ticks = self.scheduler.ticks_due(now);
        for _ in 0..ticks {
            if self.idle_mode {
                for event in self.levels.autopilot(now) {
                    self.levels.handle_input(&event, self.assets.as_mut(), now);
                }
            }
            self.levels.update(self.assets.as_mut(), now);
        }

        self.levels.render(canvas, now);
        ticks
    }
}
