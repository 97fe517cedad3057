//! Mixing minigame
//!
//! Stir by circling the pointer inside the bowl (or tapping Space). Progress
//! is measured in full turns against a 10 second limit; the score is the
//! share of the limit left over when mixing finished.

use std::f32::consts::TAU;

use glam::Vec2;

use super::{GameContext, Minigame};
use crate::angle_delta;
use crate::error::GameResult;
use crate::geom::Rect;
use crate::input::{InputEvent, Key, PointerButton};
use crate::recipe::{Action, CookingStep, Ingredient};
use crate::render::{Align, Canvas, FontSize, Texture, colors, draw_progress_bar};

/// Scoring window
pub const SCORE_TIME_LIMIT_MS: u64 = 10_000;
/// Angular movement below this fraction of a turn is ignored as jitter
pub const NOISE_THRESHOLD: f32 = 0.0005;
/// Turns credited per Space press
pub const KEY_STIR: f32 = 0.2;

/// Autopilot stirring speed (radians per tick)
const AUTOPILOT_STEP: f32 = 0.3;

pub struct MixingGame {
    ingredient: Ingredient,
    target_turns: f32,
    logical: Vec2,
    bowl_rect: Rect,
    bowl_center: Vec2,
    bowl_radius: f32,
    ingredient_rect: Rect,
    progress_bg: Rect,
    last_angle: f32,
    progress: f32,
    tracking: bool,
    start_ms: u64,
    completed_at: Option<u64>,
    score: u32,
    tex_background: Option<Texture>,
    tex_bowl: Option<Texture>,
    tex_ingredient: Option<Texture>,
}

impl MixingGame {
    pub fn new(step: &CookingStep, ctx: &mut GameContext) -> GameResult<Self> {
        let ingredient = step.primary_ingredient()?.clone();

        let tex_background = ctx.assets.load("sprites/mixing_game/background_mixing.png");
        let tex_bowl = ctx.assets.load("sprites/mixing_game/bowl.png");
        let tex_ingredient = ctx.assets.load(&ingredient.sprite_path());

        let half = ctx.logical / 2.0;
        let bowl_rect = Rect::new(half.x - 220.0, half.y - 150.0, 440.0, 300.0);
        let bowl_center = bowl_rect.center() - Vec2::new(0.0, 10.0);
        let bowl_radius = bowl_rect.w.min(bowl_rect.h) * 0.35;

        let ingredient_rect = match tex_ingredient {
            Some(tex) => Rect::new(
                bowl_center.x - bowl_radius * 0.8,
                bowl_center.y - bowl_radius * 0.6,
                bowl_radius * 1.6,
                bowl_radius * 1.2,
            )
            .fit_aspect(tex.aspect()),
            None => Rect::new(
                bowl_center.x - bowl_radius * 0.7,
                bowl_center.y - bowl_radius * 0.5,
                bowl_radius * 1.4,
                bowl_radius,
            ),
        };

        Ok(Self {
            ingredient,
            target_turns: step.duration,
            logical: ctx.logical,
            bowl_rect,
            bowl_center,
            bowl_radius,
            ingredient_rect,
            progress_bg: Rect::new(half.x - 250.0, 40.0, 500.0, 35.0),
            last_angle: 0.0,
            progress: 0.0,
            tracking: false,
            start_ms: ctx.now_ms,
            completed_at: None,
            score: 0,
            tex_background,
            tex_bowl,
            tex_ingredient,
        })
    }

    pub fn bowl_center(&self) -> Vec2 {
        self.bowl_center
    }

    pub fn bowl_radius(&self) -> f32 {
        self.bowl_radius
    }

    /// Accumulated turns
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn in_bowl(&self, p: Vec2) -> bool {
        p.distance_squared(self.bowl_center) <= self.bowl_radius * self.bowl_radius
    }

    fn angle_of(&self, p: Vec2) -> f32 {
        let d = p - self.bowl_center;
        d.y.atan2(d.x)
    }

    fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.completed_at.unwrap_or(now_ms).saturating_sub(self.start_ms)
    }

    fn time_expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= SCORE_TIME_LIMIT_MS
    }

    /// Completion condition, evaluated against `now_ms`
    fn is_finished(&self, now_ms: u64) -> bool {
        self.completed_at.is_some() || self.progress >= self.target_turns || self.time_expired(now_ms)
    }

    fn apply_stir(&mut self, amount: f32, now_ms: u64) {
        if self.is_finished(now_ms) {
            return;
        }
        self.progress = (self.progress + amount).min(self.target_turns);
        self.finalize_score(now_ms);
    }

    /// Freeze the score the first time completion is seen
    fn finalize_score(&mut self, now_ms: u64) {
        if self.completed_at.is_some() || !self.is_finished(now_ms) {
            return;
        }
        let elapsed = self.elapsed_ms(now_ms).min(SCORE_TIME_LIMIT_MS);
        let remaining = (SCORE_TIME_LIMIT_MS - elapsed) as f32;
        self.score = ((remaining / SCORE_TIME_LIMIT_MS as f32) * 100.0).round().clamp(0.0, 100.0) as u32;
        self.completed_at = Some(now_ms);
        log::info!(
            "Mixed {} to {:.2}/{} turns in {}ms (score {})",
            self.ingredient.name,
            self.progress,
            self.target_turns,
            elapsed,
            self.score
        );
    }

    fn progress_ratio(&self) -> f32 {
        if self.target_turns > 0.0 {
            (self.progress / self.target_turns).min(1.0)
        } else {
            1.0
        }
    }
}

impl Minigame for MixingGame {
    fn action(&self) -> Action {
        Action::Mix
    }

    fn start(&mut self, now_ms: u64) {
        if self.completed_at.is_none() {
            self.start_ms = now_ms;
        }
    }

    fn update(&mut self, now_ms: u64) {
        if self.time_expired(now_ms) {
            self.tracking = false;
        }
        self.finalize_score(now_ms);
    }

    fn handle_input(&mut self, event: &InputEvent, now_ms: u64) {
        match *event {
            InputEvent::PointerMove { pos } => {
                if self.in_bowl(pos) && !self.is_finished(now_ms) {
                    let angle = self.angle_of(pos);
                    if !self.tracking {
                        self.tracking = true;
                    } else {
                        let contribution = angle_delta(self.last_angle, angle).abs() / TAU;
                        if contribution > NOISE_THRESHOLD {
                            self.apply_stir(contribution, now_ms);
                        }
                    }
                    self.last_angle = angle;
                } else {
                    self.tracking = false;
                }
            }
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            } => {
                if self.in_bowl(pos) && !self.is_finished(now_ms) {
                    self.tracking = true;
                    self.last_angle = self.angle_of(pos);
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                self.tracking = false;
            }
            InputEvent::KeyDown(Key::Space) => {
                self.apply_stir(KEY_STIR, now_ms);
            }
            _ => {}
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, now_ms: u64) {
        if let Some(bg) = self.tex_background {
            canvas.blit(bg, None, Rect::new(0.0, 0.0, self.logical.x, self.logical.y), 0.0, 1.0);
        }

        if let Some(tex) = self.tex_ingredient {
            canvas.blit(tex, None, self.ingredient_rect, 0.0, 1.0);
        }

        match self.tex_bowl {
            Some(tex) => canvas.blit(tex, None, self.bowl_rect.fit_aspect(tex.aspect()), 0.0, 1.0),
            None => canvas.stroke_rect(self.bowl_rect, colors::BOWL_OUTLINE),
        }

        let r = self.bowl_radius;
        canvas.stroke_rect(Rect::centered(self.bowl_center, r * 2.0, r * 2.0), colors::MIX_AREA);

        // Spoon points at the last sampled angle
        let spoon_end = self.bowl_center + Vec2::from_angle(self.last_angle) * r * 0.9;
        canvas.line(self.bowl_center, spoon_end, colors::SPOON);
        canvas.fill_rect(Rect::centered(spoon_end, 8.0, 8.0), colors::SPOON);

        draw_progress_bar(canvas, self.progress_bg, self.progress_ratio());

        let remaining_secs = SCORE_TIME_LIMIT_MS.saturating_sub(self.elapsed_ms(now_ms)) as f32 / 1000.0;
        let percent = (self.progress_ratio() * 100.0).round() as u32;
        let center_x = self.progress_bg.center().x;
        canvas.text(
            &format!("Mix progress: {}%", percent),
            FontSize::Regular,
            Vec2::new(center_x, self.progress_bg.y - 30.0),
            Align::Center,
            colors::BLACK,
        );
        canvas.text(
            &format!("Time left: {:.1}s", remaining_secs),
            FontSize::Regular,
            Vec2::new(center_x, self.progress_bg.bottom() + 6.0),
            Align::Center,
            colors::BLACK,
        );
        canvas.text(
            "Circle the bowl or press Spacebar to mix!",
            FontSize::Small,
            Vec2::new(self.bowl_rect.center().x, self.bowl_rect.bottom() + 10.0),
            Align::Center,
            colors::BLACK,
        );
    }

    fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn autopilot(&self, _now_ms: u64) -> Vec<InputEvent> {
        if self.is_complete() {
            return Vec::new();
        }
        let angle = self.last_angle + AUTOPILOT_STEP;
        let pos = self.bowl_center + Vec2::from_angle(angle) * self.bowl_radius * 0.6;
        vec![InputEvent::PointerMove { pos }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH, TICK_MS};
    use crate::render::{DrawList, NullAssets};
    use proptest::prelude::*;

    fn make_game(turns: f32, start_ms: u64) -> MixingGame {
        let mut assets = NullAssets;
        let mut ctx = GameContext::new(Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT), &mut assets, start_ms, 1);
        let step = CookingStep::new(Action::Mix, vec![Ingredient::new("Batter", 1, "Cup")], turns);
        MixingGame::new(&step, &mut ctx).unwrap()
    }

    /// Feed one clockwise revolution sampled in `steps` moves from `start`
    fn revolve(game: &mut MixingGame, start: f32, steps: u32, now: u64) {
        let center = game.bowl_center();
        let r = game.bowl_radius() * 0.5;
        for i in 0..=steps {
            let angle = start + TAU * i as f32 / steps as f32;
            let pos = center + Vec2::from_angle(angle) * r;
            game.handle_input(&InputEvent::PointerMove { pos }, now);
        }
    }

    #[test]
    fn test_full_revolution_counts_one_turn() {
        let mut game = make_game(5.0, 0);
        revolve(&mut game, 0.0, 64, 100);
        assert!((game.progress() - 1.0).abs() < 1e-3);
        assert!(game.is_tracking());
    }

    #[test]
    fn test_leaving_bowl_stops_tracking_but_keeps_progress() {
        let mut game = make_game(5.0, 0);
        revolve(&mut game, 1.0, 32, 100);
        let progress = game.progress();

        game.handle_input(&InputEvent::PointerMove { pos: Vec2::ZERO }, 200);
        assert!(!game.is_tracking());
        assert_eq!(game.progress(), progress);

        // Re-entering only re-arms tracking; the first sample adds nothing
        let pos = game.bowl_center() + Vec2::new(-30.0, 0.0);
        game.handle_input(&InputEvent::PointerMove { pos }, 300);
        assert!(game.is_tracking());
        assert_eq!(game.progress(), progress);
    }

    #[test]
    fn test_release_stops_tracking() {
        let mut game = make_game(5.0, 0);
        let pos = game.bowl_center() + Vec2::new(20.0, 0.0);
        game.handle_input(&InputEvent::primary_down(pos), 10);
        assert!(game.is_tracking());
        game.handle_input(&InputEvent::primary_up(pos), 20);
        assert!(!game.is_tracking());
    }

    #[test]
    fn test_space_stirs_and_clamps_to_target() {
        let mut game = make_game(0.5, 0);
        for _ in 0..2 {
            game.handle_input(&InputEvent::KeyDown(Key::Space), 1000);
        }
        assert!(!game.is_complete());
        game.handle_input(&InputEvent::KeyDown(Key::Space), 2000);
        assert_eq!(game.progress(), 0.5);
        assert!(game.is_complete());
        // 2s of 10s used
        assert_eq!(game.score(), 80);
    }

    #[test]
    fn test_score_frozen_after_completion() {
        let mut game = make_game(0.9, 0);
        revolve(&mut game, -2.0, 40, 2500);
        assert!(game.is_complete());
        assert_eq!(game.score(), 75);

        game.update(9000);
        game.handle_input(&InputEvent::KeyDown(Key::Space), 9500);
        revolve(&mut game, 0.0, 40, 9600);
        assert_eq!(game.score(), 75);
        assert!(game.is_complete());
    }

    #[test]
    fn test_time_limit_completes_with_zero_score() {
        let mut game = make_game(5.0, 1000);
        game.update(1000 + SCORE_TIME_LIMIT_MS - TICK_MS);
        assert!(!game.is_complete());
        game.update(1000 + SCORE_TIME_LIMIT_MS);
        assert!(game.is_complete());
        assert_eq!(game.score(), 0);
        assert!(game.progress() < 5.0);
    }

    #[test]
    fn test_render_labels() {
        let mut game = make_game(2.0, 0);
        game.handle_input(&InputEvent::KeyDown(Key::Space), 500);
        let mut list = DrawList::new();
        game.render(&mut list, 500);
        assert!(list.has_text("Mix progress: 10%"));
        assert!(list.has_text("Time left: 9.5s"));
    }

    proptest! {
        #[test]
        fn prop_revolution_from_any_start(start in -std::f32::consts::PI..std::f32::consts::PI, steps in 16u32..200) {
            let mut game = make_game(10.0, 0);
            revolve(&mut game, start, steps, 100);
            prop_assert!((game.progress() - 1.0).abs() < 1e-2);
        }
    }
}
