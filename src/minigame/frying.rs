//! Frying minigame
//!
//! A safe zone roams the pan, shrinking and speeding up over time, with a
//! small random wobble on its heading. The player keeps the pointer-driven
//! token inside it. Time inside builds progress; time outside bleeds it
//! away at half the rate.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{GameContext, Minigame};
use crate::error::GameResult;
use crate::geom::Rect;
use crate::input::InputEvent;
use crate::recipe::{Action, CookingStep, Ingredient};
use crate::render::{Align, Canvas, FontSize, Texture, colors, draw_progress_bar, draw_texture_or};

/// Safe zone edge length at the start
pub const SAFE_ZONE_START_SIZE: f32 = 120.0;
/// Safe zone edge length once fully shrunk
pub const SAFE_ZONE_MIN_SIZE: f32 = 50.0;
/// Seconds to shrink from start to minimum size
pub const SHRINK_DURATION_SECS: f32 = 20.0;

/// Starting speed (pixels per second)
pub const BASE_SPEED: f32 = 100.0;
/// Speed increase per second
pub const ACCELERATION: f32 = 10.0;
/// Maximum speed (pixels per second)
pub const MAX_SPEED: f32 = 300.0;
/// Max heading change per tick (radians)
pub const WOBBLE: f32 = 0.05;

/// Token edge length; must stay below the minimum safe zone size
pub const TOKEN_SIZE: f32 = 20.0;

const FIELD: Rect = Rect::new(200.0, 80.0, 400.0, 260.0);
const DIAL_X: Rect = Rect::new(50.0, 160.0, 100.0, 100.0);
const DIAL_Y: Rect = Rect::new(650.0, 160.0, 100.0, 100.0);
const PROGRESS_BG: Rect = Rect::new(150.0, 20.0, 500.0, 35.0);

pub struct FryingGame {
    ingredient: Ingredient,
    target_secs: f32,
    logical: Vec2,
    field: Rect,
    safe_zone: Rect,
    token: Rect,
    velocity: Vec2,
    speed: f32,
    /// Seconds per logic tick
    tick_dt: f32,
    start_ms: u64,
    progress_secs: f32,
    ticks_total: u32,
    ticks_inside: u32,
    /// Dial rotations in degrees, ±90
    dial_x_deg: f32,
    dial_y_deg: f32,
    rng: Pcg32,
    score: Option<u32>,
    tex_background: Option<Texture>,
    tex_ingredient: Option<Texture>,
    tex_dial: Option<Texture>,
}

impl FryingGame {
    pub fn new(step: &CookingStep, ctx: &mut GameContext) -> GameResult<Self> {
        let ingredient = step.primary_ingredient()?.clone();

        let tex_background = ctx.assets.load("sprites/frying_game/background_frying.png");
        let tex_dial = ctx.assets.load("sprites/frying_game/dial.png");
        let tex_ingredient = ctx.assets.load(&ingredient.sprite_path());

        let mut rng = Pcg32::seed_from_u64(ctx.seed);
        let heading = rng.random_range(0.0..std::f32::consts::TAU);

        let center = FIELD.center();
        Ok(Self {
            ingredient,
            target_secs: step.duration,
            logical: ctx.logical,
            field: FIELD,
            safe_zone: Rect::centered(center, SAFE_ZONE_START_SIZE, SAFE_ZONE_START_SIZE),
            token: Rect::centered(center, TOKEN_SIZE, TOKEN_SIZE),
            velocity: Vec2::from_angle(heading) * BASE_SPEED,
            speed: BASE_SPEED,
            tick_dt: ctx.tick_dt,
            start_ms: ctx.now_ms,
            progress_secs: 0.0,
            ticks_total: 0,
            ticks_inside: 0,
            dial_x_deg: 0.0,
            dial_y_deg: 0.0,
            rng,
            score: None,
            tex_background,
            tex_ingredient,
            tex_dial,
        })
    }

    pub fn safe_zone(&self) -> Rect {
        self.safe_zone
    }

    pub fn token(&self) -> Rect {
        self.token
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn progress_secs(&self) -> f32 {
        self.progress_secs
    }

    pub fn dial_angles(&self) -> (f32, f32) {
        (self.dial_x_deg, self.dial_y_deg)
    }

    /// Token wholly inside the safe zone
    pub fn in_safe_zone(&self) -> bool {
        self.safe_zone.contains_rect(&self.token)
    }

    /// Move, resize and bounce the safe zone for one tick
    fn update_safe_zone(&mut self, elapsed_secs: f32) {
        let shrink = (elapsed_secs / SHRINK_DURATION_SECS).clamp(0.0, 1.0);
        let size = SAFE_ZONE_START_SIZE + (SAFE_ZONE_MIN_SIZE - SAFE_ZONE_START_SIZE) * shrink;

        self.speed = (BASE_SPEED + ACCELERATION * elapsed_secs).min(MAX_SPEED);

        let wobble = self.rng.random_range(-WOBBLE..=WOBBLE);
        let heading = Vec2::from_angle(wobble).rotate(self.velocity).normalize_or_zero();
        let heading = if heading == Vec2::ZERO { Vec2::X } else { heading };
        self.velocity = heading * self.speed;

        let center = self.safe_zone.center() + self.velocity * self.tick_dt;
        let mut zone = Rect::centered(center, size, size);

        // Elastic bounce off the field edges
        if zone.x <= self.field.x {
            zone.x = self.field.x;
            self.velocity.x = self.velocity.x.abs();
        } else if zone.right() >= self.field.right() {
            zone.x = self.field.right() - zone.w;
            self.velocity.x = -self.velocity.x.abs();
        }
        if zone.y <= self.field.y {
            zone.y = self.field.y;
            self.velocity.y = self.velocity.y.abs();
        } else if zone.bottom() >= self.field.bottom() {
            zone.y = self.field.bottom() - zone.h;
            self.velocity.y = -self.velocity.y.abs();
        }

        self.safe_zone = zone;
    }

    fn update_progress(&mut self) {
        self.ticks_total += 1;
        if self.in_safe_zone() {
            self.ticks_inside += 1;
            self.progress_secs += self.tick_dt;
        } else {
            self.progress_secs = (self.progress_secs - self.tick_dt / 2.0).max(0.0);
        }
    }

    /// Dials tilt ±90° with the token's offset from the field center
    fn update_dials(&mut self) {
        let half = self.field.size() / 2.0;
        let offset = (self.token.center() - self.field.center()) / half;
        self.dial_x_deg = offset.x.clamp(-1.0, 1.0) * 90.0;
        self.dial_y_deg = offset.y.clamp(-1.0, 1.0) * 90.0;
    }
}

impl Minigame for FryingGame {
    fn action(&self) -> Action {
        Action::Fry
    }

    fn start(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
    }

    fn update(&mut self, now_ms: u64) {
        if self.score.is_some() {
            return;
        }

        let elapsed_secs = now_ms.saturating_sub(self.start_ms) as f32 / 1000.0;
        self.update_safe_zone(elapsed_secs);
        self.update_progress();
        self.update_dials();

        if self.progress_secs > self.target_secs {
            let ratio = self.ticks_inside as f32 / self.ticks_total.max(1) as f32;
            let score = (ratio * 100.0).round().clamp(0.0, 100.0) as u32;
            self.score = Some(score);
            log::info!(
                "Fried {} in {:.1}s (score {})",
                self.ingredient.name,
                elapsed_secs,
                score
            );
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _now_ms: u64) {
        if let InputEvent::PointerMove { pos } = *event {
            self.token = Rect::centered(pos, TOKEN_SIZE, TOKEN_SIZE).clamped_within(&self.field);
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, _now_ms: u64) {
        let screen = Rect::new(0.0, 0.0, self.logical.x, self.logical.y);
        draw_texture_or(canvas, self.tex_background, None, screen, colors::BACKGROUND);

        canvas.fill_rect(self.field, colors::FIELD);
        canvas.fill_rect(self.safe_zone, colors::SAFE_ZONE);
        canvas.stroke_rect(self.safe_zone, colors::WHITE);
        draw_texture_or(canvas, self.tex_ingredient, None, self.token, colors::TOKEN);

        for (rect, angle) in [(DIAL_X, self.dial_x_deg), (DIAL_Y, self.dial_y_deg)] {
            match self.tex_dial {
                Some(tex) => canvas.blit(tex, None, rect, angle, 1.0),
                None => {
                    canvas.fill_rect(rect, colors::DIAL);
                    let (sin, cos) = angle.to_radians().sin_cos();
                    let tip = rect.center() + Vec2::new(sin, -cos) * rect.w * 0.45;
                    canvas.line(rect.center(), tip, colors::WHITE);
                }
            }
        }

        let ratio = if self.target_secs > 0.0 {
            self.progress_secs / self.target_secs
        } else {
            1.0
        };
        draw_progress_bar(canvas, PROGRESS_BG, ratio);
        canvas.text(
            "Keep it in the hot spot!",
            FontSize::Small,
            Vec2::new(PROGRESS_BG.center().x, PROGRESS_BG.bottom() + 4.0),
            Align::Center,
            colors::WHITE,
        );
    }

    fn is_complete(&self) -> bool {
        self.score.is_some()
    }

    fn score(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn autopilot(&self, _now_ms: u64) -> Vec<InputEvent> {
        if self.is_complete() {
            return Vec::new();
        }
        vec![InputEvent::PointerMove {
            pos: self.safe_zone.center(),
        }]
    }
}
