//! Egg cracking minigame
//!
//! A marker sweeps once across a bar per egg. Pressing Space while it
//! overlaps one of the three sweet spots counts a hit. Each egg runs
//! Countdown -> Active -> EggResult, then either the next egg or Done.
//!
//! Normal mode plays a fixed number of eggs and scores the hit ratio.
//! Endless mode keeps going (faster each egg) until an egg misses a zone,
//! and scores the number of eggs survived.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{GameContext, Minigame};
use crate::geom::Rect;
use crate::input::{InputEvent, Key};
use crate::lerp_vec;
use crate::recipe::{Action, CookingStep};
use crate::render::{Align, Canvas, Color, FontSize, Texture, colors, draw_texture_or, fade};

/// Marker travel time across the bar for the first egg
pub const PASS_DURATION_MS: u64 = 3200;
/// Endless mode never sweeps faster than this
pub const MIN_PASS_DURATION_MS: u64 = 800;
/// Endless speed-up per survived egg, in percent of the previous pass
pub const SPEEDUP_PERCENT: u64 = 88;
pub const COUNTDOWN_MS: u64 = 1000;
pub const RESULT_MS: u64 = 900;
pub const PRESSES_PER_EGG: u32 = 3;
/// Egg count when the step duration is not positive
pub const DEFAULT_EGGS: u32 = 3;
/// Endless mode cap, never reached in practice
pub const ENDLESS_EGG_CAP: u32 = 9999;
/// Endless eggs the autopilot cracks before it lets one slip
pub const AUTOPILOT_ENDLESS_EGGS: u32 = 10;

/// Nominal zone centers as fractions of the bar
const ZONE_CENTERS: [f32; 3] = [0.2, 0.5, 0.8];
const ZONE_JITTER: f32 = 0.08;
const ZONE_WIDTH_FRAC: f32 = 0.10;
const FEEDBACK_MS: u64 = 400;

const CRACK_DOWN_MS: u64 = 90;
const CRACK_IMPACT_MS: u64 = 90;
const CRACK_UP_MS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggMode {
    Normal,
    Endless,
}

/// Per-egg state machine; the timestamp is when the phase began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggPhase {
    Countdown { since: u64 },
    Active { since: u64 },
    EggResult { since: u64 },
    Done,
}

/// Hand animation played on every press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrackAnim {
    Idle,
    CrackDown { since: u64 },
    Impact { since: u64 },
    CrackUp { since: u64 },
}

#[derive(Debug, Clone, Copy)]
struct HitFeedback {
    rect: Rect,
    color: Color,
    spawned_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Zone {
    rect: Rect,
    hit: bool,
}

/// Result message for a number of hits on one egg
pub fn tier_message(hits: u32) -> &'static str {
    match hits {
        0 => "You got shell everywhere!",
        1 => "You're messy...",
        2 => "Almost EGGcelent!",
        _ => "PERFECT CRACK!",
    }
}

/// Pass duration for the next Endless egg
pub fn next_pass_duration(current_ms: u64) -> u64 {
    (current_ms * SPEEDUP_PERCENT / 100).max(MIN_PASS_DURATION_MS)
}

pub struct EggCrackingGame {
    mode: EggMode,
    total_eggs: u32,
    current_egg: u32,
    pass_duration_ms: u64,
    logical: Vec2,
    bar: Rect,
    marker: Rect,
    bowl: Rect,
    hand_idle: Rect,
    hand_crack: Rect,
    zones: Vec<Zone>,
    presses_this_egg: u32,
    hits_this_egg: u32,
    total_hits: u32,
    egg_failed: bool,
    phase: EggPhase,
    anim: CrackAnim,
    feedbacks: Vec<HitFeedback>,
    rng: Pcg32,
    final_score: u32,
    tex_background: Option<Texture>,
    tex_bowl: Option<Texture>,
    tex_hand_idle: Option<Texture>,
    tex_hand_crack: Option<Texture>,
    tex_results: [Option<Texture>; 4],
}

impl EggCrackingGame {
    pub fn new(step: &CookingStep, ctx: &mut GameContext, mode: EggMode) -> Self {
        let total_eggs = match mode {
            EggMode::Normal => {
                let eggs = step.duration.round();
                if eggs >= 1.0 { eggs as u32 } else { DEFAULT_EGGS }
            }
            EggMode::Endless => ENDLESS_EGG_CAP,
        };

        let (w, h) = (ctx.logical.x, ctx.logical.y);
        let bar_w = w * 0.7;
        let bar = Rect::new((w - bar_w) / 2.0, h * 0.8, bar_w, 18.0);
        let marker = Rect::new(bar.x, bar.y - 4.0, 10.0, bar.h + 8.0);

        let bowl_w = w * 0.4;
        let bowl = Rect::new((w - bowl_w) / 2.0, h * 0.35, bowl_w, bowl_w * 0.6);
        let hand_w = bowl_w * 0.9;
        let hand_h = hand_w * 0.7;
        let hand_idle = Rect::new(bowl.x + bowl.w * 0.05, bowl.y - hand_h - 10.0, hand_w, hand_h);
        let hand_crack = Rect::new(hand_idle.x, bowl.y - hand_h * 0.45, hand_w, hand_h);

        let tex_results = [0, 1, 2, 3].map(|i| ctx.assets.load(&format!("sprites/egg_game/egg_result_{}.png", i)));

        log::debug!("Egg cracking ({:?}) with {} eggs", mode, total_eggs);

        Self {
            mode,
            total_eggs,
            current_egg: 0,
            pass_duration_ms: PASS_DURATION_MS,
            logical: ctx.logical,
            bar,
            marker,
            bowl,
            hand_idle,
            hand_crack,
            zones: Vec::with_capacity(ZONE_CENTERS.len()),
            presses_this_egg: 0,
            hits_this_egg: 0,
            total_hits: 0,
            egg_failed: false,
            phase: EggPhase::Countdown { since: ctx.now_ms },
            anim: CrackAnim::Idle,
            feedbacks: Vec::new(),
            rng: Pcg32::seed_from_u64(ctx.seed),
            final_score: 0,
            tex_background: ctx.assets.load("sprites/egg_game/bg_kitchen.png"),
            tex_bowl: ctx.assets.load("sprites/egg_game/bowl.png"),
            tex_hand_idle: ctx.assets.load("sprites/egg_game/hand_idle.png"),
            tex_hand_crack: ctx.assets.load("sprites/egg_game/hand_crack.png"),
            tex_results,
        }
    }

    pub fn mode(&self) -> EggMode {
        self.mode
    }

    pub fn phase(&self) -> EggPhase {
        self.phase
    }

    pub fn total_eggs(&self) -> u32 {
        self.total_eggs
    }

    /// Index of the egg in play; in Endless mode also the eggs survived
    pub fn current_egg(&self) -> u32 {
        self.current_egg
    }

    pub fn pass_duration_ms(&self) -> u64 {
        self.pass_duration_ms
    }

    pub fn hits_this_egg(&self) -> u32 {
        self.hits_this_egg
    }

    pub fn total_hits(&self) -> u32 {
        self.total_hits
    }

    pub fn bar(&self) -> Rect {
        self.bar
    }

    pub fn zone_rects(&self) -> Vec<Rect> {
        self.zones.iter().map(|z| z.rect).collect()
    }

    /// Marker rectangle as of `now_ms`
    pub fn marker_at(&self, now_ms: u64) -> Rect {
        match self.phase {
            EggPhase::Active { since } => {
                let elapsed = now_ms.saturating_sub(since) as f32;
                let t = (elapsed / self.pass_duration_ms as f32).min(1.0);
                Rect {
                    x: self.bar.x + t * (self.bar.w - self.marker.w),
                    ..self.marker
                }
            }
            _ => self.marker,
        }
    }

    fn generate_zones(&mut self) {
        let zone_w = self.bar.w * ZONE_WIDTH_FRAC;
        self.zones.clear();
        for center in ZONE_CENTERS {
            let c = (center + self.rng.random_range(-ZONE_JITTER..ZONE_JITTER)).clamp(0.05, 0.95);
            let center_x = self.bar.x + c * self.bar.w;
            self.zones.push(Zone {
                rect: Rect::new(center_x - zone_w / 2.0, self.bar.y - 2.0, zone_w, self.bar.h + 4.0),
                hit: false,
            });
        }
        self.presses_this_egg = 0;
        self.hits_this_egg = 0;
        self.egg_failed = false;
    }

    fn start_egg(&mut self, now_ms: u64) {
        self.generate_zones();
        self.marker.x = self.bar.x;
        self.phase = EggPhase::Active { since: now_ms };
        self.anim = CrackAnim::Idle;
    }

    fn finish_egg(&mut self, now_ms: u64) {
        self.total_hits += self.hits_this_egg;
        self.egg_failed = self.mode == EggMode::Endless && self.hits_this_egg < self.zones.len() as u32;
        self.phase = EggPhase::EggResult { since: now_ms };
    }

    /// Leave the result overlay: next egg or done
    fn next_egg(&mut self, now_ms: u64) {
        if !self.egg_failed {
            self.current_egg += 1;
        }
        if self.egg_failed || self.current_egg >= self.total_eggs {
            self.finish();
            return;
        }
        if self.mode == EggMode::Endless {
            self.pass_duration_ms = next_pass_duration(self.pass_duration_ms);
        }
        self.phase = EggPhase::Countdown { since: now_ms };
        self.anim = CrackAnim::Idle;
    }

    fn finish(&mut self) {
        self.phase = EggPhase::Done;
        self.final_score = match self.mode {
            EggMode::Normal => {
                let max_hits = (self.total_eggs * PRESSES_PER_EGG) as f32;
                let ratio = if max_hits > 0.0 { self.total_hits as f32 / max_hits } else { 0.0 };
                (100.0 * ratio).round().clamp(0.0, 100.0) as u32
            }
            EggMode::Endless => self.current_egg,
        };
        log::info!(
            "Egg cracking ({:?}) finished: {} hits over {} eggs, score {}",
            self.mode,
            self.total_hits,
            self.current_egg,
            self.final_score
        );
    }

    fn press(&mut self, now_ms: u64) {
        if self.presses_this_egg >= PRESSES_PER_EGG {
            return;
        }
        self.presses_this_egg += 1;
        self.marker = self.marker_at(now_ms);

        let marker = self.marker;
        let hit = match self.zones.iter_mut().find(|z| !z.hit && z.rect.overlaps_x(&marker)) {
            Some(zone) => {
                zone.hit = true;
                self.hits_this_egg += 1;
                true
            }
            None => false,
        };

        let fb_w = marker.w * 1.2;
        self.feedbacks.push(HitFeedback {
            rect: Rect::new(marker.center().x - fb_w / 2.0, self.bar.y - 4.0, fb_w, self.bar.h + 8.0),
            color: if hit { colors::FEEDBACK_HIT } else { colors::FEEDBACK_MISS },
            spawned_ms: now_ms,
        });
        self.anim = CrackAnim::CrackDown { since: now_ms };

        if self.hits_this_egg >= self.zones.len() as u32 || self.presses_this_egg >= PRESSES_PER_EGG {
            self.finish_egg(now_ms);
        }
    }

    fn update_anim(&mut self, now_ms: u64) {
        self.anim = match self.anim {
            CrackAnim::CrackDown { since } if now_ms.saturating_sub(since) >= CRACK_DOWN_MS => CrackAnim::Impact { since: now_ms },
            CrackAnim::Impact { since } if now_ms.saturating_sub(since) >= CRACK_IMPACT_MS => CrackAnim::CrackUp { since: now_ms },
            CrackAnim::CrackUp { since } if now_ms.saturating_sub(since) >= CRACK_UP_MS => CrackAnim::Idle,
            other => other,
        };
    }

    fn hand_rect(&self, now_ms: u64) -> Rect {
        let lerp = |from: Rect, to: Rect, t: f32| {
            let pos = lerp_vec(Vec2::new(from.x, from.y), Vec2::new(to.x, to.y), t.min(1.0));
            Rect { x: pos.x, y: pos.y, ..from }
        };
        match self.anim {
            CrackAnim::Idle => self.hand_idle,
            CrackAnim::CrackDown { since } => lerp(
                self.hand_idle,
                self.hand_crack,
                now_ms.saturating_sub(since) as f32 / CRACK_DOWN_MS as f32,
            ),
            CrackAnim::Impact { .. } => self.hand_crack,
            CrackAnim::CrackUp { since } => lerp(
                self.hand_crack,
                self.hand_idle,
                now_ms.saturating_sub(since) as f32 / CRACK_UP_MS as f32,
            ),
        }
    }

    fn render_result_overlay(&self, canvas: &mut dyn Canvas, since: u64, now_ms: u64) {
        let t = (now_ms.saturating_sub(since) as f32 / RESULT_MS as f32).min(1.0);
        let full = Rect::new(0.0, 0.0, self.logical.x, self.logical.y);
        canvas.fill_rect(full, fade(colors::DIM, (t * 240.0).min(200.0) / 255.0));

        let tier = self.hits_this_egg.min(3) as usize;
        // Zoom 0.6 -> 1.1 -> 1.0
        let scale = if t < 0.5 {
            0.6 + (t / 0.5) * 0.5
        } else {
            1.1 - ((t - 0.5) / 0.5) * 0.1
        };
        let size = self.logical * 0.35 * scale;
        let egg_rect = Rect::centered(Vec2::new(self.logical.x * 0.5, self.logical.y * 0.55), size.x, size.y);
        draw_texture_or(canvas, self.tex_results[tier], None, egg_rect, colors::EGG_TIERS[tier]);

        canvas.text(
            tier_message(self.hits_this_egg),
            FontSize::Regular,
            Vec2::new(self.logical.x * 0.5, egg_rect.y - 40.0),
            Align::Center,
            colors::WHITE,
        );
    }

    fn centered_text(&self, canvas: &mut dyn Canvas, text: &str, y_frac: f32, color: Color) {
        canvas.text(
            text,
            FontSize::Regular,
            Vec2::new(self.logical.x * 0.5, self.logical.y * y_frac),
            Align::Center,
            color,
        );
    }
}

impl Minigame for EggCrackingGame {
    fn action(&self) -> Action {
        match self.mode {
            EggMode::Normal => Action::Egg,
            EggMode::Endless => Action::EggEndless,
        }
    }

    fn start(&mut self, now_ms: u64) {
        if let EggPhase::Countdown { .. } = self.phase {
            self.phase = EggPhase::Countdown { since: now_ms };
        }
    }

    fn update(&mut self, now_ms: u64) {
        self.feedbacks.retain(|fb| now_ms.saturating_sub(fb.spawned_ms) < FEEDBACK_MS);

        match self.phase {
            EggPhase::Countdown { since } => {
                if now_ms.saturating_sub(since) >= COUNTDOWN_MS {
                    self.start_egg(now_ms);
                }
            }
            EggPhase::Active { since } => {
                self.marker = self.marker_at(now_ms);
                self.update_anim(now_ms);
                if now_ms.saturating_sub(since) >= self.pass_duration_ms {
                    self.finish_egg(now_ms);
                }
            }
            EggPhase::EggResult { since } => {
                self.update_anim(now_ms);
                if now_ms.saturating_sub(since) >= RESULT_MS {
                    self.next_egg(now_ms);
                }
            }
            EggPhase::Done => {}
        }
    }

    fn handle_input(&mut self, event: &InputEvent, now_ms: u64) {
        if let (EggPhase::Active { .. }, InputEvent::KeyDown(Key::Space)) = (self.phase, event) {
            self.press(now_ms);
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, now_ms: u64) {
        let full = Rect::new(0.0, 0.0, self.logical.x, self.logical.y);
        draw_texture_or(canvas, self.tex_background, None, full, colors::BACKGROUND);
        draw_texture_or(canvas, self.tex_bowl, None, self.bowl, colors::EGG_BOWL);

        let hand_tex = match self.anim {
            CrackAnim::Idle => self.tex_hand_idle,
            _ => self.tex_hand_crack.or(self.tex_hand_idle),
        };
        draw_texture_or(canvas, hand_tex, None, self.hand_rect(now_ms), colors::HAND);

        canvas.fill_rect(self.bar, colors::BAR_FILL);
        canvas.stroke_rect(self.bar, colors::BAR_OUTLINE);

        for zone in &self.zones {
            let color = if zone.hit { colors::ZONE_HIT } else { colors::ZONE_IDLE };
            canvas.fill_rect(zone.rect, color);
            canvas.stroke_rect(zone.rect, colors::BAR_OUTLINE);
        }

        for fb in &self.feedbacks {
            let age = now_ms.saturating_sub(fb.spawned_ms);
            if age >= FEEDBACK_MS {
                continue;
            }
            let remaining = 1.0 - age as f32 / FEEDBACK_MS as f32;
            canvas.fill_rect(fb.rect, fade(fb.color, remaining));
            canvas.stroke_rect(fb.rect, fade(colors::BAR_OUTLINE, remaining));
        }

        canvas.fill_rect(self.marker_at(now_ms), colors::MARKER);

        let (banner, info) = match self.mode {
            EggMode::Normal => (
                format!("EGG {} / {}", (self.current_egg + 1).min(self.total_eggs), self.total_eggs),
                "Press SPACE to crack!",
            ),
            EggMode::Endless => (
                format!("EGGS CRACKED: {}", self.current_egg),
                "Press SPACE to crack! Don't miss!",
            ),
        };
        self.centered_text(canvas, &banner, 0.10, colors::WHITE);
        self.centered_text(canvas, info, 0.16, colors::TEXT_GHOST);

        match self.phase {
            EggPhase::Countdown { since } => {
                let remaining = COUNTDOWN_MS.saturating_sub(now_ms.saturating_sub(since));
                let text = match remaining.div_ceil(1000) {
                    0 => "Go!".to_string(),
                    secs => format!("Ready? {}", secs),
                };
                self.centered_text(canvas, &text, 0.30, colors::TEXT_YELLOW);
            }
            EggPhase::EggResult { since } => self.render_result_overlay(canvas, since, now_ms),
            EggPhase::Done => {
                let text = match self.mode {
                    EggMode::Normal => format!("All eggs cracked! Score: {}/100", self.final_score),
                    EggMode::Endless => format!("Game over! Eggs cracked: {}", self.final_score),
                };
                self.centered_text(canvas, &text, 0.32, colors::TEXT_GOLD);
            }
            EggPhase::Active { .. } => {}
        }
    }

    fn is_complete(&self) -> bool {
        self.phase == EggPhase::Done
    }

    fn score(&self) -> u32 {
        self.final_score
    }

    fn autopilot(&self, now_ms: u64) -> Vec<InputEvent> {
        if !matches!(self.phase, EggPhase::Active { .. }) {
            return Vec::new();
        }
        if self.mode == EggMode::Endless && self.current_egg >= AUTOPILOT_ENDLESS_EGGS {
            return Vec::new();
        }
        let marker = self.marker_at(now_ms);
        if self.zones.iter().any(|z| !z.hit && z.rect.contains_span_x(&marker)) {
            vec![InputEvent::KeyDown(Key::Space)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH, TICK_MS};
    use crate::recipe::Ingredient;
    use crate::render::{DrawList, NullAssets};

    fn make_game(mode: EggMode, eggs: f32, seed: u64) -> EggCrackingGame {
        let mut assets = NullAssets;
        let mut ctx = GameContext::new(Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT), &mut assets, 0, seed);
        let step = CookingStep::new(Action::Egg, vec![Ingredient::new("Egg", 3, "Whole")], eggs);
        EggCrackingGame::new(&step, &mut ctx, mode)
    }

    /// Run the countdown out; returns the time the pass started
    fn start_pass(game: &mut EggCrackingGame) -> u64 {
        let since = match game.phase() {
            EggPhase::Countdown { since } => since,
            other => panic!("expected countdown, got {:?}", other),
        };
        game.update(since + COUNTDOWN_MS);
        since + COUNTDOWN_MS
    }

    /// Time at which the marker is centered on `zone`
    fn centered_press_time(game: &EggCrackingGame, pass_start: u64, zone: Rect) -> u64 {
        let bar = game.bar();
        let t = (zone.center().x - 5.0 - bar.x) / (bar.w - 10.0);
        pass_start + (t * game.pass_duration_ms() as f32).round() as u64
    }

    /// Hit every zone of the current egg; returns the time of the last press
    fn crack_perfectly(game: &mut EggCrackingGame) -> u64 {
        let start = start_pass(game);
        let mut last = start;
        for zone in game.zone_rects() {
            last = centered_press_time(game, start, zone);
            game.update(last);
            game.handle_input(&InputEvent::KeyDown(Key::Space), last);
        }
        last
    }

    #[test]
    fn test_egg_count_from_duration() {
        assert_eq!(make_game(EggMode::Normal, 0.0, 1).total_eggs(), DEFAULT_EGGS);
        assert_eq!(make_game(EggMode::Normal, -2.0, 1).total_eggs(), DEFAULT_EGGS);
        assert_eq!(make_game(EggMode::Normal, 5.0, 1).total_eggs(), 5);
        assert_eq!(make_game(EggMode::Normal, 2.6, 1).total_eggs(), 3);
        assert_eq!(make_game(EggMode::Endless, 2.0, 1).total_eggs(), ENDLESS_EGG_CAP);
    }

    #[test]
    fn test_zones_within_bar_and_ordered() {
        for seed in 0..50 {
            let mut game = make_game(EggMode::Normal, 3.0, seed);
            start_pass(&mut game);
            let bar = game.bar();
            let zones = game.zone_rects();
            assert_eq!(zones.len(), 3);
            for pair in zones.windows(2) {
                assert!(pair[0].right() < pair[1].x);
            }
            for z in zones {
                assert!(z.center().x >= bar.x + bar.w * 0.05 - 1e-3);
                assert!(z.center().x <= bar.x + bar.w * 0.95 + 1e-3);
                assert!((z.w - bar.w * ZONE_WIDTH_FRAC).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_full_overlap_press_hits() {
        let mut game = make_game(EggMode::Normal, 3.0, 7);
        let start = start_pass(&mut game);
        let zone = game.zone_rects()[1];
        let t = centered_press_time(&game, start, zone);
        assert!(zone.contains_span_x(&game.marker_at(t)));
        game.handle_input(&InputEvent::KeyDown(Key::Space), t);
        assert_eq!(game.hits_this_egg(), 1);
    }

    #[test]
    fn test_zero_overlap_press_misses() {
        let mut game = make_game(EggMode::Normal, 3.0, 7);
        let start = start_pass(&mut game);
        // Marker is still parked at the left end of the bar
        assert!(game.zone_rects().iter().all(|z| !z.overlaps_x(&game.marker_at(start))));
        game.handle_input(&InputEvent::KeyDown(Key::Space), start);
        assert_eq!(game.hits_this_egg(), 0);
    }

    #[test]
    fn test_touching_edge_is_not_a_hit() {
        let marker = Rect::new(90.0, 0.0, 10.0, 10.0);
        let zone = Rect::new(100.0, 0.0, 56.0, 10.0);
        assert!(!zone.overlaps_x(&marker));
    }

    #[test]
    fn test_press_ignored_outside_active() {
        let mut game = make_game(EggMode::Normal, 3.0, 1);
        game.handle_input(&InputEvent::KeyDown(Key::Space), 10);
        assert_eq!(game.phase(), EggPhase::Countdown { since: 0 });
        assert_eq!(game.total_hits(), 0);
    }

    #[test]
    fn test_press_limit_ends_egg_early() {
        let mut game = make_game(EggMode::Normal, 3.0, 2);
        let start = start_pass(&mut game);
        for i in 0..PRESSES_PER_EGG as u64 {
            game.handle_input(&InputEvent::KeyDown(Key::Space), start + i);
        }
        assert_eq!(game.phase(), EggPhase::EggResult { since: start + 2 });
        assert_eq!(game.hits_this_egg(), 0);
    }

    #[test]
    fn test_normal_all_hits_scores_100() {
        let mut game = make_game(EggMode::Normal, 3.0, 11);
        for egg in 0..3 {
            let last = crack_perfectly(&mut game);
            assert_eq!(game.hits_this_egg(), 3, "egg {}", egg);
            assert!(matches!(game.phase(), EggPhase::EggResult { .. }));
            game.update(last + RESULT_MS);
        }
        assert!(game.is_complete());
        assert_eq!(game.total_hits(), 9);
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_normal_zero_hits_scores_0() {
        let mut game = make_game(EggMode::Normal, 3.0, 11);
        for _ in 0..3 {
            let start = start_pass(&mut game);
            game.update(start + PASS_DURATION_MS);
            game.update(start + PASS_DURATION_MS + RESULT_MS);
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_endless_miss_ends_run() {
        let mut game = make_game(EggMode::Endless, 0.0, 5);
        let last = crack_perfectly(&mut game);
        game.update(last + RESULT_MS);
        assert_eq!(game.current_egg(), 1);
        assert_eq!(game.pass_duration_ms(), 2816);

        // Second egg: only one press lands, the pass runs out
        let start = start_pass(&mut game);
        let zone = game.zone_rects()[0];
        let t = centered_press_time(&game, start, zone);
        game.handle_input(&InputEvent::KeyDown(Key::Space), t);
        game.update(start + game.pass_duration_ms());
        assert!(matches!(game.phase(), EggPhase::EggResult { .. }));
        assert!(!game.is_complete());

        game.update(start + game.pass_duration_ms() + RESULT_MS);
        assert!(game.is_complete());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_pass_duration_clamps_at_minimum() {
        let mut ms = PASS_DURATION_MS;
        for _ in 0..30 {
            ms = next_pass_duration(ms);
            assert!(ms >= MIN_PASS_DURATION_MS);
        }
        assert_eq!(ms, MIN_PASS_DURATION_MS);
    }

    #[test]
    fn test_tier_messages() {
        assert_eq!(tier_message(0), "You got shell everywhere!");
        assert_eq!(tier_message(3), "PERFECT CRACK!");
    }

    #[test]
    fn test_render_countdown_and_banner() {
        let game = make_game(EggMode::Normal, 3.0, 1);
        let mut list = DrawList::new();
        game.render(&mut list, 200);
        assert!(list.has_text("EGG 1 / 3"));
        assert!(list.has_text("Ready? 1"));

        let endless = make_game(EggMode::Endless, 0.0, 1);
        list.clear();
        endless.render(&mut list, 0);
        assert!(list.has_text("EGGS CRACKED: 0"));
    }

    #[test]
    fn test_render_result_and_done() {
        let mut game = make_game(EggMode::Normal, 1.0, 3);
        let last = crack_perfectly(&mut game);
        let mut list = DrawList::new();
        game.render(&mut list, last + 100);
        assert!(list.has_text("PERFECT CRACK!"));

        game.update(last + RESULT_MS);
        list.clear();
        game.render(&mut list, last + RESULT_MS);
        assert!(list.has_text("All eggs cracked! Score: 100/100"));
    }

    #[test]
    fn test_autopilot_cracks_every_egg() {
        let mut game = make_game(EggMode::Normal, 3.0, 42);
        let mut now = 0;
        while !game.is_complete() && now < 60_000 {
            now += TICK_MS;
            game.update(now);
            for event in game.autopilot(now) {
                game.handle_input(&event, now);
            }
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_autopilot_endless_run_ends() {
        let mut game = make_game(EggMode::Endless, 0.0, 42);
        let mut now = 0;
        while !game.is_complete() && now < 200_000 {
            now += TICK_MS;
            game.update(now);
            for event in game.autopilot(now) {
                game.handle_input(&event, now);
            }
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), AUTOPILOT_ENDLESS_EGGS);
        assert_eq!(game.total_hits(), AUTOPILOT_ENDLESS_EGGS * PRESSES_PER_EGG);
    }

    #[test]
    fn test_same_seed_same_zones() {
        let mut a = make_game(EggMode::Normal, 3.0, 9);
        let mut b = make_game(EggMode::Normal, 3.0, 9);
        start_pass(&mut a);
        start_pass(&mut b);
        assert_eq!(a.zone_rects(), b.zone_rects());
    }
}
