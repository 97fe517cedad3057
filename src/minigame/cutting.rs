//! Cutting minigame
//!
//! The pointer drives a vertical knife line. Each click splits the fragment
//! under the knife in two; fragments are then re-packed left to right,
//! centered, with a small gap. Done once the required number of cuts is made.

use glam::Vec2;

use super::{GameContext, Minigame};
use crate::error::GameResult;
use crate::geom::Rect;
use crate::input::{InputEvent, PointerButton};
use crate::recipe::{Action, CookingStep, Ingredient};
use crate::render::{Align, Canvas, FontSize, Texture, colors, draw_progress_bar, draw_texture_or};

/// Cut attempts are ignored this long after a split
pub const COOLDOWN_MS: u64 = 100;
/// Gap left between fragments after re-packing
pub const CUT_GAP: f32 = 3.0;

const KNIFE_WIDTH: f32 = 5.0;
const KNIFE_HEIGHT: f32 = 250.0;
const KNIFE_Y: f32 = 80.0;
const INGREDIENT_RECT: Rect = Rect::new(200.0, 100.0, 400.0, 200.0);
const PROGRESS_BG: Rect = Rect::new(95.0, 345.0, 610.0, 35.0);

/// One slice of the ingredient: where it is drawn and which part of the
/// texture it samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub dst: Rect,
    pub src: Rect,
}

pub struct CuttingGame {
    ingredient: Ingredient,
    required_cuts: f32,
    logical: Vec2,
    knife: Rect,
    fragments: Vec<Fragment>,
    cuts_made: u32,
    clicked: bool,
    cooldown_start: Option<u64>,
    tex_background: Option<Texture>,
    tex_knife: Option<Texture>,
    tex_ingredient: Option<Texture>,
}

impl CuttingGame {
    pub fn new(step: &CookingStep, ctx: &mut GameContext) -> GameResult<Self> {
        let ingredient = step.primary_ingredient()?.clone();

        let tex_background = ctx.assets.load("sprites/cutting_game/background.png");
        let tex_knife = ctx.assets.load("sprites/cutting_game/dotted.png");
        let tex_ingredient = ctx.assets.load(&ingredient.sprite_path());

        // Without a texture the source rect mirrors the display size
        let src = match tex_ingredient {
            Some(tex) => Rect::new(0.0, 0.0, tex.width, tex.height),
            None => Rect::new(0.0, 0.0, INGREDIENT_RECT.w, INGREDIENT_RECT.h),
        };

        Ok(Self {
            ingredient,
            required_cuts: step.duration,
            logical: ctx.logical,
            knife: Rect::new(400.0, KNIFE_Y, KNIFE_WIDTH, KNIFE_HEIGHT),
            fragments: vec![Fragment {
                dst: INGREDIENT_RECT,
                src,
            }],
            cuts_made: 0,
            clicked: false,
            cooldown_start: None,
            tex_background,
            tex_knife,
            tex_ingredient,
        })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn cuts_made(&self) -> u32 {
        self.cuts_made
    }

    pub fn knife(&self) -> Rect {
        self.knife
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown_start.is_some()
    }

    /// Fraction of required cuts made
    pub fn progress(&self) -> f32 {
        if self.required_cuts <= 0.0 {
            1.0
        } else {
            (self.cuts_made as f32 / self.required_cuts).min(1.0)
        }
    }

    /// Split the fragment under the knife. Returns true if a cut was made.
    fn try_cut(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        let Some(index) = self
            .fragments
            .iter()
            .position(|f| f.dst.contains_span_x(&self.knife))
        else {
            return false;
        };

        let frag = self.fragments[index];
        let cut_x = self.knife.center().x;
        let ratio = (cut_x - frag.dst.x) / frag.dst.w;

        let (left_dst, right_dst) = frag.dst.split_x(ratio);
        let (left_src, right_src) = frag.src.split_x(ratio);

        self.fragments[index] = Fragment {
            dst: left_dst,
            src: left_src,
        };
        self.fragments.insert(
            index + 1,
            Fragment {
                dst: right_dst,
                src: right_src,
            },
        );

        self.pack_fragments();
        self.cuts_made += 1;
        log::debug!(
            "Cut {} at x={:.1} ({} / {})",
            self.ingredient.name,
            cut_x,
            self.cuts_made,
            self.required_cuts
        );
        true
    }

    /// Re-space fragments left to right, centered, `CUT_GAP` apart.
    /// Only display rects move; texture source rects stay put.
    fn pack_fragments(&mut self) {
        if self.fragments.is_empty() {
            return;
        }
        let total_width: f32 = self.fragments.iter().map(|f| f.dst.w).sum();
        let gaps = (self.fragments.len() - 1) as f32 * CUT_GAP;
        let mut x = (self.logical.x - (total_width + gaps)) / 2.0;
        for frag in &mut self.fragments {
            frag.dst.x = x;
            x += frag.dst.w + CUT_GAP;
        }
    }
}

impl Minigame for CuttingGame {
    fn action(&self) -> Action {
        Action::Cut
    }

    fn update(&mut self, now_ms: u64) {
        if self.clicked && !self.on_cooldown() {
            self.clicked = false;
            if self.try_cut() {
                self.cooldown_start = Some(now_ms);
            }
        }

        if let Some(start) = self.cooldown_start {
            if now_ms.saturating_sub(start) >= COOLDOWN_MS {
                self.cooldown_start = None;
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _now_ms: u64) {
        match *event {
            InputEvent::PointerMove { pos } => {
                self.knife.x = pos.x - self.knife.w / 2.0;
            }
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            } if !self.on_cooldown() => {
                self.clicked = true;
            }
            InputEvent::PointerUp { .. } => {
                self.clicked = false;
            }
            _ => {}
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, _now_ms: u64) {
        if let Some(bg) = self.tex_background {
            canvas.blit(bg, None, Rect::new(0.0, 0.0, self.logical.x, self.logical.y), 0.0, 1.0);
        }

        for frag in &self.fragments {
            draw_texture_or(canvas, self.tex_ingredient, Some(frag.src), frag.dst, colors::PLACEHOLDER);
        }

        draw_texture_or(canvas, self.tex_knife, None, self.knife, colors::KNIFE);

        draw_progress_bar(canvas, PROGRESS_BG, self.progress());

        let remaining = (self.required_cuts - self.cuts_made as f32).max(0.0) as i32;
        canvas.text(
            &format!("Cuts Remaining: {}", remaining),
            FontSize::Regular,
            Vec2::new(PROGRESS_BG.center().x, PROGRESS_BG.y + 3.0),
            Align::Center,
            colors::BLACK,
        );
    }

    fn is_complete(&self) -> bool {
        self.cuts_made as f32 >= self.required_cuts
    }

    fn autopilot(&self, _now_ms: u64) -> Vec<InputEvent> {
        if self.is_complete() || self.on_cooldown() || self.clicked {
            return Vec::new();
        }
        // Aim at the middle of the widest fragment
        let Some(target) = self
            .fragments
            .iter()
            .max_by(|a, b| a.dst.w.total_cmp(&b.dst.w))
            .map(|f| f.dst.center())
        else {
            return Vec::new();
        };
        vec![
            InputEvent::PointerMove { pos: target },
            InputEvent::primary_down(target),
        ]
    }
}
