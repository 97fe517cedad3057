//! Drawing surface and asset seams
//!
//! Components issue draw calls against a caller-provided `Canvas`; nothing
//! here owns a window or GPU surface. Missing textures degrade to solid
//! rectangles and never affect gameplay.

use std::collections::HashMap;

use glam::Vec2;

use crate::geom::Rect;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Build a color from 8-bit channels
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Same color with alpha scaled by `factor`
pub fn fade(color: Color, factor: f32) -> Color {
    [color[0], color[1], color[2], color[3] * factor.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgba};

    pub const WHITE: Color = rgba(255, 255, 255, 255);
    pub const BLACK: Color = rgba(0, 0, 0, 255);
    pub const BACKGROUND: Color = rgba(40, 25, 50, 255);
    pub const PROGRESS_BG: Color = rgba(255, 255, 255, 255);
    pub const PROGRESS_FILL: Color = rgba(130, 170, 255, 255);
    pub const PLACEHOLDER: Color = rgba(200, 120, 60, 255);
    pub const KNIFE: Color = rgba(40, 40, 40, 255);
    pub const SAFE_ZONE: Color = rgba(120, 220, 120, 140);
    pub const TOKEN: Color = rgba(230, 120, 40, 255);
    pub const FIELD: Color = rgba(60, 40, 30, 255);
    pub const DIAL: Color = rgba(90, 90, 100, 255);
    pub const BOWL_OUTLINE: Color = rgba(200, 220, 255, 255);
    pub const MIX_AREA: Color = rgba(90, 140, 200, 80);
    pub const SPOON: Color = rgba(200, 180, 140, 255);
    pub const BAR_FILL: Color = rgba(20, 20, 40, 200);
    pub const BAR_OUTLINE: Color = rgba(220, 220, 240, 255);
    pub const ZONE_IDLE: Color = rgba(100, 255, 220, 130);
    pub const ZONE_HIT: Color = rgba(255, 105, 180, 180);
    pub const MARKER: Color = rgba(255, 105, 180, 255);
    pub const FEEDBACK_HIT: Color = rgba(255, 10, 225, 255);
    pub const FEEDBACK_MISS: Color = rgba(255, 80, 80, 220);
    pub const TEXT_GOLD: Color = rgba(255, 215, 0, 255);
    pub const TEXT_YELLOW: Color = rgba(255, 230, 150, 255);
    pub const TEXT_GHOST: Color = rgba(170, 210, 255, 255);
    pub const CARD: Color = rgba(250, 240, 220, 255);
    pub const CARD_SELECTED: Color = rgba(255, 200, 120, 255);
    pub const EGG_BOWL: Color = rgba(120, 80, 80, 255);
    pub const HAND: Color = rgba(200, 200, 220, 255);
    pub const DIM: Color = rgba(0, 0, 0, 255);
    pub const RESULT_BAR: Color = rgba(255, 190, 90, 255);

    /// Egg result fallback fill, indexed by hit tier
    pub const EGG_TIERS: [Color; 4] = [
        rgba(255, 80, 80, 255),
        rgba(255, 180, 120, 255),
        rgba(180, 255, 140, 255),
        rgba(255, 230, 80, 255),
    ];
}

/// Font size classes supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Regular,
    Small,
}

/// Horizontal alignment of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Handle to a texture owned by the host renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub id: u32,
    pub width: f32,
    pub height: f32,
}

impl Texture {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Caller-provided drawing context
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    /// Draw `src` of `texture` (whole texture if `None`) into `dst`,
    /// rotated by `angle_deg` around the center of `dst`
    fn blit(&mut self, texture: Texture, src: Option<Rect>, dst: Rect, angle_deg: f32, alpha: f32);
    /// Text with its top edge at `pos.y`, aligned horizontally on `pos.x`
    fn text(&mut self, text: &str, size: FontSize, pos: Vec2, align: Align, color: Color);
}

/// Source of textures by symbolic path
pub trait AssetLoader {
    fn load(&mut self, path: &str) -> Option<Texture>;
}

/// Loader that never finds anything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAssets;

impl AssetLoader for NullAssets {
    fn load(&mut self, _path: &str) -> Option<Texture> {
        None
    }
}

/// Memoising loader that prefixes an asset root and warns once per miss
pub struct TextureCache<L: AssetLoader> {
    root: String,
    inner: L,
    cache: HashMap<String, Option<Texture>>,
}

impl<L: AssetLoader> TextureCache<L> {
    pub fn new(root: impl Into<String>, inner: L) -> Self {
        Self {
            root: root.into(),
            inner,
            cache: HashMap::new(),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<L: AssetLoader> AssetLoader for TextureCache<L> {
    fn load(&mut self, path: &str) -> Option<Texture> {
        if let Some(hit) = self.cache.get(path) {
            return *hit;
        }
        let full = if self.root.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.root.trim_end_matches('/'), path)
        };
        let tex = self.inner.load(&full);
        if tex.is_none() {
            log::warn!("Missing texture '{}', using solid-color fallback", full);
        }
        self.cache.insert(path.to_string(), tex);
        tex
    }
}

/// Blit a texture, or fill `dst` with `fallback` when it failed to load
pub fn draw_texture_or(
    canvas: &mut dyn Canvas,
    texture: Option<Texture>,
    src: Option<Rect>,
    dst: Rect,
    fallback: Color,
) {
    match texture {
        Some(tex) => canvas.blit(tex, src, dst, 0.0, 1.0),
        None => canvas.fill_rect(dst, fallback),
    }
}

/// Horizontal progress bar with a 5px inset fill
pub fn draw_progress_bar(canvas: &mut dyn Canvas, bg: Rect, ratio: f32) {
    canvas.fill_rect(bg, colors::PROGRESS_BG);
    let inner = Rect::new(bg.x + 5.0, bg.y + 5.0, (bg.w - 10.0) * ratio.clamp(0.0, 1.0), bg.h - 10.0);
    canvas.fill_rect(inner, colors::PROGRESS_FILL);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(Rect, Color),
    Stroke(Rect, Color),
    Line(Vec2, Vec2, Color),
    Blit {
        texture: u32,
        src: Option<Rect>,
        dst: Rect,
        angle_deg: f32,
    },
    Text(String, Vec2),
}

/// Recording canvas
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// All text strings drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn fills(&self) -> Vec<Rect> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Fill(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(DrawCmd::Stroke(rect, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.cmds.push(DrawCmd::Line(from, to, color));
    }

    fn blit(&mut self, texture: Texture, src: Option<Rect>, dst: Rect, angle_deg: f32, _alpha: f32) {
        self.cmds.push(DrawCmd::Blit {
            texture: texture.id,
            src,
            dst,
            angle_deg,
        });
    }

    fn text(&mut self, text: &str, _size: FontSize, pos: Vec2, _align: Align, _color: Color) {
        self.cmds.push(DrawCmd::Text(text.to_string(), pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loader that knows a fixed set of paths
    struct FakeAssets {
        calls: u32,
    }

    impl AssetLoader for FakeAssets {
        fn load(&mut self, path: &str) -> Option<Texture> {
            self.calls += 1;
            path.ends_with("Carrot.png").then_some(Texture {
                id: 7,
                width: 64.0,
                height: 32.0,
            })
        }
    }

    #[test]
    fn test_texture_cache_memoises_hits_and_misses() {
        let mut cache = TextureCache::new("res/", FakeAssets { calls: 0 });
        assert!(cache.load("sprites/ingredients/Carrot.png").is_some());
        assert!(cache.load("sprites/ingredients/Carrot.png").is_some());
        assert!(cache.load("missing.png").is_none());
        assert!(cache.load("missing.png").is_none());
        assert_eq!(cache.inner.calls, 2);
        assert_eq!(cache.cached_len(), 2);
    }

    #[test]
    fn test_draw_texture_or_falls_back_to_fill() {
        let mut list = DrawList::new();
        let dst = Rect::new(0.0, 0.0, 10.0, 10.0);
        draw_texture_or(&mut list, None, None, dst, colors::PLACEHOLDER);
        assert_eq!(list.cmds, vec![DrawCmd::Fill(dst, colors::PLACEHOLDER)]);
    }

    #[test]
    fn test_progress_bar_fill_width() {
        let mut list = DrawList::new();
        draw_progress_bar(&mut list, Rect::new(0.0, 0.0, 110.0, 30.0), 0.5);
        let fills = list.fills();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[1].w, 50.0);
    }
}
