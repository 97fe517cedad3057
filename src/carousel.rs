//! Level-select carousel
//!
//! Cards sit on a horizontal strip; the selected card is centered. The
//! visible scroll position eases toward the selected card each tick and
//! snaps once it is close enough, so it never oscillates.

use glam::Vec2;

use crate::geom::Rect;
use crate::input::{InputEvent, Key, PointerButton};
use crate::recipe::Recipe;
use crate::render::{Align, Canvas, FontSize, colors};

pub const CARD_WIDTH: f32 = 300.0;
pub const CARD_HEIGHT: f32 = 240.0;
pub const CARD_SPACING: f32 = 50.0;
/// Fraction of the remaining distance covered per tick
pub const SCROLL_SPEED: f32 = 0.15;
/// Distance (pixels) under which the scroll snaps onto its target
pub const SNAP_THRESHOLD: f32 = 0.5;

/// What a carousel input asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    None,
    Moved,
    Select(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    count: usize,
    selected: usize,
    scroll: f32,
    target: f32,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.scroll != self.target
    }

    /// Select a card by index, clamped to the available cards
    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.count.saturating_sub(1));
        self.target = self.selected as f32 * (CARD_WIDTH + CARD_SPACING);
    }

    pub fn select_next(&mut self) {
        self.set_selected(self.selected + 1);
    }

    pub fn select_prev(&mut self) {
        self.set_selected(self.selected.saturating_sub(1));
    }

    /// Ease toward the target; snap when within the threshold
    pub fn update(&mut self) {
        let diff = self.target - self.scroll;
        if diff.abs() < SNAP_THRESHOLD {
            self.scroll = self.target;
        } else {
            self.scroll += diff * SCROLL_SPEED;
        }
    }

    /// Screen rectangle of card `index` at the current scroll
    pub fn card_rect(&self, index: usize, logical: Vec2) -> Rect {
        let offset = index as f32 * (CARD_WIDTH + CARD_SPACING) - self.scroll;
        Rect::new(
            logical.x / 2.0 - CARD_WIDTH / 2.0 + offset,
            logical.y / 2.0 - CARD_HEIGHT / 2.0,
            CARD_WIDTH,
            CARD_HEIGHT,
        )
    }

    pub fn handle_input(&mut self, event: &InputEvent, logical: Vec2) -> CarouselAction {
        if self.count == 0 {
            return CarouselAction::None;
        }
        match *event {
            InputEvent::KeyDown(Key::Left) => {
                self.select_prev();
                CarouselAction::Moved
            }
            InputEvent::KeyDown(Key::Right) => {
                self.select_next();
                CarouselAction::Moved
            }
            InputEvent::Wheel { delta } if delta > 0.0 => {
                self.select_next();
                CarouselAction::Moved
            }
            InputEvent::Wheel { delta } if delta < 0.0 => {
                self.select_prev();
                CarouselAction::Moved
            }
            InputEvent::KeyDown(Key::Enter) | InputEvent::KeyDown(Key::Space) => CarouselAction::Select(self.selected),
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            } if self.card_rect(self.selected, logical).contains_point(pos) => {
                CarouselAction::Select(self.selected)
            }
            _ => CarouselAction::None,
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, recipes: &[Recipe], logical: Vec2) {
        let screen = Rect::new(0.0, 0.0, logical.x, logical.y);
        for (i, recipe) in recipes.iter().enumerate() {
            let card = self.card_rect(i, logical);
            if card.right() < screen.x || card.x > screen.right() {
                continue;
            }
            let fill = if i == self.selected { colors::CARD_SELECTED } else { colors::CARD };
            canvas.fill_rect(card, fill);
            canvas.stroke_rect(card, colors::BLACK);

            let left = card.x + 16.0;
            canvas.text(
                &recipe.name,
                FontSize::Regular,
                Vec2::new(card.center().x, card.y + 16.0),
                Align::Center,
                colors::BLACK,
            );
            canvas.text(
                &format!("Difficulty: {}/5", recipe.difficulty),
                FontSize::Small,
                Vec2::new(left, card.y + 56.0),
                Align::Left,
                colors::BLACK,
            );
            canvas.text(&recipe.description, FontSize::Small, Vec2::new(left, card.y + 80.0), Align::Left, colors::BLACK);
            for (n, step) in recipe.steps.iter().enumerate() {
                canvas.text(
                    &format!("{}. {}", n + 1, step.action.label()),
                    FontSize::Small,
                    Vec2::new(left, card.y + 112.0 + n as f32 * 20.0),
                    Align::Left,
                    colors::BLACK,
                );
            }
            let needs: Vec<&str> = recipe.ingredients().iter().map(|i| i.name.as_str()).collect();
            canvas.text(
                &format!("Needs: {}", needs.join(", ")),
                FontSize::Small,
                Vec2::new(left, card.bottom() - 28.0),
                Align::Left,
                colors::BLACK,
            );
        }

        canvas.text(
            "< Left / Right to browse, Enter to cook >",
            FontSize::Small,
            Vec2::new(logical.x / 2.0, logical.y - 30.0),
            Align::Center,
            colors::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
    use crate::recipe::builtin_recipes;
    use crate::render::DrawList;
    use proptest::prelude::*;

    fn logical() -> Vec2 {
        Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT)
    }

    #[test]
    fn test_selection_clamped() {
        let mut c = Carousel::new(3);
        c.select_prev();
        assert_eq!(c.selected(), 0);
        for _ in 0..10 {
            c.select_next();
        }
        assert_eq!(c.selected(), 2);
        assert_eq!(c.target(), 2.0 * (CARD_WIDTH + CARD_SPACING));
    }

    #[test]
    fn test_empty_carousel_ignores_input() {
        let mut c = Carousel::new(0);
        assert_eq!(c.handle_input(&InputEvent::KeyDown(Key::Enter), logical()), CarouselAction::None);
        c.select_next();
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn test_scroll_eases_then_snaps() {
        let mut c = Carousel::new(2);
        c.select_next();
        c.update();
        assert!((c.scroll() - 350.0 * SCROLL_SPEED).abs() < 1e-3);
        assert!(c.is_animating());
        for _ in 0..200 {
            c.update();
        }
        assert_eq!(c.scroll(), c.target());
        assert!(!c.is_animating());
    }

    #[test]
    fn test_wheel_and_keys_move_selection() {
        let mut c = Carousel::new(4);
        assert_eq!(c.handle_input(&InputEvent::Wheel { delta: 1.0 }, logical()), CarouselAction::Moved);
        c.handle_input(&InputEvent::KeyDown(Key::Right), logical());
        assert_eq!(c.selected(), 2);
        c.handle_input(&InputEvent::Wheel { delta: -3.0 }, logical());
        c.handle_input(&InputEvent::KeyDown(Key::Left), logical());
        assert_eq!(c.selected(), 0);
        assert_eq!(c.handle_input(&InputEvent::Wheel { delta: 0.0 }, logical()), CarouselAction::None);
    }

    #[test]
    fn test_click_centered_card_selects() {
        let mut c = Carousel::new(3);
        let center = logical() / 2.0;
        assert_eq!(c.handle_input(&InputEvent::primary_down(center), logical()), CarouselAction::Select(0));
        assert_eq!(
            c.handle_input(&InputEvent::primary_down(Vec2::new(5.0, 5.0)), logical()),
            CarouselAction::None
        );
    }

    #[test]
    fn test_card_lists_ingredients_once() {
        let recipes = builtin_recipes();
        let mut c = Carousel::new(recipes.len());
        c.set_selected(1);
        for _ in 0..400 {
            c.update();
        }
        let mut list = DrawList::new();
        c.render(&mut list, &recipes, logical());
        assert!(list.has_text("Garden Salad"));
        assert!(list.has_text("Needs: Tomato, Carrot"));
    }

    proptest! {
        #[test]
        fn prop_scroll_converges(count in 1usize..20, moves in proptest::collection::vec(any::<bool>(), 0..30)) {
            let mut c = Carousel::new(count);
            for right in moves {
                if right { c.select_next() } else { c.select_prev() }
                c.update();
                prop_assert!(c.selected() < count);
            }
            for _ in 0..400 {
                c.update();
            }
            prop_assert_eq!(c.scroll(), c.target());
            prop_assert_eq!(c.target(), c.selected() as f32 * (CARD_WIDTH + CARD_SPACING));
        }
    }
}
