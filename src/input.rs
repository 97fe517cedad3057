//! Discrete input events
//!
//! Coordinates arrive already converted into logical render space by the
//! caller (window scaling never reaches gameplay code).

use glam::Vec2;

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    /// Any other key, by platform key code
    Other(u32),
}

/// One input event, applied before the logic update of the same frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { pos: Vec2 },
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton, pos: Vec2 },
    KeyDown(Key),
    /// Signed vertical wheel delta (positive = away from the user)
    Wheel { delta: f32 },
}

impl InputEvent {
    /// True for key presses and primary clicks ("any key" style prompts)
    pub fn is_confirm(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown(_)
                | InputEvent::PointerDown {
                    button: PointerButton::Primary,
                    ..
                }
        )
    }

    pub fn primary_down(pos: Vec2) -> Self {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos,
        }
    }

    pub fn primary_up(pos: Vec2) -> Self {
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            pos,
        }
    }
}
