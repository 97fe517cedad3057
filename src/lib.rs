//! Sizzle - a minigame-driven cooking game
//!
//! Core modules:
//! - `minigame`: Cutting, frying, mixing and egg-cracking minigames
//! - `level`: Recipe orchestrator (carousel, step sequencing, transitions)
//! - `recipe`: Recipe / step / ingredient data
//! - `render`: Drawing surface and asset seams (no window ownership)
//! - `app`: Frame driver (events -> fixed-rate logic -> render)

pub mod app;
pub mod carousel;
pub mod clock;
pub mod error;
pub mod geom;
pub mod input;
pub mod level;
pub mod minigame;
pub mod recipe;
pub mod render;
pub mod scheduler;
pub mod settings;

pub use app::App;
pub use error::{GameError, GameResult};
pub use level::LevelManager;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logic updates per second
    pub const TICKS_PER_SECOND: u32 = 50;
    /// Milliseconds per logic tick
    pub const TICK_MS: u64 = 1000 / TICKS_PER_SECOND as u64;
    /// Fixed per-tick time delta in seconds
    pub const TICK_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_FRAMESKIP: u32 = 10;

    /// Logical render resolution
    pub const LOGICAL_WIDTH: f32 = 800.0;
    pub const LOGICAL_HEIGHT: f32 = 400.0;

    /// Start/finish transition length (2 seconds at 50 Hz)
    pub const ANIMATION_DURATION_TICKS: u32 = 100;
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Shortest signed angular distance from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!(wrap_angle(0.25).abs() - 0.25 < 1e-6);
    }

    #[test]
    fn test_angle_delta_crosses_boundary() {
        // From just below π to just above -π is a small positive step
        let d = angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-4);

        let d = angle_delta(-PI + 0.1, PI - 0.1);
        assert!((d + 0.2).abs() < 1e-4);
    }
}
