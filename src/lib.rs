//! Sky Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Single-threaded gameplay simulation (actors, spawn economy, collisions)
//! - `highscores`: Best-score persistence
//!
//! Rendering, the collision broad-phase and raw input devices are external
//! collaborators: the simulation consumes polled input and contact-start
//! events, and emits `GameEvent`s for display/audio each tick.

pub mod highscores;
pub mod sim;

pub use highscores::BestScore;

use glam::Vec2;

/// Hook panics and route `log` output to the browser console. The web host
/// calls this once before constructing the first match.
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (ms). Velocities are expressed in pixels per
    /// 60 Hz frame and scaled by the actual tick delta.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default arena dimensions (the host may resize)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Enemies materialize at this distance below the top bound
    pub const ENEMY_SPAWN_Y: f32 = 50.0;

    /// Muzzle offset along the firing axis
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Shield is granted after this much match time without a breakthrough
    pub const SHIELD_GRANT_MS: f32 = 15_000.0;

    /// Director economy
    pub const BASE_POINTS_PER_SECOND: f32 = 1.0;
    /// Point rate compounds by 1.1 every 30 seconds
    pub const RATE_GROWTH: f32 = 1.1;
    pub const RATE_GROWTH_INTERVAL_MS: f32 = 30_000.0;
    /// AmmoCarrier breakthrough accelerates the economy instead of scoring
    pub const CARRIER_BREAKTHROUGH_RATE_BONUS: f32 = 0.2;

    /// Player stat multiplier caps at 2x at this score
    pub const STAT_CAP_SCORE: f32 = 250.0;
}

/// Number of 60 Hz reference frames covered by a tick delta
#[inline]
pub fn frames(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Squared distance between two points
#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
