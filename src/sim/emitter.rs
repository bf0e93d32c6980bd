//! Rate-limited fire control shared by the player craft and enemies
//!
//! `try_shoot` is a no-op until the shoot delay has elapsed; otherwise it
//! returns one projectile, offset along the firing axis, for the caller to
//! register in the owning collection. The sign of `bullet_speed` encodes the
//! firing direction (negative = upward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::state::Side;
use crate::consts::MUZZLE_OFFSET;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    pub shoot_delay_ms: f32,
    pub bullet_speed: f32,
    pub bullet_accel: f32,
    pub last_shot_ms: f32,
}

impl Emitter {
    pub fn new(shoot_delay_ms: f32, bullet_speed: f32, bullet_accel: f32) -> Self {
        Self {
            shoot_delay_ms,
            bullet_speed,
            bullet_accel,
            last_shot_ms: 0.0,
        }
    }

    /// Whether the rate limit allows firing at `now_ms`
    pub fn ready(&self, now_ms: f32) -> bool {
        now_ms - self.last_shot_ms >= self.shoot_delay_ms
    }

    /// Fire one projectile from `pos` if the delay has elapsed
    pub fn try_shoot(&mut self, now_ms: f32, id: u32, side: Side, pos: Vec2) -> Option<Projectile> {
        if !self.ready(now_ms) {
            return None;
        }
        self.last_shot_ms = now_ms;
        let muzzle = pos + Vec2::new(0.0, MUZZLE_OFFSET * self.bullet_speed.signum());
        Some(Projectile::new(
            id,
            side,
            muzzle,
            self.bullet_speed,
            self.bullet_accel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit() {
        let mut emitter = Emitter::new(1000.0, 3.0, 0.0);
        // First shot fires immediately (last_shot starts at 0, now >= delay)
        assert!(emitter.try_shoot(1000.0, 1, Side::Enemy, Vec2::ZERO).is_some());
        // Within the delay window: no-op
        assert!(emitter.try_shoot(1500.0, 2, Side::Enemy, Vec2::ZERO).is_none());
        assert!(emitter.try_shoot(1999.0, 3, Side::Enemy, Vec2::ZERO).is_none());
        // Delay elapsed
        assert!(emitter.try_shoot(2000.0, 4, Side::Enemy, Vec2::ZERO).is_some());
    }

    #[test]
    fn test_muzzle_offset_follows_direction() {
        let mut down = Emitter::new(0.0, 4.0, 0.0);
        let b = down.try_shoot(1.0, 1, Side::Enemy, Vec2::new(10.0, 50.0)).unwrap();
        assert_eq!(b.actor.pos.y, 70.0);
        assert!(b.actor.vel.y > 0.0);

        let mut up = Emitter::new(0.0, -5.0, 0.0);
        let b = up.try_shoot(1.0, 2, Side::Player, Vec2::new(10.0, 50.0)).unwrap();
        assert_eq!(b.actor.pos.y, 30.0);
        assert!(b.actor.vel.y < 0.0);
    }
}
