//! Projectile flight: straight, accelerating and homing
//!
//! Bullets fly straight (optionally gaining vertical speed each frame) and
//! die the tick they cross any arena edge. Homing missiles steer toward a
//! target enemy by id; if the target is gone the missile degrades to
//! straight-line flight.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{Actor, Capability, Side};
use crate::{frames, normalize_angle};

/// Missile steering limit, radians per reference frame
pub const MISSILE_TURN_RATE: f32 = 0.1;
/// Missile speed range; scales with distance to target
pub const MISSILE_BASE_SPEED: f32 = 5.0;
pub const MISSILE_MAX_SPEED: f32 = 8.0;
/// Distance at which a missile detonates on its target
pub const MISSILE_PROXIMITY: f32 = 20.0;

/// Homing state: a target handle, not ownership. Ids are unique per match,
/// so a destroyed target simply fails lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Homing {
    pub target: u32,
    /// Current heading in radians (0 = +x, y-down screen space)
    pub heading: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub actor: Actor,
    pub side: Side,
    /// Per-frame gain on vertical velocity
    pub accel: f32,
    pub homing: Option<Homing>,
}

impl Projectile {
    pub fn new(id: u32, side: Side, pos: Vec2, speed: f32, accel: f32) -> Self {
        let mut actor = Actor::new(id, pos, 1, Capability::Bullet);
        actor.vel = Vec2::new(0.0, speed);
        Self {
            actor,
            side,
            accel,
            homing: None,
        }
    }

    /// A lock-on missile launched at the given enemy
    pub fn missile(id: u32, pos: Vec2, target: u32) -> Self {
        let mut p = Self::new(id, Side::Player, pos, -MISSILE_BASE_SPEED, 0.0);
        p.homing = Some(Homing {
            target,
            heading: -std::f32::consts::FRAC_PI_2,
        });
        p
    }

    pub fn alive(&self) -> bool {
        self.actor.health > 0
    }

    /// Bullet `takeDamage`: a bullet dies to any hit
    pub fn destroy(&mut self) {
        self.actor.health = 0;
    }

    fn cull_offscreen(&mut self, width: f32, height: f32) {
        let p = self.actor.pos;
        if p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height {
            self.actor.health = 0;
        }
    }

    /// Advance one tick of straight/accelerating flight
    pub fn update(&mut self, dt_ms: f32, width: f32, height: f32) {
        if !self.alive() {
            return;
        }
        self.actor.vel.y += self.accel * frames(dt_ms);
        self.actor.integrate(dt_ms);
        self.cull_offscreen(width, height);
    }

    /// Advance one tick of homing flight. Applies one damage to the target
    /// when within proximity, consuming the missile. A stale target id
    /// degrades to straight flight on the last heading.
    pub fn update_homing(&mut self, enemies: &mut [Enemy], dt_ms: f32, width: f32, height: f32) {
        if !self.alive() {
            return;
        }
        let Some(homing) = &mut self.homing else {
            self.update(dt_ms, width, height);
            return;
        };

        let target = enemies
            .iter_mut()
            .find(|e| e.actor.id == homing.target && e.alive());
        let Some(target) = target else {
            self.actor.integrate(dt_ms);
            self.cull_offscreen(width, height);
            return;
        };

        let to_target = target.actor.pos - self.actor.pos;
        let distance = to_target.length();
        let desired = to_target.y.atan2(to_target.x);
        let max_turn = MISSILE_TURN_RATE * frames(dt_ms);
        let diff = normalize_angle(desired - homing.heading).clamp(-max_turn, max_turn);
        homing.heading = normalize_angle(homing.heading + diff);

        // Slow down on approach for a tighter terminal turn
        let speed_factor = (distance / 200.0).min(1.0);
        let speed = MISSILE_BASE_SPEED + (MISSILE_MAX_SPEED - MISSILE_BASE_SPEED) * speed_factor;
        self.actor.vel = Vec2::new(homing.heading.cos(), homing.heading.sin()) * speed;
        self.actor.integrate(dt_ms);

        if distance < MISSILE_PROXIMITY {
            target.take_damage();
            self.actor.health = 0;
            return;
        }
        self.cull_offscreen(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::archetype::EnemyArchetype;

    fn enemy_at(id: u32, pos: Vec2) -> Enemy {
        Enemy::spawn(id, EnemyArchetype::Vanguard, pos)
    }

    #[test]
    fn test_culled_on_each_edge() {
        let (w, h) = (800.0, 600.0);
        for (pos, vel) in [
            (Vec2::new(400.0, 2.0), Vec2::new(0.0, -4.0)),
            (Vec2::new(400.0, 598.0), Vec2::new(0.0, 4.0)),
            (Vec2::new(2.0, 300.0), Vec2::new(-4.0, 0.0)),
            (Vec2::new(798.0, 300.0), Vec2::new(4.0, 0.0)),
        ] {
            let mut b = Projectile::new(1, Side::Enemy, pos, 0.0, 0.0);
            b.actor.vel = vel;
            // Still inside: survives
            assert!(b.alive());
            b.update(FRAME_MS, w, h);
            // Crossed this tick: removed this tick, not earlier
            assert!(!b.alive(), "bullet at {pos:?} should have been culled");
        }
    }

    #[test]
    fn test_acceleration_compounds() {
        let mut b = Projectile::new(1, Side::Enemy, Vec2::new(100.0, 100.0), 2.0, 0.1);
        let vy0 = b.actor.vel.y;
        b.update(FRAME_MS, 800.0, 600.0);
        b.update(FRAME_MS, 800.0, 600.0);
        assert!((b.actor.vel.y - (vy0 + 0.2)).abs() < 1e-4);
    }

    #[test]
    fn test_homing_tracks_target() {
        let mut enemies = vec![enemy_at(9, Vec2::new(300.0, 100.0))];
        let mut m = Projectile::missile(1, Vec2::new(100.0, 500.0), 9);
        let start = (enemies[0].actor.pos - m.actor.pos).length();
        for _ in 0..60 {
            m.update_homing(&mut enemies, FRAME_MS, 800.0, 600.0);
        }
        let end = (enemies[0].actor.pos - m.actor.pos).length();
        assert!(end < start, "missile should close on its target");
    }

    #[test]
    fn test_homing_detonates_in_proximity() {
        let mut enemies = vec![enemy_at(9, Vec2::new(100.0, 485.0))];
        let mut m = Projectile::missile(1, Vec2::new(100.0, 500.0), 9);
        m.update_homing(&mut enemies, FRAME_MS, 800.0, 600.0);
        assert!(!m.alive());
        assert_eq!(enemies[0].actor.health, 0);
    }

    #[test]
    fn test_stale_target_degrades_to_straight() {
        let mut enemies: Vec<Enemy> = Vec::new();
        let mut m = Projectile::missile(1, Vec2::new(100.0, 300.0), 77);
        let vel = m.actor.vel;
        m.update_homing(&mut enemies, FRAME_MS, 800.0, 600.0);
        assert!(m.alive());
        assert_eq!(m.actor.vel, vel);
        assert!(m.actor.pos.y < 300.0);
    }
}
