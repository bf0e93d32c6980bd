//! Enemy craft: generic descent/fire plus the bespoke archetype behaviors
//!
//! Most archetypes are driven entirely by their stat row. The exceptions
//! dispatch on the archetype enum here: DroneBot orbits a descending center,
//! BeamveilGuardian zaps nearby player projectiles with an instant beam, and
//! AmmoCarrier never fires but detonates on death (`carrier_blast`).

use glam::Vec2;

use super::archetype::EnemyArchetype;
use super::emitter::Emitter;
use super::projectile::Projectile;
use super::state::{alloc_id, Actor, Capability, DeathCause, GameEvent, Side};
use crate::{dist_sq, frames};

/// AmmoCarrier blast radius and BeamveilGuardian detection radius
pub const BLAST_RADIUS: f32 = 100.0;
pub const BEAM_DETECTION_RADIUS: f32 = 100.0;
/// Beam re-arm time and how long the fired beam persists for display
pub const BEAM_COOLDOWN_MS: f32 = 1500.0;
pub const BEAM_LINGER_MS: f32 = 100.0;

/// DroneBot orbit tuning: radius, angular step per frame, center descent
const ORBIT_RADIUS: f32 = 120.0;
const ORBIT_STEP: f32 = 0.05;

/// ArcShooter fan: 5 bullets across a 40 degree spread
const FAN_BULLETS: u32 = 5;
const FAN_SPREAD: f32 = 40.0 * std::f32::consts::PI / 180.0;

/// Orbit scratch state for DroneBot
#[derive(Debug, Clone)]
pub struct Orbit {
    pub center: Vec2,
    pub angle: f32,
}

/// An instant beam, kept around briefly so the renderer can draw it
#[derive(Debug, Clone)]
pub struct Beam {
    pub from: Vec2,
    pub to: Vec2,
    pub until_ms: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub actor: Actor,
    pub archetype: EnemyArchetype,
    pub emitter: Emitter,
    /// Set exactly once; `Some` means pending removal by compaction
    pub death: Option<DeathCause>,
    pub orbit: Option<Orbit>,
    pub beam: Option<Beam>,
    last_beam_ms: f32,
}

impl Enemy {
    pub fn spawn(id: u32, archetype: EnemyArchetype, pos: Vec2) -> Self {
        let stats = archetype.stats();
        let mut actor = Actor::new(id, pos, stats.health, Capability::Enemy);
        actor.vel = Vec2::new(0.0, stats.move_speed);
        let orbit = (archetype == EnemyArchetype::DroneBot).then(|| Orbit {
            center: pos,
            angle: 0.0,
        });
        Self {
            actor,
            archetype,
            emitter: Emitter::new(stats.shoot_delay_ms, stats.bullet_speed, stats.bullet_accel),
            death: None,
            orbit,
            beam: None,
            last_beam_ms: 0.0,
        }
    }

    pub fn alive(&self) -> bool {
        self.death.is_none()
    }

    /// One point of damage. No-op once dead; returns true if this call
    /// killed the enemy (health transitioned to zero).
    pub fn take_damage(&mut self) -> bool {
        if self.death.is_some() {
            return false;
        }
        self.actor.health -= 1;
        if self.actor.health <= 0 {
            self.death = Some(DeathCause::Damage);
            return true;
        }
        false
    }

    /// Advance one tick of behavior. Fired bullets are pushed to
    /// `out_bullets`; the beam may destroy a player projectile in place.
    /// Returns true if the enemy crossed the bottom bound this tick.
    pub fn update(
        &mut self,
        now_ms: f32,
        dt_ms: f32,
        height: f32,
        ids: &mut u32,
        out_bullets: &mut Vec<Projectile>,
        player_bullets: &mut [Projectile],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.alive() {
            return false;
        }

        match self.archetype {
            EnemyArchetype::DroneBot => self.update_orbit(dt_ms),
            _ => self.actor.integrate(dt_ms),
        }

        match self.archetype {
            EnemyArchetype::AmmoCarrier => {} // passive, never fires
            EnemyArchetype::ArcShooter => self.shoot_fan(now_ms, ids, out_bullets),
            EnemyArchetype::BeamveilGuardian => {
                self.update_beam(now_ms, player_bullets, events);
                self.shoot_single(now_ms, ids, out_bullets);
            }
            _ => self.shoot_single(now_ms, ids, out_bullets),
        }

        if self.actor.pos.y > height {
            self.death = Some(DeathCause::Breakthrough);
            return true;
        }
        false
    }

    fn shoot_single(&mut self, now_ms: f32, ids: &mut u32, out_bullets: &mut Vec<Projectile>) {
        if !self.emitter.ready(now_ms) {
            return;
        }
        let id = alloc_id(ids);
        if let Some(bullet) = self.emitter.try_shoot(now_ms, id, Side::Enemy, self.actor.pos) {
            out_bullets.push(bullet);
        }
    }

    /// 5-bullet fan across the spread, fired as one volley
    fn shoot_fan(&mut self, now_ms: f32, ids: &mut u32, out_bullets: &mut Vec<Projectile>) {
        if !self.emitter.ready(now_ms) {
            return;
        }
        self.emitter.last_shot_ms = now_ms;
        let speed = self.emitter.bullet_speed;
        let step = FAN_SPREAD / (FAN_BULLETS - 1) as f32;
        for i in 0..FAN_BULLETS {
            let angle = -FAN_SPREAD / 2.0 + i as f32 * step;
            let mut bullet =
                Projectile::new(alloc_id(ids), Side::Enemy, self.actor.pos, 0.0, 0.0);
            bullet.actor.vel = Vec2::new(angle.sin() * speed, angle.cos() * speed);
            out_bullets.push(bullet);
        }
    }

    /// Project an instant beam at the nearest player projectile in range,
    /// destroying it. The beam object lingers briefly for display only.
    fn update_beam(
        &mut self,
        now_ms: f32,
        player_bullets: &mut [Projectile],
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(beam) = &self.beam {
            if now_ms >= beam.until_ms {
                self.beam = None;
            }
        }
        if self.beam.is_some() || now_ms - self.last_beam_ms < BEAM_COOLDOWN_MS {
            return;
        }

        let radius_sq = BEAM_DETECTION_RADIUS * BEAM_DETECTION_RADIUS;
        let target = player_bullets
            .iter_mut()
            .filter(|b| b.alive() && dist_sq(b.actor.pos, self.actor.pos) <= radius_sq)
            .min_by(|a, b| {
                let da = dist_sq(a.actor.pos, self.actor.pos);
                let db = dist_sq(b.actor.pos, self.actor.pos);
                da.total_cmp(&db)
            });
        let Some(target) = target else { return };

        let to = target.actor.pos;
        target.destroy();
        self.beam = Some(Beam {
            from: self.actor.pos,
            to,
            until_ms: now_ms + BEAM_LINGER_MS,
        });
        self.last_beam_ms = now_ms;
        events.push(GameEvent::BeamFired {
            from: self.actor.pos,
            to,
        });
    }

    /// Circular orbit around a center that keeps descending
    fn update_orbit(&mut self, dt_ms: f32) {
        let Some(orbit) = &mut self.orbit else { return };
        let f = frames(dt_ms);
        orbit.angle += ORBIT_STEP * f;
        orbit.center.y += self.archetype.stats().move_speed * f;
        self.actor.pos =
            orbit.center + Vec2::new(orbit.angle.cos(), orbit.angle.sin()) * ORBIT_RADIUS;
    }
}

/// AmmoCarrier death blast: destroy every other enemy within the radius,
/// without score credit. Marks only; compaction removes (and cascades
/// through any AmmoCarrier caught in the blast).
pub fn carrier_blast(center: Vec2, enemies: &mut [Enemy]) {
    let radius_sq = BLAST_RADIUS * BLAST_RADIUS;
    for enemy in enemies.iter_mut() {
        if enemy.alive() && dist_sq(enemy.actor.pos, center) <= radius_sq {
            enemy.actor.health = 0;
            enemy.death = Some(DeathCause::AreaBlast);
        }
    }
}
