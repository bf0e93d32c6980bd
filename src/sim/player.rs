//! Player craft: input fusion, shield, score-driven stats, attack modes
//!
//! One input source drives velocity per tick, by precedence: an in-progress
//! pointer drag, then a connected gamepad stick, then directional keys. The
//! high-inertia archetype instead integrates acceleration from whichever
//! source is active. Position is clamped to the arena rectangle after every
//! integration.

use glam::Vec2;

use super::archetype::{stat_multiplier, PlayerArchetype};
use super::emitter::Emitter;
use super::enemy::Enemy;
use super::projectile::Projectile;
use super::state::{alloc_id, Actor, Capability, GameEvent, Side};
use super::tick::TickInput;
use crate::consts::MUZZLE_OFFSET;
use crate::frames;

/// Lock-on guide line tuning (PulseShadow)
pub const GUIDE_LINE_LENGTH: f32 = 500.0;
/// Half-width of the lock corridor around the guide line
pub const GUIDE_CORRIDOR: f32 = 20.0;
pub const MAX_TILT: f32 = 0.6;
const TILT_SPEED: f32 = 0.1;
const TILT_RETURN_SPEED: f32 = 0.005;

const GAMEPAD_DEADZONE: f32 = 0.1;
/// Pointer must be at least this far away before a drag moves the craft
const DRAG_DEADBAND: f32 = 6.0;

/// Polled directional key state
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyInput {
    fn axis(self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }
}

/// Polled pointer state (mouse or touch)
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    pub pos: Vec2,
    pub pressed: bool,
}

/// Polled gamepad state; stick components in [-1, 1]
#[derive(Debug, Clone, Copy)]
pub struct GamepadInput {
    pub stick: Vec2,
}

/// Outcome of a hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Shield absorbed the hit
    ShieldBroken,
    Destroyed,
}

/// PulseShadow lock-on scratch state
#[derive(Debug, Clone, Default)]
pub struct LockOn {
    /// Current guide line tilt, radians from vertical
    pub tilt: f32,
    /// Candidate enemy id; switching candidates resets the clock
    pub target: Option<u32>,
    pub since_ms: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub actor: Actor,
    pub archetype: PlayerArchetype,
    pub emitter: Emitter,
    /// Current move speed with the score multiplier applied
    pub move_speed: f32,
    /// Inertia decay (RipplePropeller); scales with the multiplier
    pub deceleration: f32,
    /// Lock hold time (PulseShadow); shrinks with the multiplier
    pub lock_duration_ms: f32,
    pub shield: bool,
    /// In-flight projectiles owned exclusively by the player
    pub bullets: Vec<Projectile>,
    pub lock: LockOn,
    dragging: bool,
    inertia: Vec2,
}

impl Player {
    pub fn new(id: u32, archetype: PlayerArchetype, pos: Vec2) -> Self {
        let stats = archetype.stats();
        Self {
            actor: Actor::new(id, pos, 1, Capability::Player),
            archetype,
            emitter: Emitter::new(stats.shoot_delay_ms, stats.bullet_speed, 0.0),
            move_speed: stats.move_speed,
            deceleration: stats.deceleration,
            lock_duration_ms: stats.lock_duration_ms,
            shield: false,
            bullets: Vec::new(),
            lock: LockOn::default(),
            dragging: false,
            inertia: Vec2::ZERO,
        }
    }

    pub fn alive(&self) -> bool {
        self.actor.health > 0
    }

    /// Re-derive stats from the current score. The multiplier improves move
    /// speed and fire/lock rate monotonically up to 2x at score 250; which
    /// stats it touches depends on the archetype.
    pub fn update_stats(&mut self, score: u32) {
        let m = stat_multiplier(score);
        let base = self.archetype.stats();
        match self.archetype {
            PlayerArchetype::AzureFirstCry => {
                self.move_speed = base.move_speed * m;
                self.emitter.shoot_delay_ms = base.shoot_delay_ms / m;
            }
            PlayerArchetype::RipplePropeller => {
                self.deceleration = base.deceleration * m;
                self.emitter.shoot_delay_ms = base.shoot_delay_ms / m;
            }
            PlayerArchetype::PulseShadow => {
                self.move_speed = base.move_speed * m;
                self.lock_duration_ms = base.lock_duration_ms / m;
            }
        }
    }

    pub fn add_shield(&mut self) {
        self.shield = true;
    }

    /// One hit: the shield absorbs it, otherwise the craft is destroyed.
    /// No-op (returns None) if already destroyed.
    pub fn take_damage(&mut self) -> Option<PlayerHit> {
        if !self.alive() {
            return None;
        }
        if self.shield {
            self.shield = false;
            Some(PlayerHit::ShieldBroken)
        } else {
            self.actor.health = 0;
            Some(PlayerHit::Destroyed)
        }
    }

    /// Advance one tick: fuse input, integrate, clamp, fire
    pub fn update(
        &mut self,
        input: &TickInput,
        now_ms: f32,
        dt_ms: f32,
        width: f32,
        height: f32,
        enemies: &[Enemy],
        ids: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.alive() {
            return;
        }

        self.update_dragging(input);
        if self.archetype == PlayerArchetype::RipplePropeller {
            self.update_inertia(input, dt_ms);
        } else {
            self.update_velocity(input);
        }

        self.actor.integrate(dt_ms);
        self.actor.pos.x = self.actor.pos.x.clamp(0.0, width);
        self.actor.pos.y = self.actor.pos.y.clamp(0.0, height);

        match self.archetype {
            PlayerArchetype::PulseShadow => self.update_lock_on(now_ms, dt_ms, enemies, ids, events),
            _ => self.shoot(now_ms, ids),
        }
    }

    fn update_dragging(&mut self, input: &TickInput) {
        match input.pointer {
            Some(p) if p.pressed => self.dragging = true,
            _ => {
                if self.dragging {
                    self.dragging = false;
                    self.inertia = Vec2::ZERO;
                    self.actor.vel = Vec2::ZERO;
                }
            }
        }
    }

    /// Direction the active input source is asking for, unit-ish length
    fn input_direction(&self, input: &TickInput) -> Vec2 {
        if self.dragging {
            if let Some(p) = input.pointer {
                let dir = p.pos - self.actor.pos;
                if dir.length() > DRAG_DEADBAND {
                    return dir.normalize();
                }
            }
            return Vec2::ZERO;
        }
        if let Some(pad) = input.gamepad {
            let x = if pad.stick.x.abs() > GAMEPAD_DEADZONE { pad.stick.x } else { 0.0 };
            let y = if pad.stick.y.abs() > GAMEPAD_DEADZONE { pad.stick.y } else { 0.0 };
            return Vec2::new(x, y);
        }
        input.keys.axis()
    }

    fn update_velocity(&mut self, input: &TickInput) {
        self.actor.vel = self.input_direction(input) * self.move_speed;
    }

    /// High-inertia fusion: accelerate along the active direction, clamp,
    /// decelerate idle axes toward zero
    fn update_inertia(&mut self, input: &TickInput, dt_ms: f32) {
        let base = self.archetype.stats();
        let dir = self.input_direction(input);
        let f = frames(dt_ms);

        for axis in 0..2 {
            let d = dir[axis];
            let v = self.inertia[axis];
            self.inertia[axis] = if d != 0.0 {
                (v + d * base.acceleration * f).clamp(-base.max_inertia, base.max_inertia)
            } else if v > 0.0 {
                (v - self.deceleration * f).max(0.0)
            } else {
                (v + self.deceleration * f).min(0.0)
            };
        }
        self.actor.vel = self.inertia * base.move_speed;
    }

    fn shoot(&mut self, now_ms: f32, ids: &mut u32) {
        if !self.emitter.ready(now_ms) {
            return;
        }
        let id = alloc_id(ids);
        if let Some(bullet) = self.emitter.try_shoot(now_ms, id, Side::Player, self.actor.pos) {
            self.bullets.push(bullet);
        }
    }

    /// Guide line tracking and missile launch (PulseShadow).
    ///
    /// The line's tilt lazily follows horizontal velocity; the first enemy
    /// inside the corridor becomes the lock candidate. Holding the same
    /// candidate past the lock duration (while the fire delay has elapsed)
    /// launches a homing missile at it.
    fn update_lock_on(
        &mut self,
        now_ms: f32,
        dt_ms: f32,
        enemies: &[Enemy],
        ids: &mut u32,
        events: &mut Vec<GameEvent>,
    ) {
        let f = frames(dt_ms);
        let vx = self.actor.vel.x;
        if vx.abs() > 0.1 {
            let target_tilt = (vx / self.move_speed).clamp(-1.0, 1.0) * MAX_TILT;
            self.lock.tilt += (target_tilt - self.lock.tilt) * (TILT_SPEED * f).min(1.0);
        } else {
            self.lock.tilt -= self.lock.tilt * (TILT_RETURN_SPEED * f).min(1.0);
        }

        let mut candidate = None;
        for enemy in enemies.iter().filter(|e| e.alive()) {
            let rel_y = self.actor.pos.y - enemy.actor.pos.y;
            if rel_y <= 0.0 || rel_y >= GUIDE_LINE_LENGTH {
                continue;
            }
            let line_x = self.actor.pos.x + self.lock.tilt.sin() * rel_y;
            if (enemy.actor.pos.x - line_x).abs() < GUIDE_CORRIDOR {
                candidate = Some(enemy.actor.id);
                break;
            }
        }

        let Some(target) = candidate else {
            self.lock.target = None;
            return;
        };
        if self.lock.target != Some(target) {
            self.lock.target = Some(target);
            self.lock.since_ms = now_ms;
            return;
        }
        if now_ms - self.lock.since_ms >= self.lock_duration_ms && self.emitter.ready(now_ms) {
            let id = alloc_id(ids);
            let muzzle = self.actor.pos + Vec2::new(0.0, -MUZZLE_OFFSET);
            self.bullets.push(Projectile::missile(id, muzzle, target));
            self.emitter.last_shot_ms = now_ms;
            events.push(GameEvent::MissileLaunched { target });
        }
    }
}
