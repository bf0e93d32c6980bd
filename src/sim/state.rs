//! Arena state and core actor types
//!
//! The arena coordinator owns every live collection, the spawn director and
//! the match-wide game-over latch. The latch is an explicit field here, not a
//! global: once set, removal events and score mutation are suppressed until
//! the next match constructs a fresh state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::archetype::{EnemyArchetype, PlayerArchetype};
use super::director::Director;
use super::enemy::Enemy;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;
use crate::frames;

/// Coarse classification used to filter collisions and route damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    Player,
    Enemy,
    Bullet,
}

/// Which side owns a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Common physical core shared by every entity.
///
/// Velocities are px per 60 Hz reference frame;
/// `integrate` scales them by the actual tick delta. An actor with
/// `health <= 0` is destroyed by end-of-tick compaction, exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub capability: Capability,
}

impl Actor {
    pub fn new(id: u32, pos: Vec2, health: i32, capability: Capability) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            health,
            capability,
        }
    }

    /// Advance position by velocity over the tick delta
    pub fn integrate(&mut self, dt_ms: f32) {
        self.pos += self.vel * frames(dt_ms);
    }
}

/// How an enemy left the arena. Set exactly once; `None` means alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Health reached zero from damage; scores
    Damage,
    /// Caught in an AmmoCarrier blast; never scores
    AreaBlast,
    /// Crossed the bottom bound with health remaining; never scores
    Breakthrough,
}

/// End-of-match payload handed to the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u32,
    pub player_archetype: PlayerArchetype,
    pub elapsed_ms: u64,
}

/// Per-tick notifications for the display/audio collaborator.
///
/// Gameplay bookkeeping (score, list compaction) is done directly in the
/// tick; these are cosmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemyDestroyed { archetype: EnemyArchetype, pos: Vec2 },
    Breakthrough { archetype: EnemyArchetype },
    ShieldGranted,
    ShieldBroken,
    BeamFired { from: Vec2, to: Vec2 },
    MissileLaunched { target: u32 },
    PlayerDestroyed(MatchReport),
}

/// Complete match state owned by the arena coordinator
#[derive(Debug, Clone)]
pub struct ArenaState {
    /// Match seed for the spawn economy draws
    pub seed: u64,
    pub rng: Pcg32,
    /// Playable bounds (the host may resize between ticks)
    pub width: f32,
    pub height: f32,
    /// Elapsed match time in ms
    pub time_ms: f32,
    pub score: u32,
    /// Game-over latch; suppresses removal events and score once set
    pub game_over: bool,
    /// Time since the last breakthrough (or shield grant)
    pub shield_timer_ms: f32,
    pub director: Director,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Projectile>,
    /// Events accumulated this tick, drained by the host
    pub events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl ArenaState {
    /// Start a match with the chosen player archetype
    pub fn new(seed: u64, archetype: PlayerArchetype) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            time_ms: 0.0,
            score: 0,
            game_over: false,
            shield_timer_ms: 0.0,
            director: Director::new(),
            player: Player::new(0, archetype, Vec2::ZERO),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        let id = state.next_entity_id();
        let spawn = Vec2::new(state.width / 2.0, state.height * 5.0 / 6.0);
        state.player = Player::new(id, archetype, spawn);
        state
    }

    /// Allocate a new entity ID. Ids are never reused within a match, so a
    /// stale id held by a homing projectile simply fails lookup.
    pub fn next_entity_id(&mut self) -> u32 {
        alloc_id(&mut self.next_id)
    }

    /// Spawn one enemy at the given x, at the top spawn line
    pub fn spawn_enemy(&mut self, archetype: EnemyArchetype, x: f32) {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, archetype, Vec2::new(x, ENEMY_SPAWN_Y));
        log::debug!("spawn {} (id {id}) at x={x:.0}", archetype.as_str());
        self.enemies.push(enemy);
    }

    /// Final report for the game-over screen
    pub fn report(&self) -> MatchReport {
        MatchReport {
            score: self.score,
            player_archetype: self.player.archetype,
            elapsed_ms: self.time_ms as u64,
        }
    }

    /// Drain the events accumulated by the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Allocate an id from a raw counter (same scheme as `next_entity_id`)
pub(crate) fn alloc_id(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_unique() {
        let mut state = ArenaState::new(7, PlayerArchetype::AzureFirstCry);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_new_match_is_clean() {
        let state = ArenaState::new(42, PlayerArchetype::RipplePropeller);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player.archetype, PlayerArchetype::RipplePropeller);
    }

    #[test]
    fn test_integrate_scales_by_delta() {
        let mut actor = Actor::new(1, Vec2::ZERO, 1, Capability::Bullet);
        actor.vel = Vec2::new(0.0, 3.0);
        // One 60 Hz frame moves exactly one velocity unit
        actor.integrate(1000.0 / 60.0);
        assert!((actor.pos.y - 3.0).abs() < 1e-4);
    }
}
