//! Per-tick orchestration
//!
//! The arena coordinator's loop, driven by an external tick callback with
//! the elapsed delta. Order within a tick: director accrual/spawn, player
//! update, enemy updates, bullet flight, contact resolution, compaction.
//! Contact events are delivered synchronously within the tick, before the
//! next tick's movement integration.

use rand::Rng;

use super::archetype::EnemyArchetype;
use super::collision::{resolve_contacts, ContactEvent};
use super::enemy::carrier_blast;
use super::player::{GamepadInput, KeyInput, PointerInput};
use super::projectile::Projectile;
use super::state::{ArenaState, DeathCause, GameEvent};
use crate::consts::*;

/// Polled input state for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub keys: KeyInput,
    pub pointer: Option<PointerInput>,
    pub gamepad: Option<GamepadInput>,
}

/// Advance the match by one tick of `dt_ms` elapsed time.
///
/// `contacts` is this tick's batch of contact-start events from the physics
/// collaborator. A no-op once the game-over latch is set.
pub fn tick(state: &mut ArenaState, input: &TickInput, contacts: &[ContactEvent], dt_ms: f32) {
    if state.game_over {
        return;
    }

    state.events.clear();
    state.time_ms += dt_ms;
    let now = state.time_ms;

    // Shield grant: 15 s of match time without a breakthrough
    state.shield_timer_ms += dt_ms;
    if state.shield_timer_ms >= SHIELD_GRANT_MS {
        state.player.add_shield();
        state.events.push(GameEvent::ShieldGranted);
        state.shield_timer_ms = 0.0;
    }

    // Spawn economy
    if let Some(archetype) = state.director.tick(dt_ms, &mut state.rng) {
        let x = state
            .rng
            .random_range((state.width * 0.1)..=(state.width * 0.9));
        state.spawn_enemy(archetype, x);
    }

    // Player: input fusion, movement, fire/lock-on
    {
        let ArenaState {
            player,
            enemies,
            events,
            next_id,
            width,
            height,
            ..
        } = state;
        player.update(input, now, dt_ms, *width, *height, enemies, next_id, events);
    }

    // Enemies: movement, fire, beam, breakthrough
    let mut fired: Vec<Projectile> = Vec::new();
    {
        let ArenaState {
            player,
            enemies,
            events,
            next_id,
            director,
            shield_timer_ms,
            height,
            ..
        } = state;
        for enemy in enemies.iter_mut() {
            let crossed = enemy.update(
                now,
                dt_ms,
                *height,
                next_id,
                &mut fired,
                &mut player.bullets,
                events,
            );
            if crossed {
                if enemy.archetype == EnemyArchetype::AmmoCarrier {
                    // Economy acceleration instead of a breakthrough
                    director.base_points_per_second += CARRIER_BREAKTHROUGH_RATE_BONUS;
                } else {
                    events.push(GameEvent::Breakthrough {
                        archetype: enemy.archetype,
                    });
                    *shield_timer_ms = 0.0;
                }
            }
        }
    }
    state.enemy_bullets.extend(fired);

    // Bullet flight
    {
        let ArenaState {
            player,
            enemies,
            width,
            height,
            ..
        } = state;
        for bullet in player.bullets.iter_mut() {
            if bullet.homing.is_some() {
                bullet.update_homing(enemies, dt_ms, *width, *height);
            } else {
                bullet.update(dt_ms, *width, *height);
            }
        }
    }
    for bullet in state.enemy_bullets.iter_mut() {
        bullet.update(dt_ms, state.width, state.height);
    }

    resolve_contacts(state, contacts);

    compact(state);
}

/// End-of-tick compaction: drop spent bullets, process enemy deaths exactly
/// once (scoring damage-deaths, cascading AmmoCarrier blasts), and freeze
/// everything if the player was destroyed this tick.
fn compact(state: &mut ArenaState) {
    state.player.bullets.retain(|b| b.alive());
    state.enemy_bullets.retain(|b| b.alive());

    if state.game_over {
        // Mass cleanup with removal notifications suppressed by the latch
        state.enemies.clear();
        state.enemy_bullets.clear();
        state.player.bullets.clear();
        return;
    }

    let mut scored = false;
    // One at a time: a removed AmmoCarrier marks further deaths
    while let Some(idx) = state.enemies.iter().position(|e| e.death.is_some()) {
        let enemy = state.enemies.swap_remove(idx);
        let Some(cause) = enemy.death else { continue };
        match cause {
            DeathCause::Damage => {
                let points = enemy.archetype.stats().score;
                if points > 0 && enemy.actor.health <= 0 {
                    state.score += points;
                    scored = true;
                }
                state.events.push(GameEvent::EnemyDestroyed {
                    archetype: enemy.archetype,
                    pos: enemy.actor.pos,
                });
                if enemy.archetype == EnemyArchetype::AmmoCarrier {
                    carrier_blast(enemy.actor.pos, &mut state.enemies);
                }
            }
            DeathCause::AreaBlast => {
                state.events.push(GameEvent::EnemyDestroyed {
                    archetype: enemy.archetype,
                    pos: enemy.actor.pos,
                });
                if enemy.archetype == EnemyArchetype::AmmoCarrier {
                    carrier_blast(enemy.actor.pos, &mut state.enemies);
                }
            }
            // Breakthrough bookkeeping already ran during the update pass
            DeathCause::Breakthrough => {}
        }
    }

    if scored {
        state.player.update_stats(state.score);
        log::debug!("score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::archetype::PlayerArchetype;
    use crate::sim::enemy::Enemy;
    use crate::sim::state::Side;
    use glam::Vec2;

    fn arena() -> ArenaState {
        ArenaState::new(21, PlayerArchetype::AzureFirstCry)
    }

    fn place_enemy(state: &mut ArenaState, archetype: EnemyArchetype, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::spawn(id, archetype, pos));
        id
    }

    #[test]
    fn test_vanguard_kill_scores_ten() {
        let mut state = arena();
        let enemy = place_enemy(&mut state, EnemyArchetype::Vanguard, Vec2::new(300.0, 100.0));
        let bullet = state.next_entity_id();
        state.player.bullets.push(Projectile::new(
            bullet,
            Side::Player,
            Vec2::new(300.0, 102.0),
            -5.0,
            0.0,
        ));
        // Suppress the player's own fire so the bullet count stays known
        state.player.emitter.last_shot_ms = f32::MAX;

        let contact = ContactEvent { body_a: bullet, body_b: enemy };
        tick(&mut state, &TickInput::default(), &[contact], FRAME_MS);

        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert!(state.player.bullets.is_empty());
        // Stat multiplier followed the score
        assert!(state.player.move_speed > 5.0);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDestroyed { .. })));
    }

    #[test]
    fn test_carrier_blast_removes_neighbors_unscored() {
        let mut state = arena();
        let carrier = place_enemy(&mut state, EnemyArchetype::AmmoCarrier, Vec2::new(300.0, 300.0));
        place_enemy(&mut state, EnemyArchetype::Vanguard, Vec2::new(350.0, 300.0));
        place_enemy(&mut state, EnemyArchetype::MeteorFighter, Vec2::new(300.0, 370.0));
        // A second carrier in range: the blast must cascade through it
        place_enemy(&mut state, EnemyArchetype::AmmoCarrier, Vec2::new(220.0, 300.0));
        // Far enemy outside both blast radii
        let far = place_enemy(&mut state, EnemyArchetype::Vanguard, Vec2::new(700.0, 300.0));

        for enemy in state.enemies.iter_mut().filter(|e| e.actor.id == carrier) {
            while !enemy.take_damage() {}
        }
        tick(&mut state, &TickInput::default(), &[], FRAME_MS);

        assert_eq!(state.score, 0, "area kills never score");
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].actor.id, far);
    }

    #[test]
    fn test_breakthrough_resets_shield_timer_without_score() {
        let mut state = arena();
        place_enemy(&mut state, EnemyArchetype::Vanguard, Vec2::new(300.0, 599.5));
        state.shield_timer_ms = 10_000.0;

        tick(&mut state, &TickInput::default(), &[], FRAME_MS);

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.shield_timer_ms, 0.0);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Breakthrough { .. })));
    }

    #[test]
    fn test_carrier_breakthrough_boosts_economy() {
        let mut state = arena();
        place_enemy(&mut state, EnemyArchetype::AmmoCarrier, Vec2::new(300.0, 599.9));
        let base = state.director.base_points_per_second;

        tick(&mut state, &TickInput::default(), &[], FRAME_MS);

        assert!(state.enemies.is_empty());
        assert!((state.director.base_points_per_second - base - 0.2).abs() < 1e-5);
        // No breakthrough event, no shield timer reset
        assert!(!state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Breakthrough { .. })));
    }

    #[test]
    fn test_shield_granted_after_fifteen_seconds() {
        let mut state = arena();
        assert!(!state.player.shield);
        tick(&mut state, &TickInput::default(), &[], 15_000.0);
        assert!(state.player.shield);
        assert!(state.events.contains(&GameEvent::ShieldGranted));
        assert_eq!(state.shield_timer_ms, 0.0);
    }

    #[test]
    fn test_game_over_freezes_match() {
        let mut state = arena();
        let bullet = state.next_entity_id();
        state.enemy_bullets.push(Projectile::new(
            bullet,
            Side::Enemy,
            state.player.actor.pos,
            3.0,
            0.0,
        ));
        let player = state.player.actor.id;
        let contact = ContactEvent { body_a: bullet, body_b: player };
        tick(&mut state, &TickInput::default(), &[contact], FRAME_MS);

        assert!(state.game_over);
        assert!(state.enemies.is_empty() && state.enemy_bullets.is_empty());
        let report = state
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::PlayerDestroyed(r) => Some(r.clone()),
                _ => None,
            })
            .expect("match report emitted");
        assert_eq!(report.score, 0);
        assert_eq!(report.player_archetype, PlayerArchetype::AzureFirstCry);

        // Latched: further ticks mutate nothing
        let time = state.time_ms;
        tick(&mut state, &TickInput::default(), &[], FRAME_MS);
        assert_eq!(state.time_ms, time);
    }

    #[test]
    fn test_economy_smoke_run() {
        let mut state = arena();
        // One minute of ticks with no contacts: the director must have
        // produced spawns, and shooters must have produced bullets
        for _ in 0..(60 * 60) {
            tick(&mut state, &TickInput::default(), &[], FRAME_MS);
        }
        assert!(!state.game_over);
        let total_spawned = state.next_id;
        assert!(total_spawned > 20, "director never spawned");
        assert!(
            !state.enemies.is_empty() || !state.enemy_bullets.is_empty(),
            "arena stayed empty for a full minute"
        );
    }
}
