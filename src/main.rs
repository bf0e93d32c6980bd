//! Sky Strike entry point
//!
//! The native binary runs a headless demo match: it plays the role of the
//! external collaborators (a circle-overlap broad-phase standing in for the
//! physics system, a scripted input source) and drives the simulation until
//! the player is destroyed, logging events along the way.

use std::collections::HashSet;

use glam::Vec2;
use skystrike::sim::{
    tick, ArenaState, ContactEvent, GameEvent, KeyInput, PlayerArchetype, TickInput,
};
use skystrike::BestScore;

/// Collision radii for the demo broad-phase
const CRAFT_RADIUS: f32 = 16.0;
const BULLET_RADIUS: f32 = 4.0;

/// Circle-overlap broad-phase stand-in: reports contact-start events, i.e.
/// pairs that overlap now but did not overlap last tick.
fn broad_phase(state: &ArenaState, previous: &mut HashSet<(u32, u32)>) -> Vec<ContactEvent> {
    let mut current = HashSet::new();
    let mut contacts = Vec::new();

    let mut check = |a_id: u32, a_pos: Vec2, a_r: f32, b_id: u32, b_pos: Vec2, b_r: f32| {
        let key = (a_id.min(b_id), a_id.max(b_id));
        let touching = (a_pos - b_pos).length_squared() <= (a_r + b_r) * (a_r + b_r);
        if touching {
            if !previous.contains(&key) {
                contacts.push(ContactEvent {
                    body_a: a_id,
                    body_b: b_id,
                });
            }
            current.insert(key);
        }
    };

    let player = (state.player.actor.id, state.player.actor.pos);
    for enemy in &state.enemies {
        check(
            player.0,
            player.1,
            CRAFT_RADIUS,
            enemy.actor.id,
            enemy.actor.pos,
            CRAFT_RADIUS,
        );
        for bullet in &state.player.bullets {
            check(
                bullet.actor.id,
                bullet.actor.pos,
                BULLET_RADIUS,
                enemy.actor.id,
                enemy.actor.pos,
                CRAFT_RADIUS,
            );
        }
    }
    for bullet in &state.enemy_bullets {
        check(
            player.0,
            player.1,
            CRAFT_RADIUS,
            bullet.actor.id,
            bullet.actor.pos,
            BULLET_RADIUS,
        );
    }

    *previous = current;
    contacts
}

/// Scripted input: sweep left and right across the arena
fn demo_input(time_ms: f32) -> TickInput {
    let phase = (time_ms / 4000.0) as u32 % 2 == 0;
    TickInput {
        keys: KeyInput {
            left: !phase,
            right: phase,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Strike (headless demo) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut best = BestScore::load();
    let mut state = ArenaState::new(seed, PlayerArchetype::AzureFirstCry);
    log::info!("Match started with seed {seed}");

    let dt_ms = 1000.0 / 60.0;
    let time_cap_ms = 10.0 * 60.0 * 1000.0;
    let mut overlaps = HashSet::new();

    while !state.game_over && state.time_ms < time_cap_ms {
        let contacts = broad_phase(&state, &mut overlaps);
        let input = demo_input(state.time_ms);
        tick(&mut state, &input, &contacts, dt_ms);

        for event in state.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { archetype, .. } => {
                    log::info!("destroyed {} (score {})", archetype.as_str(), state.score);
                }
                GameEvent::Breakthrough { archetype } => {
                    log::info!("breakthrough by {}", archetype.as_str());
                }
                GameEvent::ShieldGranted => log::info!("shield up"),
                GameEvent::ShieldBroken => log::info!("shield down"),
                GameEvent::PlayerDestroyed(report) => {
                    println!(
                        "Game over: score {} as {} after {:.1} s",
                        report.score,
                        report.player_archetype.as_str(),
                        report.elapsed_ms as f64 / 1000.0
                    );
                    if best.submit(report.score as u64) {
                        println!("New best score: {}", best.score);
                    }
                }
                _ => {}
            }
        }
    }

    if !state.game_over {
        log::info!("demo time cap reached with score {}", state.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven through the library crate by the web host
}
