//! Contact resolution: mapping broad-phase pairs to damage
//!
//! The external physics collaborator reports contact-start events as pairs
//! of body identifiers (actor ids). Each pair is classified by capability
//! tags and looked up in a fixed symmetric table of valid pairings; anything
//! else (bullet vs bullet, enemy vs enemy) is ignored. For a matched pair the
//! non-player side takes damage first, then the player side. If the first
//! call latched game over, the player side is skipped so a just-destroyed
//! player cannot take a second spurious hit within the same batch.

use super::player::PlayerHit;
use super::state::{ArenaState, GameEvent, Side};

/// A contact-start event between two registered bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub body_a: u32,
    pub body_b: u32,
}

/// Fine-grained tag used for pair classification: bullets carry their
/// owning side, unlike the coarse capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTag {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

fn tag_of(state: &ArenaState, id: u32) -> Option<ContactTag> {
    if state.player.alive() && state.player.actor.id == id {
        return Some(ContactTag::Player);
    }
    if state.enemies.iter().any(|e| e.alive() && e.actor.id == id) {
        return Some(ContactTag::Enemy);
    }
    let bullet_tag = |side: Side| match side {
        Side::Player => ContactTag::PlayerBullet,
        Side::Enemy => ContactTag::EnemyBullet,
    };
    if let Some(b) = state.player.bullets.iter().find(|b| b.alive() && b.actor.id == id) {
        return Some(bullet_tag(b.side));
    }
    if let Some(b) = state.enemy_bullets.iter().find(|b| b.alive() && b.actor.id == id) {
        return Some(bullet_tag(b.side));
    }
    None
}

/// The fixed pairing table. Returns (non-player side, player side) ids for
/// a valid pair, in damage order; `None` for ignored pairs.
fn classify(a: (u32, ContactTag), b: (u32, ContactTag)) -> Option<(u32, u32)> {
    use ContactTag::*;
    match (a.1, b.1) {
        (PlayerBullet, Enemy) => Some((b.0, a.0)),
        (Enemy, PlayerBullet) => Some((a.0, b.0)),
        (Player, Enemy) => Some((b.0, a.0)),
        (Enemy, Player) => Some((a.0, b.0)),
        (Player, EnemyBullet) => Some((b.0, a.0)),
        (EnemyBullet, Player) => Some((a.0, b.0)),
        _ => None,
    }
}

fn apply_damage(state: &mut ArenaState, id: u32, tag: ContactTag) {
    match tag {
        ContactTag::Enemy => {
            if let Some(enemy) = state
                .enemies
                .iter_mut()
                .find(|e| e.alive() && e.actor.id == id)
            {
                enemy.take_damage();
            }
        }
        ContactTag::PlayerBullet => {
            if let Some(bullet) = state
                .player
                .bullets
                .iter_mut()
                .find(|b| b.actor.id == id)
            {
                bullet.destroy();
            }
        }
        ContactTag::EnemyBullet => {
            if let Some(bullet) = state
                .enemy_bullets
                .iter_mut()
                .find(|b| b.actor.id == id)
            {
                bullet.destroy();
            }
        }
        ContactTag::Player => match state.player.take_damage() {
            Some(PlayerHit::ShieldBroken) => {
                state.events.push(GameEvent::ShieldBroken);
            }
            Some(PlayerHit::Destroyed) => {
                let report = state.report();
                log::info!(
                    "player destroyed: score {}, {} ms",
                    report.score,
                    report.elapsed_ms
                );
                state.events.push(GameEvent::PlayerDestroyed(report));
                state.game_over = true;
            }
            None => {}
        },
    }
}

/// Resolve one batch of contact-start events, delivered synchronously
/// within the current tick
pub fn resolve_contacts(state: &mut ArenaState, contacts: &[ContactEvent]) {
    for contact in contacts {
        if state.game_over {
            return;
        }
        let Some(tag_a) = tag_of(state, contact.body_a) else {
            continue;
        };
        let Some(tag_b) = tag_of(state, contact.body_b) else {
            continue;
        };
        let Some((first, second)) = classify((contact.body_a, tag_a), (contact.body_b, tag_b))
        else {
            continue;
        };

        // Non-player side first; re-derive the second tag so a pair like
        // (player_bullet, enemy) damages both bullet and enemy.
        let first_tag = if first == contact.body_a { tag_a } else { tag_b };
        let second_tag = if second == contact.body_a { tag_a } else { tag_b };
        apply_damage(state, first, first_tag);
        if !state.game_over {
            apply_damage(state, second, second_tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::archetype::{EnemyArchetype, PlayerArchetype};
    use crate::sim::projectile::Projectile;
    use crate::sim::state::{DeathCause, Side};
    use glam::Vec2;

    fn arena() -> ArenaState {
        ArenaState::new(11, PlayerArchetype::AzureFirstCry)
    }

    fn add_enemy(state: &mut ArenaState, archetype: EnemyArchetype) -> u32 {
        state.spawn_enemy(archetype, 300.0);
        state.enemies.last().unwrap().actor.id
    }

    fn add_player_bullet(state: &mut ArenaState) -> u32 {
        let id = state.next_entity_id();
        let b = Projectile::new(id, Side::Player, Vec2::new(300.0, 100.0), -5.0, 0.0);
        state.player.bullets.push(b);
        id
    }

    fn add_enemy_bullet(state: &mut ArenaState) -> u32 {
        let id = state.next_entity_id();
        let b = Projectile::new(id, Side::Enemy, Vec2::new(300.0, 400.0), 3.0, 0.0);
        state.enemy_bullets.push(b);
        id
    }

    #[test]
    fn test_bullet_vs_enemy_both_orders() {
        for swap in [false, true] {
            let mut state = arena();
            let enemy = add_enemy(&mut state, EnemyArchetype::Vanguard);
            let bullet = add_player_bullet(&mut state);
            let contact = if swap {
                ContactEvent { body_a: enemy, body_b: bullet }
            } else {
                ContactEvent { body_a: bullet, body_b: enemy }
            };
            resolve_contacts(&mut state, &[contact]);
            assert_eq!(state.enemies[0].death, Some(DeathCause::Damage));
            assert!(!state.player.bullets[0].alive());
        }
    }

    #[test]
    fn test_ignored_pairs() {
        let mut state = arena();
        let e1 = add_enemy(&mut state, EnemyArchetype::Vanguard);
        let e2 = add_enemy(&mut state, EnemyArchetype::Vanguard);
        let pb = add_player_bullet(&mut state);
        let eb = add_enemy_bullet(&mut state);
        resolve_contacts(
            &mut state,
            &[
                ContactEvent { body_a: e1, body_b: e2 },
                ContactEvent { body_a: pb, body_b: eb },
                ContactEvent { body_a: eb, body_b: e1 },
            ],
        );
        assert!(state.enemies.iter().all(|e| e.alive()));
        assert!(state.player.bullets[0].alive());
        assert!(state.enemy_bullets[0].alive());
    }

    #[test]
    fn test_player_vs_enemy_damages_both() {
        let mut state = arena();
        let enemy = add_enemy(&mut state, EnemyArchetype::MeteorFighter);
        let player = state.player.actor.id;
        resolve_contacts(&mut state, &[ContactEvent { body_a: player, body_b: enemy }]);
        assert_eq!(state.enemies[0].actor.health, 1);
        assert!(!state.player.alive());
        assert!(state.game_over);
    }

    #[test]
    fn test_shield_absorbs_contact() {
        let mut state = arena();
        let eb = add_enemy_bullet(&mut state);
        let player = state.player.actor.id;
        state.player.add_shield();
        resolve_contacts(&mut state, &[ContactEvent { body_a: eb, body_b: player }]);
        assert!(state.player.alive());
        assert!(!state.player.shield);
        // The bullet that broke the shield is spent
        assert!(!state.enemy_bullets[0].alive());
        assert!(state.events.contains(&GameEvent::ShieldBroken));
    }

    #[test]
    fn test_no_second_hit_after_game_over() {
        let mut state = arena();
        let b1 = add_enemy_bullet(&mut state);
        let b2 = add_enemy_bullet(&mut state);
        let player = state.player.actor.id;
        // Two contacts in one batch: the second must not damage again
        resolve_contacts(
            &mut state,
            &[
                ContactEvent { body_a: b1, body_b: player },
                ContactEvent { body_a: b2, body_b: player },
            ],
        );
        assert!(state.game_over);
        let destroyed = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDestroyed(_)))
            .count();
        assert_eq!(destroyed, 1);
        // Second bullet was never consumed
        assert!(state.enemy_bullets[1].alive());
    }

    #[test]
    fn test_stale_body_id_ignored() {
        let mut state = arena();
        let enemy = add_enemy(&mut state, EnemyArchetype::Vanguard);
        resolve_contacts(&mut state, &[ContactEvent { body_a: 9999, body_b: enemy }]);
        assert!(state.enemies[0].alive());
    }
}
