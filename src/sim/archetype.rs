//! Enemy and player archetypes with their fixed stat tables
//!
//! Most archetypes are pure data: a stat row consumed by the generic enemy
//! update. The handful with bespoke per-tick logic (DroneBot orbit,
//! BeamveilGuardian beam, AmmoCarrier blast, PulseShadow lock-on) dispatch on
//! the enum in `enemy.rs` / `player.rs`.

use serde::{Deserialize, Serialize};

/// The seven enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Vanguard,
    MeteorFighter,
    ArcShooter,
    BeamveilGuardian,
    UpShooter,
    AmmoCarrier,
    DroneBot,
}

/// Constant stat row for one enemy archetype
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub health: i32,
    /// Downward drift in px/frame
    pub move_speed: f32,
    pub shoot_delay_ms: f32,
    /// Sign encodes firing direction (negative = upward)
    pub bullet_speed: f32,
    /// Per-frame velocity gain on fired bullets
    pub bullet_accel: f32,
    /// Awarded on a damage-death; unscored archetypes carry 0
    pub score: u32,
    /// Weighted-draw weight in the director's spawn table
    pub weight: u32,
    /// Point cost the director pays to materialize one
    pub cost: f32,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 7] = [
        EnemyArchetype::Vanguard,
        EnemyArchetype::MeteorFighter,
        EnemyArchetype::ArcShooter,
        EnemyArchetype::BeamveilGuardian,
        EnemyArchetype::UpShooter,
        EnemyArchetype::AmmoCarrier,
        EnemyArchetype::DroneBot,
    ];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyArchetype::Vanguard => EnemyStats {
                health: 1,
                move_speed: 2.0,
                shoot_delay_ms: 1000.0,
                bullet_speed: 3.0,
                bullet_accel: 0.0,
                score: 10,
                weight: 8,
                cost: 1.0,
            },
            EnemyArchetype::MeteorFighter => EnemyStats {
                health: 2,
                move_speed: 2.0,
                shoot_delay_ms: 1200.0,
                bullet_speed: 2.0,
                bullet_accel: 0.1,
                score: 20,
                weight: 3,
                cost: 2.0,
            },
            EnemyArchetype::ArcShooter => EnemyStats {
                health: 4,
                move_speed: 2.0,
                shoot_delay_ms: 1200.0,
                bullet_speed: 4.0,
                bullet_accel: 0.0,
                score: 30,
                weight: 2,
                cost: 4.0,
            },
            EnemyArchetype::BeamveilGuardian => EnemyStats {
                health: 2,
                move_speed: 1.5,
                shoot_delay_ms: 1200.0,
                bullet_speed: 3.0,
                bullet_accel: 0.0,
                score: 40,
                weight: 3,
                cost: 3.0,
            },
            EnemyArchetype::UpShooter => EnemyStats {
                health: 1,
                move_speed: 2.0,
                shoot_delay_ms: 1000.0,
                bullet_speed: -4.0,
                bullet_accel: 0.0,
                score: 0,
                weight: 4,
                cost: 1.0,
            },
            EnemyArchetype::AmmoCarrier => EnemyStats {
                health: 3,
                move_speed: 1.0,
                shoot_delay_ms: 0.0, // never fires
                bullet_speed: 0.0,
                bullet_accel: 0.0,
                score: 0,
                weight: 2,
                cost: 2.0,
            },
            EnemyArchetype::DroneBot => EnemyStats {
                health: 2,
                move_speed: 1.5,
                shoot_delay_ms: 3000.0,
                bullet_speed: 4.0,
                bullet_accel: 0.0,
                score: 0,
                weight: 4,
                cost: 1.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyArchetype::Vanguard => "vanguard",
            EnemyArchetype::MeteorFighter => "meteorfighter",
            EnemyArchetype::ArcShooter => "arcshooter",
            EnemyArchetype::BeamveilGuardian => "beamveilguardian",
            EnemyArchetype::UpShooter => "upshooter",
            EnemyArchetype::AmmoCarrier => "ammocarrier",
            EnemyArchetype::DroneBot => "dronebot",
        }
    }
}

/// Player craft archetypes, chosen once at match start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerArchetype {
    /// Balanced: direct fire, multiplier scales speed and fire rate
    #[default]
    AzureFirstCry,
    /// High inertia: acceleration/deceleration integration instead of
    /// direct velocity control
    RipplePropeller,
    /// No direct fire: lock-on guide line launching homing missiles
    PulseShadow,
}

/// Constant stat row for one player archetype
#[derive(Debug, Clone, Copy)]
pub struct PlayerStats {
    pub move_speed: f32,
    pub shoot_delay_ms: f32,
    pub bullet_speed: f32,
    /// Inertia tuning, only meaningful for RipplePropeller
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_inertia: f32,
    /// Lock-on hold time, only meaningful for PulseShadow
    pub lock_duration_ms: f32,
}

impl PlayerArchetype {
    pub const ALL: [PlayerArchetype; 3] = [
        PlayerArchetype::AzureFirstCry,
        PlayerArchetype::RipplePropeller,
        PlayerArchetype::PulseShadow,
    ];

    /// Best score required before the archetype appears on the select screen
    pub fn unlock_score(self) -> u64 {
        match self {
            PlayerArchetype::PulseShadow => 500,
            _ => 0,
        }
    }

    pub fn stats(self) -> PlayerStats {
        match self {
            PlayerArchetype::AzureFirstCry => PlayerStats {
                move_speed: 5.0,
                shoot_delay_ms: 600.0,
                bullet_speed: -5.0,
                acceleration: 0.0,
                deceleration: 0.0,
                max_inertia: 0.0,
                lock_duration_ms: 0.0,
            },
            PlayerArchetype::RipplePropeller => PlayerStats {
                move_speed: 3.0,
                shoot_delay_ms: 600.0,
                bullet_speed: -7.0,
                acceleration: 0.1,
                deceleration: 0.3,
                max_inertia: 10.0,
                lock_duration_ms: 0.0,
            },
            PlayerArchetype::PulseShadow => PlayerStats {
                move_speed: 5.0,
                shoot_delay_ms: 600.0,
                bullet_speed: -5.0,
                acceleration: 0.0,
                deceleration: 0.0,
                max_inertia: 0.0,
                lock_duration_ms: 300.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerArchetype::AzureFirstCry => "azurefirstcry",
            PlayerArchetype::RipplePropeller => "ripplepropeller",
            PlayerArchetype::PulseShadow => "pulseshadow",
        }
    }
}

/// Score-driven stat multiplier: 1x at score 0 rising to a 2x cap at 250.
/// Applied to move speed and inversely to shoot/lock delays.
#[inline]
pub fn stat_multiplier(score: u32) -> f32 {
    1.0 + (score as f32 / crate::consts::STAT_CAP_SCORE).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_endpoints() {
        assert_eq!(stat_multiplier(0), 1.0);
        assert_eq!(stat_multiplier(250), 2.0);
        assert_eq!(stat_multiplier(10_000), 2.0);
    }

    #[test]
    fn test_unscored_archetypes() {
        for a in [
            EnemyArchetype::UpShooter,
            EnemyArchetype::AmmoCarrier,
            EnemyArchetype::DroneBot,
        ] {
            assert_eq!(a.stats().score, 0);
        }
    }

    #[test]
    fn test_pulse_shadow_locked_until_500() {
        assert_eq!(PlayerArchetype::PulseShadow.unlock_score(), 500);
        assert_eq!(PlayerArchetype::AzureFirstCry.unlock_score(), 0);
    }

    proptest! {
        #[test]
        fn multiplier_monotonic_and_capped(a in 0u32..500, b in 0u32..500) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(stat_multiplier(lo) <= stat_multiplier(hi));
            prop_assert!(stat_multiplier(hi) <= 2.0);
            prop_assert!(stat_multiplier(lo) >= 1.0);
        }
    }
}
