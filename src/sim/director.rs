//! Encounter director: the escalating spawn economy
//!
//! Points accrue continuously at a rate that compounds with match time. The
//! director runs a two-phase intent/commit cycle: it first commits *which*
//! archetype spawns next (a weighted draw), then materializes it once the
//! accrued points cover its cost. Cost pressure and time pressure both gate
//! the spawn rate, so "what's next" is decoupled from "when it appears".

use rand::Rng;
use rand_pcg::Pcg32;

use super::archetype::EnemyArchetype;
use crate::consts::*;

/// A committed-but-unpaid spawn decision. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnIntent {
    pub archetype: EnemyArchetype,
    pub cost: f32,
}

#[derive(Debug, Clone)]
pub struct Director {
    /// Base accrual rate; AmmoCarrier breakthroughs push this up
    pub base_points_per_second: f32,
    /// Current rate after time compounding
    pub points_per_second: f32,
    pub accumulated: f32,
    pub pending: Option<SpawnIntent>,
    elapsed_ms: f32,
}

impl Default for Director {
    fn default() -> Self {
        Self::new()
    }
}

impl Director {
    pub fn new() -> Self {
        Self {
            base_points_per_second: BASE_POINTS_PER_SECOND,
            points_per_second: BASE_POINTS_PER_SECOND,
            accumulated: 0.0,
            pending: None,
            elapsed_ms: 0.0,
        }
    }

    /// Accrue points and run the intent/commit cycle. Returns the archetype
    /// to materialize this tick, if its cost was just paid.
    pub fn tick(&mut self, dt_ms: f32, rng: &mut Pcg32) -> Option<EnemyArchetype> {
        self.elapsed_ms += dt_ms;
        let growth_steps = (self.elapsed_ms / RATE_GROWTH_INTERVAL_MS).floor();
        self.points_per_second = self.base_points_per_second * RATE_GROWTH.powf(growth_steps);
        self.accumulated += self.points_per_second * dt_ms / 1000.0;

        match self.pending {
            None => {
                let archetype = weighted_draw(rng);
                self.pending = Some(SpawnIntent {
                    archetype,
                    cost: archetype.stats().cost,
                });
                None
            }
            Some(intent) if self.accumulated >= intent.cost => {
                self.accumulated -= intent.cost;
                self.pending = None;
                log::debug!(
                    "commit {} (cost {:.1}, {:.2} pts left, {:.2} pts/s)",
                    intent.archetype.as_str(),
                    intent.cost,
                    self.accumulated,
                    self.points_per_second
                );
                Some(intent.archetype)
            }
            Some(_) => None,
        }
    }
}

/// Weighted archetype draw: uniform integer in [0, total); the first entry
/// whose cumulative weight exceeds the draw wins.
pub fn weighted_draw(rng: &mut Pcg32) -> EnemyArchetype {
    let total: u32 = EnemyArchetype::ALL.iter().map(|a| a.stats().weight).sum();
    let roll = rng.random_range(0..total);
    let mut cumulative = 0;
    for &archetype in &EnemyArchetype::ALL {
        cumulative += archetype.stats().weight;
        if roll < cumulative {
            return archetype;
        }
    }
    // Unreachable: cumulative reaches total
    EnemyArchetype::Vanguard
}
