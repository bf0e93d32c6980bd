//! Best-score persistence
//!
//! A single scalar: read at archetype-select time (it gates the PulseShadow
//! unlock), written at match end if exceeded. Stored as JSON in LocalStorage
//! on the web; native builds keep it in memory only.

use serde::{Deserialize, Serialize};

use crate::sim::PlayerArchetype;

/// Best score achieved across matches
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "skystrike_best_score";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match result; returns true if it set a new best
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            self.save();
            return true;
        }
        false
    }

    /// Player archetypes currently unlocked by this best score
    pub fn unlocked(&self) -> Vec<PlayerArchetype> {
        PlayerArchetype::ALL
            .into_iter()
            .filter(|a| self.score >= a.unlock_score())
            .collect()
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", best.score);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved ({})", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_keeps_maximum() {
        let mut best = BestScore::new();
        assert!(best.submit(120));
        assert!(!best.submit(80));
        assert_eq!(best.score, 120);
        assert!(best.submit(130));
        assert_eq!(best.score, 130);
    }

    #[test]
    fn test_pulse_shadow_unlocks_at_500() {
        let mut best = BestScore::new();
        assert!(!best.unlocked().contains(&PlayerArchetype::PulseShadow));
        assert_eq!(best.unlocked().len(), 2);
        best.submit(500);
        assert!(best.unlocked().contains(&PlayerArchetype::PulseShadow));
    }

    #[test]
    fn test_round_trips_through_json() {
        let best = BestScore { score: 777 };
        let json = serde_json::to_string(&best).unwrap();
        let back: BestScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 777);
    }
}
