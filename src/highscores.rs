//! Best-score persistence
//!
//! The simulation reports terminal events; this adapter owns the stored
//! best and the storage medium. Persisted to LocalStorage on the web build,
//! kept in memory on native.

use serde::{Deserialize, Serialize};

/// Best score recorded on this install
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bramble_snake_best_score";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Would this final score replace the stored best?
    pub fn beats(&self, final_score: u64) -> bool {
        final_score > self.value
    }

    /// Record a finished run. Returns true when the stored best improved;
    /// the caller decides whether to save.
    pub fn update(&mut self, final_score: u64) -> bool {
        if self.beats(final_score) {
            self.value = final_score;
            true
        } else {
            false
        }
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
                    log::info!("Loaded best score: {}", best.value);
                    return best;
                }
            }
        }

        log::info!("No stored best score, starting fresh");
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
                log::info!("Best score saved: {}", self.value);
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
