//! Game settings and difficulty presets
//!
//! Persisted in LocalStorage on the web build; native hosts start from
//! defaults. Settings are read once per reset: the simulation itself never
//! looks at them.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CELL_SIZE_PX, DEFAULT_EXCLUSION_RADIUS, DEFAULT_OBSTACLE_DENSITY};
use crate::sim::SimConfig;

/// Difficulty presets; each maps to a speed factor that scales both the
/// tick rate and the food value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Fast,
    Fury,
}

impl Difficulty {
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Normal => 1.0,
            Difficulty::Fast => 1.12,
            Difficulty::Fury => 1.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Fast => "Fast",
            Difficulty::Fury => "Fury",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "fast" => Some(Difficulty::Fast),
            "fury" => Some(Difficulty::Fury),
            _ => None,
        }
    }
}

/// Gameplay settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Difficulty preset
    pub difficulty: Difficulty,
    /// Overrides the preset speed factor when set (any positive real)
    pub custom_speed_factor: Option<f32>,
    /// Pixels per grid cell; grid dimensions derive from the canvas size
    pub cell_size_px: u32,
    /// Fraction of cells turned into obstacle bushes at reset
    pub obstacle_density: f32,
    /// Manhattan radius around the start cell kept free of obstacles
    pub exclusion_radius: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            custom_speed_factor: None,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            obstacle_density: DEFAULT_OBSTACLE_DENSITY,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
        }
    }
}

impl Settings {
    /// Effective speed factor: a valid custom override wins over the preset.
    pub fn speed_factor(&self) -> f32 {
        self.custom_speed_factor
            .filter(|s| *s > 0.0)
            .unwrap_or_else(|| self.difficulty.speed_factor())
    }

    /// Grid dimensions for a canvas, whole cells only, never smaller than
    /// one cell each way.
    pub fn grid_dims(&self, canvas_width_px: u32, canvas_height_px: u32) -> (i32, i32) {
        let cell = self.cell_size_px.max(1);
        let cols = (canvas_width_px / cell).max(1) as i32;
        let rows = (canvas_height_px / cell).max(1) as i32;
        (cols, rows)
    }

    /// Simulation parameters for a run on the given canvas.
    pub fn sim_config(&self, canvas_width_px: u32, canvas_height_px: u32) -> SimConfig {
        let (cols, rows) = self.grid_dims(canvas_width_px, canvas_height_px);
        SimConfig {
            cols,
            rows,
            speed_factor: self.speed_factor(),
            obstacle_density: self.obstacle_density,
            exclusion_radius: self.exclusion_radius,
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bramble_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
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
    fn test_preset_speed_factors() {
        assert_eq!(Difficulty::Easy.speed_factor(), 0.9);
        assert_eq!(Difficulty::Normal.speed_factor(), 1.0);
        assert_eq!(Difficulty::Fast.speed_factor(), 1.12);
        assert_eq!(Difficulty::Fury.speed_factor(), 1.25);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("fury"), Some(Difficulty::Fury));
        assert_eq!(Difficulty::from_str("Normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_custom_speed_overrides_preset() {
        let mut settings = Settings::default();
        assert_eq!(settings.speed_factor(), 1.0);

        settings.custom_speed_factor = Some(1.5);
        assert_eq!(settings.speed_factor(), 1.5);

        // Nonsense overrides fall back to the preset.
        settings.custom_speed_factor = Some(0.0);
        assert_eq!(settings.speed_factor(), 1.0);
    }

    #[test]
    fn test_grid_dims_floor_division() {
        let settings = Settings::default(); // 20 px cells
        assert_eq!(settings.grid_dims(600, 400), (30, 20));
        assert_eq!(settings.grid_dims(610, 399), (30, 19));
        // Degenerate canvas still yields a playable 1x1 grid.
        assert_eq!(settings.grid_dims(5, 5), (1, 1));
    }

    #[test]
    fn test_sim_config_carries_settings() {
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Fury;
        settings.obstacle_density = 0.05;

        let config = settings.sim_config(600, 400);
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 20);
        assert_eq!(config.speed_factor, 1.25);
        assert_eq!(config.obstacle_density, 0.05);
    }
}
