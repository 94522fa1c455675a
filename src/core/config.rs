//! Engine timing knobs and persisted player settings.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// Timing configuration for an [`Engine`](super::engine::Engine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cinematic buffer between health reaching zero and GAME_OVER.
    pub game_over_delay_ms: u64,

    pub weather_duration_ms: u64,

    /// Chance per tick of rolling weather while the sky is clear.
    pub weather_chance: f64,

    pub ultimate_duration_ms: u64,

    pub season_length_days: i64,

    pub battle_history_cap: usize,

    /// Name shown for the player on leaderboards and brackets.
    pub player_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            weather_duration_ms: WEATHER_DURATION_MS,
            weather_chance: WEATHER_CHANCE_PER_TICK,
            ultimate_duration_ms: ULTIMATE_DURATION_MS,
            season_length_days: SEASON_LENGTH_DAYS,
            battle_history_cap: BATTLE_HISTORY_CAP,
            player_name: "You".to_string(),
        }
    }
}

impl EngineConfig {
    /// No weather rolls; useful for deterministic scripted runs.
    pub fn calm() -> Self {
        Self {
            weather_chance: 0.0,
            ..Default::default()
        }
    }
}

/// Presentation preferences, persisted under `settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0.0 - 1.0
    pub master_volume: f32,
    pub music_enabled: bool,
    pub sfx_enabled: bool,
    /// When off, shake requests are not emitted.
    pub haptics_enabled: bool,
    pub show_tutorial: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_enabled: true,
            sfx_enabled: true,
            haptics_enabled: true,
            show_tutorial: true,
        }
    }
}

impl Settings {
    pub fn set_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }
}
