//! Run lifecycle state: game status, day/night, timers, night events, bosses.

use crate::combat::types::EnemyKind;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    MainMenu,
    Tutorial,
    Playing,
    Paused,
    GameOver,
    LevelClear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Rain,
    Fog,
    Storm,
    Blizzard,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Rain, Weather::Fog, Weather::Storm, Weather::Blizzard];
}

/// Modifier drawn once per nightfall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightEvent {
    #[default]
    None,
    BloodMoon,
    Swarm,
    Eclipse,
    TitanFall,
}

/// Ordered probability table; anything past the last threshold is `None`.
pub const NIGHT_EVENT_TABLE: [(NightEvent, f64); 4] = [
    (NightEvent::BloodMoon, 0.10),
    (NightEvent::Swarm, 0.15),
    (NightEvent::Eclipse, 0.10),
    (NightEvent::TitanFall, 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossState {
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    /// Absorbs hits before health does.
    pub armor: u32,
}

impl BossState {
    pub fn for_wave(kind: EnemyKind, wave: u32) -> Self {
        let health = BOSS_BASE_HEALTH + BOSS_HEALTH_PER_WAVE * wave;
        Self {
            kind,
            health,
            max_health: health,
            armor: BOSS_BASE_ARMOR + BOSS_ARMOR_PER_WAVE * wave,
        }
    }
}

/// In-memory run state. Reset on every new game, not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub status: GameStatus,
    pub time_of_day: TimeOfDay,
    pub level: u32,
    pub wave: u32,
    /// Seconds left in the current phase.
    pub timer: u32,
    pub night_event: NightEvent,
    pub weather: Option<Weather>,
    pub boss: Option<BossState>,
    pub score: u64,
    pub core_health: u32,
    /// Game over is pending behind the cinematic delay.
    pub transitioning: bool,
    /// Light shards earned during this run.
    pub run_shards: u64,
    pub nights_survived: u32,
    pub elapsed_seconds: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: GameStatus::MainMenu,
            time_of_day: TimeOfDay::Day,
            level: 1,
            wave: 1,
            timer: day_duration(1),
            night_event: NightEvent::None,
            weather: None,
            boss: None,
            score: 0,
            core_health: CORE_MAX_HEALTH,
            transitioning: false,
            run_shards: 0,
            nights_survived: 0,
            elapsed_seconds: 0,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gameplay mutations are accepted.
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Playing && !self.transitioning
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day == TimeOfDay::Night
    }
}

pub fn day_duration(wave: u32) -> u32 {
    DAY_BASE_SECONDS + wave * TIMER_WAVE_INCREMENT
}

pub fn night_duration(wave: u32) -> u32 {
    NIGHT_BASE_SECONDS + wave * TIMER_WAVE_INCREMENT
}

/// Something the tick changed that presentation cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    NightFell { event: NightEvent },
    LevelCleared { level: u32 },
    WeatherStarted(Weather),
    BossSpawned(EnemyKind),
}

/// All changes from one tick, committed together by `SessionState::apply`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPatch {
    pub timer: u32,
    pub time_of_day: Option<TimeOfDay>,
    pub status: Option<GameStatus>,
    pub level: Option<u32>,
    pub night_event: Option<NightEvent>,
    pub weather: Option<Weather>,
    /// `Some(None)` clears the boss.
    pub boss: Option<Option<BossState>>,
    pub nights_survived: Option<u32>,
    pub transitions: Vec<SessionTransition>,
}

/// High-score fields kept across launches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecords {
    pub last_wave: u32,
    pub best_score: u64,
    pub best_wave: u32,
    pub runs_played: u64,
}

impl SessionRecords {
    /// Fold a finished run in. Returns true if either best was beaten.
    pub fn record_run(&mut self, score: u64, wave: u32) -> bool {
        self.runs_played += 1;
        self.last_wave = wave;
        let mut improved = false;
        if score > self.best_score {
            self.best_score = score;
            improved = true;
        }
        if wave > self.best_wave {
            self.best_wave = wave;
            improved = true;
        }
        improved
    }
}
