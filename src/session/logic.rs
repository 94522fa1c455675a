//! Day/night state machine, night-event draw, boss and core damage.

use super::types::*;
use crate::combat::types::EnemyKind;
use crate::core::constants::*;
use rand::Rng;

/// Pick the night event for `wave` from one uniform `roll` in `[0, 1)`.
///
/// Below the threshold wave the result is always `NightEvent::None`.
pub fn draw_night_event(wave: u32, roll: f64) -> NightEvent {
    if wave < NIGHT_EVENT_MIN_WAVE {
        return NightEvent::None;
    }
    let mut cumulative = 0.0;
    for (event, probability) in NIGHT_EVENT_TABLE {
        cumulative += probability;
        if roll < cumulative {
            return event;
        }
    }
    NightEvent::None
}

/// Compute the one-second tick as a single patch.
///
/// Returns `None` when the session is not live.
pub fn plan_tick<R: Rng>(session: &SessionState, weather_chance: f64, rng: &mut R) -> Option<SessionPatch> {
    if !session.is_live() {
        return None;
    }
    let mut patch = SessionPatch {
        timer: session.timer.saturating_sub(1),
        ..Default::default()
    };

    if session.weather.is_none() && rng.gen::<f64>() < weather_chance {
        let weather = Weather::ALL[rng.gen_range(0..Weather::ALL.len())];
        patch.weather = Some(weather);
        patch.transitions.push(SessionTransition::WeatherStarted(weather));
    }

    if patch.timer > 0 {
        return Some(patch);
    }

    match session.time_of_day {
        TimeOfDay::Day => {
            let event = if session.wave >= NIGHT_EVENT_MIN_WAVE {
                draw_night_event(session.wave, rng.gen::<f64>())
            } else {
                NightEvent::None
            };
            patch.time_of_day = Some(TimeOfDay::Night);
            patch.timer = night_duration(session.wave);
            patch.night_event = Some(event);
            patch.transitions.push(SessionTransition::NightFell { event });
            if event == NightEvent::TitanFall {
                patch.boss = Some(Some(BossState::for_wave(EnemyKind::Titan, session.wave)));
                patch
                    .transitions
                    .push(SessionTransition::BossSpawned(EnemyKind::Titan));
            }
        }
        TimeOfDay::Night => {
            let level = session.level + 1;
            patch.status = Some(GameStatus::LevelClear);
            patch.level = Some(level);
            patch.timer = day_duration(session.wave + 1);
            patch.night_event = Some(NightEvent::None);
            patch.boss = Some(None);
            patch.nights_survived = Some(session.nights_survived + 1);
            patch.transitions.push(SessionTransition::LevelCleared { level });
        }
    }
    Some(patch)
}

impl SessionState {
    /// Commit a planned patch in one step.
    pub fn apply(&mut self, patch: &SessionPatch) {
        self.timer = patch.timer;
        self.elapsed_seconds += 1;
        if let Some(time_of_day) = patch.time_of_day {
            self.time_of_day = time_of_day;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(level) = patch.level {
            self.level = self.level.max(level);
        }
        if let Some(event) = patch.night_event {
            self.night_event = event;
        }
        if let Some(weather) = patch.weather {
            self.weather = Some(weather);
        }
        if let Some(boss) = patch.boss {
            self.boss = boss;
        }
        if let Some(nights) = patch.nights_survived {
            self.nights_survived = nights;
        }
    }
}

/// Reset run state and start playing at `wave`.
pub fn start_run(session: &mut SessionState, wave: u32) {
    *session = SessionState {
        status: GameStatus::Playing,
        wave,
        timer: day_duration(wave),
        ..SessionState::default()
    };
}

pub fn start_tutorial(session: &mut SessionState) -> bool {
    if session.status != GameStatus::MainMenu {
        return false;
    }
    session.status = GameStatus::Tutorial;
    true
}

/// PLAYING <-> PAUSED. Refused during the game-over cinematic.
pub fn toggle_pause(session: &mut SessionState) -> bool {
    if session.transitioning {
        return false;
    }
    match session.status {
        GameStatus::Playing => session.status = GameStatus::Paused,
        GameStatus::Paused => session.status = GameStatus::Playing,
        _ => return false,
    }
    true
}

/// LEVEL_CLEAR -> PLAYING at dawn of the next wave.
pub fn next_level(session: &mut SessionState) -> bool {
    if session.status != GameStatus::LevelClear {
        return false;
    }
    session.wave += 1;
    session.status = GameStatus::Playing;
    session.time_of_day = TimeOfDay::Day;
    session.timer = day_duration(session.wave);
    session.night_event = NightEvent::None;
    session.boss = None;
    true
}

pub fn return_to_menu(session: &mut SessionState) -> bool {
    if session.transitioning {
        return false;
    }
    match session.status {
        GameStatus::GameOver | GameStatus::Paused | GameStatus::LevelClear | GameStatus::Tutorial => {
            session.status = GameStatus::MainMenu;
            true
        }
        _ => false,
    }
}

/// Enter the game-over cinematic. Returns false if already pending or not
/// playing.
pub fn begin_game_over(session: &mut SessionState) -> bool {
    if !session.is_live() {
        return false;
    }
    session.transitioning = true;
    true
}

pub fn commit_game_over(session: &mut SessionState) -> bool {
    if !session.transitioning {
        return false;
    }
    session.transitioning = false;
    session.status = GameStatus::GameOver;
    true
}

/// Damage the central objective. Returns true when this hit destroyed it.
pub fn damage_core(session: &mut SessionState, amount: u32) -> bool {
    if session.core_health == 0 {
        return false;
    }
    session.core_health = session.core_health.saturating_sub(amount);
    session.core_health == 0
}

/// Outcome of one hit on the active boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHit {
    pub armor_damage: u32,
    pub health_damage: u32,
    pub defeated: Option<EnemyKind>,
}

/// Hit the boss. Armor soaks the whole hit while any remains; overflow is
/// not carried into health. Siege hits count double against armor only.
pub fn damage_boss(session: &mut SessionState, amount: u32, siege: bool) -> Option<BossHit> {
    let boss = session.boss.as_mut()?;
    if boss.armor > 0 {
        let raw = if siege {
            amount.saturating_mul(SIEGE_ARMOR_MULTIPLIER)
        } else {
            amount
        };
        let absorbed = raw.min(boss.armor);
        boss.armor -= absorbed;
        return Some(BossHit {
            armor_damage: absorbed,
            health_damage: 0,
            defeated: None,
        });
    }
    let dealt = amount.min(boss.health);
    boss.health -= dealt;
    let defeated = if boss.health == 0 {
        let kind = boss.kind;
        session.boss = None;
        Some(kind)
    } else {
        None
    };
    Some(BossHit {
        armor_damage: 0,
        health_damage: dealt,
        defeated,
    })
}

/// Force a boss encounter for the current wave.
pub fn spawn_boss(session: &mut SessionState, kind: EnemyKind) -> bool {
    if !kind.is_boss() || session.boss.is_some() {
        return false;
    }
    session.boss = Some(BossState::for_wave(kind, session.wave));
    true
}
