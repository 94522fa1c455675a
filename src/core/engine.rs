//! The command surface: one method per gameplay behavior, two drivers
//! (`tick` once per second, `advance_ms` for sub-second deferred effects),
//! and the outbound event queue.
//!
//! Every mutator updates the in-memory [`GameState`] and then writes each
//! durable record it touched before returning.

use super::clock::Clock;
use super::config::{EngineConfig, Settings};
use super::constants::*;
use super::events::{EventBus, GameEvent, PresentationEvent};
use super::game_state::GameState;
use super::timers::{ScheduledEffect, ScheduledTask, Scheduler, TaskHandle};
use crate::achievements::AchievementId;
use crate::analytics::{summarize, AnalyticsSnapshot};
use crate::arena::{
    self, find_rival, score_outcome, ArenaBooks, ChallengeEnd, ChallengeMode,
    ChallengeState, OpponentProfile, Outcome, Settlement,
};
use crate::combat::{self, EnemyKind, KillReport};
use crate::constellation::{self, UnlockOutcome};
use crate::economy::{self, ResourceKind};
use crate::player::{
    self, apply_bonuses, DamageOutcome, DroneKind, HeroClass, MissionReward, MissionTask,
    UpgradeKind, WeaponKind,
};
use crate::season::{self, LeaderboardEntry, Season, SeasonReward};
use crate::session::{self, BossHit, GameStatus, SessionState, SessionTransition, Weather};
use crate::tournament::{self, RoundReport, Tournament};
use crate::utils::persistence::{keys, Store};
use rand::Rng;
use tracing::{debug, info, warn};

const FRIEND_AVATAR: &str = "friend";
const BASE_TOURNAMENT_RATING: u32 = 1000;

pub struct Engine<R: Rng> {
    state: GameState,
    store: Box<dyn Store>,
    clock: Box<dyn Clock>,
    rng: R,
    config: EngineConfig,
    scheduler: Scheduler,
    events: EventBus,
    weather_task: Option<TaskHandle>,
    ultimate_task: Option<TaskHandle>,
    game_over_task: Option<TaskHandle>,
    /// The current run was started by a challenge.
    challenge_run: bool,
}

impl<R: Rng> Engine<R> {
    /// Load every durable record from `store` and open the season.
    pub fn new(store: Box<dyn Store>, clock: Box<dyn Clock>, rng: R, config: EngineConfig) -> Self {
        let state = GameState::load(store.as_ref());
        let mut engine = Self {
            state,
            store,
            clock,
            rng,
            config,
            scheduler: Scheduler::new(),
            events: EventBus::new(),
            weather_task: None,
            ultimate_task: None,
            game_over_task: None,
            challenge_run: false,
        };
        let now = engine.clock.now();
        let length = engine.season_length_secs();
        if season::ensure_started(&mut engine.state.season, now, length) {
            let number = engine.state.season.current.as_ref().map_or(1, |s| s.number);
            info!(now, number, "season opened");
            engine.persist(keys::SEASON);
        }
        engine.check_season_rollover();
        engine
    }

    // ── Read side ───────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &SessionState {
        &self.state.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn challenge(&self) -> Option<&ChallengeState> {
        self.state.challenge.as_ref()
    }

    /// The game-over commit is scheduled and has not fired.
    pub fn game_over_pending(&self) -> bool {
        self.game_over_task
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    pub fn is_challenge_run(&self) -> bool {
        self.challenge_run
    }

    pub fn analytics(&self) -> &AnalyticsSnapshot {
        &self.state.analytics
    }

    pub fn current_season(&self) -> Option<&Season> {
        self.state.season.current.as_ref()
    }

    pub fn tournament(&self, id: &str) -> Option<&Tournament> {
        self.state.tournaments.get(id)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        season::leaderboard(&self.state.season, &self.state.arena, &self.config.player_name)
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // ── Internals ───────────────────────────────────────────────

    fn now(&self) -> i64 {
        self.clock.now()
    }

    fn season_length_secs(&self) -> i64 {
        season::season_length_secs(self.config.season_length_days)
    }

    fn persist(&mut self, key: &str) {
        if let Err(err) = self.state.save_key(self.store.as_mut(), key) {
            warn!(%err, key, "failed to persist record");
        }
    }

    fn persist_all(&mut self, keys: &[&str]) {
        for key in keys {
            self.persist(key);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(event);
    }

    fn emit_achievements(&mut self, unlocked: Vec<AchievementId>) -> bool {
        let any = !unlocked.is_empty();
        for id in unlocked {
            info!(?id, "achievement unlocked");
            self.emit(GameEvent::AchievementUnlocked(id));
        }
        any
    }

    /// Re-check hoarder tiers after the ledger moved.
    fn track_hoard(&mut self) {
        let now = self.now();
        let total = self.state.ledger.total();
        let unlocked = self.state.achievements.on_resources_changed(total, now);
        self.emit_achievements(unlocked);
        self.persist(keys::ACHIEVEMENTS);
    }

    fn emit_missions(&mut self, completed: Vec<usize>) {
        for index in completed {
            self.emit(GameEvent::MissionCompleted { index });
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        self.emit(GameEvent::StatusChanged(status));
    }

    fn refresh_bonuses(&mut self) {
        apply_bonuses(&mut self.state.player, &self.state.constellation);
    }

    // ── Run lifecycle ───────────────────────────────────────────

    pub fn start_tutorial(&mut self) -> bool {
        if !session::start_tutorial(&mut self.state.session) {
            return false;
        }
        self.set_status(GameStatus::Tutorial);
        true
    }

    /// Pick the hero class outside a run.
    pub fn select_class(&mut self, class: HeroClass) -> bool {
        if !player::select_class(&mut self.state.player, class) {
            debug!(?class, "class change refused during run");
            return false;
        }
        self.persist(keys::PLAYER);
        true
    }

    /// Start a fresh run with `class`.
    ///
    /// Cancels every pending deferred effect, forfeits an unsettled
    /// challenge and locks the class for the run.
    pub fn new_game(&mut self, class: HeroClass) {
        if self.state.challenge.is_some() {
            self.settle_challenge(Outcome::Defeat);
        }
        self.challenge_run = false;
        self.begin_run(class, 1);
        info!(?class, "new game");
    }

    fn reset_timers(&mut self) {
        self.scheduler.cancel_all();
        self.weather_task = None;
        self.ultimate_task = None;
        self.game_over_task = None;
    }

    fn begin_run(&mut self, class: HeroClass, wave: u32) {
        self.reset_timers();
        let hero = &mut self.state.player;
        player::expire_ultimate(hero);
        hero.class_locked = false;
        player::select_class(hero, class);
        hero.class_locked = true;
        hero.temperature = TEMPERATURE_MAX;
        hero.nova_charge = 0;
        hero.ultimate_charge = 0;
        self.refresh_bonuses();
        let hero = &mut self.state.player;
        hero.health = hero.max_health;

        session::start_run(&mut self.state.session, wave);
        self.set_status(GameStatus::Playing);
        self.persist(keys::PLAYER);
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !session::toggle_pause(&mut self.state.session) {
            return false;
        }
        let status = self.state.session.status;
        self.set_status(status);
        true
    }

    /// Leave LEVEL_CLEAR for the next wave.
    pub fn next_level(&mut self) -> bool {
        if !session::next_level(&mut self.state.session) {
            return false;
        }
        let wave = self.state.session.wave;
        self.emit(GameEvent::DayBroke { wave });
        self.set_status(GameStatus::Playing);
        true
    }

    pub fn return_to_menu(&mut self) -> bool {
        if self.state.challenge.is_some() || !session::return_to_menu(&mut self.state.session) {
            return false;
        }
        self.reset_timers();
        player::expire_ultimate(&mut self.state.player);
        self.state.player.class_locked = false;
        self.persist(keys::PLAYER);
        self.set_status(GameStatus::MainMenu);
        true
    }

    /// Enter the game-over cinematic; the commit is scheduled.
    fn trigger_game_over(&mut self) {
        if !session::begin_game_over(&mut self.state.session) {
            return;
        }
        info!(
            score = self.state.session.score,
            wave = self.state.session.wave,
            "game over pending"
        );
        self.emit(GameEvent::GameOverPending);
        if self.state.challenge.is_some() {
            self.settle_challenge(Outcome::Defeat);
        }
        let handle = self
            .scheduler
            .schedule(self.config.game_over_delay_ms, ScheduledEffect::CommitGameOver);
        self.game_over_task = Some(handle);
    }

    fn commit_game_over(&mut self) {
        if !session::commit_game_over(&mut self.state.session) {
            return;
        }
        self.game_over_task = None;
        self.finish_run();
    }

    /// Close the run: convert to stardust, update records, unlock the class.
    fn finish_run(&mut self) {
        let score = self.state.session.score;
        let wave = self.state.session.wave;
        let stardust = if self.challenge_run {
            0
        } else {
            constellation::convert_run_to_currency(score, self.state.session.run_shards)
        };
        self.state.ledger.add(ResourceKind::Stardust, stardust);
        if !self.challenge_run && self.state.records.record_run(score, wave) {
            info!(score, wave, "new personal best");
        }
        self.challenge_run = false;

        if let Some(handle) = self.weather_task.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.ultimate_task.take() {
            self.scheduler.cancel(handle);
        }
        player::expire_ultimate(&mut self.state.player);
        self.state.player.class_locked = false;

        info!(score, wave, stardust, "run finished");
        self.emit(GameEvent::GameOver {
            score,
            wave,
            stardust,
        });
        self.set_status(GameStatus::GameOver);
        self.persist_all(&[keys::LEDGER, keys::SESSION, keys::PLAYER]);
        self.track_hoard();
    }

    // ── Drivers ─────────────────────────────────────────────────

    /// Advance one second of game time.
    pub fn tick(&mut self) {
        self.advance_ms(TICK_INTERVAL_MS);
        self.check_season_rollover();

        let Some(patch) = session::plan_tick(&self.state.session, self.config.weather_chance, &mut self.rng)
        else {
            return;
        };
        self.state.session.apply(&patch);
        for transition in patch.transitions {
            self.on_transition(transition);
        }

        if self.state.session.is_live() {
            self.tick_temperature();
        }
        if self.state.session.is_live() {
            self.tick_challenge();
        }
    }

    /// Move simulated time forward and run due deferred effects.
    pub fn advance_ms(&mut self, elapsed_ms: u64) {
        for task in self.scheduler.advance(elapsed_ms) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task.effect {
            ScheduledEffect::CommitGameOver => self.commit_game_over(),
            ScheduledEffect::ClearWeather => {
                self.weather_task = None;
                if self.state.session.weather.take().is_some() {
                    self.emit(GameEvent::WeatherCleared);
                }
            }
            ScheduledEffect::ExpireUltimate => {
                self.ultimate_task = None;
                if player::expire_ultimate(&mut self.state.player) {
                    self.emit(GameEvent::UltimateExpired);
                    self.persist(keys::PLAYER);
                }
            }
        }
    }

    fn on_transition(&mut self, transition: SessionTransition) {
        match transition {
            SessionTransition::NightFell { event } => {
                let wave = self.state.session.wave;
                debug!(wave, ?event, "night fell");
                self.emit(GameEvent::NightFell { wave, event });
            }
            SessionTransition::LevelCleared { level } => {
                info!(level, "level cleared");
                let completed =
                    player::update_mission_progress(&mut self.state.player, MissionTask::SurviveNight, 1);
                self.emit_missions(completed);
                self.emit(GameEvent::LevelCleared { level });
                self.set_status(GameStatus::LevelClear);
                self.persist(keys::PLAYER);
            }
            SessionTransition::WeatherStarted(weather) => {
                let handle = self
                    .scheduler
                    .schedule(self.config.weather_duration_ms, ScheduledEffect::ClearWeather);
                self.weather_task = Some(handle);
                self.emit(GameEvent::WeatherStarted(weather));
            }
            SessionTransition::BossSpawned(kind) => self.emit(GameEvent::BossSpawned(kind)),
        }
    }

    fn tick_temperature(&mut self) {
        let night = self.state.session.is_night();
        let blizzard = self.state.session.weather == Some(Weather::Blizzard);
        let freeze = player::tick_temperature(&mut self.state.player, night, blizzard);
        if freeze > 0 {
            self.emit(GameEvent::Frozen { damage: freeze });
            self.damage_player(freeze);
        }
    }

    fn tick_challenge(&mut self) {
        let Some(challenge) = self.state.challenge.as_mut() else {
            return;
        };
        match arena::tick_challenge(challenge, &mut self.rng) {
            Some(ChallengeEnd::TimeUp) => {
                let outcome = score_outcome(self.state.session.score, challenge.opponent.score);
                self.end_challenge_run(outcome);
            }
            Some(ChallengeEnd::OpponentDown) => self.end_challenge_run(Outcome::Victory),
            None => {}
        }
    }

    fn end_challenge_run(&mut self, outcome: Outcome) {
        self.settle_challenge(outcome);
        self.state.session.status = GameStatus::GameOver;
        self.finish_run();
    }

    fn check_season_rollover(&mut self) {
        let now = self.now();
        let length = self.season_length_secs();
        let ended = season::check_rollover(&mut self.state.season, now, length);
        if ended.is_empty() {
            return;
        }
        for number in ended {
            info!(number, "season ended");
            self.emit(GameEvent::SeasonEnded { number });
        }
        let number = self.state.season.current_number();
        self.emit(GameEvent::SeasonStarted { number });
        self.persist(keys::SEASON);
    }

    /// Dispatch a report from the scene.
    pub fn handle(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::EnemyKilled(enemy) => {
                self.record_kill(enemy);
            }
            PresentationEvent::PlayerDamaged(amount) => {
                self.damage_player(amount);
            }
            PresentationEvent::ResourceCollected(kind, amount) => {
                self.add_resource(kind, amount);
            }
            PresentationEvent::CoreDamaged(amount) => {
                self.damage_core(amount);
            }
            PresentationEvent::BossHit { amount, siege } => {
                self.damage_boss(amount, siege);
            }
        }
    }

    // ── Economy ─────────────────────────────────────────────────

    /// Credit resources. While playing, gathered materials also pay score,
    /// nova charge and gather-mission progress.
    pub fn add_resource(&mut self, kind: ResourceKind, amount: u64) -> bool {
        if self.state.session.transitioning {
            debug!(?kind, amount, "resource refused during game-over cinematic");
            return false;
        }
        self.state.ledger.add(kind, amount);
        if self.state.session.is_live() && kind.is_gatherable() {
            let session = &mut self.state.session;
            let gathered = amount.saturating_mul(GATHER_SCORE_PER_UNIT);
            session.score = session.score.saturating_add(gathered);
            player::add_nova_charge(
                &mut self.state.player,
                amount.saturating_mul(NOVA_CHARGE_PER_GATHER as u64) as f64,
            );
            let completed = player::update_mission_progress(&mut self.state.player, MissionTask::Gather, amount);
            self.emit_missions(completed);
            self.persist(keys::PLAYER);
        }
        self.emit(GameEvent::ResourceCollected { kind, amount });
        self.persist(keys::LEDGER);
        self.track_hoard();
        true
    }

    pub fn spend_resource(&mut self, kind: ResourceKind, amount: u64) -> bool {
        if !self.state.ledger.consume(kind, amount) {
            return false;
        }
        self.persist(keys::LEDGER);
        true
    }

    pub fn transmute_resources(&mut self, from: ResourceKind, to: ResourceKind, amount: u64) -> Option<u64> {
        let produced = economy::transmute(&mut self.state.ledger, from, to, amount)?;
        self.persist(keys::LEDGER);
        self.track_hoard();
        Some(produced)
    }

    // ── Combat ──────────────────────────────────────────────────

    /// Book a kill: bestiary, score, shards, XP, charges, missions,
    /// achievements.
    pub fn record_kill(&mut self, enemy: EnemyKind) -> Option<KillReport> {
        if !self.state.session.is_live() {
            return None;
        }
        let level_before = self.state.player.level;
        let report = combat::record_kill(&mut self.state.player, enemy);

        self.state.session.score = self.state.session.score.saturating_add(report.score);
        self.state.session.run_shards = self.state.session.run_shards.saturating_add(report.shards);
        self.state.ledger.add(ResourceKind::LightShards, report.shards);

        self.emit(GameEvent::EnemyKilled {
            enemy,
            score: report.score,
        });
        if report.first_sighting {
            self.emit(GameEvent::BestiaryDiscovered(enemy));
        }
        for level in level_before + 1..=self.state.player.level {
            self.emit(GameEvent::LeveledUp { level });
        }
        self.emit_missions(report.missions_completed.clone());

        let now = self.now();
        let unlocked = self.state.achievements.on_enemy_killed(enemy.is_boss(), now);
        self.emit_achievements(unlocked);

        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        self.track_hoard();
        Some(report)
    }

    /// Apply damage to the player. A fatal hit starts the game-over
    /// cinematic.
    pub fn damage_player(&mut self, amount: u32) -> Option<DamageOutcome> {
        if !self.state.session.is_live() {
            return None;
        }
        let outcome = player::damage_player(&mut self.state.player, amount);
        let health = self.state.player.health;
        self.emit(GameEvent::PlayerDamaged {
            amount: outcome.dealt,
            health,
        });
        if self.state.settings.haptics_enabled && outcome.dealt > 0 {
            self.emit(GameEvent::ShakeRequested {
                intensity: outcome.dealt,
            });
        }
        self.persist(keys::PLAYER);
        if outcome.fatal {
            self.trigger_game_over();
        }
        Some(outcome)
    }

    /// Damage the central objective. Returns true when it fell.
    pub fn damage_core(&mut self, amount: u32) -> bool {
        if !self.state.session.is_live() {
            return false;
        }
        let destroyed = session::damage_core(&mut self.state.session, amount);
        self.emit(GameEvent::CoreDamaged {
            amount,
            health: self.state.session.core_health,
        });
        if destroyed {
            self.trigger_game_over();
        }
        destroyed
    }

    pub fn spawn_boss(&mut self, kind: EnemyKind) -> bool {
        if !self.state.session.is_live() || !session::spawn_boss(&mut self.state.session, kind) {
            return false;
        }
        self.emit(GameEvent::BossSpawned(kind));
        true
    }

    /// Hit the active boss; defeating it books the kill.
    pub fn damage_boss(&mut self, amount: u32, siege: bool) -> Option<BossHit> {
        if !self.state.session.is_live() {
            return None;
        }
        let hit = session::damage_boss(&mut self.state.session, amount, siege)?;
        if let Some(kind) = hit.defeated {
            info!(?kind, "boss defeated");
            self.emit(GameEvent::BossDefeated(kind));
            self.record_kill(kind);
        }
        Some(hit)
    }

    pub fn trigger_nova(&mut self) -> Option<u32> {
        if !self.state.session.is_live() {
            return None;
        }
        let damage = player::trigger_nova(&mut self.state.player)?;
        self.emit(GameEvent::NovaTriggered { damage });
        self.persist(keys::PLAYER);
        Some(damage)
    }

    /// Fire the class ultimate and schedule its expiry.
    pub fn trigger_ultimate(&mut self) -> bool {
        if !self.state.session.is_live() || !player::trigger_ultimate(&mut self.state.player) {
            return false;
        }
        let handle = self
            .scheduler
            .schedule(self.config.ultimate_duration_ms, ScheduledEffect::ExpireUltimate);
        self.ultimate_task = Some(handle);
        let class = self.state.player.hero_class;
        self.emit(GameEvent::UltimateActivated(class));
        self.persist(keys::PLAYER);
        true
    }

    pub fn warm_up(&mut self) -> bool {
        if !player::warm_up(&mut self.state.player, &mut self.state.ledger) {
            return false;
        }
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        true
    }

    // ── Player shop & missions ──────────────────────────────────

    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> Option<u32> {
        let level = player::purchase_upgrade(&mut self.state.player, kind, &mut self.state.ledger)?;
        self.refresh_bonuses();
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        Some(level)
    }

    pub fn upgrade_weapon(&mut self, weapon: WeaponKind) -> Option<u8> {
        let level = player::upgrade_weapon(&mut self.state.player, weapon, &mut self.state.ledger)?;
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        Some(level)
    }

    pub fn equip_weapon(&mut self, weapon: WeaponKind) -> bool {
        if !player::equip_weapon(&mut self.state.player, weapon) {
            return false;
        }
        self.persist(keys::PLAYER);
        true
    }

    pub fn buy_drone(&mut self, drone: DroneKind) -> bool {
        if !player::buy_drone(&mut self.state.player, drone, &mut self.state.ledger) {
            return false;
        }
        self.refresh_bonuses();
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        true
    }

    pub fn buy_skin(&mut self, skin: &str) -> bool {
        if !player::buy_skin(&mut self.state.player, skin, &mut self.state.ledger) {
            return false;
        }
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        true
    }

    pub fn equip_skin(&mut self, skin: &str) -> bool {
        if !player::equip_skin(&mut self.state.player, skin) {
            return false;
        }
        self.persist(keys::PLAYER);
        true
    }

    pub fn claim_mission(&mut self, index: usize) -> Option<MissionReward> {
        let reward = player::claim_mission(&mut self.state.player, index, &mut self.state.ledger)?;
        self.persist_all(&[keys::PLAYER, keys::LEDGER]);
        self.track_hoard();
        Some(reward)
    }

    // ── Constellation ───────────────────────────────────────────

    pub fn unlock_node(&mut self, id: &str) -> Option<UnlockOutcome> {
        let outcome = constellation::unlock_node(&mut self.state.constellation, id, &mut self.state.ledger)?;
        self.refresh_bonuses();
        info!(id, level = outcome.new_level, cost = outcome.cost, "node unlocked");
        self.emit(GameEvent::NodeUnlocked {
            id: id.to_string(),
            level: outcome.new_level,
        });
        if outcome.ascended {
            self.emit(GameEvent::NodeAscended {
                id: id.to_string(),
                level: outcome.new_level,
            });
            let now = self.now();
            let unlocked = self.state.achievements.on_ascension(now);
            if self.emit_achievements(unlocked) {
                self.persist(keys::ACHIEVEMENTS);
            }
        }
        self.persist_all(&[keys::CONSTELLATION, keys::LEDGER, keys::PLAYER]);
        Some(outcome)
    }

    // ── Arena ───────────────────────────────────────────────────

    fn resolve_opponent(&self, name: &str) -> Option<OpponentProfile> {
        if let Some(rival) = find_rival(name) {
            return Some(rival.profile());
        }
        self.state.friends.get(name).map(|friend| OpponentProfile {
            name: friend.name.clone(),
            avatar: FRIEND_AVATAR.to_string(),
        })
    }

    /// Wager light shards against a rival or friend and start an
    /// elevated-difficulty run.
    pub fn start_challenge(&mut self, opponent: &str, wager: u64, mode: ChallengeMode) -> bool {
        if self.state.challenge.is_some() || self.state.session.transitioning {
            return false;
        }
        let Some(profile) = self.resolve_opponent(opponent) else {
            debug!(opponent, "unknown challenge opponent");
            return false;
        };
        let now = self.now();
        let Some(challenge) =
            arena::start_challenge(&mut self.state.ledger, profile, wager, mode, now, &mut self.rng)
        else {
            debug!(wager, "challenge refused: insufficient shards");
            return false;
        };
        info!(
            opponent = %challenge.opponent.name,
            wager,
            difficulty = challenge.opponent.difficulty,
            "challenge started"
        );
        let opponent = challenge.opponent.name.clone();
        self.state.challenge = Some(challenge);
        self.persist(keys::LEDGER);

        let class = self.state.player.hero_class;
        self.begin_run(class, CHALLENGE_START_WAVE);
        self.challenge_run = true;
        self.emit(GameEvent::ChallengeStarted { opponent, mode });
        true
    }

    /// Give up the active challenge as a defeat.
    pub fn forfeit_challenge(&mut self) -> bool {
        if self.state.challenge.is_none() {
            return false;
        }
        if self.state.session.is_live() {
            self.end_challenge_run(Outcome::Defeat);
        } else {
            self.settle_challenge(Outcome::Defeat);
        }
        true
    }

    fn settle_challenge(&mut self, outcome: Outcome) -> Option<Settlement> {
        let challenge = self.state.challenge.take()?;
        let now = self.now();
        let settlement = arena::settle(
            ArenaBooks {
                ledger: &mut self.state.ledger,
                stats: &mut self.state.arena,
                history: &mut self.state.battle_history,
                history_cap: self.config.battle_history_cap,
            },
            &challenge,
            outcome,
            self.state.session.score,
            now,
        );
        arena::record_friend_result(&mut self.state.friends, &challenge.opponent.name, outcome);
        season::record_rival_result(&mut self.state.season, &challenge.opponent.name, outcome);
        self.state.analytics = summarize(&self.state.battle_history);

        info!(
            ?outcome,
            net_profit = settlement.record.net_profit,
            rank_points = self.state.arena.rank_points,
            "challenge settled"
        );
        self.emit(GameEvent::ChallengeSettled {
            outcome,
            net_profit: settlement.record.net_profit,
        });
        for title in &settlement.new_titles {
            self.emit(GameEvent::TitleEarned(*title));
        }
        if let Some(tier) = settlement.new_tier {
            self.emit(GameEvent::RankTierChanged(tier));
        }
        self.persist_all(&[
            keys::LEDGER,
            keys::ARENA,
            keys::BATTLE_HISTORY,
            keys::FRIENDS,
            keys::SEASON,
            keys::ANALYTICS,
        ]);
        self.track_hoard();
        Some(settlement)
    }

    pub fn add_friend(&mut self, name: &str, rank_points: u32) -> bool {
        if !arena::add_friend(&mut self.state.friends, name, rank_points) {
            return false;
        }
        self.persist(keys::FRIENDS);
        true
    }

    pub fn remove_friend(&mut self, name: &str) -> bool {
        if !arena::remove_friend(&mut self.state.friends, name) {
            return false;
        }
        self.persist(keys::FRIENDS);
        true
    }

    // ── Tournaments ─────────────────────────────────────────────

    pub fn create_tournament(&mut self, name: &str, entry_fee: u64, capacity: usize) -> Option<String> {
        let now = self.now();
        let id = tournament::create_tournament(&mut self.state.tournaments, name, entry_fee, capacity, now)?;
        self.persist(keys::TOURNAMENTS);
        Some(id)
    }

    fn on_tournament_joined(&mut self, id: &str, activated: bool) {
        if activated {
            info!(id, "tournament active");
            self.emit(GameEvent::TournamentActivated { id: id.to_string() });
        }
        self.persist(keys::TOURNAMENTS);
    }

    /// Enter the player, escrowing the entry fee.
    pub fn join_tournament(&mut self, id: &str) -> bool {
        let rating = BASE_TOURNAMENT_RATING.saturating_add(self.state.arena.rank_points);
        let name = self.config.player_name.clone();
        let Some(t) = self.state.tournaments.get_mut(id) else {
            return false;
        };
        let Some(outcome) = tournament::join_tournament(t, &name, rating, &mut self.state.ledger) else {
            return false;
        };
        self.persist(keys::LEDGER);
        self.on_tournament_joined(id, outcome.activated);
        true
    }

    /// Let simulated entrants take every open slot.
    pub fn fill_tournament(&mut self, id: &str) -> bool {
        let Some(t) = self.state.tournaments.get_mut(id) else {
            return false;
        };
        let Some(outcome) = tournament::fill_tournament(t, &mut self.rng) else {
            return false;
        };
        self.on_tournament_joined(id, outcome.activated);
        true
    }

    pub fn report_tournament_result(&mut self, id: &str, won: bool) -> bool {
        let Some(t) = self.state.tournaments.get_mut(id) else {
            return false;
        };
        if !tournament::report_player_result(t, won) {
            return false;
        }
        self.persist(keys::TOURNAMENTS);
        true
    }

    /// Play out the current round. Pays the player's prize on completion.
    pub fn advance_tournament(&mut self, id: &str) -> Option<RoundReport> {
        let t = self.state.tournaments.get_mut(id)?;
        let report = tournament::advance_round(t, &mut self.rng)?;
        if report.completed {
            if let Some(prize) = report.player_prize {
                tournament::credit_prize(&mut self.state.ledger, prize);
                self.persist(keys::LEDGER);
                self.track_hoard();
            }
            info!(id, prize = ?report.player_prize, "tournament completed");
            self.emit(GameEvent::TournamentCompleted {
                id: id.to_string(),
                player_prize: report.player_prize,
            });
        }
        self.persist(keys::TOURNAMENTS);
        Some(report)
    }

    // ── Season ──────────────────────────────────────────────────

    /// Claim an ended season's reward at the current rank tier.
    pub fn claim_season_reward(&mut self, number: u32) -> Option<SeasonReward> {
        let tier = self.state.arena.rank_tier;
        let reward = season::claim_season_reward(&self.state.season, number, tier, &mut self.state.ledger)?;
        self.persist(keys::LEDGER);
        self.track_hoard();
        Some(reward)
    }

    // ── Settings ────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        let volume = self.state.settings.master_volume;
        self.state.settings.set_volume(volume);
        self.persist(keys::SETTINGS);
    }
}
