//! Outbound notifications for presentation and inbound gameplay reports.

use crate::achievements::AchievementId;
use crate::arena::{ChallengeMode, Outcome, RankTier, Title};
use crate::combat::EnemyKind;
use crate::economy::ResourceKind;
use crate::player::HeroClass;
use crate::session::{GameStatus, NightEvent, Weather};

/// Fire-and-forget notification. Listeners never reply.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Run lifecycle ───────────────────────────────────────────
    StatusChanged(GameStatus),
    NightFell { wave: u32, event: NightEvent },
    LevelCleared { level: u32 },
    DayBroke { wave: u32 },
    WeatherStarted(Weather),
    WeatherCleared,
    /// Health hit zero; the cinematic is running.
    GameOverPending,
    GameOver { score: u64, wave: u32, stardust: u64 },

    // ── Combat ──────────────────────────────────────────────────
    EnemyKilled { enemy: EnemyKind, score: u64 },
    BestiaryDiscovered(EnemyKind),
    BossSpawned(EnemyKind),
    BossDefeated(EnemyKind),
    PlayerDamaged { amount: u32, health: u32 },
    CoreDamaged { amount: u32, health: u32 },
    Frozen { damage: u32 },
    /// Camera shake / vibration request.
    ShakeRequested { intensity: u32 },
    NovaTriggered { damage: u32 },
    UltimateActivated(HeroClass),
    UltimateExpired,

    // ── Progression ─────────────────────────────────────────────
    ResourceCollected { kind: ResourceKind, amount: u64 },
    LeveledUp { level: u32 },
    MissionCompleted { index: usize },
    NodeUnlocked { id: String, level: u32 },
    NodeAscended { id: String, level: u32 },
    AchievementUnlocked(AchievementId),

    // ── Competitive ─────────────────────────────────────────────
    ChallengeStarted { opponent: String, mode: ChallengeMode },
    ChallengeSettled { outcome: Outcome, net_profit: i64 },
    TitleEarned(Title),
    RankTierChanged(RankTier),
    TournamentActivated { id: String },
    TournamentCompleted { id: String, player_prize: Option<u64> },
    SeasonEnded { number: u32 },
    SeasonStarted { number: u32 },
}

/// Reports from the scene about things that already happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationEvent {
    EnemyKilled(EnemyKind),
    PlayerDamaged(u32),
    ResourceCollected(ResourceKind, u64),
    CoreDamaged(u32),
    BossHit { amount: u32, siege: bool },
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.queue.extend(events);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }
}
