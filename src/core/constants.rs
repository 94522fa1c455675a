// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const GAME_OVER_DELAY_MS: u64 = 2500;
pub const WEATHER_DURATION_MS: u64 = 30_000;
pub const WEATHER_CHANCE_PER_TICK: f64 = 0.02;
pub const ULTIMATE_DURATION_MS: u64 = 10_000;

// Day/night timers: base + wave * increment (seconds)
pub const DAY_BASE_SECONDS: u32 = 60;
pub const NIGHT_BASE_SECONDS: u32 = 45;
pub const TIMER_WAVE_INCREMENT: u32 = 5;

// Night events
pub const NIGHT_EVENT_MIN_WAVE: u32 = 3;

// Central objective
pub const CORE_MAX_HEALTH: u32 = 500;

// Boss encounters: health = base + wave * step
pub const BOSS_BASE_HEALTH: u32 = 200;
pub const BOSS_HEALTH_PER_WAVE: u32 = 50;
pub const BOSS_BASE_ARMOR: u32 = 50;
pub const BOSS_ARMOR_PER_WAVE: u32 = 10;
pub const SIEGE_ARMOR_MULTIPLIER: u32 = 2;

// Player base stats
pub const BASE_MAX_HEALTH: u32 = 100;
pub const BASE_ATTACK_DAMAGE: u32 = 10;
pub const BASE_SPEED: f64 = 1.0;
pub const BASE_NOVA_MULTIPLIER: f64 = 1.0;

// Permanent upgrade increments (per level)
pub const STRENGTH_DAMAGE_PER_LEVEL: u32 = 2;
pub const AGILITY_SPEED_PER_LEVEL: f64 = 0.05;
pub const VITALITY_HEALTH_PER_LEVEL: u32 = 10;
pub const UPGRADE_COST_PER_LEVEL: u64 = 25;

// Weapons
pub const MAX_WEAPON_LEVEL: u8 = 5;
pub const WEAPON_WOOD_COST_PER_LEVEL: u64 = 20;
pub const WEAPON_STONE_COST_PER_LEVEL: u64 = 10;
pub const WEAPON_DAMAGE_PER_LEVEL: f64 = 0.2;

// Shop
pub const DRONE_TITAN_CORE_COST: u64 = 5;
pub const SKIN_SHARD_COST: u64 = 50;
pub const DEFAULT_SKIN: &str = "default";

// Charge meters
pub const CHARGE_CAP: u32 = 100;
pub const NOVA_CHARGE_BOSS: f64 = 25.0;
pub const NOVA_CHARGE_TRASH: f64 = 2.0;
pub const NOVA_CHARGE_PER_GATHER: u32 = 1;
pub const NOVA_BLAST_FACTOR: f64 = 5.0;
pub const ULTIMATE_CHARGE_BOSS: u32 = 20;
pub const ULTIMATE_CHARGE_TRASH: u32 = 5;

// Kill rewards
pub const SCORE_TRASH: u64 = 100;
pub const SCORE_MID_TIER: u64 = 500;
pub const SCORE_BOSS: u64 = 2500;
pub const XP_BOSS: u64 = 500;
pub const XP_TRASH: u64 = 25;
pub const SHARDS_TRASH: u64 = 1;
pub const SHARDS_MID_TIER: u64 = 5;
pub const SHARDS_BOSS: u64 = 25;
pub const GATHER_SCORE_PER_UNIT: u64 = 5;

// XP curve: base * level^exponent
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Temperature hazard
pub const TEMPERATURE_MAX: u32 = 100;
pub const TEMPERATURE_NIGHT_DROP: u32 = 2;
pub const TEMPERATURE_BLIZZARD_DROP: u32 = 4;
pub const TEMPERATURE_DAY_RECOVERY: u32 = 1;
pub const FREEZE_DAMAGE: u32 = 5;
pub const WARM_UP_WOOD_COST: u64 = 5;
pub const WARM_UP_AMOUNT: u32 = 25;

// Meta currency conversion (fixed, not configurable)
pub const STARDUST_SCORE_DIVISOR: u64 = 100;
pub const STARDUST_SHARD_DIVISOR: u64 = 10;

// Constellation ascension pricing
pub const ASCENSION_COST_RATIO: f64 = 1.5;

// Arena
pub const CHALLENGE_START_WAVE: u32 = 5;
pub const SCORE_RUSH_DURATION_SECONDS: u32 = 120;
pub const OPPONENT_DIFFICULTY_MIN: f64 = 0.8;
pub const OPPONENT_DIFFICULTY_MAX: f64 = 1.5;
pub const OPPONENT_SCORE_PER_TICK_MAX: u32 = 50;
pub const OPPONENT_BONUS_CHANCE: f64 = 0.05;
pub const OPPONENT_BONUS_SCORE: u64 = 500;
pub const OPPONENT_MAX_HEALTH: u32 = 100;
pub const SUDDEN_DEATH_HIT_CHANCE: f64 = 0.10;
pub const SUDDEN_DEATH_HIT_MIN: u32 = 5;
pub const SUDDEN_DEATH_HIT_MAX: u32 = 20;
pub const HOUSE_CUT_PERCENT: u64 = 10;
pub const RANK_POINTS_VICTORY: i64 = 25;
pub const RANK_POINTS_DEFEAT: i64 = -15;
pub const BATTLE_HISTORY_CAP: usize = 50;

// Tournaments
pub const TOURNAMENT_MIN_CAPACITY: usize = 4;
pub const TOURNAMENT_MAX_CAPACITY: usize = 32;
pub const TOURNAMENT_PAYOUT_PERCENT: [u64; 3] = [50, 30, 20];
pub const ELO_SCALE: f64 = 400.0;

// Seasons
pub const SEASON_LENGTH_DAYS: i64 = 28;
