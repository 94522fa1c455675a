//! Nightwatch Headless Simulator
//!
//! Drives the engine through a scripted run without any presentation
//! layer: simulated kills, gathering and incoming damage each second,
//! exactly the calls a scene would make.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --seconds N           Seconds to simulate (default: 600)
//!   --seed N              RNG seed (default: 42)
//!   --class NAME          vanguard | ranger | arcanist (default: vanguard)
//!   --challenge MODE      rush | sudden: play a wagered challenge run
//!   --wager N             Challenge wager in light shards (default: 100)
//!   --save-dir DIR        Persist to DIR instead of memory
//!   --quiet               Only the final summary line
//!   --version             Print build information

use nightwatch::arena::{ChallengeMode, ROSTER};
use nightwatch::combat::EnemyKind;
use nightwatch::core::{
    Clock, Engine, EngineConfig, GameEvent, ManualClock, PresentationEvent, SystemClock,
};
use nightwatch::economy::ResourceKind;
use nightwatch::player::HeroClass;
use nightwatch::session::GameStatus;
use nightwatch::utils::build_info;
use nightwatch::utils::persistence::{FileStore, MemoryStore, Store};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    seconds: u64,
    seed: u64,
    class: HeroClass,
    challenge: Option<ChallengeMode>,
    wager: u64,
    save_dir: Option<PathBuf>,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seconds: 600,
            seed: 42,
            class: HeroClass::Vanguard,
            challenge: None,
            wager: 100,
            save_dir: None,
            quiet: false,
        }
    }
}

enum Command {
    Run(SimConfig),
    Help,
    Version,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number(args: &[String], i: usize, flag: &str) -> Result<u64, String> {
    value(args, i, flag)?
        .parse()
        .map_err(|_| format!("{flag} requires a number"))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" => {
                i += 1;
                config.seconds = number(args, i, "--seconds")?;
            }
            "--seed" => {
                i += 1;
                config.seed = number(args, i, "--seed")?;
            }
            "--class" => {
                i += 1;
                let name = value(args, i, "--class")?;
                config.class =
                    HeroClass::from_name(name).ok_or_else(|| format!("unknown class: {name}"))?;
            }
            "--challenge" => {
                i += 1;
                config.challenge = Some(match value(args, i, "--challenge")? {
                    "rush" => ChallengeMode::ScoreRush,
                    "sudden" => ChallengeMode::SuddenDeath,
                    other => return Err(format!("unknown challenge mode: {other}")),
                });
            }
            "--wager" => {
                i += 1;
                config.wager = number(args, i, "--wager")?;
            }
            "--save-dir" => {
                i += 1;
                config.save_dir = Some(PathBuf::from(value(args, i, "--save-dir")?));
            }
            "--quiet" => config.quiet = true,
            "--version" | "-V" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(Command::Run(config))
}

fn print_usage() {
    eprintln!(
        "Nightwatch Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seconds N       Seconds to simulate (default: 600)\n\
         \x20 --seed N          RNG seed (default: 42)\n\
         \x20 --class NAME      vanguard | ranger | arcanist\n\
         \x20 --challenge MODE  rush | sudden\n\
         \x20 --wager N         Challenge wager (default: 100)\n\
         \x20 --save-dir DIR    Persist to DIR instead of memory\n\
         \x20 --quiet           Only final summary line\n\
         \x20 --version, -V     Print build information\n\
         \x20 --help, -h        Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Default)]
struct SimStats {
    seconds: u64,
    kills: u64,
    boss_kills: u64,
    levels_cleared: u64,
    nights: u64,
    weather_fronts: u64,
    novas: u64,
    ultimates: u64,
    achievements: u64,
    runs_finished: u64,
    stardust_earned: u64,
    challenge_result: Option<String>,
}

impl SimStats {
    fn record(&mut self, event: &GameEvent, quiet: bool) {
        match event {
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::BossDefeated(_) => self.boss_kills += 1,
            GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
            GameEvent::NightFell { .. } => self.nights += 1,
            GameEvent::WeatherStarted(_) => self.weather_fronts += 1,
            GameEvent::NovaTriggered { .. } => self.novas += 1,
            GameEvent::UltimateActivated(_) => self.ultimates += 1,
            GameEvent::AchievementUnlocked(_) => self.achievements += 1,
            GameEvent::GameOver { stardust, .. } => {
                self.runs_finished += 1;
                self.stardust_earned += stardust;
            }
            GameEvent::ChallengeSettled {
                outcome,
                net_profit,
            } => {
                self.challenge_result = Some(format!("{outcome:?} ({net_profit:+} shards)"));
            }
            _ => {}
        }
        if !quiet {
            match event {
                GameEvent::NightFell { .. }
                | GameEvent::LevelCleared { .. }
                | GameEvent::BossSpawned(_)
                | GameEvent::BossDefeated(_)
                | GameEvent::GameOver { .. }
                | GameEvent::ChallengeSettled { .. }
                | GameEvent::AchievementUnlocked(_) => println!("[{:>5}s] {:?}", self.seconds, event),
                _ => {}
            }
        }
    }
}

// ── Scripted Scene ───────────────────────────────────────────────────

const TRASH: [EnemyKind; 4] = [
    EnemyKind::Crawler,
    EnemyKind::Stalker,
    EnemyKind::Brute,
    EnemyKind::Juggernaut,
];
const GATHERABLE: [ResourceKind; 3] = [ResourceKind::Wood, ResourceKind::Stone, ResourceKind::Food];

/// One second of scene activity, reported to the engine.
fn play_second<R: Rng, E: Rng>(engine: &mut Engine<E>, scene: &mut R) {
    let night = engine.session().is_night();

    if scene.gen::<f64>() < 0.35 {
        let enemy = TRASH[scene.gen_range(0..TRASH.len())];
        engine.handle(PresentationEvent::EnemyKilled(enemy));
    }
    if scene.gen::<f64>() < 0.5 {
        let kind = GATHERABLE[scene.gen_range(0..GATHERABLE.len())];
        engine.handle(PresentationEvent::ResourceCollected(kind, scene.gen_range(1..=3)));
    }
    let hit_chance = if night { 0.35 } else { 0.1 };
    if scene.gen::<f64>() < hit_chance {
        engine.handle(PresentationEvent::PlayerDamaged(scene.gen_range(1..=6)));
    }
    if night && scene.gen::<f64>() < 0.05 {
        engine.handle(PresentationEvent::CoreDamaged(scene.gen_range(5..=25)));
    }

    if engine.session().boss.is_none() && scene.gen::<f64>() < 0.01 {
        engine.spawn_boss(EnemyKind::Colossus);
    }
    if engine.session().boss.is_some() {
        let damage = engine.state().player.hit_damage();
        engine.handle(PresentationEvent::BossHit {
            amount: damage,
            siege: scene.gen::<f64>() < 0.2,
        });
    }

    let player = &engine.state().player;
    let (nova_full, ultimate_full) = (player.nova_charge >= 100, player.ultimate_charge >= 100);
    let cold = player.temperature < 30;
    let wounded = player.health * 2 < player.max_health;
    if nova_full {
        engine.trigger_nova();
    }
    if ultimate_full && wounded {
        engine.trigger_ultimate();
    }
    if cold {
        engine.warm_up();
    }
}

fn open_store(config: &SimConfig) -> Result<Box<dyn Store>, String> {
    match &config.save_dir {
        Some(dir) => FileStore::at(dir.clone())
            .map(|store| Box::new(store) as Box<dyn Store>)
            .map_err(|err| err.to_string()),
        None => Ok(Box::new(MemoryStore::new())),
    }
}

fn run(config: SimConfig) -> Result<SimStats, String> {
    let store = open_store(&config)?;
    let clock = Rc::new(ManualClock::new(SystemClock.now()));
    let mut engine = Engine::new(
        store,
        Box::new(Rc::clone(&clock)),
        StdRng::seed_from_u64(config.seed),
        EngineConfig::default(),
    );
    let mut scene = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let mut stats = SimStats::default();

    engine.select_class(config.class);
    match config.challenge {
        Some(mode) => {
            engine.add_resource(ResourceKind::LightShards, config.wager);
            let rival = ROSTER[scene.gen_range(0..ROSTER.len())].name;
            if !engine.start_challenge(rival, config.wager, mode) {
                return Err(format!("challenge against {rival} was refused"));
            }
            info!(rival, wager = config.wager, ?mode, "challenge run");
        }
        None => engine.new_game(config.class),
    }

    for second in 0..config.seconds {
        stats.seconds = second;
        let (status, transitioning) = (engine.session().status, engine.session().transitioning);
        match status {
            GameStatus::Playing if !transitioning => play_second(&mut engine, &mut scene),
            GameStatus::LevelClear => {
                engine.next_level();
            }
            GameStatus::GameOver => break,
            _ => {}
        }
        clock.advance(1);
        engine.tick();
        for event in engine.drain_events() {
            stats.record(&event, config.quiet);
        }
    }
    // Let a pending game-over commit.
    let delay = engine.config().game_over_delay_ms;
    engine.advance_ms(delay);
    for event in engine.drain_events() {
        stats.record(&event, config.quiet);
    }

    let session = engine.session();
    let state = engine.state();
    println!(
        "score={} wave={} level={} kills={} bosses={} nights={} cleared={} stardust={} best={}",
        session.score,
        session.wave,
        state.player.level,
        stats.kills,
        stats.boss_kills,
        stats.nights,
        stats.levels_cleared,
        state.ledger.get(ResourceKind::Stardust),
        state.records.best_score,
    );
    if !config.quiet {
        println!(
            "weather={} novas={} ultimates={} achievements={} runs={} stardust_earned={}",
            stats.weather_fronts,
            stats.novas,
            stats.ultimates,
            stats.achievements,
            stats.runs_finished,
            stats.stardust_earned,
        );
        if let Some(result) = &stats.challenge_result {
            println!("challenge: {result}");
        }
    }
    Ok(stats)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let default_level = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(message) => {
            warn!(%message, "simulation failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
