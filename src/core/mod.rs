//! Engine core: constants, aggregate state, scheduler and the command surface.

pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod events;
pub mod game_state;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, Settings};
pub use engine::Engine;
pub use events::{EventBus, GameEvent, PresentationEvent};
pub use game_state::GameState;
pub use timers::{ScheduledEffect, Scheduler, TaskHandle};
