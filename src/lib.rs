pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{PracticumClient, TelegramNotifier};
pub use config::{BotSettings, TomlConfig};
pub use core::poll_loop::{CycleOutcome, PollLoop};
pub use core::tracker::ChangeTracker;
pub use utils::error::{BotError, Result};
