//! Application shell: configuration, state machine, errors

pub mod config;
pub mod error;
pub mod state;

pub use config::{default_config_path, AppConfig};
pub use error::ConsoleError;
pub use state::{App, AppState};
