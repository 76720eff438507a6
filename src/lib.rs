//! Breather - an activity-aware break reminder
//! 
//! This library provides the work/break timer state machine that follows
//! system idle time, together with the daemon glue around it: settings
//! persistence, idle probing, notifications and an HTTP command API.

pub mod config;
pub mod error;
pub mod settings;
pub mod quotes;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use settings::{Settings, SettingsStore};
pub use state::{AppState, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
