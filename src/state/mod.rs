//! State management module
//! 
//! The timer data model, the controller that drives it, the events it emits,
//! and the shared application state that owns it.

pub mod timer_state;
pub mod events;
pub mod controller;
pub mod app_state;

// Re-export main types
pub use timer_state::{PauseKind, Phase, TimerState};
pub use events::{TimerEvent, TimerStatus};
pub use controller::{TimerController, TimerSnapshot};
pub use app_state::{AppState, CommandError, UserCommand};
