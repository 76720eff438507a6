//! Utility functions module
//! 
//! Clock reads, display formatting and signal handling shared by the
//! daemon's tasks and handlers.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main functions
pub use clock::now_ms;
pub use format::format_remaining;
pub use signals::shutdown_signal;
