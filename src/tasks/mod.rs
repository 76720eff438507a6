//! Background tasks module
//! 
//! Tasks that run alongside the HTTP server: idle sampling with break ticks,
//! and the presentation sink that reacts to timer events.

pub mod activity_monitor;
pub mod presentation;

// Re-export main functions
pub use activity_monitor::activity_monitor_task;
pub use presentation::presentation_task;
