//! External service module
//! 
//! Platform glue the timer talks to: the idle-time probe, desktop
//! notifications, and tool availability checks.

pub mod idle;
pub mod notify;
pub mod system;

// Re-export main functions
pub use idle::*;
pub use notify::*;
pub use system::*;
