//! Events emitted by the timer controller for the presentation layer

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Status attached to a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Started,
    Paused,
    Resumed,
    Reset,
}

/// Everything the controller tells its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    /// A phase transition
    #[serde(rename_all = "camelCase")]
    TimerUpdate {
        status: TimerStatus,
        remaining_time: i64,
    },
    /// Periodic work countdown while running
    #[serde(rename_all = "camelCase")]
    Tick { remaining_time: i64 },
    /// Periodic break countdown
    #[serde(rename_all = "camelCase")]
    BreakTick { remaining_break_time: i64 },
    /// Request to show the break notification, once per break
    BreakTime { quote: String },
    SettingsSaved { settings: Settings },
    SettingsSaveFailed { error: String },
}

impl TimerEvent {
    pub fn update(status: TimerStatus, remaining_time: i64) -> Self {
        TimerEvent::TimerUpdate {
            status,
            remaining_time,
        }
    }

    /// Name used for SSE event types and logs
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::TimerUpdate { .. } => "timer-update",
            TimerEvent::Tick { .. } => "tick",
            TimerEvent::BreakTick { .. } => "break-tick",
            TimerEvent::BreakTime { .. } => "break-time",
            TimerEvent::SettingsSaved { .. } => "settings-saved",
            TimerEvent::SettingsSaveFailed { .. } => "settings-save-failed",
        }
    }
}
