//! Timer state structure and phase bookkeeping

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse mode of the work timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Break,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Break => "on break",
        };
        f.write_str(name)
    }
}

/// Why a timer is paused. Only automatic pauses resume on activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseKind {
    Automatic,
    Manual,
}

/// Timer state. Timestamps are wall-clock milliseconds.
///
/// Each variant carries exactly the fields that are meaningful in that
/// phase, so a pause timestamp exists only while paused and a break
/// deadline only while on break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No work period in progress
    Idle,
    /// Work period counting down since `started_at`
    Running { started_at: i64 },
    /// Work period frozen at `paused_at`
    Paused {
        started_at: i64,
        paused_at: i64,
        kind: PauseKind,
    },
    /// Mandatory rest until `deadline`
    Break { deadline: i64 },
}

impl TimerState {
    /// Create a new idle timer state
    pub fn new() -> Self {
        TimerState::Idle
    }

    pub fn phase(&self) -> Phase {
        match self {
            TimerState::Idle => Phase::Idle,
            TimerState::Running { .. } => Phase::Running,
            TimerState::Paused { .. } => Phase::Paused,
            TimerState::Break { .. } => Phase::Break,
        }
    }

    pub fn pause_kind(&self) -> Option<PauseKind> {
        match self {
            TimerState::Paused { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn started_at(&self) -> Option<i64> {
        match self {
            TimerState::Running { started_at } | TimerState::Paused { started_at, .. } => {
                Some(*started_at)
            }
            _ => None,
        }
    }

    /// Work time left, measured at `now` (or at the pause instant when paused)
    pub fn remaining_work(&self, work_duration: u64, now: i64) -> Option<i64> {
        let work = i64::try_from(work_duration).unwrap_or(i64::MAX);
        match *self {
            TimerState::Running { started_at } => {
                Some(work.saturating_sub(now.saturating_sub(started_at)))
            }
            TimerState::Paused {
                started_at,
                paused_at,
                ..
            } => Some(work.saturating_sub(paused_at.saturating_sub(started_at))),
            _ => None,
        }
    }

    /// Break time left at `now`
    pub fn remaining_break(&self, now: i64) -> Option<i64> {
        match *self {
            TimerState::Break { deadline } => Some(deadline.saturating_sub(now)),
            _ => None,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_remaining_is_frozen() {
        let state = TimerState::Paused {
            started_at: 0,
            paused_at: 1500,
            kind: PauseKind::Automatic,
        };
        assert_eq!(state.remaining_work(5000, 1500), Some(3500));
        assert_eq!(state.remaining_work(5000, 99_999), Some(3500));
    }

    #[test]
    fn test_phase_specific_fields() {
        let idle = TimerState::new();
        assert_eq!(idle.phase(), Phase::Idle);
        assert_eq!(idle.started_at(), None);
        assert_eq!(idle.remaining_work(5000, 0), None);

        let on_break = TimerState::Break { deadline: 2000 };
        assert_eq!(on_break.remaining_break(500), Some(1500));
        assert_eq!(on_break.pause_kind(), None);
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Break).unwrap(), "\"break\"");
        assert_eq!(
            serde_json::to_string(&PauseKind::Manual).unwrap(),
            "\"manual\""
        );
    }
}
