//! Activity-aware timer controller
//!
//! The state machine that decides, from idle samples, user commands and
//! power events, whether the work timer is running, paused or on break.
//! Every input carries `now`; deadlines are stored and compared against it
//! on each evaluation, so no callback can outlive the phase that set it.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::{AppError, Result},
    quotes::random_quote,
    settings::Settings,
};

use super::{
    events::{TimerEvent, TimerStatus},
    timer_state::{PauseKind, Phase, TimerState},
};

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub pause_kind: Option<PauseKind>,
    /// Work time left; the full work duration when idle or on break
    pub remaining_time: i64,
    pub remaining_break_time: Option<i64>,
    pub settings: Settings,
}

/// Owns the timer state and the settings that parameterize it
#[derive(Debug, Clone)]
pub struct TimerController {
    settings: Settings,
    state: TimerState,
}

impl TimerController {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: TimerState::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn snapshot(&self, now: i64) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.state.phase(),
            pause_kind: self.state.pause_kind(),
            remaining_time: self
                .state
                .remaining_work(self.settings.work_duration, now)
                .unwrap_or(self.work_ms()),
            remaining_break_time: self.state.remaining_break(now).map(|r| r.max(0)),
            settings: self.settings,
        }
    }

    /// Evaluate one idle-time sample
    pub fn sample_idle(&mut self, idle_seconds: u64, now: i64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        let inactive =
            idle_seconds.saturating_mul(1000) >= self.settings.inactivity_threshold;

        if inactive {
            if let TimerState::Running { .. } = self.state {
                debug!("Idle for {}s, pausing work timer", idle_seconds);
                self.pause(PauseKind::Automatic, now, &mut events);
            }
        } else {
            self.on_activity(now, &mut events);
        }

        if let TimerState::Running { started_at } = self.state {
            self.evaluate_running(started_at, now, &mut events);
        }

        events
    }

    /// Advance the break countdown, ending the break once its deadline passes
    pub fn break_tick(&mut self, now: i64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if let TimerState::Break { deadline } = self.state {
            let remaining_break_time = deadline.saturating_sub(now);
            if remaining_break_time > 0 {
                events.push(TimerEvent::BreakTick {
                    remaining_break_time,
                });
            } else {
                info!("Break over, starting a new work period");
                self.start(now, &mut events);
            }
        }
        events
    }

    pub fn user_start(&mut self, now: i64) -> Result<Vec<TimerEvent>> {
        if self.state != TimerState::Idle {
            return Err(self.invalid("start"));
        }
        let mut events = Vec::new();
        self.start(now, &mut events);
        Ok(events)
    }

    pub fn user_pause(&mut self, now: i64) -> Result<Vec<TimerEvent>> {
        if self.phase() != Phase::Running {
            return Err(self.invalid("pause"));
        }
        let mut events = Vec::new();
        self.pause(PauseKind::Manual, now, &mut events);
        Ok(events)
    }

    pub fn user_resume(&mut self, now: i64) -> Result<Vec<TimerEvent>> {
        let TimerState::Paused {
            started_at,
            paused_at,
            ..
        } = self.state
        else {
            return Err(self.invalid("resume"));
        };

        let mut events = Vec::new();
        self.resume(started_at, paused_at, now, &mut events);
        Ok(events)
    }

    /// Clear to idle from any phase, optionally going straight into a break
    pub fn user_reset(&mut self, start_break: bool, now: i64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        self.reset(&mut events);
        if start_break {
            self.enter_break(now, &mut events);
        }
        events
    }

    /// The machine is going to sleep; a running timer pauses automatically
    pub fn system_suspend(&mut self, now: i64) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if let TimerState::Running { .. } = self.state {
            info!("System suspending, pausing work timer");
            self.pause(PauseKind::Automatic, now, &mut events);
        }
        events
    }

    /// The machine woke up; treated as a sample showing full activity
    pub fn system_resume(&mut self, now: i64) -> Vec<TimerEvent> {
        self.sample_idle(0, now)
    }

    /// Replace the settings and hard-reset the state machine
    pub fn apply_settings(&mut self, settings: Settings, now: i64) -> Vec<TimerEvent> {
        debug!("Applying settings at {}: {:?}", now, settings);
        self.settings = settings;
        let mut events = Vec::new();
        self.reset(&mut events);
        events
    }

    fn on_activity(&mut self, now: i64, events: &mut Vec<TimerEvent>) {
        match self.state {
            TimerState::Idle => self.start(now, events),
            TimerState::Paused {
                started_at,
                paused_at,
                kind: PauseKind::Automatic,
            } => {
                let away = now.saturating_sub(paused_at);
                if away >= self.reset_ms() {
                    info!("Away for {}ms, discarding the work period", away);
                    self.reset(events);
                } else {
                    self.resume(started_at, paused_at, now, events);
                }
            }
            // Manual pauses wait for an explicit resume; breaks end on their deadline
            TimerState::Paused {
                kind: PauseKind::Manual,
                ..
            }
            | TimerState::Break { .. }
            | TimerState::Running { .. } => {}
        }
    }

    fn evaluate_running(&mut self, started_at: i64, now: i64, events: &mut Vec<TimerEvent>) {
        let remaining_time = self.work_ms().saturating_sub(now.saturating_sub(started_at));
        if remaining_time <= 0 {
            self.enter_break(now, events);
        } else {
            events.push(TimerEvent::Tick { remaining_time });
        }
    }

    fn start(&mut self, now: i64, events: &mut Vec<TimerEvent>) {
        info!("Starting work timer for {}ms", self.settings.work_duration);
        self.state = TimerState::Running { started_at: now };
        events.push(TimerEvent::update(
            TimerStatus::Started,
            self.work_ms(),
        ));
    }

    fn pause(&mut self, kind: PauseKind, now: i64, events: &mut Vec<TimerEvent>) {
        let Some(started_at) = self.state.started_at() else {
            return;
        };
        self.state = TimerState::Paused {
            started_at,
            paused_at: now,
            kind,
        };
        let remaining_time = self.work_ms().saturating_sub(now.saturating_sub(started_at));
        info!("Work timer paused ({:?}), {}ms left", kind, remaining_time);
        events.push(TimerEvent::update(TimerStatus::Paused, remaining_time));
    }

    /// Shift the start by the pause length so the remaining budget is unchanged
    fn resume(
        &mut self,
        started_at: i64,
        paused_at: i64,
        now: i64,
        events: &mut Vec<TimerEvent>,
    ) {
        let started_at = started_at.saturating_add(now.saturating_sub(paused_at));
        self.state = TimerState::Running { started_at };
        let remaining_time = self.work_ms().saturating_sub(now.saturating_sub(started_at));
        info!("Work timer resumed, {}ms left", remaining_time);
        events.push(TimerEvent::update(TimerStatus::Resumed, remaining_time));
        if remaining_time <= 0 {
            self.enter_break(now, events);
        }
    }

    fn reset(&mut self, events: &mut Vec<TimerEvent>) {
        self.state = TimerState::Idle;
        events.push(TimerEvent::update(
            TimerStatus::Reset,
            self.work_ms(),
        ));
    }

    fn enter_break(&mut self, now: i64, events: &mut Vec<TimerEvent>) {
        info!("Break time for {}ms", self.settings.reset_threshold);
        self.state = TimerState::Break {
            deadline: now.saturating_add(self.reset_ms()),
        };
        events.push(TimerEvent::BreakTime {
            quote: random_quote().to_string(),
        });
        events.push(TimerEvent::update(
            TimerStatus::Reset,
            self.work_ms(),
        ));
    }

    fn work_ms(&self) -> i64 {
        i64::try_from(self.settings.work_duration).unwrap_or(i64::MAX)
    }

    fn reset_ms(&self) -> i64 {
        i64::try_from(self.settings.reset_threshold).unwrap_or(i64::MAX)
    }

    fn invalid(&self, action: &'static str) -> AppError {
        AppError::InvalidAction {
            action,
            phase: self.phase(),
        }
    }
}
