//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch, Mutex as AsyncMutex};
use tracing::{info, warn};

use crate::{
    error::{AppError, Result},
    settings::{Settings, SettingsStore},
    utils::now_ms,
};

use super::{TimerController, TimerEvent, TimerSnapshot};

/// Shared owner of the timer controller and its collaborator channels.
///
/// Every input goes through the one controller lock, so samples, commands
/// and settings changes are applied strictly one after another.
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<TimerController>,
    store: SettingsStore,
    /// Held across the file write and the apply so saves land in one order
    save_guard: AsyncMutex<()>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for controller events (presentation sink)
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for the latest timer snapshot
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    pub fn new(port: u16, host: String, settings: Settings, store: SettingsStore) -> Self {
        let controller = TimerController::new(settings);
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot(now_ms()));

        Self {
            controller: Mutex::new(controller),
            store,
            save_guard: AsyncMutex::new(()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Run one controller input under the lock, then publish its events
    fn drive<T, F>(&self, now: i64, input: F) -> std::result::Result<T, String>
    where
        F: FnOnce(&mut TimerController) -> T,
        T: AsRef<[TimerEvent]>,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))?;

        let output = input(&mut *controller);

        // Publish while still locked so events keep the order of their inputs
        self.publish(output.as_ref());
        self.snapshot_tx.send_replace(controller.snapshot(now));
        Ok(output)
    }

    fn publish(&self, events: &[TimerEvent]) {
        for event in events {
            // No subscribers is fine; the presentation sink is optional
            let _ = self.event_tx.send(event.clone());
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Feed a periodic idle-time sample
    pub fn sample_idle(&self, idle_seconds: u64, now: i64) -> std::result::Result<(), String> {
        self.drive(now, |c| c.sample_idle(idle_seconds, now))?;
        Ok(())
    }

    /// Feed the periodic break evaluation
    pub fn break_tick(&self, now: i64) -> std::result::Result<(), String> {
        self.drive(now, |c| c.break_tick(now))?;
        Ok(())
    }

    pub fn system_suspend(&self, now: i64) -> std::result::Result<(), String> {
        self.record_action("suspend");
        self.drive(now, |c| c.system_suspend(now))?;
        Ok(())
    }

    pub fn system_resume(&self, now: i64) -> std::result::Result<(), String> {
        self.record_action("resume");
        self.drive(now, |c| c.system_resume(now))?;
        Ok(())
    }

    /// Apply a user command; invalid commands leave the timer untouched
    pub fn user_command(&self, command: UserCommand) -> std::result::Result<TimerSnapshot, CommandError> {
        let now = now_ms();
        info!("User command: {}", command.name());
        self.record_action(command.name());

        let result = self.drive(now, |c| match command {
            UserCommand::Start => ActionOutcome(c.user_start(now)),
            UserCommand::Pause => ActionOutcome(c.user_pause(now)),
            UserCommand::Resume => ActionOutcome(c.user_resume(now)),
            UserCommand::Reset { start_break } => ActionOutcome(Ok(c.user_reset(start_break, now))),
        }).map_err(CommandError::Internal)?;

        match result.0 {
            Ok(_) => Ok(self.snapshot()),
            Err(e) => {
                warn!("Ignoring user command: {}", e);
                Err(CommandError::Rejected(e))
            }
        }
    }

    /// Persist new settings and, only if that succeeds, hard-reset the timer with them
    pub async fn save_settings(&self, settings: Settings) -> Result<Settings> {
        let _save = self.save_guard.lock().await;
        self.record_action("save-settings");

        if let Err(e) = self.store.save(&settings).await {
            warn!("Settings not applied: {}", e);
            self.publish(&[TimerEvent::SettingsSaveFailed { error: e.to_string() }]);
            return Err(e);
        }

        let now = now_ms();
        self.drive(now, |c| c.apply_settings(settings, now))
            .map_err(AppError::SettingsSave)?;
        self.publish(&[TimerEvent::SettingsSaved { settings }]);
        info!("Settings applied, timer reset");
        Ok(settings)
    }

    pub fn settings(&self) -> Settings {
        self.snapshot_tx.borrow().settings
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Fresh snapshot evaluated at `now`
    pub fn snapshot_at(&self, now: i64) -> std::result::Result<TimerSnapshot, String> {
        self.controller.lock()
            .map(|c| c.snapshot(now))
            .map_err(|e| format!("Failed to lock timer controller: {}", e))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

/// Commands arriving from the user command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Start,
    Pause,
    Resume,
    Reset { start_break: bool },
}

impl UserCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UserCommand::Start => "start",
            UserCommand::Pause => "pause",
            UserCommand::Resume => "resume",
            UserCommand::Reset { .. } => "reset",
        }
    }
}

#[derive(Debug)]
pub enum CommandError {
    /// Not valid in the current phase
    Rejected(AppError),
    Internal(String),
}

struct ActionOutcome(Result<Vec<TimerEvent>>);

impl AsRef<[TimerEvent]> for ActionOutcome {
    fn as_ref(&self) -> &[TimerEvent] {
        match &self.0 {
            Ok(events) => events,
            Err(_) => &[],
        }
    }
}
