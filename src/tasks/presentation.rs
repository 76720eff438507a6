//! Presentation sink background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    services::spawn_break_notification,
    state::{AppState, TimerEvent},
    utils::format_remaining,
};

/// Title a tray icon or dock badge would show for a countdown event
pub fn tray_title(event: &TimerEvent) -> Option<String> {
    match event {
        TimerEvent::Tick { remaining_time } => {
            Some(format!("Work {}", format_remaining(*remaining_time)))
        }
        TimerEvent::BreakTick {
            remaining_break_time,
        } => Some(format!("Break {}", format_remaining(*remaining_break_time))),
        _ => None,
    }
}

/// Background task that turns timer events into logs and desktop notifications
pub async fn presentation_task(state: Arc<AppState>, notifications: bool) {
    info!("Starting presentation task");

    let mut event_rx = state.subscribe();

    loop {
        match event_rx.recv().await {
            Ok(event) => present(&event, notifications),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Presentation lagged behind, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping presentation task");
                break;
            }
        }
    }
}

fn present(event: &TimerEvent, notifications: bool) {
    if let Some(title) = tray_title(event) {
        debug!("{}", title);
        return;
    }

    match event {
        TimerEvent::TimerUpdate {
            status,
            remaining_time,
        } => {
            info!("Timer {:?} ({} left)", status, format_remaining(*remaining_time));
        }
        TimerEvent::BreakTime { quote } => {
            info!("Break time! {}", quote);
            if notifications {
                spawn_break_notification(quote.clone());
            }
        }
        TimerEvent::SettingsSaved { settings } => {
            info!("Settings saved: {:?}", settings);
        }
        TimerEvent::SettingsSaveFailed { error } => {
            warn!("Settings save failed: {}", error);
        }
        TimerEvent::Tick { .. } | TimerEvent::BreakTick { .. } => {}
    }
}
