//! Activity monitor background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{services::query_idle_seconds, state::AppState, utils::now_ms};

/// Smallest wall-clock gap between two checks that counts as a system suspend
const MIN_SUSPEND_GAP_MS: i64 = 15_000;

fn check_ticker(check_interval_ms: u64) -> Interval {
    let mut ticker = interval(Duration::from_millis(check_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Whether the time since the previous check means the machine was asleep
pub fn is_suspend_gap(elapsed_ms: i64, check_interval_ms: u64) -> bool {
    let threshold = MIN_SUSPEND_GAP_MS.max(3 * check_interval_ms as i64);
    elapsed_ms > threshold
}

/// Background task that samples idle time and drives break countdowns.
///
/// Without an idle command no samples are taken; the timer then only moves
/// through user commands, `/idle` reports and break ticks.
pub async fn activity_monitor_task(state: Arc<AppState>, idle_command: Option<String>) {
    info!("Starting activity monitor task");

    let mut check_interval = state.settings().check_interval;
    let mut ticker = check_ticker(check_interval);
    let mut last_check: Option<i64> = None;
    let mut probe_failing = false;

    loop {
        ticker.tick().await;
        let now = now_ms();

        if let Some(last) = last_check {
            if is_suspend_gap(now - last, check_interval) {
                info!("System wake-up detected after {}ms", now - last);
                if let Err(e) = state.system_suspend(last) {
                    error!("Failed to record suspend: {}", e);
                }
                if let Err(e) = state.system_resume(now) {
                    error!("Failed to record resume: {}", e);
                }
            }
        }
        last_check = Some(now);

        if let Some(command) = idle_command.as_deref() {
            match query_idle_seconds(command).await {
                Ok(idle_seconds) => {
                    if probe_failing {
                        info!("Idle probe recovered");
                        probe_failing = false;
                    }
                    if let Err(e) = state.sample_idle(idle_seconds, now) {
                        error!("Failed to apply idle sample: {}", e);
                    }
                }
                Err(e) if probe_failing => debug!("Idle probe still failing: {}", e),
                Err(e) => {
                    warn!("Idle probe failed: {}", e);
                    probe_failing = true;
                }
            }
        }

        if let Err(e) = state.break_tick(now) {
            error!("Failed to evaluate break: {}", e);
        }

        let current = state.settings().check_interval;
        if current != check_interval {
            info!("Check interval changed to {}ms", current);
            check_interval = current;
            ticker = check_ticker(check_interval);
        }
    }
}
