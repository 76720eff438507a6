//! Desktop notifications for break time

use tokio::process::Command;
use tracing::{info, warn};

const BREAK_TITLE: &str = "Break Time!";

/// Show the break notification through `notify-send`
pub async fn send_break_notification(body: &str) -> Result<(), String> {
    info!("Sending break notification");

    let output = Command::new("notify-send")
        .args(["--urgency=critical", "--app-name=breather", BREAK_TITLE, body])
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    Ok(())
}

/// Fire-and-forget variant; failures are only logged
pub fn spawn_break_notification(body: String) {
    tokio::spawn(async move {
        if let Err(e) = send_break_notification(&body).await {
            warn!("Break notification not shown: {}", e);
        }
    });
}
