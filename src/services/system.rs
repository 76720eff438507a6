//! Availability checks for the external tools the daemon relies on

use tokio::process::Command;
use tracing::info;

/// Check that a program can be spawned at all
async fn check_program_available(program: &str, probe_arg: &str) -> Result<(), String> {
    Command::new(program)
        .arg(probe_arg)
        .output()
        .await
        .map_err(|_| format!("{} is not available on this system", program))?;

    info!("{} is available", program);
    Ok(())
}

/// Check the idle probe command (first word of the configured command)
pub async fn check_idle_probe_available(command: &str) -> Result<(), String> {
    let program = command
        .split_whitespace()
        .next()
        .ok_or_else(|| "Idle command is empty".to_string())?;
    check_program_available(program, "--version").await
}

/// Check that desktop notifications can be sent
pub async fn check_notifier_available() -> Result<(), String> {
    check_program_available("notify-send", "--version").await
}
