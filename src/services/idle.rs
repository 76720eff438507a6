//! Idle-time probe backed by an external command

use tokio::process::Command;
use tracing::debug;

/// Run the idle probe and return whole seconds since the last user input.
///
/// The command (e.g. `xprintidle`) must print the idle time in milliseconds.
pub async fn query_idle_seconds(command: &str) -> Result<u64, String> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| "Idle command is empty".to_string())?;

    let output = Command::new(program)
        .args(parts)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr.trim()));
    }

    let idle = parse_idle_output(&String::from_utf8_lossy(&output.stdout))?;
    debug!("Idle for {}s", idle);
    Ok(idle)
}

/// Parse a millisecond idle reading into whole seconds
pub fn parse_idle_output(stdout: &str) -> Result<u64, String> {
    stdout
        .trim()
        .parse::<u64>()
        .map(|ms| ms / 1000)
        .map_err(|e| format!("Unexpected idle probe output {:?}: {}", stdout.trim(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idle_output() {
        assert_eq!(parse_idle_output("0\n"), Ok(0));
        assert_eq!(parse_idle_output("999"), Ok(0));
        assert_eq!(parse_idle_output(" 61500 \n"), Ok(61));
        assert!(parse_idle_output("").is_err());
        assert!(parse_idle_output("idle: 12").is_err());
    }

    #[tokio::test]
    async fn test_empty_command_is_an_error() {
        assert!(query_idle_seconds("   ").await.is_err());
    }
}
