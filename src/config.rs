//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::settings::SettingsStore;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "breather")]
#[command(about = "An activity-aware break reminder that pauses while you are away")]
#[command(version)]
pub struct Config {
    /// Port for the command API
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Command printing milliseconds since the last user input
    #[arg(long, default_value = "xprintidle")]
    pub idle_command: String,

    /// Do not sample idle time; rely on POST /idle reports instead
    #[arg(long)]
    pub no_idle_probe: bool,

    /// Do not show desktop notifications at break time
    #[arg(long)]
    pub no_notifications: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn settings_store(&self) -> SettingsStore {
        match &self.settings {
            Some(path) => SettingsStore::new(path.clone()),
            None => SettingsStore::in_config_dir(),
        }
    }

    /// Idle probe command, unless probing is disabled
    pub fn idle_probe(&self) -> Option<String> {
        if self.no_idle_probe {
            None
        } else {
            Some(self.idle_command.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["breather"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.idle_probe().as_deref(), Some("xprintidle"));
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "breather",
            "--no-idle-probe",
            "--settings",
            "/tmp/breather.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.idle_probe(), None);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(
            config.settings_store().path(),
            std::path::Path::new("/tmp/breather.json")
        );
    }
}
