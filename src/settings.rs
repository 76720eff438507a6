//! Timer settings and their JSON file store
//!
//! Settings are a single flat record of millisecond durations. A missing or
//! corrupt file never stops the daemon: loading falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, Result};

/// Default work period (5 minutes)
pub const DEFAULT_WORK_DURATION_MS: u64 = 5 * 60 * 1000;
/// Default idle time after which a running timer pauses (1 minute)
pub const DEFAULT_INACTIVITY_THRESHOLD_MS: u64 = 60 * 1000;
/// Default pause length that invalidates the work period, also the break length (10 minutes)
pub const DEFAULT_RESET_THRESHOLD_MS: u64 = 10 * 60 * 1000;
/// Default idle sampling cadence (1 second)
pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 1000;

/// Longest duration any setting may hold (7 days)
pub const MAX_DURATION_MS: u64 = 7 * 24 * 60 * 60 * 1000;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Timer parameters, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_work_duration")]
    pub work_duration: u64,
    #[serde(default = "default_inactivity_threshold")]
    pub inactivity_threshold: u64,
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: u64,
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
}

fn default_work_duration() -> u64 {
    DEFAULT_WORK_DURATION_MS
}

fn default_inactivity_threshold() -> u64 {
    DEFAULT_INACTIVITY_THRESHOLD_MS
}

fn default_reset_threshold() -> u64 {
    DEFAULT_RESET_THRESHOLD_MS
}

fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: DEFAULT_WORK_DURATION_MS,
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD_MS,
            reset_threshold: DEFAULT_RESET_THRESHOLD_MS,
            check_interval: DEFAULT_CHECK_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Reject values the timer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.work_duration == 0 {
            return Err(AppError::InvalidSettings(
                "workDuration must be greater than zero".to_string(),
            ));
        }
        if self.inactivity_threshold == 0 {
            return Err(AppError::InvalidSettings(
                "inactivityThreshold must be greater than zero".to_string(),
            ));
        }
        if self.check_interval == 0 {
            return Err(AppError::InvalidSettings(
                "checkInterval must be greater than zero".to_string(),
            ));
        }
        let durations = [
            ("workDuration", self.work_duration),
            ("inactivityThreshold", self.inactivity_threshold),
            ("resetThreshold", self.reset_threshold),
            ("checkInterval", self.check_interval),
        ];
        for (name, value) in durations {
            if value > MAX_DURATION_MS {
                return Err(AppError::InvalidSettings(format!(
                    "{} must be at most {}ms",
                    name, MAX_DURATION_MS
                )));
            }
        }
        Ok(())
    }
}

/// Reads and writes the settings record as a JSON file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located in the platform config directory, or the working directory
    pub fn in_config_dir() -> Self {
        let dir = dirs::config_dir()
            .map(|d| d.join("breather"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on a missing or corrupt file
    pub async fn load(&self) -> Settings {
        match self.try_load().await {
            Ok(settings) => {
                info!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                warn!("{}. Using default settings.", e);
                Settings::default()
            }
        }
    }

    async fn try_load(&self) -> Result<Settings> {
        let data = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::SettingsLoad(format!("{}: {}", self.path.display(), e)))?;

        let settings: Settings = serde_json::from_str(&data)
            .map_err(|e| AppError::SettingsLoad(format!("{}: {}", self.path.display(), e)))?;

        settings
            .validate()
            .map_err(|e| AppError::SettingsLoad(e.to_string()))?;

        Ok(settings)
    }

    /// Persist settings; the caller keeps its previous settings on error
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;

        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::SettingsSave(e.to_string()))?;
            }
        }

        fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::SettingsSave(format!("{}: {}", self.path.display(), e)))?;

        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("settings.json"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let (store, _temp) = create_test_store();

        let settings = store.load().await;

        assert_eq!(settings.work_duration, 5 * 60 * 1000);
        assert_eq!(settings.inactivity_threshold, 60 * 1000);
        assert_eq!(settings.reset_threshold, 10 * 60 * 1000);
        assert_eq!(settings.check_interval, 1000);
    }

    #[tokio::test]
    async fn test_corrupt_file_yields_defaults() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load().await, Settings::default());
    }

    #[tokio::test]
    async fn test_partial_file_fills_missing_keys() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), r#"{"workDuration": 2700000}"#).unwrap();

        let settings = store.load().await;
        assert_eq!(settings.work_duration, 2_700_000);
        assert_eq!(settings.inactivity_threshold, DEFAULT_INACTIVITY_THRESHOLD_MS);
        assert_eq!(settings.check_interval, DEFAULT_CHECK_INTERVAL_MS);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (store, _temp) = create_test_store();
        let settings = Settings {
            work_duration: 45 * 60 * 1000,
            inactivity_threshold: 2 * 60 * 1000,
            reset_threshold: 5 * 60 * 1000,
            check_interval: 500,
        };

        store.save(&settings).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"workDuration\""));
        assert_eq!(store.load().await, settings);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("nested/dir/settings.json"));

        store.save(&Settings::default()).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_save_to_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().to_path_buf());

        let result = store.save(&Settings::default()).await;
        assert!(matches!(result, Err(AppError::SettingsSave(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_durations() {
        let at_limit = Settings {
            reset_threshold: MAX_DURATION_MS,
            ..Settings::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_long_break = Settings {
            reset_threshold: i64::MAX as u64,
            ..Settings::default()
        };
        assert!(matches!(too_long_break.validate(), Err(AppError::InvalidSettings(_))));

        let too_long_work = Settings {
            work_duration: u64::MAX,
            ..Settings::default()
        };
        assert!(matches!(too_long_work.validate(), Err(AppError::InvalidSettings(_))));
    }

    #[tokio::test]
    async fn test_oversized_file_values_fall_back_to_defaults() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), r#"{"resetThreshold": 9223372036854775807}"#).unwrap();

        assert_eq!(store.load().await, Settings::default());
    }

    #[tokio::test]
    async fn test_invalid_settings_are_not_written() {
        let (store, _temp) = create_test_store();
        let settings = Settings {
            work_duration: 0,
            ..Settings::default()
        };

        let result = store.save(&settings).await;
        assert!(matches!(result, Err(AppError::InvalidSettings(_))));
        assert!(!store.path().exists());
    }
}
