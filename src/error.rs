//! Error types for the break timer
//!
//! None of these are fatal: every failure degrades to "keep the previous
//! state and report".

use thiserror::Error;

use crate::state::Phase;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load settings: {0}")]
    SettingsLoad(String),

    #[error("Failed to save settings: {0}")]
    SettingsSave(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Cannot {action} while timer is {phase}")]
    InvalidAction { action: &'static str, phase: Phase },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
