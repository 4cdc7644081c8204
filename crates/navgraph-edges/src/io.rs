//! JSON helpers for edge calculator settings.

use std::{fs, path::Path};

use crate::error::SettingsError;
use crate::settings::EdgeCalculatorSettings;

#[derive(thiserror::Error, Debug)]
pub enum SettingsIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl EdgeCalculatorSettings {
    /// Load settings from a JSON file and validate them.
    ///
    /// Missing fields take their default values.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SettingsIoError> {
        let raw = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SettingsIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
