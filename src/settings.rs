//! User settings persistence.
//!
//! Stores the preferred column names so logs from a different exporter can
//! be opened without passing overrides every time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::state::{
    PREFERRED_LAT_COLUMN, PREFERRED_LON_COLUMN, PREFERRED_TIME_COLUMN, PREFERRED_YAW_COLUMN,
};

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Clock column holding microsecond ticks
    #[serde(default = "default_time_column")]
    pub time_column: String,
    #[serde(default = "default_lat_column")]
    pub lat_column: String,
    #[serde(default = "default_lon_column")]
    pub lon_column: String,
    /// Compass heading column (degrees)
    #[serde(default = "default_yaw_column")]
    pub yaw_column: String,
}

fn default_version() -> u32 {
    1
}

fn default_time_column() -> String {
    PREFERRED_TIME_COLUMN.to_string()
}

fn default_lat_column() -> String {
    PREFERRED_LAT_COLUMN.to_string()
}

fn default_lon_column() -> String {
    PREFERRED_LON_COLUMN.to_string()
}

fn default_yaw_column() -> String {
    PREFERRED_YAW_COLUMN.to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            time_column: default_time_column(),
            lat_column: default_lat_column(),
            lon_column: default_lon_column(),
            yaw_column: default_yaw_column(),
        }
    }
}

impl UserSettings {
    /// Get the config directory path for dronelog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("dronelog"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("dronelog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
