//! Settings file I/O

use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings as settings_config;
use crate::error::{R3Error, Result};

use super::models::Settings;

/// Handles reading and writing the settings file
pub struct SettingsStore {
    settings_path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Create a store using the first settings file found on the search path.
    ///
    /// Falls back to `~/.k2hr3client.yaml` when none of them exists.
    pub fn new() -> Self {
        let candidates = Self::candidate_paths(
            env::var_os(settings_config::ENV_VAR).map(PathBuf::from),
            dirs::home_dir(),
        );
        let settings_path = candidates
            .iter()
            .find(|p| p.is_file())
            .or_else(|| candidates.iter().find(|p| p.ends_with(settings_config::HOME_FILE_NAME)))
            .cloned()
            .unwrap_or_else(|| PathBuf::from(settings_config::FILE_NAME));
        debug!("settings file: {}", settings_path.display());
        Self { settings_path }
    }

    /// Create a store with a custom settings path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Settings files in lookup order
    fn candidate_paths(explicit: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            paths.push(path);
        }
        paths.push(PathBuf::from(settings_config::FILE_NAME));
        if let Some(home) = home {
            paths.push(home.join(settings_config::HOME_FILE_NAME));
        }
        paths.push(PathBuf::from(settings_config::SYSTEM_FILE_PATH));
        paths
    }

    /// Load the settings from disk.
    /// Returns Default if file doesn't exist, errors on corrupt YAML.
    pub fn load(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            debug!(
                "{} not found, using default settings",
                self.settings_path.display()
            );
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.settings_path).map_err(|e| {
            R3Error::Config(format!(
                "Failed to read settings {}: {}",
                self.settings_path.display(),
                e
            ))
        })?;

        serde_yml::from_str(&content).map_err(|e| {
            R3Error::Config(format!(
                "Failed to parse settings {}: {}",
                self.settings_path.display(),
                e
            ))
        })
    }

    /// Save the settings to disk, creating the parent directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self
            .settings_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|e| {
                R3Error::Config(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let yaml = serde_yml::to_string(settings)
            .map_err(|e| R3Error::Config(format!("Failed to serialize settings: {}", e)))?;

        // Atomic write: tmp file, then rename
        let tmp_path = self.settings_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, &yaml).map_err(|e| {
            R3Error::Config(format!(
                "Failed to write temp settings file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        fs::rename(&tmp_path, &self.settings_path).map_err(|e| {
            R3Error::Config(format!(
                "Failed to rename temp settings file to {}: {}",
                self.settings_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
