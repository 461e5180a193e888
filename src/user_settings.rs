use crate::config::{clamp_page_size, Config};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "swapfees_settings.json";

fn default_page_size() -> Option<u32> {
    None // None means use the environment / built-in default
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Backend base URL override (None = use API_URL / default)
    #[serde(default)]
    pub api_url: Option<String>,
    /// Rows per page override
    #[serde(default = "default_page_size")]
    pub page_size: Option<u32>,
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("swapfees");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load settings from a specific file, or return defaults if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write settings to {:?}", path))?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Set the API URL override (empty string removes the override)
    pub fn set_api_url(&mut self, url: &str) {
        let trimmed = url.trim();
        self.api_url = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Set the page size override. A value equal to the environment's page size removes
    /// the override, so a later `PAGE_SIZE` change still applies.
    pub fn set_page_size(&mut self, page_size: u32, env_page_size: u32) {
        let page_size = clamp_page_size(page_size);
        self.page_size = Some(page_size).filter(|size| *size != env_page_size);
    }

    /// Overlay these settings on an environment-derived config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = clamp_page_size(page_size);
        }
    }
}
