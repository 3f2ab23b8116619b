// src/settings.rs
// Per-profile settings for slurp
// Stored as a local JSON file with an explicit load/save lifecycle:
// commands load settings once at startup and receive them as values.

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::window::TimeRange;

/// Settings values for one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name shown in report headers
    #[serde(default)]
    pub display_name: Option<String>,
    /// Reply language for the support bot (currently "en" only)
    #[serde(default = "default_language")]
    pub language: String,
    /// Range used by `insights` when none is given
    #[serde(default = "default_range")]
    pub default_range: String,
    /// Whether new entries are private unless `--private` says otherwise
    #[serde(default)]
    pub default_private: bool,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_range() -> String {
    "30d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: None,
            language: default_language(),
            default_range: default_range(),
            default_private: false,
        }
    }
}

/// Storage for one profile's settings
///
/// The storage implementation is opaque to callers; they read values
/// through the struct and persist through `save`.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

/// Keys accepted by `settings get` / `settings set`.
pub const SETTING_KEYS: &[&str] = &[
    "display_name",
    "language",
    "default_range",
    "default_private",
];

impl SettingsStore {
    /// Open the settings store for a profile.
    ///
    /// Loads existing settings if available, or initializes defaults.
    pub fn open(profile_dir: &Path) -> Result<Self> {
        let path = profile_dir.join("meta").join("settings.json");
        let settings = load_settings_from_file(&path).unwrap_or_default();
        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read one key as display text.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "display_name" => self
                .settings
                .display_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            "language" => self.settings.language.clone(),
            "default_range" => self.settings.default_range.clone(),
            "default_private" => self.settings.default_private.to_string(),
            _ => bail!("Unknown setting: '{}'. Known keys: {}", key, SETTING_KEYS.join(", ")),
        };
        Ok(value)
    }

    /// Set one key from text, validating, and persist immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "display_name" => {
                self.settings.display_name = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "language" => {
                if value != "en" {
                    bail!("Unsupported language: '{}' (only 'en' for now)", value);
                }
                self.settings.language = value.to_string();
            }
            "default_range" => {
                // Validate with the same parser the insights command uses
                TimeRange::parse(value, Local::now().date_naive())
                    .with_context(|| format!("Invalid default range: '{}'", value))?;
                self.settings.default_range = value.to_string();
            }
            "default_private" => {
                self.settings.default_private = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => bail!("Expected true/false for default_private, got '{}'", value),
                };
            }
            _ => bail!("Unknown setting: '{}'. Known keys: {}", key, SETTING_KEYS.join(", ")),
        }
        self.save()
    }

    /// Persist the current settings.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.settings).context("Failed to serialize settings")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

fn load_settings_from_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
    Ok(settings)
}
