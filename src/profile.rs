/// Profile directories and selection.
///
/// All state lives under one data root (`SLURP_DATA_DIR`, default
/// `.slurp`): `profiles/<name>/` holds each profile's database, settings,
/// and logs, `global/` holds cross-profile preferences.
use anyhow::{Context, Result};
use inquire::Select;
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Resolve the data root directory.
pub fn resolve_data_root() -> Result<PathBuf> {
    let root = std::env::var("SLURP_DATA_DIR").unwrap_or_else(|_| ".slurp".to_string());
    Ok(PathBuf::from(root))
}

/// Directory-safe form of a profile name.
pub fn profile_dirname(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Path of a profile's directory, created on demand.
pub fn ensure_profile_dir(name: &str) -> Result<PathBuf> {
    let data_root = resolve_data_root()?;
    let dir = data_root.join("profiles").join(profile_dirname(name));
    fs::create_dir_all(dir.join("meta"))
        .with_context(|| format!("Failed to create profile directory {}", dir.display()))?;
    Ok(dir)
}

/// Discover all profiles under the data root.
/// Returns Vec of (name, profile_dir) tuples.
pub fn discover_profiles() -> Result<Vec<(String, PathBuf)>> {
    let data_root = resolve_data_root()?;
    let profiles_root = data_root.join("profiles");

    if !profiles_root.exists() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in fs::read_dir(&profiles_root).context("Failed to read profiles directory")? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            profiles.push((name, entry.path()));
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(profiles)
}

/// Cross-profile preferences, stored globally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Last profile chosen in the interactive picker
    #[serde(default)]
    pub last_profile: Option<String>,
}

impl Preferences {
    /// Load preferences from the global preferences file
    pub fn load() -> Result<Self> {
        let prefs_file = resolve_data_root()?.join("global").join("preferences.json");
        if !prefs_file.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(&prefs_file).context("Failed to read preferences file")?;
        let prefs: Self =
            serde_json::from_str(&contents).context("Failed to parse preferences file")?;
        Ok(prefs)
    }

    /// Save preferences to the global preferences file
    pub fn save(&self) -> Result<()> {
        let global_dir = resolve_data_root()?.join("global");
        fs::create_dir_all(&global_dir).context("Failed to create global directory")?;

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(global_dir.join("preferences.json"), contents)
            .context("Failed to write preferences file")?;
        Ok(())
    }
}

/// Profile selection with preference memory.
///
/// Behavior:
/// - `--profile NAME` always wins; the directory is created if missing
/// - No profiles yet → "default" is created
/// - Exactly one profile → used without prompting
/// - Multiple profiles → interactive picker on a TTY (remembering the
///   choice), otherwise the remembered profile or an error
pub struct ProfileSelector {
    preferences: Preferences,
}

impl ProfileSelector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            preferences: Preferences::load()?,
        })
    }

    pub fn select(&mut self, profile_flag: Option<String>) -> Result<(String, PathBuf)> {
        if let Some(name) = profile_flag {
            let dir = ensure_profile_dir(&name)?;
            return Ok((name, dir));
        }

        let profiles = discover_profiles()?;

        match profiles.len() {
            0 => {
                let dir = ensure_profile_dir("default")?;
                Ok(("default".to_string(), dir))
            }
            1 => Ok(profiles.into_iter().next().expect("len checked")),
            _ => self.select_interactive(profiles),
        }
    }

    fn select_interactive(
        &mut self,
        profiles: Vec<(String, PathBuf)>,
    ) -> Result<(String, PathBuf)> {
        if !std::io::stderr().is_terminal() {
            // No prompt possible: fall back to the remembered profile
            if let Some(ref last) = self.preferences.last_profile {
                if let Some(found) = profiles.iter().find(|(name, _)| name == last) {
                    return Ok(found.clone());
                }
            }
            anyhow::bail!(
                "Multiple profiles exist; pass --profile <name> (found: {})",
                profiles
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let names: Vec<String> = profiles.iter().map(|(name, _)| name.clone()).collect();
        let starting_cursor = self
            .preferences
            .last_profile
            .as_ref()
            .and_then(|last| names.iter().position(|n| n == last))
            .unwrap_or(0);

        let chosen = Select::new("Which profile?", names)
            .with_starting_cursor(starting_cursor)
            .prompt()
            .context("Profile selection cancelled")?;

        self.preferences.last_profile = Some(chosen.clone());
        self.preferences.save()?;

        let dir = profiles
            .into_iter()
            .find(|(name, _)| *name == chosen)
            .map(|(_, dir)| dir)
            .expect("chosen profile came from the list");
        Ok((chosen, dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dirname_sanitizes() {
        assert_eq!(profile_dirname("default"), "default");
        assert_eq!(profile_dirname("work-2026"), "work-2026");
        assert_eq!(profile_dirname("a b/c:d"), "a_b_c_d");
    }
}
