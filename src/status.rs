use anyhow::Result;
use std::path::Path;

use crate::profile::{discover_profiles, ensure_profile_dir, resolve_data_root};
use crate::settings::SettingsStore;
use crate::store::JournalDb;
use crate::timefmt;

/// Status of a profile's files and store
pub struct ProfileStatus {
    pub db_exists: bool,
    pub settings_exists: bool,
    pub mood_entries: usize,
    pub journal_entries: usize,
    pub oldest_ts: Option<i64>,
    pub newest_ts: Option<i64>,
}

/// Check the complete status of a profile (files, store counts, bounds).
pub fn check_profile_status(profile_dir: &Path) -> Result<ProfileStatus> {
    let db_exists = profile_dir.join("db.sqlite").exists();
    let settings_exists = profile_dir.join("meta").join("settings.json").exists();

    let (mood_entries, journal_entries, oldest_ts, newest_ts) = if db_exists {
        let db = JournalDb::open(profile_dir)?;
        let bounds = db.bounds()?;
        (
            bounds.mood_entries,
            bounds.journal_entries,
            bounds.oldest_ts,
            bounds.newest_ts,
        )
    } else {
        (0, 0, None, None)
    };

    Ok(ProfileStatus {
        db_exists,
        settings_exists,
        mood_entries,
        journal_entries,
        oldest_ts,
        newest_ts,
    })
}

pub fn run(profile_flag: Option<String>) -> Result<()> {
    let data_root = resolve_data_root()?;
    println!("Data root: {}", data_root.display());

    let profiles = if let Some(name) = profile_flag {
        vec![(name.clone(), ensure_profile_dir(&name)?)]
    } else {
        discover_profiles()?
    };

    if profiles.is_empty() {
        println!("No profiles found. Run 'slurp log' to create one.");
        return Ok(());
    }

    for (name, profile_dir) in &profiles {
        println!("\nProfile: {}", name);
        println!("  Directory: {}", profile_dir.display());

        let status = check_profile_status(profile_dir)?;
        if !status.db_exists {
            println!("  [!] No entry database yet");
            continue;
        }

        println!("  Mood entries: {}", status.mood_entries);
        println!("  Journal entries: {}", status.journal_entries);
        println!(
            "  First entry: {}",
            timefmt::format_timestamp_opt(status.oldest_ts)
        );
        println!(
            "  Last entry:  {}",
            timefmt::format_timestamp_opt(status.newest_ts)
        );

        if status.settings_exists {
            let store = SettingsStore::open(profile_dir)?;
            let settings = store.settings();
            println!(
                "  Settings: language={} default_range={} default_private={}",
                settings.language, settings.default_range, settings.default_private
            );
        } else {
            println!("  Settings: defaults");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewMoodEntry;

    #[test]
    fn test_check_profile_status_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let status = check_profile_status(dir.path()).unwrap();
        assert!(!status.db_exists);
        assert_eq!(status.mood_entries, 0);
        assert!(status.oldest_ts.is_none());
    }

    #[test]
    fn test_check_profile_status_with_entries() {
        let dir = tempfile::tempdir().unwrap();
        let db = JournalDb::open(dir.path()).unwrap();
        db.insert_mood_entry(&NewMoodEntry {
            mood_name: "Strawberry Bliss".to_string(),
            emotion: "Happy".to_string(),
            emoji: "🍓".to_string(),
            note: None,
            created_at: 1_000,
            is_private: false,
            location: None,
        })
        .unwrap();
        drop(db);

        let status = check_profile_status(dir.path()).unwrap();
        assert!(status.db_exists);
        assert_eq!(status.mood_entries, 1);
        assert_eq!(status.oldest_ts, Some(1_000));
    }
}
