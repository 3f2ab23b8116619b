/// `slurp log`: record a mood entry.
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use inquire::{Select, Text};
use is_terminal::IsTerminal;

use crate::entry::{find_mood, MoodKind, MOOD_CATALOG};
use crate::settings::Settings;
use crate::store::{JournalDb, NewMoodEntry};

pub fn run(
    db: &JournalDb,
    settings: &Settings,
    mood: Option<String>,
    note: Option<String>,
    private: bool,
    location: Option<String>,
) -> Result<()> {
    let interactive = mood.is_none();

    let kind = match mood {
        Some(ref name) => *find_mood(name).ok_or_else(|| {
            anyhow!(
                "Unknown mood '{}'. Run 'slurp log' without --mood to pick from the list",
                name
            )
        })?,
        None => pick_mood()?,
    };

    // In the picker flow, offer a note prompt too
    let note = match note {
        Some(text) if !text.is_empty() => Some(text),
        Some(_) => None,
        None if interactive => prompt_optional_note()?,
        None => None,
    };

    let new = NewMoodEntry {
        mood_name: kind.name.to_string(),
        emotion: kind.emotion.to_string(),
        emoji: kind.emoji.to_string(),
        note,
        created_at: Local::now().timestamp_millis(),
        is_private: private || settings.default_private,
        location,
    };

    let id = db.insert_mood_entry(&new)?;
    tracing::info!(mood = kind.name, id, "mood entry logged");
    println!("{} Logged {} (#{})", kind.emoji, kind.name, id);
    Ok(())
}

fn pick_mood() -> Result<MoodKind> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("No terminal for the mood picker; pass --mood <name>");
    }

    let options: Vec<String> = MOOD_CATALOG
        .iter()
        .map(|kind| format!("{} {} ({})", kind.emoji, kind.name, kind.emotion))
        .collect();

    let chosen = Select::new("How are you feeling?", options.clone())
        .prompt()
        .context("Mood selection cancelled")?;

    let index = options
        .iter()
        .position(|option| *option == chosen)
        .expect("chosen option came from the list");
    Ok(MOOD_CATALOG[index])
}

fn prompt_optional_note() -> Result<Option<String>> {
    let text = Text::new("Add a note? (enter to skip)")
        .prompt()
        .context("Note input cancelled")?;
    let trimmed = text.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}
