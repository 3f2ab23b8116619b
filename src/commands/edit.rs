/// `slurp edit`: change the mood or note of an existing entry.
use anyhow::{anyhow, Result};

use crate::entry::find_mood;
use crate::store::JournalDb;

pub fn run(
    db: &JournalDb,
    id: i64,
    mood: Option<String>,
    note: Option<String>,
    clear_note: bool,
) -> Result<()> {
    if mood.is_none() && note.is_none() && !clear_note {
        anyhow::bail!("Nothing to change; pass --mood, --note, or --clear-note");
    }

    if db.get_mood_entry(id)?.is_none() {
        anyhow::bail!("No entry #{}", id);
    }

    if let Some(ref name) = mood {
        let kind = find_mood(name)
            .ok_or_else(|| anyhow!("Unknown mood '{}'; see 'slurp log' for the list", name))?;
        db.update_mood(id, kind.name, kind.emotion, kind.emoji)?;
    }

    if clear_note {
        db.update_note(id, None)?;
    } else if let Some(ref text) = note {
        db.update_note(id, Some(text))?;
    }

    tracing::info!(id, "mood entry updated");
    println!("Updated entry #{}", id);
    Ok(())
}
