/// `slurp delete`: remove a mood entry.
use anyhow::{Context, Result};
use inquire::Confirm;
use is_terminal::IsTerminal;

use crate::store::JournalDb;
use crate::timefmt;

pub fn run(db: &JournalDb, id: i64, yes: bool) -> Result<()> {
    let Some(entry) = db.get_mood_entry(id)? else {
        anyhow::bail!("No entry #{}", id);
    };

    if !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Refusing to delete without confirmation; pass --yes");
        }
        let confirmed = Confirm::new(&format!(
            "Delete #{} ({} on {})?",
            entry.id,
            entry.mood_name,
            timefmt::format_date(entry.created_at)
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation cancelled")?;
        if !confirmed {
            println!("Kept entry #{}", id);
            return Ok(());
        }
    }

    db.delete_mood_entry(id)?;
    tracing::info!(id, "mood entry deleted");
    println!("Deleted entry #{}", id);
    Ok(())
}
