/// `slurp journal`: freeform journal and gratitude entries.
use anyhow::{Context, Result};
use chrono::Local;
use inquire::Text;
use is_terminal::IsTerminal;

use crate::store::{JournalDb, JournalKind};
use crate::timefmt;

pub fn run_add(
    db: &JournalDb,
    gratitude: bool,
    title: Option<String>,
    body: Option<String>,
) -> Result<()> {
    let kind = if gratitude {
        JournalKind::Gratitude
    } else {
        JournalKind::Journal
    };

    let body = match body {
        Some(text) if !text.trim().is_empty() => text,
        _ => prompt_body(kind)?,
    };

    let id = db.insert_journal_entry(kind, title.as_deref(), &body, Local::now().timestamp_millis())?;
    tracing::info!(kind = kind.as_str(), id, "journal entry added");
    println!("Saved {} entry #{}", kind.as_str(), id);
    Ok(())
}

pub fn run_list(db: &JournalDb, gratitude: bool, limit: Option<usize>) -> Result<()> {
    let kind = gratitude.then_some(JournalKind::Gratitude);
    let entries = db.list_journal_entries(kind, limit)?;

    if entries.is_empty() {
        println!("No journal entries yet.");
        return Ok(());
    }

    for entry in &entries {
        let marker = match entry.kind {
            JournalKind::Journal => "📓",
            JournalKind::Gratitude => "🙏",
        };
        match &entry.title {
            Some(title) => println!(
                "{} #{} {} — {}",
                marker,
                entry.id,
                timefmt::format_date(entry.created_at),
                title
            ),
            None => println!(
                "{} #{} {}",
                marker,
                entry.id,
                timefmt::format_date(entry.created_at)
            ),
        }
        println!("   {}", entry.body);
    }
    Ok(())
}

fn prompt_body(kind: JournalKind) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("No terminal for the journal prompt; pass --body <text>");
    }

    let question = match kind {
        JournalKind::Journal => "What's on your mind?",
        JournalKind::Gratitude => "What are you grateful for today?",
    };
    let body = Text::new(question).prompt().context("Journal input cancelled")?;
    if body.trim().is_empty() {
        anyhow::bail!("Nothing written; entry not saved");
    }
    Ok(body)
}
