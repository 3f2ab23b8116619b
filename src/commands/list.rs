/// `slurp list`: show logged mood entries.
use anyhow::Result;
use chrono::Local;
use unicode_width::UnicodeWidthStr;

use crate::store::JournalDb;
use crate::timefmt;
use crate::window::TimeRange;

/// Maximum display width for the mood column.
const MOOD_COL_WIDTH: usize = 24;

pub fn run(db: &JournalDb, range_key: &str, limit: Option<usize>) -> Result<()> {
    let range = TimeRange::parse(range_key, Local::now().date_naive())?;
    let (start_ts, end_ts) = range.to_timestamp_range();

    let mut entries = db.list_mood_entries(start_ts, end_ts)?;
    // Newest first for reading
    entries.reverse();
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    if entries.is_empty() {
        println!("No entries for {}.", range.label());
        return Ok(());
    }

    println!("Entries for {}:", range.label());
    for entry in &entries {
        let mood = pad_display(&format!("{} {}", entry.emoji, entry.mood_name), MOOD_COL_WIDTH);
        let lock = if entry.is_private { " 🔒" } else { "" };
        let note = entry
            .note
            .as_deref()
            .map(|n| format!("  — {}", n))
            .unwrap_or_default();
        let location = entry
            .location
            .as_deref()
            .map(|l| format!(" @ {}", l))
            .unwrap_or_default();

        println!(
            "#{:<4} {}  {} {}{}{}{}",
            entry.id,
            timefmt::format_timestamp(entry.created_at),
            mood,
            entry.emotion,
            lock,
            location,
            note
        );
    }
    Ok(())
}

/// Pad a string to a display width, accounting for wide characters.
fn pad_display(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_display_accounts_for_wide_chars() {
        let padded = pad_display("🍓 Strawberry Bliss", 24);
        // Emoji is double width: 2 + 1 + 16 = 19 columns, so 5 spaces pad
        assert_eq!(UnicodeWidthStr::width(padded.as_str()), 24);

        let long = pad_display("🍉 A very very long mood name", 10);
        assert_eq!(long, "🍉 A very very long mood name");
    }
}
