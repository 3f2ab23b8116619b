/// Entry export.
///
/// Writes a window of mood entries as CSV or JSON for use outside slurp.
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::entry::MoodEntry;
use crate::timefmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Unknown export format: '{}'. Expected 'csv' or 'json'", s)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    created_at: String,
    mood: &'a str,
    emotion: &'a str,
    note: &'a str,
    is_private: bool,
    location: &'a str,
}

impl<'a> ExportRow<'a> {
    fn from_entry(entry: &'a MoodEntry) -> Self {
        Self {
            id: entry.id,
            created_at: timefmt::format_timestamp(entry.created_at),
            mood: &entry.mood_name,
            emotion: &entry.emotion,
            note: entry.note.as_deref().unwrap_or(""),
            is_private: entry.is_private,
            location: entry.location.as_deref().unwrap_or(""),
        }
    }
}

/// Write entries to `path` in the given format.
pub fn write_entries(entries: &[MoodEntry], format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(entries, path),
        ExportFormat::Json => write_json(entries, path),
    }
}

fn write_csv(entries: &[MoodEntry], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for entry in entries {
        writer
            .serialize(ExportRow::from_entry(entry))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

fn write_json(entries: &[MoodEntry], path: &Path) -> Result<()> {
    let rows: Vec<ExportRow> = entries.iter().map(ExportRow::from_entry).collect();
    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize entries")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<MoodEntry> {
        vec![
            MoodEntry {
                id: 1,
                mood_name: "Strawberry Bliss".to_string(),
                emotion: "Happy".to_string(),
                emoji: "🍓".to_string(),
                note: Some("a note, with comma".to_string()),
                created_at: 1_750_000_000_000,
                is_private: false,
                location: None,
            },
            MoodEntry {
                id: 2,
                mood_name: "Sour Lemon".to_string(),
                emotion: "Stressed".to_string(),
                emoji: "🍋".to_string(),
                note: None,
                created_at: 1_750_000_100_000,
                is_private: true,
                location: Some("office".to_string()),
            },
        ]
    }

    #[test]
    fn test_csv_export_round_trips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.csv");
        write_entries(&entries(), ExportFormat::Csv, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("mood"));
        assert!(header.contains("is_private"));
        assert_eq!(lines.count(), 2);
        assert!(content.contains("\"a note, with comma\""));
    }

    #[test]
    fn test_json_export_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        write_entries(&entries(), ExportFormat::Json, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["location"], "office");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json").unwrap(), ExportFormat::Json);
        assert!(ExportFormat::parse("xlsx").is_err());
    }
}
