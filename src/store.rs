/// Per-profile entry store
///
/// SQLite database holding mood entries and freeform journal entries.
/// Aggregation never touches this module directly; callers fetch a
/// request-scoped list and hand it to `insights_builder`.
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::entry::MoodEntry;

/// Fields of a mood entry that the caller supplies; the store assigns the
/// id.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub mood_name: String,
    pub emotion: String,
    pub emoji: String,
    pub note: Option<String>,
    pub created_at: i64,
    pub is_private: bool,
    pub location: Option<String>,
}

/// Kind of a freeform journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalKind {
    Journal,
    Gratitude,
}

impl JournalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Gratitude => "gratitude",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "journal" => Some(Self::Journal),
            "gratitude" => Some(Self::Gratitude),
            _ => None,
        }
    }
}

/// A freeform journal or gratitude entry.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub id: i64,
    pub kind: JournalKind,
    pub title: Option<String>,
    pub body: String,
    pub created_at: i64,
}

/// Store-wide bounds for status output.
#[derive(Debug, Clone)]
pub struct StoreBounds {
    pub oldest_ts: Option<i64>,
    pub newest_ts: Option<i64>,
    pub mood_entries: usize,
    pub journal_entries: usize,
}

/// Database handle for one profile's entries
pub struct JournalDb {
    conn: Connection,
}

impl JournalDb {
    /// Initialize or open the profile database
    pub fn open(profile_dir: &Path) -> Result<Self> {
        let db_path = profile_dir.join("db.sqlite");
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS mood_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mood_name TEXT NOT NULL,
                emotion TEXT NOT NULL,
                emoji TEXT NOT NULL DEFAULT '',
                note TEXT,
                created_at INTEGER NOT NULL,
                is_private INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )
        .context("Failed to create mood_entries table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_mood_entries_created_at
             ON mood_entries(created_at)",
            [],
        )
        .context("Failed to create mood_entries index")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS journal_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL DEFAULT 'journal',
                title TEXT,
                body TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )
        .context("Failed to create journal_entries table")?;

        // Add new columns to existing databases (SQLite ignores if they already exist)
        let _ = conn.execute("ALTER TABLE mood_entries ADD COLUMN location TEXT", []);

        Ok(Self { conn })
    }

    /// Insert a mood entry and return its id
    pub fn insert_mood_entry(&self, new: &NewMoodEntry) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO mood_entries
                    (mood_name, emotion, emoji, note, created_at, is_private, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    new.mood_name,
                    new.emotion,
                    new.emoji,
                    new.note,
                    new.created_at,
                    new.is_private,
                    new.location
                ],
            )
            .context("Failed to insert mood entry")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a single mood entry by id
    pub fn get_mood_entry(&self, id: i64) -> Result<Option<MoodEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mood_name, emotion, emoji, note, created_at, is_private, location
             FROM mood_entries
             WHERE id = ?1",
        )?;
        let entry = stmt.query_row(params![id], row_to_mood_entry).optional()?;
        Ok(entry)
    }

    /// List mood entries ascending by `created_at`, optionally bounded by a
    /// millisecond timestamp range (both bounds inclusive)
    pub fn list_mood_entries(
        &self,
        start_ts: Option<i64>,
        end_ts: Option<i64>,
    ) -> Result<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mood_name, emotion, emoji, note, created_at, is_private, location
             FROM mood_entries
             WHERE (?1 IS NULL OR created_at >= ?1)
               AND (?2 IS NULL OR created_at <= ?2)
             ORDER BY created_at ASC, id ASC",
        )?;

        let entries = stmt
            .query_map(params![start_ts, end_ts], row_to_mood_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Update a mood entry's mood fields. Returns false if no such entry.
    pub fn update_mood(
        &self,
        id: i64,
        mood_name: &str,
        emotion: &str,
        emoji: &str,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE mood_entries SET mood_name = ?2, emotion = ?3, emoji = ?4 WHERE id = ?1",
            params![id, mood_name, emotion, emoji],
        )?;
        Ok(changed > 0)
    }

    /// Update a mood entry's note. `None` clears it. Returns false if no
    /// such entry.
    pub fn update_note(&self, id: i64, note: Option<&str>) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE mood_entries SET note = ?2 WHERE id = ?1",
            params![id, note],
        )?;
        Ok(changed > 0)
    }

    /// Delete a mood entry. Returns false if no such entry.
    pub fn delete_mood_entry(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM mood_entries WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Insert a journal or gratitude entry and return its id
    pub fn insert_journal_entry(
        &self,
        kind: JournalKind,
        title: Option<&str>,
        body: &str,
        created_at: i64,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO journal_entries (kind, title, body, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![kind.as_str(), title, body, created_at],
            )
            .context("Failed to insert journal entry")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List journal entries newest first, optionally filtered by kind and
    /// capped at `limit`
    pub fn list_journal_entries(
        &self,
        kind: Option<JournalKind>,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>> {
        let kind_str = kind.map(|k| k.as_str());
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let mut stmt = self.conn.prepare(
            "SELECT id, kind, title, body, created_at
             FROM journal_entries
             WHERE (?1 IS NULL OR kind = ?1)
             ORDER BY created_at DESC, id DESC
             LIMIT ?2",
        )?;

        let entries = stmt
            .query_map(params![kind_str, limit], |row| {
                let kind_str: String = row.get(1)?;
                Ok(JournalEntry {
                    id: row.get(0)?,
                    kind: JournalKind::from_db(&kind_str).unwrap_or(JournalKind::Journal),
                    title: row.get(2)?,
                    body: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Entry counts and timestamp bounds across the whole store
    pub fn bounds(&self) -> Result<StoreBounds> {
        let (mood_entries, oldest_ts, newest_ts): (usize, Option<i64>, Option<i64>) =
            self.conn.query_row(
                "SELECT COUNT(*), MIN(created_at), MAX(created_at) FROM mood_entries",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        let journal_entries: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM journal_entries", [], |row| row.get(0))?;

        Ok(StoreBounds {
            oldest_ts,
            newest_ts,
            mood_entries,
            journal_entries,
        })
    }
}

fn row_to_mood_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodEntry> {
    Ok(MoodEntry {
        id: row.get(0)?,
        mood_name: row.get(1)?,
        emotion: row.get(2)?,
        emoji: row.get(3)?,
        note: row.get(4)?,
        created_at: row.get(5)?,
        is_private: row.get(6)?,
        location: row.get(7)?,
    })
}
