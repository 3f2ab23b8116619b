use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(test)]
use anyhow::{anyhow, bail};
#[cfg(test)]
use jsonschema::{Draft, JSONSchema};

use crate::window::RangeKind;

/// The insights document: everything the aggregation core derives from one
/// window of mood entries. Serialized as JSON (`insights --format json`)
/// and rendered to Markdown by `renderer::md`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Insights {
    pub schema_version: i32,
    pub range: Range,
    pub generated_at: String,
    pub profile: Profile,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub frequency: Vec<MoodCount>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub distribution: Vec<EmotionShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
    /// Always exactly seven buckets, Sunday through Saturday.
    pub weekly_trend: Vec<TrendDay>,
}

/// The resolved window the document covers.
#[derive(Debug, Deserialize, Serialize)]
pub struct Range {
    pub kind: RangeKind,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    /// Entries in the store across all time, not just this window.
    pub entries_total: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Summary {
    pub entries_logged: i32,
    pub days_active: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_entry: Option<String>,
}

/// One (mood, count) pair; the frequency list is sorted by count
/// descending with ties in first-logged order.
#[derive(Debug, Deserialize, Serialize)]
pub struct MoodCount {
    pub mood: String,
    pub emoji: String,
    pub count: i32,
}

/// One (emotion, percentage) pair. Percentages are rounded per group, so
/// the column need not sum to exactly 100.
#[derive(Debug, Deserialize, Serialize)]
pub struct EmotionShare {
    pub emotion: String,
    pub count: i32,
    pub percentage: i32,
}

/// Longest run of consecutive days sharing one mood label.
#[derive(Debug, Deserialize, Serialize)]
pub struct Streak {
    pub mood: String,
    pub days: i32,
}

/// One day of the Sunday-anchored week containing "today".
///
/// `score` is `null` for a day without entries; a logged neutral day is an
/// explicit `0`. The two are never conflated.
#[derive(Debug, Deserialize, Serialize)]
pub struct TrendDay {
    pub date: String,
    pub weekday: String,
    pub score: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl Insights {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read insights file: {}", path.display()))?;

        let insights: Insights = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))?;

        Ok(insights)
    }

    #[cfg(test)]
    /// Validate an insights JSON value against the JSON schema
    pub fn validate_with_schema(
        insights_json: &serde_json::Value,
        schema: &JSONSchema,
    ) -> Result<()> {
        match schema.validate(insights_json) {
            Ok(_) => Ok(()),
            Err(errors) => {
                let error_messages: Vec<String> = errors
                    .map(|e| format!("  - {}: {}", e.instance_path, e))
                    .collect();
                bail!(
                    "Insights validation failed:\n{}",
                    error_messages.join("\n")
                )
            }
        }
    }

    #[cfg(test)]
    /// Load and compile the JSON schema
    pub fn load_schema(schema_path: &Path) -> Result<JSONSchema> {
        let schema_content = std::fs::read_to_string(schema_path)
            .with_context(|| format!("Failed to read schema file: {}", schema_path.display()))?;

        let schema_json: serde_json::Value =
            serde_json::from_str(&schema_content).with_context(|| {
                format!(
                    "Failed to parse schema JSON from: {}",
                    schema_path.display()
                )
            })?;

        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|e| anyhow!("Failed to compile JSON schema: {}", e))
    }

    #[cfg(test)]
    /// Load insights from file and validate against schema
    pub fn load_and_validate(insights_path: &Path, schema_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(insights_path)
            .with_context(|| format!("Failed to read insights file: {}", insights_path.display()))?;

        let insights_json: serde_json::Value = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse insights JSON from: {}", insights_path.display())
        })?;

        let schema = Self::load_schema(schema_path)?;
        Self::validate_with_schema(&insights_json, &schema)?;

        let insights: Insights = serde_json::from_value(insights_json).with_context(|| {
            format!("Failed to deserialize insights from: {}", insights_path.display())
        })?;

        Ok(insights)
    }
}
