/// `slurp insights`: build and render the insights report.
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::insights::Insights;
use crate::insights_builder::build_insights;
use crate::renderer;
use crate::settings::Settings;
use crate::store::JournalDb;
use crate::window::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Md,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "md" => Ok(Self::Md),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Unknown report format: '{}'. Expected 'md' or 'json'", s)),
        }
    }
}

pub fn run(
    db: &JournalDb,
    profile_name: &str,
    settings: &Settings,
    range_flag: Option<String>,
    format: ReportFormat,
    output: Option<PathBuf>,
    from_json: Option<PathBuf>,
) -> Result<()> {
    let insights = match from_json {
        // Re-render a previously saved document instead of building one
        Some(path) => Insights::load_from_file(&path)?,
        None => {
            let today = Local::now().date_naive();
            let range_key = range_flag.unwrap_or_else(|| settings.default_range.clone());
            let range = TimeRange::parse(&range_key, today)?;

            // Full history in one query; the builder filters per window
            let entries = db.list_mood_entries(None, None)?;
            let display_name = settings.display_name.as_deref().unwrap_or(profile_name);
            let insights = build_insights(&entries, &range, display_name, today)?;
            tracing::info!(
                range = %range.key,
                entries = insights.summary.entries_logged,
                "insights built"
            );
            insights
        }
    };

    let rendered = match format {
        ReportFormat::Md => renderer::md::render(&insights)?,
        ReportFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&insights).context("Failed to serialize insights")?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            let path = dir.join(default_filename(&insights, format));
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn default_filename(insights: &Insights, format: ReportFormat) -> String {
    let ext = match format {
        ReportFormat::Md => "md",
        ReportFormat::Json => "json",
    };
    let key: String = insights
        .range
        .key
        .chars()
        .map(|c| if c == '.' { '-' } else { c })
        .collect();
    format!("slurp-insights-{}.{}", key, ext)
}
