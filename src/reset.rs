/// Reset a profile's entry store
///
/// This clears the mood and journal database while preserving settings.
use anyhow::{Context, Result};
use inquire::Confirm;
use is_terminal::IsTerminal;
use std::fs;
use std::path::Path;

/// Run the reset command
pub fn run(profile_name: &str, profile_dir: &Path, yes: bool) -> Result<()> {
    let db_path = profile_dir.join("db.sqlite");
    if !db_path.exists() {
        println!("Nothing to reset for profile '{}'.", profile_name);
        return Ok(());
    }

    if !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Refusing to reset without confirmation; pass --yes");
        }
        let confirmed = Confirm::new(&format!(
            "Delete all entries for profile '{}'? Settings are kept.",
            profile_name
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation cancelled")?;
        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    eprintln!("🧹 Resetting profile: {}", profile_name);

    fs::remove_file(&db_path)
        .with_context(|| format!("Failed to remove {}", db_path.display()))?;
    eprintln!("  ✓ Removed entry database");

    tracing::info!(profile = profile_name, "profile reset");
    eprintln!("✅ Reset complete");
    Ok(())
}
