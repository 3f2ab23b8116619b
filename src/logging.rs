/// Per-profile logging configuration.
///
/// Logs are stored in the profile's directory under `logs/`.
/// Each session appends to the log file with clear separators.
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes logging for a specific profile.
///
/// Logs are written to `{profile_dir}/logs/slurp.log`. Each session starts
/// with a separator containing timestamp and profile name.
pub fn init_profile_logging(profile_dir: &Path, profile_name: &str) -> Result<()> {
    let log_dir = profile_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "slurp.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // Default to INFO level, but allow override via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok(); // Ignore error if already initialized

    // Write session separator with timestamp
    let separator = format!(
        "\n{sep}\n[{ts}] New session: {profile}\n{sep}\n",
        sep = "=".repeat(80),
        ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        profile = profile_name
    );

    use std::io::Write;
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("slurp.log"))
    {
        let _ = writeln!(file, "{}", separator);
    }

    tracing::info!("Logging initialized for profile: {}", profile_name);

    Ok(())
}
