use slurp::logging;

#[test]
fn log_file_created_with_session_separator() -> anyhow::Result<()> {
    let test_dir = tempfile::tempdir()?;
    let profile_dir = test_dir.path().join("test_profile");
    std::fs::create_dir_all(&profile_dir)?;

    logging::init_profile_logging(&profile_dir, "test_profile")?;

    tracing::info!("Test info message");
    tracing::warn!("Test warning message");

    // Give the appender a moment to flush
    std::thread::sleep(std::time::Duration::from_millis(100));

    let log_file = profile_dir.join("logs/slurp.log");
    assert!(log_file.exists(), "log file was not created");

    let contents = std::fs::read_to_string(&log_file)?;
    assert!(
        contents.contains("New session: test_profile"),
        "missing session separator:\n{}",
        contents
    );

    Ok(())
}
