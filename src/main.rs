use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use slurp::breathe::{self, ExercisePattern};
use slurp::chat;
use slurp::commands;
use slurp::commands::insights::ReportFormat;
use slurp::export::{self, ExportFormat};
use slurp::logging;
use slurp::profile::ProfileSelector;
use slurp::reset;
use slurp::settings::{SettingsStore, SETTING_KEYS};
use slurp::status;
use slurp::store::JournalDb;
use slurp::window::TimeRange;

#[derive(Parser)]
#[command(name = "slurp")]
#[command(about = "Fruit-flavored mood journal: log moods, read insights, breathe", long_about = None)]
struct Cli {
    /// Profile to operate on (created if missing)
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a mood entry (interactive picker without --mood)
    Log {
        /// Mood label, e.g. "Strawberry Bliss"
        #[arg(long)]
        mood: Option<String>,
        /// Freeform note attached to the entry
        #[arg(long)]
        note: Option<String>,
        /// Mark the entry private
        #[arg(long)]
        private: bool,
        /// Where this mood struck
        #[arg(long)]
        location: Option<String>,
    },
    /// List mood entries, newest first
    List {
        /// Range: today, yesterday, 7d, 30d, 90d, ytd, START..END, all
        #[arg(long, default_value = "all")]
        range: String,
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Change an entry's mood or note
    Edit {
        id: i64,
        #[arg(long)]
        mood: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Remove the note entirely
        #[arg(long)]
        clear_note: bool,
    },
    /// Delete a mood entry
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Journal and gratitude entries
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
    /// Build the insights report: top moods, emotion mix, streak, weekly trend
    Insights {
        /// Range: today, yesterday, 7d, 30d, 90d, ytd, START..END, all
        #[arg(long)]
        range: Option<String>,
        /// Output format (md, json)
        #[arg(long, default_value = "md")]
        format: String,
        /// Write the report into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Render a previously saved insights JSON instead of building one
        #[arg(long)]
        from_json: Option<PathBuf>,
    },
    /// Talk to the scripted support bot
    Chat {
        /// Send one message instead of starting the REPL
        #[arg(long)]
        message: Option<String>,
    },
    /// Guided breathing or grounding exercise
    Breathe {
        /// Exercise: box, 478, grounding
        #[arg(long, default_value = "box")]
        pattern: String,
        /// Breathing cycles to run (grounding always runs once)
        #[arg(long, default_value_t = 3)]
        cycles: u32,
    },
    /// Show or change profile settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Export mood entries to a file
    Export {
        /// Range: today, yesterday, 7d, 30d, 90d, ytd, START..END, all
        #[arg(long, default_value = "all")]
        range: String,
        /// Output format (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show data root and profile status
    Status,
    /// Delete all entries for a profile, keeping settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum JournalCommands {
    /// Write a new entry
    Add {
        /// Save as a gratitude entry
        #[arg(long)]
        gratitude: bool,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// List entries, newest first
    List {
        /// Only gratitude entries
        #[arg(long)]
        gratitude: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print all settings
    Show,
    /// Print one setting
    Get { key: String },
    /// Change one setting
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Status reads across profiles and needs no selection
    if matches!(cli.command, Commands::Status) {
        return status::run(cli.profile);
    }

    let mut selector = ProfileSelector::new()?;
    let (profile_name, profile_dir) = selector.select(cli.profile)?;
    logging::init_profile_logging(&profile_dir, &profile_name)?;

    match cli.command {
        Commands::Log {
            mood,
            note,
            private,
            location,
        } => {
            let db = JournalDb::open(&profile_dir)?;
            let settings = SettingsStore::open(&profile_dir)?;
            commands::log::run(&db, settings.settings(), mood, note, private, location)
        }
        Commands::List { range, limit } => {
            let db = JournalDb::open(&profile_dir)?;
            commands::list::run(&db, &range, limit)
        }
        Commands::Edit {
            id,
            mood,
            note,
            clear_note,
        } => {
            let db = JournalDb::open(&profile_dir)?;
            commands::edit::run(&db, id, mood, note, clear_note)
        }
        Commands::Delete { id, yes } => {
            let db = JournalDb::open(&profile_dir)?;
            commands::delete::run(&db, id, yes)
        }
        Commands::Journal { command } => {
            let db = JournalDb::open(&profile_dir)?;
            match command {
                JournalCommands::Add {
                    gratitude,
                    title,
                    body,
                } => commands::journal::run_add(&db, gratitude, title, body),
                JournalCommands::List { gratitude, limit } => {
                    commands::journal::run_list(&db, gratitude, limit)
                }
            }
        }
        Commands::Insights {
            range,
            format,
            output,
            from_json,
        } => {
            let db = JournalDb::open(&profile_dir)?;
            let settings = SettingsStore::open(&profile_dir)?;
            let format = ReportFormat::parse(&format)?;
            commands::insights::run(
                &db,
                &profile_name,
                settings.settings(),
                range,
                format,
                output,
                from_json,
            )
        }
        Commands::Chat { message } => chat::run(message),
        Commands::Breathe { pattern, cycles } => {
            breathe::run(ExercisePattern::parse(&pattern)?, cycles)
        }
        Commands::Settings { command } => {
            let mut store = SettingsStore::open(&profile_dir)?;
            match command {
                SettingsCommands::Show => {
                    for key in SETTING_KEYS {
                        println!("{} = {}", key, store.get(key)?);
                    }
                    Ok(())
                }
                SettingsCommands::Get { key } => {
                    println!("{}", store.get(&key)?);
                    Ok(())
                }
                SettingsCommands::Set { key, value } => {
                    store.set(&key, &value)?;
                    println!("{} = {}", key, store.get(&key)?);
                    Ok(())
                }
            }
        }
        Commands::Export {
            range,
            format,
            output,
        } => {
            let db = JournalDb::open(&profile_dir)?;
            let range = TimeRange::parse(&range, Local::now().date_naive())?;
            let (start_ts, end_ts) = range.to_timestamp_range();
            let entries = db.list_mood_entries(start_ts, end_ts)?;
            export::write_entries(&entries, ExportFormat::parse(&format)?, &output)?;
            eprintln!("Exported {} entries to {}", entries.len(), output.display());
            Ok(())
        }
        Commands::Reset { yes } => reset::run(&profile_name, &profile_dir, yes),
        Commands::Status => unreachable!("handled above"),
    }
}
