use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use levelup::config::Config;
use levelup::{Category, Difficulty};

mod cli;

#[derive(Parser)]
#[command(name = "levelup")]
#[command(about = "LevelUp Habits - level up your life one habit at a time")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.levelup/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the habit data (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,

        /// health, productivity, learning, mindfulness, social or creative
        #[arg(long, default_value = "health")]
        category: Category,

        /// easy (10 XP), medium (20 XP) or hard (30 XP)
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
    },

    /// Edit an existing habit
    Edit {
        /// Habit id (or a unique prefix of it)
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        difficulty: Option<Difficulty>,
    },

    /// Delete a habit
    Delete {
        /// Habit id (or a unique prefix of it)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a habit as completed
    Complete {
        /// Habit id (or a unique prefix of it)
        id: String,

        /// Day of the completion, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show all habits (default)
    List,

    /// Show level and XP progress
    Status,

    /// Write a backup of all data
    Export {
        /// Output file (defaults to levelup-habits-backup-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with a backup
    Import {
        /// Backup file to read
        file: PathBuf,
    },

    /// Delete all habits and progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a default ~/.levelup/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    let data_dir = cli.data_dir.as_deref();
    let open = || cli::open_tracker(config_path, data_dir);

    match cli.command.unwrap_or(Commands::List) {
        Commands::Add {
            name,
            category,
            difficulty,
        } => {
            cli::habit::add_command(&mut open()?, &name, category, difficulty).await?;
        }
        Commands::Edit {
            id,
            name,
            category,
            difficulty,
        } => {
            cli::habit::edit_command(&mut open()?, &id, name, category, difficulty).await?;
        }
        Commands::Delete { id, yes } => {
            cli::habit::delete_command(&mut open()?, &id, yes).await?;
        }
        Commands::Complete { id, date } => {
            cli::habit::complete_command(&mut open()?, &id, date.as_deref()).await?;
        }
        Commands::List => {
            cli::habit::list_command(&open()?).await?;
        }
        Commands::Status => {
            cli::status::status_command(&open()?).await?;
        }
        Commands::Export { output } => {
            cli::backup::export_command(&open()?, output).await?;
        }
        Commands::Import { file } => {
            cli::backup::import_command(&mut open()?, &file).await?;
        }
        Commands::Reset { yes } => {
            cli::backup::reset_command(&mut open()?, yes).await?;
        }
        Commands::Init { force } => {
            let path = config_path
                .map(PathBuf::from)
                .unwrap_or_else(Config::global_config_path);
            cli::init::init_command(&path, force).await?;
        }
    }

    Ok(())
}
