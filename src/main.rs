use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, DeviceCommand, EventCommand, GoalCommand, HabitCommand, JournalCommand,
    NoteCommand, SyncCommand, TaskCommand,
};
use config::Config;
use victory_planner_core::{FileStorage, Planner};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PLANNER_LOG";

#[derive(Parser)]
#[command(name = "planner")]
#[command(version)]
#[command(about = "A personal planner for goals, tasks, habits and notes", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goals and their progress
    Goal(GoalCommand),

    /// Manage daily tasks
    Task(TaskCommand),

    /// Track habits and streaks
    Habit(HabitCommand),

    /// Write and read journal entries
    Journal(JournalCommand),

    /// Manage calendar events
    Event(EventCommand),

    /// Manage notes
    Note(NoteCommand),

    /// Move data between devices with sync codes
    Sync(SyncCommand),

    /// Show device identity
    Device(DeviceCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    tracing::debug!(
        "Data directory: {} ({})",
        config.data_dir.value.display(),
        config.data_dir.source
    );

    let planner = Planner::new(FileStorage::new(config.data_dir.value.clone()));

    match &cli.command {
        Some(Commands::Goal(cmd)) => cmd.run(&planner)?,
        Some(Commands::Task(cmd)) => cmd.run(&planner)?,
        Some(Commands::Habit(cmd)) => cmd.run(&planner)?,
        Some(Commands::Journal(cmd)) => cmd.run(&planner)?,
        Some(Commands::Event(cmd)) => cmd.run(&planner)?,
        Some(Commands::Note(cmd)) => cmd.run(&planner)?,
        Some(Commands::Sync(cmd)) => cmd.run(&planner)?,
        Some(Commands::Device(cmd)) => cmd.run(&planner)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_goal_add_parses() {
        let cli = Cli::try_parse_from([
            "planner",
            "goal",
            "add",
            "Run a marathon",
            "--category",
            "Health & Fitness",
            "-c",
            "custom.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(matches!(cli.command, Some(Commands::Goal(_))));
    }
}
