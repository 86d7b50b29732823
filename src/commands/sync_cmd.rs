//! Sync code commands for moving data between devices.

use clap::{Args, Subcommand};
use std::io::{self, BufRead, Read, Write};

use victory_planner_core::{KeyValueStorage, Planner, PlannerError};

/// Move data between devices with sync codes
#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: SyncSubcommand,
}

#[derive(Debug, Subcommand)]
enum SyncSubcommand {
    /// Print a sync code holding all data on this device
    Export,

    /// Replace all data on this device with the content of a sync code
    Import {
        /// Sync code; read from stdin when omitted (requires --force)
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl SyncCommand {
    pub fn run<S: KeyValueStorage>(&self, planner: &Planner<S>) -> Result<(), SyncCommandError> {
        match &self.command {
            SyncSubcommand::Export => self.export(planner),
            SyncSubcommand::Import { code, force } => {
                self.import(planner, code.as_deref(), *force, &mut io::stdin().lock())
            }
        }
    }

    fn export<S: KeyValueStorage>(&self, planner: &Planner<S>) -> Result<(), SyncCommandError> {
        let code = planner.export_sync_code()?;
        println!("{}", code);
        Ok(())
    }

    /// Imports `code`, or the whole of `input` when no code is given.
    ///
    /// A code read from `input` leaves nothing to answer the prompt with, so
    /// that path only runs with `force`.
    fn import<S: KeyValueStorage, R: BufRead>(
        &self,
        planner: &Planner<S>,
        code: Option<&str>,
        force: bool,
        input: &mut R,
    ) -> Result<(), SyncCommandError> {
        let code = match code {
            Some(code) => code.to_string(),
            None if !force => return Err(SyncCommandError::ConfirmationRequired),
            None => {
                let mut buf = String::new();
                input.read_to_string(&mut buf)?;
                buf
            }
        };

        if !force {
            print!("Replace ALL data on this device with the imported data? [y/N] ");
            io::stdout().flush()?;

            let mut answer = String::new();
            input.read_line(&mut answer)?;

            if !answer.trim().eq_ignore_ascii_case("y") {
                println!("Import cancelled.");
                return Ok(());
            }
        }

        let snapshot = planner.import_sync_code(&code)?;

        println!("Data imported.");
        println!();
        println!("  Identity: {}", snapshot.user_id);
        println!("  Goals:    {}", snapshot.goals.len());
        println!("  Tasks:    {}", snapshot.tasks.len());
        println!("  Habits:   {}", snapshot.habits.len());
        println!("  Journal:  {}", snapshot.journal_entries.len());
        println!("  Events:   {}", snapshot.events.len());
        println!("  Notes:    {}", snapshot.notes.len());
        Ok(())
    }
}

/// Errors from sync commands
#[derive(Debug)]
pub enum SyncCommandError {
    InvalidCode,
    ConfirmationRequired,
    PlannerError(PlannerError),
    IoError(io::Error),
}

impl std::fmt::Display for SyncCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncCommandError::InvalidCode => write!(f, "Invalid sync code"),
            SyncCommandError::ConfirmationRequired => write!(
                f,
                "Reading the sync code from stdin replaces all data without a prompt; pass --force"
            ),
            SyncCommandError::PlannerError(e) => write!(f, "{}", e),
            SyncCommandError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SyncCommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncCommandError::InvalidCode | SyncCommandError::ConfirmationRequired => None,
            SyncCommandError::PlannerError(e) => Some(e),
            SyncCommandError::IoError(e) => Some(e),
        }
    }
}

impl From<PlannerError> for SyncCommandError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::Sync(e) if e.is_invalid_code() => {
                tracing::debug!("Rejected sync code: {}", e);
                SyncCommandError::InvalidCode
            }
            e => SyncCommandError::PlannerError(e),
        }
    }
}

impl From<io::Error> for SyncCommandError {
    fn from(e: io::Error) -> Self {
        SyncCommandError::IoError(e)
    }
}
