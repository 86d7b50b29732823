use clap::{Args, Subcommand};

use victory_planner_core::{KeyValueStorage, Planner, RecordId};

use super::OutputFormat;

#[derive(Args)]
pub struct JournalCommand {
    #[command(subcommand)]
    pub command: JournalSubcommand,
}

#[derive(Subcommand)]
pub enum JournalSubcommand {
    /// Write a journal entry
    Add {
        /// Entry text
        text: String,
    },

    /// List journal entries, newest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a journal entry
    Delete {
        /// Entry ID
        id: RecordId,
    },
}

impl JournalCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            JournalSubcommand::Add { text } => {
                let entry = planner.add_journal_entry(text)?;
                println!("Saved journal entry {}", entry.id);
                Ok(())
            }

            JournalSubcommand::List { format } => {
                let mut entries = planner.load().journal_entries;
                entries.sort_by(|a, b| b.date.cmp(&a.date));

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    }
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No journal entries found");
                            return Ok(());
                        }

                        for entry in &entries {
                            println!(
                                "{}  ({})",
                                entry.date.format("%A, %B %-d, %Y %H:%M"),
                                entry.id
                            );
                            for line in entry.text.lines() {
                                println!("  {}", line);
                            }
                            println!();
                        }
                    }
                }
                Ok(())
            }

            JournalSubcommand::Delete { id } => {
                if !planner.delete_journal_entry(id) {
                    return Err(format!("Journal entry not found: {}", id).into());
                }
                println!("Deleted journal entry: {}", id);
                Ok(())
            }
        }
    }
}
