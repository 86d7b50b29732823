use clap::{Args, Subcommand};
use std::io::{self, Read};

use victory_planner_core::{KeyValueStorage, Planner, RecordId};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct NoteCommand {
    #[command(subcommand)]
    pub command: NoteSubcommand,
}

#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// Create a note
    New {
        /// Initial content (the first line becomes the title)
        #[arg(long)]
        content: Option<String>,
    },

    /// List notes, most recently saved first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a note
    Show {
        /// Note ID
        id: RecordId,
    },

    /// Replace a note's content
    Save {
        /// Note ID
        id: RecordId,

        /// New content; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: RecordId,
    },
}

impl NoteCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            NoteSubcommand::New { content } => {
                let mut note = planner.create_note()?;
                if let Some(content) = content {
                    note = planner
                        .save_note(&note.id, content)
                        .ok_or_else(|| format!("Note not found: {}", note.id))?;
                }
                println!("Created note: {} ({})", note.title, note.id);
                Ok(())
            }

            NoteSubcommand::List { format } => {
                let mut notes = planner.load().notes;
                notes.sort_by(|a, b| b.date.cmp(&a.date));

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&notes)?);
                    }
                    OutputFormat::Text => {
                        if notes.is_empty() {
                            println!("No notes found");
                            return Ok(());
                        }

                        println!("{:<36}  {:<40}  SAVED", "ID", "TITLE");
                        println!("{}", "-".repeat(96));
                        for note in &notes {
                            println!(
                                "{:<36}  {:<40}  {}",
                                note.id.to_string(),
                                truncate(&note.title, 40),
                                note.date.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
                Ok(())
            }

            NoteSubcommand::Show { id } => {
                let note = planner
                    .load()
                    .notes
                    .into_iter()
                    .find(|n| &n.id == id)
                    .ok_or_else(|| format!("Note not found: {}", id))?;
                println!("{}", note.title);
                println!("{}", "=".repeat(note.title.chars().count()));
                println!();
                println!("{}", note.content);
                Ok(())
            }

            NoteSubcommand::Save { id, content } => {
                let content = match content {
                    Some(content) => content.clone(),
                    None => {
                        let mut buf = String::new();
                        io::stdin().read_to_string(&mut buf)?;
                        buf
                    }
                };

                let note = planner
                    .save_note(id, &content)
                    .ok_or_else(|| format!("Note not found: {}", id))?;
                println!("Saved note: {}", note.title);
                Ok(())
            }

            NoteSubcommand::Delete { id } => {
                if !planner.delete_note(id) {
                    return Err(format!("Note not found: {}", id).into());
                }
                println!("Deleted note: {}", id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use victory_planner_core::MemoryStorage;

    #[test]
    fn test_new_with_content() {
        let planner = Planner::new(MemoryStorage::new());
        NoteCommand {
            command: NoteSubcommand::New {
                content: Some("  Groceries \neggs".into()),
            },
        }
        .run(&planner)
        .unwrap();

        let notes = planner.load().notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(notes[0].content, "  Groceries \neggs");
    }
}
