use chrono::NaiveDate;
use clap::{Args, Subcommand};

use victory_planner_core::{KeyValueStorage, Planner, Priority, RecordId};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task and its all-day calendar event
    Add {
        /// What needs doing
        text: String,

        /// Priority: low, medium or high
        #[arg(long, short, default_value = "medium")]
        priority: Priority,

        /// Date (YYYY-MM-DD, default: today)
        #[arg(long, short)]
        date: Option<NaiveDate>,
    },

    /// List tasks
    List {
        /// Only tasks on this date (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle a task between done and not done
    Toggle {
        /// Task ID
        id: RecordId,
    },

    /// Delete a task and its calendar event
    Delete {
        /// Task ID
        id: RecordId,
    },
}

impl TaskCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TaskSubcommand::Add {
                text,
                priority,
                date,
            } => {
                let (task, event) = planner.add_task(text, *priority, *date)?;
                println!("Created task:");
                println!("  {}  {}", task.id, task);
                if event.is_none() {
                    tracing::warn!("Task {} was saved without its calendar event", task.id);
                }
                Ok(())
            }

            TaskSubcommand::List { date, format } => {
                let data = planner.load();
                let tasks: Vec<_> = match date {
                    Some(date) => data.tasks_on(*date),
                    None => data.tasks.iter().collect(),
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&tasks)?);
                    }
                    OutputFormat::Text => {
                        if tasks.is_empty() {
                            println!("No tasks found");
                            return Ok(());
                        }

                        println!(
                            "{:<36}  {:<4}  {:<30}  {:<8}  DATE",
                            "ID", "DONE", "TASK", "PRIORITY"
                        );
                        println!("{}", "-".repeat(96));
                        for task in &tasks {
                            let done = if task.completed { "x" } else { "" };
                            println!(
                                "{:<36}  {:<4}  {:<30}  {:<8}  {}",
                                task.id.to_string(),
                                done,
                                truncate(&task.text, 30),
                                task.priority.to_string(),
                                task.date
                            );
                        }

                        if let Some(date) = date {
                            let (completed, total) = data.progress_on(*date);
                            println!("\nProgress: {}/{} completed", completed, total);
                        } else {
                            println!("\nTotal: {} task(s)", tasks.len());
                        }
                    }
                }
                Ok(())
            }

            TaskSubcommand::Toggle { id } => match planner.toggle_task(id) {
                Some(task) => {
                    println!("{}", task);
                    Ok(())
                }
                None => Err(format!("Task not found: {}", id).into()),
            },

            TaskSubcommand::Delete { id } => {
                if !planner.delete_task(id) {
                    return Err(format!("Task not found: {}", id).into());
                }
                println!("Deleted task: {}", id);
                Ok(())
            }
        }
    }
}
