use clap::{Args, Subcommand};

use victory_planner_core::{KeyValueStorage, Planner, RecordId};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct HabitCommand {
    #[command(subcommand)]
    pub command: HabitSubcommand,
}

#[derive(Subcommand)]
pub enum HabitSubcommand {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
    },

    /// List habits with their streaks
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a habit done today, or undo it
    Toggle {
        /// Habit ID
        id: RecordId,
    },

    /// Delete a habit
    Delete {
        /// Habit ID
        id: RecordId,
    },
}

impl HabitCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            HabitSubcommand::Add { name } => {
                let habit = planner.add_habit(name)?;
                println!("Created habit: {} ({})", habit.name, habit.id);
                Ok(())
            }

            HabitSubcommand::List { format } => {
                let habits = planner.load().habits;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&habits)?);
                    }
                    OutputFormat::Text => {
                        if habits.is_empty() {
                            println!("No habits found");
                            return Ok(());
                        }

                        println!("{:<36}  {:<5}  {:<30}  STREAK", "ID", "TODAY", "HABIT");
                        println!("{}", "-".repeat(84));
                        for habit in &habits {
                            let today = if habit.completed_today { "x" } else { "" };
                            println!(
                                "{:<36}  {:<5}  {:<30}  {}",
                                habit.id.to_string(),
                                today,
                                truncate(&habit.name, 30),
                                habit.streak
                            );
                        }
                    }
                }
                Ok(())
            }

            HabitSubcommand::Toggle { id } => {
                let habit = planner
                    .toggle_habit(id)
                    .ok_or_else(|| format!("Habit not found: {}", id))?;
                let state = if habit.completed_today {
                    "done today"
                } else {
                    "not done today"
                };
                println!("{}: {} (streak {})", habit.name, state, habit.streak);
                Ok(())
            }

            HabitSubcommand::Delete { id } => {
                if !planner.delete_habit(id) {
                    return Err(format!("Habit not found: {}", id).into());
                }
                println!("Deleted habit: {}", id);
                Ok(())
            }
        }
    }
}
