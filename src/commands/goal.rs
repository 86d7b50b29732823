use clap::{Args, Subcommand};

use victory_planner_core::{KeyValueStorage, Planner, RecordId, CATEGORIES, OTHER_CATEGORY};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Add a goal
    Add {
        /// Goal title
        title: String,

        /// Category (see `planner goal categories`)
        #[arg(long, default_value = "Personal Growth")]
        category: String,

        /// Free-form category, used when the category is "Other"
        #[arg(long)]
        custom_category: Option<String>,

        /// Target to reach
        #[arg(long, short, default_value_t = 10)]
        target: u32,
    },

    /// List goals
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the goal categories
    Categories,

    /// Move a goal's progress up or down
    Progress {
        /// Goal ID
        id: RecordId,

        /// Amount to add (negative to subtract)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Set a goal's progress
    Set {
        /// Goal ID
        id: RecordId,

        /// New progress value
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Delete a goal
    Delete {
        /// Goal ID
        id: RecordId,
    },
}

impl GoalCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalSubcommand::Add {
                title,
                category,
                custom_category,
                target,
            } => {
                if category == OTHER_CATEGORY
                    && custom_category.as_deref().map_or(true, |c| c.trim().is_empty())
                {
                    return Err("--custom-category is required for category \"Other\"".into());
                }

                let goal = planner.add_goal(title, category, custom_category.clone(), *target)?;
                println!("Created goal:");
                println!("  {}  {}", goal.id, goal);
                Ok(())
            }

            GoalSubcommand::List { format } => {
                let goals = planner.load().goals;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&goals)?);
                    }
                    OutputFormat::Text => {
                        if goals.is_empty() {
                            println!("No goals found");
                            return Ok(());
                        }

                        println!(
                            "{:<36}  {:<30}  {:<20}  PROGRESS",
                            "ID", "GOAL", "CATEGORY"
                        );
                        println!("{}", "-".repeat(100));
                        for goal in &goals {
                            let done = if goal.is_complete() { " ✓" } else { "" };
                            println!(
                                "{:<36}  {:<30}  {:<20}  {}/{}{}",
                                goal.id.to_string(),
                                truncate(&goal.title, 30),
                                truncate(&goal.category, 20),
                                goal.current,
                                goal.target,
                                done
                            );
                        }
                        println!("\nTotal: {} goal(s)", goals.len());
                    }
                }
                Ok(())
            }

            GoalSubcommand::Categories => {
                for category in CATEGORIES {
                    println!("{}", category);
                }
                Ok(())
            }

            GoalSubcommand::Progress { id, delta } => {
                let goal = planner
                    .adjust_goal_progress(id, *delta)
                    .ok_or_else(|| format!("Goal not found: {}", id))?;
                println!("{}", goal);
                Ok(())
            }

            GoalSubcommand::Set { id, value } => {
                let goal = planner
                    .set_goal_progress(id, *value)
                    .ok_or_else(|| format!("Goal not found: {}", id))?;
                println!("{}", goal);
                Ok(())
            }

            GoalSubcommand::Delete { id } => {
                if !planner.delete_goal(id) {
                    return Err(format!("Goal not found: {}", id).into());
                }
                println!("Deleted goal: {}", id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use victory_planner_core::MemoryStorage;

    fn run(planner: &Planner<MemoryStorage>, command: GoalSubcommand) -> Result<(), String> {
        GoalCommand { command }
            .run(planner)
            .map_err(|e| e.to_string())
    }

    #[test]
    fn test_other_requires_custom_category() {
        let planner = Planner::new(MemoryStorage::new());
        let add = |custom: Option<&str>| GoalSubcommand::Add {
            title: "Learn to sail".into(),
            category: "Other".into(),
            custom_category: custom.map(String::from),
            target: 3,
        };

        assert!(run(&planner, add(None)).is_err());
        assert!(planner.load().goals.is_empty());

        run(&planner, add(Some("Outdoors"))).unwrap();
        assert_eq!(planner.load().goals[0].category, "Outdoors");
    }

    #[test]
    fn test_progress_not_found() {
        let planner = Planner::new(MemoryStorage::new());
        let err = run(
            &planner,
            GoalSubcommand::Progress {
                id: RecordId::new(),
                delta: 1,
            },
        )
        .unwrap_err();

        assert!(err.contains("Goal not found"));
    }
}
