use chrono::NaiveDate;
use clap::{Args, Subcommand};

use victory_planner_core::{Event, EventPatch, KeyValueStorage, Planner, RecordId};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand)]
pub enum EventSubcommand {
    /// Add a calendar event
    Add {
        /// Event title
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(long, short)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end: Option<String>,

        /// Lasts all day
        #[arg(long)]
        all_day: bool,

        /// Location
        #[arg(long, short)]
        location: Option<String>,
    },

    /// List events
    List {
        /// Only events on this date (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an event
    Update {
        /// Event ID
        id: RecordId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// New start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// New end time (HH:MM)
        #[arg(long)]
        end: Option<String>,

        /// Whether the event lasts all day
        #[arg(long)]
        all_day: Option<bool>,

        /// New location
        #[arg(long, short)]
        location: Option<String>,
    },

    /// Delete an event
    Delete {
        /// Event ID
        id: RecordId,
    },
}

impl EventCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            EventSubcommand::Add {
                title,
                date,
                start,
                end,
                all_day,
                location,
            } => {
                let mut event = Event::new(planner.identity(), title, *date).with_times(
                    start.clone().unwrap_or_default(),
                    end.clone().unwrap_or_default(),
                );
                if *all_day {
                    event = event.all_day();
                }
                if let Some(location) = location {
                    event = event.with_location(location);
                }

                let created = planner.add_event(event)?;
                println!("Created event:");
                println!("  {}  {}", created.id, created);
                Ok(())
            }

            EventSubcommand::List { date, format } => {
                let data = planner.load();
                let mut events: Vec<_> = match date {
                    Some(date) => data.events_on(*date),
                    None => data.events.iter().collect(),
                };
                events.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&events)?);
                    }
                    OutputFormat::Text => {
                        if events.is_empty() {
                            println!("No events found");
                            return Ok(());
                        }

                        println!(
                            "{:<36}  {:<10}  {:<11}  {:<30}  LOCATION",
                            "ID", "DATE", "TIME", "TITLE"
                        );
                        println!("{}", "-".repeat(110));
                        for event in &events {
                            let time = if event.is_all_day {
                                "all day".to_string()
                            } else if event.start_time.is_empty() {
                                String::new()
                            } else {
                                format!("{}-{}", event.start_time, event.end_time)
                            };
                            println!(
                                "{:<36}  {:<10}  {:<11}  {:<30}  {}",
                                event.id.to_string(),
                                event.date.to_string(),
                                time,
                                truncate(&event.title, 30),
                                event.location
                            );
                        }
                        println!("\nTotal: {} event(s)", events.len());
                    }
                }
                Ok(())
            }

            EventSubcommand::Update {
                id,
                title,
                date,
                start,
                end,
                all_day,
                location,
            } => {
                let patch = EventPatch {
                    title: title.clone(),
                    date: *date,
                    start_time: start.clone(),
                    end_time: end.clone(),
                    is_all_day: *all_day,
                    location: location.clone(),
                };
                if patch.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let event = planner
                    .update_event(id, &patch)?
                    .ok_or_else(|| format!("Event not found: {}", id))?;
                println!("Updated event:");
                println!("  {}  {}", event.id, event);
                Ok(())
            }

            EventSubcommand::Delete { id } => {
                if !planner.delete_event(id) {
                    return Err(format!("Event not found: {}", id).into());
                }
                println!("Deleted event: {}", id);
                Ok(())
            }
        }
    }
}
