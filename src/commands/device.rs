//! Device identity command.

use clap::{Args, Subcommand};

use victory_planner_core::{KeyValueStorage, Planner, Table};

/// Show this device's identity
#[derive(Args)]
pub struct DeviceCommand {
    #[command(subcommand)]
    command: DeviceSubcommand,
}

#[derive(Subcommand)]
enum DeviceSubcommand {
    /// Show the identity records on this device are tagged with
    Show,
}

impl DeviceCommand {
    pub fn run<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DeviceSubcommand::Show => self.show(planner),
        }
    }

    fn show<S: KeyValueStorage>(
        &self,
        planner: &Planner<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let data = planner.load();
        if data.identity.is_empty() {
            return Err("Device identity could not be read from storage".into());
        }

        println!("Identity");
        println!("========");
        println!();
        println!("ID: {}", data.identity);
        println!();
        println!("Records:");
        for (table, count) in [
            (Table::Goals, data.goals.len()),
            (Table::Tasks, data.tasks.len()),
            (Table::Habits, data.habits.len()),
            (Table::JournalEntries, data.journal_entries.len()),
            (Table::Events, data.events.len()),
            (Table::Notes, data.notes.len()),
        ] {
            println!("  {:<16} {}", table.as_str(), count);
        }
        println!();
        println!("To move your data to another device, run:");
        println!("  planner sync export");
        println!("and on the other device:");
        println!("  planner sync import <CODE>");

        Ok(())
    }
}
