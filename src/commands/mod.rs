mod config_cmd;
mod device;
mod event;
mod goal;
mod habit;
mod journal;
mod note;
mod sync_cmd;
mod task;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use device::DeviceCommand;
pub use event::EventCommand;
pub use goal::GoalCommand;
pub use habit::HabitCommand;
pub use journal::JournalCommand;
pub use note::NoteCommand;
pub use sync_cmd::SyncCommand;
pub use task::TaskCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Shortens `text` to `width` characters for table output.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
