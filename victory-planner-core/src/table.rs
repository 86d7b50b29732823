//! Domain table enumeration.

use std::fmt;

/// The six tables the planner keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Goals,
    Tasks,
    Habits,
    JournalEntries,
    Events,
    Notes,
}

impl Table {
    /// Every domain table, in snapshot order.
    pub const ALL: [Table; 6] = [
        Table::Goals,
        Table::Tasks,
        Table::Habits,
        Table::JournalEntries,
        Table::Events,
        Table::Notes,
    ];

    /// Returns the table name used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Goals => "goals",
            Table::Tasks => "tasks",
            Table::Habits => "habits",
            Table::JournalEntries => "journal_entries",
            Table::Events => "events",
            Table::Notes => "notes",
        }
    }
}

impl AsRef<str> for Table {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Goals.as_str(), "goals");
        assert_eq!(Table::JournalEntries.as_str(), "journal_entries");
        assert_eq!(Table::Notes.to_string(), "notes");
    }
}
