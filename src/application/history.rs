//! Linear undo/redo log of executed moves.

use crate::domain::EmployeeId;

/// Snapshot of one executed move: enough to invert or replay it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub employee: EmployeeId,
    pub old_supervisor: EmployeeId,
    pub new_supervisor: EmployeeId,
    /// Subordinates the move handed to `old_supervisor`, in their original order
    pub promoted: Vec<EmployeeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub description: String,
    pub command: MoveCommand,
}

/// Append-only command log with a cursor.
///
/// Entries before the cursor are applied, entries at or after it can be
/// redone. Recording while the cursor is not at the end drops the redo branch.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        if self.cursor < self.entries.len() {
            self.entries.truncate(self.cursor);
        }
        self.entries.push(entry);
        self.cursor += 1;
    }

    /// Moves the cursor back and returns the entry to invert.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Returns the entry to replay and moves the cursor past it.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        let entry = self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(employee: EmployeeId) -> HistoryEntry {
        HistoryEntry {
            description: format!("move {employee}"),
            command: MoveCommand {
                employee,
                old_supervisor: 0,
                new_supervisor: 1,
                promoted: vec![],
            },
        }
    }

    #[test]
    fn given_empty_history_when_stepping_then_nothing_happens() {
        let mut history = History::new();
        assert!(history.step_back().is_none());
        assert!(history.step_forward().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn given_two_entries_when_stepping_back_and_forth_then_cursor_follows() {
        let mut history = History::new();
        history.record(entry(2));
        history.record(entry(3));

        assert_eq!(history.step_back().map(|e| e.command.employee), Some(3));
        assert_eq!(history.step_back().map(|e| e.command.employee), Some(2));
        assert!(history.step_back().is_none());
        assert_eq!(history.step_forward().map(|e| e.command.employee), Some(2));
        assert_eq!(history.cursor(), 1);
        assert!(history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn given_undone_entry_when_recording_then_redo_branch_is_dropped() {
        let mut history = History::new();
        history.record(entry(2));
        history.record(entry(3));
        history.step_back();

        history.record(entry(4));

        let employees: Vec<_> = history.entries().iter().map(|e| e.command.employee).collect();
        assert_eq!(employees, vec![2, 4]);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());
    }
}
