//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Unique, immutable identifier of an employee.
pub type EmployeeId = u64;

/// Employee as written in an org chart literal.
///
/// This is the owned, nested input shape:
///
/// ```json
/// { "uniqueId": 0, "name": "CEO", "subordinates": [ ... ] }
/// ```
///
/// The engine converts it into an arena-backed tree on construction and can
/// produce it again from the current tree via `OrgEngine::snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub unique_id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub subordinates: Vec<Employee>,
}

impl Employee {
    pub fn new(unique_id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            name: name.into(),
            subordinates: Vec::new(),
        }
    }

    /// Builder-style helper for writing literal trees in code.
    pub fn with_subordinates(mut self, subordinates: Vec<Employee>) -> Self {
        self.subordinates = subordinates;
        self
    }

    /// Number of employees in this subtree, including `self`.
    pub fn headcount(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(employee) = stack.pop() {
            count += 1;
            stack.extend(employee.subordinates.iter());
        }
        count
    }
}
