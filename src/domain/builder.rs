//! Tree builder turning an org chart literal into an arena-backed tree.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::arena::OrgArena;
use crate::domain::entities::{Employee, EmployeeId};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs an `OrgArena` from a nested `Employee` literal.
#[derive(Debug, Default)]
pub struct OrgBuilder {
    seen_ids: HashSet<EmployeeId>,
}

impl OrgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree rooted at `ceo`.
    ///
    /// Subordinate order is preserved. Fails with `DuplicateEmployee` if a
    /// `uniqueId` occurs more than once.
    #[instrument(level = "debug", skip(self, ceo), fields(ceo = ceo.unique_id))]
    pub fn build(&mut self, ceo: &Employee) -> DomainResult<OrgArena> {
        self.seen_ids.clear();

        let mut tree = OrgArena::new();
        let mut stack = vec![(ceo, None)];

        while let Some((employee, supervisor_idx)) = stack.pop() {
            if !self.seen_ids.insert(employee.unique_id) {
                return Err(DomainError::DuplicateEmployee(employee.unique_id));
            }

            let current_idx =
                tree.insert_node(employee.unique_id, employee.name.clone(), supervisor_idx);

            // Reverse so siblings are popped, and therefore attached, in order
            for subordinate in employee.subordinates.iter().rev() {
                stack.push((subordinate, Some(current_idx)));
            }
        }

        debug!(employees = tree.len(), "built org tree");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_literal_when_building_then_preserves_subordinate_order() {
        let ceo = Employee::new(0, "ceo").with_subordinates(vec![
            Employee::new(1, "a").with_subordinates(vec![Employee::new(3, "c")]),
            Employee::new(2, "b"),
        ]);

        let tree = OrgBuilder::new().build(&ceo).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree.subordinate_ids(root), vec![1, 2]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_duplicate_id_when_building_then_errors() {
        let ceo = Employee::new(0, "ceo")
            .with_subordinates(vec![Employee::new(1, "a"), Employee::new(1, "again")]);

        let result = OrgBuilder::new().build(&ceo);

        assert_eq!(result.unwrap_err(), DomainError::DuplicateEmployee(1));
    }
}
