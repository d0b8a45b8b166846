//! Org engine: owns the tree, its flat index and the move history.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;
use tracing::{debug, info, instrument, warn};

use crate::application::history::{History, HistoryEntry, MoveCommand};
use crate::domain::{
    find_supervisor, reparent, restore, DomainError, DomainResult, Employee, EmployeeId,
    EmployeeNode, FlatIndex, OrgArena, OrgBuilder, Reparented, TreeNodeConvert,
};

/// Stateful controller over one org chart.
///
/// Single-threaded by design: every mutation takes `&mut self` and runs to
/// completion. Wrap it in a lock if it has to be shared.
#[derive(Debug)]
pub struct OrgEngine {
    tree: OrgArena,
    index: FlatIndex,
    ceo: EmployeeId,
    history: History,
}

impl OrgEngine {
    /// Builds the tree and its flat index from an org chart literal.
    ///
    /// # Errors
    /// `DuplicateEmployee` if an id occurs twice.
    #[instrument(level = "debug", skip(ceo), fields(ceo = ceo.unique_id))]
    pub fn new(ceo: &Employee) -> DomainResult<Self> {
        let tree = OrgBuilder::new().build(ceo)?;
        let index = FlatIndex::build(&tree);
        info!(employees = index.len(), "org engine ready");
        Ok(Self {
            tree,
            index,
            ceo: ceo.unique_id,
            history: History::new(),
        })
    }

    /// Moves `employee_id` under `supervisor_id`.
    ///
    /// The employee's own subordinates are promoted to its former supervisor.
    /// A successful move is recorded in the history and drops any redo branch.
    ///
    /// # Errors
    /// Checked in this order, before anything is mutated:
    /// - `SelfSupervision` if both ids are equal
    /// - `CeoCannotBeSubordinate` if the employee is the CEO
    /// - `EmployeeNotFound` naming the first id that does not resolve
    /// - `AlreadySubordinate` if the supervisor already is the direct one
    #[instrument(level = "debug", skip(self))]
    pub fn move_employee(
        &mut self,
        employee_id: EmployeeId,
        supervisor_id: EmployeeId,
    ) -> DomainResult<()> {
        if employee_id == supervisor_id {
            return Err(DomainError::SelfSupervision {
                employee: employee_id,
            });
        }
        if employee_id == self.ceo {
            return Err(DomainError::CeoCannotBeSubordinate(employee_id));
        }

        let found = self.index.find_by_id(&[employee_id, supervisor_id]);
        let employee = found[0].ok_or(DomainError::EmployeeNotFound(employee_id))?;
        let supervisor = found[1].ok_or(DomainError::EmployeeNotFound(supervisor_id))?;

        let Some(Reparented {
            old_supervisor,
            promoted,
        }) = reparent(&mut self.tree, &self.index, employee, supervisor)?
        else {
            warn!(employee_id, "employee has no supervisor, move not recorded");
            return Ok(());
        };

        let description = format!(
            "update supervisor of {} from {} to {}",
            self.name_of(employee),
            self.name_of(old_supervisor),
            self.name_of(supervisor)
        );
        info!("{}", description);

        self.history.record(HistoryEntry {
            description,
            command: MoveCommand {
                employee: employee_id,
                old_supervisor: self.tree.id_of(old_supervisor).unwrap_or_default(),
                new_supervisor: supervisor_id,
                promoted,
            },
        });
        Ok(())
    }

    /// Reverts the most recently applied move.
    ///
    /// Returns false when there is nothing to undo.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.step_back().map(|entry| entry.command.clone()) else {
            debug!("nothing to undo");
            return false;
        };

        let resolved = self
            .index
            .find_by_id(&[command.employee, command.old_supervisor]);
        if let [Some(employee), Some(old_supervisor)] = resolved.as_slice() {
            if let Err(e) = restore(
                &mut self.tree,
                &self.index,
                *employee,
                *old_supervisor,
                &command.promoted,
            ) {
                warn!(error = %e, "undo left the tree unchanged");
            }
        }
        true
    }

    /// Re-applies the most recently undone move.
    ///
    /// Returns false when there is nothing to redo.
    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.history.step_forward().map(|entry| entry.command.clone()) else {
            debug!("nothing to redo");
            return false;
        };

        let resolved = self
            .index
            .find_by_id(&[command.employee, command.new_supervisor]);
        if let [Some(employee), Some(new_supervisor)] = resolved.as_slice() {
            if let Err(e) = reparent(&mut self.tree, &self.index, *employee, *new_supervisor) {
                warn!(error = %e, "redo left the tree unchanged");
            }
        }
        true
    }

    /// Looks up employees by id; `None` marks ids that are not in the chart.
    pub fn find_by_id(&self, ids: &[EmployeeId]) -> Vec<Option<&EmployeeNode>> {
        self.index
            .find_by_id(ids)
            .into_iter()
            .map(|idx| idx.and_then(|idx| self.tree.get_node(idx)))
            .collect()
    }

    /// Current direct supervisor, derived by scanning the tree.
    pub fn supervisor_of(&self, id: EmployeeId) -> Option<EmployeeId> {
        let employee = self.index.get(id)?;
        find_supervisor(&self.tree, &self.index, employee).and_then(|idx| self.tree.id_of(idx))
    }

    /// Ids of the direct subordinates, or `None` for unknown employees.
    pub fn subordinate_ids(&self, id: EmployeeId) -> Option<Vec<EmployeeId>> {
        self.index.get(id).map(|idx| self.tree.subordinate_ids(idx))
    }

    pub fn ceo_id(&self) -> EmployeeId {
        self.ceo
    }

    pub fn ceo(&self) -> Option<&EmployeeNode> {
        self.tree.root().and_then(|idx| self.tree.get_node(idx))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tree(&self) -> &OrgArena {
        &self.tree
    }

    pub fn headcount(&self) -> usize {
        self.index.len()
    }

    /// The current tree as an org chart literal.
    pub fn snapshot(&self) -> Employee {
        // Children come after their supervisor in pre-order, so walking it
        // backwards converts every subtree first.
        let order: Vec<(Index, &EmployeeNode)> = self.tree.iter().collect();
        let mut converted: HashMap<Index, Employee> = HashMap::with_capacity(order.len());
        for &(idx, node) in order.iter().rev() {
            let subordinates = node
                .subordinates
                .iter()
                .filter_map(|child| converted.remove(child))
                .collect();
            converted.insert(
                idx,
                Employee::new(node.id, node.name.clone()).with_subordinates(subordinates),
            );
        }

        self.tree
            .root()
            .and_then(|root| converted.remove(&root))
            .unwrap_or_else(|| Employee::new(self.ceo, ""))
    }

    pub fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        self.tree.to_tree_string(show_ids)
    }

    fn name_of(&self, idx: Index) -> &str {
        self.tree
            .get_node(idx)
            .map(|node| node.name.as_str())
            .unwrap_or("?")
    }
}
