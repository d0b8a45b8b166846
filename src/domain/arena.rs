use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::EmployeeId;

/// Tree node in the arena-based org chart.
///
/// Nodes only know their direct subordinates. The supervisor of a node is
/// never stored; it is found by scanning for the node whose `subordinates`
/// contains it.
#[derive(Debug)]
pub struct EmployeeNode {
    pub id: EmployeeId,
    pub name: String,
    /// Direct reports in insertion order
    pub subordinates: Vec<Index>,
}

impl fmt::Display for EmployeeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Arena-based org tree.
///
/// Uses a generational arena so that subordinate links and index handles stay
/// valid while nodes are moved around. Nodes are never removed from the arena.
#[derive(Debug)]
pub struct OrgArena {
    arena: Arena<EmployeeNode>,
    /// The CEO, None for empty trees
    root: Option<Index>,
}

impl Default for OrgArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node and appends it to `supervisor`'s subordinates.
    /// A node inserted without a supervisor becomes the root.
    #[instrument(level = "trace", skip(self, name))]
    pub fn insert_node(
        &mut self,
        id: EmployeeId,
        name: String,
        supervisor: Option<Index>,
    ) -> Index {
        let node_idx = self.arena.insert(EmployeeNode {
            id,
            name,
            subordinates: Vec::new(),
        });

        if let Some(supervisor_idx) = supervisor {
            if let Some(supervisor) = self.arena.get_mut(supervisor_idx) {
                supervisor.subordinates.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&EmployeeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut EmployeeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    /// Id of the node at `idx`, if it exists.
    pub fn id_of(&self, idx: Index) -> Option<EmployeeId> {
        self.get_node(idx).map(|node| node.id)
    }

    /// Direct subordinates of `idx`; empty for unknown handles.
    pub fn subordinates(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.subordinates.as_slice())
            .unwrap_or(&[])
    }

    /// Ids of the direct subordinates of `idx`, in order.
    pub fn subordinate_ids(&self, idx: Index) -> Vec<EmployeeId> {
        self.subordinates(idx)
            .iter()
            .filter_map(|&child| self.id_of(child))
            .collect()
    }

    /// Removes `employee` from `supervisor`'s direct subordinates.
    /// Returns false if it was not there.
    pub fn detach(&mut self, supervisor: Index, employee: Index) -> bool {
        match self.get_node_mut(supervisor) {
            Some(node) => {
                let before = node.subordinates.len();
                node.subordinates.retain(|&child| child != employee);
                node.subordinates.len() != before
            }
            None => false,
        }
    }

    /// Appends `employees` to `supervisor`'s direct subordinates.
    pub fn attach_all(&mut self, supervisor: Index, employees: &[Index]) {
        if let Some(node) = self.get_node_mut(supervisor) {
            node.subordinates.extend_from_slice(employees);
        }
    }

    /// Empties `idx`'s subordinate list and returns what it held.
    pub fn take_subordinates(&mut self, idx: Index) -> Vec<Index> {
        self.get_node_mut(idx)
            .map(|node| std::mem::take(&mut node.subordinates))
            .unwrap_or_default()
    }

    /// Pre-order, left-to-right traversal starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((node_idx, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(
                self.subordinates(node_idx)
                    .iter()
                    .map(|&child| (child, level + 1)),
            );
        }
        deepest
    }

    /// Ids of employees without subordinates, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn individual_contributors(&self) -> Vec<EmployeeId> {
        self.iter()
            .filter(|(_, node)| node.subordinates.is_empty())
            .map(|(_, node)| node.id)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a OrgArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a EmployeeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.subordinates.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> (OrgArena, Index, Index, Index) {
        let mut arena = OrgArena::new();
        let ceo = arena.insert_node(0, "ceo".into(), None);
        let a = arena.insert_node(1, "a".into(), Some(ceo));
        let b = arena.insert_node(2, "b".into(), Some(a));
        (arena, ceo, a, b)
    }

    #[test]
    fn given_nested_nodes_when_iterating_then_visits_in_preorder() {
        let (arena, _, _, _) = small_tree();
        let ids: Vec<_> = arena.iter().map(|(_, node)| node.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.individual_contributors(), vec![2]);
    }

    #[test]
    fn given_uneven_branches_when_measuring_depth_then_takes_deepest() {
        let (mut arena, ceo, _, b) = small_tree();
        arena.insert_node(3, "c".into(), Some(ceo));
        arena.insert_node(4, "d".into(), Some(b));

        assert_eq!(arena.depth(), 4);
        assert_eq!(OrgArena::new().depth(), 0);
    }

    #[test]
    fn given_attached_node_when_detaching_then_removes_only_that_link() {
        let (mut arena, ceo, a, b) = small_tree();

        assert!(arena.detach(a, b));
        assert!(!arena.detach(a, b));
        arena.attach_all(ceo, &[b]);

        assert_eq!(arena.subordinate_ids(ceo), vec![1, 2]);
        assert!(arena.subordinates(a).is_empty());
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn given_node_with_subordinates_when_taking_then_leaves_it_childless() {
        let (mut arena, ceo, _, _) = small_tree();
        let taken = arena.take_subordinates(ceo);
        assert_eq!(taken.len(), 1);
        assert!(arena.subordinates(ceo).is_empty());
    }
}
