//! Flat id lookup over the whole org tree.

use generational_arena::Index;
use itertools::Itertools;
use tracing::{instrument, trace};

use crate::domain::arena::OrgArena;
use crate::domain::EmployeeId;

/// Every employee of the tree as `(id, handle)`, collected once.
///
/// Order: the CEO's direct subordinates, then the collection of each of
/// them in turn, and the CEO last. Moves never create or drop nodes, so the
/// index is built once and never refreshed.
#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    entries: Vec<(EmployeeId, Index)>,
}

impl FlatIndex {
    #[instrument(level = "debug", skip(tree))]
    pub fn build(tree: &OrgArena) -> Self {
        let mut entries = Vec::with_capacity(tree.len());
        if let Some(root) = tree.root() {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                let subordinates = tree.subordinates(node);
                entries.extend(
                    subordinates
                        .iter()
                        .filter_map(|&child| tree.id_of(child).map(|id| (id, child))),
                );
                // Reverse so the first subordinate's collection comes first
                stack.extend(subordinates.iter().rev());
            }
            if let Some(id) = tree.id_of(root) {
                entries.push((id, root));
            }
        }
        trace!(entries = entries.len(), "flat index built");
        Self { entries }
    }

    /// Resolves each id to its node handle.
    ///
    /// The result has the same length and order as `ids`; unknown ids are
    /// `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, ids: &[EmployeeId]) -> Vec<Option<Index>> {
        let filtered = self
            .entries
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .collect_vec();

        ids.iter()
            .map(|wanted| {
                filtered
                    .iter()
                    .find(|(id, _)| id == wanted)
                    .map(|&&(_, idx)| idx)
            })
            .collect()
    }

    pub fn get(&self, id: EmployeeId) -> Option<Index> {
        self.find_by_id(&[id]).into_iter().flatten().next()
    }

    pub fn handles(&self) -> impl Iterator<Item = Index> + '_ {
        self.entries.iter().map(|&(_, idx)| idx)
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
    use crate::domain::{Employee, OrgBuilder};

    fn tree() -> OrgArena {
        let ceo = Employee::new(0, "ceo").with_subordinates(vec![
            Employee::new(1, "a").with_subordinates(vec![Employee::new(3, "c")]),
            Employee::new(2, "b"),
        ]);
        OrgBuilder::new().build(&ceo).unwrap()
    }

    #[test]
    fn given_tree_when_building_index_then_ceo_comes_last() {
        let tree = tree();
        let index = FlatIndex::build(&tree);
        let ids = index.handles().filter_map(|idx| tree.id_of(idx)).collect_vec();
        assert_eq!(ids, vec![1, 2, 3, 0]);
    }

    #[test]
    fn given_mixed_ids_when_finding_then_marks_missing_positions() {
        let tree = tree();
        let index = FlatIndex::build(&tree);

        let found = index.find_by_id(&[3, 42, 0, 3]);

        assert_eq!(found.len(), 4);
        assert_eq!(found[0].and_then(|idx| tree.id_of(idx)), Some(3));
        assert!(found[1].is_none());
        assert_eq!(found[2], tree.root());
        assert_eq!(found[3], found[0]);
    }

    #[test]
    fn given_empty_request_when_finding_then_returns_empty() {
        let index = FlatIndex::build(&tree());
        assert!(index.find_by_id(&[]).is_empty());
        assert_eq!(index.get(9), None);
    }
}
