//! The reparent algorithm: moving an employee under a new supervisor.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::OrgArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::index::FlatIndex;
use crate::domain::EmployeeId;

/// What a reparent displaced, needed to invert it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reparented {
    pub old_supervisor: Index,
    /// Former subordinates of the moved employee, now under `old_supervisor`
    pub promoted: Vec<EmployeeId>,
}

/// Finds the node whose subordinates contain `employee`.
///
/// Scans every indexed node; the tree keeps no parent links.
#[instrument(level = "trace", skip(tree, index))]
pub fn find_supervisor(tree: &OrgArena, index: &FlatIndex, employee: Index) -> Option<Index> {
    index
        .handles()
        .find(|&candidate| tree.subordinates(candidate).contains(&employee))
}

/// Moves `employee` under `new_supervisor`.
///
/// The employee's own subordinates are promoted to its former supervisor and
/// the employee arrives childless at the end of `new_supervisor`'s list.
/// Returns `Ok(None)` without touching the tree if the employee has no
/// supervisor (the root).
///
/// # Errors
/// `AlreadySubordinate` if `new_supervisor` already is the direct supervisor.
#[instrument(level = "debug", skip(tree, index))]
pub fn reparent(
    tree: &mut OrgArena,
    index: &FlatIndex,
    employee: Index,
    new_supervisor: Index,
) -> DomainResult<Option<Reparented>> {
    let Some(old_supervisor) = find_supervisor(tree, index, employee) else {
        trace!("no current supervisor found");
        return Ok(None);
    };

    if old_supervisor == new_supervisor {
        return Err(DomainError::AlreadySubordinate {
            employee: tree.id_of(employee).unwrap_or_default(),
            supervisor: tree.id_of(new_supervisor).unwrap_or_default(),
        });
    }

    tree.detach(old_supervisor, employee);
    let subordinates = tree.take_subordinates(employee);
    let promoted = subordinates
        .iter()
        .filter_map(|&idx| tree.id_of(idx))
        .collect::<Vec<_>>();
    tree.attach_all(old_supervisor, &subordinates);
    tree.attach_all(new_supervisor, &[employee]);

    debug!(?promoted, "reparented employee");
    Ok(Some(Reparented {
        old_supervisor,
        promoted,
    }))
}

/// Puts `employee` back under `old_supervisor` and hands the `promoted`
/// subordinates back to it. Inverse of a successful [`reparent`].
#[instrument(level = "debug", skip(tree, index))]
pub fn restore(
    tree: &mut OrgArena,
    index: &FlatIndex,
    employee: Index,
    old_supervisor: Index,
    promoted: &[EmployeeId],
) -> DomainResult<()> {
    reparent(tree, index, employee, old_supervisor)?;

    if !promoted.is_empty() {
        let handles = index.find_by_id(promoted).into_iter().flatten().collect::<Vec<_>>();
        for &idx in &handles {
            tree.detach(old_supervisor, idx);
        }
        if let Some(node) = tree.get_node_mut(employee) {
            node.subordinates = handles;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, OrgBuilder};

    fn setup() -> (OrgArena, FlatIndex) {
        let ceo = Employee::new(0, "ceo").with_subordinates(vec![
            Employee::new(1, "a").with_subordinates(vec![Employee::new(3, "c")]),
            Employee::new(2, "b"),
        ]);
        let tree = OrgBuilder::new().build(&ceo).unwrap();
        let index = FlatIndex::build(&tree);
        (tree, index)
    }

    #[test]
    fn given_manager_when_reparenting_then_promotes_its_team() {
        let (mut tree, index) = setup();
        let a = index.get(1).unwrap();
        let b = index.get(2).unwrap();
        let ceo = index.get(0).unwrap();

        let moved = reparent(&mut tree, &index, a, b).unwrap().unwrap();

        assert_eq!(moved.old_supervisor, ceo);
        assert_eq!(moved.promoted, vec![3]);
        assert_eq!(tree.subordinate_ids(ceo), vec![2, 3]);
        assert_eq!(tree.subordinate_ids(b), vec![1]);
        assert!(tree.subordinates(a).is_empty());
    }

    #[test]
    fn given_current_supervisor_when_reparenting_then_errors_without_mutation() {
        let (mut tree, index) = setup();
        let a = index.get(1).unwrap();
        let ceo = index.get(0).unwrap();

        let err = reparent(&mut tree, &index, a, ceo).unwrap_err();

        assert_eq!(
            err,
            DomainError::AlreadySubordinate {
                employee: 1,
                supervisor: 0
            }
        );
        assert_eq!(tree.subordinate_ids(ceo), vec![1, 2]);
    }

    #[test]
    fn given_root_when_reparenting_then_nothing_happens() {
        let (mut tree, index) = setup();
        let ceo = index.get(0).unwrap();
        let b = index.get(2).unwrap();

        assert_eq!(reparent(&mut tree, &index, ceo, b).unwrap(), None);
        assert!(tree.subordinates(b).is_empty());
    }

    #[test]
    fn given_reparented_manager_when_restoring_then_team_returns() {
        let (mut tree, index) = setup();
        let a = index.get(1).unwrap();
        let b = index.get(2).unwrap();
        let ceo = index.get(0).unwrap();
        let moved = reparent(&mut tree, &index, a, b).unwrap().unwrap();

        restore(&mut tree, &index, a, moved.old_supervisor, &moved.promoted).unwrap();

        assert_eq!(tree.subordinate_ids(ceo), vec![2, 1]);
        assert_eq!(tree.subordinate_ids(a), vec![3]);
        assert!(tree.subordinates(b).is_empty());
    }
}
