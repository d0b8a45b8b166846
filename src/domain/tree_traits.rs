use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::OrgArena;

/// Rendering of an org tree for terminal display.
pub trait TreeNodeConvert {
    /// `show_ids` renders nodes as `name (#id)` instead of just `name`.
    fn to_tree_string(&self, show_ids: bool) -> Tree<String>;
}

impl TreeNodeConvert for OrgArena {
    fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        fn label(arena: &OrgArena, idx: Index, show_ids: bool) -> String {
            match arena.get_node(idx) {
                Some(node) if show_ids => node.to_string(),
                Some(node) => node.name.clone(),
                None => "?".to_string(),
            }
        }

        // Reverse pre-order builds every subtree before its supervisor's.
        let order: Vec<Index> = self.iter().map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, Tree<String>> = HashMap::with_capacity(order.len());
        for &node_idx in order.iter().rev() {
            let mut tree = Tree::new(label(self, node_idx, show_ids));
            for child_idx in self.subordinates(node_idx) {
                if let Some(child_tree) = built.remove(child_idx) {
                    tree.push(child_tree);
                }
            }
            built.insert(node_idx, tree);
        }

        self.root()
            .and_then(|root_idx| built.remove(&root_idx))
            .unwrap_or_else(|| Tree::new("Empty org chart".to_string()))
    }
}
