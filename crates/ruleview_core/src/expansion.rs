use crate::entity_path::EntityPath;
use crate::tree_node::{MatchStatus, NodeKind, TreeNode, walk_tree};
use std::collections::HashSet;

/// Set of expanded node ids, kept apart from the tree itself.
///
/// Ids that no longer exist in the tree are ignored rather than pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expansion for a freshly built tree: the first segment of every path.
    pub fn for_fresh_tree(paths: &[EntityPath]) -> Self {
        Self {
            expanded: paths
                .iter()
                .map(|p| p.first_segment().to_string())
                .collect(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flips the state of `id`; returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapse(id) {
            false
        } else {
            self.expand(id);
            true
        }
    }

    pub fn expand(&mut self, id: impl Into<String>) {
        self.expanded.insert(id.into());
    }

    /// Returns whether `id` was expanded.
    pub fn collapse(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    pub fn expand_all(&mut self, roots: &[TreeNode]) {
        walk_tree(roots, |node| {
            self.expanded.insert(node.id.clone());
        });
    }

    /// Expands every node whose depth is below `depth`.
    pub fn expand_to_depth(&mut self, roots: &[TreeNode], depth: usize) {
        walk_tree(roots, |node| {
            if node.depth < depth {
                self.expanded.insert(node.id.clone());
            }
        });
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// One display row of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub status: MatchStatus,
    pub matched_by: Option<String>,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// Flattens `roots` depth-first, descending only into expanded nodes.
pub fn visible_rows(roots: &[TreeNode], expansion: &ExpansionState) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    for root in roots {
        push_rows(root, expansion, &mut rows);
    }
    rows
}

fn push_rows(node: &TreeNode, expansion: &ExpansionState, rows: &mut Vec<VisibleRow>) {
    let is_expanded = expansion.is_expanded(&node.id);

    rows.push(VisibleRow {
        id: node.id.clone(),
        name: node.name.clone(),
        depth: node.depth,
        kind: node.kind,
        status: node.status(),
        matched_by: node.matched_by.clone(),
        has_children: node.has_children(),
        is_expanded,
    });

    if is_expanded {
        for child in &node.children {
            push_rows(child, expansion, rows);
        }
    }
}
