use crate::tree_node::{NodeKind, TreeNode};
use crate::RuleViewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Restricts which node kinds match a filter directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    #[serde(untagged)]
    Kind(NodeKind),
}

impl TypeFilter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Kind(wanted) => wanted == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Kind(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = RuleViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse().map(TypeFilter::Kind)
    }
}

/// Live display filter over an entity tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeFilter {
    pub search_term: String,
    pub type_filter: TypeFilter,
    pub matched_only: bool,
}

impl TreeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn kind(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn matched_only(mut self, matched_only: bool) -> Self {
        self.matched_only = matched_only;
        self
    }

    /// Whether any criterion narrows the tree.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.type_filter != TypeFilter::All || self.matched_only
    }

    /// Whether `node` satisfies every criterion on its own, ignoring children.
    pub fn matches_node(&self, node: &TreeNode) -> bool {
        self.matches_search(node)
            && self.type_filter.matches(node.kind)
            && self.matches_status(node)
    }

    fn matches_search(&self, node: &TreeNode) -> bool {
        self.search_term.is_empty()
            || node
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    fn matches_status(&self, node: &TreeNode) -> bool {
        !self.matched_only || node.is_matched()
    }
}

/// Returns a filtered deep copy of `roots`.
///
/// A node is kept when it matches directly or when any descendant is kept;
/// a kept node carries only its kept children. `roots` is never modified.
pub fn filter_tree(roots: &[TreeNode], filter: &TreeFilter) -> Vec<TreeNode> {
    if !filter.is_active() {
        return roots.to_vec();
    }

    let filtered: Vec<TreeNode> = roots
        .iter()
        .filter_map(|node| filter_node(node, filter))
        .collect();

    log::debug!(
        "Filtered tree with {:?}: {} of {} roots kept",
        filter,
        filtered.len(),
        roots.len()
    );

    filtered
}

fn filter_node(node: &TreeNode, filter: &TreeFilter) -> Option<TreeNode> {
    let children: Vec<TreeNode> = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, filter))
        .collect();

    if children.is_empty() && !filter.matches_node(node) {
        return None;
    }

    Some(TreeNode {
        id: node.id.clone(),
        name: node.name.clone(),
        depth: node.depth,
        kind: node.kind,
        included: node.included,
        excluded: node.excluded,
        matched_by: node.matched_by.clone(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityPath, build_tree};

    fn tree(raw: &[&str]) -> Vec<TreeNode> {
        build_tree(&EntityPath::parse_all(raw).unwrap())
    }

    #[test]
    fn search_keeps_ancestors_of_matches() {
        let roots = tree(&["a/x", "a/y", "b/z"]);
        let filtered = filter_tree(&roots, &TreeFilter::new().search("z"));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "b");
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].name, "z");
    }

    #[test]
    fn search_is_case_insensitive() {
        let roots = tree(&["Sales/Orders"]);
        let filtered = filter_tree(&roots, &TreeFilter::new().search("oRd"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].children[0].name, "Orders");
    }

    #[test]
    fn matching_ancestor_keeps_only_matching_children() {
        let roots = tree(&["orders/orders_archive", "orders/customers"]);
        let filtered = filter_tree(&roots, &TreeFilter::new().search("orders"));

        assert_eq!(filtered.len(), 1);
        let names: Vec<_> = filtered[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["orders_archive"]);
    }

    #[test]
    fn matched_only_keeps_fully_matched_tree() {
        let roots = tree(&["db1/schema1/table1/col1", "db1/schema1/table1/col2"]);
        let filtered = filter_tree(
            &roots,
            &TreeFilter::new().kind(TypeFilter::All).matched_only(true),
        );
        assert_eq!(filtered, roots);
    }

    #[test]
    fn matched_only_prunes_unmarked_leaves() {
        let mut roots = tree(&["a/b", "a/c"]);
        roots[0].children[1].included = false;

        let filtered = filter_tree(&roots, &TreeFilter::new().matched_only(true));
        assert_eq!(filtered[0].children.len(), 1);
        assert_eq!(filtered[0].children[0].name, "b");
    }

    #[test]
    fn type_filter_selects_kind() {
        let roots = tree(&["db/s1/t1/c1", "db/s2"]);
        let filter = TreeFilter::new().kind(TypeFilter::Kind(NodeKind::Table));
        let filtered = filter_tree(&roots, &filter);

        assert_eq!(filtered.len(), 1);
        let db = &filtered[0];
        assert_eq!(db.children.len(), 1);
        assert_eq!(db.children[0].name, "s1");
        let table = &db.children[0].children[0];
        assert_eq!(table.name, "t1");
        assert!(table.children.is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        let roots = tree(&["a/b"]);
        assert!(filter_tree(&roots, &TreeFilter::new().search("zzz")).is_empty());
    }

    #[test]
    fn source_is_untouched() {
        let roots = tree(&["a/x", "a/y", "b/z"]);
        let snapshot = roots.clone();

        let _ = filter_tree(&roots, &TreeFilter::new().search("x").matched_only(true));
        assert_eq!(roots, snapshot);
    }

    #[test]
    fn type_filter_parses() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "schema".parse::<TypeFilter>().unwrap(),
            TypeFilter::Kind(NodeKind::Schema)
        );
        assert!("index".parse::<TypeFilter>().is_err());
        assert_eq!(TypeFilter::Kind(NodeKind::Column).to_string(), "column");
    }

    #[test]
    fn inactive_filter() {
        assert!(!TreeFilter::new().is_active());
        assert!(TreeFilter::new().search("a").is_active());
        assert!(TreeFilter::new().matched_only(true).is_active());
    }
}
