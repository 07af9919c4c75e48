use crate::tree_node::{NodeKind, TreeNode, walk_tree};
use std::collections::BTreeMap;

/// Summary counts over an entity tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub by_kind: BTreeMap<NodeKind, usize>,
    pub included: usize,
    pub excluded: usize,
    pub max_depth: usize,
}

impl TreeStats {
    pub fn collect(roots: &[TreeNode]) -> Self {
        let mut stats = Self::default();

        walk_tree(roots, |node| {
            stats.total_nodes += 1;
            *stats.by_kind.entry(node.kind).or_default() += 1;
            if node.included {
                stats.included += 1;
            }
            if node.excluded {
                stats.excluded += 1;
            }
            stats.max_depth = stats.max_depth.max(node.depth);
        });

        stats
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} nodes ({} databases, {} schemas, {} tables, {} columns), {} included, {} excluded",
            self.total_nodes,
            self.count(NodeKind::Database),
            self.count(NodeKind::Schema),
            self.count(NodeKind::Table),
            self.count(NodeKind::Column),
            self.included,
            self.excluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityPath, PathTreeBuilder};

    #[test]
    fn counts_nodes_by_kind_and_status() {
        let mut builder = PathTreeBuilder::new();
        for raw in ["db/s/t/c1", "db/s/t/c2", "db/s/u"] {
            builder.include(&EntityPath::parse(raw).unwrap(), None);
        }
        builder.exclude(&EntityPath::parse("db/s/t/c2").unwrap(), None);

        let stats = TreeStats::collect(&builder.build());
        assert_eq!(stats.total_nodes, 6);
        assert_eq!(stats.count(NodeKind::Database), 1);
        assert_eq!(stats.count(NodeKind::Table), 2);
        assert_eq!(stats.count(NodeKind::Column), 2);
        assert_eq!(stats.included, 3);
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn empty_tree() {
        let stats = TreeStats::collect(&[]);
        assert_eq!(stats, TreeStats::default());
        assert!(stats.summary().starts_with("0 nodes"));
    }
}
