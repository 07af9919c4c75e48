use crate::entity_path::{EntityPath, parent_id};
use crate::tree_node::{TreeNode, compare_names};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Annotation used when an included path has no per-entity annotation.
pub const DEFAULT_INCLUDE_ANNOTATION: &str = "include pattern";

/// Annotation used when an excluded path has no per-entity annotation.
pub const DEFAULT_EXCLUDE_ANNOTATION: &str = "exclude pattern";

/// Builds a sorted entity tree from flat paths.
///
/// Nodes are staged in a map keyed by id, so repeated paths and shared
/// prefixes collapse onto the same node. Linking and sorting happen once in
/// [`PathTreeBuilder::build`]. Exclusions are an overlay: they reuse the same
/// node-creation step and may land on a node that is also included.
#[derive(Debug)]
pub struct PathTreeBuilder {
    nodes: HashMap<String, TreeNode>,
    include_annotation: String,
    exclude_annotation: String,
}

impl Default for PathTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            include_annotation: DEFAULT_INCLUDE_ANNOTATION.to_string(),
            exclude_annotation: DEFAULT_EXCLUDE_ANNOTATION.to_string(),
        }
    }

    pub fn with_annotations(
        mut self,
        include: impl Into<String>,
        exclude: impl Into<String>,
    ) -> Self {
        self.include_annotation = include.into();
        self.exclude_annotation = exclude.into();
        self
    }

    /// Number of distinct nodes staged so far.
    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Marks the leaf of `path` as included.
    ///
    /// `matched_by` overrides the default include annotation.
    pub fn include(&mut self, path: &EntityPath, matched_by: Option<&str>) -> &mut Self {
        let annotation = matched_by.unwrap_or(self.include_annotation.as_str()).to_string();
        let leaf = self.ensure_path(path);
        leaf.included = true;
        if !leaf.excluded {
            leaf.matched_by = Some(annotation);
        }
        self
    }

    /// Marks the leaf of `path` as excluded.
    ///
    /// The exclusion annotation replaces any include annotation on the node.
    pub fn exclude(&mut self, path: &EntityPath, matched_by: Option<&str>) -> &mut Self {
        let annotation = matched_by.unwrap_or(self.exclude_annotation.as_str()).to_string();
        let leaf = self.ensure_path(path);
        leaf.excluded = true;
        leaf.matched_by = Some(annotation);
        self
    }

    fn ensure_path(&mut self, path: &EntityPath) -> &mut TreeNode {
        let depth = path.depth();

        for (ancestor_depth, prefix, segment) in path.prefixes().take(depth) {
            if !self.nodes.contains_key(prefix) {
                self.nodes.insert(
                    prefix.to_string(),
                    TreeNode::new(prefix, segment, ancestor_depth),
                );
            }
        }

        self.nodes
            .entry(path.as_str().to_string())
            .or_insert_with(|| TreeNode::new(path.as_str(), path.last_segment(), depth))
    }

    /// Links staged nodes into parent-owned children and sorts every level.
    pub fn build(self) -> Vec<TreeNode> {
        let mut nodes = self.nodes;

        // Deepest first, so a node's own children are attached before it moves.
        let mut ids: Vec<(usize, String)> = nodes
            .values()
            .filter(|n| n.depth > 0)
            .map(|n| (n.depth, n.id.clone()))
            .collect();
        ids.sort_by_key(|(depth, _)| Reverse(*depth));

        for (_, id) in ids {
            let Some(node) = nodes.remove(&id) else {
                continue;
            };

            // ensure_path stages every ancestor, so a parent is always present.
            let parent = parent_id(&id).and_then(|parent| nodes.get_mut(parent));
            debug_assert!(parent.is_some(), "node {id} has no staged parent");
            if let Some(parent) = parent {
                parent.children.push(node);
            }
        }

        let mut roots: Vec<TreeNode> = nodes.into_values().collect();
        sort_nodes(&mut roots);
        roots
    }
}

fn sort_nodes(nodes: &mut [TreeNode]) {
    nodes.sort_by(|a, b| compare_names(&a.name, &b.name));
    for node in nodes.iter_mut() {
        sort_nodes(&mut node.children);
    }
}

/// Builds a tree where every path is included with the default annotation.
pub fn build_tree(paths: &[EntityPath]) -> Vec<TreeNode> {
    build_tree_with_annotations(paths, &HashMap::new())
}

/// Builds a tree where every path is included, annotated from `annotations`
/// when the path has an entry there.
pub fn build_tree_with_annotations(
    paths: &[EntityPath],
    annotations: &HashMap<String, String>,
) -> Vec<TreeNode> {
    let mut builder = PathTreeBuilder::new();
    for path in paths {
        builder.include(path, annotations.get(path.as_str()).map(String::as_str));
    }

    log::debug!(
        "Built entity tree from {} paths ({} nodes)",
        paths.len(),
        builder.len()
    );

    builder.build()
}
