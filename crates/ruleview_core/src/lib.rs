mod config;
mod entity_path;
mod error;
mod expansion;
mod pattern;
mod tree_builder;
mod tree_filter;
mod tree_node;
mod tree_stats;
mod validation;
mod view;

pub use config::{ViewConfig, ViewConfigStore};
pub use entity_path::{EntityPath, PATH_SEPARATOR, parent_id};
pub use error::RuleViewError;
pub use expansion::{ExpansionState, VisibleRow, visible_rows};
pub use pattern::{CatalogValidator, EntityPattern};
pub use tree_builder::{
    DEFAULT_EXCLUDE_ANNOTATION, DEFAULT_INCLUDE_ANNOTATION, PathTreeBuilder, build_tree,
    build_tree_with_annotations,
};
pub use tree_filter::{TreeFilter, TypeFilter, filter_tree};
pub use tree_node::{
    MatchStatus, NodeKind, TreeNode, compare_names, find_by_segments, walk_tree,
};
pub use tree_stats::TreeStats;
pub use validation::{PatternValidationRequest, PatternValidationResult, PatternValidator};
pub use view::RuleTreeView;

pub use chrono;
pub use uuid;
