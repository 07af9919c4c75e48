use crate::RuleViewError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Kind of an entity node, inferred from its position in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Database,
    Schema,
    Table,
    Column,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Database,
        NodeKind::Schema,
        NodeKind::Table,
        NodeKind::Column,
    ];

    /// Any depth past the table level is a column.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => NodeKind::Database,
            1 => NodeKind::Schema,
            2 => NodeKind::Table,
            _ => NodeKind::Column,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Database => "database",
            NodeKind::Schema => "schema",
            NodeKind::Table => "table",
            NodeKind::Column => "column",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = RuleViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleViewError::InvalidConfig(format!("unknown node kind '{}'", s)))
    }
}

/// How a node relates to the rule set that produced the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Unmatched,
    Included,
    Excluded,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Unmatched => "unmatched",
            MatchStatus::Included => "included",
            MatchStatus::Excluded => "excluded",
        }
    }
}

/// A node in the entity tree.
///
/// `id` is the full path from the root; a root's id equals its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub included: bool,
    pub excluded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<String>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, depth: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            depth,
            kind: NodeKind::from_depth(depth),
            included: false,
            excluded: false,
            matched_by: None,
            children: Vec::new(),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.included || self.excluded
    }

    /// Exclusion wins when a node carries both flags.
    pub fn status(&self) -> MatchStatus {
        if self.excluded {
            MatchStatus::Excluded
        } else if self.included {
            MatchStatus::Included
        } else {
            MatchStatus::Unmatched
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Finds a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }

    /// Visits this node and its descendants depth-first, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Walks every node of a root list depth-first.
pub fn walk_tree<'a>(roots: &'a [TreeNode], mut visit: impl FnMut(&'a TreeNode)) {
    for root in roots {
        root.walk(&mut visit);
    }
}

/// Finds a node by following `segments` from the roots.
pub fn find_by_segments<'a, 'b>(
    roots: &'a [TreeNode],
    segments: impl IntoIterator<Item = &'b str>,
) -> Option<&'a TreeNode> {
    let mut level = roots;
    let mut found = None;

    for segment in segments {
        let node = level.iter().find(|n| n.name == segment)?;
        level = &node.children;
        found = Some(node);
    }

    found
}

/// Locale-style name ordering.
///
/// Characters are compared case-insensitively with punctuation ranked before
/// digits and digits before letters. On a tie the first position that differs
/// only by case decides, lowercase first. Raw byte order keeps the ordering
/// total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(collation_key)
        .cmp(b.chars().flat_map(char::to_lowercase).map(collation_key));

    primary
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    y.is_lowercase().cmp(&x.is_lowercase())
                })
        })
        .then_with(|| a.cmp(b))
}

fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_positional_and_clamped() {
        assert_eq!(NodeKind::from_depth(0), NodeKind::Database);
        assert_eq!(NodeKind::from_depth(1), NodeKind::Schema);
        assert_eq!(NodeKind::from_depth(2), NodeKind::Table);
        assert_eq!(NodeKind::from_depth(3), NodeKind::Column);
        assert_eq!(NodeKind::from_depth(9), NodeKind::Column);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Table".parse::<NodeKind>().unwrap(), NodeKind::Table);
        assert_eq!("column".parse::<NodeKind>().unwrap(), NodeKind::Column);
        assert!("view".parse::<NodeKind>().is_err());
    }

    #[test]
    fn status_prefers_exclusion() {
        let mut node = TreeNode::new("a", "a", 0);
        assert_eq!(node.status(), MatchStatus::Unmatched);

        node.included = true;
        assert_eq!(node.status(), MatchStatus::Included);

        node.excluded = true;
        assert_eq!(node.status(), MatchStatus::Excluded);
    }

    #[test]
    fn name_ordering() {
        assert_eq!(compare_names("a", "b"), Ordering::Less);
        assert_eq!(compare_names("B", "a"), Ordering::Greater);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("A", "b"), Ordering::Less);
        assert_eq!(compare_names("col1", "col1"), Ordering::Equal);
        assert_eq!(compare_names("col10", "col2"), Ordering::Less);
    }

    #[test]
    fn case_tie_breaks_at_first_difference() {
        assert_eq!(compare_names("aB", "Ab"), Ordering::Less);
        assert_eq!(compare_names("Ab", "aB"), Ordering::Greater);
        assert_eq!(compare_names("user_ID", "User_id"), Ordering::Less);
    }

    #[test]
    fn punctuation_before_digits_before_letters() {
        assert_eq!(compare_names("a_", "a1"), Ordering::Less);
        assert_eq!(compare_names("a1", "aa"), Ordering::Less);
        assert_eq!(compare_names("a-b", "a1b"), Ordering::Less);
        assert_eq!(compare_names("a", "a_"), Ordering::Less);
    }

    #[test]
    fn sorts_into_expected_order() {
        let mut names = vec!["B", "a1", "Ab", "b", "a_", "aB", "A", "a"];
        names.sort_by(|x, y| compare_names(x, y));
        assert_eq!(names, vec!["a", "A", "a_", "a1", "aB", "Ab", "b", "B"]);
    }

    #[test]
    fn serializes_camel_case() {
        let mut node = TreeNode::new("a/b", "b", 1);
        node.matched_by = Some("include pattern".to_string());

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["matchedBy"], "include pattern");
        assert_eq!(json["kind"], "schema");
    }
}
