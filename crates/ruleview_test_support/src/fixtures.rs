use ruleview_core::{EntityPath, PatternValidationResult, TreeNode, build_tree};
use std::collections::HashMap;

/// A small warehouse catalog spanning two databases.
pub const WAREHOUSE_CATALOG: &[&str] = &[
    "sales/public/customers/id",
    "sales/public/customers/email",
    "sales/public/customers/password_hash",
    "sales/public/orders/id",
    "sales/public/orders/total",
    "sales/archive/orders_2019/id",
    "hr/people/employees/id",
    "hr/people/employees/salary",
];

pub fn paths(raw: &[&str]) -> Vec<EntityPath> {
    raw.iter()
        .map(|s| EntityPath::parse(s).expect("fixture path"))
        .collect()
}

pub fn tree(raw: &[&str]) -> Vec<TreeNode> {
    build_tree(&paths(raw))
}

pub fn warehouse_paths() -> Vec<EntityPath> {
    paths(WAREHOUSE_CATALOG)
}

/// Result with the given matched entities and nothing else.
pub fn matched_result(matched: &[&str]) -> PatternValidationResult {
    PatternValidationResult {
        total_entities: matched.len(),
        included_count: matched.len(),
        excluded_count: 0,
        matched_entities: matched.iter().map(|s| s.to_string()).collect(),
        ..PatternValidationResult::empty()
    }
}

/// Result resembling a live validation of the public sales schema with
/// password columns excluded.
pub fn sales_result() -> PatternValidationResult {
    let matched = [
        "sales/public/customers/id",
        "sales/public/customers/email",
        "sales/public/orders/id",
        "sales/public/orders/total",
    ];
    let excluded = ["sales/public/customers/password_hash"];

    let mut annotations = HashMap::new();
    for path in matched {
        annotations.insert(path.to_string(), "include: sales/public/**".to_string());
    }
    annotations.insert(excluded[0].to_string(), "exclude: **/password*".to_string());

    PatternValidationResult {
        total_entities: WAREHOUSE_CATALOG.len(),
        included_count: matched.len(),
        excluded_count: excluded.len(),
        matched_entities: matched.iter().map(|s| s.to_string()).collect(),
        excluded_entities: excluded.iter().map(|s| s.to_string()).collect(),
        entity_annotations: annotations,
        warnings: vec!["Exclude pattern 'tmp/**' matched no entities".to_string()],
        ..PatternValidationResult::empty()
    }
}

pub fn sales_result_json() -> String {
    serde_json::to_string_pretty(&sales_result()).expect("fixture serializes")
}
