use crate::entity_path::EntityPath;
use crate::tree_builder::PathTreeBuilder;
use crate::tree_node::TreeNode;
use crate::RuleViewError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Request to resolve a rule set's patterns against a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternValidationRequest {
    pub rule_set_id: Uuid,
    pub data_source_id: String,
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl PatternValidationRequest {
    pub fn new(rule_set_id: Uuid, data_source_id: impl Into<String>) -> Self {
        Self {
            rule_set_id,
            data_source_id: data_source_id.into(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }
}

/// Outcome of a pattern validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternValidationResult {
    pub total_entities: usize,
    pub included_count: usize,
    pub excluded_count: usize,
    #[serde(default)]
    pub matched_entities: Vec<String>,
    #[serde(default)]
    pub excluded_entities: Vec<String>,
    #[serde(default)]
    pub entity_annotations: HashMap<String, String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default = "Utc::now")]
    pub validated_at: DateTime<Utc>,
}

impl PatternValidationResult {
    pub fn empty() -> Self {
        Self {
            total_entities: 0,
            included_count: 0,
            excluded_count: 0,
            matched_entities: Vec::new(),
            excluded_entities: Vec::new(),
            entity_annotations: HashMap::new(),
            warnings: Vec::new(),
            validated_at: Utc::now(),
        }
    }

    /// Validated matched paths, in input order.
    pub fn matched_paths(&self) -> Result<Vec<EntityPath>, RuleViewError> {
        EntityPath::parse_all(&self.matched_entities)
    }

    pub fn excluded_paths(&self) -> Result<Vec<EntityPath>, RuleViewError> {
        EntityPath::parse_all(&self.excluded_entities)
    }

    /// Every path that contributes a node: matched first, then excluded.
    pub fn all_paths(&self) -> Result<Vec<EntityPath>, RuleViewError> {
        let mut paths = self.matched_paths()?;
        paths.extend(self.excluded_paths()?);
        Ok(paths)
    }

    /// Builds the entity tree for this result.
    ///
    /// Matched entities are included first; excluded entities are then
    /// applied as an overlay. Fails on the first malformed path.
    pub fn build_tree(&self, builder: PathTreeBuilder) -> Result<Vec<TreeNode>, RuleViewError> {
        let mut builder = builder;

        for path in self.matched_paths()? {
            let annotation = self.entity_annotations.get(path.as_str());
            builder.include(&path, annotation.map(String::as_str));
        }

        for path in self.excluded_paths()? {
            let annotation = self.entity_annotations.get(path.as_str());
            builder.exclude(&path, annotation.map(String::as_str));
        }

        Ok(builder.build())
    }
}

/// Resolves include/exclude patterns against a data source.
pub trait PatternValidator {
    fn validate(
        &self,
        request: &PatternValidationRequest,
    ) -> Result<PatternValidationResult, RuleViewError>;
}
