use crate::config::ViewConfig;
use crate::entity_path::EntityPath;
use crate::expansion::{ExpansionState, VisibleRow, visible_rows};
use crate::tree_filter::{TreeFilter, filter_tree};
use crate::tree_node::TreeNode;
use crate::tree_stats::TreeStats;
use crate::validation::{PatternValidationRequest, PatternValidationResult, PatternValidator};
use crate::RuleViewError;

/// Tree state handed to a presentation layer.
///
/// Owns the unfiltered source tree, the expansion set and the active filter.
/// The source tree is only ever replaced wholesale; filtering always works on
/// a copy, so "expand all" sees every node regardless of the filter.
#[derive(Debug, Clone, Default)]
pub struct RuleTreeView {
    config: ViewConfig,
    source: Vec<TreeNode>,
    expansion: ExpansionState,
    filter: TreeFilter,
    warnings: Vec<String>,
}

impl RuleTreeView {
    pub fn new(config: ViewConfig) -> Self {
        let filter = config.initial_filter();
        Self {
            config,
            source: Vec::new(),
            expansion: ExpansionState::new(),
            filter,
            warnings: Vec::new(),
        }
    }

    /// Rebuilds from included paths only.
    pub fn rebuild_from_paths(&mut self, paths: &[EntityPath]) {
        let mut builder = self.config.tree_builder();
        for path in paths {
            builder.include(path, None);
        }

        self.source = builder.build();
        self.warnings.clear();
        self.reset_expansion(paths);
    }

    /// Rebuilds from a validation result.
    ///
    /// On a malformed entity path the view is cleared and the error returned.
    pub fn rebuild_from_result(
        &mut self,
        result: &PatternValidationResult,
    ) -> Result<(), RuleViewError> {
        let built = result
            .build_tree(self.config.tree_builder())
            .and_then(|tree| Ok((tree, result.all_paths()?)));

        match built {
            Ok((tree, paths)) => {
                self.source = tree;
                self.warnings = result.warnings.clone();
                self.reset_expansion(&paths);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Runs `validator` and rebuilds from its result.
    ///
    /// Any failure leaves the view in the "no data available" state; the
    /// error is logged, not returned.
    pub fn load(&mut self, validator: &dyn PatternValidator, request: &PatternValidationRequest) {
        let outcome = validator
            .validate(request)
            .and_then(|result| self.rebuild_from_result(&result));

        if let Err(e) = outcome {
            log::warn!(
                "No tree data for rule set {} on {}: {}",
                request.rule_set_id,
                request.data_source_id,
                e
            );
            self.clear();
        }
    }

    /// Drops all tree data and expansion state.
    pub fn clear(&mut self) {
        self.source.clear();
        self.expansion.collapse_all();
        self.warnings.clear();
    }

    fn reset_expansion(&mut self, paths: &[EntityPath]) {
        self.expansion = ExpansionState::for_fresh_tree(paths);
        if self.config.auto_expand_depth > 1 {
            self.expansion
                .expand_to_depth(&self.source, self.config.auto_expand_depth);
        }
    }

    pub fn source(&self) -> &[TreeNode] {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn filter(&self) -> &TreeFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TreeFilter) {
        self.filter = filter;
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn filtered(&self) -> Vec<TreeNode> {
        filter_tree(&self.source, &self.filter)
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        visible_rows(&self.filtered(), &self.expansion)
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.expansion.toggle(id)
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.source);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats::collect(&self.source)
    }
}
