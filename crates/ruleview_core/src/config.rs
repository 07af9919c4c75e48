use crate::tree_builder::{DEFAULT_EXCLUDE_ANNOTATION, DEFAULT_INCLUDE_ANNOTATION, PathTreeBuilder};
use crate::tree_filter::{TreeFilter, TypeFilter};
use crate::RuleViewError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Display defaults for the entity tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Levels expanded after a rebuild; 1 expands only the roots.
    #[serde(default = "default_auto_expand_depth")]
    pub auto_expand_depth: usize,

    #[serde(default)]
    pub default_type_filter: TypeFilter,

    #[serde(default)]
    pub matched_only: bool,

    #[serde(default = "default_include_annotation")]
    pub include_annotation: String,

    #[serde(default = "default_exclude_annotation")]
    pub exclude_annotation: String,
}

fn default_auto_expand_depth() -> usize {
    1
}

fn default_include_annotation() -> String {
    DEFAULT_INCLUDE_ANNOTATION.to_string()
}

fn default_exclude_annotation() -> String {
    DEFAULT_EXCLUDE_ANNOTATION.to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            auto_expand_depth: default_auto_expand_depth(),
            default_type_filter: TypeFilter::All,
            matched_only: false,
            include_annotation: default_include_annotation(),
            exclude_annotation: default_exclude_annotation(),
        }
    }
}

impl ViewConfig {
    pub fn tree_builder(&self) -> PathTreeBuilder {
        PathTreeBuilder::new()
            .with_annotations(&self.include_annotation, &self.exclude_annotation)
    }

    pub fn initial_filter(&self) -> TreeFilter {
        TreeFilter::new()
            .kind(self.default_type_filter)
            .matched_only(self.matched_only)
    }
}

/// Persistent storage for [`ViewConfig`].
pub struct ViewConfigStore {
    path: PathBuf,
}

impl ViewConfigStore {
    /// Store under the user's config directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new() -> Result<Self, RuleViewError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            RuleViewError::IoError(std::io::Error::other("Could not find config directory"))
        })?;

        let app_dir = config_dir.join("ruleview");
        fs::create_dir_all(&app_dir).map_err(RuleViewError::IoError)?;

        Ok(Self {
            path: app_dir.join("config.json"),
        })
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the config.
    ///
    /// A missing file yields defaults. A file that fails to parse is logged
    /// and also yields defaults.
    pub fn load(&self) -> Result<ViewConfig, RuleViewError> {
        if !self.path.exists() {
            return Ok(ViewConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(RuleViewError::IoError)?;

        match serde_json::from_str::<ViewConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!(
                    "Failed to parse view config at {} ({}), using defaults",
                    self.path.display(),
                    e
                );
                Ok(ViewConfig::default())
            }
        }
    }

    pub fn save(&self, config: &ViewConfig) -> Result<(), RuleViewError> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| RuleViewError::InvalidConfig(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RuleViewError::IoError)?;
        }
        fs::write(&self.path, content).map_err(RuleViewError::IoError)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
