mod csv;
mod json;
mod text;

use ruleview_core::{ExpansionState, TreeNode};
use std::io::Write;
use thiserror::Error;

pub use csv::CsvExporter;
pub use json::JsonExporter;
pub use text::TextExporter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Exporter {
    fn export(&self, roots: &[TreeNode], writer: &mut dyn Write) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    JsonPretty,
    JsonCompact,
    Csv,
}

/// Writes `roots` in `format`.
///
/// `expansion` only affects the text format, where collapsed subtrees are
/// left out. The structured formats always carry the whole tree.
pub fn export(
    roots: &[TreeNode],
    format: ExportFormat,
    expansion: Option<&ExpansionState>,
    writer: &mut dyn Write,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Text => TextExporter { expansion }.export(roots, writer),
        ExportFormat::JsonPretty => JsonExporter { pretty: true }.export(roots, writer),
        ExportFormat::JsonCompact => JsonExporter { pretty: false }.export(roots, writer),
        ExportFormat::Csv => CsvExporter.export(roots, writer),
    }
}
