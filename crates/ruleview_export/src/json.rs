use crate::{ExportError, Exporter};
use ruleview_core::TreeNode;
use std::io::Write;

pub struct JsonExporter {
    pub pretty: bool,
}

impl Exporter for JsonExporter {
    fn export(&self, roots: &[TreeNode], writer: &mut dyn Write) -> Result<(), ExportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, roots)?;
            writeln!(writer)?;
        } else {
            serde_json::to_writer(writer, roots)?;
        }

        Ok(())
    }
}
