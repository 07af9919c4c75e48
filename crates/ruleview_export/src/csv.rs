use crate::{ExportError, Exporter};
use csv::Writer;
use ruleview_core::{TreeNode, walk_tree};
use std::io::Write;

/// One row per included or excluded node, in tree order.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, roots: &[TreeNode], writer: &mut dyn Write) -> Result<(), ExportError> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(["path", "kind", "status", "matched_by"])?;

        let mut marked = Vec::new();
        walk_tree(roots, |node| {
            if node.is_matched() {
                marked.push(node);
            }
        });

        for node in marked {
            csv_writer.write_record([
                node.id.as_str(),
                node.kind.as_str(),
                node.status().as_str(),
                node.matched_by.as_deref().unwrap_or(""),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleview_test_support::fixtures::{sales_result, tree};
    use ruleview_core::PathTreeBuilder;

    fn render(roots: &[TreeNode]) -> String {
        let mut buf = Vec::new();
        CsvExporter.export(roots, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lists_marked_nodes_only() {
        let output = render(&tree(&["a/x", "a/y"]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "path,kind,status,matched_by",
                "a/x,schema,included,include pattern",
                "a/y,schema,included,include pattern",
            ]
        );
    }

    #[test]
    fn quotes_fields_with_commas() {
        let mut builder = PathTreeBuilder::new();
        builder.include(
            &ruleview_core::EntityPath::parse("db").unwrap(),
            Some("include: a,b"),
        );

        let output = render(&builder.build());
        assert!(output.contains("db,database,included,\"include: a,b\""));
    }

    #[test]
    fn exclusions_report_status() {
        let roots = sales_result().build_tree(PathTreeBuilder::new()).unwrap();
        let output = render(&roots);

        assert!(output.contains(
            "sales/public/customers/password_hash,column,excluded,exclude: **/password*"
        ));
        assert_eq!(output.lines().count(), 6);
    }

    #[test]
    fn empty_tree_has_header_only() {
        assert_eq!(render(&[]).trim(), "path,kind,status,matched_by");
    }
}
