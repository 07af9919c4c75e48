use crate::{ExportError, Exporter};
use ruleview_core::{ExpansionState, MatchStatus, TreeNode};
use std::io::Write;

const INDENT: &str = "  ";

/// Indented outline of the tree, one node per line.
///
/// Included nodes carry `[+]`, excluded nodes `[-]`. With an expansion set,
/// children of collapsed nodes are omitted and the node gets a trailing `…`.
pub struct TextExporter<'a> {
    pub expansion: Option<&'a ExpansionState>,
}

impl Exporter for TextExporter<'_> {
    fn export(&self, roots: &[TreeNode], writer: &mut dyn Write) -> Result<(), ExportError> {
        for root in roots {
            self.write_node(root, writer)?;
        }
        Ok(())
    }
}

impl TextExporter<'_> {
    fn write_node(&self, node: &TreeNode, writer: &mut dyn Write) -> Result<(), ExportError> {
        let marker = match node.status() {
            MatchStatus::Included => "[+] ",
            MatchStatus::Excluded => "[-] ",
            MatchStatus::Unmatched => "",
        };

        let expanded = self
            .expansion
            .is_none_or(|state| state.is_expanded(&node.id));
        let folded = if node.has_children() && !expanded {
            " …"
        } else {
            ""
        };

        write!(
            writer,
            "{}{}{} ({}){}",
            INDENT.repeat(node.depth),
            marker,
            node.name,
            node.kind,
            folded
        )?;
        if let Some(rule) = &node.matched_by {
            write!(writer, "  <- {}", rule)?;
        }
        writeln!(writer)?;

        if expanded {
            for child in &node.children {
                self.write_node(child, writer)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleview_core::{EntityPath, PathTreeBuilder, build_tree};

    fn render(roots: &[TreeNode], expansion: Option<&ExpansionState>) -> String {
        let mut buf = Vec::new();
        TextExporter { expansion }.export(roots, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_full_outline() {
        let roots = build_tree(&EntityPath::parse_all(["a/x", "b"]).unwrap());
        let output = render(&roots, None);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "a (database)",
                "  [+] x (schema)  <- include pattern",
                "[+] b (database)  <- include pattern",
            ]
        );
    }

    #[test]
    fn collapsed_nodes_hide_children() {
        let paths = EntityPath::parse_all(["a/x/t"]).unwrap();
        let roots = build_tree(&paths);
        let expansion = ExpansionState::for_fresh_tree(&paths);

        let output = render(&roots, Some(&expansion));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["a (database)", "  x (schema) …"]);
    }

    #[test]
    fn marks_exclusions() {
        let mut builder = PathTreeBuilder::new();
        builder.exclude(&EntityPath::parse("db").unwrap(), Some("exclude: db"));

        let output = render(&builder.build(), None);
        assert_eq!(output, "[-] db (database)  <- exclude: db\n");
    }

    #[test]
    fn empty_tree_renders_nothing() {
        assert_eq!(render(&[], None), "");
    }
}
