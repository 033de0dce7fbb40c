//! Treeviz formatter
//!
//! Renders the snapshot of a file as an indented tree, one node per line:
//!
//! ```text
//! ├─ Assignment: =
//! │ ├─ Identifier: x
//! │ └─ Integer: 1
//! └─ Pass
//! ```

use super::registry::{FormatError, Formatter};
use crate::rad::ast::{snapshot_source_file, AstSnapshot, SourceFile};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(file: &SourceFile) -> String {
    let root = snapshot_source_file(file);
    let mut result = String::new();
    append_children(&mut result, &root.children, "");
    result
}

fn append_children(result: &mut String, children: &[AstSnapshot], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}

fn append_node(result: &mut String, node: &AstSnapshot, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&node.label, MAX_LABEL_CHARS);

    if label.is_empty() {
        result.push_str(&format!("{prefix}{connector} {}\n", node.node_type));
    } else {
        result.push_str(&format!("{prefix}{connector} {}: {label}\n", node.node_type));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, &node.children, &new_prefix);
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        Ok(to_treeviz_str(file))
    }

    fn description(&self) -> &str {
        "Tree of node types and labels"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rad::parser::parse_source;

    #[test]
    fn test_treeviz_layout() {
        let file = parse_source("x = 1 + 2\nif a:\n    pass\n").unwrap();
        insta::assert_snapshot!(to_treeviz_str(&file), @r"
        ├─ Assignment: =
        │ ├─ Identifier: x
        │ └─ Binary: +
        │   ├─ Integer: 1
        │   └─ Integer: 2
        └─ If
          ├─ Identifier: a
          └─ Block: 1 statement(s)
            └─ Pass
        ");
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let file = parse_source("f(\"abcdefghijklmnopqrstuvwxyz0123456789\")\n").unwrap();
        let output = to_treeviz_str(&file);
        assert!(output.contains("String: \"abcdefghijklmnopqrstuvwxyz012..."));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(to_treeviz_str(&SourceFile::default()), "");
    }
}
