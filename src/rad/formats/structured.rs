//! JSON and YAML dumps of the tree
//!
//! Both serialize the AST types directly, so the output carries spans and
//! every field the parser recorded.

use super::registry::{FormatError, Formatter};
use crate::rad::ast::SourceFile;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        serde_json::to_string_pretty(file)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON with spans"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        serde_yaml::to_string(file).map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "YAML with spans"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rad::parser::parse_source;
    use serde_json::Value;

    #[test]
    fn test_json_shape() {
        let file = parse_source("pass\n").unwrap();
        let output = JsonFormatter.serialize(&file).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        let statement = &value["statements"][0];
        assert_eq!(statement["kind"], Value::String("pass".to_string()));
        assert_eq!(statement["span"]["start"]["line"], Value::from(1));
    }

    #[test]
    fn test_yaml_mentions_nodes() {
        let file = parse_source("total += 2\n").unwrap();
        let output = YamlFormatter.serialize(&file).unwrap();
        assert!(output.contains("add_assign"));
        assert!(output.contains("identifier: total"));
    }
}
