//! Loading OpenAPI/Swagger documents from JSON and YAML.
//!
//! Files are parsed into the [`Node`] tree the differ works on. The format is
//! detected by file extension; for unknown extensions JSON is tried first, then
//! YAML.
//!
//! # Examples
//!
//! ```no_run
//! use oapi_diff::parser::{parse_file, validate_document};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = parse_file(Path::new("petstore.yaml"))?;
//! validate_document(&doc, "old")?;
//! # Ok(())
//! # }
//! ```

use crate::error::{CompareError, ParseError};
use crate::tree::Node;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Hint for [`parse_content`] when the source has no file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    /// Try JSON, then YAML.
    Auto,
}

impl FormatHint {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a Node tree.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The file contains invalid JSON (`ParseError::JsonError`)
/// - The file contains invalid YAML (`ParseError::YamlError`)
/// - The file format cannot be determined (`ParseError::UnknownFormat`)
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let origin = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(origin));
    }

    let content =
        fs::read_to_string(path).map_err(|e| ParseError::read_error(origin.clone(), e))?;

    tracing::debug!(path = %origin, bytes = content.len(), "read document");

    parse_content(&content, FormatHint::from_path(path), &origin)
}

/// Parses in-memory content. `origin` is only used in error messages.
pub fn parse_content(content: &str, hint: FormatHint, origin: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(origin, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e)),
        FormatHint::Auto => parse_json(content)
            .map_err(|_| ())
            .or_else(|_| parse_yaml(content).map_err(|_| ()))
            .map_err(|_| ParseError::unknown_format(origin)),
    }
}

/// Parses a JSON string into a Node, keeping object key order.
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Parses a YAML string into a Node, keeping mapping order.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Checks the minimal shape of an API document: an object carrying either an
/// `openapi` or a `swagger` field.
pub fn validate_document(doc: &Node, side: &'static str) -> Result<(), CompareError> {
    if doc.as_object().is_none() {
        return Err(CompareError::not_an_object(side, doc.type_name()));
    }
    if doc.get("openapi").is_none() && doc.get("swagger").is_none() {
        return Err(CompareError::missing_version_field(side));
    }
    Ok(())
}

fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(b),
        serde_json::Value::Number(n) => Node::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Node::String(s),
        serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            let map: IndexMap<String, Node> =
                obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect();
            Node::Object(map)
        }
    }
}

/// Non-string keys are converted to strings: response codes written as bare
/// `200:` in YAML must match the `"200"` key of a JSON document.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                Node::Number(f)
            } else if let Some(i) = n.as_i64() {
                Node::Number(i as f64)
            } else if let Some(u) = n.as_u64() {
                Node::Number(u as f64)
            } else {
                Node::Number(0.0)
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let entries: IndexMap<String, Node> = map
                .into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_node(v))
                })
                .collect();
            Node::Object(entries)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}
