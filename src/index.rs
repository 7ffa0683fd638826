//! Identity keys for list-shaped OpenAPI constructs.
//!
//! Parameters are a list in OpenAPI, so matching them across two documents
//! needs a key. A parameter is identified by its `name` together with its `in`
//! location; moving a parameter from `query` to `path` therefore shows up as a
//! removal plus an addition.

use crate::tree::Node;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    Inline {
        name: Option<String>,
        location: Option<String>,
    },
    /// A bare `$ref` parameter; the reference string is its identity.
    Reference(String),
}

impl ParameterKey {
    pub fn of(param: &Node) -> Self {
        let name = param.get("name").and_then(Node::as_str).map(str::to_string);
        let location = param.get("in").and_then(Node::as_str).map(str::to_string);

        if name.is_none() && location.is_none() {
            if let Some(reference) = param.get("$ref").and_then(Node::as_str) {
                return ParameterKey::Reference(reference.to_string());
            }
        }

        ParameterKey::Inline { name, location }
    }

    /// The name used in locators: the parameter name, or the `$ref` target.
    pub fn display_name(&self) -> &str {
        match self {
            ParameterKey::Inline { name, .. } => name.as_deref().unwrap_or(""),
            ParameterKey::Reference(reference) => reference,
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKey::Inline { name, location } => write!(
                f,
                "{}-{}",
                name.as_deref().unwrap_or("?"),
                location.as_deref().unwrap_or("?")
            ),
            ParameterKey::Reference(reference) => f.write_str(reference),
        }
    }
}

/// Indexes a parameter list by [`ParameterKey`], keeping first-seen order.
///
/// When two entries share a key the later one wins but keeps the position of
/// the first.
pub fn index_parameters(params: &[Node]) -> IndexMap<ParameterKey, &Node> {
    let mut index = IndexMap::with_capacity(params.len());
    for param in params {
        index.insert(ParameterKey::of(param), param);
    }
    index
}
