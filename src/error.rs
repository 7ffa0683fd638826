//! Error types for oapi-diff.

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not detect file format for {path}")]
    UnknownFormat { path: String },
}

/// Raised when a document does not have the minimal shape of an API description.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("The {side} document is not an object (found {found})")]
    NotAnObject { side: &'static str, found: String },

    #[error("The {side} document has neither an `openapi` nor a `swagger` field")]
    MissingVersionField { side: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Unknown output format: {format}")]
    UnknownFormat { format: String },

    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write report to {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ApiDiffError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}

impl CompareError {
    pub fn not_an_object(side: &'static str, found: impl Into<String>) -> Self {
        Self::NotAnObject {
            side,
            found: found.into(),
        }
    }

    pub fn missing_version_field(side: &'static str) -> Self {
        Self::MissingVersionField { side }
    }
}

impl OutputError {
    pub fn write_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}
