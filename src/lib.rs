//! oapi-diff - Semantic diff for OpenAPI/Swagger documents.
//!
//! This library compares two OpenAPI (or Swagger) documents structurally,
//! reports every difference as a typed change record, classifies each one as
//! breaking or not, and derives a semantic version suggestion and a
//! per-endpoint heatmap from the result.
//!
//! # Example
//!
//! ```no_run
//! use oapi_diff::{build_heatmap, compare, format_report, parse_file, OutputFormat, OutputOptions, Report};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse two documents
//! let old = parse_file(Path::new("petstore-v1.yaml"))?;
//! let new = parse_file(Path::new("petstore-v2.yaml"))?;
//!
//! // Compare them
//! let comparison = compare(&old, &new)?;
//! let heatmap = build_heatmap(&comparison.records, &old, &new);
//!
//! // Render a report
//! let report = Report::new(comparison.records, heatmap);
//! let output = format_report(&report, OutputFormat::Markdown, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod classify;
pub mod diff;
pub mod error;
pub mod filter;
pub mod index;
pub mod output;
pub mod parser;
pub mod policy;
pub mod sink;
pub mod tree;

// Re-export commonly used types for convenience
pub use change::{Category, Change, ChangeRecord, Constraint};
pub use classify::{
    build_heatmap, endpoint_of, suggest_version, ChangeStats, EndpointStatus, HeatmapEntry,
    VersionLevel, VersionSuggestion,
};
pub use diff::{compare, Comparison};
pub use error::{ApiDiffError, CompareError, OutputError, ParseError};
pub use filter::{filter_records, FilterConfig, RecordFilter};
pub use output::{format_report, OutputFormat, OutputOptions, Report};
pub use parser::{parse_content, parse_file, parse_json, parse_yaml, validate_document, FormatHint};
pub use tree::Node;
