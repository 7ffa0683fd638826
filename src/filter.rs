//! Record filtering.
//!
//! Two independent filters narrow a change list before it is rendered:
//!
//! - [`RecordFilter`] selects by category or breaking flag.
//! - Glob-style [`PathPattern`]s select by locator, split on `.`.
//!
//! # Pattern Syntax
//!
//! - `responses` - matches literal segment "responses"
//! - `*` - matches any single locator segment
//! - `**` - matches any number of segments (including zero)
//! - `/pets.get` - matches the locator "/pets.get"
//! - `**.description` - matches "description" at any depth
//!
//! # Examples
//!
//! ```
//! use oapi_diff::filter::PathPattern;
//!
//! let pattern = PathPattern::parse("components.schemas.*");
//! assert!(pattern.matches_locator("components.schemas.Pet"));
//!
//! let pattern = PathPattern::parse("/pets.**");
//! assert!(pattern.matches_locator("/pets.get.responses.200"));
//! assert!(!pattern.matches_locator("/owners.get"));
//! ```

use crate::change::{Category, ChangeRecord};
use std::str::FromStr;

/// Selection by category or breaking flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordFilter {
    #[default]
    All,
    Breaking,
    Added,
    Removed,
    Modified,
}

impl RecordFilter {
    pub fn accepts(&self, record: &ChangeRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Breaking => record.is_breaking,
            RecordFilter::Added => record.category() == Category::Added,
            RecordFilter::Removed => record.category() == Category::Removed,
            RecordFilter::Modified => record.category() == Category::Modified,
        }
    }
}

impl FromStr for RecordFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(RecordFilter::All),
            "breaking" => Ok(RecordFilter::Breaking),
            "added" => Ok(RecordFilter::Added),
            "removed" => Ok(RecordFilter::Removed),
            "modified" => Ok(RecordFilter::Modified),
            other => Err(format!(
                "unknown filter '{}' (expected all, breaking, added, removed, modified)",
                other
            )),
        }
    }
}

/// A single segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches an exact string
    Literal(String),
    /// Matches any single segment (*)
    SingleWildcard,
    /// Matches any number of segments (**)
    DoubleWildcard,
}

/// A compiled pattern for matching record locators.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches_locator(&self, locator: &str) -> bool {
        let path: Vec<&str> = locator.split('.').collect();
        self.matches(&path)
    }

    pub fn matches(&self, path: &[&str]) -> bool {
        matches_recursive(&self.segments, path)
    }
}

fn matches_recursive(pattern: &[PatternSegment], path: &[&str]) -> bool {
    match (pattern.first(), path.first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(_), None) => pattern
            .iter()
            .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
        (Some(seg), Some(path_seg)) => match seg {
            PatternSegment::Literal(lit) => {
                lit.as_str() == *path_seg && matches_recursive(&pattern[1..], &path[1..])
            }
            PatternSegment::SingleWildcard => matches_recursive(&pattern[1..], &path[1..]),
            PatternSegment::DoubleWildcard => {
                matches_recursive(&pattern[1..], path) || matches_recursive(pattern, &path[1..])
            }
        },
    }
}

/// Configuration for filtering change records.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Locators to exclude
    pub ignore_patterns: Vec<PathPattern>,
    /// If non-empty, only matching locators are kept
    pub only_patterns: Vec<PathPattern>,
    pub record_filter: RecordFilter,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn with_record_filter(mut self, filter: RecordFilter) -> Self {
        self.record_filter = filter;
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty()
            || !self.only_patterns.is_empty()
            || self.record_filter != RecordFilter::All
    }

    pub fn should_include(&self, record: &ChangeRecord) -> bool {
        if !self.record_filter.accepts(record) {
            return false;
        }
        if self
            .ignore_patterns
            .iter()
            .any(|p| p.matches_locator(&record.path))
        {
            return false;
        }
        self.only_patterns.is_empty()
            || self
                .only_patterns
                .iter()
                .any(|p| p.matches_locator(&record.path))
    }
}

/// Returns the records the configuration keeps, in their original order.
pub fn filter_records(records: &[ChangeRecord], config: &FilterConfig) -> Vec<ChangeRecord> {
    if !config.has_filters() {
        return records.to_vec();
    }

    let kept: Vec<ChangeRecord> = records
        .iter()
        .filter(|record| config.should_include(record))
        .cloned()
        .collect();
    tracing::debug!(
        before = records.len(),
        after = kept.len(),
        "filtered change records"
    );
    kept
}
