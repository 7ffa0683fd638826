//! Derived views over a change list: summary counts, a semantic version
//! suggestion, and a per-endpoint heatmap.

use crate::change::{Category, ChangeRecord};
use crate::tree::Node;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Upper bound on the records sampled into a [`VersionSuggestion`].
pub const MAX_SAMPLES: usize = 5;

/// Counts by category and breaking flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStats {
    pub total: usize,
    pub breaking: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ChangeStats {
    /// Counts records per category. A breaking record is counted both as
    /// breaking and under its category.
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            if record.is_breaking {
                stats.breaking += 1;
            }
            match record.category() {
                Category::Added => stats.added += 1,
                Category::Removed => stats.removed += 1,
                Category::Modified => stats.modified += 1,
            }
        }
        stats
    }

    /// Records that are not breaking.
    pub fn non_breaking(&self) -> usize {
        self.total - self.breaking
    }
}

/// Semantic version bump, ordered from least to most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl VersionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionLevel::None => "none",
            VersionLevel::Patch => "patch",
            VersionLevel::Minor => "minor",
            VersionLevel::Major => "major",
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            VersionLevel::None => "No version change needed",
            VersionLevel::Patch => "Patch version bump (x.y.Z)",
            VersionLevel::Minor => "Minor version bump (x.Y.0)",
            VersionLevel::Major => "Major version bump (X.0.0)",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VersionLevel::None => "The two documents describe the same API.",
            VersionLevel::Patch => {
                "Only documentation, metadata, or backward-compatible refinements changed."
            }
            VersionLevel::Minor => "New functionality was added in a backward-compatible way.",
            VersionLevel::Major => "Breaking changes may cause existing clients to fail.",
        }
    }
}

impl fmt::Display for VersionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionSuggestion {
    pub level: VersionLevel,
    pub suggestion: String,
    pub description: String,
    /// Up to [`MAX_SAMPLES`] of the records that determined `level`.
    pub samples: Vec<ChangeRecord>,
}

/// Suggests a version bump for a change list.
///
/// Any breaking record forces `major`. Otherwise a non-breaking feature
/// addition gives `minor`, and anything else that changed gives `patch`.
///
/// # Arguments
///
/// * `records` - The change list, usually `Comparison::records`
///
/// # Returns
///
/// The suggested level with its texts and up to [`MAX_SAMPLES`] of the
/// records that decided it. An empty list suggests [`VersionLevel::None`].
///
/// # Examples
///
/// ```
/// use oapi_diff::{compare, parse_yaml, suggest_version, VersionLevel};
///
/// let old = parse_yaml("openapi: 3.0.0\npaths: {}\n").unwrap();
/// let new = parse_yaml("openapi: 3.0.0\npaths:\n  /pets:\n    get: {}\n").unwrap();
///
/// let records = compare(&old, &new).unwrap().records;
/// let suggestion = suggest_version(&records);
/// assert_eq!(suggestion.level, VersionLevel::Minor);
/// assert_eq!(suggestion.samples.len(), 1);
/// ```
pub fn suggest_version(records: &[ChangeRecord]) -> VersionSuggestion {
    let (level, contributing): (VersionLevel, Vec<&ChangeRecord>) = if records.is_empty() {
        (VersionLevel::None, Vec::new())
    } else if records.iter().any(|r| r.is_breaking) {
        (
            VersionLevel::Major,
            records.iter().filter(|r| r.is_breaking).collect(),
        )
    } else if records.iter().any(|r| r.change.is_feature_addition()) {
        (
            VersionLevel::Minor,
            records
                .iter()
                .filter(|r| r.change.is_feature_addition())
                .collect(),
        )
    } else {
        let patch: Vec<&ChangeRecord> = records
            .iter()
            .filter(|r| r.change.is_patch_level() || r.category() == Category::Modified)
            .collect();
        // Uncategorized changes still warrant a patch release.
        if patch.is_empty() {
            (VersionLevel::Patch, records.iter().collect())
        } else {
            (VersionLevel::Patch, patch)
        }
    };

    VersionSuggestion {
        level,
        suggestion: level.suggestion().to_string(),
        description: level.description().to_string(),
        samples: contributing
            .into_iter()
            .take(MAX_SAMPLES)
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Added => "added",
            EndpointStatus::Removed => "removed",
            EndpointStatus::Modified => "modified",
            EndpointStatus::Unchanged => "unchanged",
        }
    }
}

/// Change volume for one API path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    pub path: String,
    pub methods: Vec<String>,
    pub change_count: usize,
    pub has_breaking: bool,
    pub status: EndpointStatus,
}

/// Builds one heatmap entry per API path found in either document, old
/// document order first.
///
/// Each record is attributed to the longest path key that prefixes its
/// locator, which keeps dotted path templates like `/v1.0/pets` intact. Records
/// that match no known path fall back to [`endpoint_of`]; records that still
/// resolve to nothing are left out.
pub fn build_heatmap(records: &[ChangeRecord], old: &Node, new: &Node) -> Vec<HeatmapEntry> {
    let old_paths = old.get_present("paths").and_then(Node::as_object);
    let new_paths = new.get_present("paths").and_then(Node::as_object);

    let mut entries: IndexMap<String, HeatmapEntry> = IndexMap::new();
    for (paths, side) in [(old_paths, Side::Old), (new_paths, Side::New)] {
        let Some(paths) = paths else { continue };
        for (path, item) in paths {
            if item.is_null() {
                continue;
            }
            let entry = entries.entry(path.clone()).or_insert_with(|| HeatmapEntry {
                path: path.clone(),
                methods: Vec::new(),
                change_count: 0,
                has_breaking: false,
                status: match side {
                    Side::Old => EndpointStatus::Removed,
                    Side::New => EndpointStatus::Added,
                },
            });
            if side == Side::New && entry.status == EndpointStatus::Removed {
                entry.status = EndpointStatus::Unchanged;
            }
            for method in operation_names(item) {
                if !entry.methods.iter().any(|m| m == method) {
                    entry.methods.push(method.to_string());
                }
            }
        }
    }

    for record in records {
        let Some(key) = resolve_endpoint(&record.path, &entries) else {
            tracing::debug!(path = %record.path, "record has no endpoint, left out of heatmap");
            continue;
        };
        if let Some(entry) = entries.get_mut(&key) {
            entry.change_count += 1;
            entry.has_breaking |= record.is_breaking;
            if entry.status == EndpointStatus::Unchanged {
                entry.status = EndpointStatus::Modified;
            }
        }
    }

    entries.into_values().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

fn operation_names(item: &Node) -> impl Iterator<Item = &str> {
    item.as_object()
        .into_iter()
        .flat_map(|ops| ops.keys())
        .map(String::as_str)
        .filter(|k| *k != "parameters")
}

fn resolve_endpoint(locator: &str, entries: &IndexMap<String, HeatmapEntry>) -> Option<String> {
    let known = entries
        .keys()
        .filter(|key| {
            locator == key.as_str()
                || locator
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
        .max_by_key(|key| key.len());
    match known {
        Some(key) => Some(key.clone()),
        None => endpoint_of(locator).filter(|key| entries.contains_key(key)),
    }
}

/// Extracts the API path from a record locator.
///
/// Locators that start with `/` yield the text up to the first unescaped `.`;
/// locators of the form `paths.<path>...` yield the segment after the prefix.
/// A backslash escapes the following character. Anything else, such as
/// `info.version` or `components.schemas.Pet`, has no endpoint.
///
/// # Examples
///
/// ```
/// use oapi_diff::endpoint_of;
///
/// assert_eq!(endpoint_of("/pets.get.responses.200").as_deref(), Some("/pets"));
/// assert_eq!(endpoint_of("paths./pets/{id}.delete").as_deref(), Some("/pets/{id}"));
/// assert_eq!(endpoint_of(r"/v1\.0/pets.get").as_deref(), Some("/v1.0/pets"));
/// assert_eq!(endpoint_of("info.version"), None);
/// ```
pub fn endpoint_of(locator: &str) -> Option<String> {
    let rest = if locator.starts_with('/') {
        locator
    } else {
        locator.strip_prefix("paths.")?
    };

    let mut segment = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    segment.push(escaped);
                }
            }
            '.' => break,
            _ => segment.push(c),
        }
    }

    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

/// The most frequent record type label.
pub fn most_common_type(records: &[ChangeRecord]) -> Option<String> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.label()).or_insert(0) += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for (label, count) in counts {
        // Ties go to the type counted last.
        if best.as_ref().map_or(true, |(_, top)| count >= *top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Number of distinct API paths touched by the records.
pub fn affected_endpoints(records: &[ChangeRecord]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for endpoint in records.iter().filter_map(|r| endpoint_of(&r.path)) {
        if !seen.contains(&endpoint) {
            seen.push(endpoint);
        }
    }
    seen.len()
}
