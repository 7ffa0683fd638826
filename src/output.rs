//! Report rendering.
//!
//! A [`Report`] bundles the change list with its derived views (stats,
//! version suggestion, heatmap) and is rendered by [`format_report`] into one
//! of five formats: colored terminal text, plain text, Markdown, JSON, or a
//! standalone HTML page.
//!
//! # Examples
//!
//! ```
//! use oapi_diff::{compare, format_report, parse_json, OutputFormat, OutputOptions, Report};
//!
//! let old = parse_json(r#"{"openapi": "3.0.0", "info": {"version": "1.0.0"}}"#).unwrap();
//! let new = parse_json(r#"{"openapi": "3.0.0", "info": {"version": "1.1.0"}}"#).unwrap();
//! let comparison = compare(&old, &new).unwrap();
//!
//! let report = Report::new(comparison.records, Vec::new());
//! let output = format_report(&report, OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("Version Change"));
//! assert!(output.contains("Summary:"));
//! ```

use crate::change::{Category, ChangeRecord};
use crate::classify::{
    affected_endpoints, most_common_type, suggest_version, ChangeStats, HeatmapEntry,
    VersionSuggestion,
};
use crate::error::OutputError;
use chrono::{DateTime, Utc};
use colored::*;
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// Plain text, no colors (suitable for piping)
    Plain,
    Markdown,
    Json,
    /// Standalone HTML document with inline CSS
    Html,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "plain" | "text" => Ok(OutputFormat::Plain),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(OutputError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Render the one-line-per-record overview instead of full details
    pub compact: bool,
    /// Maximum length for displayed detail values (truncate if longer)
    pub max_value_length: usize,
    /// Append the `Summary:` line to terminal and plain output
    pub include_summary: bool,
    pub include_heatmap: bool,
    pub include_version: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            compact: false,
            max_value_length: 80,
            include_summary: true,
            include_heatmap: true,
            include_version: true,
        }
    }
}

/// Everything a renderer needs for one comparison run.
#[derive(Debug, Clone)]
pub struct Report {
    pub records: Vec<ChangeRecord>,
    pub stats: ChangeStats,
    pub version: VersionSuggestion,
    pub heatmap: Vec<HeatmapEntry>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Builds a report, deriving stats and the version suggestion from `records`.
    pub fn new(records: Vec<ChangeRecord>, heatmap: Vec<HeatmapEntry>) -> Self {
        let stats = ChangeStats::from_records(&records);
        let version = suggest_version(&records);
        Self {
            records,
            stats,
            version,
            heatmap,
            generated_at: Utc::now(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn breaking(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter().filter(|r| r.is_breaking)
    }

    fn non_breaking_in(&self, category: Category) -> Vec<&ChangeRecord> {
        self.records
            .iter()
            .filter(|r| !r.is_breaking && r.category() == category)
            .collect()
    }
}

/// Formats a report according to the specified format and options.
///
/// # Errors
///
/// Returns [`OutputError::JsonSerializationError`] if the JSON renderer fails.
pub fn format_report(
    report: &Report,
    format: OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    tracing::debug!(?format, records = report.records.len(), "rendering report");
    match format {
        OutputFormat::Terminal => Ok(format_text(report, options, true)),
        OutputFormat::Plain => Ok(format_text(report, options, false)),
        OutputFormat::Markdown if options.compact => Ok(format_markdown_compact(report)),
        OutputFormat::Markdown => Ok(format_markdown(report, options)),
        OutputFormat::Json if options.compact => format_json_compact(report),
        OutputFormat::Json => format_json(report, options),
        OutputFormat::Html => Ok(format_html(report, options)),
    }
}

/// Terminal and plain text share one layout; `color` toggles ANSI codes.
///
/// Color scheme:
/// - Breaking: red
/// - Added: green
/// - Removed: red
/// - Modified: yellow
fn format_text(report: &Report, options: &OutputOptions, color: bool) -> String {
    if report.is_empty() {
        let message = "No changes detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let mut output = String::new();
    for record in &report.records {
        output.push_str(&format_record_line(record, color));
        output.push('\n');
        if !options.compact {
            for (key, value) in record.details() {
                let value = truncate(&value_text(&value), options.max_value_length);
                let line = format!("    {}: {}", key, value);
                if color {
                    let _ = writeln!(output, "{}", line.dimmed());
                } else {
                    let _ = writeln!(output, "{}", line);
                }
            }
        }
    }

    if options.include_summary {
        output.push('\n');
        output.push_str(&format_summary(&report.stats));
    }

    if options.include_version {
        if !options.include_summary {
            output.push('\n');
        }
        output.push('\n');
        let line = format!(
            "Suggested version bump: {} ({})",
            report.version.level, report.version.suggestion
        );
        if color {
            output.push_str(&line.bold().to_string());
        } else {
            output.push_str(&line);
        }
    }

    if !options.include_summary && !options.include_version {
        output.truncate(output.trim_end().len());
    }
    output
}

fn format_record_line(record: &ChangeRecord, color: bool) -> String {
    let symbol = match record.category() {
        Category::Added => "+",
        Category::Removed => "-",
        Category::Modified => "•",
    };
    let label = record.label();
    let tag = if record.is_breaking { " [BREAKING]" } else { "" };

    if !color {
        return format!("{} {} {}{}", symbol, label, record.path, tag);
    }

    let (symbol, label) = match (record.is_breaking, record.category()) {
        (true, _) => (symbol.bright_red(), label.red().bold()),
        (false, Category::Added) => (symbol.bright_green(), label.green()),
        (false, Category::Removed) => (symbol.bright_red(), label.red()),
        (false, Category::Modified) => (symbol.bright_yellow(), label.yellow()),
    };
    format!(
        "{} {} {}{}",
        symbol,
        label,
        record.path.cyan(),
        tag.bright_red().bold()
    )
}

/// Formats summary statistics.
fn format_summary(stats: &ChangeStats) -> String {
    if stats.total == 0 {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.modified > 0 {
        parts.push(format!("{} modified", stats.modified));
    }

    format!(
        "Summary: {} changes ({} breaking): {}",
        stats.total,
        stats.breaking,
        parts.join(", ")
    )
}

fn format_markdown(report: &Report, options: &OutputOptions) -> String {
    let stats = &report.stats;
    let mut md = String::new();

    md.push_str("# OpenAPI Comparison Report\n\n");
    let _ = writeln!(
        md,
        "**Generated on:** {}\n",
        report.generated_at.format("%Y-%m-%d")
    );

    md.push_str("## Summary\n\n");
    let _ = writeln!(md, "- **Total Changes:** {}", stats.total);
    let _ = writeln!(md, "- **Breaking Changes:** {}", stats.breaking);
    let _ = writeln!(md, "- **Added:** {}", stats.added);
    let _ = writeln!(md, "- **Removed:** {}", stats.removed);
    let _ = writeln!(md, "- **Modified:** {}\n", stats.modified);

    if report.is_empty() {
        md.push_str("No changes detected.\n\n");
    }

    let breaking: Vec<&ChangeRecord> = report.breaking().collect();
    if !breaking.is_empty() {
        md.push_str("## ⚠️ Breaking Changes\n\n");
        for record in breaking {
            md.push_str(&format_record_markdown(record, options));
        }
    }

    if stats.non_breaking() > 0 {
        md.push_str("## Changes\n\n");
        for category in Category::ALL {
            let records = report.non_breaking_in(category);
            if records.is_empty() {
                continue;
            }
            let _ = writeln!(md, "### {}\n", category.title());
            for record in records {
                md.push_str(&format_record_markdown(record, options));
            }
        }
    }

    if options.include_version {
        md.push_str("## Version Suggestion\n\n");
        let _ = writeln!(
            md,
            "**{}** ({})\n",
            report.version.suggestion, report.version.level
        );
        let _ = writeln!(md, "{}\n", report.version.description);
        for sample in &report.version.samples {
            let _ = writeln!(md, "- {} `{}`", sample.label(), sample.path);
        }
        if !report.version.samples.is_empty() {
            md.push('\n');
        }
    }

    if options.include_heatmap && !report.heatmap.is_empty() {
        md.push_str("## Endpoint Heatmap\n\n");
        md.push_str("| Path | Methods | Changes | Breaking | Status |\n");
        md.push_str("|------|---------|---------|----------|--------|\n");
        for entry in &report.heatmap {
            let _ = writeln!(
                md,
                "| `{}` | {} | {} | {} | {} |",
                entry.path,
                entry.methods.join(", "),
                entry.change_count,
                if entry.has_breaking { "yes" } else { "no" },
                entry.status.as_str()
            );
        }
        md.push('\n');
    }

    md
}

fn format_record_markdown(record: &ChangeRecord, options: &OutputOptions) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "### {}\n", record.label());
    let _ = writeln!(md, "**Path:** `{}`\n", record.path);
    let _ = writeln!(
        md,
        "**Category:** {}{}\n",
        record.category(),
        if record.is_breaking { " (Breaking)" } else { "" }
    );

    let details = record.detail_fields();
    if !details.is_empty() {
        md.push_str("**Details:**\n");
        for (key, value) in details {
            let _ = writeln!(
                md,
                "- **{}:** {}",
                key,
                truncate(&value_text(&value), options.max_value_length)
            );
        }
    }

    md.push_str("---\n\n");
    md
}

fn format_markdown_compact(report: &Report) -> String {
    let stats = &report.stats;
    let mut md = String::new();

    md.push_str("# OpenAPI Diff - Compact Overview\n\n");
    let _ = writeln!(
        md,
        "**Date:** {} | **Total Changes:** {} | **Breaking:** {}\n",
        report.generated_at.format("%Y-%m-%d"),
        stats.total,
        stats.breaking
    );

    let breaking: Vec<&ChangeRecord> = report.breaking().collect();
    if !breaking.is_empty() {
        let _ = writeln!(md, "## ⚠️ Breaking Changes ({})\n", breaking.len());
        for record in breaking {
            let _ = writeln!(
                md,
                "- **{}** `{}` _({})_",
                record.label(),
                record.path,
                record.category()
            );
        }
        md.push('\n');
    }

    for (category, icon) in [
        (Category::Added, "➕"),
        (Category::Removed, "➖"),
        (Category::Modified, "🔄"),
    ] {
        let records = report.non_breaking_in(category);
        if records.is_empty() {
            continue;
        }
        let _ = writeln!(md, "## {} {} ({})\n", icon, category.title(), records.len());
        for record in records {
            let _ = writeln!(md, "- **{}** `{}`", record.label(), record.path);
        }
        md.push('\n');
    }

    md
}

fn format_json(report: &Report, options: &OutputOptions) -> Result<String, OutputError> {
    let mut output = json!({
        "metadata": {
            "generatedAt": report.generated_at.to_rfc3339(),
            "toolVersion": env!("CARGO_PKG_VERSION"),
            "summary": report.stats,
        },
    });

    if options.include_version {
        output["versionSuggestion"] = serde_json::to_value(&report.version)
            .map_err(|e| OutputError::JsonSerializationError { source: e })?;
    }
    if options.include_heatmap {
        output["heatmap"] = serde_json::to_value(&report.heatmap)
            .map_err(|e| OutputError::JsonSerializationError { source: e })?;
    }
    output["changes"] = serde_json::to_value(&report.records)
        .map_err(|e| OutputError::JsonSerializationError { source: e })?;

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn format_json_compact(report: &Report) -> Result<String, OutputError> {
    let breaking: Vec<Value> = report
        .breaking()
        .map(|r| json!({ "type": r.label(), "path": r.path, "category": r.category() }))
        .collect();

    let output = json!({
        "timestamp": report.generated_at.to_rfc3339(),
        "summary": report.stats,
        "changes": {
            "breaking": breaking,
            "added": brief(report.non_breaking_in(Category::Added)),
            "removed": brief(report.non_breaking_in(Category::Removed)),
            "modified": brief(report.non_breaking_in(Category::Modified)),
        },
        "overview": {
            "totalChanges": report.stats.total,
            "hasBreakingChanges": report.stats.breaking > 0,
            "mostCommonChangeType": most_common_type(&report.records).unwrap_or_else(|| "None".to_string()),
            "affectedEndpoints": affected_endpoints(&report.records),
        },
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn brief(records: Vec<&ChangeRecord>) -> Vec<Value> {
    records
        .into_iter()
        .map(|r| json!({ "type": r.label(), "path": r.path }))
        .collect()
}

const HTML_STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; background: #0f1419; color: #f0f4f8; line-height: 1.5; padding: 24px; }
        .container { max-width: 1100px; margin: 0 auto; }
        h1 { margin-bottom: 4px; }
        h2 { margin: 28px 0 12px; border-bottom: 1px solid rgba(0, 120, 212, 0.4); padding-bottom: 4px; }
        .meta { color: #a0aec0; margin-bottom: 20px; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 12px; }
        .card { background: rgba(20, 25, 35, 0.95); border: 1px solid rgba(0, 120, 212, 0.2); border-radius: 8px; padding: 14px; text-align: center; }
        .card .value { font-size: 1.6rem; font-weight: 700; color: #0078d4; }
        .card.breaking .value { color: #e53e3e; }
        .change { background: rgba(20, 25, 35, 0.95); border-left: 4px solid #0078d4; border-radius: 6px; padding: 12px 16px; margin-bottom: 10px; }
        .change.breaking { border-left-color: #e53e3e; }
        .change.added { border-left-color: #38a169; }
        .change.removed { border-left-color: #e53e3e; }
        .change.modified { border-left-color: #f59e0b; }
        .change-header { display: flex; justify-content: space-between; align-items: center; }
        .change-type { font-weight: 600; }
        .change-path { font-family: monospace; color: #a0aec0; word-break: break-all; }
        .badge { font-size: 0.8rem; padding: 2px 8px; border-radius: 10px; background: #2d3748; text-transform: capitalize; }
        .badge.breaking { background: #e53e3e; }
        .badge.added { background: #38a169; }
        .badge.removed { background: #c53030; }
        .badge.modified { background: #b7791f; }
        .details { margin-top: 8px; font-size: 0.9rem; color: #e0e6ed; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid rgba(255, 255, 255, 0.08); }
        h3 { margin: 16px 0 8px; }
        .section { background: rgba(20, 25, 35, 0.6); border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; border-left: 4px solid #0078d4; }
        .breaking-section { border-left-color: #e53e3e; }
        .added-section { border-left-color: #38a169; }
        .removed-section { border-left-color: #e53e3e; }
        .modified-section { border-left-color: #f59e0b; }
        .change-item { display: flex; justify-content: space-between; padding: 4px 0; border-bottom: 1px solid rgba(255, 255, 255, 0.05); }
        .change-item:last-child { border-bottom: none; }
        .empty { color: #a0aec0; font-style: italic; }
"#;

fn format_html(report: &Report, options: &OutputOptions) -> String {
    let stats = &report.stats;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>OpenAPI Comparison Report</title>\n");
    let _ = writeln!(html, "    <style>{}    </style>", HTML_STYLE);
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<h1>OpenAPI Comparison Report</h1>\n");
    let _ = writeln!(
        html,
        "<p class=\"meta\">Generated on {}</p>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    html.push_str("<div class=\"stats\">\n");
    for (label, value, class) in [
        ("Total Changes", stats.total, "card"),
        ("Breaking", stats.breaking, "card breaking"),
        ("Added", stats.added, "card"),
        ("Removed", stats.removed, "card"),
        ("Modified", stats.modified, "card"),
    ] {
        let _ = writeln!(
            html,
            "<div class=\"{}\"><div class=\"value\">{}</div><div>{}</div></div>",
            class, value, label
        );
    }
    html.push_str("</div>\n");

    if options.include_version {
        html.push_str("<h2>Version Suggestion</h2>\n");
        let _ = writeln!(
            html,
            "<p><strong>{}</strong> ({})</p>\n<p>{}</p>",
            escape_html(&report.version.suggestion),
            report.version.level,
            escape_html(&report.version.description)
        );
    }

    if report.is_empty() {
        html.push_str("<p class=\"empty\">No changes detected.</p>\n");
    } else if options.compact {
        html.push_str(&format_sections_html_compact(report));
    } else {
        html.push_str(&format_sections_html(report, options));
    }

    if options.include_heatmap && !report.heatmap.is_empty() {
        html.push_str("<h2>Endpoint Heatmap</h2>\n<table>\n");
        html.push_str(
            "<tr><th>Path</th><th>Methods</th><th>Changes</th><th>Breaking</th><th>Status</th></tr>\n",
        );
        for entry in &report.heatmap {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.path),
                escape_html(&entry.methods.join(", ")),
                entry.change_count,
                if entry.has_breaking { "yes" } else { "no" },
                entry.status.as_str()
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Breaking records first, then the rest grouped by category.
fn format_sections_html(report: &Report, options: &OutputOptions) -> String {
    let mut html = String::new();

    let breaking: Vec<&ChangeRecord> = report.breaking().collect();
    if !breaking.is_empty() {
        html.push_str("<h2>⚠️ Breaking Changes</h2>\n");
        for record in breaking {
            html.push_str(&format_record_html(record, options));
        }
    }

    if report.stats.non_breaking() > 0 {
        html.push_str("<h2>Changes</h2>\n");
        for category in Category::ALL {
            let records = report.non_breaking_in(category);
            if records.is_empty() {
                continue;
            }
            let _ = writeln!(html, "<h3>{}</h3>", category.title());
            for record in records {
                html.push_str(&format_record_html(record, options));
            }
        }
    }

    html
}

/// One titled section per group with a single line per record.
fn format_sections_html_compact(report: &Report) -> String {
    let mut html = String::new();

    let breaking: Vec<&ChangeRecord> = report.breaking().collect();
    let mut groups = vec![("breaking", "⚠️ Breaking Changes".to_string(), breaking)];
    for (category, icon) in [
        (Category::Added, "➕"),
        (Category::Removed, "➖"),
        (Category::Modified, "🔄"),
    ] {
        groups.push((
            category.as_str(),
            format!("{} {}", icon, category.title()),
            report.non_breaking_in(category),
        ));
    }

    for (class, title, records) in groups {
        if records.is_empty() {
            continue;
        }
        let _ = writeln!(html, "<div class=\"section {}-section\">", class);
        let _ = writeln!(html, "<h3>{} ({})</h3>", title, records.len());
        for record in records {
            let _ = writeln!(
                html,
                "  <div class=\"change-item\"><span class=\"change-type\">{}</span><span class=\"change-path\">{}</span></div>",
                escape_html(&record.label()),
                escape_html(&record.path)
            );
        }
        html.push_str("</div>\n");
    }

    html
}

fn format_record_html(record: &ChangeRecord, options: &OutputOptions) -> String {
    let class = if record.is_breaking {
        "breaking"
    } else {
        record.category().as_str()
    };
    let badge = if record.is_breaking {
        "Breaking"
    } else {
        record.category().as_str()
    };

    let mut html = String::new();
    let _ = writeln!(html, "<div class=\"change {}\">", class);
    let _ = writeln!(
        html,
        "  <div class=\"change-header\"><div><div class=\"change-type\">{}</div><div class=\"change-path\">{}</div></div><span class=\"badge {}\">{}</span></div>",
        escape_html(&record.label()),
        escape_html(&record.path),
        class,
        badge
    );

    if !options.compact {
        let details = record.detail_fields();
        if !details.is_empty() {
            html.push_str("  <div class=\"details\">\n");
            for (key, value) in details {
                let _ = writeln!(
                    html,
                    "    <div><strong>{}:</strong> {}</div>",
                    escape_html(&key),
                    escape_html(&truncate(&value_text(&value), options.max_value_length))
                );
            }
            html.push_str("  </div>\n");
        }
    }

    html.push_str("</div>\n");
    html
}

/// Escape a string for safe inclusion in HTML content.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Strings print bare; everything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
