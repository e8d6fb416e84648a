//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! A single summary line, nothing else on stdout:
//!
//! ```text
//! Generated 3 product pages.
//! ```
//!
//! Per-file detail is logged through `tracing` at debug level instead.
//!
//! ## Check
//!
//! An inventory of what a build would write. Products are listed by
//! positional index and name, with the slug and output path as indented
//! context lines:
//!
//! ```text
//! Products
//! 001 Exterior Plywood 18mm (2 images)
//!     Slug: exterior-plywood-18mm
//!     Page: products/exterior-plywood-18mm/index.html
//! 002 Roofing Screws
//!     Slug: roofing-screws
//!     Page: products/roofing-screws/index.html
//!
//! Skipped
//!     1 without slug
//!
//! Indexes
//!     sitemap.xml (6 entries)
//!     _redirects (3 rules)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::catalog::SkippedRecords;
use crate::generate::{GenerateReport, GeneratedPage};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Positional index + name, with the image count when there are any.
///
/// ```text
/// 001 Exterior Plywood 18mm (2 images)
/// 003 Roofing Screws
/// ```
fn page_header(index: usize, page: &GeneratedPage) -> String {
    match page.image_count {
        0 => format!("{} {}", format_index(index), page.name),
        n => format!(
            "{} {} ({})",
            format_index(index),
            page.name,
            plural(n, "image", "images")
        ),
    }
}

fn skipped_lines(skipped: &SkippedRecords) -> Vec<String> {
    [
        (skipped.missing_slug, "without slug"),
        (skipped.unsafe_slug, "with unsafe slug"),
        (skipped.duplicate_slug, "with duplicate slug"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, reason)| format!("{}{} {}", indent(1), n, reason))
    .collect()
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    vec![format!("Generated {} product pages.", report.pages.len())]
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Products".to_string()];
    if report.pages.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(page_header(i + 1, page));
        lines.push(format!("{}Slug: {}", indent(1), page.slug));
        lines.push(format!("{}Page: {}", indent(1), page.path.display()));
    }

    let skipped = skipped_lines(&report.skipped);
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        lines.extend(skipped);
    }

    lines.push(String::new());
    lines.push("Indexes".to_string());
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        report.sitemap_path.display(),
        plural(report.sitemap_entries, "entry", "entries")
    ));
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        report.redirects_path.display(),
        plural(report.redirect_rules, "rule", "rules")
    ));
    lines
}

pub fn print_check_output(report: &GenerateReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
