//! Design-system audit of the static front-end.
//!
//! DESIGN
//! ======
//! The audit walks `STATIC_DIR` and reports on the CSS and JS the front-end
//! ships: how many elements, components and patterns exist, how many test
//! pages cover them, and three lint checks (hardcoded hex colors, stray
//! `console.log` calls, stylesheets without `@media` queries). Each check
//! that finds something bumps one severity bucket in the summary.
//!
//! Missing directories and unreadable files are skipped, so a bare static
//! root audits as all zeros. The scan is blocking filesystem work and runs
//! on the blocking pool.
//!
//! `run_and_report` also renders the result as `AUDIT-REPORT.md` in the
//! static root; later audits carry that file's modification time.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::error::ErrorCode;

pub const REPORT_FILE: &str = "AUDIT-REPORT.md";

const MAX_COLOR_ISSUES: usize = 20;
const MAX_CONSOLE_ISSUES: usize = 10;
/// More unresponsive stylesheets than this is a medium finding.
const RESPONSIVE_THRESHOLD: usize = 10;
const ALLOWED_COLORS: &[&str] = &["#fff", "#ffffff", "#000", "#000000", "#e0e0e0"];

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-fA-F]{3,6}\b").expect("BUG: invalid hex color regex literal"));

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit report could not be written: {0}")]
    Io(#[from] std::io::Error),
    #[error("Audit task failed: {0}")]
    Task(String),
}

impl ErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_AUDIT_IO",
            Self::Task(_) => "E_AUDIT_TASK",
        }
    }
}

// =============================================================================
// REPORT TYPES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub timestamp: String,
    pub summary: Summary,
    pub categories: Categories,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u32,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub inventory: Inventory,
    pub hardcoded_colors: Findings<ColorIssue>,
    pub console_logs: Findings<LineRef>,
    pub responsive: Responsive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub elements: usize,
    pub components: usize,
    pub patterns: usize,
    pub js_modules: usize,
    pub test_files: usize,
    /// Test pages per element and component, as a rounded percentage.
    pub test_coverage: usize,
}

/// A count of every hit plus the first few as examples.
#[derive(Debug, Clone, Serialize)]
pub struct Findings<T> {
    pub count: usize,
    pub issues: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorIssue {
    pub file: String,
    pub line: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRef {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Responsive {
    pub missing: usize,
    pub files: Vec<String>,
}

impl Summary {
    fn flag(bucket: &mut u32, total: &mut u32) {
        *bucket += 1;
        *total += 1;
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Audit `root` without touching the report file.
///
/// # Errors
///
/// Returns `AuditError::Task` if the blocking scan panics.
pub async fn run(root: PathBuf) -> Result<Audit, AuditError> {
    tokio::task::spawn_blocking(move || scan(&root))
        .await
        .map_err(|e| AuditError::Task(e.to_string()))
}

/// Audit `root` and rewrite its `AUDIT-REPORT.md`.
///
/// # Errors
///
/// Returns `AuditError::Io` if the report cannot be written.
pub async fn run_and_report(root: PathBuf) -> Result<Audit, AuditError> {
    tokio::task::spawn_blocking(move || -> Result<Audit, AuditError> {
        let audit = scan(&root);
        fs::write(root.join(REPORT_FILE), render_report(&audit))?;
        info!(root = %root.display(), total = audit.summary.total, "audit report written");
        Ok(audit)
    })
    .await
    .map_err(|e| AuditError::Task(e.to_string()))?
}

// =============================================================================
// SCAN
// =============================================================================

/// Run every check against the tree under `root`.
#[must_use]
pub fn scan(root: &Path) -> Audit {
    let elements = flat_files(root, "css/elements", "css");
    let components = flat_files(root, "css/components", "css");
    let patterns = flat_files(root, "css/patterns", "css");
    let js_modules: Vec<String> =
        flat_files(root, "js", "js").into_iter().filter(|f| !f.contains("index.js")).collect();
    let test_files = tree_files(root, "tests", "html");

    let inventory = Inventory {
        elements: elements.len(),
        components: components.len(),
        patterns: patterns.len(),
        js_modules: js_modules.len(),
        test_files: test_files.len(),
        test_coverage: coverage(test_files.len(), elements.len() + components.len()),
    };

    let stylesheets: Vec<String> = elements.into_iter().chain(components).chain(patterns).collect();
    let colors = hardcoded_colors(root, &stylesheets);

    let mut scripted = tree_files(root, "", "html");
    scripted.extend(tree_files(root, "js", "js"));
    let logs = console_logs(root, &scripted);

    let unresponsive: Vec<String> = stylesheets
        .iter()
        .filter(|file| read_lossy(root, file).is_some_and(|css| !css.contains("@media")))
        .cloned()
        .collect();

    let mut summary = Summary::default();
    if !colors.is_empty() {
        Summary::flag(&mut summary.high, &mut summary.total);
    }
    if !logs.is_empty() {
        Summary::flag(&mut summary.low, &mut summary.total);
    }
    if unresponsive.len() > RESPONSIVE_THRESHOLD {
        Summary::flag(&mut summary.medium, &mut summary.total);
    }

    Audit {
        timestamp: rfc3339(OffsetDateTime::now_utc()),
        summary,
        categories: Categories {
            inventory,
            hardcoded_colors: findings(colors, MAX_COLOR_ISSUES),
            console_logs: findings(logs, MAX_CONSOLE_ISSUES),
            responsive: Responsive { missing: unresponsive.len(), files: unresponsive },
        },
        report_last_modified: report_modified(root),
    }
}

/// Rounded half up; zero when there is nothing to cover.
fn coverage(tests: usize, covered: usize) -> usize {
    if covered == 0 {
        return 0;
    }
    (tests * 100 + covered / 2) / covered
}

fn findings<T>(mut all: Vec<T>, limit: usize) -> Findings<T> {
    let count = all.len();
    all.truncate(limit);
    Findings { count, issues: all }
}

fn hardcoded_colors(root: &Path, files: &[String]) -> Vec<ColorIssue> {
    let mut issues = Vec::new();
    for file in files {
        let Some(content) = read_lossy(root, file) else {
            continue;
        };
        for (i, line) in content.split('\n').enumerate() {
            for color in HEX_COLOR.find_iter(line).map(|m| m.as_str()) {
                if !ALLOWED_COLORS.contains(&color.to_ascii_lowercase().as_str()) {
                    issues.push(ColorIssue { file: file.clone(), line: i + 1, color: color.to_string() });
                }
            }
        }
    }
    issues
}

fn console_logs(root: &Path, files: &[String]) -> Vec<LineRef> {
    let mut hits = Vec::new();
    for file in files {
        let Some(content) = read_lossy(root, file) else {
            continue;
        };
        for (i, line) in content.split('\n').enumerate() {
            if line.contains("console.log") {
                hits.push(LineRef { file: file.clone(), line: i + 1 });
            }
        }
    }
    hits
}

fn report_modified(root: &Path) -> Option<String> {
    let modified = fs::metadata(root.join(REPORT_FILE)).and_then(|m| m.modified()).ok()?;
    Some(rfc3339(OffsetDateTime::from(modified)))
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_default()
}

// =============================================================================
// FILE WALK
// =============================================================================

/// Files directly inside `root/dir` with extension `ext`, as sorted
/// root-relative paths.
fn flat_files(root: &Path, dir: &str, ext: &str) -> Vec<String> {
    let mut out = Vec::new();
    let Ok(entries) = fs::read_dir(root.join(dir)) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            out.push(relative(root, &path));
        }
    }
    out.sort();
    out
}

/// Files anywhere under `root/dir` with extension `ext`, skipping
/// `node_modules` and dot directories.
fn tree_files(root: &Path, dir: &str, ext: &str) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, &root.join(dir), ext, &mut out);
    out.sort();
    out
}

fn collect(root: &Path, dir: &Path, ext: &str, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == "node_modules" || name.starts_with('.') {
                continue;
            }
            collect(root, &path, ext, out);
        } else if path.extension().is_some_and(|e| e == ext) {
            out.push(relative(root, &path));
        }
    }
}

fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

fn read_lossy(root: &Path, file: &str) -> Option<String> {
    fs::read(root.join(file)).ok().map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

// =============================================================================
// MARKDOWN REPORT
// =============================================================================

/// Render `audit` as the markdown written to `AUDIT-REPORT.md`.
#[must_use]
pub fn render_report(audit: &Audit) -> String {
    let Summary { total, critical, high, medium, low } = &audit.summary;
    let inv = &audit.categories.inventory;
    let colors = &audit.categories.hardcoded_colors;
    let logs = &audit.categories.console_logs;
    let responsive = &audit.categories.responsive;

    let color_lines: Vec<String> =
        colors.issues.iter().map(|i| format!("- `{}:{}` → `{}`", i.file, i.line, i.color)).collect();
    let more_colors = match colors.count.saturating_sub(colors.issues.len()) {
        0 => String::new(),
        n => format!("\n*...and {n} more*"),
    };
    let log_lines: Vec<String> = logs.issues.iter().map(|h| format!("- `{}:{}`", h.file, h.line)).collect();
    let css_lines: Vec<String> = responsive.files.iter().map(|f| format!("- `{f}`")).collect();

    format!(
        "# Design System Audit Report

**Generated:** {timestamp}
**Status:** Automated scan

---

## Summary

| Severity | Count |
|----------|-------|
| Critical | {critical} |
| High | {high} |
| Medium | {medium} |
| Low | {low} |
| **Total** | **{total}** |

---

## Component Inventory

| Category | Count |
|----------|-------|
| Elements | {elements} |
| Components | {components} |
| Patterns | {patterns} |
| JS Modules | {js_modules} |
| Test Files | {test_files} |
| **Test Coverage** | **{coverage}%** |

---

## Hardcoded Colors

Found **{color_count}** hardcoded colors that should use design tokens.

{color_lines}
{more_colors}

---

## Console Statements

Found **{log_count}** console.log statements.

{log_lines}

---

## Missing Responsive Styles

**{missing}** CSS files have no `@media` queries:

{css_lines}

---

*Run `POST /api/audit/run` to regenerate this report.*
",
        timestamp = audit.timestamp,
        elements = inv.elements,
        components = inv.components,
        patterns = inv.patterns,
        js_modules = inv.js_modules,
        test_files = inv.test_files,
        coverage = inv.test_coverage,
        color_count = colors.count,
        color_lines = color_lines.join("\n"),
        log_count = logs.count,
        log_lines = log_lines.join("\n"),
        missing = responsive.missing,
        css_lines = css_lines.join("\n"),
    )
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
