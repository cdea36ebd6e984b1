//! Report assembly and rendering
//!
//! The crawl produces one issue list per language; this module groups them
//! into a `ReportSet` and renders one PDF per language plus a combined PDF
//! covering the whole run.

mod pdf;

use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from report rendering
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Category of a reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// HTTP status >= 400
    Broken,

    /// Request exceeded the configured timeout
    Timeout,

    /// DNS or socket-level failure
    ConnectionError,

    /// Content matched scam indicators
    Suspicious,

    /// Content scored below the relevance threshold
    LowRelevance,

    /// Unexpected processing failure for one URL
    Error,
}

impl IssueKind {
    /// Short label used in reports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broken => "broken",
            Self::Timeout => "timeout",
            Self::ConnectionError => "connection error",
            Self::Suspicious => "suspicious",
            Self::LowRelevance => "low relevance",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One problem found during the crawl
#[derive(Debug, Clone)]
pub struct Issue {
    /// Code of the language version the issue was found under
    pub language: String,

    /// Display title of the offending link
    pub title: String,

    /// The URL the issue refers to
    pub url: String,

    /// What went wrong
    pub kind: IssueKind,

    /// Human-readable detail (status code, timing, classifier reason)
    pub detail: String,
}

/// All issues found while crawling one language version
#[derive(Debug, Clone)]
pub struct LanguageReport {
    /// Normalized language code
    pub code: String,

    /// Human-readable label from the language switcher
    pub label: String,

    /// Number of links checked for this language
    pub links_checked: usize,

    /// Issues in the order they were found
    pub issues: Vec<Issue>,
}

/// The full result of one run, ready for rendering
#[derive(Debug, Clone)]
pub struct ReportSet {
    /// The site the run targeted
    pub site_url: String,

    /// Goal summary the classifier measured relevance against
    pub site_goal: String,

    /// When the run finished
    pub generated_at: DateTime<Local>,

    /// Per-language results, in discovery order
    pub languages: Vec<LanguageReport>,
}

impl ReportSet {
    /// All issues across languages, preserving discovery order between
    /// languages and emission order within each
    pub fn combined(&self) -> Vec<&Issue> {
        self.languages
            .iter()
            .flat_map(|language| language.issues.iter())
            .collect()
    }

    /// Total issue count across all languages
    pub fn total_issues(&self) -> usize {
        self.languages.iter().map(|l| l.issues.len()).sum()
    }

    /// Total number of links checked across all languages
    pub fn total_checked(&self) -> usize {
        self.languages.iter().map(|l| l.links_checked).sum()
    }
}

/// Writes one PDF per language plus a combined PDF to `out_dir`
///
/// The directory is created if missing. Returns the written paths, with the
/// combined report last. Filenames carry the language code and the run
/// timestamp, so successive runs never overwrite each other.
pub fn write_reports(set: &ReportSet, out_dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir)?;
    let timestamp = set.generated_at.format("%Y%m%d_%H%M%S");
    let mut paths = Vec::new();

    for language in &set.languages {
        let path = out_dir.join(format!("link_analysis_{}_{}.pdf", language.code, timestamp));
        pdf::render_language(set, language, &path)?;
        tracing::info!("Wrote {} report: {}", language.code, path.display());
        paths.push(path);
    }

    let combined = out_dir.join(format!("link_analysis_combined_{}.pdf", timestamp));
    pdf::render_combined(set, &combined)?;
    tracing::info!("Wrote combined report: {}", combined.display());
    paths.push(combined);

    Ok(paths)
}
