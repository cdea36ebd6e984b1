//! CheckLink: a multi-language website link checker
//!
//! This crate crawls a website, discovers its language variants, validates
//! every discovered link, flags suspicious or off-topic content against the
//! site's stated goal, and renders PDF reports per language.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod report;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for CheckLink operations
#[derive(Debug, Error)]
pub enum ChecklinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Homepage unreachable for {url}: {reason}")]
    Discovery { url: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for CheckLink operations
pub type Result<T> = std::result::Result<T, ChecklinkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{ContentClassifier, Verdict};
pub use config::{ClassifierConfig, CrawlOptions, DiscoveryConfig};
pub use crawler::{Coordinator, CrawlOutcome, LanguageVersion, SiteGoal};
pub use report::{Issue, IssueKind, LanguageReport, ReportSet};
pub use state::PageState;
