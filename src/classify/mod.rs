//! Content classification
//!
//! Two interchangeable strategies sit behind one contract: an AI-backed
//! classifier that asks a completion service to judge the page, and a
//! deterministic keyword classifier used both standalone (no credentials)
//! and as the fail-open fallback when the AI call errors out. Either way
//! the crawl gets a verdict; classification never aborts a run.

mod ai;
mod keyword;

pub use ai::AiClassifier;
pub use keyword::KeywordClassifier;

use crate::config::ClassifierConfig;
use crate::crawler::SiteGoal;
use thiserror::Error;

/// Classifier output for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing notable about the content
    Ok,

    /// Content matches scam indicators
    Suspicious(String),

    /// Content has low relevance to the site's goal
    LowRelevance(String),
}

impl Verdict {
    /// Returns true if the page raised no flags
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Errors from the AI-backed analysis path
///
/// These never surface to the report: every variant triggers the keyword
/// fallback instead.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Content classifier with the strategy fixed at construction
pub enum ContentClassifier {
    Ai(AiClassifier),
    Keyword(KeywordClassifier),
}

impl ContentClassifier {
    /// Selects the strategy by credential presence: an API key enables the
    /// AI-backed path, otherwise the keyword classifier runs alone
    pub fn from_credentials(api_key: Option<String>, config: ClassifierConfig) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => {
                Self::Ai(AiClassifier::new(key, config))
            }
            _ => Self::Keyword(KeywordClassifier::new(config)),
        }
    }

    /// Classifies page text against the site goal
    pub async fn classify(&self, text: &str, goal: &SiteGoal) -> Verdict {
        match self {
            Self::Ai(classifier) => classifier.classify(text, goal).await,
            Self::Keyword(classifier) => classifier.classify(text, goal),
        }
    }

    /// Human-readable strategy name for logging
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Ai(_) => "ai",
            Self::Keyword(_) => "keyword",
        }
    }
}
