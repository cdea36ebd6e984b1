//! Deterministic keyword-based classification
//!
//! This path performs no I/O: same text and goal in, same verdict out.
//! It serves both as the classifier when no AI credential is configured
//! and as the fail-open fallback for the AI path.

use crate::classify::Verdict;
use crate::config::ClassifierConfig;
use crate::crawler::SiteGoal;

/// Keyword and token-overlap classifier
pub struct KeywordClassifier {
    config: ClassifierConfig,
    /// Lowercased copies of the configured phrases, prepared once
    phrases_lower: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let phrases_lower = config
            .scam_phrases
            .iter()
            .map(|p| p.to_lowercase())
            .collect();
        Self {
            config,
            phrases_lower,
        }
    }

    /// Classifies page text against the site goal
    ///
    /// Scam phrases are checked first (case-insensitive substring match);
    /// otherwise the relevance score decides between low-relevance and ok.
    pub fn classify(&self, text: &str, goal: &SiteGoal) -> Verdict {
        let text_lower = text.to_lowercase();

        for (phrase, phrase_lower) in
            self.config.scam_phrases.iter().zip(&self.phrases_lower)
        {
            if text_lower.contains(phrase_lower) {
                return Verdict::Suspicious(format!("matched phrase \"{}\"", phrase));
            }
        }

        let score = relevance_score(&text_lower, &goal.summary);
        if score < self.config.relevance_threshold {
            Verdict::LowRelevance(format!("relevance score {}/10", score))
        } else {
            Verdict::Ok
        }
    }
}

/// Token-overlap relevance score on a 1-10 scale
///
/// Counts the goal-summary words present in the (lowercased) page text:
/// `min(10, max(1, hits * 2))`. An empty goal therefore bottoms out at 1.
pub(crate) fn relevance_score(text_lower: &str, goal_summary: &str) -> u32 {
    let hits = goal_summary
        .to_lowercase()
        .split_whitespace()
        .filter(|word| text_lower.contains(*word))
        .count() as u32;
    (hits * 2).clamp(1, 10)
}
