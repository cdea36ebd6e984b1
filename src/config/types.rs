use std::path::PathBuf;

/// Options controlling a single crawl run, sourced from the CLI
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// The website URL to analyze
    pub base_url: String,

    /// Maximum crawl depth from each language's entry page (0 = entry page only)
    pub max_depth: u32,

    /// Minimum delay between successive requests, in milliseconds
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    pub timeout_secs: u64,

    /// Directory where reports are written
    pub output_dir: PathBuf,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl CrawlOptions {
    /// Creates options for the given URL with the documented defaults
    /// (depth 2, 1 second delay, 10 second timeout, `reports/` output).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_depth: 2,
            delay_ms: 1000,
            timeout_secs: 10,
            output_dir: PathBuf::from("reports"),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("CheckLink/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration for the content classifier
///
/// Both the keyword fallback and the AI-backed classifier read from this:
/// the phrase list and threshold drive the deterministic path, the excerpt
/// limit bounds what is sent to the completion service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Case-insensitive phrases that mark a page as suspicious
    pub scam_phrases: Vec<String>,

    /// Relevance scores below this value (on a 1-10 scale) are flagged
    pub relevance_threshold: u32,

    /// Maximum number of characters of page text sent to the AI service
    pub excerpt_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            scam_phrases: [
                "get rich quick",
                "guaranteed money",
                "click here now",
                "limited time offer",
                "act now",
                "free money",
                "congratulations you won",
                "urgent action required",
                "suspicious activity",
                "verify account immediately",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            relevance_threshold: 4,
            excerpt_limit: 2000,
        }
    }
}

/// Configuration for language discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// CSS selectors tried in order against the homepage; the first one
    /// with matches identifies the language switcher.
    pub selectors: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            selectors: [
                r#"a[href*="lang="]"#,
                ".language-switcher a",
                ".lang-switcher a",
                ".qtranxs_language_chooser a",
                ".language-selector a",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_options_defaults() {
        let options = CrawlOptions::new("https://example.com/");
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.delay_ms, 1000);
        assert_eq!(options.timeout_secs, 10);
        assert_eq!(options.output_dir, PathBuf::from("reports"));
        assert!(options.user_agent.starts_with("CheckLink/"));
    }

    #[test]
    fn test_classifier_config_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.scam_phrases.len(), 10);
        assert_eq!(config.relevance_threshold, 4);
        assert_eq!(config.excerpt_limit, 2000);
    }

    #[test]
    fn test_discovery_config_defaults() {
        let config = DiscoveryConfig::default();
        assert!(!config.selectors.is_empty());
        assert_eq!(config.selectors[0], r#"a[href*="lang="]"#);
    }
}
