//! Language discovery and site-goal extraction
//!
//! The homepage is inspected once per run: language-switcher links produce
//! the set of `LanguageVersion`s to crawl independently, and the page's
//! metadata yields the `SiteGoal` the classifier measures relevance
//! against.

use crate::config::DiscoveryConfig;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// One detected language variant of the target site
#[derive(Debug, Clone)]
pub struct LanguageVersion {
    /// Normalized (lowercase) language code, e.g. "pt"
    pub code: String,

    /// Human-readable label taken from the switcher link
    pub label: String,

    /// Entry URL for this language's crawl
    pub base_url: Url,
}

/// Short synthesized description of the site's main purpose
///
/// Derived once from the homepage and read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct SiteGoal {
    pub summary: String,
}

/// Maximum length of the extracted goal summary, in characters
const GOAL_SUMMARY_LIMIT: usize = 500;

/// Discovers the language versions offered by the homepage
///
/// The configured selectors are tried in order; the first selector with
/// matches identifies the language switcher and the rest are ignored.
/// Matches must resolve to an href carrying a `lang=` query parameter.
/// Versions are deduplicated by resolved URL, not by link text.
///
/// Fallbacks when no switcher is found: a `lang=` parameter on the
/// homepage URL itself, and finally a single synthetic `default` version.
/// The result is therefore never empty.
pub fn discover_languages(
    html: &str,
    base_url: &Url,
    config: &DiscoveryConfig,
) -> Vec<LanguageVersion> {
    let document = Html::parse_document(html);
    let mut languages = Vec::new();
    let mut seen_urls = HashSet::new();

    for selector_str in &config.selectors {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => {
                tracing::warn!("Skipping invalid language selector: {}", selector_str);
                continue;
            }
        };

        let matches: Vec<_> = document.select(&selector).collect();
        if matches.is_empty() {
            continue;
        }

        for element in matches {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let resolved = match base_url.join(href) {
                Ok(u) => crate::url::strip_fragment(u),
                Err(_) => {
                    tracing::debug!("Ignoring unresolvable language link: {}", href);
                    continue;
                }
            };
            let code = match lang_param(&resolved) {
                Some(c) => c.to_lowercase(),
                None => continue,
            };

            if !seen_urls.insert(resolved.clone()) {
                continue;
            }

            let text = element.text().collect::<String>().trim().to_string();
            let label = if !text.is_empty() {
                text
            } else if let Some(title) = element.value().attr("title") {
                title.trim().to_string()
            } else {
                code.to_uppercase()
            };

            languages.push(LanguageVersion {
                code,
                label,
                base_url: resolved,
            });
        }

        // First matching selector wins
        break;
    }

    // Fallback: the homepage URL itself may carry a language parameter
    if languages.is_empty() {
        if let Some(code) = lang_param(base_url) {
            let code = code.to_lowercase();
            languages.push(LanguageVersion {
                label: code.to_uppercase(),
                code,
                base_url: base_url.clone(),
            });
        }
    }

    // The run must never produce zero report groups
    if languages.is_empty() {
        languages.push(LanguageVersion {
            code: "default".to_string(),
            label: "Default".to_string(),
            base_url: base_url.clone(),
        });
    }

    languages
}

/// Extracts the site's goal statement from homepage markup
///
/// Prefers the description and keywords meta tags; falls back to the page
/// title plus the first paragraph. The summary is capped at 500 characters.
pub fn extract_site_goal(html: &str) -> SiteGoal {
    let document = Html::parse_document(html);
    let mut summary = String::new();

    for name in ["description", "keywords"] {
        let selector_str = format!(r#"meta[name="{}"]"#, name);
        let selector = match Selector::parse(&selector_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content") {
                let content = content.trim();
                if !content.is_empty() {
                    summary.push_str(content);
                    summary.push(' ');
                }
            }
        }
    }

    if summary.trim().is_empty() {
        if let Ok(selector) = Selector::parse("title") {
            if let Some(title) = document.select(&selector).next() {
                summary.push_str(title.text().collect::<String>().trim());
                summary.push(' ');
            }
        }
        if let Ok(selector) = Selector::parse("p") {
            if let Some(paragraph) = document.select(&selector).next() {
                summary.push_str(paragraph.text().collect::<String>().trim());
            }
        }
    }

    let summary: String = summary.trim().chars().take(GOAL_SUMMARY_LIMIT).collect();
    SiteGoal { summary }
}

/// Reads the `lang` query parameter from a URL, if present and non-empty
fn lang_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "lang" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
