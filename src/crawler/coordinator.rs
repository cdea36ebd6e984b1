//! Crawl orchestration
//!
//! One `Coordinator` drives a whole run: it fetches the homepage, derives
//! the site goal and the language versions, then crawls each language with
//! its own breadth-first traversal and visited set. Languages are processed
//! strictly one after another through the shared fetcher, so the pacing
//! delay holds across the entire run.

use crate::classify::{ContentClassifier, Verdict};
use crate::config::{self, CrawlOptions, DiscoveryConfig};
use crate::crawler::discovery::{discover_languages, extract_site_goal, LanguageVersion, SiteGoal};
use crate::crawler::extractor::{extract_links, page_text, PageLink};
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::report::{Issue, IssueKind, LanguageReport};
use crate::state::PageState;
use crate::ChecklinkError;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// One unit of crawl work: a URL at a known depth
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// Absolute, fragment-free URL to check
    pub url: Url,

    /// Distance from the language's entry page (entry page is 0)
    pub depth: u32,

    /// Display title carried over from the link that discovered this URL
    pub title: String,
}

/// Everything a finished run produced, before rendering
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The goal summary extracted from the homepage
    pub site_goal: SiteGoal,

    /// Per-language results, in discovery order
    pub languages: Vec<LanguageReport>,
}

/// Output of processing one task: an optional issue plus the links to
/// enqueue
struct TaskOutput {
    issue: Option<(IssueKind, String)>,
    children: Vec<PageLink>,
}

/// Drives one complete multi-language analysis run
pub struct Coordinator {
    options: CrawlOptions,
    fetcher: Fetcher,
    classifier: ContentClassifier,
    discovery: DiscoveryConfig,
}

impl Coordinator {
    /// Validates the options and builds the HTTP stack
    pub fn new(options: CrawlOptions, classifier: ContentClassifier) -> crate::Result<Self> {
        config::validate(&options)?;

        let fetcher = Fetcher::new(
            &options.user_agent,
            Duration::from_secs(options.timeout_secs),
            Duration::from_millis(options.delay_ms),
        )?;

        Ok(Self {
            options,
            fetcher,
            classifier,
            discovery: DiscoveryConfig::default(),
        })
    }

    /// Runs the full analysis
    ///
    /// An unreachable homepage is the one fatal crawl error; once language
    /// discovery succeeds, per-URL failures become issues and the run keeps
    /// going.
    pub async fn run(mut self) -> crate::Result<CrawlOutcome> {
        let base = crate::url::parse_target(&self.options.base_url)?;
        tracing::info!("Starting analysis of {}", base);

        let body = match self.fetcher.fetch(&base).await {
            FetchOutcome::Success { body, .. } => body,
            FetchOutcome::HttpError { status, .. } => {
                return Err(ChecklinkError::Discovery {
                    url: base.to_string(),
                    reason: format!("HTTP {}", status),
                })
            }
            FetchOutcome::Timeout { .. } => {
                return Err(ChecklinkError::Discovery {
                    url: base.to_string(),
                    reason: "request timed out".to_string(),
                })
            }
            FetchOutcome::ConnectionError { error, .. } => {
                return Err(ChecklinkError::Discovery {
                    url: base.to_string(),
                    reason: error,
                })
            }
        };

        let site_goal = extract_site_goal(&body);
        tracing::info!("Site goal: {}", site_goal.summary);

        let languages = discover_languages(&body, &base, &self.discovery);
        tracing::info!(
            "Discovered {} language version(s): {}",
            languages.len(),
            languages
                .iter()
                .map(|l| l.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut reports = Vec::with_capacity(languages.len());
        for language in &languages {
            reports.push(self.crawl_language(language, &site_goal).await);
        }

        Ok(CrawlOutcome {
            site_goal,
            languages: reports,
        })
    }

    /// Breadth-first crawl of one language version
    ///
    /// Each language owns its traversal queue, visited set, and state map,
    /// so the same URL reached from two languages is checked once per
    /// language.
    async fn crawl_language(
        &mut self,
        language: &LanguageVersion,
        goal: &SiteGoal,
    ) -> LanguageReport {
        tracing::info!("Crawling {} ({})", language.label, language.base_url);

        let mut queue: VecDeque<CrawlTask> = VecDeque::new();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut states: HashMap<Url, PageState> = HashMap::new();
        let mut issues: Vec<Issue> = Vec::new();
        let mut checked = 0usize;

        let entry = crate::url::strip_fragment(language.base_url.clone());
        states.insert(entry.clone(), PageState::Queued);
        queue.push_back(CrawlTask {
            url: entry,
            depth: 0,
            title: language.label.clone(),
        });

        while let Some(task) = queue.pop_front() {
            // Guard against duplicate entries; normally enqueue-time
            // filtering already prevents them.
            if !visited.insert(task.url.clone()) {
                continue;
            }
            checked += 1;

            match self.process_task(&task, language, goal, &mut states).await {
                Ok(output) => {
                    for link in output.children {
                        if visited.contains(&link.url) || states.contains_key(&link.url) {
                            continue;
                        }
                        states.insert(link.url.clone(), PageState::Queued);
                        queue.push_back(CrawlTask {
                            url: link.url,
                            depth: task.depth + 1,
                            title: link.title,
                        });
                    }

                    if let Some((kind, detail)) = output.issue {
                        tracing::debug!("{}: [{}] {}", language.code, kind, task.url);
                        issues.push(make_issue(language, &task, kind, detail));
                    }
                }
                Err(e) => {
                    tracing::warn!("Error processing {}: {}", task.url, e);
                    issues.push(make_issue(language, &task, IssueKind::Error, e.to_string()));
                }
            }
        }

        tracing::info!(
            "{}: {} links checked, {} issues",
            language.code,
            checked,
            issues.len()
        );

        LanguageReport {
            code: language.code.clone(),
            label: language.label.clone(),
            links_checked: checked,
            issues,
        }
    }

    /// Fetches and evaluates one URL
    async fn process_task(
        &mut self,
        task: &CrawlTask,
        language: &LanguageVersion,
        goal: &SiteGoal,
        states: &mut HashMap<Url, PageState>,
    ) -> crate::Result<TaskOutput> {
        advance(states, &task.url, PageState::Fetching)?;
        tracing::debug!(depth = task.depth, "Checking {}", task.url);

        match self.fetcher.fetch(&task.url).await {
            FetchOutcome::Success { body, .. } => {
                let children = if self.expandable(task, language) {
                    extract_links(&body, &task.url)
                } else {
                    Vec::new()
                };

                let verdict = self.classifier.classify(&page_text(&body), goal).await;
                advance(states, &task.url, PageState::Classified)?;

                let issue = match verdict {
                    Verdict::Ok => None,
                    Verdict::Suspicious(reason) => Some((IssueKind::Suspicious, reason)),
                    Verdict::LowRelevance(reason) => Some((IssueKind::LowRelevance, reason)),
                };

                Ok(TaskOutput { issue, children })
            }
            FetchOutcome::HttpError { status, .. } => {
                advance(states, &task.url, PageState::Failed)?;
                Ok(TaskOutput {
                    issue: Some((IssueKind::Broken, format!("HTTP {}", status))),
                    children: Vec::new(),
                })
            }
            FetchOutcome::Timeout { elapsed } => {
                advance(states, &task.url, PageState::Failed)?;
                Ok(TaskOutput {
                    issue: Some((
                        IssueKind::Timeout,
                        format!("timed out after {:.1}s", elapsed.as_secs_f64()),
                    )),
                    children: Vec::new(),
                })
            }
            FetchOutcome::ConnectionError { error, .. } => {
                advance(states, &task.url, PageState::Failed)?;
                Ok(TaskOutput {
                    issue: Some((IssueKind::ConnectionError, error)),
                    children: Vec::new(),
                })
            }
        }
    }

    /// Returns true if links found on this page should join the queue
    ///
    /// Only same-host pages are expanded, and only while the children would
    /// stay within the depth limit. External links are still fetched and
    /// checked, just never expanded.
    fn expandable(&self, task: &CrawlTask, language: &LanguageVersion) -> bool {
        crate::url::same_host(&task.url, &language.base_url)
            && task.depth < self.options.max_depth
    }
}

/// Advances a URL's state, enforcing the legal transitions
fn advance(
    states: &mut HashMap<Url, PageState>,
    url: &Url,
    next: PageState,
) -> crate::Result<()> {
    let current = states.get(url).copied().unwrap_or(PageState::Queued);
    if !current.can_transition(next) {
        return Err(ChecklinkError::InvalidTransition {
            from: current,
            to: next,
        });
    }
    states.insert(url.clone(), next);
    Ok(())
}

fn make_issue(
    language: &LanguageVersion,
    task: &CrawlTask,
    kind: IssueKind,
    detail: String,
) -> Issue {
    Issue {
        language: language.code.clone(),
        title: task.title.clone(),
        url: task.url.to_string(),
        kind,
        detail,
    }
}
