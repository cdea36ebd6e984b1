//! Crawling engine
//!
//! The pieces of a crawl, bottom up: a pacing gate that spaces requests, a
//! fetcher that classifies every network outcome, homepage analysis
//! (language discovery and goal extraction), link/text extraction, and the
//! coordinator that drives one breadth-first traversal per language.

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod pacing;

pub use coordinator::{Coordinator, CrawlOutcome, CrawlTask};
pub use discovery::{discover_languages, extract_site_goal, LanguageVersion, SiteGoal};
pub use extractor::{extract_links, page_text, PageLink};
pub use fetcher::{FetchOutcome, Fetcher};
pub use pacing::PacingGate;
