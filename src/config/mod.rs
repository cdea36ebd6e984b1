//! Configuration for a CheckLink run
//!
//! All tunable behavior lives here: crawl options sourced from the CLI, the
//! scam-phrase list and relevance threshold for the classifier, and the
//! selector list for language discovery. The lists are plain immutable
//! values handed to their consumers at construction so tests can inject
//! custom ones.

mod types;
mod validation;

pub use types::{ClassifierConfig, CrawlOptions, DiscoveryConfig};
pub use validation::validate;
