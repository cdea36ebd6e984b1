//! Crawl state definitions
//!
//! Every `(language, URL)` pair moves through a small state machine while
//! it is being processed. Terminal states end that unit of work; the
//! language's crawl continues until its queue drains.

use std::fmt;

/// State of a single URL within one language's crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// URL is in the traversal queue waiting to be fetched
    Queued,

    /// URL is currently being fetched
    Fetching,

    /// Page was fetched and ran through the classifier (terminal)
    Classified,

    /// Fetch or processing failed; an issue was recorded (terminal)
    Failed,
}

impl PageState {
    /// Returns true if this state ends processing for the URL
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Classified | Self::Failed)
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// Legal transitions: `Queued -> Fetching`, `Fetching -> Classified`,
    /// `Fetching -> Failed`.
    pub fn can_transition(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Fetching)
                | (Self::Fetching, Self::Classified)
                | (Self::Fetching, Self::Failed)
        )
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Fetching => "fetching",
            Self::Classified => "classified",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
