/// Page state definitions for tracking crawl progress
use std::fmt;

/// Represents the current state of a page in the crawl process
///
/// A page moves `Pending -> Fetching -> {Analyzed | Warned}` and never
/// leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page has been queued but analysis has not started
    Pending,

    /// Page is being fetched and analyzed
    Fetching,

    /// Analysis completed without a terminating failure
    Analyzed,

    /// Analysis stopped early; the reason is in the page's warnings
    Warned,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Analyzed | Self::Warned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Analyzed => "analyzed",
            Self::Warned => "warned",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
