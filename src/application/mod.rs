//! View components: the provider status poller, the lookback fetcher and
//! the card grid loader, plus the page model they render into.
//!
//! Components depend only on ports and domain types. Each owns one page
//! region and a [`RequestGate`](crate::domain::RequestGate) so a late
//! response can never overwrite a newer one.

pub mod cards;
pub mod lookback;
pub mod page;
pub mod status;

pub use cards::CardGridLoader;
pub use lookback::LookbackFetcher;
pub use page::{Content, Page, PageUpdate, ProviderRow, Region, RegionId, SharedPage};
pub use status::{ProviderChanged, StatusPoller, DEFAULT_POLL_INTERVAL};

/// What a single trigger of a component did to its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Fresh data was rendered.
    Rendered,
    /// The request succeeded but there was nothing to show.
    Empty,
    /// An inline error message was rendered.
    Failed,
    /// The cycle was skipped and the previous rendering kept.
    Skipped,
    /// A newer request superseded this one; its response was dropped.
    Stale,
}

impl ViewOutcome {
    /// True when the component ended in its error state.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}
