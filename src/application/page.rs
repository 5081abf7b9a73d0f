//! Terminal page model: named regions holding rendered content.
//!
//! Each view component owns exactly one region and replaces its content
//! wholesale on every update. Renderers read a snapshot of the page and
//! subscribe to [`PageUpdate`] notifications to know when to redraw.

use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::{OverviewCard, ProviderKey, ProviderStatus, Symbol, SymbolDays};

/// Identifier of a page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionId {
    ProviderStatus,
    Lookback,
    CardGrid,
}

impl RegionId {
    /// Stable name used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProviderStatus => "provider-status",
            Self::Lookback => "lookback",
            Self::CardGrid => "card-grid",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider line in the status sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRow {
    #[serde(flatten)]
    pub status: ProviderStatus,
    /// Emphasized as the currently selected provider.
    pub active: bool,
}

/// What a region currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Loading { message: String },
    Error { message: String },
    /// The request succeeded but returned nothing to show.
    Empty { message: String },
    ProviderRows { rows: Vec<ProviderRow> },
    Lookback { groups: Vec<SymbolDays> },
    CardGrid { symbol: Symbol, cards: Vec<OverviewCard> },
}

impl Content {
    /// True for the inline error state.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// A named area of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub content: Option<Content>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Region {
    fn new(id: RegionId) -> Self {
        Self {
            id,
            content: None,
            updated_at: None,
        }
    }

    /// Replace the region's content.
    pub fn set(&mut self, content: Content) {
        self.content = Some(content);
        self.updated_at = Some(Utc::now());
    }

    /// Re-mark which provider row is active without touching anything else.
    ///
    /// Returns `false` when the region holds no provider rows.
    pub fn emphasize(&mut self, active: Option<&ProviderKey>) -> bool {
        let Some(Content::ProviderRows { rows }) = &mut self.content else {
            return false;
        };
        for row in rows.iter_mut() {
            row.active = active == Some(&row.status.key);
        }
        true
    }
}

/// The full page: regions in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    regions: Vec<Region>,
    #[serde(skip)]
    creations: usize,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the region, creating it the first time it is asked for.
    pub fn ensure_region(&mut self, id: RegionId) -> &mut Region {
        let index = match self.regions.iter().position(|r| r.id == id) {
            Some(index) => index,
            None => {
                self.regions.push(Region::new(id));
                self.creations += 1;
                self.regions.len() - 1
            }
        };
        &mut self.regions[index]
    }

    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    /// Content of a region, if the region exists and has been filled.
    #[must_use]
    pub fn content(&self, id: RegionId) -> Option<&Content> {
        self.region(id).and_then(|r| r.content.as_ref())
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// How many regions have ever been created on this page.
    #[must_use]
    pub const fn region_creations(&self) -> usize {
        self.creations
    }
}

/// Notification sent after a region changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageUpdate {
    pub region: RegionId,
    pub revision: u64,
}

/// Thread-safe page with update notifications.
pub struct SharedPage {
    inner: RwLock<(Page, u64)>,
    tx: broadcast::Sender<PageUpdate>,
}

impl SharedPage {
    /// Create an empty page with a notification buffer of `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: RwLock::new((Page::new(), 0)),
            tx,
        }
    }

    /// Subscribe to region change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PageUpdate> {
        self.tx.subscribe()
    }

    /// Mutate one region and notify subscribers.
    ///
    /// The region is created if it does not exist yet.
    pub fn update<R>(&self, id: RegionId, f: impl FnOnce(&mut Region) -> R) -> R {
        let (result, revision) = {
            let mut guard = self.inner.write();
            let (page, revision) = &mut *guard;
            let result = f(page.ensure_region(id));
            *revision += 1;
            (result, *revision)
        };
        // No receivers is fine; one-shot commands never subscribe.
        let _ = self.tx.send(PageUpdate {
            region: id,
            revision,
        });
        result
    }

    /// Mutate one region only if `guard` holds, checked under the write lock.
    ///
    /// Returns `None` and notifies nobody when the guard fails.
    pub fn update_if<R>(
        &self,
        id: RegionId,
        guard: impl FnOnce() -> bool,
        f: impl FnOnce(&mut Region) -> R,
    ) -> Option<R> {
        let (result, revision) = {
            let mut inner = self.inner.write();
            if !guard() {
                return None;
            }
            let (page, revision) = &mut *inner;
            let result = f(page.ensure_region(id));
            *revision += 1;
            (result, *revision)
        };
        let _ = self.tx.send(PageUpdate {
            region: id,
            revision,
        });
        Some(result)
    }

    /// Mutate a region only if it already exists.
    ///
    /// Subscribers are notified only when the region was found.
    pub fn update_existing<R>(&self, id: RegionId, f: impl FnOnce(&mut Region) -> R) -> Option<R> {
        let (result, revision) = {
            let mut guard = self.inner.write();
            let (page, revision) = &mut *guard;
            let result = f(page.region_mut(id)?);
            *revision += 1;
            (result, *revision)
        };
        let _ = self.tx.send(PageUpdate {
            region: id,
            revision,
        });
        Some(result)
    }

    /// Read the page under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Page) -> R) -> R {
        f(&self.inner.read().0)
    }

    /// Clone the current page.
    #[must_use]
    pub fn snapshot(&self) -> Page {
        self.inner.read().0.clone()
    }

    /// Number of updates applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.read().1
    }
}

impl Default for SharedPage {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, active: bool) -> ProviderRow {
        ProviderRow {
            status: ProviderStatus::new(key, None, true),
            active,
        }
    }

    #[test]
    fn ensure_region_creates_once() {
        let mut page = Page::new();
        page.ensure_region(RegionId::ProviderStatus);
        page.ensure_region(RegionId::ProviderStatus);
        page.ensure_region(RegionId::CardGrid);
        assert_eq!(page.region_creations(), 2);
        assert_eq!(page.regions().count(), 2);
    }

    #[test]
    fn emphasize_marks_only_matching_row() {
        let mut page = Page::new();
        let region = page.ensure_region(RegionId::ProviderStatus);
        region.set(Content::ProviderRows {
            rows: vec![row("yfinance", true), row("fmp", false)],
        });

        assert!(region.emphasize(Some(&ProviderKey::new("fmp"))));
        let Some(Content::ProviderRows { rows }) = page.content(RegionId::ProviderStatus) else {
            panic!("expected provider rows");
        };
        assert!(!rows[0].active);
        assert!(rows[1].active);
    }

    #[test]
    fn emphasize_ignores_other_content() {
        let mut page = Page::new();
        let region = page.ensure_region(RegionId::CardGrid);
        region.set(Content::Loading {
            message: "Loading".into(),
        });
        assert!(!region.emphasize(None));
    }

    #[tokio::test]
    async fn shared_page_notifies_subscribers() {
        let page = SharedPage::new(8);
        let mut rx = page.subscribe();
        page.update(RegionId::Lookback, |region| {
            region.set(Content::Empty {
                message: "nothing".into(),
            })
        });

        let update = rx.recv().await.unwrap();
        assert_eq!(update.region, RegionId::Lookback);
        assert_eq!(update.revision, 1);
        assert_eq!(page.revision(), 1);
        assert!(page.read(|p| p.content(RegionId::Lookback).is_some()));
    }

    #[test]
    fn update_if_skips_when_guard_fails() {
        let page = SharedPage::new(8);
        let mut rx = page.subscribe();

        let skipped = page.update_if(RegionId::CardGrid, || false, |region| {
            region.set(Content::Empty {
                message: "late".into(),
            })
        });
        assert!(skipped.is_none());
        assert_eq!(page.revision(), 0);
        assert!(page.read(|p| p.region(RegionId::CardGrid).is_none()));
        assert!(rx.try_recv().is_err());

        let applied = page.update_if(RegionId::CardGrid, || true, |region| {
            region.set(Content::Empty {
                message: "fresh".into(),
            })
        });
        assert!(applied.is_some());
        assert_eq!(page.revision(), 1);
    }
}
