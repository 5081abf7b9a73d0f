//! Provider status poller.
//!
//! Polls the provider status endpoint on start and on a fixed interval,
//! rebuilding the `provider-status` region on success. Failed polls are
//! logged and skipped so the previous rows stay visible. A
//! [`ProviderChanged`] notification re-emphasizes rows without fetching.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::page::{Content, ProviderRow, RegionId, SharedPage};
use super::ViewOutcome;
use crate::domain::{ProviderKey, RequestGate};
use crate::port::MarketApi;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Application-level notification that the selected provider changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderChanged(pub ProviderKey);

/// Periodic provider status poller.
pub struct StatusPoller {
    api: Arc<dyn MarketApi>,
    page: Arc<SharedPage>,
    gate: RequestGate,
    active: Mutex<Option<ProviderKey>>,
    interval: Duration,
}

impl StatusPoller {
    #[must_use]
    pub fn new(api: Arc<dyn MarketApi>, page: Arc<SharedPage>, interval: Duration) -> Self {
        Self {
            api,
            page,
            gate: RequestGate::new(),
            active: Mutex::new(None),
            interval,
        }
    }

    /// Start with `provider` emphasized.
    #[must_use]
    pub fn with_active(self, provider: ProviderKey) -> Self {
        *self.active.lock() = Some(provider);
        self
    }

    /// The provider currently emphasized.
    #[must_use]
    pub fn active(&self) -> Option<ProviderKey> {
        self.active.lock().clone()
    }

    /// Run one poll cycle.
    ///
    /// On failure the region is left exactly as it was.
    pub async fn poll_once(&self) -> ViewOutcome {
        let token = self.gate.issue();
        debug!(token = token.sequence(), "Polling provider status");

        let statuses = match self.api.provider_status().await {
            Ok(statuses) => statuses,
            Err(e) => {
                warn!(error = %e, "Provider status unavailable, keeping previous rows");
                return ViewOutcome::Skipped;
            }
        };

        if !self.gate.is_current(token) {
            debug!(token = token.sequence(), "Discarding stale provider status");
            return ViewOutcome::Stale;
        }

        let active = self.active();
        let rows: Vec<ProviderRow> = statuses
            .into_iter()
            .map(|status| ProviderRow {
                active: active.as_ref() == Some(&status.key),
                status,
            })
            .collect();
        let count = rows.len();

        let committed = self.page.update_if(
            RegionId::ProviderStatus,
            || self.gate.is_current(token),
            |region| region.set(Content::ProviderRows { rows }),
        );
        if committed.is_none() {
            debug!(token = token.sequence(), "Newer poll committed first, dropping response");
            return ViewOutcome::Stale;
        }
        debug!(providers = count, "Provider status updated");
        ViewOutcome::Rendered
    }

    /// Emphasize `provider` in the existing rows. Never fetches.
    pub fn highlight(&self, provider: ProviderKey) {
        info!(provider = %provider, "Active provider changed");
        *self.active.lock() = Some(provider.clone());
        self.page
            .update_existing(RegionId::ProviderStatus, |region| {
                region.emphasize(Some(&provider));
            });
    }

    /// Poll immediately, then every interval, handling provider changes
    /// as they arrive. Runs until the task is aborted.
    pub async fn run(self: Arc<Self>, mut events: broadcast::Receiver<ProviderChanged>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut events_open = true;

        info!(interval_secs = self.interval.as_secs(), "Provider status poller started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                event = events.recv(), if events_open => match event {
                    Ok(ProviderChanged(provider)) => self.highlight(provider),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed provider change notifications");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Provider change channel closed");
                        events_open = false;
                    }
                },
            }
        }
    }
}
