//! Scripted [`MarketApi`] for component tests.
//!
//! Each endpoint has a queue. A queued entry is either an immediate result
//! or a deferred one whose result is supplied later through a
//! [`oneshot::Sender`]; deferred entries let a test hold a response back
//! and release responses out of order. An empty queue answers with a
//! transport error.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::domain::{DayRecord, LookbackQuery, OverviewCard, ProviderKey, ProviderStatus, Symbol};
use crate::error::ApiError;
use crate::port::{ApiResult, MarketApi};

enum Scripted<T> {
    Ready(ApiResult<T>),
    Deferred(oneshot::Receiver<ApiResult<T>>),
}

struct Queue<T> {
    endpoint: &'static str,
    entries: Mutex<VecDeque<Scripted<T>>>,
}

impl<T> Queue<T> {
    fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, result: ApiResult<T>) {
        self.entries.lock().push_back(Scripted::Ready(result));
    }

    fn defer(&self) -> oneshot::Sender<ApiResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.entries.lock().push_back(Scripted::Deferred(rx));
        tx
    }

    async fn next(&self) -> ApiResult<T> {
        let entry = self.entries.lock().pop_front();
        match entry {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or_else(|_| {
                Err(ApiError::Transport {
                    endpoint: self.endpoint,
                    detail: "deferred response dropped".to_string(),
                })
            }),
            None => Err(ApiError::Transport {
                endpoint: self.endpoint,
                detail: "nothing scripted".to_string(),
            }),
        }
    }
}

/// Calls observed by a [`ScriptedApi`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    pub provider_status: usize,
    pub providers: usize,
    pub lookback: Vec<LookbackQuery>,
    pub overview_cards: Vec<(Symbol, u32)>,
}

/// A [`MarketApi`] driven entirely by the test.
pub struct ScriptedApi {
    statuses: Queue<Vec<ProviderStatus>>,
    providers: Mutex<Option<ApiResult<Vec<ProviderKey>>>>,
    lookback: Queue<BTreeMap<String, Vec<DayRecord>>>,
    cards: Queue<Vec<OverviewCard>>,
    calls: Mutex<CallLog>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            statuses: Queue::new("provider_status"),
            providers: Mutex::new(None),
            lookback: Queue::new("lookback"),
            cards: Queue::new("overview_cards"),
            calls: Mutex::new(CallLog::default()),
        }
    }

    pub fn push_status(&self, result: ApiResult<Vec<ProviderStatus>>) -> &Self {
        self.statuses.push(result);
        self
    }

    pub fn defer_status(&self) -> oneshot::Sender<ApiResult<Vec<ProviderStatus>>> {
        self.statuses.defer()
    }

    /// Answer every `providers()` call with `keys`.
    pub fn set_providers(&self, keys: &[&str]) -> &Self {
        *self.providers.lock() = Some(Ok(keys.iter().map(|k| ProviderKey::new(k)).collect()));
        self
    }

    pub fn fail_providers(&self, error: ApiError) -> &Self {
        *self.providers.lock() = Some(Err(error));
        self
    }

    pub fn push_lookback(&self, result: ApiResult<BTreeMap<String, Vec<DayRecord>>>) -> &Self {
        self.lookback.push(result);
        self
    }

    pub fn defer_lookback(&self) -> oneshot::Sender<ApiResult<BTreeMap<String, Vec<DayRecord>>>> {
        self.lookback.defer()
    }

    pub fn push_cards(&self, result: ApiResult<Vec<OverviewCard>>) -> &Self {
        self.cards.push(result);
        self
    }

    pub fn defer_cards(&self) -> oneshot::Sender<ApiResult<Vec<OverviewCard>>> {
        self.cards.defer()
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> CallLog {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl MarketApi for ScriptedApi {
    async fn provider_status(&self) -> ApiResult<Vec<ProviderStatus>> {
        self.calls.lock().provider_status += 1;
        self.statuses.next().await
    }

    async fn providers(&self) -> ApiResult<Vec<ProviderKey>> {
        self.calls.lock().providers += 1;
        self.providers.lock().clone().unwrap_or_else(|| {
            Err(ApiError::Transport {
                endpoint: "providers",
                detail: "nothing scripted".to_string(),
            })
        })
    }

    async fn lookback(&self, query: &LookbackQuery) -> ApiResult<BTreeMap<String, Vec<DayRecord>>> {
        self.calls.lock().lookback.push(query.clone());
        self.lookback.next().await
    }

    async fn overview_cards(&self, symbol: &Symbol, days: u32) -> ApiResult<Vec<OverviewCard>> {
        self.calls.lock().overview_cards.push((symbol.clone(), days));
        self.cards.next().await
    }
}
