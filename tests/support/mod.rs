#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use marketdeck::application::{Content, RegionId, SharedPage};
use marketdeck::port::MarketApi;
use marketdeck::testkit::api::ScriptedApi;

/// A scripted API plus the same API as a trait object for components.
pub fn scripted() -> (Arc<ScriptedApi>, Arc<dyn MarketApi>) {
    let api = Arc::new(ScriptedApi::new());
    let port: Arc<dyn MarketApi> = api.clone();
    (api, port)
}

pub fn page() -> Arc<SharedPage> {
    Arc::new(SharedPage::default())
}

/// Clone the content of `id`, if any.
pub fn content(page: &SharedPage, id: RegionId) -> Option<Content> {
    page.read(|p| p.content(id).cloned())
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
