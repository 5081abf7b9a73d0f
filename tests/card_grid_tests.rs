//! Overview card grid integration tests.

mod support;

use std::sync::Arc;

use marketdeck::adapter::inbound::cli::render;
use marketdeck::application::{CardGridLoader, Content, RegionId, ViewOutcome};
use marketdeck::domain::{Symbol, CARD_GRID_DAYS};
use marketdeck::testkit::domain::{application_error, cards};

use support::{content, page, scripted, wait_until};

fn dates(content: Option<Content>) -> Vec<String> {
    let Some(Content::CardGrid { cards, .. }) = content else {
        panic!("expected a card grid, got {content:?}");
    };
    cards.into_iter().map(|c| c.date).collect()
}

#[tokio::test]
async fn test_cards_are_shown_newest_first() {
    let (api, port) = scripted();
    let page = page();
    api.push_cards(Ok(cards("ES=F", 3)));

    let loader = CardGridLoader::new(port, page.clone());
    assert_eq!(loader.load(&Symbol::new("ES=F")).await, ViewOutcome::Rendered);

    assert_eq!(
        dates(content(&page, RegionId::CardGrid)),
        vec!["2024-03-03", "2024-03-02", "2024-03-01"]
    );
}

#[tokio::test]
async fn test_requests_always_use_fixed_window() {
    let (api, port) = scripted();
    let page = page();
    api.push_cards(Ok(cards("NQ=F", 1)));

    let loader = CardGridLoader::new(port, page);
    loader.load(&Symbol::new("NQ=F")).await;

    assert_eq!(
        api.calls().overview_cards,
        vec![(Symbol::new("NQ=F"), CARD_GRID_DAYS)]
    );
    assert_eq!(CARD_GRID_DAYS, 10);
}

#[tokio::test]
async fn test_no_cards_shows_empty_message() {
    let (api, port) = scripted();
    let page = page();
    api.push_cards(Ok(Vec::new()));

    let loader = CardGridLoader::new(port, page.clone());
    assert_eq!(loader.load(&Symbol::new("CL=F")).await, ViewOutcome::Empty);
    assert_eq!(
        content(&page, RegionId::CardGrid),
        Some(Content::Empty {
            message: "No data available for CL=F".into()
        })
    );
}

#[tokio::test]
async fn test_failure_is_rendered_inline() {
    let (api, port) = scripted();
    let page = page();
    api.push_cards(Err(application_error("overview_cards", "Unknown symbol FOO")));

    let loader = CardGridLoader::new(port, page.clone());
    assert_eq!(loader.load(&Symbol::new("FOO")).await, ViewOutcome::Failed);

    let Some(Content::Error { message }) = content(&page, RegionId::CardGrid) else {
        panic!("expected an error");
    };
    assert!(message.starts_with("Error loading data:"));
    assert!(message.contains("Unknown symbol FOO"));
}

#[tokio::test]
async fn test_loading_message_names_symbol() {
    let (api, port) = scripted();
    let page = page();
    let held = api.defer_cards();

    let loader = Arc::new(CardGridLoader::new(port, page.clone()));
    let load = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader.load(&Symbol::new("GC=F")).await }
    });
    wait_until(|| api.calls().overview_cards.len() == 1).await;

    assert_eq!(
        content(&page, RegionId::CardGrid),
        Some(Content::Loading {
            message: "Loading GC=F...".into()
        })
    );
    held.send(Ok(cards("GC=F", 2))).unwrap();
    assert_eq!(load.await.unwrap(), ViewOutcome::Rendered);
}

#[tokio::test]
async fn test_rapid_symbol_changes_show_only_latest() {
    let (api, port) = scripted();
    let page = page();
    let held = api.defer_cards();

    let loader = Arc::new(CardGridLoader::new(port, page.clone()));
    let first = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader.load(&Symbol::new("ES=F")).await }
    });
    wait_until(|| api.calls().overview_cards.len() == 1).await;

    api.push_cards(Ok(cards("NQ=F", 2)));
    assert_eq!(loader.load(&Symbol::new("NQ=F")).await, ViewOutcome::Rendered);

    held.send(Ok(cards("ES=F", 5))).unwrap();
    assert_eq!(first.await.unwrap(), ViewOutcome::Stale);

    let Some(Content::CardGrid { symbol, cards }) = content(&page, RegionId::CardGrid) else {
        panic!("expected a card grid");
    };
    assert_eq!(symbol, Symbol::new("NQ=F"));
    assert_eq!(cards.len(), 2);
}

#[tokio::test]
async fn test_rendered_grid_lists_dates_in_display_order() {
    let (api, port) = scripted();
    let page = page();
    api.push_cards(Ok(cards("ES=F", 2)));

    let loader = CardGridLoader::new(port, page.clone());
    loader.load(&Symbol::new("ES=F")).await;

    let text = page.read(render::page);
    let newer = text.find("2024-03-02").unwrap();
    let older = text.find("2024-03-01").unwrap();
    assert!(newer < older);
    assert!(text.contains("Market Overview"));
}
