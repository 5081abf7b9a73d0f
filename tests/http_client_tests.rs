//! HTTP client tests against a loopback stub server.

use marketdeck::adapter::outbound::http::{ApiConfig, HttpMarketApi};
use marketdeck::domain::{LookbackQuery, ProviderKey, Symbol};
use marketdeck::error::ApiError;
use marketdeck::port::MarketApi;
use marketdeck::testkit::server::{StubResponse, StubServer};

const STATUS_BODY: &str = r#"{
    "status": "success",
    "providers": {
        "yfinance": {"name": "YFinance", "available": true},
        "fmp": {"available": false}
    }
}"#;

const LOOKBACK_BODY: &str = r#"{
    "status": "success",
    "data": {
        "ES=F": [
            {
                "date": "2024-03-01",
                "symbol": "ES=F",
                "daily_open": 5100.0,
                "daily_high": 5130.0,
                "daily_low": 5090.0,
                "daily_close": 5125.0,
                "range_points": 40.0,
                "sessions": {
                    "ny_open": {"open": 5110.0, "high": 5120.0, "low": 5105.0, "close": 5118.0},
                    "asian_range": null
                }
            }
        ]
    }
}"#;

const CARDS_BODY: &str = r#"{
    "status": "success",
    "data": {
        "ES=F": [
            {"symbol": "ES=F", "date": "2024-03-01", "fvg_count": 2, "liquidity_count": 1},
            {"symbol": "ES=F", "date": "2024-03-04", "market_condition": "Bearish"}
        ]
    }
}"#;

fn client(base_url: &str) -> HttpMarketApi {
    HttpMarketApi::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        connect_timeout_ms: 500,
        ..ApiConfig::default()
    })
    .unwrap()
}

fn query() -> LookbackQuery {
    LookbackQuery::new("ES=F,NQ=F", 5, Some("09:30"), 10, ProviderKey::new("fmp")).unwrap()
}

#[tokio::test]
async fn test_provider_status_parses_map_in_key_order() {
    let server = StubServer::start(vec![(
        "/api/providers/status",
        StubResponse::json(200, STATUS_BODY),
    )])
    .await
    .unwrap();

    let statuses = client(&server.base_url()).provider_status().await.unwrap();

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].key.as_str(), "fmp");
    assert_eq!(statuses[0].name, "fmp");
    assert!(!statuses[0].available);
    assert_eq!(statuses[1].name, "YFinance");
    assert!(statuses[1].available);
}

#[tokio::test]
async fn test_lookback_sends_query_parameters() {
    let server = StubServer::start(vec![("/ict/lookback", StubResponse::json(200, LOOKBACK_BODY))])
        .await
        .unwrap();

    let data = client(&server.base_url()).lookback(&query()).await.unwrap();

    let days = &data["ES=F"];
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].daily_close, Some(5125.0));
    let sessions = days[0].ordered_sessions();
    assert_eq!(sessions[0].0, "asian_range");
    assert!(sessions[0].1.is_none());
    assert_eq!(sessions[1].0, "ny_open");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let target = &requests[0];
    assert!(target.starts_with("/ict/lookback?"));
    assert!(target.contains("symbols=ES%3DF%2CNQ%3DF"));
    assert!(target.contains("days=5"));
    assert!(target.contains("time=09%3A30"));
    assert!(target.contains("window=10"));
    assert!(target.contains("provider=fmp"));
}

#[tokio::test]
async fn test_error_envelope_is_application_error() {
    let server = StubServer::start(vec![(
        "/ict/lookback",
        StubResponse::json(500, r#"{"status":"error","error":"No data found for ZZZ"}"#),
    )])
    .await
    .unwrap();

    let err = client(&server.base_url()).lookback(&query()).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Application {
            endpoint: "lookback",
            message: "No data found for ZZZ".into()
        }
    );
}

#[tokio::test]
async fn test_error_status_with_http_200_is_application_error() {
    let server = StubServer::start(vec![(
        "/ict/lookback",
        StubResponse::json(200, r#"{"status":"error","error":"days must be positive"}"#),
    )])
    .await
    .unwrap();

    let err = client(&server.base_url()).lookback(&query()).await.unwrap_err();
    assert_eq!(err.to_string(), "days must be positive");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_html_error_page_is_transport_error() {
    let server = StubServer::start(vec![(
        "/ict/market-overview/cards",
        StubResponse::html(502, "<h1>Bad Gateway</h1>"),
    )])
    .await
    .unwrap();

    let err = client(&server.base_url())
        .overview_cards(&Symbol::new("ES=F"), 10)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_unknown_route_is_transport_error() {
    let server = StubServer::start(Vec::new()).await.unwrap();

    let err = client(&server.base_url()).provider_status().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.endpoint(), "provider_status");
}

#[tokio::test]
async fn test_missing_payload_field_is_decode_error() {
    let server = StubServer::start(vec![(
        "/api/providers/status",
        StubResponse::json(200, r#"{"status":"success"}"#),
    )])
    .await
    .unwrap();

    let err = client(&server.base_url()).provider_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_overview_cards_selects_symbol_entry() {
    let server = StubServer::start(vec![(
        "/ict/market-overview/cards",
        StubResponse::json(200, CARDS_BODY),
    )])
    .await
    .unwrap();
    let api = client(&server.base_url());

    let cards = api.overview_cards(&Symbol::new("ES=F"), 10).await.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].date, "2024-03-01");
    assert_eq!(cards[0].fvg_count, 2);
    assert_eq!(cards[1].market_condition.as_deref(), Some("Bearish"));
    assert_eq!(cards[1].fvg_count, 0);

    let target = &server.requests()[0];
    assert!(target.contains("symbols=ES%3DF"));
    assert!(target.contains("days=10"));
}

#[tokio::test]
async fn test_overview_cards_for_absent_symbol_is_empty() {
    let server = StubServer::start(vec![(
        "/ict/market-overview/cards",
        StubResponse::json(200, CARDS_BODY),
    )])
    .await
    .unwrap();

    let cards = client(&server.base_url())
        .overview_cards(&Symbol::new("NQ=F"), 10)
        .await
        .unwrap();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_providers_list() {
    let server = StubServer::start(vec![(
        "/api/providers/",
        StubResponse::json(200, r#"{"status":"success","providers":["yfinance","FMP"]}"#),
    )])
    .await
    .unwrap();

    let keys = client(&server.base_url()).providers().await.unwrap();
    assert_eq!(keys, vec![ProviderKey::new("yfinance"), ProviderKey::new("fmp")]);
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let server = StubServer::start(vec![(
        "/finbot/api/providers/status",
        StubResponse::json(200, STATUS_BODY),
    )])
    .await
    .unwrap();

    let base = format!("{}/finbot", server.base_url());
    let statuses = client(&base).provider_status().await.unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(server.requests(), vec!["/finbot/api/providers/status"]);
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = client(&format!("http://127.0.0.1:{port}"))
        .provider_status()
        .await
        .unwrap_err();
    assert!(err.is_transport());
}
