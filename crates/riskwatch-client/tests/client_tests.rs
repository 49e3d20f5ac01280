//! Integration tests for the risk event client.
//!
//! Each test serves the real query service router on `127.0.0.1:0` and
//! points the client at it, so the full HTTP path (status handling, JSON
//! decoding, timeouts) is exercised.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use riskwatch_analytics::AnalyticsError;
use riskwatch_api::{AppState, ServerConfig, spawn_server};
use riskwatch_client::{ClientConfig, ClientError, RiskEventAnalyzer, RiskEventClient};
use riskwatch_store::{EventStore, seed_events};
use rust_decimal::Decimal;
use tokio::net::TcpListener;

async fn serve(store: EventStore) -> SocketAddr {
    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
    };
    let (addr, _handle) = spawn_server(&config, Arc::new(AppState::new(store)))
        .await
        .unwrap();
    addr
}

fn client_for(addr: SocketAddr) -> RiskEventClient {
    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_secs(5));
    RiskEventClient::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_all_events_in_seed_order() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let events = client_for(addr).fetch_risk_events().await.unwrap();
    assert_eq!(events, seed_events());
}

#[tokio::test]
async fn fetches_single_event() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let event = client_for(addr).get_risk_event("P67890").await.unwrap();
    assert_eq!(event.insured_location, "California");
    assert_eq!(event.property_value, Decimal::new(250_000, 0));
    assert!(event.claim_history.is_empty());
}

#[tokio::test]
async fn unknown_policy_is_not_found() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let err = client_for(addr).get_risk_event("P99999").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { policy_id } if policy_id == "P99999"));
}

#[tokio::test]
async fn analyzer_report_over_seed() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let analyzer = RiskEventAnalyzer::new(client_for(addr));
    assert!(!analyzer.is_cached());

    let report = analyzer.generate_risk_report().await.unwrap();
    assert!(analyzer.is_cached());
    assert_eq!(report.total_policies, 2);
    assert_eq!(report.total_property_value, Decimal::new(750_000, 0));
    assert_eq!(report.average_property_value, Decimal::new(375_000, 0));
    assert_eq!(report.risk_metrics.highest_value_location, "Florida");
    assert_eq!(report.risk_metrics.average_claims_per_policy, Decimal::ONE);

    let by_location = analyzer.analyze_risk_by_location().await.unwrap();
    assert_eq!(by_location.len(), 2);

    let html = analyzer.render_charts_html().await.unwrap();
    assert_eq!(html.matches("<svg").count(), 4);
}

#[tokio::test]
async fn analyzer_empty_catalog_fails_fast() {
    let addr = serve(EventStore::from_events(Vec::new()).unwrap()).await;
    let analyzer = RiskEventAnalyzer::new(client_for(addr));

    assert!(analyzer.events().await.unwrap().is_empty());
    assert!(analyzer.analyze_risk_by_location().await.unwrap().is_empty());
    let err = analyzer.generate_risk_report().await.unwrap_err();
    assert!(matches!(err, ClientError::Analytics(AnalyticsError::EmptyInput)));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Bind then drop to get a port nobody is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).fetch_risk_events().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");

    let analyzer = RiskEventAnalyzer::new(client_for(addr));
    assert!(analyzer.generate_risk_report().await.is_err());
    assert!(!analyzer.is_cached());
}

#[tokio::test]
async fn slow_service_times_out() {
    // Accept connections but never answer.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(200));
    let client = RiskEventClient::new(&config).unwrap();
    let err = client.fetch_risk_events().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn wrong_base_path_is_status_error() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let config = ClientConfig::new(format!("http://{addr}/v2"));
    let client = RiskEventClient::new(&config).unwrap();
    let err = client.fetch_risk_events().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, .. }), "{err:?}");
}

#[tokio::test]
async fn wrong_base_path_does_not_hide_existing_policy() {
    let addr = serve(EventStore::seeded().unwrap()).await;
    let config = ClientConfig::new(format!("http://{addr}/v2"));
    let client = RiskEventClient::new(&config).unwrap();
    let err = client.get_risk_event("P12345").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, .. }), "{err:?}");
}
