//! End-to-end tests: client → gate → mock upstream.

use std::net::SocketAddr;

use reqwest::{header, StatusCode};
use route_gate::config::GateConfig;
use route_gate::lifecycle::Shutdown;

mod common;

fn config_for(upstream: SocketAddr) -> GateConfig {
    let mut config = GateConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.address = upstream.to_string();
    config
}

#[tokio::test]
async fn test_anonymous_request_redirected_with_original_path() {
    let upstream = common::start_echo_upstream().await;
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(upstream), &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/worker/contracts", gate))
        .send()
        .await
        .expect("Gate unreachable");

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers()[header::LOCATION],
        "/login?redirect=%2Fworker%2Fcontracts"
    );
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_signed_in_request_forwarded_with_layout() {
    let upstream = common::start_echo_upstream().await;
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(upstream), &shutdown).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/dashboard?tab=1", gate))
        .header(header::COOKIE, "access_token=abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let request_id = res.headers()["x-request-id"].to_str().unwrap().to_string();
    let body = res.text().await.unwrap();
    assert_eq!(body, format!("/dashboard?tab=1|shell|{}", request_id));

    let res = client
        .get(format!("http://{}/worker/contracts/abc123", gate))
        .header(header::COOKIE, "access_token=abc")
        .send()
        .await
        .unwrap();
    let body = res.text().await.unwrap();
    assert!(body.starts_with("/worker/contracts/abc123|bare|"), "{body}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_signed_in_user_redirected_away_from_login() {
    let upstream = common::start_echo_upstream().await;
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(upstream), &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/login", gate))
        .header(header::COOKIE, "access_token=abc")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()[header::LOCATION], "/");

    shutdown.trigger();
}

#[tokio::test]
async fn test_static_assets_bypass_gate() {
    let upstream = common::start_echo_upstream().await;
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(upstream), &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/_next/static/chunks/app.js", gate))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("/_next/static/chunks/app.js|none|"), "{body}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_probe_skips_gate() {
    let upstream = common::start_echo_upstream().await;
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(upstream), &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/_gate/health", gate))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["status"], "ok");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_returns_bad_gateway() {
    // Grab a free port, then release it so nothing is listening there.
    let dead = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let shutdown = Shutdown::new();
    let gate = common::start_gate(config_for(dead), &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/terms", gate))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    shutdown.trigger();
}
