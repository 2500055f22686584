//! Admin API and live-listener tests.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use locale_router::admin::setup_admin_router;
use locale_router::http::HttpServer;
use locale_router::lifecycle::Shutdown;

mod common;

use common::multilingual_config;

const KEY: &str = "test-admin-key";

fn admin_server() -> HttpServer {
    let mut config = multilingual_config(false, false);
    config.admin.enabled = true;
    config.admin.api_key = KEY.into();
    HttpServer::new(config).unwrap()
}

async fn admin_call(server: &HttpServer, method: &str, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
    let router = setup_admin_router(server.state());
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", key));
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_admin_requires_bearer_token() {
    let server = admin_server();

    let (status, _) = admin_call(&server, "GET", "/admin/status", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = admin_call(&server, "GET", "/admin/status", Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = admin_call(&server, "GET", "/admin/status", Some(KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["style"], "lang");
    assert_eq!(body["default_locale"], "en_US");
    assert_eq!(body["content_ready"], true);
}

#[tokio::test]
async fn test_admin_lists_locales() {
    let server = admin_server();
    let (status, body) = admin_call(&server, "GET", "/admin/locales", Some(KEY)).await;
    assert_eq!(status, StatusCode::OK);

    let locales = body["locales"].as_array().unwrap();
    assert_eq!(locales.len(), 3);
    assert_eq!(locales[1]["locale"], "fr_FR");
    assert_eq!(locales[1]["segment"], "fr");
    assert_eq!(locales[1]["homepage_link"], "maison");
    assert_eq!(locales[0]["is_default"], true);
}

#[tokio::test]
async fn test_admin_decide_dry_run() {
    let server = admin_server();

    let (_, body) = admin_call(
        &server,
        "GET",
        "/admin/decide?path=/&accept_language=de-DE",
        Some(KEY),
    )
    .await;
    assert_eq!(body["decision"], "redirect");
    assert_eq!(body["target_path"], "/de/");
    assert_eq!(body["status"], 301);
    assert_eq!(body["preference"], "de");

    let (_, body) = admin_call(&server, "GET", "/admin/decide?path=/fr/maison/", Some(KEY)).await;
    assert_eq!(body["decision"], "redirect");
    assert_eq!(body["target_path"], "/fr/");

    let (_, body) = admin_call(&server, "GET", "/admin/decide?path=/&cookie=fr_FR", Some(KEY)).await;
    assert_eq!(body["target_path"], "/en/");
    assert_eq!(body["preference_cleared"], true);

    let (_, body) = admin_call(&server, "GET", "/admin/decide?path=/fr/", Some(KEY)).await;
    assert_eq!(body["decision"], "serve_content");
    assert_eq!(body["locale"], "fr_FR");
    assert_eq!(body["canonical_path_prefix"], "fr/maison/");

    // Dry runs are not counted as traffic
    assert_eq!(server.state().counters.summary().redirect, 0);
}

#[tokio::test]
async fn test_admin_reload_without_config_file() {
    let server = admin_server();
    let (status, body) = admin_call(&server, "POST", "/admin/reload", Some(KEY)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reloaded"], false);
}

#[tokio::test]
async fn test_admin_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("router.toml");
    std::fs::write(
        &path,
        r#"
[locales]
use_locale_url = true
default_locale = "en_US"
allowed_locales = ["en_US", "fr_FR"]

[admin]
enabled = true
api_key = "test-admin-key"
"#,
    )
    .unwrap();

    let config = locale_router::config::load_config(&path).unwrap();
    let server = HttpServer::with_config_path(config, Some(path.clone())).unwrap();

    std::fs::write(
        &path,
        r#"
[locales]
use_locale_url = true
use_dash_locale = true
default_locale = "fr_FR"
allowed_locales = ["en_US", "fr_FR"]

[admin]
enabled = true
api_key = "test-admin-key"
"#,
    )
    .unwrap();

    let (status, body) = admin_call(&server, "POST", "/admin/reload", Some(KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reloaded"], true);

    let (_, body) = admin_call(&server, "GET", "/admin/status", Some(KEY)).await;
    assert_eq!(body["style"], "locale_dash");
    assert_eq!(body["default_locale"], "fr_FR");

    std::fs::write(&path, "[locales]\nallowed_locales = []\n").unwrap();
    let (status, body) = admin_call(&server, "POST", "/admin/reload", Some(KEY)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, body) = admin_call(&server, "GET", "/admin/status", Some(KEY)).await;
    assert_eq!(body["default_locale"], "fr_FR");
}

#[tokio::test]
async fn test_live_server_with_upstream() {
    let upstream = common::start_echo_upstream().await;

    let mut config = multilingual_config(false, false);
    config.content.upstream = Some(upstream.to_string());

    let shutdown = Shutdown::new();
    let (updates_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config.clone()).unwrap();
    let state = server.state();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/fr/?ref=nav", addr))
        .send()
        .await
        .expect("router unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-language"], "fr-FR");
    assert!(res.headers()["set-cookie"].to_str().unwrap().starts_with("language=fr;"));
    assert_eq!(res.text().await.unwrap(), "path=/fr/maison/?ref=nav locale=fr_FR");

    let res = client
        .get(format!("http://{}/", addr))
        .header("accept-language", "de")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/de/");

    // Updates on the channel swap the snapshot
    let mut dead = config.clone();
    dead.content.upstream = Some(common::closed_port().await.to_string());
    updates_tx.send(dead).unwrap();
    let mut reloaded = false;
    for _ in 0..50 {
        if state.counters.summary().reloads == 1 {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(reloaded, "config update was not applied");

    let res = client.get(format!("http://{}/fr/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 502);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_live_server_forwards_encoded_page_paths() {
    let upstream = common::start_echo_upstream().await;

    let mut config = multilingual_config(false, false);
    config.content.upstream = Some(upstream.to_string());

    let shutdown = Shutdown::new();
    let (_updates_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let cases = [
        ("/fr/a-propos", "path=/fr/a-propos/ locale=fr_FR"),
        ("/fr/a%20propos", "path=/fr/a%20propos/ locale=fr_FR"),
        ("/fr/%C3%A9t%C3%A9", "path=/fr/%C3%A9t%C3%A9/ locale=fr_FR"),
    ];
    for (path, expected) in cases {
        let res = client
            .get(format!("http://{}{}", addr, path))
            .send()
            .await
            .expect("router unreachable");
        assert_eq!(res.status(), 200, "{}", path);
        assert_eq!(res.text().await.unwrap(), expected, "{}", path);
    }

    shutdown.trigger();
}
