//! End-to-end routing through the axum router, one request per test.

use axum::http::{header, StatusCode};
use axum::Router;

use locale_router::http::HttpServer;
use locale_router::routing::NOT_FOUND_MESSAGE;

mod common;

use common::{get, multilingual_config};

fn lang_router() -> Router {
    HttpServer::new(multilingual_config(false, false)).unwrap().router()
}

fn locale_router() -> Router {
    HttpServer::new(multilingual_config(true, false)).unwrap().router()
}

fn dash_router() -> Router {
    HttpServer::new(multilingual_config(true, true)).unwrap().router()
}

#[tokio::test]
async fn test_root_without_hints_redirects_to_default() {
    let res = get(&lang_router(), "/", &[]).await;
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/en/"));
    assert!(res.set_cookie().is_none());
}

#[tokio::test]
async fn test_root_follows_accept_language() {
    let res = get(&lang_router(), "/", &[("accept-language", "fr-FR,fr;q=0.9,en;q=0.5")]).await;
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/fr/"));
    assert!(res.set_cookie().unwrap().starts_with("language=fr;"));
}

#[tokio::test]
async fn test_root_respects_priority() {
    let res = get(&lang_router(), "/", &[("accept-language", "fr;q=0.2, de;q=0.8")]).await;
    assert_eq!(res.location(), Some("/de/"));
}

#[tokio::test]
async fn test_root_prefers_cookie_over_header() {
    let res = get(
        &lang_router(),
        "/",
        &[("cookie", "theme=dark; language=de"), ("accept-language", "fr")],
    )
    .await;
    assert_eq!(res.location(), Some("/de/"));
    assert!(res.set_cookie().unwrap().starts_with("language=de;"));
}

#[tokio::test]
async fn test_root_clears_stale_cookie() {
    // Locale-style value left over from before a style change
    let res = get(&lang_router(), "/", &[("cookie", "language=fr_FR")]).await;
    assert_eq!(res.location(), Some("/en/"));
    let cookie = res.set_cookie().unwrap();
    assert!(cookie.starts_with("language=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_root_ignores_unserved_accept_language() {
    let res = get(&lang_router(), "/", &[("accept-language", "ja-JP, zh;q=0.5")]).await;
    assert_eq!(res.location(), Some("/en/"));
}

#[tokio::test]
async fn test_lang_segment_serves_homepage() {
    let res = get(&lang_router(), "/fr/", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: fr_FR\npath: /fr/maison/\n");
    assert_eq!(res.headers[header::CONTENT_LANGUAGE], "fr-FR");
    assert_eq!(res.headers["x-locale"], "fr_FR");
    assert!(res.set_cookie().unwrap().starts_with("language=fr;"));
}

#[tokio::test]
async fn test_lang_segment_without_trailing_slash() {
    let res = get(&lang_router(), "/en", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: en_US\npath: /en/home/\n");
}

#[tokio::test]
async fn test_lang_segment_not_served_redirects_to_default() {
    let res = get(&lang_router(), "/es/", &[]).await;
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/en/"));
}

#[tokio::test]
async fn test_lang_segment_unknown_is_not_found() {
    let res = get(&lang_router(), "/zz/", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_lang_style_rejects_locale_segments() {
    for path in ["/en_US/", "/fr-fr/"] {
        let res = get(&lang_router(), path, &[]).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{}", path);
        assert!(res.set_cookie().is_none(), "{}", path);
    }
}

#[tokio::test]
async fn test_locale_style() {
    let router = locale_router();

    let res = get(&router, "/", &[]).await;
    assert_eq!(res.location(), Some("/en_US/"));

    let res = get(&router, "/fr_FR/", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: fr_FR\npath: /fr_FR/maison/\n");

    let res = get(&router, "/fr/", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = get(&router, "/fr_fr/", &[]).await;
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/en_US/"));
}

#[tokio::test]
async fn test_locale_dash_style() {
    let router = dash_router();

    let res = get(&router, "/", &[("accept-language", "de")]).await;
    assert_eq!(res.location(), Some("/de-de/"));
    assert!(res.set_cookie().unwrap().starts_with("language=de-de;"));

    let res = get(&router, "/fr-fr/", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: fr_FR\npath: /fr-fr/maison/\n");

    for path in ["/fr-FR/", "/fr_FR/", "/fr/"] {
        let res = get(&router, path, &[]).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_homepage_link_redirects_to_language_root() {
    let res = get(&lang_router(), "/fr/maison/", &[]).await;
    assert_eq!(res.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.location(), Some("/fr/"));
}

#[tokio::test]
async fn test_page_below_language_is_served() {
    let res = get(&lang_router(), "/fr/about/team/", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: fr_FR\npath: /fr/about/team/\n");
    // Only the root handler records the preference
    assert!(res.set_cookie().is_none());
}

#[tokio::test]
async fn test_other_locales_homepage_link_is_a_normal_page() {
    let res = get(&lang_router(), "/fr/home/", &[]).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "locale: fr_FR\npath: /fr/home/\n");
}

#[tokio::test]
async fn test_bootstrap_redirect_when_content_not_ready() {
    let mut config = multilingual_config(false, false);
    config.content.ready = false;
    let router = HttpServer::new(config).unwrap().router();

    let res = get(&router, "/fr/?x=1", &[]).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location(), Some("/dev/build?returnURL=%2Ffr%2F%3Fx%3D1"));
    assert!(res.set_cookie().unwrap().starts_with("language=fr;"));

    // Malformed segments are still rejected first
    let res = get(&router, "/zz/", &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_base_url_prefixes_redirects() {
    let mut config = multilingual_config(false, false);
    config.content.base_url = "/site/".into();
    let router = HttpServer::new(config).unwrap().router();

    let res = get(&router, "/", &[("accept-language", "fr")]).await;
    assert_eq!(res.location(), Some("/site/fr/"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let res = get(&lang_router(), "/", &[("x-request-id", "abc-123")]).await;
    assert_eq!(res.headers["x-request-id"], "abc-123");

    let res = get(&lang_router(), "/", &[]).await;
    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_reload_switches_style() {
    let server = HttpServer::new(multilingual_config(false, false)).unwrap();
    let router = server.router();

    assert_eq!(get(&router, "/", &[]).await.location(), Some("/en/"));

    server.state().reload(multilingual_config(true, true)).unwrap();
    assert_eq!(get(&router, "/", &[]).await.location(), Some("/en-us/"));
    assert_eq!(server.state().counters.summary().reloads, 1);
}

#[tokio::test]
async fn test_invalid_reload_keeps_previous_snapshot() {
    let server = HttpServer::new(multilingual_config(false, false)).unwrap();
    let router = server.router();

    let mut bad = multilingual_config(true, false);
    bad.locales.default_locale = "it_IT".into();
    assert!(server.state().reload(bad).is_err());

    assert_eq!(get(&router, "/", &[]).await.location(), Some("/en/"));
    assert_eq!(server.state().counters.summary().reloads, 0);
}
