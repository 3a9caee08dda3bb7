//! TMDB provider against a mock HTTP server.

mod common;

use common::{arc, CallLog, ScriptedProvider};
use mockito::{Matcher, Server, ServerGuard};
use std::time::Duration;
use tokio_test::assert_ok;
use trailer_resolver::provider::{TmdbCatalog, TmdbProvider, TrailerProvider};
use trailer_resolver::types::TrailerKind;
use trailer_resolver::{ErrorKind, MediaRef, ResolverConfig, Source, TrailerResolver};

const TOKEN: &str = "test-token";

fn provider(server: &ServerGuard) -> TmdbProvider {
    TmdbProvider::with_base_url(&server.url(), TOKEN, Duration::from_secs(5)).unwrap()
}

fn fast_config() -> ResolverConfig {
    ResolverConfig::default()
        .with_base_delay(Duration::from_millis(10))
        .with_request_timeout(Duration::from_secs(5))
        .with_logging(false)
}

const MATRIX_SEARCH: &str = r#"{
    "page": 1,
    "results": [
        {"id": 624860, "title": "The Matrix Resurrections", "release_date": "2021-12-16"},
        {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}
    ]
}"#;

const MATRIX_RECORD: &str = r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}"#;

const MATRIX_VIDEOS: &str = r#"{
    "id": 603,
    "results": [
        {"key": "", "site": "YouTube", "type": "Trailer", "name": "broken"},
        {"key": "teaser01", "site": "YouTube", "type": "Teaser", "name": "Teaser"},
        {"key": "vKQi3bBA1y8", "site": "YouTube", "type": "Trailer", "name": "Official Trailer"}
    ]
}"#;

#[tokio::test]
async fn test_search_sends_title_year_and_bearer() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_header("authorization", "Bearer test-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "The Matrix".into()),
            Matcher::UrlEncoded("year".into(), "1999".into()),
            Matcher::UrlEncoded("include_adult".into(), "false".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_SEARCH)
        .expect(1)
        .create_async()
        .await;

    let candidates = assert_ok!(provider(&server).search("The Matrix", Some(1999)).await);

    search.assert_async().await;
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[1].id, "603");
    assert_eq!(candidates[1].year, Some(1999));
}

#[tokio::test]
async fn test_videos_skip_blank_keys_and_map_types() {
    let mut server = Server::new_async().await;
    let _videos = server
        .mock("GET", "/movie/603/videos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_VIDEOS)
        .create_async()
        .await;

    let listings = assert_ok!(provider(&server).list_trailers("603").await);

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].kind, TrailerKind::Teaser);
    assert_eq!(listings[1].locator, "vKQi3bBA1y8");
    assert_eq!(listings[1].kind, TrailerKind::Trailer);
    assert_eq!(listings[1].site.as_deref(), Some("YouTube"));
}

#[tokio::test]
async fn test_tv_catalog_uses_tv_endpoints() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/tv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "Dark".into()),
            Matcher::UrlEncoded("first_air_date_year".into(), "2017".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"results": [{"id": 70523, "name": "Dark", "first_air_date": "2017-12-01"}]}"#,
        )
        .create_async()
        .await;

    let tv = provider(&server).with_catalog(TmdbCatalog::Tv);
    let candidates = assert_ok!(tv.search("Dark", Some(2017)).await);

    search.assert_async().await;
    assert_eq!(tv.source(), Source::TMDB_TV);
    assert_eq!(candidates[0].title, "Dark");
    assert_eq!(candidates[0].year, Some(2017));
}

#[tokio::test]
async fn test_full_resolution_then_cache_hit() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(MATRIX_SEARCH)
        .expect(1)
        .create_async()
        .await;
    let record = server
        .mock("GET", "/movie/603")
        .with_status(200)
        .with_body(MATRIX_RECORD)
        .expect(1)
        .create_async()
        .await;
    let videos = server
        .mock("GET", "/movie/603/videos")
        .with_status(200)
        .with_body(MATRIX_VIDEOS)
        .expect(1)
        .create_async()
        .await;

    let resolver = TrailerResolver::builder()
        .config(fast_config())
        .with_provider(provider(&server))
        .build()
        .unwrap();
    let matrix = MediaRef::new("The Matrix").with_year(1999);

    let first = resolver.resolve(&matrix).await;
    assert!(first.success);
    assert_eq!(first.source, Some(Source::TMDB));
    assert_eq!(first.locator(), Some("vKQi3bBA1y8"));

    let second = resolver.resolve(&matrix).await;
    assert!(second.cached);
    assert_eq!(second.locator(), Some("vKQi3bBA1y8"));

    search.assert_async().await;
    record.assert_async().await;
    videos.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_is_not_retried_and_falls_back() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status_code": 7, "status_message": "Invalid API key"}"#)
        .expect(1)
        .create_async()
        .await;

    let calls = CallLog::new();
    let backup = arc(ScriptedProvider::found("backup", &calls));
    let resolver = TrailerResolver::builder()
        .config(fast_config())
        .with_provider(provider(&server))
        .with_shared_provider(backup.clone())
        .build()
        .unwrap();

    let result = resolver.resolve(&MediaRef::new("Heat").with_year(1995)).await;

    search.assert_async().await;
    assert!(result.success);
    assert_eq!(result.source, Some(Source::new("backup")));
    assert_eq!(result.attempts[0].source, Source::TMDB);
    assert_eq!(result.attempts[0].attempts, 1);
    assert_eq!(result.attempts[0].failure, Some(ErrorKind::Auth));
}

#[tokio::test]
async fn test_server_errors_exhaust_attempt_budget() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .expect(3)
        .create_async()
        .await;

    let resolver = TrailerResolver::builder()
        .config(fast_config())
        .with_provider(provider(&server))
        .build()
        .unwrap();

    let result = resolver.resolve(&MediaRef::new("Heat")).await;

    search.assert_async().await;
    assert!(!result.success);
    assert_eq!(result.attempts[0].attempts, 3);
    assert_eq!(result.attempts[0].failure, Some(ErrorKind::Upstream));
}

#[tokio::test]
async fn test_empty_search_is_not_found_after_one_call() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"page": 1, "results": []}"#)
        .expect(1)
        .create_async()
        .await;

    let resolver = TrailerResolver::builder()
        .config(fast_config())
        .with_provider(provider(&server))
        .build()
        .unwrap();

    let result = resolver.resolve(&MediaRef::new("Qwertyuiop")).await;

    search.assert_async().await;
    assert!(!result.success);
    assert_eq!(result.attempts[0].failure, Some(ErrorKind::NotFound));
    assert_eq!(result.attempts[0].attempts, 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_network_failure() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let resolver = TrailerResolver::builder()
        .config(fast_config().with_max_attempts(1))
        .with_provider(provider(&server))
        .build()
        .unwrap();

    let result = resolver.resolve(&MediaRef::new("Heat")).await;

    assert!(!result.success);
    assert_eq!(result.attempts[0].failure, Some(ErrorKind::Network));
}
