use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use search_core::IndexBuilder;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn tiny_app() -> Router {
    let mut b = IndexBuilder::new();
    b.add_document("doc0", Some("Rust Systems"), "rust is great rust systems programming");
    b.add_document("doc1", Some("Learning"), "learning rust");
    b.add_document("doc2", Some("Gardening"), "tomatoes and basil");
    search_server::build_app(b.finish())
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let (status, json) = call(tiny_app(), "/search?q=rust&k=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 2);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    // doc0: 2 occurrences + title bonus
    assert_eq!(arr[0]["doc_id"], 0);
    assert_eq!(arr[0]["score"], 4);
    assert_eq!(arr[1]["doc_id"], 1);
    assert_eq!(arr[1]["score"], 1);
}

#[tokio::test]
async fn k_truncates_but_total_counts_all() {
    let (_, json) = call(tiny_app(), "/search?q=rust&k=1").await;
    assert_eq!(json["total_hits"], 2);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn conjunctive_miss_is_empty_ok() {
    let (status, json) = call(tiny_app(), "/search?q=rust%20basil").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());

    let (status, json) = call(tiny_app(), "/search?q=the").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
}

#[tokio::test]
async fn doc_lookup_and_not_found() {
    let (status, json) = call(tiny_app(), "/doc/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Gardening");
    assert_eq!(json["external_id"], "doc2");

    let (status, _) = call(tiny_app(), "/doc/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_endpoint() {
    let (status, json) = call(tiny_app(), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["num_docs"], 3);
    assert!(json["built_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn serves_index_built_from_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("page.html"), "<title>Tomato Guide</title><p>growing tomatoes</p>").unwrap();
    let app = search_server::build_app_from_dir(dir.path()).unwrap();
    let (status, json) = call(app, "/search?q=tomatoes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["title"], "Tomato Guide");
}

#[tokio::test]
async fn missing_query_is_an_empty_search() {
    let (status, json) = call(tiny_app(), "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "");
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}
