use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rulebook::server::routes::route_request;

fn temp_data_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("rulebook-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp data dir should be creatable");
    dir
}

fn write_source(dir: &PathBuf, source_id: &str, content: &str) {
    fs::write(dir.join(source_id), content).expect("source file should be writable");
}

#[tokio::test]
async fn health_endpoint_returns_ok_json() {
    let dir = temp_data_dir("health");
    let response = route_request("GET", "/api/health", &dir).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[tokio::test]
async fn sources_endpoint_lists_the_registry() {
    let dir = temp_data_dir("sources");
    let response = route_request("GET", "/api/sources", &dir).await;

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let sources = payload["sources"].as_array().expect("sources should be an array");
    assert_eq!(sources.len(), 8);
    assert_eq!(sources[0]["id"], "basics.csv");
    assert_eq!(sources[0]["label"], "基本ルール");
}

#[tokio::test]
async fn browse_endpoint_renders_cards_for_one_source() {
    let dir = temp_data_dir("browse");
    write_source(
        &dir,
        "terms.csv",
        "用語名,解説\nターン,一巡。\nコスト,(1)は結晶1個。\n",
    );

    let response = route_request("GET", "/api/browse?source=terms.csv", &dir).await;

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["source"], "terms.csv");
    assert_eq!(payload["label"], "用語集");
    assert_eq!(payload["count"], 2);

    let cards = payload["cards"].as_array().expect("cards should be an array");
    assert_eq!(cards[0]["title"], "ターン");
    assert!(
        cards[1]["body_html"]
            .as_str()
            .expect("body should be a string")
            .contains("./icons/1.svg")
    );
    // Scoped browse carries no category tags.
    assert!(cards[0].get("category_tag").is_none());
}

#[tokio::test]
async fn browse_endpoint_404_names_the_missing_source() {
    let dir = temp_data_dir("browse-missing");
    let response = route_request("GET", "/api/browse?source=ghost.csv", &dir).await;

    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("ghost.csv"), "{}", response.body);
}

#[tokio::test]
async fn browse_endpoint_requires_the_source_parameter() {
    let dir = temp_data_dir("browse-noparam");
    let response = route_request("GET", "/api/browse", &dir).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("source"));
}

#[tokio::test]
async fn search_endpoint_decodes_the_query_and_tags_categories() {
    let dir = temp_data_dir("search");
    write_source(&dir, "terms.csv", "用語名,解説\nターン,説明A\n");
    write_source(&dir, "counters.csv", "カウンター名,解説\nターン数,説明B\n");

    // "ターン", percent-encoded the way the page sends it.
    let response =
        route_request("GET", "/api/search?q=%E3%82%BF%E3%83%BC%E3%83%B3", &dir).await;

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["query"], "ターン");
    assert_eq!(payload["count"], 2);

    let cards = payload["cards"].as_array().expect("cards should be an array");
    let mut tags: Vec<&str> = cards
        .iter()
        .map(|card| card["category_tag"].as_str().expect("tagged"))
        .collect();
    tags.sort_unstable();
    assert_eq!(tags, ["カウンター", "用語集"]);
}

#[tokio::test]
async fn search_endpoint_blank_query_returns_an_empty_list() {
    let dir = temp_data_dir("search-blank");
    let response = route_request("GET", "/api/search?q=", &dir).await;

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["count"], 0);
    assert_eq!(payload["cards"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn data_dir_sources_are_served_to_the_page() {
    let dir = temp_data_dir("static-data");
    write_source(&dir, "terms.csv", "用語名,解説\nターン,一巡。\n");

    let response = route_request("GET", "/data/terms.csv", &dir).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "text/csv; charset=utf-8");
    assert!(response.body.contains("ターン"));
}

#[tokio::test]
async fn missing_data_file_falls_through_to_not_found() {
    let dir = temp_data_dir("static-data-missing");
    let response = route_request("GET", "/data/ghost.csv", &dir).await;
    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let dir = temp_data_dir("unknown");
    let response = route_request("GET", "/api/unknown", &dir).await;
    assert_eq!(response.status_code, 404);
}
