//! Mock HTTP tests for the WordPress publisher.
//!
//! These tests cover:
//! - The three-step upload/lookup/categorize sequence
//! - Soft-degrade on missing category and on categorization failures
//! - Hard failure on media-creation errors
//! - The fail-fast configuration precondition (zero network calls)

use snappress_core::error::AppError;
use snappress_core::publisher::{CATEGORY_SLUG, WordPressClient};
use snappress_core::settings::Settings;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("alice:s3cret")
const BASIC_AUTH: &str = "Basic YWxpY2U6czNjcmV0";

fn test_client(server: &MockServer) -> WordPressClient {
    WordPressClient::with_base_url(server.uri(), "alice".to_string(), "s3cret".to_string())
        .unwrap()
}

/// Writes an ASCII stand-in screenshot so multipart bodies stay UTF-8
/// matchable.
fn stage_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("screenshot-1700000000000.png");
    std::fs::write(&path, "fake png content").unwrap();
    path
}

async fn mount_upload_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "source_url": "https://blog.example.com/wp-content/uploads/shot.png"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn publish_runs_all_three_steps_in_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    mount_upload_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .and(query_param("slug", CATEGORY_SLUG))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 7}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media/42"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"categories": [7]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client(&server).publish(&file).await.unwrap();

    assert_eq!(
        outcome.media_url,
        "https://blog.example.com/wp-content/uploads/shot.png"
    );
    assert_eq!(outcome.warning, None);
}

#[tokio::test]
async fn upload_sends_multipart_file_field_with_filename() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"screenshot-1700000000000.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "source_url": "https://blog.example.com/u/shot.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let outcome = test_client(&server).publish(&file).await.unwrap();
    assert_eq!(outcome.media_url, "https://blog.example.com/u/shot.png");
}

#[tokio::test]
async fn missing_category_degrades_to_success_with_warning() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    mount_upload_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .and(query_param("slug", CATEGORY_SLUG))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client(&server).publish(&file).await.unwrap();

    assert_eq!(
        outcome.media_url,
        "https://blog.example.com/wp-content/uploads/shot.png"
    );
    let warning = outcome.warning.expect("warning should be set");
    assert!(warning.contains("category not found"), "got: {}", warning);
}

#[tokio::test]
async fn upload_failure_aborts_the_sequence() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database error"))
        .expect(1)
        .mount(&server)
        .await;

    // Neither the lookup nor the categorize call may happen
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_client(&server).publish(&file).await;

    match result {
        Err(AppError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("database error"));
        }
        other => panic!("expected Api error, got {:?}", other.map(|o| o.media_url)),
    }
}

#[tokio::test]
async fn category_lookup_failure_degrades_to_success_with_warning() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    mount_upload_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client(&server).publish(&file).await.unwrap();

    assert_eq!(
        outcome.media_url,
        "https://blog.example.com/wp-content/uploads/shot.png"
    );
    assert!(outcome.warning.is_some());
}

#[tokio::test]
async fn categorize_failure_degrades_to_success_with_warning() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = stage_file(&dir);

    mount_upload_success(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 7}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media/42"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_client(&server).publish(&file).await.unwrap();

    // The media item already exists remotely, so this is still a success
    assert_eq!(
        outcome.media_url,
        "https://blog.example.com/wp-content/uploads/shot.png"
    );
    let warning = outcome.warning.expect("warning should be set");
    assert!(
        warning.contains("categorization failed"),
        "got: {}",
        warning
    );
}

#[tokio::test]
async fn incomplete_settings_fail_before_any_network_call() {
    let server = MockServer::start().await;

    // Catch-all: the configuration failure must keep the wire silent
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settings = Settings {
        wordpress_url: server.uri(),
        wordpress_username: "alice".to_string(),
        wordpress_password: String::new(),
        save_directory: None,
    };

    let result = WordPressClient::from_settings(&settings);
    assert!(matches!(result, Err(AppError::Config(_))));

    server.verify().await;
}
