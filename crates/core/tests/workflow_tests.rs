//! End-to-end workflow tests, headless.
//!
//! The selection overlay and the live screen grab need a display, so
//! these tests exercise the chain from drag geometry to published URL
//! with a generated payload standing in for the grabbed frame: bounds
//! from a drag, a raster of exactly those dimensions, the persisted
//! file, and the full three-call publish sequence against a mock
//! server.

use image::DynamicImage;
use snappress_core::bounds::Bounds;
use snappress_core::capture::ScreenshotPayload;
use snappress_core::persist::ScreenshotPersister;
use snappress_core::publisher::WordPressClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SOURCE_URL: &str = "https://blog.example.com/wp-content/uploads/drag.png";

fn client(server: &MockServer) -> WordPressClient {
    WordPressClient::with_base_url(server.uri(), "alice".to_string(), "s3cret".to_string())
        .unwrap()
}

async fn mount_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "source_url": SOURCE_URL
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn drag_to_published_url() {
    // Drag from (100,100) to (300,250)
    let bounds = Bounds::from_corners((100.0, 100.0), (300.0, 250.0));
    assert_eq!(bounds, Bounds::new(100, 100, 200, 150));

    // A frame grab of those bounds yields a raster of exactly that size
    let payload =
        ScreenshotPayload::encode(&DynamicImage::new_rgba8(bounds.width, bounds.height)).unwrap();
    assert_eq!((payload.width(), payload.height()), (200, 150));

    let dir = tempfile::tempdir().unwrap();
    let shot = ScreenshotPersister::new(dir.path())
        .persist(payload)
        .await
        .unwrap();
    assert!(
        shot.path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("screenshot-")
    );

    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .and(query_param("slug", "snappress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 7}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/media/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).publish(&shot.path).await.unwrap();

    // This URL is what ends up on the clipboard
    assert_eq!(outcome.media_url, SOURCE_URL);
    assert_eq!(outcome.warning, None);
}

#[tokio::test]
async fn drag_to_published_url_without_category() {
    let bounds = Bounds::from_corners((300.0, 250.0), (100.0, 100.0));
    assert_eq!(bounds, Bounds::new(100, 100, 200, 150));

    let payload =
        ScreenshotPayload::encode(&DynamicImage::new_rgba8(bounds.width, bounds.height)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let shot = ScreenshotPersister::new(dir.path())
        .persist(payload)
        .await
        .unwrap();

    let server = MockServer::start().await;
    mount_upload(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).publish(&shot.path).await.unwrap();

    // Still a success: the media URL is set and the miss is a warning
    assert_eq!(outcome.media_url, SOURCE_URL);
    assert!(outcome.warning.is_some());
}
