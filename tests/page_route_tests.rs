use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use sceneview::ViewerError;
use sceneview::config::Config;
use sceneview::db::{
    self, EncodedImage, MemorySource, ObjectAttribute, PersistentObject, SceneImage, SceneSource,
    Timestamp,
};
use sceneview::render::Renderer;
use sceneview::server::{AppState, sceneview_router};
use std::sync::Arc;
use tower::ServiceExt;

const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn scenes(count: usize) -> Vec<SceneImage> {
    (0..count)
        .map(|i| SceneImage {
            timestamp: 1_000 + i as Timestamp,
            image: EncodedImage::from_bytes(&JPEG),
        })
        .collect()
}

async fn app_with(source: Arc<dyn SceneSource>, cfg: Config) -> Router {
    let store = db::spawn(source).await.expect("spawn store");
    let renderer = Renderer::embedded().expect("embedded templates");
    sceneview_router(AppState::new(store, renderer, cfg))
}

async fn app(scene_count: usize, objects: Vec<PersistentObject>) -> Router {
    app_with(
        Arc::new(MemorySource::new(scenes(scene_count), objects)),
        Config::default(),
    )
    .await
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (
        status,
        String::from_utf8(body.to_vec()).expect("response body was not utf-8"),
    )
}

fn shown_timestamps(body: &str) -> Vec<Timestamp> {
    body.split("<td><code>")
        .skip(1)
        .filter_map(|rest| rest.split("</code>").next())
        .filter_map(|ts| ts.parse().ok())
        .collect()
}

#[tokio::test]
async fn second_page_shows_records_ten_to_nineteen() {
    let app = app(25, Vec::new()).await;

    let (status, body) = send(&app, "GET", "/scenes?page=2&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown_timestamps(&body), (1_010..1_020).collect::<Vec<_>>());
    assert!(body.contains("Displaying scenes <b>11 - 20</b> in total <b>25</b>"));
    assert!(body.contains(r#"<ul class="pagination pagination-sm">"#));
    assert!(body.contains("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn short_collection_fits_on_the_first_page() {
    let app = app(5, Vec::new()).await;

    let (status, body) = send(&app, "POST", "/scenes?page=1&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown_timestamps(&body), (1_000..1_005).collect::<Vec<_>>());
    // one page and show_single_page unset: no link bar
    assert!(!body.contains(r#"<ul class="pagination"#));
}

#[tokio::test]
async fn empty_store_renders_an_empty_page() {
    let app = app(0, Vec::new()).await;

    let (status, body) = send(&app, "GET", "/scenes").await;
    assert_eq!(status, StatusCode::OK);
    assert!(shown_timestamps(&body).is_empty());
    assert!(body.contains("No scenes found"));
    assert!(body.contains("No scenes stored."));
}

#[tokio::test]
async fn malformed_and_out_of_range_paging_does_not_fail() {
    let app = app(25, Vec::new()).await;

    let (status, body) = send(&app, "GET", "/scenes?page=abc&per_page=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown_timestamps(&body), (1_000..1_010).collect::<Vec<_>>());

    let (status, body) = send(&app, "GET", "/scenes?page=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown_timestamps(&body).len(), 10);

    let (status, body) = send(&app, "GET", "/scenes?page=99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(shown_timestamps(&body).is_empty());
    assert!(body.contains("in total <b>25</b>"));
}

#[tokio::test]
async fn configured_page_size_and_framework_are_used() {
    let mut cfg = Config::default();
    cfg.pagination.per_page = 4;
    cfg.pagination.css_framework = Some(sceneview_paginate::CssFramework::Bootstrap5);
    cfg.pagination.link_size = Some(String::new());
    let app = app_with(Arc::new(MemorySource::new(scenes(9), Vec::new())), cfg).await;

    let (status, body) = send(&app, "GET", "/scenes?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown_timestamps(&body), vec![1_008]);
    assert!(body.contains(r#"<nav aria-label="pagination"><ul class="pagination">"#));
    assert!(body.contains(r#"href="/scenes?page=2""#));
}

fn cup() -> PersistentObject {
    PersistentObject {
        id: "obj-1".to_string(),
        timestamp: Some(1_500_000_000_000_000_000),
        image: Some(EncodedImage::from_bytes(&JPEG)),
        attributes: vec![ObjectAttribute {
            name: "class".to_string(),
            value: "Cup".to_string(),
        }],
    }
}

#[tokio::test]
async fn object_list_answers_get_and_post() {
    let app = app(0, vec![cup()]).await;

    for method in ["GET", "POST"] {
        let (status, body) = send(&app, method, "/objects").await;
        assert_eq!(status, StatusCode::OK, "{method}");
        assert!(body.contains("<code>obj-1</code>"));
        assert!(body.contains("<dt>class</dt><dd>Cup</dd>"));
        assert!(body.contains("2017-07-14 02:40:00.000 UTC"));
    }
}

#[tokio::test]
async fn root_redirects_and_unknown_paths_are_not_found() {
    let app = app(0, Vec::new()).await;

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/scenes");
    assert!(resp.headers().contains_key("x-request-id"));

    let (status, _) = send(&app, "GET", "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

struct UnreachableSource;

#[async_trait]
impl SceneSource for UnreachableSource {
    async fn timestamps(&self) -> Result<Vec<Timestamp>, ViewerError> {
        Err(ViewerError::DocumentError("database unreachable".to_string()))
    }

    async fn scene_images(&self, _: &[Timestamp]) -> Result<Vec<SceneImage>, ViewerError> {
        Err(ViewerError::DocumentError("database unreachable".to_string()))
    }

    async fn persistent_objects(&self) -> Result<Vec<PersistentObject>, ViewerError> {
        Err(ViewerError::DocumentError("database unreachable".to_string()))
    }
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let app = app_with(Arc::new(UnreachableSource), Config::default()).await;
    let (status, body) = send(&app, "GET", "/scenes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // debug posture is on by default
    assert!(body.contains("database unreachable"));

    let mut cfg = Config::default();
    cfg.basic.debug = false;
    let app = app_with(Arc::new(UnreachableSource), cfg).await;
    let (status, body) = send(&app, "POST", "/objects").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("database unreachable"));
    assert!(body.contains("Internal Server Error"));
}
