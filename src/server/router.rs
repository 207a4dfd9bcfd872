use crate::config::Config;
use crate::db::StoreHandle;
use crate::error::ErrorDetail;
use crate::render::Renderer;
use crate::server::pages;

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode, Version, header},
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub renderer: Arc<Renderer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: StoreHandle, renderer: Renderer, config: Config) -> Self {
        Self {
            store,
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn index_handler() -> Redirect {
    Redirect::to("/scenes")
}

/// In debug posture, replaces the generic error page with one naming the failure.
async fn debug_error_page(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let resp = next.run(req).await;
    if !state.config.basic.debug {
        return resp;
    }
    let Some(ErrorDetail(detail)) = resp.extensions().get::<ErrorDetail>().cloned() else {
        return resp;
    };

    let (mut parts, body) = resp.into_parts();
    match state.renderer.render_error(&detail) {
        Ok(page) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(page))
        }
        Err(e) => {
            warn!(error = %e, "Failed to render debug error page");
            Response::from_parts(parts, body)
        }
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis();
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn sceneview_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .merge(pages::router())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            debug_error_page,
        ))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(access_log))
}
