use crate::db::models::{SceneImage, Timestamp, format_timestamp};
use crate::error::ViewerError;
use crate::render::SCENES_TEMPLATE;
use crate::server::extract::PageArgs;
use crate::server::router::AppState;
use axum::{extract::State, response::Html};
use minijinja::context;
use sceneview_paginate::{PaginationOptions, get_pagination};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

const RECORD_NAME: &str = "scenes";

#[derive(Debug, Serialize)]
struct SceneView {
    timestamp: Timestamp,
    captured_at: String,
    image_src: Option<String>,
}

fn scene_views(window: &[Timestamp], images: Vec<SceneImage>) -> Vec<SceneView> {
    let mut by_timestamp: HashMap<Timestamp, SceneImage> =
        images.into_iter().map(|s| (s.timestamp, s)).collect();
    window
        .iter()
        .map(|ts| SceneView {
            timestamp: *ts,
            captured_at: format_timestamp(*ts),
            image_src: by_timestamp.remove(ts).map(|s| s.image.data_uri()),
        })
        .collect()
}

pub(super) async fn scenes_handler(
    State(state): State<AppState>,
    args: PageArgs,
) -> Result<Html<String>, ViewerError> {
    let timestamps = state.store.timestamps().await?;
    let total = timestamps.len();
    let window = args.window.slice(&timestamps).to_vec();
    let images = state.store.scene_images(window.clone()).await?;

    debug!(
        page = args.window.page,
        per_page = args.window.per_page,
        total,
        shown = window.len(),
        "Rendering scene window"
    );

    let pagination = get_pagination(
        PaginationOptions {
            page: args.window.page,
            per_page: args.window.per_page,
            total,
            record_name: Some(RECORD_NAME.to_string()),
            format_total: true,
            format_number: true,
            href: args.path,
            query: args.query,
        },
        &state.config.pagination.settings(),
    );

    let scenes = scene_views(&window, images);
    let html = state.renderer.render(
        SCENES_TEMPLATE,
        context! {
            timestamps => window,
            scenes,
            page => pagination.page,
            per_page => pagination.per_page,
            pagination_info => pagination.info(),
            pagination_links => pagination.links(),
            pagination,
        },
    )?;
    Ok(Html(html))
}
