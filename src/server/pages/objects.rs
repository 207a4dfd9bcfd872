use crate::db::models::{ObjectAttribute, PersistentObject, format_timestamp};
use crate::error::ViewerError;
use crate::render::OBJECTS_TEMPLATE;
use crate::server::router::AppState;
use axum::{extract::State, http::Method, response::Html};
use minijinja::context;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ObjectView {
    id: String,
    captured_at: Option<String>,
    image_src: Option<String>,
    attributes: Vec<ObjectAttribute>,
}

impl From<PersistentObject> for ObjectView {
    fn from(object: PersistentObject) -> Self {
        Self {
            id: object.id,
            captured_at: object.timestamp.map(format_timestamp),
            image_src: object.image.map(|i| i.data_uri()),
            attributes: object.attributes,
        }
    }
}

/// Lists every persistent object; GET and POST answer with the same page.
pub(super) async fn objects_handler(
    method: Method,
    State(state): State<AppState>,
) -> Result<Html<String>, ViewerError> {
    let objects = state.store.persistent_objects().await?;
    debug!(method = %method, count = objects.len(), "Rendering persistent objects");

    let objects: Vec<ObjectView> = objects.into_iter().map(ObjectView::from).collect();
    let html = state
        .renderer
        .render(OBJECTS_TEMPLATE, context! { objects })?;
    Ok(Html(html))
}
