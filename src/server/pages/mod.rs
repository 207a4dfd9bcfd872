use crate::server::router::AppState;
use axum::{Router, routing::get};

pub mod objects;
pub mod scenes;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/scenes",
            get(scenes::scenes_handler).post(scenes::scenes_handler),
        )
        .route(
            "/objects",
            get(objects::objects_handler).post(objects::objects_handler),
        )
}
