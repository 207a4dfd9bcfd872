pub mod extract;
pub mod pages;
pub mod router;

pub use router::{AppState, sceneview_router};
