mod viewer;

pub use viewer::{ErrorDetail, ViewerError};
