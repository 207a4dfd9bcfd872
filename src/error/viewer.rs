use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum ViewerError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("Malformed document: {0}")]
    DocumentError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] figment::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

/// Failure message attached to error responses, rendered only in debug posture.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

pub(crate) const INTERNAL_ERROR_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>500 Internal Server Error</title></head>\n<body><h1>Internal Server Error</h1><p>The server encountered an internal error and was unable to complete your request.</p></body></html>\n";

impl IntoResponse for ViewerError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self, "Request failed");
        let mut resp = (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_ERROR_PAGE)).into_response();
        resp.extensions_mut().insert(ErrorDetail(self.to_string()));
        resp
    }
}
