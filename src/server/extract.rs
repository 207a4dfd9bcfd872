use crate::server::router::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use sceneview_paginate::PageWindow;
use std::borrow::Borrow;
use std::convert::Infallible;

/// Page window requested through the query string, plus what page links
/// need to point back at the same view.
///
/// Unparseable values fall back to the configured defaults.
#[derive(Debug, Clone)]
pub struct PageArgs {
    pub window: PageWindow,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl<S> FromRequestParts<S> for PageArgs
where
    S: Send + Sync + Borrow<AppState>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cfg = &state.borrow().config.pagination;

        let query: Vec<(String, String)> = parts
            .uri
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let lookup = |name: &str| {
            query
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        let window = PageWindow::from_params(
            lookup(&cfg.page_parameter),
            lookup(&cfg.per_page_parameter),
            cfg.per_page,
        );

        Ok(Self {
            window,
            path: parts.uri.path().to_string(),
            query,
        })
    }
}
