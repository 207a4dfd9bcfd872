use sceneview_paginate::{CssFramework, PaginationSettings};
use serde::{Deserialize, Serialize};

/// Pagination presentation settings.
///
/// Keys are matched case-insensitively by the config loader, so the
/// upper-case spelling (`CSS_FRAMEWORK`, `LINK_SIZE`, `SHOW_SINGLE_PAGE`) is
/// accepted too. Unset entries resolve to the fallbacks in
/// [`PaginationConfig::settings`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// TOML: `pagination.css_framework`. Fallback: `bootstrap3`.
    #[serde(default)]
    pub css_framework: Option<CssFramework>,

    /// TOML: `pagination.link_size`. Fallback: `sm`.
    #[serde(default)]
    pub link_size: Option<String>,

    /// TOML: `pagination.show_single_page`. Fallback: `false`.
    #[serde(default)]
    pub show_single_page: Option<bool>,

    /// Page size when the request does not name one.
    /// TOML: `pagination.per_page`. Default: `10`.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// TOML: `pagination.page_parameter`. Default: `page`.
    #[serde(default = "default_page_parameter")]
    pub page_parameter: String,

    /// TOML: `pagination.per_page_parameter`. Default: `per_page`.
    #[serde(default = "default_per_page_parameter")]
    pub per_page_parameter: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            css_framework: None,
            link_size: None,
            show_single_page: None,
            per_page: default_per_page(),
            page_parameter: default_page_parameter(),
            per_page_parameter: default_per_page_parameter(),
        }
    }
}

impl PaginationConfig {
    /// Resolves unset entries to their fallbacks.
    pub fn settings(&self) -> PaginationSettings {
        PaginationSettings {
            css_framework: self.css_framework.unwrap_or_default(),
            link_size: self
                .link_size
                .clone()
                .unwrap_or_else(|| PaginationSettings::DEFAULT_LINK_SIZE.to_string()),
            show_single_page: self.show_single_page.unwrap_or(false),
            page_parameter: self.page_parameter.clone(),
            per_page_parameter: self.per_page_parameter.clone(),
        }
    }
}

fn default_per_page() -> usize {
    10
}

fn default_page_parameter() -> String {
    PaginationSettings::DEFAULT_PAGE_PARAMETER.to_string()
}

fn default_per_page_parameter() -> String {
    PaginationSettings::DEFAULT_PER_PAGE_PARAMETER.to_string()
}
