use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS framework whose class names the link bar is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFramework {
    Bootstrap2,
    #[default]
    Bootstrap3,
    Bootstrap4,
    Bootstrap5,
    Foundation,
    Semantic,
}

impl CssFramework {
    pub fn as_str(self) -> &'static str {
        match self {
            CssFramework::Bootstrap2 => "bootstrap2",
            CssFramework::Bootstrap3 => "bootstrap3",
            CssFramework::Bootstrap4 => "bootstrap4",
            CssFramework::Bootstrap5 => "bootstrap5",
            CssFramework::Foundation => "foundation",
            CssFramework::Semantic => "semantic",
        }
    }
}

impl fmt::Display for CssFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation settings shared by every pagination built in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationSettings {
    pub css_framework: CssFramework,
    pub link_size: String,
    pub show_single_page: bool,
    pub page_parameter: String,
    pub per_page_parameter: String,
}

impl PaginationSettings {
    pub const DEFAULT_LINK_SIZE: &'static str = "sm";
    pub const DEFAULT_PAGE_PARAMETER: &'static str = "page";
    pub const DEFAULT_PER_PAGE_PARAMETER: &'static str = "per_page";
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            css_framework: CssFramework::default(),
            link_size: Self::DEFAULT_LINK_SIZE.to_string(),
            show_single_page: false,
            page_parameter: Self::DEFAULT_PAGE_PARAMETER.to_string(),
            per_page_parameter: Self::DEFAULT_PER_PAGE_PARAMETER.to_string(),
        }
    }
}
