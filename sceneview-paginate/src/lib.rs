//! Page windowing and pagination metadata for HTML list views.
//!
//! Layout:
//! - `window.rs`: request-derived page window and clamped slicing
//! - `settings.rs`: presentation settings resolved from configuration
//! - `pagination.rs`: metadata builder, page summary and link sequence
//! - `markup.rs`: link bar markup per CSS framework

pub mod pagination;
pub mod settings;
pub mod window;

mod markup;

pub use pagination::{PageLink, Pagination, PaginationOptions, get_pagination};
pub use settings::{CssFramework, PaginationSettings};
pub use window::PageWindow;
