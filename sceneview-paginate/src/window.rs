use serde::Serialize;

/// The contiguous range of records requested for one page.
///
/// `page` and `per_page` are always at least 1. The record range is
/// `[(page - 1) * per_page, page * per_page)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: usize,
    pub per_page: usize,
}

impl PageWindow {
    pub const DEFAULT_PAGE: usize = 1;

    /// Zero values are raised to 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Builds a window from raw request parameter values.
    ///
    /// Anything that is not a positive integer falls back to the default.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>, default_per_page: usize) -> Self {
        let page = parse_positive(page).unwrap_or(Self::DEFAULT_PAGE);
        let per_page = parse_positive(per_page).unwrap_or(default_per_page);
        Self::new(page, per_page)
    }

    pub fn offset(&self) -> usize {
        self.begin()
    }

    pub fn begin(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn end(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }

    /// Returns the part of `items` covered by this window, possibly empty.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end().min(items.len());
        let begin = self.begin().min(end);
        &items[begin..end]
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}
