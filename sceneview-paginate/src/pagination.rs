use crate::markup::{self, escape_html};
use crate::settings::{CssFramework, PaginationSettings};
use serde::Serialize;

/// Pages shown on each side of the current page.
const INNER_WINDOW: usize = 2;
/// Pages always shown at each end of the link bar.
const OUTER_WINDOW: usize = 1;

pub const DEFAULT_RECORD_NAME: &str = "records";

/// Per-request inputs of [`get_pagination`].
#[derive(Debug, Clone, Default)]
pub struct PaginationOptions {
    pub page: usize,
    pub per_page: usize,
    /// Count of all records, not just the current window.
    pub total: usize,
    /// Defaults to `"records"`.
    pub record_name: Option<String>,
    pub format_total: bool,
    pub format_number: bool,
    /// Path that page links point at, e.g. `/scenes`.
    pub href: String,
    /// Query arguments carried over into page links.
    pub query: Vec<(String, String)>,
}

/// One entry of the link bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Presentation metadata for one rendered page of records.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub record_name: String,
    pub format_total: bool,
    pub format_number: bool,
    pub css_framework: CssFramework,
    pub link_size: String,
    pub show_single_page: bool,
    #[serde(skip)]
    href: String,
    #[serde(skip)]
    query: Vec<(String, String)>,
    #[serde(skip)]
    page_parameter: String,
    #[serde(skip)]
    per_page_parameter: String,
}

/// Builds pagination metadata from per-request options and process settings.
pub fn get_pagination(options: PaginationOptions, settings: &PaginationSettings) -> Pagination {
    let per_page = options.per_page.max(1);
    Pagination {
        page: options.page.max(1),
        per_page,
        total: options.total,
        total_pages: options.total.div_ceil(per_page),
        record_name: options
            .record_name
            .unwrap_or_else(|| DEFAULT_RECORD_NAME.to_string()),
        format_total: options.format_total,
        format_number: options.format_number,
        css_framework: settings.css_framework,
        link_size: settings.link_size.clone(),
        show_single_page: settings.show_single_page,
        href: options.href,
        query: options.query,
        page_parameter: settings.page_parameter.clone(),
        per_page_parameter: settings.per_page_parameter.clone(),
    }
}

impl Pagination {
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Past the end, the previous page is the last existing one.
    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev()
            .then(|| (self.page - 1).min(self.total_pages.max(1)))
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    /// Link target for `page`, keeping every other query argument. A page
    /// size argument is rewritten to the size actually in effect.
    pub fn page_href(&self, page: usize) -> String {
        let per_page = self.per_page.to_string();
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            if *key == self.page_parameter {
                continue;
            }
            if *key == self.per_page_parameter {
                query.append_pair(key, &per_page);
            } else {
                query.append_pair(key, value);
            }
        }
        query.append_pair(&self.page_parameter, &page.to_string());
        format!("{}?{}", self.href, query.finish())
    }

    /// Page numbers to draw, with gaps where pages are elided.
    pub fn pages(&self) -> Vec<PageLink> {
        let last = self.total_pages;
        if last == 0 {
            return Vec::new();
        }

        let span = 2 * INNER_WINDOW;
        let current = self.page.min(last);
        let to = (current.saturating_sub(INNER_WINDOW).max(1) + span).min(last);
        let from = to.saturating_sub(span).max(1);

        let mut shown: Vec<usize> = (1..=(OUTER_WINDOW + 1).min(last)).collect();
        shown.extend(from..=to);
        shown.extend(last.saturating_sub(OUTER_WINDOW).max(1)..=last);
        shown.sort_unstable();
        shown.dedup();

        let mut links = Vec::with_capacity(shown.len() + 2);
        let mut prev = 0;
        for page in shown {
            if prev != 0 && page == prev + 2 {
                // a gap marker would hide exactly one page
                links.push(PageLink::Page(prev + 1));
            } else if prev != 0 && page > prev + 2 {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(page));
            prev = page;
        }
        links
    }

    /// HTML summary of which records the page shows.
    pub fn info(&self) -> String {
        let record_name = escape_html(&self.record_name);
        let total = self.display_total();

        let body = if self.total == 0 {
            format!("No {record_name} found")
        } else if self.offset() >= self.total {
            format!("No {record_name} on page {}, in total <b>{total}</b>", self.page)
        } else {
            let start = self.offset() + 1;
            let end = (self.offset() + self.per_page).min(self.total);
            format!(
                "Displaying {record_name} <b>{} - {}</b> in total <b>{total}</b>",
                self.display_number(start),
                self.display_number(end),
            )
        };
        format!(r#"<div class="pagination-page-info">{body}</div>"#)
    }

    /// HTML link bar, empty for a single page unless `show_single_page` is set.
    pub fn links(&self) -> String {
        if self.total_pages <= 1 && !self.show_single_page {
            return String::new();
        }
        markup::render_links(self)
    }

    fn display_total(&self) -> String {
        if self.format_total {
            group_thousands(self.total)
        } else {
            self.total.to_string()
        }
    }

    fn display_number(&self, n: usize) -> String {
        if self.format_number {
            group_thousands(n)
        } else {
            n.to_string()
        }
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(page: usize, per_page: usize, total: usize) -> Pagination {
        get_pagination(
            PaginationOptions {
                page,
                per_page,
                total,
                href: "/scenes".to_string(),
                ..Default::default()
            },
            &PaginationSettings::default(),
        )
    }

    fn numbers(links: &[PageLink]) -> Vec<Option<usize>> {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page(n) => Some(*n),
                PageLink::Gap => None,
            })
            .collect()
    }

    #[test]
    fn record_name_defaults_to_records() {
        let p = build(1, 10, 3);
        assert_eq!(p.record_name, "records");
        assert_eq!(p.css_framework, CssFramework::Bootstrap3);
        assert_eq!(p.link_size, "sm");
        assert!(!p.show_single_page);
    }

    #[test]
    fn total_is_the_unsliced_count() {
        let p = build(2, 10, 25);
        assert_eq!(p.total, 25);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.prev_page(), Some(1));
        assert_eq!(p.next_page(), Some(3));
        assert!(p.info().contains("<b>11 - 20</b> in total <b>25</b>"));
    }

    #[test]
    fn empty_collection_reports_no_records() {
        let p = build(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(p.pages().is_empty());
        assert!(p.info().contains("No records found"));
        assert!(p.links().is_empty());
    }

    #[test]
    fn page_past_the_end_has_no_range() {
        let p = build(9, 10, 25);
        assert!(!p.has_next());
        assert!(p.info().contains("No records on page 9"));
    }

    #[test]
    fn previous_page_past_the_end_is_the_last_page() {
        assert_eq!(build(8, 10, 25).prev_page(), Some(3));
        assert_eq!(build(4, 10, 25).prev_page(), Some(3));
        assert_eq!(build(3, 10, 0).prev_page(), Some(1));
        assert_eq!(build(1, 10, 25).prev_page(), None);
    }

    #[test]
    fn numbers_are_grouped_when_formatting_is_requested() {
        let p = get_pagination(
            PaginationOptions {
                page: 101,
                per_page: 10,
                total: 1_234_567,
                record_name: Some("scenes".to_string()),
                format_total: true,
                format_number: true,
                ..Default::default()
            },
            &PaginationSettings::default(),
        );
        assert_eq!(
            p.info(),
            r#"<div class="pagination-page-info">Displaying scenes <b>1,001 - 1,010</b> in total <b>1,234,567</b></div>"#
        );
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
    }

    #[test]
    fn short_ranges_list_every_page() {
        assert_eq!(
            numbers(&build(1, 10, 40).pages()),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn long_ranges_elide_pages_around_the_window() {
        assert_eq!(
            numbers(&build(10, 1, 20).pages()),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(19),
                Some(20)
            ]
        );
        assert_eq!(
            numbers(&build(1, 1, 20).pages()),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(19), Some(20)]
        );
        assert_eq!(
            numbers(&build(20, 1, 20).pages()),
            vec![Some(1), Some(2), None, Some(16), Some(17), Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn single_hidden_page_is_shown_instead_of_a_gap() {
        assert_eq!(
            numbers(&build(6, 1, 10).pages()),
            (1..=10).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn page_href_replaces_only_the_page_argument() {
        let p = get_pagination(
            PaginationOptions {
                page: 2,
                per_page: 5,
                total: 30,
                href: "/scenes".to_string(),
                query: vec![
                    ("page".to_string(), "2".to_string()),
                    ("per_page".to_string(), "5".to_string()),
                    ("q".to_string(), "a b".to_string()),
                ],
                ..Default::default()
            },
            &PaginationSettings::default(),
        );
        assert_eq!(p.page_href(3), "/scenes?per_page=5&q=a+b&page=3");
    }

    #[test]
    fn page_href_carries_the_effective_page_size() {
        let settings = PaginationSettings {
            page_parameter: "p".to_string(),
            per_page_parameter: "n".to_string(),
            ..Default::default()
        };
        let p = get_pagination(
            PaginationOptions {
                page: 1,
                per_page: 10,
                total: 30,
                href: "/scenes".to_string(),
                query: vec![
                    ("n".to_string(), "-4".to_string()),
                    ("page".to_string(), "7".to_string()),
                ],
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(p.page_href(2), "/scenes?n=10&page=7&p=2");
    }

    #[test]
    fn serializes_presentational_fields_only() {
        let value = serde_json::to_value(build(1, 10, 5)).unwrap();
        assert_eq!(value["total"], 5);
        assert_eq!(value["css_framework"], "bootstrap3");
        assert!(value.get("href").is_none());
    }
}
