use crate::pagination::{PageLink, Pagination};
use crate::settings::CssFramework;

const PREV_LABEL: &str = "&laquo;";
const NEXT_LABEL: &str = "&raquo;";
const GAP_LABEL: &str = "&hellip;";

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn render_links(p: &Pagination) -> String {
    let fw = p.css_framework;
    let mut out = open(fw, &p.link_size);

    out.push_str(&match p.prev_page() {
        Some(prev) => link(fw, &p.page_href(prev), PREV_LABEL),
        None => disabled(fw, PREV_LABEL),
    });

    for entry in p.pages() {
        out.push_str(&match entry {
            PageLink::Page(n) if n == p.page => current(fw, n),
            PageLink::Page(n) => link(fw, &p.page_href(n), &n.to_string()),
            PageLink::Gap => gap(fw),
        });
    }

    out.push_str(&match p.next_page() {
        Some(next) => link(fw, &p.page_href(next), NEXT_LABEL),
        None => disabled(fw, NEXT_LABEL),
    });

    out.push_str(close(fw));
    out
}

fn size_class(link_size: &str) -> String {
    if link_size.is_empty() {
        String::new()
    } else {
        format!(" pagination-{}", escape_html(link_size))
    }
}

fn open(fw: CssFramework, link_size: &str) -> String {
    let size = size_class(link_size);
    match fw {
        CssFramework::Bootstrap2 => format!(r#"<div class="pagination{size}"><ul>"#),
        CssFramework::Bootstrap3 => format!(r#"<ul class="pagination{size}">"#),
        CssFramework::Bootstrap4 | CssFramework::Bootstrap5 => {
            format!(r#"<nav aria-label="pagination"><ul class="pagination{size}">"#)
        }
        CssFramework::Foundation => {
            r#"<ul class="pagination" role="navigation" aria-label="Pagination">"#.to_string()
        }
        CssFramework::Semantic => r#"<div class="ui pagination menu">"#.to_string(),
    }
}

fn close(fw: CssFramework) -> &'static str {
    match fw {
        CssFramework::Bootstrap2 => "</ul></div>",
        CssFramework::Bootstrap3 | CssFramework::Foundation => "</ul>",
        CssFramework::Bootstrap4 | CssFramework::Bootstrap5 => "</ul></nav>",
        CssFramework::Semantic => "</div>",
    }
}

fn current(fw: CssFramework, page: usize) -> String {
    match fw {
        CssFramework::Bootstrap2 => format!(r#"<li class="active"><a>{page}</a></li>"#),
        CssFramework::Bootstrap3 => format!(
            r#"<li class="active"><a>{page} <span class="sr-only">(current)</span></a></li>"#
        ),
        CssFramework::Bootstrap4 => format!(
            r#"<li class="page-item active" aria-current="page"><span class="page-link">{page} <span class="sr-only">(current)</span></span></li>"#
        ),
        CssFramework::Bootstrap5 => format!(
            r#"<li class="page-item active" aria-current="page"><span class="page-link">{page}</span></li>"#
        ),
        CssFramework::Foundation => format!(
            r#"<li class="current"><span class="show-for-sr">You're on page</span> {page}</li>"#
        ),
        CssFramework::Semantic => format!(r#"<a class="active item">{page}</a>"#),
    }
}

fn link(fw: CssFramework, href: &str, label: &str) -> String {
    let href = escape_html(href);
    match fw {
        CssFramework::Bootstrap2 | CssFramework::Bootstrap3 | CssFramework::Foundation => {
            format!(r#"<li><a href="{href}">{label}</a></li>"#)
        }
        CssFramework::Bootstrap4 | CssFramework::Bootstrap5 => {
            format!(r#"<li class="page-item"><a class="page-link" href="{href}">{label}</a></li>"#)
        }
        CssFramework::Semantic => format!(r#"<a class="item" href="{href}">{label}</a>"#),
    }
}

fn disabled(fw: CssFramework, label: &str) -> String {
    match fw {
        CssFramework::Bootstrap2 | CssFramework::Bootstrap3 => {
            format!(r#"<li class="disabled"><a>{label}</a></li>"#)
        }
        CssFramework::Bootstrap4 | CssFramework::Bootstrap5 => {
            format!(r#"<li class="page-item disabled"><span class="page-link">{label}</span></li>"#)
        }
        CssFramework::Foundation => format!(r#"<li class="disabled">{label}</li>"#),
        CssFramework::Semantic => format!(r#"<div class="disabled item">{label}</div>"#),
    }
}

fn gap(fw: CssFramework) -> String {
    match fw {
        CssFramework::Foundation => r#"<li class="ellipsis" aria-hidden="true"></li>"#.to_string(),
        _ => disabled(fw, GAP_LABEL),
    }
}
