//! Pagination DTOs
//!
//! Query parameters accepted by every `/search` endpoint and the page
//! envelope they return, including the navigation links.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query string of a search request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub page_number: i64,
    pub page_size: i64,
    pub order_by: String,
    pub descending: bool,
    pub search_term: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: "Id".to_string(),
            descending: false,
            search_term: String::new(),
        }
    }
}

impl SearchParams {
    /// Clamps page number and size into a usable range
    pub fn normalize(mut self) -> Self {
        if self.page_number < 1 {
            self.page_number = 1;
        }
        if self.page_size < 1 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self.page_size = self.page_size.min(MAX_PAGE_SIZE);
        self
    }

    fn href(&self, base_path: &str, page_number: i64) -> String {
        let mut href = format!(
            "{}?pageNumber={}&pageSize={}&orderBy={}&descending={}",
            base_path,
            page_number,
            self.page_size,
            urlencoding::encode(&self.order_by),
            self.descending
        );
        if !self.search_term.trim().is_empty() {
            href.push_str("&searchTerm=");
            href.push_str(&urlencoding::encode(&self.search_term));
        }
        href
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: String,
}

impl Link {
    fn get(rel: &str, href: String) -> Self {
        Self {
            rel: rel.to_string(),
            href,
            method: "GET".to_string(),
        }
    }
}

/// Page envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub links: Vec<Link>,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, page_number: i64, page_size: i64) -> Self {
        let total_pages = total_pages(total_count, page_size);
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_next_page: page_number < total_pages,
            has_previous_page: page_number > 1,
            links: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            links: self.links,
        }
    }

    /// Fills `links` for a page served from `base_path`.
    ///
    /// `self` and `first` are always present; `next`, `previous` and `last`
    /// depend on where the page sits.
    pub fn with_links(mut self, base_path: &str, params: &SearchParams) -> Self {
        let mut links = vec![
            Link::get("self", params.href(base_path, self.page_number)),
            Link::get("first", params.href(base_path, 1)),
        ];

        if self.has_next_page {
            links.push(Link::get("next", params.href(base_path, self.page_number + 1)));
        }

        if self.has_previous_page {
            links.push(Link::get("previous", params.href(base_path, self.page_number - 1)));
        }

        if self.total_pages > 0 {
            links.push(Link::get("last", params.href(base_path, self.total_pages)));
        }

        self.links = links;
        self
    }
}

/// ceil(total / page_size); zero when there is nothing to show
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if page_size <= 0 || total_count <= 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}
