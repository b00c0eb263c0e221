//! Page-number pagination shared by every list endpoint.
//!
//! Defaults live in a [`PaginationConfig`] value owned by the server
//! configuration. Each list call receives a [`PageRequest`] built from that
//! config and the caller's `?page=&limit=` parameters, and the repository
//! returns the total row count so a [`PageMeta`] can be derived.

use serde::Serialize;

/// Default page size when the caller omits `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Upper bound on `limit`.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Page size defaults, passed explicitly to every list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// A normalized, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Normalize user-supplied values: `page` floors at 1, `limit` is clamped
    /// to `1..=config.max_limit` and defaults to `config.default_limit`.
    pub fn new(page: Option<i64>, limit: Option<i64>, config: &PaginationConfig) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, config.default_limit, config.max_limit),
        }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Navigation metadata attached to every paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_docs: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl PageMeta {
    /// Derive navigation metadata for `request` over `total_docs` rows.
    ///
    /// An empty collection still reports one (empty) page.
    pub fn new(request: &PageRequest, total_docs: i64) -> Self {
        let total_docs = total_docs.max(0);
        let total_pages = ((total_docs + request.limit - 1) / request.limit).max(1);
        let has_next_page = request.page < total_pages;
        let has_prev_page = request.page > 1;

        Self {
            total_docs,
            total_pages,
            current_page: request.page,
            limit: request.limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then_some(request.page + 1),
            prev_page: has_prev_page.then_some(request.page - 1),
        }
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_docs: i64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_docs),
        }
    }

    /// Transform every item while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: i64, limit: i64) -> PageRequest {
        PageRequest::new(Some(page), Some(limit), &PaginationConfig::default())
    }

    #[test]
    fn defaults_apply_when_params_missing() {
        let req = PageRequest::new(None, None, &PaginationConfig::default());
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn config_supplies_its_own_defaults() {
        let config = PaginationConfig {
            default_limit: 25,
            max_limit: 50,
        };
        let req = PageRequest::new(None, Some(500), &config);
        assert_eq!(req.limit, 50);
        let req = PageRequest::new(None, None, &config);
        assert_eq!(req.limit, 25);
    }

    #[test]
    fn page_and_limit_are_floored() {
        let req = request(-3, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(request(3, 5).offset(), 10);
    }

    #[test]
    fn first_page_of_twelve() {
        let meta = PageMeta::new(&request(1, 5), 12);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);
        assert_eq!(meta.next_page, Some(2));
        assert_eq!(meta.prev_page, None);
    }

    #[test]
    fn last_page_of_twelve() {
        let meta = PageMeta::new(&request(3, 5), 12);
        assert_eq!(meta.current_page, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.prev_page, Some(2));
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        assert_eq!(PageMeta::new(&request(1, 5), 10).total_pages, 2);
    }

    #[test]
    fn empty_collection_reports_single_page() {
        let meta = PageMeta::new(&request(1, 10), 0);
        assert_eq!(meta.total_docs, 0);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let json = serde_json::to_value(PageMeta::new(&request(2, 5), 12)).unwrap();
        assert_eq!(json["totalDocs"], 12);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["prevPage"], 1);
    }

    #[test]
    fn map_keeps_meta() {
        let page = Page::new(vec![1, 2], &request(1, 5), 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.meta.total_docs, 2);
    }
}
