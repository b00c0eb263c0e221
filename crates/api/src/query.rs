//! Shared query parameter types for list endpoints.

use ems_core::pagination::{PageRequest, PaginationConfig};
use ems_core::search::normalize_search;
use serde::Deserialize;

/// `?page=&limit=&search=` accepted by every paginated endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    /// Normalize page/limit against the server's pagination config.
    pub fn page_request(&self, config: &PaginationConfig) -> PageRequest {
        PageRequest::new(self.page, self.limit, config)
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }
}
