//! Query parameter types for list endpoints.
//!
//! Pagination fields are declared inline on each struct: `serde(flatten)`
//! does not work with numeric fields under `serde_urlencoded`.

use internhub_core::pagination::PageRequest;
use serde::Deserialize;

/// Query parameters for `GET /internships`.
#[derive(Debug, Default, Deserialize)]
pub struct InternshipSearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl InternshipSearchParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

/// Query parameters for `GET /applications`.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ApplicationListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
