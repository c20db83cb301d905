//! Shared query parameter types for API handlers.

use bookshelf_core::pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

/// Page-number pagination (`?page_number=&page_size=`).
///
/// Missing values fall back to page 1 of size 10. Range checks happen in
/// `PageRequest::new`, not here.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
