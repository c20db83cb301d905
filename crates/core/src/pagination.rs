//! Page-number / page-size pagination for book listings.

use crate::error::CoreError;

/// Page returned when the caller does not ask for one.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
    offset: i64,
}

impl PageRequest {
    /// Both values must be at least 1 and the resulting row offset must fit
    /// in an `i64`.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, CoreError> {
        if page_number < 1 || page_size < 1 {
            return Err(CoreError::InvalidPagination(
                "Page number and page size must be positive numbers.".into(),
            ));
        }
        let offset = (page_number - 1).checked_mul(page_size).ok_or_else(|| {
            CoreError::InvalidPagination("Requested page is out of range.".into())
        })?;
        Ok(Self {
            page_number,
            page_size,
            offset,
        })
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    /// Rows to return (SQL `LIMIT`).
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip (SQL `OFFSET`).
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}
