pub mod auth;
pub mod books;

use bookshelf_core::error::CoreError;
use validator::Validate;

use crate::error::AppResult;

/// Run `validator` rules on a request body, reporting failures as
/// `CoreError::Validation`.
pub(crate) fn validate_body<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()).into())
}
