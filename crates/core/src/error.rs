use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Deliberately carries no detail: unknown user and wrong password must
    /// look identical to the caller.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Books with the following titles already exist: {}", .titles.join(", "))]
    DuplicateTitle { titles: Vec<String> },

    #[error("Duplicate titles found in the request: {}", .titles.join(", "))]
    DuplicateTitleInBatch { titles: Vec<String> },

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for a single-title [`CoreError::DuplicateTitle`].
    pub fn duplicate_title(title: impl Into<String>) -> Self {
        CoreError::DuplicateTitle {
            titles: vec![title.into()],
        }
    }
}
