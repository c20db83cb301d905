use bookshelf_core::error::CoreError;

/// Error returned by repository operations that enforce domain rules.
///
/// [`StoreError::Database`] is anything the backing store reported that was
/// not recognised as a domain failure (unreachable database, unexpected
/// constraint, serialization failure).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage failure: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
