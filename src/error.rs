/// Error type for storage collaborator failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage query failed: {0}")]
    QueryFailed(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "postgres-storage")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Unavailable(err.to_string())
            }
            other => StorageError::QueryFailed(other.to_string()),
        }
    }
}

/// Error type for search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A single-page descriptor was asked to move to another page.
    #[error("Unsupported pagination operation: {0}")]
    UnsupportedPagination(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for search operations
pub type CoreResult<T> = Result<T, SearchError>;
