use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures surfaced by the search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed pagination input; raised before the store is touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The store failed to run a query. No retry is attempted.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),

    /// A loaded row does not fit the join the plan asked for.
    #[error("inconsistent projection: {0}")]
    InconsistentProjection(String),
}

pub type ServiceResult<T> = Result<T, SearchError>;
