use thiserror::Error;

/// Typed domain error returned by every action.
///
/// Errors are detected synchronously inside the operation that violates the
/// contract and returned to the caller immediately; nothing is retried here.
/// An operation that fails leaves no partial state behind.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A referenced event, request, user, category or subscription is absent.
    #[error("{0}")]
    NotFound(String),

    /// The acting user is not the owning or authorized party.
    #[error("{0}")]
    Forbidden(String),

    /// State-machine or capacity violation: wrong event/request state,
    /// capacity exhausted, invalid timeline.
    #[error("{0}")]
    Conflict(String),

    /// The statistics collaborator failed; event/request state is unaffected.
    #[error("statistics service unavailable: {0}")]
    StatisticsUnavailable(String),

    /// Storage or other infrastructure failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}
