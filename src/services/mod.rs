//! Service layer: the pure follow-up engine and the request workflows.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod client;
pub mod filters;
pub mod followup;
pub mod main;
pub mod relance;
pub mod score;
pub mod session;
pub mod settings;

/// Errors surfaced at the service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    /// The caller's profile exists but has been switched off by an admin.
    #[error("account deactivated")]
    Deactivated,

    #[error("not found")]
    NotFound,

    /// Local validation failed; the message is shown to the user as is.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
