//! Form definitions backing the HTTP routes.
//!
//! Every form is deserialized as submitted and turned into a typed payload
//! through `TryFrom`, which is where local validation happens.

use thiserror::Error;
use validator::ValidationErrors;

use crate::services::ServiceError;

pub mod client;
pub mod settings;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("the client last name is required")]
    MissingLastName,

    #[error("the phone number is required")]
    MissingPhone,

    #[error("the property address is required for a seller / landlord")]
    MissingPropertyAddress,

    #[error("add a comment before validating the follow-up")]
    EmptyComment,

    #[error("invalid client category")]
    InvalidCategory,

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid profile id")]
    InvalidProfileId,

    #[error("invalid closure reason")]
    InvalidClosureReason,

    #[error("select both the source and the target profile")]
    ProfileNotSelected,

    #[error("source and target profile must differ")]
    SameProfiles,

    #[error("follow-up delays must lie between 1 and 365 days")]
    InvalidDelay,
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Empty or whitespace-only input means "not provided".
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
