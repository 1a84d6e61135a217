//! Conversions from value-object errors into the layer errors.
//!
//! The domain layer does not know about the store or the services, so the
//! glue lives here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_errors_become_validation_errors() {
        let err = RepositoryError::from(TypeConstraintError::NonPositiveId);
        assert!(matches!(err, RepositoryError::ValidationError(_)));

        let err = ServiceError::from(TypeConstraintError::EmptyString);
        assert!(matches!(err, ServiceError::TypeConstraint(_)));
    }
}
