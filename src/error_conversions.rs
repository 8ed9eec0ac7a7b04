//! Error conversion glue between the domain layer and the repository/service
//! layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here instead of next to `TypeConstraintError`.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;
use crate::services::ingest::IngestError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        log::error!("Repository failure: {val}");
        ServiceError::Internal
    }
}

impl From<IngestError> for ServiceError {
    fn from(val: IngestError) -> Self {
        ServiceError::Ingest(val.to_string())
    }
}
