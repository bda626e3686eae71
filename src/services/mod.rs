//! Stateful stores and workflows driven by the booking front-end.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod plans;
pub mod subscription;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
