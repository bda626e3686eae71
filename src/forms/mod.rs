//! Form definitions for plan management and sign-in flows.

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod plans;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("password is required")]
    InvalidPassword,

    #[error("invalid price")]
    InvalidPrice,

    #[error("original price must not be lower than the price")]
    PriceAboveOriginal,
}
