//! Error types for building and saving a contact.
//!
//! # Design
//! Only hard failures are errors here. A contact that fails required-field
//! validation is not an error: `save` returns `Ok(false)` and the messages
//! are read back through `ContactRecord::errors`.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `ContactRecord`.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Construction data lacked one or more identity keys.
    #[error("contact data missing expected keys (expecting 'firstName', 'lastName', 'email'): {}", .missing.join(", "))]
    InvalidInput { missing: Vec<&'static str> },

    /// `set_field` was asked to overwrite a field seeded at construction.
    #[error("field '{0}' is set at construction and cannot be replaced")]
    ReservedField(String),

    /// The field set could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The HTTP exchange did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
