//! Client for NGP VAN's "find or create contact" endpoint.
//!
//! # Overview
//! A `ContactRecord` holds one contact's fields and a list of fields that
//! must be filled in before it is sent. `save` validates the record, posts it
//! as JSON through an `HttpClient`, and keeps the response or transport fault
//! for inspection.
//!
//! ```no_run
//! use ngp_contact::{ContactRecord, Fields, UreqClient};
//!
//! # fn main() -> Result<(), ngp_contact::ContactError> {
//! let mut person = Fields::new();
//! person.insert("firstName".into(), "Han".into());
//! person.insert("lastName".into(), "Solo".into());
//! person.insert("email".into(), "scruffy.nerfherder@rebelalliance.org".into());
//!
//! let mut contact = ContactRecord::new("your-ngp-api-key", &person)?;
//! if contact.save(&UreqClient::new())? {
//!     println!("{}", contact.result().unwrap_or_default());
//! } else {
//!     eprintln!("{:?}", contact.errors());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The request is built as plain data (`build_find_or_create`) and executed
//!   by an injected `HttpClient`, so tests substitute a recording fake.
//! - Any HTTP status is a completed save; only a failed exchange is an error.
//! - Field values are a tagged `FieldValue` enum with sorted maps, keeping the
//!   JSON body deterministic.

pub mod contact;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use contact::{ContactRecord, CONTACT_TYPE, DEFAULT_BASE_URL, FIND_OR_CREATE_PATH};
pub use error::ContactError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use transport::UreqClient;
pub use types::{Email, FieldValue, Fields};
