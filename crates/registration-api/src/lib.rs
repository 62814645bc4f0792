//! Event registration service.
//!
//! Accepts registration submissions over HTTP, gates each behind a
//! human-verification challenge, persists accepted records with a generated
//! participant token, and sends a confirmation email through a mail relay.

pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod store;
pub mod token;

pub use config::Config;
pub use error::ApiError;
pub use store::{Registration, RegistrationStore, Registry, StoreBackend};
