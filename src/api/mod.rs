//! Upstream API plumbing
//!
//! Code rules, the error type shared by every lookup, and the HTTP transport
//! the client sends its requests through.

pub mod codes;
pub mod error;
pub mod transport;

pub use codes::{validate_code, Authority, CodeRule, CodeType};
pub use error::LookupError;
pub use transport::{FetchedResponse, HttpFetcher, ReqwestFetcher};
