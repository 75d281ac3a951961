//! Airport lookup client
//!
//! Resolves ICAO, IATA and local (FAA / Transport Canada) airport codes into
//! JSON records through the ICAO location indicator API.
//!
//! ```no_run
//! use airport_lookup::api_client::AirportLookupClient;
//!
//! let client = AirportLookupClient::new("my-api-key");
//! let record = client.find_by_icao("CYGK")?;
//! println!("{record}");
//! # Ok::<(), airport_lookup::api::LookupError>(())
//! ```

pub mod api;
pub mod api_client;
pub mod cli;
pub mod config;
pub mod record_display;
pub mod utils;

pub use api::{Authority, CodeType, LookupError};
pub use api_client::AirportLookupClient;
