//! Transport layer for the coaching backend.
//!
//! Owns the wire representation of weeks, plans and catalog entries, the
//! authenticated HTTP client, and the error taxonomy for failed requests.
//! Everything above this crate works against typed structures; ad hoc JSON
//! shape-checking stops here.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
