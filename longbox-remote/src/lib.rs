//! Server-side title correction over the library application's REST API.
//!
//! An alternative to mutating the database file directly: the same
//! propose/confirm cycle, applied through the API with the title locked
//! so a rescan cannot undo the correction. Useful when the library server
//! stays running during the correction.

pub mod client;
pub mod correct;
pub mod error;
pub mod types;

pub use client::Client;
pub use correct::{RemoteOptions, correct_remote};
pub use error::RemoteError;
pub use types::{RemoteSeries, RemoteSeriesMetadata, SeriesPage};
