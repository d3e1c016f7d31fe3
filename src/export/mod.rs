//! Deployment artifacts built from adapters
//!
//! - [`compose`] - compose files assembled from container descriptors
//! - [`summary`] - secret-free adapter summaries

pub mod compose;
pub mod summary;

pub use compose::{build_compose, ComposeFile, ComposeService};
pub use summary::{redacted_connection_string, AdapterSummary};
