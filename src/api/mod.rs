// Portal API module.
// Client and types for the Alliance Courtage broker portal REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::PortalClient;
pub use types::*;
