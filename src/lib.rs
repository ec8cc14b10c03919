//! Clawprint: client and CLI for the Clawprint business-formation API
//!
//! Registers agents, forms and queries businesses, manages invoices and
//! payment links, and reports financials by issuing JSON requests to a remote
//! Clawprint server. All business logic lives server-side; this crate owns the
//! request plumbing, the local credential file, and the command-line surface.

pub mod checks;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod models;
pub mod router;
pub mod transport;

pub use client::ClawprintClient;
pub use error::ApiError;
