//! Configuration sources, one module per layer.

pub mod credential_file;
pub mod environment;
pub mod global_file;
