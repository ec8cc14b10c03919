//! API Client
//!
//! Typed facade over a [`Transport`]: one method per remote operation, grouped
//! into resource namespaces (`agents`, `businesses`, `sponsors`, `invoices`).
//! Every method is exactly one round trip; there is no caching and no request
//! coalescing. The client is built once per process and passed by reference.

use crate::config::ClientSettings;
use crate::error::ApiError;
use crate::models::Health;
use crate::transport::{ApiRequest, Endpoint, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

mod agents;
mod businesses;
mod invoices;
mod sponsors;

pub use agents::Agents;
pub use businesses::Businesses;
pub use invoices::Invoices;
pub use sponsors::Sponsors;

#[derive(Clone)]
pub struct ClawprintClient {
    transport: Arc<dyn Transport>,
}

impl ClawprintClient {
    /// Client over HTTP using the given settings.
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let transport = HttpTransport::from_settings(settings)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Client over any transport (fakes in tests, custom stacks).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.call(ApiRequest::get(Endpoint::new(["health"]))).await
    }

    pub fn agents(&self) -> Agents<'_> {
        Agents::new(self)
    }

    pub fn businesses(&self) -> Businesses<'_> {
        Businesses::new(self)
    }

    pub fn sponsors(&self) -> Sponsors<'_> {
        Sponsors::new(self)
    }

    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(self)
    }

    /// Send and decode the response body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let value = self.transport.send(request).await?;
        decode(value)
    }

    /// Send and return the body untouched.
    pub(crate) async fn call_raw(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.transport.send(request).await
    }
}

impl std::fmt::Debug for ClawprintClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClawprintClient").finish_non_exhaustive()
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Parse(format!("Unexpected response shape: {}", e)))
}
