use super::ClawprintClient;
use crate::error::ApiError;
use crate::models::{AgentRegistration, RegisterAgent};
use crate::transport::{ApiRequest, Authorization, Endpoint};

/// `/agents` operations.
pub struct Agents<'a> {
    client: &'a ClawprintClient,
}

impl<'a> Agents<'a> {
    pub(super) fn new(client: &'a ClawprintClient) -> Self {
        Self { client }
    }

    /// Register an agent identity; the server issues its key pair.
    /// Registration is public, so no Authorization header is sent.
    pub async fn register(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<AgentRegistration, ApiError> {
        let body = RegisterAgent {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        };
        let request = ApiRequest::post(Endpoint::new(["agents"]))
            .with_authorization(Authorization::Omit)
            .with_json(&body)?;
        self.client.call(request).await
    }
}
