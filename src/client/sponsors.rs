use super::{decode, ClawprintClient};
use crate::error::ApiError;
use crate::models::{NewSponsor, Sponsor};
use crate::transport::{ApiRequest, Endpoint};
use serde_json::Value;

/// `/sponsors` operations.
pub struct Sponsors<'a> {
    client: &'a ClawprintClient,
}

impl<'a> Sponsors<'a> {
    pub(super) fn new(client: &'a ClawprintClient) -> Self {
        Self { client }
    }

    /// Fetch the sponsor with this email, creating it if absent.
    pub async fn get_or_create(&self, sponsor: &NewSponsor) -> Result<Sponsor, ApiError> {
        let request = ApiRequest::post(Endpoint::new(["sponsors"])).with_json(sponsor)?;
        self.client.call(request).await
    }

    /// `None` when the server answers with an empty body or `null`.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Sponsor>, ApiError> {
        let request = ApiRequest::get(Endpoint::new(["sponsors"]).query("email", email));
        let value = self.client.call_raw(request).await?;
        match value {
            Value::Null => Ok(None),
            Value::Object(ref map) if map.is_empty() => Ok(None),
            other => decode(other).map(Some),
        }
    }
}
