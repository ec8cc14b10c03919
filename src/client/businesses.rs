use super::{decode, ClawprintClient};
use crate::error::ApiError;
use crate::models::{Ack, Business, BusinessStatus, BusinessUpdate, Financials, NewBusiness};
use crate::transport::{ApiRequest, Endpoint};
use serde::Deserialize;

/// `/businesses` operations.
pub struct Businesses<'a> {
    client: &'a ClawprintClient,
}

/// The list endpoint has answered both with a bare array and with a wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum BusinessListBody {
    Bare(Vec<Business>),
    Wrapped { businesses: Vec<Business> },
}

impl<'a> Businesses<'a> {
    pub(super) fn new(client: &'a ClawprintClient) -> Self {
        Self { client }
    }

    fn one(id: &str) -> Endpoint {
        Endpoint::new(["businesses", id])
    }

    pub async fn create(&self, business: &NewBusiness) -> Result<Business, ApiError> {
        let request = ApiRequest::post(Endpoint::new(["businesses"])).with_json(business)?;
        self.client.call(request).await
    }

    pub async fn list(&self) -> Result<Vec<Business>, ApiError> {
        let value = self
            .client
            .call_raw(ApiRequest::get(Endpoint::new(["businesses"])))
            .await?;
        Ok(match decode::<BusinessListBody>(value)? {
            BusinessListBody::Bare(businesses) => businesses,
            BusinessListBody::Wrapped { businesses } => businesses,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Business, ApiError> {
        self.client.call(ApiRequest::get(Self::one(id))).await
    }

    /// Formation progress: LLC filing, EIN, bank account, sponsor verification.
    pub async fn status(&self, id: &str) -> Result<BusinessStatus, ApiError> {
        let endpoint = Endpoint::new(["businesses", id, "status"]);
        self.client.call(ApiRequest::get(endpoint)).await
    }

    /// `period` is passed through verbatim (`all`, `month`, `2026-Q1`, ...).
    pub async fn financials(&self, id: &str, period: &str) -> Result<Financials, ApiError> {
        let endpoint = Endpoint::new(["businesses", id, "financials"]).query("period", period);
        self.client.call(ApiRequest::get(endpoint)).await
    }

    pub async fn update(&self, id: &str, update: &BusinessUpdate) -> Result<Business, ApiError> {
        let request = ApiRequest::patch(Self::one(id)).with_json(update)?;
        self.client.call(request).await
    }

    pub async fn dissolve(&self, id: &str) -> Result<Ack, ApiError> {
        self.client.call_raw(ApiRequest::delete(Self::one(id))).await
    }
}
