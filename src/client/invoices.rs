use super::ClawprintClient;
use crate::error::ApiError;
use crate::models::{Ack, Invoice, InvoiceList, InvoiceListOptions, InvoiceUpdate, NewInvoice, PaymentLink};
use crate::transport::{ApiRequest, Endpoint};

/// `/invoices` operations.
pub struct Invoices<'a> {
    client: &'a ClawprintClient,
}

impl<'a> Invoices<'a> {
    pub(super) fn new(client: &'a ClawprintClient) -> Self {
        Self { client }
    }

    fn one(id: &str) -> Endpoint {
        Endpoint::new(["invoices", id])
    }

    fn payment_link_endpoint(id: &str) -> Endpoint {
        Endpoint::new(["invoices", id, "payment-link"])
    }

    /// Totals are computed server-side from the line items.
    pub async fn create(&self, invoice: &NewInvoice) -> Result<Invoice, ApiError> {
        let request = ApiRequest::post(Endpoint::new(["invoices"])).with_json(invoice)?;
        self.client.call(request).await
    }

    /// List a business's invoices. `limit` above 100 is sent as 100.
    pub async fn list(
        &self,
        business_id: &str,
        options: &InvoiceListOptions,
    ) -> Result<InvoiceList, ApiError> {
        let mut endpoint = Endpoint::new(["invoices"]).query("business_id", business_id);
        if let Some(ref status) = options.status {
            endpoint = endpoint.query("status", status.as_str());
        }
        if let Some(limit) = options.effective_limit() {
            endpoint = endpoint.query("limit", limit.to_string());
        }
        self.client.call(ApiRequest::get(endpoint)).await
    }

    pub async fn get(&self, id: &str) -> Result<Invoice, ApiError> {
        self.client.call(ApiRequest::get(Self::one(id))).await
    }

    pub async fn update(&self, id: &str, update: &InvoiceUpdate) -> Result<Invoice, ApiError> {
        let request = ApiRequest::patch(Self::one(id)).with_json(update)?;
        self.client.call(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        self.client.call_raw(ApiRequest::delete(Self::one(id))).await
    }

    pub async fn generate_payment_link(&self, id: &str) -> Result<PaymentLink, ApiError> {
        let request = ApiRequest::post(Self::payment_link_endpoint(id));
        self.client.call(request).await
    }

    pub async fn payment_link(&self, id: &str) -> Result<PaymentLink, ApiError> {
        let request = ApiRequest::get(Self::payment_link_endpoint(id));
        self.client.call(request).await
    }
}
