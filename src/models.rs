//! Wire models for the Clawprint API.
//!
//! The server owns these resources; the client only mirrors the shapes it sends
//! and receives. Response fields the server may omit are optional.

pub mod agent;
pub mod business;
pub mod financials;
pub mod health;
pub mod invoice;
pub mod sponsor;

pub use agent::{AgentRegistration, AgentUser, RegisterAgent};
pub use business::{
    BankAccountStatus, Business, BusinessStatus, BusinessUpdate, EinStatus, LlcStatus,
    NewBusiness, SponsorVerification,
};
pub use financials::{ExpenseBreakdown, Expenses, FinancialSummary, Financials, Transaction};
pub use health::{Health, ServiceHealth};
pub use invoice::{
    Invoice, InvoiceList, InvoiceListOptions, InvoiceTotals, InvoiceUpdate, LineItem, NewInvoice,
    PaymentLink, MAX_INVOICE_LIST_LIMIT,
};
pub use sponsor::{NewSponsor, Sponsor};

use serde::Deserialize;

/// Deserialize an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgement body for deletes and other calls whose payload is not inspected.
pub type Ack = serde_json::Value;
