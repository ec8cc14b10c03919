use serde::{Deserialize, Serialize};

/// Upper bound the server accepts for `GET /invoices?limit=`.
pub const MAX_INVOICE_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            tax_rate: None,
            item_type: None,
        }
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Tax for this line; `tax_rate` is a percentage.
    pub fn tax(&self) -> f64 {
        match self.tax_rate {
            Some(rate) => self.subtotal() * rate / 100.0,
            None => 0.0,
        }
    }
}

/// Subtotal, tax, and total over a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

impl InvoiceTotals {
    pub fn from_line_items(items: &[LineItem]) -> Self {
        // Start from +0.0; an empty f64 sum is -0.0.
        let amount = items.iter().map(LineItem::subtotal).fold(0.0, |acc, x| acc + x);
        let tax_amount = items.iter().map(LineItem::tax).fold(0.0, |acc, x| acc + x);
        Self {
            amount,
            tax_amount,
            total_amount: amount + tax_amount,
        }
    }
}

/// Body of `POST /invoices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewInvoice {
    pub business_id: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
}

/// Partial patch for `PATCH /invoices/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    #[serde(alias = "id")]
    pub invoice_id: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub tax_amount: f64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub total_amount: f64,
    #[serde(default = "default_currency", deserialize_with = "currency_or_default")]
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub viewed_at: Option<String>,
    #[serde(default)]
    pub stripe_payment_link: Option<String>,
    #[serde(default)]
    pub stripe_invoice_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
}

fn default_currency() -> String {
    "usd".to_string()
}

fn currency_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

impl Invoice {
    /// Customer name when given, otherwise the email.
    pub fn customer_label(&self) -> &str {
        self.customer_name
            .as_deref()
            .or(self.customer_email.as_deref())
            .unwrap_or("(unknown customer)")
    }

    pub fn status_str(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

/// `GET /invoices` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceList {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Optional filters for listing invoices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceListOptions {
    pub status: Option<String>,
    pub limit: Option<u32>,
}

impl InvoiceListOptions {
    /// Requested limit clamped to `MAX_INVOICE_LIST_LIMIT`.
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit.map(|limit| limit.min(MAX_INVOICE_LIST_LIMIT))
    }
}

/// Payment link issued for an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentLink {
    #[serde(alias = "url", alias = "payment_url")]
    pub payment_link_url: String,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub stripe_invoice_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}
