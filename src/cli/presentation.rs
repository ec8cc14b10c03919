//! CLI presentation: text and json formatters per command family.

mod agent;
mod business;
mod health;
mod invoice;
mod shared;

pub use agent::{agent_registered_json, format_agent_registered_text};
pub use business::{
    format_business_created_text, format_business_status_text, format_financials_text,
};
pub use health::{format_configuration_text, format_health_text, format_unreachable_text};
pub use invoice::{
    format_default_line_items_notice, format_existing_payment_link_text,
    format_generated_invoice_text, format_invoice_created_text, format_invoice_status_text,
    format_payment_link_text, status_emoji,
};
pub use shared::{to_json, OutputFormat};
