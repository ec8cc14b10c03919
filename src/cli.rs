//! CLI domain: parse, route, help, output, and presentation only.
//! No HTTP logic; the single route table calls the API client.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{action_label, command_name, usage_text};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    agent_registered_json, format_agent_registered_text, format_business_created_text,
    format_business_status_text, format_configuration_text, format_default_line_items_notice,
    format_existing_payment_link_text, format_financials_text, format_generated_invoice_text,
    format_health_text, format_invoice_created_text, format_invoice_status_text,
    format_payment_link_text, format_unreachable_text, status_emoji, to_json, OutputFormat,
};
pub use route::{example_line_items, is_valid_email, parse_line_items, RunContext};
