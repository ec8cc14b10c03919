//! CLI route: single route table and run context. Dispatches to the API client and presentation.

use crate::checks::{run_api_suite, run_auth_suite, SuiteReport};
use crate::client::ClawprintClient;
use crate::config::{ClientSettings, ConfigLoader, ConfigOverrides};
use crate::credentials::{CredentialStore, API_KEY_VAR, API_URL_VAR};
use crate::error::ApiError;
use crate::models::{LineItem, NewBusiness, NewInvoice, PaymentLink};
use crate::transport::HttpTransport;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::cli::help::{command_name, usage_text};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    agent_registered_json, format_agent_registered_text, format_business_created_text,
    format_business_status_text, format_configuration_text, format_default_line_items_notice,
    format_existing_payment_link_text, format_financials_text, format_generated_invoice_text,
    format_health_text, format_invoice_created_text, format_invoice_status_text,
    format_payment_link_text, format_unreachable_text, to_json, OutputFormat,
};

/// Runtime context for CLI execution: settings, the API client, and the async runtime.
/// The client is built once here and borrowed by every command.
pub struct RunContext {
    client: ClawprintClient,
    settings: ClientSettings,
    workspace_root: PathBuf,
    format: OutputFormat,
    runtime: Runtime,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("api_url", &self.settings.api_url)
            .field("workspace_root", &self.workspace_root)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl RunContext {
    /// Load settings (config file or workspace layers, then `overrides`) and build the HTTP client.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ApiError> {
        let mut settings = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path, &workspace_root)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        settings.apply(overrides);
        settings.validate()?;

        let client = ClawprintClient::new(&settings)?;
        Self::with_client(workspace_root, settings, client)
    }

    /// Context over an existing client (custom transports, tests).
    pub fn with_client(
        workspace_root: PathBuf,
        settings: ClientSettings,
        client: ClawprintClient,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create async runtime: {}", e)))?;
        Ok(Self {
            client,
            settings,
            workspace_root,
            format: OutputFormat::Text,
            runtime,
        })
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn client(&self) -> &ClawprintClient {
        &self.client
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        info!(command = name, "Executing command");
        let result = self.runtime.block_on(self.dispatch(command));
        debug!(
            command = name,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    async fn dispatch(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::CreateBusiness {
                name,
                purpose,
                sponsor,
                agent_id,
                business_type,
                state,
            } => {
                let [name, purpose, sponsor] = required(
                    command,
                    [("name", name), ("purpose", purpose), ("sponsor", sponsor)],
                )?;
                let request = NewBusiness {
                    legal_name: name.to_string(),
                    sponsor_email: sponsor.to_string(),
                    purpose: Some(purpose.to_string()),
                    business_type: Some(business_type.clone()),
                    formation_state: Some(state.clone()),
                    agent_id: agent_id.clone(),
                };
                self.handle_create_business(&request).await
            }
            Commands::CheckStatus { business_id } => {
                let [business_id] = required(command, [("business-id", business_id)])?;
                let status = self.client.businesses().status(business_id).await?;
                match self.format {
                    OutputFormat::Json => to_json(&status),
                    OutputFormat::Text => Ok(format_business_status_text(&status)),
                }
            }
            Commands::GenerateInvoice {
                business_id,
                amount,
                description,
                customer_email,
                due_date,
            } => {
                let [business_id, amount, description, customer_email] = required(
                    command,
                    [
                        ("business-id", business_id),
                        ("amount", amount),
                        ("description", description),
                        ("customer-email", customer_email),
                    ],
                )?;
                let amount = parse_amount(amount)?;
                let request = NewInvoice {
                    business_id: business_id.to_string(),
                    customer_email: customer_email.to_string(),
                    customer_name: None,
                    invoice_number: None,
                    due_date: due_date.clone(),
                    line_items: vec![LineItem::new(description, 1.0, amount)],
                    notes: None,
                    payment_terms: None,
                };
                self.handle_generate_invoice(&request).await
            }
            Commands::GetFinancials {
                business_id,
                period,
            } => {
                let [business_id] = required(command, [("business-id", business_id)])?;
                let financials = self.client.businesses().financials(business_id, period).await?;
                match self.format {
                    OutputFormat::Json => to_json(&financials),
                    OutputFormat::Text => Ok(format_financials_text(&financials, period)),
                }
            }
            Commands::CreateInvoice {
                business_id,
                customer_email,
                customer_name,
                invoice_number,
                due_date,
                line_items,
            } => {
                let [business_id, customer_email] = required(
                    command,
                    [("business-id", business_id), ("customer-email", customer_email)],
                )?;
                let mut items = match line_items {
                    Some(raw) => parse_line_items(raw)?,
                    None => Vec::new(),
                };
                let used_example = items.is_empty();
                if used_example {
                    items = example_line_items();
                }
                let request = NewInvoice {
                    business_id: business_id.to_string(),
                    customer_email: customer_email.to_string(),
                    customer_name: customer_name.clone(),
                    invoice_number: invoice_number.clone(),
                    due_date: due_date.clone(),
                    line_items: items,
                    notes: None,
                    payment_terms: None,
                };
                self.handle_create_invoice(&request, used_example).await
            }
            Commands::CheckInvoiceStatus { invoice_id } => {
                let [invoice_id] = required(command, [("invoice-id", invoice_id)])?;
                let invoice = self.client.invoices().get(invoice_id).await?;
                match self.format {
                    OutputFormat::Json => to_json(&invoice),
                    OutputFormat::Text => Ok(format_invoice_status_text(&invoice)),
                }
            }
            Commands::GeneratePaymentLink { invoice_id } => {
                let [invoice_id] = required(command, [("invoice-id", invoice_id)])?;
                self.handle_generate_payment_link(invoice_id).await
            }
            Commands::SetupAgent { email, name } => {
                let [email] = required(command, [("email", email)])?;
                if !is_valid_email(email) {
                    return Err(ApiError::usage(
                        format!("Invalid email address: {}", email),
                        usage_text(command),
                    ));
                }
                self.handle_setup_agent(email, name.as_deref()).await
            }
            Commands::CheckApi => self.handle_check_api().await,
            Commands::TestApi { cleanup } => {
                let report = run_api_suite(&self.client, *cleanup).await;
                self.finish_suite(report)
            }
            Commands::TestAuth => {
                let transport = HttpTransport::from_settings(&self.settings)?;
                let report = run_auth_suite(&transport).await;
                self.finish_suite(report)
            }
        }
    }

    async fn handle_create_business(&self, request: &NewBusiness) -> Result<String, ApiError> {
        let business = self.client.businesses().create(request).await?;
        info!(business_id = %business.business_id, "Business created");
        match self.format {
            OutputFormat::Json => to_json(&business),
            OutputFormat::Text => Ok(format_business_created_text(request, &business)),
        }
    }

    async fn handle_generate_invoice(&self, request: &NewInvoice) -> Result<String, ApiError> {
        let invoice = self.client.invoices().create(request).await?;
        info!(invoice_id = %invoice.invoice_id, "Invoice created");
        let link = match invoice.stripe_payment_link {
            Some(ref url) => PaymentLink {
                payment_link_url: url.clone(),
                invoice_id: Some(invoice.invoice_id.clone()),
                stripe_invoice_id: invoice.stripe_invoice_id.clone(),
                expires_at: None,
            },
            None => {
                self.client
                    .invoices()
                    .generate_payment_link(&invoice.invoice_id)
                    .await?
            }
        };
        match self.format {
            OutputFormat::Json => to_json(&json!({ "invoice": invoice, "payment_link": link })),
            OutputFormat::Text => Ok(format_generated_invoice_text(&invoice, &link)),
        }
    }

    async fn handle_create_invoice(
        &self,
        request: &NewInvoice,
        used_example: bool,
    ) -> Result<String, ApiError> {
        let invoice = self.client.invoices().create(request).await?;
        info!(invoice_id = %invoice.invoice_id, "Invoice created");
        match self.format {
            OutputFormat::Json => to_json(&invoice),
            OutputFormat::Text => {
                let mut out = String::new();
                if used_example {
                    out.push_str(&format_default_line_items_notice(&request.line_items));
                    out.push('\n');
                }
                out.push_str(&format_invoice_created_text(&invoice));
                Ok(out)
            }
        }
    }

    async fn handle_generate_payment_link(&self, invoice_id: &str) -> Result<String, ApiError> {
        let invoice = self.client.invoices().get(invoice_id).await?;
        if let Some(ref existing) = invoice.stripe_payment_link {
            debug!(invoice_id, "Reusing existing payment link");
            return match self.format {
                OutputFormat::Json => to_json(&json!({
                    "invoice_id": invoice.invoice_id,
                    "payment_link_url": existing,
                    "created": false,
                })),
                OutputFormat::Text => Ok(format_existing_payment_link_text(&invoice, existing)),
            };
        }

        let link = self.client.invoices().generate_payment_link(invoice_id).await?;
        match self.format {
            OutputFormat::Json => to_json(&json!({
                "invoice_id": invoice.invoice_id,
                "payment_link_url": link.payment_link_url,
                "stripe_invoice_id": link.stripe_invoice_id,
                "expires_at": link.expires_at,
                "created": true,
            })),
            OutputFormat::Text => Ok(format_payment_link_text(&invoice, &link)),
        }
    }

    async fn handle_setup_agent(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<String, ApiError> {
        let registration = self.client.agents().register(email, display_name).await?;
        if registration.public_key.is_empty() || registration.secret_key.is_empty() {
            return Err(ApiError::Parse("Server did not return API keys".to_string()));
        }

        let mut store = CredentialStore::load_workspace(&self.workspace_root)?;
        store.set(API_KEY_VAR, registration.api_key());
        store.set(API_URL_VAR, self.settings.api_url.clone());
        store.save()?;
        info!(
            public_key = %registration.public_key,
            path = %store.path().display(),
            "Agent credentials stored"
        );

        match self.format {
            OutputFormat::Json => to_json(&agent_registered_json(
                &registration,
                &self.settings.api_url,
                store.path(),
            )),
            OutputFormat::Text => Ok(format_agent_registered_text(
                &registration,
                &self.settings.api_url,
                store.path(),
            )),
        }
    }

    async fn handle_check_api(&self) -> Result<String, ApiError> {
        let health = self.client.health().await;
        match self.format {
            OutputFormat::Json => {
                let value = match health {
                    Ok(ref health) => json!({
                        "api_url": self.settings.api_url,
                        "api_key_configured": self.settings.api_key_configured(),
                        "reachable": true,
                        "health": health,
                    }),
                    Err(ref e) => json!({
                        "api_url": self.settings.api_url,
                        "api_key_configured": self.settings.api_key_configured(),
                        "reachable": false,
                        "error": e.to_string(),
                    }),
                };
                let rendered = to_json(&value)?;
                match health {
                    Ok(_) => Ok(rendered),
                    Err(_) => Err(unreachable_failure(rendered)),
                }
            }
            OutputFormat::Text => {
                let mut out = format_configuration_text(&self.settings);
                match health {
                    Ok(health) => {
                        out.push_str(&format_health_text(&health));
                        Ok(out)
                    }
                    Err(e) => {
                        out.push_str(&format_unreachable_text(&e.to_string()));
                        Err(unreachable_failure(out))
                    }
                }
            }
        }
    }

    fn finish_suite(&self, report: SuiteReport) -> Result<String, ApiError> {
        let rendered = match self.format {
            OutputFormat::Json => to_json(&report)?,
            OutputFormat::Text => report.render(),
        };
        report.conclude(rendered)
    }
}

fn unreachable_failure(report: String) -> ApiError {
    ApiError::ChecksFailed {
        report,
        failed: 1,
        total: 1,
    }
}

/// Values of required flags, in order. All missing flags are reported at once.
fn required<'a, const N: usize>(
    command: &Commands,
    flags: [(&str, &'a Option<String>); N],
) -> Result<[&'a str; N], ApiError> {
    let missing: Vec<String> = flags
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(flag, _)| format!("--{}", flag))
        .collect();
    if !missing.is_empty() {
        let noun = if missing.len() == 1 { "argument" } else { "arguments" };
        return Err(ApiError::usage(
            format!("Missing required {}: {}", noun, missing.join(", ")),
            usage_text(command),
        ));
    }
    Ok(flags.map(|(_, value)| value.as_deref().unwrap_or_default()))
}

fn parse_amount(raw: &str) -> Result<f64, ApiError> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ApiError::InvalidInput(format!(
            "Invalid --amount '{}': must be a positive number",
            raw
        ))),
    }
}

/// Parse `--line-items`: a JSON array of line items.
pub fn parse_line_items(raw: &str) -> Result<Vec<LineItem>, ApiError> {
    serde_json::from_str(raw).map_err(|e| {
        ApiError::InvalidInput(format!(
            "Invalid JSON for --line-items: {}\nMust be valid JSON array of line items",
            e
        ))
    })
}

/// Used by `create-invoice` when no line items are given.
pub fn example_line_items() -> Vec<LineItem> {
    let mut item = LineItem::new("Consulting Services", 10.0, 500.0).with_tax_rate(10.0);
    item.item_type = Some("service".to_string());
    vec![item]
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
