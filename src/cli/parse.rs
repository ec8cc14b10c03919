//! CLI parse: clap types for Clawprint. No behavior; definitions only.
//!
//! Required flags are declared optional here and checked by the route layer,
//! so a missing flag surfaces as a usage error with exit code 1.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clawprint CLI - Business infrastructure for AI agents
#[derive(Parser, Debug)]
#[command(name = "clawprint")]
#[command(version)]
#[command(about = "Form and operate agent-run businesses through the Clawprint API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds the .env credential file)
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides CLAWPRINT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API key as <publicKey>:<secretKey> (overrides CLAWPRINT_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: String,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new agent-operated business
    CreateBusiness {
        /// Legal name of the business
        #[arg(long)]
        name: Option<String>,
        /// Business purpose
        #[arg(long)]
        purpose: Option<String>,
        /// Sponsor email
        #[arg(long)]
        sponsor: Option<String>,
        /// Agent session id to associate with the business
        #[arg(long)]
        agent_id: Option<String>,
        /// Entity type
        #[arg(long = "type", default_value = "llc")]
        business_type: String,
        /// Formation state
        #[arg(long, default_value = "delaware")]
        state: String,
    },
    /// Check formation status
    CheckStatus {
        #[arg(long)]
        business_id: Option<String>,
    },
    /// Create a one-line invoice and its payment link
    GenerateInvoice {
        #[arg(long)]
        business_id: Option<String>,
        /// Amount in the invoice currency
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        customer_email: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
    },
    /// View financial summary
    GetFinancials {
        #[arg(long)]
        business_id: Option<String>,
        /// Reporting period (month, quarter, year, all)
        #[arg(long, default_value = "all")]
        period: String,
    },
    /// Create an itemized invoice
    CreateInvoice {
        #[arg(long)]
        business_id: Option<String>,
        #[arg(long)]
        customer_email: Option<String>,
        #[arg(long)]
        customer_name: Option<String>,
        #[arg(long)]
        invoice_number: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        /// JSON array of line items
        #[arg(long)]
        line_items: Option<String>,
    },
    /// Show an invoice and its payment state
    CheckInvoiceStatus {
        #[arg(long)]
        invoice_id: Option<String>,
    },
    /// Get or create the payment link for an invoice
    GeneratePaymentLink {
        #[arg(long)]
        invoice_id: Option<String>,
    },
    /// Register an agent and store its API key in the workspace .env
    SetupAgent {
        #[arg(long)]
        email: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Check API configuration and connectivity
    CheckApi,
    /// Run the client integration suite against the configured server
    TestApi {
        /// Dissolve the test business afterwards
        #[arg(long)]
        cleanup: bool,
    },
    /// Run the registration and authentication suite
    TestAuth,
}
