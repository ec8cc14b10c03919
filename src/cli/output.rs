//! CLI output: error mapping from `ApiError` to the text printed on stderr.

use crate::cli::help::action_label;
use crate::cli::parse::Commands;
use crate::error::ApiError;

enum Resource {
    Business,
    Invoice,
    Agent,
    Other,
}

fn resource(command: &Commands) -> Resource {
    match command {
        Commands::CreateBusiness { .. }
        | Commands::CheckStatus { .. }
        | Commands::GetFinancials { .. } => Resource::Business,
        Commands::GenerateInvoice { .. }
        | Commands::CreateInvoice { .. }
        | Commands::CheckInvoiceStatus { .. }
        | Commands::GeneratePaymentLink { .. } => Resource::Invoice,
        Commands::SetupAgent { .. } => Resource::Agent,
        Commands::CheckApi | Commands::TestApi { .. } | Commands::TestAuth => Resource::Other,
    }
}

fn not_found_hint(command: &Commands) -> &'static str {
    match resource(command) {
        Resource::Business => "Business not found. Check the business ID.",
        Resource::Invoice => "Invoice not found. Check the invoice ID.",
        Resource::Agent | Resource::Other => "Resource not found. Check the ID and API URL.",
    }
}

fn conflict_hint(command: &Commands) -> &'static str {
    match command {
        Commands::SetupAgent { .. } => {
            "This email is already registered.\n   Use a different email address."
        }
        Commands::GeneratePaymentLink { .. } | Commands::GenerateInvoice { .. } => {
            "💡 A payment link may already exist for this invoice.\n      Check it with: clawprint check-invoice-status --invoice-id <id>"
        }
        _ => "A conflicting or duplicate resource already exists.",
    }
}

/// Render a command failure for stderr. Every failure exits 1.
pub fn map_error(command: &Commands, e: &ApiError) -> String {
    match e {
        ApiError::Usage { message, usage } => format!("❌ Error: {}\n\n{}", message, usage),
        ApiError::InvalidInput(message) => format!("❌ Error: {}", message),
        ApiError::ChecksFailed { failed, total, .. } => {
            format!("⚠️  {} of {} checks failed. Check errors above.", failed, total)
        }
        ApiError::Server {
            status, message, ..
        } => {
            let mut out = format!(
                "❌ Error {}:\n   Status: {}\n   Message: {}",
                action_label(command),
                status,
                message
            );
            let hint = match status {
                404 => Some(not_found_hint(command)),
                409 => Some(conflict_hint(command)),
                401 => Some("Check CLAWPRINT_API_KEY, or run: clawprint setup-agent --email <email>"),
                _ => None,
            };
            if let Some(hint) = hint {
                out.push_str("\n\n   ");
                out.push_str(hint);
            }
            out
        }
        ApiError::Transport(_) | ApiError::Timeout(_) => format!(
            "❌ Error {}:\n   {}\n\n   Is the API reachable? Run: clawprint check-api",
            action_label(command),
            e
        ),
        _ => format!("❌ Error {}:\n   {}", action_label(command), e),
    }
}
