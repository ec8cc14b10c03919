//! CLI help: command names, error action labels, and usage text.

use crate::cli::parse::Commands;

/// Command name as typed on the command line (e.g. "create-business").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::CreateBusiness { .. } => "create-business",
        Commands::CheckStatus { .. } => "check-status",
        Commands::GenerateInvoice { .. } => "generate-invoice",
        Commands::GetFinancials { .. } => "get-financials",
        Commands::CreateInvoice { .. } => "create-invoice",
        Commands::CheckInvoiceStatus { .. } => "check-invoice-status",
        Commands::GeneratePaymentLink { .. } => "generate-payment-link",
        Commands::SetupAgent { .. } => "setup-agent",
        Commands::CheckApi => "check-api",
        Commands::TestApi { .. } => "test-api",
        Commands::TestAuth => "test-auth",
    }
}

/// What the command was doing, for "❌ Error <action>:".
pub fn action_label(command: &Commands) -> &'static str {
    match command {
        Commands::CreateBusiness { .. } => "creating business",
        Commands::CheckStatus { .. } => "checking status",
        Commands::GenerateInvoice { .. } => "generating invoice",
        Commands::GetFinancials { .. } => "getting financials",
        Commands::CreateInvoice { .. } => "creating invoice",
        Commands::CheckInvoiceStatus { .. } => "checking invoice status",
        Commands::GeneratePaymentLink { .. } => "generating payment link",
        Commands::SetupAgent { .. } => "registering agent",
        Commands::CheckApi => "checking API",
        Commands::TestApi { .. } => "running API tests",
        Commands::TestAuth => "running authentication tests",
    }
}

pub fn usage_text(command: &Commands) -> &'static str {
    match command {
        Commands::CreateBusiness { .. } => concat!(
            "Usage:\n",
            "  clawprint create-business \\\n",
            "    --name \"Business Name\" \\\n",
            "    --purpose \"Business purpose\" \\\n",
            "    --sponsor sponsor@example.com \\\n",
            "    [--agent-id <session-id>] [--type llc] [--state delaware]"
        ),
        Commands::CheckStatus { .. } => {
            "Usage:\n  clawprint check-status --business-id biz_abc123"
        }
        Commands::GenerateInvoice { .. } => concat!(
            "Usage:\n",
            "  clawprint generate-invoice \\\n",
            "    --business-id biz_abc123 \\\n",
            "    --amount 1000 \\\n",
            "    --description \"Service description\" \\\n",
            "    --customer-email client@example.com \\\n",
            "    [--due-date 2026-03-31]"
        ),
        Commands::GetFinancials { .. } => {
            "Usage:\n  clawprint get-financials --business-id biz_abc123 [--period month|quarter|year|all]"
        }
        Commands::CreateInvoice { .. } => concat!(
            "Usage: clawprint create-invoice --business-id <id> --customer-email <email> [--line-items <json>]\n",
            "\n",
            "Example:\n",
            "  clawprint create-invoice \\\n",
            "    --business-id biz_abc123 \\\n",
            "    --customer-email client@example.com \\\n",
            "    --customer-name \"John Smith\" \\\n",
            "    --line-items '[{\"description\":\"Service\",\"quantity\":1,\"unit_price\":5000,\"type\":\"service\"}]'"
        ),
        Commands::CheckInvoiceStatus { .. } => concat!(
            "Usage: clawprint check-invoice-status --invoice-id <id>\n",
            "\n",
            "Example:\n",
            "  clawprint check-invoice-status --invoice-id inv_abc123"
        ),
        Commands::GeneratePaymentLink { .. } => concat!(
            "Usage: clawprint generate-payment-link --invoice-id <id>\n",
            "\n",
            "Example:\n",
            "  clawprint generate-payment-link --invoice-id inv_abc123"
        ),
        Commands::SetupAgent { .. } => concat!(
            "Usage: clawprint setup-agent --email <email> [--name <name>]\n",
            "\n",
            "Example:\n",
            "  clawprint setup-agent --email my-agent@clawprint.ai --name \"My Agent\""
        ),
        Commands::CheckApi => "Usage: clawprint check-api",
        Commands::TestApi { .. } => "Usage: clawprint test-api [--cleanup]",
        Commands::TestAuth => "Usage: clawprint test-auth",
    }
}
