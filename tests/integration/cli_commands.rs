//! Integration tests for CLI commands routed through RunContext

use crate::integration::test_utils::{FakeServer, UnreachableTransport};
use clawprint::cli::{map_error, Commands, OutputFormat, RunContext};
use clawprint::config::ClientSettings;
use clawprint::credentials::{CredentialStore, API_KEY_VAR, API_URL_VAR};
use clawprint::error::ApiError;
use clawprint::ClawprintClient;
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    server: Arc<FakeServer>,
    workspace: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self {
            server: FakeServer::new(),
            workspace: TempDir::new().unwrap(),
        }
    }

    fn context(&self, format: OutputFormat) -> RunContext {
        let settings = ClientSettings {
            api_key: Some("pk_test:sk_test".to_string()),
            ..ClientSettings::default()
        };
        let client = ClawprintClient::with_transport(self.server.clone());
        RunContext::with_client(self.workspace.path().to_path_buf(), settings, client)
            .unwrap()
            .with_format(format)
    }

    fn run(&self, command: Commands) -> Result<String, ApiError> {
        self.context(OutputFormat::Text).execute(&command)
    }
}

fn create_business(name: Option<&str>, sponsor: Option<&str>) -> Commands {
    Commands::CreateBusiness {
        name: name.map(str::to_string),
        purpose: Some("AI consulting".to_string()),
        sponsor: sponsor.map(str::to_string),
        agent_id: None,
        business_type: "llc".to_string(),
        state: "delaware".to_string(),
    }
}

fn create_invoice(business_id: &str, line_items: Option<&str>) -> Commands {
    Commands::CreateInvoice {
        business_id: Some(business_id.to_string()),
        customer_email: Some("client@example.com".to_string()),
        customer_name: Some("Jane Client".to_string()),
        invoice_number: None,
        due_date: None,
        line_items: line_items.map(str::to_string),
    }
}

fn created_invoice_id(harness: &Harness) -> String {
    harness
        .server
        .invoice_ids()
        .pop()
        .expect("an invoice was created")
}

#[test]
fn test_create_business_prints_id_and_next_steps() {
    let harness = Harness::new();
    let out = harness
        .run(create_business(Some("Acme AI LLC"), Some("owner@example.com")))
        .unwrap();
    assert!(out.contains("Name: Acme AI LLC"));
    assert!(out.contains("✅ Business creation initiated!"));
    assert!(out.contains("Business ID: biz_"));
    assert!(out.contains("Status: forming"));
    assert!(out.contains("clawprint check-status --business-id biz_"));
}

#[test]
fn test_missing_required_flags_is_usage_error() {
    let harness = Harness::new();
    let command = create_business(None, None);
    let err = harness.run(command.clone()).unwrap_err();
    match err {
        ApiError::Usage { ref message, ref usage } => {
            assert_eq!(message, "Missing required arguments: --name, --sponsor");
            assert!(usage.contains("clawprint create-business"));
        }
        ref other => panic!("expected usage error, got {:?}", other),
    }
    assert!(map_error(&command, &err).starts_with("❌ Error: Missing required arguments"));
    assert!(harness.server.requests().is_empty(), "no request on usage error");
}

#[test]
fn test_check_status_not_found_maps_to_hint() {
    let harness = Harness::new();
    let command = Commands::CheckStatus {
        business_id: Some("biz_missing".to_string()),
    };
    let err = harness.run(command.clone()).unwrap_err();
    let message = map_error(&command, &err);
    assert!(message.contains("Status: 404"));
    assert!(message.contains("Business not found. Check the business ID."));
}

#[test]
fn test_check_status_json_format() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Json LLC");
    let out = harness
        .context(OutputFormat::Json)
        .execute(&Commands::CheckStatus {
            business_id: Some(id.clone()),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["business_id"], id.as_str());
    assert_eq!(value["llc"]["status"], "pending");
}

#[test]
fn test_get_financials_reports_period() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Ledger LLC");
    let out = harness
        .run(Commands::GetFinancials {
            business_id: Some(id.clone()),
            period: "month".to_string(),
        })
        .unwrap();
    assert!(out.contains(&format!("Getting financials for business: {}", id)));
    assert!(out.contains("Period: month"));
    assert!(out.contains("💰 Revenue: $0.00"));
}

#[test]
fn test_generate_invoice_creates_payment_link() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Invoicer LLC");
    let out = harness
        .run(Commands::GenerateInvoice {
            business_id: Some(id),
            amount: Some("1000".to_string()),
            description: Some("Consulting".to_string()),
            customer_email: Some("client@example.com".to_string()),
            due_date: Some("2026-03-31".to_string()),
        })
        .unwrap();
    assert!(out.contains("Amount: usd 1000.00"));
    assert!(out.contains("Description: Consulting"));
    assert!(out.contains("💳 Payment URL: https://pay.stripe.test/inv_"));
}

#[test]
fn test_generate_invoice_rejects_bad_amount() {
    let harness = Harness::new();
    let command = Commands::GenerateInvoice {
        business_id: Some("biz_1".to_string()),
        amount: Some("-5".to_string()),
        description: Some("Consulting".to_string()),
        customer_email: Some("client@example.com".to_string()),
        due_date: None,
    };
    let err = harness.run(command).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)), "got {:?}", err);
    assert!(harness.server.requests().is_empty());
}

#[test]
fn test_create_invoice_defaults_to_example_items() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Example LLC");
    let out = harness.run(create_invoice(&id, None)).unwrap();
    assert!(out.contains("📝 No line items provided, using example:"));
    assert!(out.contains("Consulting Services"));
    assert!(out.contains("Expected: $5000.00 + $500.00 tax = $5500.00"));
    assert!(out.contains("💰 Total: usd 5500.00"));
    assert!(out.contains("Tax: 10% = $500.00"));
}

#[test]
fn test_create_invoice_with_line_items() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Items LLC");
    let items = r#"[{"description":"Audit","quantity":2,"unit_price":750,"type":"service"}]"#;
    let out = harness.run(create_invoice(&id, Some(items))).unwrap();
    assert!(!out.contains("using example"));
    assert!(out.contains("💰 Total: usd 1500.00"));
    assert!(out.contains("Qty: 2 × $750.00 = $1500.00"));
}

#[test]
fn test_create_invoice_rejects_invalid_line_items() {
    let harness = Harness::new();
    let err = harness
        .run(create_invoice("biz_1", Some("{not json")))
        .unwrap_err();
    match err {
        ApiError::InvalidInput(message) => {
            assert!(message.starts_with("Invalid JSON for --line-items"))
        }
        other => panic!("expected invalid input, got {:?}", other),
    }
}

#[test]
fn test_payment_link_generated_once_then_reused() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Links LLC");
    harness.run(create_invoice(&id, None)).unwrap();
    let invoice_id = created_invoice_id(&harness);
    let command = Commands::GeneratePaymentLink {
        invoice_id: Some(invoice_id.clone()),
    };

    let first = harness.run(command.clone()).unwrap();
    assert!(first.contains("✅ Payment link generated successfully!"));

    let second = harness.run(command).unwrap();
    assert!(second.contains("Payment link already exists"));
    assert!(second.contains(&format!("https://pay.stripe.test/{}", invoice_id)));

    let generated = harness
        .server
        .requests()
        .iter()
        .filter(|r| r.method == reqwest::Method::POST && r.endpoint.segments().len() == 3)
        .count();
    assert_eq!(generated, 1);
}

#[test]
fn test_check_invoice_status_shows_invoice() {
    let harness = Harness::new();
    let id = harness.server.seed_business("Status LLC");
    harness.run(create_invoice(&id, None)).unwrap();
    let invoice_id = created_invoice_id(&harness);
    let out = harness
        .run(Commands::CheckInvoiceStatus {
            invoice_id: Some(invoice_id.clone()),
        })
        .unwrap();
    assert!(out.contains(&invoice_id));
    assert!(out.contains("Jane Client"));
}

#[test]
fn test_setup_agent_writes_credentials() {
    let harness = Harness::new();
    let env_path = harness.workspace.path().join(".env");
    std::fs::write(&env_path, "# local settings\nOTHER_TOOL_TOKEN=keep-me\n").unwrap();

    let out = harness
        .run(Commands::SetupAgent {
            email: Some("agent@clawprint.test".to_string()),
            name: Some("Agent".to_string()),
        })
        .unwrap();
    assert!(out.contains("✅ Agent registered successfully!"));
    assert!(out.contains(&format!("Credentials saved to: {}", env_path.display())));
    assert!(!out.contains("0123456789abcdef"), "secret must not be printed in full");

    let store = CredentialStore::load(&env_path).unwrap();
    let key = store.get(API_KEY_VAR).unwrap();
    assert!(key.starts_with("pk_usr_"));
    assert!(key.contains(":sk_usr_"));
    assert_eq!(store.get(API_URL_VAR), Some("http://localhost:3000/api"));
    assert_eq!(store.get("OTHER_TOOL_TOKEN"), Some("keep-me"));
}

#[test]
fn test_setup_agent_duplicate_email_conflict_hint() {
    let harness = Harness::new();
    let command = Commands::SetupAgent {
        email: Some("dupe@clawprint.test".to_string()),
        name: None,
    };
    harness.run(command.clone()).unwrap();
    let err = harness.run(command.clone()).unwrap_err();
    assert!(err.is_conflict());
    assert!(map_error(&command, &err).contains("already registered"));
}

#[test]
fn test_setup_agent_rejects_invalid_email() {
    let harness = Harness::new();
    let err = harness
        .run(Commands::SetupAgent {
            email: Some("not-an-email".to_string()),
            name: None,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Usage { .. }), "got {:?}", err);
    assert!(!harness.workspace.path().join(".env").exists());
}

#[test]
fn test_check_api_reachable() {
    let harness = Harness::new();
    let out = harness.run(Commands::CheckApi).unwrap();
    assert!(out.contains("API URL: http://localhost:3000/api"));
    assert!(out.contains("API Key: ✅ Set (pk_test)"));
    assert!(out.contains("Health endpoint: ✅ Reachable"));
}

#[test]
fn test_check_api_unreachable_fails_with_report() {
    let workspace = TempDir::new().unwrap();
    let client = ClawprintClient::with_transport(Arc::new(UnreachableTransport));
    let context = RunContext::with_client(
        workspace.path().to_path_buf(),
        ClientSettings::default(),
        client,
    )
    .unwrap();

    let err = context.execute(&Commands::CheckApi).unwrap_err();
    match err {
        ApiError::ChecksFailed { report, failed, total } => {
            assert_eq!((failed, total), (1, 1));
            assert!(report.contains("API Key: ❌ Not set"));
            assert!(report.contains("connection refused"));
        }
        other => panic!("expected checks failure, got {:?}", other),
    }
}

#[test]
fn test_test_api_suite_passes() {
    let harness = Harness::new();
    let out = harness.run(Commands::TestApi { cleanup: true }).unwrap();
    assert!(out.contains("🎉 All tests passed!"));
    assert!(out.contains("Success Rate: 100.0%"));
    assert!(out.contains("🧹 Cleanup: dissolved test business"));
}
