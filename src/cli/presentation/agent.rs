//! Agent presentation: registration result and stored credentials.

use crate::models::AgentRegistration;
use serde_json::json;
use std::path::Path;

pub fn format_agent_registered_text(
    registration: &AgentRegistration,
    api_url: &str,
    credentials_path: &Path,
) -> String {
    let mut out = String::from("✅ Agent registered successfully!\n\n");
    if let Some(ref user) = registration.user {
        out.push_str(&format!("👤 Agent: {}", user.email));
        if let Some(ref name) = user.display_name {
            out.push_str(&format!(" ({})", name));
        }
        out.push_str("\n\n");
    }
    out.push_str("📋 API Credentials:\n");
    out.push_str(&format!("   Public Key: {}\n", registration.public_key));
    out.push_str(&format!("   Secret Key: {}\n\n", registration.secret_preview()));
    out.push_str(&format!("💾 Credentials saved to: {}\n", credentials_path.display()));
    out.push_str(&format!(
        "   CLAWPRINT_API_KEY={}:{}\n",
        registration.public_key,
        registration.secret_preview()
    ));
    out.push_str(&format!("   CLAWPRINT_API_URL={}\n\n", api_url));
    out.push_str("⚠️  Keep your secret key safe!\n");
    out.push_str("   Do not commit .env to version control.\n");
    out.push_str("   Do not share your secret key.\n\n");
    out.push_str("🚀 You can now create a business:\n");
    out.push_str("   clawprint create-business --name \"My Business LLC\" --purpose \"Software\" --sponsor sponsor@example.com");
    out
}

/// JSON view; the secret is never echoed in full.
pub fn agent_registered_json(
    registration: &AgentRegistration,
    api_url: &str,
    credentials_path: &Path,
) -> serde_json::Value {
    json!({
        "user": registration.user,
        "public_key": registration.public_key,
        "secret_key_preview": registration.secret_preview(),
        "api_url": api_url,
        "credentials_file": credentials_path.display().to_string(),
    })
}
