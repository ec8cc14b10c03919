//! API connectivity presentation for `check-api`.

use super::shared::{rule, RULE_WIDTH};
use crate::config::ClientSettings;
use crate::models::Health;

fn service_line(label: &str, state: Option<&str>) -> String {
    let state = state.unwrap_or("unknown");
    let mark = if state == "up" { "✅" } else { "❌" };
    format!("   {}: {} {}\n", label, mark, state)
}

pub fn format_configuration_text(settings: &ClientSettings) -> String {
    let mut out = String::from("🔍 Clawprint API Connectivity Check\n\n");
    out.push_str(&rule('═', RULE_WIDTH));
    out.push_str("\n\n📋 Configuration:\n");
    out.push_str(&format!("   API URL: {}\n", settings.api_url));
    match settings.public_key() {
        Some(public) => out.push_str(&format!("   API Key: ✅ Set ({})\n", public)),
        None if settings.api_key_configured() => out.push_str("   API Key: ✅ Set\n"),
        None => {
            out.push_str("   API Key: ❌ Not set\n");
            out.push_str("\n⚠️  Warning: API key not configured\n");
            out.push_str("   Set CLAWPRINT_API_KEY or run: clawprint setup-agent --email <email>\n");
        }
    }
    out.push_str(&format!("   Timeout: {}s\n", settings.timeout_secs));
    out
}

pub fn format_health_text(health: &Health) -> String {
    let mut out = String::from("\n📋 Testing Connectivity:\n");
    out.push_str("   Health endpoint: ✅ Reachable\n");
    out.push_str(&format!(
        "   API Version: {}\n",
        health.version.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&service_line("Database", health.services.database.as_deref()));
    out.push_str(&service_line("API", health.services.api.as_deref()));
    if health.is_healthy() {
        out.push_str("\n✅ API is healthy and ready to use!\n");
        out.push_str("\n💡 Try creating a business:\n");
        out.push_str("   clawprint create-business --name \"Test\" --purpose \"Testing\" --sponsor you@example.com");
    } else {
        out.push_str("\n⚠️  API is reachable but some services are degraded");
    }
    out
}

pub fn format_unreachable_text(error: &str) -> String {
    let mut out = String::from("\n📋 Testing Connectivity:\n");
    out.push_str("   Health endpoint: ❌ Unreachable\n");
    out.push_str(&format!("   Error: {}\n", error));
    out.push_str("\n❌ Cannot connect to API\n");
    out.push_str("\n🔧 Troubleshooting:\n");
    out.push_str("   1. Check that the API server is running\n");
    out.push_str("   2. Verify CLAWPRINT_API_URL is correct (default: http://localhost:3000/api)\n");
    out.push_str("   3. Check firewall/network settings\n");
    out.push_str("   4. Review API server logs for errors");
    out
}
