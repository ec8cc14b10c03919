//! CLI Router
//!
//! `bootprint <command> [args...]` looks the command up in a fixed table and
//! runs the `clawprint` executable as a child with the same arguments and the
//! parent's stdio. The child's exit code becomes the router's.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Overrides the location of the command executable.
pub const BIN_VAR: &str = "CLAWPRINT_BIN";

/// Name of the command executable looked up next to the router.
pub const COMMAND_BINARY: &str = "clawprint";

/// A routable command and its one-line description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub name: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[RouteEntry] = &[
    RouteEntry { name: "create-business", summary: "Create a new agent-operated business" },
    RouteEntry { name: "check-status", summary: "Check formation status" },
    RouteEntry { name: "generate-invoice", summary: "Generate a payment invoice" },
    RouteEntry { name: "get-financials", summary: "View financial summary" },
    RouteEntry { name: "create-invoice", summary: "Create an itemized invoice" },
    RouteEntry { name: "check-invoice-status", summary: "Show an invoice and its payment state" },
    RouteEntry { name: "generate-payment-link", summary: "Get or create an invoice payment link" },
    RouteEntry { name: "setup-agent", summary: "Register an agent and store its API key" },
    RouteEntry { name: "check-api", summary: "Check API configuration and connectivity" },
];

/// What the router should do with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Help,
    Unknown(String),
    Run {
        command: &'static str,
        args: Vec<OsString>,
    },
}

pub fn lookup(name: &str) -> Option<&'static RouteEntry> {
    COMMANDS.iter().find(|entry| entry.name == name)
}

/// Resolve the arguments that follow the program name.
pub fn resolve<I, S>(args: I) -> Route
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let Some(first) = args.next() else {
        return Route::Help;
    };
    let name = first.to_string_lossy().to_string();
    if matches!(name.as_str(), "help" | "--help" | "-h") {
        return Route::Help;
    }
    match lookup(&name) {
        Some(entry) => Route::Run {
            command: entry.name,
            args: args.collect(),
        },
        None => Route::Unknown(name),
    }
}

pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.name.len()).max().unwrap_or(0).max(4);
    let mut out = String::new();
    out.push_str("Bootprint CLI - Business infrastructure for AI agents\n\n");
    out.push_str("Usage:\n  bootprint <command> [options]\n\nCommands:\n");
    for entry in COMMANDS {
        out.push_str(&format!("  {:<width$}   {}\n", entry.name, entry.summary, width = width));
    }
    out.push_str(&format!("  {:<width$}   {}\n", "help", "Show this help message", width = width));
    out.push_str("\nExamples:\n");
    out.push_str("  bootprint create-business --name \"Acme AI\" --purpose \"Software\" --sponsor you@example.com\n");
    out.push_str("  bootprint check-status --business-id biz_abc123\n");
    out.push_str("  bootprint generate-invoice --business-id biz_abc123 --amount 1000 --description \"Consulting\" --customer-email client@example.com\n");
    out.push_str("  bootprint get-financials --business-id biz_abc123");
    out
}

pub fn unknown_command_message(name: &str) -> String {
    format!(
        "Error: Unknown command \"{}\"\nRun \"bootprint help\" to see available commands.",
        name
    )
}

/// The command executable: `CLAWPRINT_BIN` if set, else a sibling of `current_exe`.
pub fn command_binary(current_exe: Option<&Path>) -> PathBuf {
    if let Some(path) = std::env::var_os(BIN_VAR).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let file_name = format!("{}{}", COMMAND_BINARY, std::env::consts::EXE_SUFFIX);
    match current_exe.and_then(Path::parent) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Exit code to propagate; termination by signal maps to 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Spawn `binary <command> <args...>` with inherited stdio and wait for it.
pub fn run_child(binary: &Path, command: &str, args: &[OsString]) -> std::io::Result<i32> {
    debug!(binary = %binary.display(), command, "Dispatching command");
    let status = Command::new(binary).arg(command).args(args).status()?;
    debug!(command, code = ?status.code(), "Command exited");
    Ok(exit_code(status))
}
