//! Bootprint Router Binary
//!
//! `bootprint <command> [options]` runs the matching `clawprint` subcommand as
//! a child process and exits with its exit code.

use clawprint::logging::{init_logging, LoggingConfig};
use clawprint::router::{self, Route};
use std::process;
use tracing::{debug, error};

fn main() {
    // Diagnostics only when CLAWPRINT_LOG is set; the child logs for itself.
    if std::env::var_os("CLAWPRINT_LOG").is_some() {
        let config = LoggingConfig {
            enabled: true,
            ..LoggingConfig::default()
        };
        if let Err(e) = init_logging(&config) {
            eprintln!("Failed to initialize logging: {}", e);
        }
    }

    match router::resolve(std::env::args_os().skip(1)) {
        Route::Help => {
            println!("{}", router::help_text());
        }
        Route::Unknown(name) => {
            eprintln!("{}", router::unknown_command_message(&name));
            process::exit(1);
        }
        Route::Run { command, args } => {
            let current_exe = std::env::current_exe().ok();
            let binary = router::command_binary(current_exe.as_deref());
            debug!(command, binary = %binary.display(), "Routing command");
            match router::run_child(&binary, command, &args) {
                Ok(code) => process::exit(code),
                Err(e) => {
                    error!("Failed to start {}: {}", binary.display(), e);
                    eprintln!("Error: failed to run {}: {}", binary.display(), e);
                    process::exit(1);
                }
            }
        }
    }
}
