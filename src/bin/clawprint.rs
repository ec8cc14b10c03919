//! Clawprint CLI Binary
//!
//! One subcommand per API operation. Reports go to stdout, errors to stderr,
//! and every failure exits with code 1.

use clap::Parser;
use clawprint::cli::{map_error, Cli, OutputFormat, RunContext};
use clawprint::config::{ConfigLoader, ConfigOverrides};
use clawprint::error::ApiError;
use clawprint::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Clawprint CLI starting");

    let format = match OutputFormat::parse(&cli.format) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{}", map_error(&cli.command, &e));
            process::exit(1);
        }
    };

    let overrides = ConfigOverrides {
        api_url: cli.api_url.clone(),
        api_key: cli.api_key.clone(),
        timeout_secs: cli.timeout,
    };
    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone(), &overrides) {
        Ok(ctx) => {
            info!("CLI context initialized");
            ctx.with_format(format)
        }
        Err(e) => {
            error!("Error initializing client: {}", e);
            eprintln!("{}", map_error(&cli.command, &e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            if let ApiError::ChecksFailed { ref report, .. } = e {
                println!("{}", report);
            }
            eprintln!("{}", map_error(&cli.command, &e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config layers.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path, &cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.enabled = true;
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
