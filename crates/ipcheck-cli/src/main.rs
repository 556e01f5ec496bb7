//! CLI entry point for ipcheck.
//!
//! This module is thin: it handles argument parsing, I/O, logging setup, and
//! exit codes. All business logic lives in the `ipcheck-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use ipcheck_app::{
    AuthorizeInput, ExplainOutput, SourceInput, decision_exit_code, format_explanation,
    format_not_found, format_summary, run_authorize, run_explain, run_validate, serialize_record,
};
use ipcheck_settings::Overrides;
use ipcheck_types::Action;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "ipcheck",
    version,
    about = "Network-location access control for attendance check-in and check-out"
)]
struct Cli {
    /// Path to ipcheck config TOML.
    #[arg(long, default_value = "ipcheck.toml")]
    config: Utf8PathBuf,

    /// Override the global check switch (true|false|yes|no|on|off|1|0).
    #[arg(long, value_parser = parse_bool_flag)]
    checking_enabled: Option<bool>,

    /// Override whether X-Forwarded-For / X-Real-IP are trusted.
    #[arg(long, value_parser = parse_bool_flag)]
    trust_proxy_headers: Option<bool>,

    /// Log filter (e.g. `info`, `ipcheck_domain=debug`). Falls back to RUST_LOG, then `warn`.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether an employee may check in or out from an address.
    Authorize {
        /// Employee id from the config.
        #[arg(long)]
        employee: u64,

        /// `check-in` or `check-out`.
        #[arg(long, value_parser = parse_action)]
        action: Action,

        /// Peer address of the request.
        #[arg(long)]
        address: Option<String>,

        /// Raw X-Forwarded-For header value.
        #[arg(long)]
        forwarded_for: Option<String>,

        /// Raw X-Real-IP header value.
        #[arg(long)]
        real_ip: Option<String>,
    },

    /// Validate the config file with the same rules applied on every write.
    Validate,

    /// Explain a deny reason or validation code.
    Explain {
        /// e.g. `address_not_member` or `overlapping_range`.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match &cli.cmd {
        Commands::Authorize {
            employee,
            action,
            address,
            forwarded_for,
            real_ip,
        } => cmd_authorize(
            &cli,
            *employee,
            *action,
            SourceInput {
                peer: address.clone(),
                forwarded_for: forwarded_for.clone(),
                real_ip: real_ip.clone(),
            },
        ),
        Commands::Validate => cmd_validate(&cli),
        Commands::Explain { identifier } => cmd_explain(identifier),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("ipcheck error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_bool_flag(v: &str) -> Result<bool, String> {
    ipcheck_settings::parse_switch(Some(v)).map_err(|e| e.to_string())
}

fn parse_action(v: &str) -> Result<Action, String> {
    Action::parse(v).ok_or_else(|| format!("unknown action: {v} (expected check-in or check-out)"))
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        checking_enabled: cli.checking_enabled,
        trust_proxy_headers: cli.trust_proxy_headers,
    }
}

/// A missing file yields an empty config (checking disabled); other IO errors fail.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path, "config not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn cmd_authorize(
    cli: &Cli,
    employee_id: u64,
    action: Action,
    source: SourceInput,
) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;
    let output = run_authorize(AuthorizeInput {
        config_text: &config_text,
        employee_id,
        action,
        source,
        overrides: overrides(cli),
    })?;

    print!("{}", serialize_record(&output.record)?);
    Ok(decision_exit_code(&output.record))
}

fn cmd_validate(cli: &Cli) -> anyhow::Result<i32> {
    let config_text = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("read config: {}", cli.config))?;
    let output = run_validate(&config_text)?;
    print!("{}", format_summary(&output));
    Ok(0)
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_reasons,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_reasons, available_codes)
            );
            Ok(1)
        }
    }
}
