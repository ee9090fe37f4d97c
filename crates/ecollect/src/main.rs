mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecollect_config::FileTokenStore;
use ecollect_core::{ConsoleConfig, SessionGate};

use crate::cli::{Cli, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never need a backend connection.
        Command::Config(args) => commands::config_cmd::handle(args.command, &cli.global),

        // Shell completions generation.
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ecollect", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the backend.
        cmd => {
            let (config, output) = build_console_config(&cli.global)?;
            let session = SessionGate::new(FileTokenStore::at_default_path());
            let client = config.build_client(session)?;

            let ctx = commands::Ctx {
                client,
                config,
                output,
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &ctx, &cli.global).await
        }
    }
}

/// Merge the config file with CLI flag overrides.
fn build_console_config(global: &GlobalOpts) -> Result<(ConsoleConfig, OutputFormat), CliError> {
    let file = ecollect_config::load_config_or_default();
    let mut config = file.to_console_config();

    if let Some(ref server) = global.server {
        config.server = server.clone();
    }
    if let Some(timeout) = global.timeout {
        config.timeout = Duration::from_secs(timeout);
    }

    let output = match global.output {
        Some(format) => format,
        None => parse_output(&file.defaults.output)?,
    };

    Ok((config, output))
}

fn parse_output(raw: &str) -> Result<OutputFormat, CliError> {
    match raw {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        "json-compact" => Ok(OutputFormat::JsonCompact),
        "yaml" => Ok(OutputFormat::Yaml),
        "plain" => Ok(OutputFormat::Plain),
        other => Err(CliError::BadConfig {
            message: format!("unknown output format {other:?} in config file"),
        }),
    }
}
