mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod pipeline;
mod responses;
mod types;

#[cfg(test)]
mod test_support;

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::LinearClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        let prefix = if io::stderr().is_terminal() {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        eprintln!("{prefix} {e}");

        if verbose {
            for cause in extra_causes(&e) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

/// Source chain of `err`, skipping causes already spelled out in the message above them.
fn extra_causes(err: &dyn std::error::Error) -> Vec<String> {
    let mut shown = err.to_string();
    let mut causes = Vec::new();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !shown.contains(&text) {
            causes.push(text.clone());
        }
        shown = text;
        source = cause.source();
    }

    causes
}

/// Logs go to stderr so stdout stays clean Markdown. `RUST_LOG` overrides the default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,linear_updates=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output_format();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "linear-updates", &mut io::stdout());
        }
        Some(Commands::Init) => {
            commands::init::run()?;
        }
        None => {
            let config = Config::load()?;
            tracing::debug!(?config, "resolved configuration");

            let client = LinearClient::new(&config)?;
            commands::updates::run(&client, &cli.updates, format, &mut io::stdout().lock()).await?;
        }
    }

    Ok(())
}
