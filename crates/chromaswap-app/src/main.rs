// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chromaswap: Reorder RGB channels and chart image statistics.
//
// Entry point. Initialises logging, loads settings, and dispatches the
// subcommand. Errors are printed in plain language on stderr.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;

use chromaswap_core::AppConfig;
use chromaswap_core::error::Result;
use chromaswap_core::human_errors::humanize_error;
use chromaswap_core::types::ChannelOrder;

use cli::{Cli, Command};
use services::config_path::default_config_path;
use services::pipeline::{image_stats, process_file};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Command::Process { input, order } => {
            let outcome = process_file(&config, input, *order)?;
            println!("{}", outcome.report_path.display());
        }
        Command::Stats { input } => {
            let stats = image_stats(input, config.profile_mode)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Orders => {
            for order in ChannelOrder::ALL {
                println!("{order}  (undo with {})", order.inverse());
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    tracing::debug!(path = %path.display(), "loading settings");

    let mut config = AppConfig::load(&path)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}
