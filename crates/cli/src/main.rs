// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Replicate CLI
//!
//! Create and inspect predictions from the command line.

use anyhow::Result;
use clap::Parser;
use replicate_cli::{Cli, CliConfig, WaitOptions, run};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the JSON result only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::from_env()?;
    debug!(config = ?config, "loaded configuration");

    let client = config.client()?;
    let options = WaitOptions {
        poll_interval: config.poll_interval(),
        max_wait: config.max_wait(),
    };

    let output = run(&client, cli.command, options).await?;
    println!("{output}");

    Ok(())
}
