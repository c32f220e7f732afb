// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line definition and command execution
//!
//! Arguments are parsed with clap. Commands run against any [`PredictionApi`]
//! implementation and return the rendered JSON to print.

use std::path::PathBuf;
use std::time::Duration;

use api_client::PredictionApi;
use clap::{Parser, Subcommand};
use prediction_types::{Prediction, PredictionInput};
use replicate_client::encode_file;
use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Create and inspect Replicate predictions
#[derive(Debug, Parser)]
#[command(name = "replicate-cli")]
#[command(about = "Create and inspect predictions on the Replicate API")]
#[command(after_help = "Configuration is read from replicate.json and REPLICATE_* environment variables.")]
#[command(version)]
pub struct Cli {
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List versions of the configured model, newest first
    Versions,

    /// Show the current state of a prediction
    Get {
        /// Prediction identifier
        prediction_id: String,
    },

    /// Create a prediction with the configured model version
    Predict {
        /// Input field; the value is parsed as JSON, else used as a string
        #[arg(long = "input", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        inputs: Vec<(String, String)>,

        /// Input field holding a file encoded as a data URI
        #[arg(long = "image", value_name = "KEY=PATH", value_parser = parse_key_path)]
        images: Vec<(String, PathBuf)>,

        /// Poll until the prediction finishes
        #[arg(long)]
        wait: bool,
    },
}

/// Polling cadence for `predict --wait`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between refreshes
    pub poll_interval: Duration,
    /// Give up after this long
    pub max_wait: Duration,
}

/// Split a `key=value` argument at the first `=`
pub fn parse_key_val(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got `{pair}`")),
    }
}

fn parse_key_path(pair: &str) -> Result<(String, PathBuf), String> {
    parse_key_val(pair).map(|(key, path)| (key, PathBuf::from(path)))
}

/// Interpret a raw input value as JSON, falling back to a plain string
pub fn parse_input_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Assemble a prediction input from command-line fields
///
/// Files are read and embedded as `data:` URIs.
///
/// # Errors
///
/// Returns `CliError::InputFile` if a file cannot be read.
pub async fn build_input(
    inputs: &[(String, String)],
    images: &[(String, PathBuf)],
) -> CliResult<PredictionInput> {
    let mut input = PredictionInput::new();

    for (key, raw) in inputs {
        input.insert(key.clone(), parse_input_value(raw));
    }

    for (key, path) in images {
        let uri = encode_file(path)
            .await
            .map_err(|source| CliError::InputFile {
                path: path.clone(),
                source,
            })?;
        debug!(key = %key, path = %path.display(), "embedded input file");
        input.insert(key.clone(), Value::String(uri));
    }

    Ok(input)
}

/// Refresh `prediction` until it reaches a terminal state
///
/// # Errors
///
/// Returns `CliError::WaitTimeout` once `max_wait` has elapsed, or the API
/// error of a failed refresh.
pub async fn wait_for_completion<A: PredictionApi>(
    api: &A,
    prediction: &mut Prediction,
    options: WaitOptions,
) -> CliResult<()> {
    let started = Instant::now();

    while !prediction.is_terminal() {
        if started.elapsed() >= options.max_wait {
            return Err(CliError::WaitTimeout {
                prediction_id: prediction.id.clone(),
                status: prediction.status.to_string(),
                waited_seconds: started.elapsed().as_secs(),
            });
        }

        tokio::time::sleep(options.poll_interval).await;
        api.refresh_prediction(prediction).await?;
        debug!(
            prediction_id = %prediction.id,
            status = %prediction.status,
            "refreshed prediction"
        );
    }

    Ok(())
}

/// Execute a command and render its result as pretty JSON
///
/// # Errors
///
/// Returns any API, input or wait error encountered while running the command.
pub async fn run<A: PredictionApi>(
    api: &A,
    command: Command,
    options: WaitOptions,
) -> CliResult<String> {
    match command {
        Command::Versions => render(&api.list_model_versions().await?),
        Command::Get { prediction_id } => render(&api.get_prediction(&prediction_id).await?),
        Command::Predict {
            inputs,
            images,
            wait,
        } => {
            let input = build_input(&inputs, &images).await?;
            let mut prediction = api.create_prediction(input).await?;
            info!(
                api = api.name(),
                prediction_id = %prediction.id,
                status = %prediction.status,
                "prediction submitted"
            );

            if wait {
                wait_for_completion(api, &mut prediction, options).await?;
                info!(
                    prediction_id = %prediction.id,
                    status = %prediction.status,
                    "prediction finished"
                );
            }

            render(&prediction)
        }
    }
}

fn render<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
