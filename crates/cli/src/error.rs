// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the command-line tool

use std::path::PathBuf;

use api_client::ApiError;
use replicate_client::ReplicateError;
use thiserror::Error;

/// Result type alias for command-line operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the user by the command-line tool
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Client construction failed
    #[error(transparent)]
    Client(#[from] ReplicateError),

    /// A request to the prediction API failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    InputFile {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The prediction did not reach a terminal state in time
    #[error("Prediction {prediction_id} still {status} after {waited_seconds} seconds")]
    WaitTimeout {
        /// Prediction being waited on
        prediction_id: String,
        /// Last observed status
        status: String,
        /// How long the tool waited
        waited_seconds: u64,
    },

    /// Output could not be rendered
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
