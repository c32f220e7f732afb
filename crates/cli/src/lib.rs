// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Replicate command-line tool
//!
//! A thin front end over [`replicate_client`] for listing model versions,
//! creating predictions and inspecting their progress.
//!
//! # Module Structure
//!
//! - [`config`]: Settings loaded from defaults, `replicate.json` and `REPLICATE_*` variables
//! - [`commands`]: clap command-line definition and command execution against any `PredictionApi`
//! - [`error`]: Error type surfaced to the user

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{Cli, Command, WaitOptions, run};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
