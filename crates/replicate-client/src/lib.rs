// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Replicate prediction API integration
//!
//! This crate provides an implementation of the `PredictionApi` trait for the
//! Replicate HTTP API: creating predictions, fetching and refreshing them, and
//! listing the versions of a model.
//!
//! # Architecture
//!
//! - **Client**: [`client::ReplicateClient`] - one model and version, one round trip per call
//! - **Configuration**: [`config::ReplicateConfig`] - per-client API location, token and timeout
//! - **Errors**: [`error::ReplicateError`] and the status classifier run before any body decoding
//! - **Input helpers**: [`encoding`] - embed binary files in the input as `data:` URIs
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use replicate_client::{ReplicateClient, encode_image};
//! use prediction_types::PredictionInput;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReplicateClient::with_token("r8_your_token", "owner/model", "version-id")?;
//!
//! let mut input = PredictionInput::new();
//! input.insert("prompt".to_string(), json!("an astronaut riding a horse"));
//! input.insert("image".to_string(), json!(encode_image(&std::fs::read("horse.png")?)));
//!
//! let mut prediction = client.create_prediction(&input).await?;
//! while !prediction.is_terminal() {
//!     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     client.refresh(&mut prediction).await?;
//! }
//!
//! println!("{}", prediction.output);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod identifier;
pub mod non_empty_string;

pub use client::ReplicateClient;
pub use config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, ReplicateConfig};
pub use encoding::{encode_file, encode_image, sniff_content_type};
pub use error::{ReplicateError, classify_status};
pub use identifier::ModelIdentifier;
pub use non_empty_string::NonEmptyString;
