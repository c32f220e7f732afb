// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic prediction API client trait and error types
//!
//! This crate provides the abstraction callers program against when they submit
//! predictions to a hosted inference service, so the concrete HTTP client can be
//! swapped for another implementation or an in-memory fake in tests.
//!
//! # Core Abstractions
//!
//! - **`PredictionApi` Trait**: create, fetch and refresh predictions, list model versions
//! - **Error Handling**: `ApiError` classifies authentication, rate limiting, transport
//!   and response failures independently of the client implementation
//!
//! The trait performs no polling or retrying on its own. Every method is a single
//! request; callers decide cadence and retry policy, using
//! [`ApiError::is_retryable`] as a hint.

use prediction_types::{ModelVersion, Prediction, PredictionInput};
use thiserror::Error;

/// Generic trait for prediction API clients
///
/// An implementation is bound to one model and version at construction; the
/// methods address that model implicitly.
pub trait PredictionApi: Send + Sync {
    /// Submit an asynchronous prediction with the given input
    ///
    /// # Returns
    ///
    /// The prediction as registered by the service, usually in the `starting` state
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is rejected, or the response cannot be parsed
    fn create_prediction(
        &self,
        input: PredictionInput,
    ) -> impl Future<Output = Result<Prediction, ApiError>> + Send;

    /// Fetch the current state of a prediction by its identifier
    fn get_prediction(
        &self,
        prediction_id: &str,
    ) -> impl Future<Output = Result<Prediction, ApiError>> + Send;

    /// Replace `prediction` with the current server state
    ///
    /// On error the record is left untouched.
    fn refresh_prediction(
        &self,
        prediction: &mut Prediction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move {
            let current = self.get_prediction(&prediction.id).await?;
            *prediction = current;
            Ok(())
        }
    }

    /// List the versions of the bound model, most recent first
    fn list_model_versions(
        &self,
    ) -> impl Future<Output = Result<Vec<ModelVersion>, ApiError>> + Send;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with prediction API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded{}", retry_hint(.retry_after_seconds))]
    RateLimitExceeded { retry_after_seconds: Option<u64> },

    /// Service answered with an unexpected status
    #[error("Service error: {status} - {message}")]
    Service { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Request rejected locally before being sent
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

#[allow(clippy::ref_option)]
fn retry_hint(retry_after_seconds: &Option<u64>) -> String {
    retry_after_seconds
        .map(|seconds| format!(", retry after {seconds} seconds"))
        .unwrap_or_default()
}

impl ApiError {
    /// Check if repeating the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http { .. } | ApiError::Timeout { .. } | ApiError::RateLimitExceeded { .. } => {
                true
            }
            ApiError::Service { status, .. } => *status >= 500,
            ApiError::Authentication { .. }
            | ApiError::InvalidResponse { .. }
            | ApiError::InvalidRequest { .. }
            | ApiError::Configuration { .. } => false,
        }
    }
}
