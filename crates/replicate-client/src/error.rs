// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the Replicate client and HTTP status classification

use api_client::ApiError;
use reqwest::{
    StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use thiserror::Error;

/// Errors specific to the Replicate API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ReplicateError {
    /// Model identifier is not of the form `owner/model`
    #[error("Invalid model identifier '{identifier}': expected owner/model")]
    InvalidModelIdentifier { identifier: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prediction identifier cannot be addressed
    #[error("Invalid prediction id: {0:?}")]
    InvalidPredictionId(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Timeout error
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_seconds: Option<u64> },

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Response body does not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<ReplicateError> for ApiError {
    fn from(value: ReplicateError) -> Self {
        match value {
            ReplicateError::InvalidModelIdentifier { .. } => ApiError::Configuration {
                message: value.to_string(),
            },
            ReplicateError::Config(message) => ApiError::Configuration { message },
            ReplicateError::InvalidPredictionId(_) => ApiError::InvalidRequest {
                message: value.to_string(),
            },
            ReplicateError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            ReplicateError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
            ReplicateError::Unauthorized => ApiError::Authentication {
                message: value.to_string(),
            },
            ReplicateError::RateLimited {
                retry_after_seconds,
            } => ApiError::RateLimitExceeded {
                retry_after_seconds,
            },
            ReplicateError::ApiError { status, message } => ApiError::Service { status, message },
            ReplicateError::Decode(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            ReplicateError::Encode(error) => ApiError::InvalidRequest {
                message: error.to_string(),
            },
        }
    }
}

/// Map a response status to the error it stands for, before any body is read
///
/// Only authentication and rate limiting are classified here. Other failure
/// statuses carry a body worth reporting and are handled by the caller.
pub fn classify_status(status: StatusCode, headers: &HeaderMap) -> Option<ReplicateError> {
    match status {
        StatusCode::UNAUTHORIZED => Some(ReplicateError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Some(ReplicateError::RateLimited {
            retry_after_seconds: retry_after_seconds(headers),
        }),
        _ => None,
    }
}

/// Delay-seconds form of `Retry-After`; the HTTP-date form is ignored
fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
