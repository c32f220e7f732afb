// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Replicate prediction API client
//!
//! This module provides [`ReplicateClient`], bound to one `owner/model` and
//! version, plus its implementation of the `PredictionApi` trait. Every method
//! performs exactly one HTTP round trip; polling and retrying belong to the caller.

use api_client::{ApiError, PredictionApi};
use prediction_types::{
    CreatePredictionRequest, ModelVersion, ModelVersionsPage, Prediction, PredictionInput,
};
use reqwest::{
    Client, Method, RequestBuilder,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::ReplicateConfig,
    error::{ReplicateError, classify_status},
    identifier::{ModelIdentifier, is_path_segment},
    non_empty_string::NonEmptyString,
};

/// Replicate API client implementation
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: Client,
    config: ReplicateConfig,
    model: ModelIdentifier,
    version: NonEmptyString,
}

impl ReplicateClient {
    /// Create a new client bound to a model and version
    ///
    /// # Arguments
    ///
    /// * `config` - API location, credentials and timeout
    /// * `model` - Model identifier of the form `owner/model`
    /// * `version` - Model version identifier used for new predictions
    ///
    /// # Errors
    ///
    /// Returns [`ReplicateError::InvalidModelIdentifier`] if `model` does not split
    /// into exactly two non-empty segments, or [`ReplicateError::Config`] if the
    /// configuration is invalid or the HTTP client cannot be created. No network
    /// request is made.
    pub fn new(
        config: ReplicateConfig,
        model: &str,
        version: impl Into<String>,
    ) -> Result<Self, ReplicateError> {
        let model: ModelIdentifier = model.parse()?;
        let version = NonEmptyString::new(version)
            .map_err(|_| ReplicateError::Config("Model version cannot be empty".to_string()))?;

        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ReplicateError::Config(format!("Failed to create HTTP client: {e}")))?;

        debug!(
            model = %model,
            version = %version,
            base_url = %config.base_url,
            "created Replicate client"
        );

        Ok(Self {
            client,
            config,
            model,
            version,
        })
    }

    /// Create a client for the public API with default settings
    pub fn with_token(
        api_token: impl Into<String>,
        model: &str,
        version: impl Into<String>,
    ) -> Result<Self, ReplicateError> {
        Self::new(ReplicateConfig::new(api_token), model, version)
    }

    /// Replace the HTTP transport
    ///
    /// Authentication headers are added per request, so any `reqwest::Client`
    /// works; its own timeout settings apply instead of the configured one.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Model this client is bound to
    pub fn model(&self) -> &ModelIdentifier {
        &self.model
    }

    /// Model version used for new predictions
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Client configuration
    pub fn config(&self) -> &ReplicateConfig {
        &self.config
    }

    /// Register an asynchronous prediction with the given input
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the service rejects it
    /// (401, 429 or any other non-success status), or the response is not a prediction
    pub async fn create_prediction(
        &self,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateError> {
        let body = serde_json::to_vec(&CreatePredictionRequest {
            version: self.version.as_str(),
            input,
        })
        .map_err(ReplicateError::Encode)?;

        let request = self.request(Method::POST, &["predictions"])?.body(body);
        let prediction: Prediction = self.execute(request).await?;

        info!(
            prediction_id = %prediction.id,
            status = %prediction.status,
            model = %self.model,
            "created prediction"
        );
        Ok(prediction)
    }

    /// Fetch a prediction by its identifier
    ///
    /// # Errors
    ///
    /// Returns [`ReplicateError::InvalidPredictionId`] for a blank identifier or one
    /// that is not a single plain path segment, otherwise the same errors as
    /// [`Self::create_prediction`]
    pub async fn get_result(&self, prediction_id: &str) -> Result<Prediction, ReplicateError> {
        if !is_path_segment(prediction_id) {
            return Err(ReplicateError::InvalidPredictionId(
                prediction_id.to_string(),
            ));
        }

        let request = self.request(Method::GET, &["predictions", prediction_id])?;
        self.execute(request).await
    }

    /// Replace `prediction` with its current server state
    ///
    /// Every field is overwritten with the decoded response. On error the record
    /// is left as it was. One immediate round trip, no backoff.
    pub async fn refresh(&self, prediction: &mut Prediction) -> Result<(), ReplicateError> {
        let current = self.get_result(&prediction.id).await?;
        debug!(
            prediction_id = %current.id,
            from = %prediction.status,
            to = %current.status,
            "refreshed prediction"
        );
        *prediction = current;
        Ok(())
    }

    /// Fetch the first page of the model's versions, in server order
    ///
    /// The `previous`/`next` cursors are surfaced but not followed.
    pub async fn get_model_versions_page(&self) -> Result<ModelVersionsPage, ReplicateError> {
        let request = self.request(Method::GET, &self.model.versions_segments())?;
        self.execute(request).await
    }

    /// List the model's versions, most recent first
    ///
    /// Only the first page is fetched.
    pub async fn get_model_versions(&self) -> Result<Vec<ModelVersion>, ReplicateError> {
        let page = self.get_model_versions_page().await?;
        if page.has_more() {
            debug!(model = %self.model, "ignoring further pages of model versions");
        }

        let versions = page.into_sorted_results();
        info!(
            model = %self.model,
            count = versions.len(),
            "listed model versions"
        );
        Ok(versions)
    }

    /// Build an authenticated request for the API path made of `segments`
    fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ReplicateError> {
        let url = self.config.endpoint(segments)?;
        debug!(%method, %url, "sending request to Replicate");

        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, self.config.authorization())
            .header(CONTENT_TYPE, "application/json"))
    }

    /// Send a request and decode a successful response body
    ///
    /// The status is classified before the body is touched; on every early
    /// return the response is dropped, releasing the connection.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ReplicateError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if let Some(error) = classify_status(status, response.headers()) {
            warn!(status = status.as_u16(), "Replicate API rejected request: {error}");
            return Err(error);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Replicate API error: {} - {}", status.as_u16(), message);
            return Err(ReplicateError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(ReplicateError::Decode)
    }

    fn transport_error(&self, error: reqwest::Error) -> ReplicateError {
        if error.is_timeout() {
            ReplicateError::Timeout {
                seconds: self.config.timeout_seconds,
            }
        } else {
            ReplicateError::Http(error)
        }
    }
}

impl PredictionApi for ReplicateClient {
    async fn create_prediction(&self, input: PredictionInput) -> Result<Prediction, ApiError> {
        ReplicateClient::create_prediction(self, &input)
            .await
            .map_err(Into::into)
    }

    async fn get_prediction(&self, prediction_id: &str) -> Result<Prediction, ApiError> {
        self.get_result(prediction_id).await.map_err(Into::into)
    }

    async fn refresh_prediction(&self, prediction: &mut Prediction) -> Result<(), ApiError> {
        self.refresh(prediction).await.map_err(Into::into)
    }

    async fn list_model_versions(&self) -> Result<Vec<ModelVersion>, ApiError> {
        self.get_model_versions().await.map_err(Into::into)
    }

    fn name(&self) -> &'static str {
        "replicate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_success() {
        let client = ReplicateClient::with_token("r8_token", "owner/model", "v1").unwrap();
        assert_eq!(client.model().owner(), "owner");
        assert_eq!(client.model().name(), "model");
        assert_eq!(client.version(), "v1");
        assert_eq!(PredictionApi::name(&client), "replicate");
    }

    #[test]
    fn client_creation_invalid_model() {
        let client = ReplicateClient::with_token("r8_token", "modelonly", "v1");
        assert!(matches!(
            client.unwrap_err(),
            ReplicateError::InvalidModelIdentifier { .. }
        ));
    }

    #[test]
    fn client_creation_invalid_config() {
        let client = ReplicateClient::with_token("", "owner/model", "v1");
        assert!(matches!(client.unwrap_err(), ReplicateError::Config(_)));

        let client = ReplicateClient::with_token("r8_token", "owner/model", " ");
        assert!(matches!(client.unwrap_err(), ReplicateError::Config(_)));
    }

    #[tokio::test]
    async fn get_result_rejects_unaddressable_ids() {
        let client = ReplicateClient::with_token("r8_token", "owner/model", "v1").unwrap();

        for id in [
            "",
            "  ",
            ".",
            "..",
            "abc/cancel",
            "abc\\cancel",
            "abc?x=1",
            "abc#frag",
            "%2e%2e",
        ] {
            match client.get_result(id).await {
                Err(ReplicateError::InvalidPredictionId(reported)) => assert_eq!(reported, id),
                other => panic!("Expected InvalidPredictionId for {id:?}, got: {other:?}"),
            }
        }
    }
}
