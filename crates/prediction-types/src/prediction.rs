// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prediction records as returned by the predictions endpoints

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};

use crate::status::PredictionStatus;

/// Model input: arbitrary JSON values keyed by input name
pub type PredictionInput = HashMap<String, Value>;

/// Body of a create-prediction request
#[derive(Debug, Clone, Serialize)]
pub struct CreatePredictionRequest<'a> {
    /// Model version the prediction runs against
    pub version: &'a str,
    /// Model input
    pub input: &'a PredictionInput,
}

/// Links the service returns alongside a prediction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionUrls {
    /// URL to fetch the current state of the prediction
    #[serde(default)]
    pub get: String,
    /// URL accepting an authenticated POST to cancel the prediction
    #[serde(default)]
    pub cancel: String,
    /// Server-sent events URL, only present for streaming models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
}

/// A single prediction and its lifecycle state
///
/// The record is a mirror of the server representation. It is replaced
/// wholesale by a refresh and never modified locally otherwise.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Server-assigned prediction identifier
    pub id: String,
    /// Model version the prediction runs against
    pub version: String,
    /// Links to fetch or cancel this prediction
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub urls: PredictionUrls,
    /// When the prediction was created
    pub created_at: DateTime<Utc>,
    /// When a worker started running the model
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the prediction reached a terminal state
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Current lifecycle status
    pub status: PredictionStatus,
    /// Input the prediction was created with
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub input: PredictionInput,
    /// Model output, shape defined by the model; `Null` until available
    #[serde(default)]
    pub output: Value,
    /// Failure details, `Null` unless the prediction failed
    #[serde(default)]
    pub error: Value,
    /// Model logs, usually a string
    #[serde(default)]
    pub logs: Value,
    /// Runtime metrics such as `predict_time`
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub metrics: HashMap<String, Value>,
}

impl Prediction {
    /// Check if the prediction reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Get the output, if the model produced one
    pub fn output(&self) -> Option<&Value> {
        non_null(&self.output)
    }

    /// Deserialize the output into a concrete type
    ///
    /// Useful when the caller knows the model's output schema, e.g. a list of
    /// image URLs as `Vec<String>`.
    pub fn output_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.output)
    }

    /// Get the failure details, if any
    pub fn error(&self) -> Option<&Value> {
        non_null(&self.error)
    }

    /// Get the failure details when the service reported them as a string
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_str()
    }

    /// Get the logs when the service reported them as a string
    pub fn logs_text(&self) -> Option<&str> {
        self.logs.as_str()
    }

    /// Model run time in seconds, as measured by the service
    pub fn predict_time(&self) -> Option<f64> {
        self.metrics.get("predict_time").and_then(Value::as_f64)
    }

    /// Wall time between start and completion
    pub fn run_duration(&self) -> Option<TimeDelta> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed - started),
            _ => None,
        }
    }
}

fn non_null(value: &Value) -> Option<&Value> {
    if value.is_null() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn succeeded_fixture() -> Value {
        json!({
            "id": "ufawqhfynnddngldkgtslldrkq",
            "version": "5c7d5dc6dd8bf75c1acaa8565735e7986bc5b66206b55cca93cb72c9bf15ccaa",
            "urls": {
                "get": "https://api.replicate.com/v1/predictions/ufawqhfynnddngldkgtslldrkq",
                "cancel": "https://api.replicate.com/v1/predictions/ufawqhfynnddngldkgtslldrkq/cancel"
            },
            "created_at": "2022-04-26T22:13:06.224088Z",
            "started_at": "2022-04-26T22:13:06.224088Z",
            "completed_at": "2022-04-26T22:13:08.424088Z",
            "status": "succeeded",
            "input": {"text": "Alice", "steps": 20},
            "output": [
                {"file": "https://replicate.delivery/out-0.png", "score": 0.97},
                null,
                ["nested", 1, 2.5, true]
            ],
            "error": null,
            "logs": "Using seed: 42\n",
            "metrics": {"predict_time": 2.2}
        })
    }

    #[test]
    fn decode_succeeded_prediction() {
        let fixture = succeeded_fixture();
        let prediction: Prediction = serde_json::from_value(fixture.clone()).unwrap();

        assert_eq!(prediction.id, "ufawqhfynnddngldkgtslldrkq");
        assert_eq!(prediction.status, PredictionStatus::Succeeded);
        assert!(prediction.is_terminal());
        assert_eq!(prediction.output, fixture["output"]);
        assert_eq!(prediction.output(), Some(&fixture["output"]));
        assert_eq!(prediction.input.get("steps"), Some(&json!(20)));
        assert!(prediction.error().is_none());
        assert_eq!(prediction.logs_text(), Some("Using seed: 42\n"));
        assert_eq!(prediction.predict_time(), Some(2.2));
        assert_eq!(
            prediction.run_duration(),
            Some(TimeDelta::milliseconds(2200))
        );
        assert!(prediction.urls.cancel.ends_with("/cancel"));
    }

    #[test]
    fn decode_starting_prediction_with_nulls() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "abc",
            "version": "v1",
            "urls": null,
            "created_at": "2024-01-01T00:00:00Z",
            "started_at": null,
            "completed_at": null,
            "status": "starting",
            "input": null,
            "output": null,
            "error": null,
            "logs": null,
            "metrics": null
        }))
        .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Starting);
        assert!(!prediction.is_terminal());
        assert!(prediction.started_at.is_none());
        assert!(prediction.output().is_none());
        assert!(prediction.input.is_empty());
        assert!(prediction.metrics.is_empty());
        assert_eq!(prediction.urls, PredictionUrls::default());
        assert!(prediction.run_duration().is_none());
    }

    #[test]
    fn decode_prediction_with_missing_optional_fields() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "abc",
            "version": "v1",
            "created_at": "2024-01-01T00:00:00Z",
            "status": "processing"
        }))
        .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Processing);
        assert!(prediction.output.is_null());
        assert!(prediction.logs_text().is_none());
    }

    #[test]
    fn failed_prediction_exposes_error() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "abc",
            "version": "v1",
            "created_at": "2024-01-01T00:00:00Z",
            "status": "failed",
            "error": "CUDA out of memory"
        }))
        .unwrap();

        assert!(prediction.is_terminal());
        assert_eq!(prediction.error_message(), Some("CUDA out of memory"));
        assert!(prediction.output().is_none());
    }

    #[test]
    fn unknown_status_fails_decoding() {
        let result = serde_json::from_value::<Prediction>(json!({
            "id": "abc",
            "version": "v1",
            "created_at": "2024-01-01T00:00:00Z",
            "status": "paused"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn typed_output() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "abc",
            "version": "v1",
            "created_at": "2024-01-01T00:00:00Z",
            "status": "succeeded",
            "output": ["https://replicate.delivery/a.png", "https://replicate.delivery/b.png"]
        }))
        .unwrap();

        let urls: Vec<String> = prediction.output_as().unwrap();
        assert_eq!(urls.len(), 2);
        assert!(prediction.output_as::<HashMap<String, String>>().is_err());
    }

    #[test]
    fn create_request_serialization() {
        let mut input = PredictionInput::new();
        input.insert("prompt".to_string(), json!("a cat"));

        let request = CreatePredictionRequest {
            version: "v1",
            input: &input,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"version": "v1", "input": {"prompt": "a cat"}})
        );
    }
}
