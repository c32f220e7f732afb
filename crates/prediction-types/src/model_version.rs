// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Model versions and the paginated envelope they are listed in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};

/// A single version of a model with its input/output schema
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    /// Version identifier, used when creating predictions
    pub id: String,
    /// When the version was pushed
    pub created_at: DateTime<Utc>,
    /// Version of the runtime the model was built with
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cog_version: String,
    /// OpenAPI document describing accepted input and produced output
    #[serde(default)]
    pub openapi_schema: Value,
}

/// One page of the model versions listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersionsPage {
    /// Cursor URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Cursor URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Versions on this page
    #[serde(default)]
    pub results: Vec<ModelVersion>,
}

impl ModelVersionsPage {
    /// Check if the service reported further pages
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Consume the page, returning its versions most recent first
    ///
    /// Versions created at the same instant keep their relative order.
    pub fn into_sorted_results(self) -> Vec<ModelVersion> {
        let mut results = self.results;
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }
}
