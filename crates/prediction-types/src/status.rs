// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prediction lifecycle status

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status of a prediction as reported by the remote service
///
/// `Starting` and `Processing` are non-terminal; the remaining variants are
/// terminal. Transitions happen server-side only, the client mirrors them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    /// The prediction is starting up, usually while a worker boots
    Starting,
    /// The model's `predict()` is currently running
    Processing,
    /// The prediction completed successfully
    Succeeded,
    /// The prediction encountered an error during processing
    Failed,
    /// The prediction was canceled by the user
    Canceled,
}

impl PredictionStatus {
    /// Check if no further transitions will happen
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }

    /// Check if the prediction is still queued or running
    pub fn is_running(&self) -> bool {
        !self.is_terminal()
    }

    /// Check if the prediction produced an output
    pub fn is_succeeded(&self) -> bool {
        matches!(self, PredictionStatus::Succeeded)
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
