// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the Replicate prediction API
//!
//! This crate provides the wire representation of predictions and model versions
//! shared by the client implementation and anything written against the
//! `api-client` trait, avoiding circular dependencies between them.

pub mod model_version;
pub mod prediction;
pub mod status;

pub use model_version::{ModelVersion, ModelVersionsPage};
pub use prediction::{CreatePredictionRequest, Prediction, PredictionInput, PredictionUrls};
pub use status::PredictionStatus;
