// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `owner/model` identifiers

use core::fmt;
use std::str::FromStr;

use crate::{error::ReplicateError, non_empty_string::NonEmptyString};

/// A model addressed as `owner/model`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelIdentifier {
    owner: NonEmptyString,
    name: NonEmptyString,
}

impl ModelIdentifier {
    /// Account or organization owning the model
    pub fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Model name within the owner's namespace
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Path segments of the endpoint listing the versions of this model
    pub(crate) fn versions_segments(&self) -> [&str; 4] {
        ["models", self.owner(), self.name(), "versions"]
    }
}

/// Check that `segment` addresses exactly one path segment
///
/// Blank values and dot segments are refused, as are characters a URL parser
/// treats as separators or escapes.
pub(crate) fn is_path_segment(segment: &str) -> bool {
    !segment.trim().is_empty()
        && !matches!(segment, "." | "..")
        && !segment.contains(['/', '\\', '?', '#', '%'])
}

impl FromStr for ModelIdentifier {
    type Err = ReplicateError;

    /// Parse `owner/model`; exactly two plain path segments are required
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReplicateError::InvalidModelIdentifier {
            identifier: s.to_string(),
        };

        let mut segments = s.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None)
                if is_path_segment(owner) && is_path_segment(name) =>
            {
                Ok(Self {
                    owner: NonEmptyString::new(owner).map_err(|_| invalid())?,
                    name: NonEmptyString::new(name).map_err(|_| invalid())?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
