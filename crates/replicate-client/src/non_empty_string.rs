// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation
//!
//! [`NonEmptyString`] backs the parts of a client that must never be blank: the
//! model owner and name and the model version. Once constructed the value is
//! guaranteed to contain at least one non-whitespace character.
//!
//! ```rust
//! use replicate_client::NonEmptyString;
//!
//! let owner = NonEmptyString::new("stability-ai").expect("valid owner");
//! assert_eq!(owner.as_str(), "stability-ai");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

/// A string that contains at least one non-whitespace character
///
/// Surrounding whitespace is preserved, only blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString`
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if the string is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_values() {
        assert!(NonEmptyString::new("a").is_ok());
        assert!(NonEmptyString::new(" owner ").is_ok());
        assert_eq!(NonEmptyString::new("v1").unwrap().as_str(), "v1");
    }

    #[test]
    fn rejects_blank_values() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new("   ").is_err());
        assert!("\t\n".parse::<NonEmptyString>().is_err());
    }

    #[test]
    fn displays_inner_value() {
        let name = NonEmptyString::new("llama-2").unwrap();
        assert_eq!(name.to_string(), "llama-2");
        assert_eq!(name.as_ref(), "llama-2");
    }
}
