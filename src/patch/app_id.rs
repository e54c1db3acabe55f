//! Platform app identifier.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::PatchError;

static APP_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}-[A-Za-z0-9]{8}$").expect("literal pattern"));

/// A validated platform-issued app identifier.
///
/// Opaque beyond its lexical format: ten digits, a hyphen, then eight
/// alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Validate and wrap a raw identifier string.
    pub fn parse(raw: &str) -> Result<Self, PatchError> {
        if APP_ID_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(PatchError::InvalidAppId(raw.to_string()))
        }
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
