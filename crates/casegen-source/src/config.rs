//! Data source configuration
//!
//! [`SourceConfig`] is the validated form. Files are read through a raw record
//! whose args code is checked once, so an out-of-range value surfaces as a
//! named [`casegen_model::ModelError::InvalidArgsCode`] rather than a generic parse error.

use crate::error::SourceError;
use casegen_model::{ArgsCode, RawArgsCode};
use serde::{Deserialize, Serialize};

/// Data source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfig {
    /// Default conversion mode
    pub args_code: ArgsCode,

    /// Whether returns/throws cases emit their expected value
    pub include_expected: bool,

    /// Name used in log output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SourceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default conversion mode
    #[inline]
    #[must_use]
    pub fn with_args_code(mut self, args_code: ArgsCode) -> Self {
        self.args_code = args_code;
        self
    }

    /// With expected-value inclusion
    #[inline]
    #[must_use]
    pub fn with_include_expected(mut self, include_expected: bool) -> Self {
        self.include_expected = include_expected;
        self
    }

    /// With log name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// [`SourceError::Toml`] on malformed input,
    /// [`SourceError::Model`] on an invalid args code.
    pub fn from_toml_str(input: &str) -> Result<Self, SourceError> {
        let raw: RawSourceConfig = toml::from_str(input)?;
        raw.validate()
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// [`SourceError::Json`] on malformed input,
    /// [`SourceError::Model`] on an invalid args code.
    pub fn from_json_str(input: &str) -> Result<Self, SourceError> {
        let raw: RawSourceConfig = serde_json::from_str(input)?;
        raw.validate()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            args_code: ArgsCode::Instance,
            include_expected: true,
            name: None,
        }
    }
}

/// Unvalidated configuration as written in a file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSourceConfig {
    #[serde(default)]
    args_code: Option<RawArgsCode>,
    #[serde(default)]
    include_expected: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

impl RawSourceConfig {
    fn validate(self) -> Result<SourceConfig, SourceError> {
        let defaults = SourceConfig::default();
        let args_code = self
            .args_code
            .map(ArgsCode::try_from)
            .transpose()?
            .unwrap_or(defaults.args_code);
        Ok(SourceConfig {
            args_code,
            include_expected: self.include_expected.unwrap_or(defaults.include_expected),
            name: self.name,
        })
    }
}
