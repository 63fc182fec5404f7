//! Error types for data sources
//!
//! Covers configuration loading and scope construction. Model-level failures
//! (invalid args codes, missing values) convert in via `From`.

use casegen_model::ModelError;

/// Data source error
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Value model rejected an input
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// TOML configuration could not be parsed
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON configuration could not be parsed
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    /// Check if this is an invalid-configuration error
    ///
    /// Parse failures and out-of-range args codes both count.
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        match self {
            Self::Model(err) => err.is_invalid_configuration(),
            Self::Toml(_) | Self::Json(_) => true,
        }
    }

    /// Underlying model error, if any
    #[inline]
    #[must_use]
    pub fn as_model(&self) -> Option<&ModelError> {
        match self {
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}
