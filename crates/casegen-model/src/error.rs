//! Error types for the value model
//!
//! Two failure classes exist at this layer:
//! - Invalid configuration (a raw [`ArgsCode`](crate::ArgsCode) outside its set)
//! - Missing required values (the Rust rendition of a null argument)

/// Value model error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Raw args code outside the defined set
    #[error("invalid enum value {value} for parameter `{param}`")]
    InvalidArgsCode {
        /// Name of the offending parameter
        param: &'static str,
        /// The rejected raw value
        value: i64,
    },

    /// Unrecognised args code name
    #[error("unknown args code `{name}` for parameter `{param}`")]
    UnknownArgsCodeName {
        /// Name of the offending parameter
        param: &'static str,
        /// The rejected name
        name: String,
    },

    /// More than one of `result`, `returns` and `throws` was given
    #[error("a test case takes only one of `result`, `returns` or `throws`")]
    ConflictingExpectation,

    /// Required value was absent
    #[error("value cannot be null: `{param}`")]
    NullArgument {
        /// Name of the offending parameter
        param: &'static str,
    },
}

impl ModelError {
    /// Create invalid args code error
    #[inline]
    #[must_use]
    pub fn invalid_args_code(param: &'static str, value: i64) -> Self {
        Self::InvalidArgsCode { param, value }
    }

    /// Create null argument error
    #[inline]
    #[must_use]
    pub fn null_argument(param: &'static str) -> Self {
        Self::NullArgument { param }
    }

    /// Name of the parameter this error is about
    #[must_use]
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::InvalidArgsCode { param, .. }
            | Self::UnknownArgsCodeName { param, .. }
            | Self::NullArgument { param } => param,
            Self::ConflictingExpectation => "expectation",
        }
    }

    /// Check if this is an invalid-configuration error
    #[inline]
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgsCode { .. } | Self::UnknownArgsCodeName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_args_code_message_names_param() {
        let err = ModelError::invalid_args_code("args_code", 2);
        assert_eq!(err.to_string(), "invalid enum value 2 for parameter `args_code`");
        assert_eq!(err.param_name(), "args_code");
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn null_argument_is_not_configuration() {
        let err = ModelError::null_argument("expected");
        assert_eq!(err.param_name(), "expected");
        assert!(!err.is_invalid_configuration());
    }
}
