//! Conversion mode selector
//!
//! Provides [`ArgsCode`], the two-valued switch deciding whether a test case is
//! handed to a test as one object or decomposed into its properties.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Parameter name reported when a raw code is rejected without context
pub const ARGS_CODE_PARAM: &str = "args_code";

/// How a test case is turned into test method arguments
///
/// # Representation
/// - [`ArgsCode::Instance`]: `[test_data]`
/// - [`ArgsCode::Properties`]: `[label, expected?, arg1, arg2, ...]`
///
/// Raw values (integers from configuration or foreign callers) are validated
/// once with [`ArgsCode::try_from_raw`]; past that boundary the type system
/// guarantees the value is a member of the set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "RawArgsCode")]
pub enum ArgsCode {
    /// Pass the whole test data object
    #[default]
    Instance = 0,

    /// Pass the label followed by the unwrapped fields
    Properties = 1,
}

impl ArgsCode {
    /// All members, in ordinal order
    pub const ALL: [Self; 2] = [Self::Instance, Self::Properties];

    /// Highest defined ordinal
    pub const MAX_ORDINAL: i64 = Self::Properties as i64;

    /// Validate a raw value at an API boundary
    ///
    /// # Errors
    /// [`ModelError::InvalidArgsCode`] carrying `param_name` for any value
    /// other than `0` or `1`.
    pub fn try_from_raw(value: i64, param_name: &'static str) -> Result<Self, ModelError> {
        match value {
            0 => Ok(Self::Instance),
            1 => Ok(Self::Properties),
            other => Err(ModelError::invalid_args_code(param_name, other)),
        }
    }

    /// Ordinal value
    #[inline]
    #[must_use]
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Properties => "properties",
        }
    }

    /// Check if rows decompose into properties
    #[inline]
    #[must_use]
    pub fn is_properties(self) -> bool {
        matches!(self, Self::Properties)
    }
}

impl TryFrom<i64> for ArgsCode {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_raw(value, ARGS_CODE_PARAM)
    }
}

impl FromStr for ArgsCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instance" => Ok(Self::Instance),
            "properties" => Ok(Self::Properties),
            _ => Err(ModelError::UnknownArgsCodeName {
                param: ARGS_CODE_PARAM,
                name: s.to_string(),
            }),
        }
    }
}

impl Display for ArgsCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated args code as written in a file: ordinal or name
///
/// Convert with [`ArgsCode::try_from`]; errors name the `args_code` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawArgsCode {
    /// Integer form, `0` or `1`
    Ordinal(i64),
    /// Name form, `"instance"` or `"properties"`
    Name(String),
}

impl TryFrom<RawArgsCode> for ArgsCode {
    type Error = ModelError;

    fn try_from(raw: RawArgsCode) -> Result<Self, Self::Error> {
        match raw {
            RawArgsCode::Ordinal(value) => Self::try_from(value),
            RawArgsCode::Name(name) => name.parse(),
        }
    }
}
