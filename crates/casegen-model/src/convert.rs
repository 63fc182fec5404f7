//! Conversion engine
//!
//! Turns a [`TestData`] into test method arguments under an [`ArgsCode`]:
//! - `Instance` → `[test_data]`
//! - `Properties` → `[label, expected?, arg1, arg2, ...]`
//!
//! Conversion is a pure function of its inputs. Raw codes are validated once in
//! [`convert_raw`]; the inner walk never re-validates.

use crate::arg::Arg;
use crate::args_code::{ArgsCode, ARGS_CODE_PARAM};
use crate::error::ModelError;
use crate::test_data::TestData;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// One element of a converted argument list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Param {
    /// The whole test case, shared with the caller
    TestData(Arc<TestData>),

    /// A single value: label, expected value or payload argument
    Value(Arg),
}

impl Param {
    /// Value content, if this is not an instance
    #[inline]
    #[must_use]
    pub fn as_arg(&self) -> Option<&Arg> {
        match self {
            Self::Value(arg) => Some(arg),
            Self::TestData(_) => None,
        }
    }

    /// Instance content, if this is an instance
    #[inline]
    #[must_use]
    pub fn as_test_data(&self) -> Option<&Arc<TestData>> {
        match self {
            Self::TestData(data) => Some(data),
            Self::Value(_) => None,
        }
    }

    /// Check if this param is the given instance (pointer identity)
    #[inline]
    #[must_use]
    pub fn is_same_instance(&self, data: &Arc<TestData>) -> bool {
        matches!(self, Self::TestData(held) if Arc::ptr_eq(held, data))
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestData(data) => write!(f, "{data}"),
            Self::Value(arg) => write!(f, "{arg}"),
        }
    }
}

impl From<Arg> for Param {
    fn from(arg: Arg) -> Self {
        Self::Value(arg)
    }
}

/// Convert with the expected value included
#[inline]
#[must_use]
pub fn to_args(data: &Arc<TestData>, args_code: ArgsCode) -> Vec<Param> {
    to_params(data, args_code, true)
}

/// Convert a test case into an argument list
///
/// # Arguments
/// * `data` - Test case; returned as-is under `Instance`
/// * `args_code` - Conversion mode
/// * `include_expected` - Whether returns/throws cases emit their expected
///   value right after the label under `Properties`
#[must_use]
pub fn to_params(data: &Arc<TestData>, args_code: ArgsCode, include_expected: bool) -> Vec<Param> {
    tracing::trace!(
        case = %data.definition(),
        %args_code,
        include_expected,
        "converting test data"
    );

    match args_code {
        ArgsCode::Instance => vec![Param::TestData(Arc::clone(data))],
        ArgsCode::Properties => {
            let mut params = Vec::with_capacity(data.arity() + 2);
            params.push(Param::Value(Arg::Str(data.test_case_name())));
            if include_expected {
                if let Some(expected) = data.expected() {
                    params.push(Param::Value(expected));
                }
            }
            params.extend(data.args().iter().cloned().map(Param::Value));
            params
        }
    }
}

/// Convert using a raw, unvalidated code
///
/// # Errors
/// [`ModelError::InvalidArgsCode`] naming `args_code` if the value is out of range.
pub fn convert_raw(
    data: &Arc<TestData>,
    args_code: i64,
    include_expected: bool,
) -> Result<Vec<Param>, ModelError> {
    let args_code = ArgsCode::try_from_raw(args_code, ARGS_CODE_PARAM)?;
    Ok(to_params(data, args_code, include_expected))
}

/// Display name for a generated test case
///
/// Format: `{method_name}({first_arg})`. Returns `None` if the method name is
/// absent or empty.
#[must_use]
pub fn display_name(method_name: Option<&str>, first_arg: Option<&Param>) -> Option<String> {
    let method_name = method_name.filter(|name| !name.is_empty())?;
    let first = first_arg.map(ToString::to_string).unwrap_or_default();
    Some(format!("{method_name}({first})"))
}
