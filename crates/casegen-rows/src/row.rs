//! Materialized rows
//!
//! A [`Row`] is one test case converted under one fixed [`ArgsCode`]. It is
//! created once and never mutated; a different code yields a different row.

use casegen_model::{display_name, to_params, ArgsCode, Param, TestData};
use std::sync::Arc;

/// Framework-ready representation of one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    args_code: ArgsCode,
    include_expected: bool,
    test_data: Arc<TestData>,
    params: Vec<Param>,
}

impl Row {
    /// Materialize `test_data` under `args_code`
    #[must_use]
    pub fn new(test_data: Arc<TestData>, args_code: ArgsCode, include_expected: bool) -> Self {
        let params = to_params(&test_data, args_code, include_expected);
        Self {
            args_code,
            include_expected,
            test_data,
            params,
        }
    }

    /// Same case under another args code
    ///
    /// Clones this row when the code already matches.
    #[must_use]
    pub fn with_args_code(&self, args_code: ArgsCode) -> Self {
        if args_code == self.args_code {
            self.clone()
        } else {
            Self::new(Arc::clone(&self.test_data), args_code, self.include_expected)
        }
    }

    /// Args code this row was built under
    #[inline]
    #[must_use]
    pub fn args_code(&self) -> ArgsCode {
        self.args_code
    }

    /// Source test case
    #[inline]
    #[must_use]
    pub fn test_data(&self) -> &Arc<TestData> {
        &self.test_data
    }

    /// Converted arguments
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Take the converted arguments
    #[inline]
    #[must_use]
    pub fn into_params(self) -> Vec<Param> {
        self.params
    }

    /// Case label of the source test case
    #[inline]
    #[must_use]
    pub fn test_case_name(&self) -> String {
        self.test_data.test_case_name()
    }

    /// Display name for the given test method
    #[inline]
    #[must_use]
    pub fn display_name(&self, method_name: Option<&str>) -> Option<String> {
        display_name(method_name, self.params.first())
    }
}
