//! Testing utilities for Casegen workspace
//!
//! Shared test helpers, fixtures, and tracing setup.

#![allow(missing_docs)]

use anyhow::Context;
use casegen_model::{ArgsCode, ExpectedError, TestData};
use casegen_source::{DataSource, SourceConfig};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-friendly subscriber once per process; honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn compare_case() -> TestData {
    TestData::new("a>b", "true").with_arg(1).with_arg(2)
}

pub fn sum_case() -> TestData {
    TestData::returns("1 + 2", 3)
        .expect("non-null expected value")
        .with_arg(1)
        .with_arg(2)
}

pub fn divide_by_zero_case() -> TestData {
    TestData::throws(
        "divide by zero",
        ExpectedError::new("DivideByZero").with_param_name("divisor"),
    )
    .with_arg(1)
    .with_arg(0)
}

pub fn sample_cases() -> Vec<TestData> {
    vec![compare_case(), sum_case(), divide_by_zero_case()]
}

pub fn shared(data: TestData) -> Arc<TestData> {
    Arc::new(data)
}

pub fn source_with(args_code: ArgsCode) -> DataSource {
    DataSource::from_config(&SourceConfig::new().with_args_code(args_code).with_name("test"))
}

/// Parse a JSON array of test cases.
pub fn load_cases_json(json: &str) -> anyhow::Result<Vec<TestData>> {
    serde_json::from_str(json).context("parsing test case fixtures")
}
