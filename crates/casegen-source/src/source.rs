//! Data source with a scoped args code
//!
//! Provides [`DataSource`], the owner of a default [`ArgsCode`] that callers
//! can temporarily override for a single generation call.

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::scope::{self, OverrideGuard, SourceId};
use casegen_model::{display_name, to_params, ArgsCode, Param, TestData, ARGS_CODE_PARAM};
use std::future::Future;
use std::sync::Arc;

/// Producer of test method arguments with a fixed default args code
///
/// The default is immutable after construction and freely shareable. The
/// effective code, [`args_code`](Self::args_code), reflects the innermost
/// override active in the caller's flow.
///
/// # Example
/// ```
/// use casegen_model::{ArgsCode, TestData};
/// use casegen_source::DataSource;
/// use std::sync::Arc;
///
/// let source = DataSource::new(ArgsCode::Instance);
/// let data = Arc::new(TestData::new("a>b", "true").with_arg(1).with_arg(2));
///
/// assert_eq!(source.to_args(&data).len(), 1);
/// let flat = source.optional_to_args(&data, Some(ArgsCode::Properties));
/// assert_eq!(flat.len(), 3);
/// assert_eq!(source.args_code(), ArgsCode::Instance);
/// ```
#[derive(Debug)]
pub struct DataSource {
    id: SourceId,
    args_code: ArgsCode,
    include_expected: bool,
    name: Option<String>,
}

impl DataSource {
    /// Create source with default settings and the given args code
    #[must_use]
    pub fn new(args_code: ArgsCode) -> Self {
        Self::from_config(&SourceConfig::new().with_args_code(args_code))
    }

    /// Create source from a raw args code
    ///
    /// # Errors
    /// [`SourceError::Model`] if `args_code` is outside the defined set.
    pub fn try_new(args_code: i64) -> Result<Self, SourceError> {
        let args_code = ArgsCode::try_from_raw(args_code, ARGS_CODE_PARAM)?;
        Ok(Self::new(args_code))
    }

    /// Create source from configuration
    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        let source = Self {
            id: SourceId::next(),
            args_code: config.args_code,
            include_expected: config.include_expected,
            name: config.name.clone(),
        };
        tracing::debug!(
            source = %source.id,
            name = ?source.name,
            args_code = %source.args_code,
            "created data source"
        );
        source
    }

    /// Source identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Log name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Args code fixed at construction
    #[inline]
    #[must_use]
    pub fn default_args_code(&self) -> ArgsCode {
        self.args_code
    }

    /// Whether returns/throws cases emit their expected value
    #[inline]
    #[must_use]
    pub fn include_expected(&self) -> bool {
        self.include_expected
    }

    /// Effective args code in the current flow
    #[must_use]
    pub fn args_code(&self) -> ArgsCode {
        scope::active_frame(self.id).map_or(self.args_code, |frame| frame.args_code)
    }

    /// Check if an override is active in the current flow
    #[inline]
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        scope::active_frame(self.id).is_some()
    }

    /// Enter a synchronous override scope
    ///
    /// Returns `None`, and touches no state, when `args_code` is `None`.
    #[must_use = "the override ends as soon as the guard is dropped"]
    fn enter(&self, args_code: Option<ArgsCode>) -> Option<OverrideGuard> {
        args_code.map(|code| OverrideGuard::enter(self.id, code))
    }

    /// Run `action`, optionally under a temporary args code
    ///
    /// The previous value is reinstated when `action` returns or unwinds.
    pub fn run_with_override<R>(
        &self,
        action: impl FnOnce(&Self) -> R,
        args_code: Option<ArgsCode>,
    ) -> R {
        let _guard = self.enter(args_code);
        action(self)
    }

    /// Run `action`, optionally under a temporary raw args code
    ///
    /// # Errors
    /// [`SourceError::Model`] naming `args_code` if the value is out of range;
    /// `action` is not run in that case.
    pub fn try_run_with_override<R>(
        &self,
        action: impl FnOnce(&Self) -> R,
        args_code: Option<i64>,
    ) -> Result<R, SourceError> {
        let args_code = args_code
            .map(|raw| ArgsCode::try_from_raw(raw, ARGS_CODE_PARAM))
            .transpose()?;
        Ok(self.run_with_override(action, args_code))
    }

    /// Await `future`, optionally under a temporary args code
    ///
    /// The override follows the future across awaits and worker threads and is
    /// not visible to other tasks.
    pub async fn run_with_override_async<F: Future>(
        &self,
        future: F,
        args_code: Option<ArgsCode>,
    ) -> F::Output {
        match args_code {
            Some(code) => scope::scope_async(self.id, code, future).await,
            None => future.await,
        }
    }

    /// Convert under the effective args code
    #[must_use]
    pub fn to_args(&self, data: &Arc<TestData>) -> Vec<Param> {
        to_params(data, self.args_code(), self.include_expected)
    }

    /// Convert under the effective args code with explicit expected-value inclusion
    #[must_use]
    pub fn to_params(&self, data: &Arc<TestData>, include_expected: bool) -> Vec<Param> {
        to_params(data, self.args_code(), include_expected)
    }

    /// Convert, optionally under a temporary args code
    #[must_use]
    pub fn optional_to_args(&self, data: &Arc<TestData>, args_code: Option<ArgsCode>) -> Vec<Param> {
        self.run_with_override(|source| source.to_args(data), args_code)
    }

    /// Display name of `data` for the given test method
    #[must_use]
    pub fn display_name(&self, method_name: Option<&str>, data: &Arc<TestData>) -> Option<String> {
        let params = self.to_args(data);
        display_name(method_name, params.first())
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::from_config(&SourceConfig::default())
    }
}
