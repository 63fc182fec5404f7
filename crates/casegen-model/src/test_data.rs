//! Test data value model
//!
//! Provides [`TestData`], an immutable description of one parameterized test
//! input plus its expected outcome. The arity chain of the payload is kept as
//! an ordered list of [`Arg`] values; each [`TestData::with_arg`] call builds
//! the next level on top of the previous one.

use crate::arg::{Arg, ArgKind, ExpectedError};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// Inline capacity of the payload list
pub const INLINE_ARGS: usize = 9;

/// Payload storage
pub type Payload = SmallVec<[Arg; INLINE_ARGS]>;

/// Exit mode tag of a returns-case
pub const EXIT_RETURNS: &str = "returns";

/// Exit mode tag of a throws-case
pub const EXIT_THROWS: &str = "throws";

/// What the test subject is expected to do
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// Plain case, outcome described by the result label only
    None,

    /// Subject returns this value
    Returns(Arg),

    /// Subject raises this error
    Throws(ExpectedError),
}

impl Expectation {
    /// Exit mode tag: empty, `"returns"` or `"throws"`
    #[inline]
    #[must_use]
    pub fn exit_mode(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Returns(_) => EXIT_RETURNS,
            Self::Throws(_) => EXIT_THROWS,
        }
    }

    /// Expected value as an argument, if any
    #[must_use]
    pub fn to_arg(&self) -> Option<Arg> {
        match self {
            Self::None => None,
            Self::Returns(value) => Some(value.clone()),
            Self::Throws(error) => Some(Arg::Error(error.clone())),
        }
    }
}

/// One parameterized test case
///
/// Equality is structural over definition, result, expectation and the
/// ordered payload. Two independently built cases with the same text and the
/// same arguments are the same test case.
///
/// # Example
/// ```
/// use casegen_model::TestData;
///
/// let data = TestData::new("a>b", "true").with_arg(1).with_arg(2);
/// assert_eq!(data.test_case_name(), "a>b => true");
/// assert_eq!(data.arity(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TestDataRecord", into = "TestDataRecord")]
pub struct TestData {
    definition: String,
    result: String,
    expectation: Expectation,
    args: Payload,
}

impl TestData {
    /// Create plain case
    #[must_use]
    pub fn new(definition: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            result: result.into(),
            expectation: Expectation::None,
            args: Payload::new(),
        }
    }

    /// Create case expecting a returned value
    ///
    /// The result label is the display form of `expected`.
    ///
    /// # Errors
    /// [`ModelError::NullArgument`] if `expected` is [`Arg::Null`].
    pub fn returns(
        definition: impl Into<String>,
        expected: impl Into<Arg>,
    ) -> Result<Self, ModelError> {
        let expected = expected.into();
        if expected.is_null() {
            return Err(ModelError::null_argument("expected"));
        }
        Ok(Self {
            definition: definition.into(),
            result: expected.to_string(),
            expectation: Expectation::Returns(expected),
            args: Payload::new(),
        })
    }

    /// Create case expecting an error
    ///
    /// The result label is the error type name.
    #[must_use]
    pub fn throws(definition: impl Into<String>, error: ExpectedError) -> Self {
        Self {
            definition: definition.into(),
            result: error.kind().to_string(),
            expectation: Expectation::Throws(error),
            args: Payload::new(),
        }
    }

    /// Extend payload by one argument
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Extend payload by several arguments, in order
    #[must_use]
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Free-text definition
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Result label
    #[inline]
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Expected outcome
    #[inline]
    #[must_use]
    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Exit mode tag
    #[inline]
    #[must_use]
    pub fn exit_mode(&self) -> &'static str {
        self.expectation.exit_mode()
    }

    /// Expected value, for returns and throws cases
    #[inline]
    #[must_use]
    pub fn expected(&self) -> Option<Arg> {
        self.expectation.to_arg()
    }

    /// Payload arguments, level 1 first
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Number of payload arguments
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Human-readable case label
    ///
    /// Format: `{definition} => {result}` or
    /// `{definition} => {exit_mode} {result}`.
    #[must_use]
    pub fn test_case_name(&self) -> String {
        let exit_mode = self.exit_mode();
        if exit_mode.is_empty() {
            format!("{} => {}", self.definition, self.result)
        } else {
            format!("{} => {} {}", self.definition, exit_mode, self.result)
        }
    }

    /// Statically declared element types
    #[must_use]
    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            expected: self.expectation.to_arg().map(|arg| arg.kind()),
            args: self.args.iter().map(Arg::kind).collect(),
        }
    }

    /// Check whether an equal case is present
    pub fn contained_by<'a, I>(&self, cases: I) -> bool
    where
        I: IntoIterator<Item = &'a TestData>,
    {
        cases.into_iter().any(|other| other == self)
    }
}

impl Display for TestData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.test_case_name())
    }
}

/// Element types of a test case, in conversion order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type of the expected value, for returns and throws cases
    pub expected: Option<ArgKind>,

    /// Payload argument types, level 1 first
    pub args: Vec<ArgKind>,
}

/// Serialized form of [`TestData`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TestDataRecord {
    definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    returns: Option<Arg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    throws: Option<ExpectedError>,
    #[serde(default)]
    args: Vec<Arg>,
}

impl TryFrom<TestDataRecord> for TestData {
    type Error = ModelError;

    fn try_from(record: TestDataRecord) -> Result<Self, Self::Error> {
        let derived = record.returns.is_some() || record.throws.is_some();
        if derived && record.result.is_some() {
            return Err(ModelError::ConflictingExpectation);
        }
        let base = match (record.returns, record.throws) {
            (Some(_), Some(_)) => return Err(ModelError::ConflictingExpectation),
            (Some(expected), None) => Self::returns(record.definition, expected)?,
            (None, Some(error)) => Self::throws(record.definition, error),
            (None, None) => {
                let result = record
                    .result
                    .ok_or_else(|| ModelError::null_argument("result"))?;
                Self::new(record.definition, result)
            }
        };
        Ok(base.with_args(record.args))
    }
}

impl From<TestData> for TestDataRecord {
    fn from(data: TestData) -> Self {
        let (result, returns, throws) = match data.expectation {
            Expectation::None => (Some(data.result), None, None),
            Expectation::Returns(value) => (None, Some(value), None),
            Expectation::Throws(error) => (None, None, Some(error)),
        };
        Self {
            definition: data.definition,
            result,
            returns,
            throws,
            args: data.args.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_label() {
        let data = TestData::new("a>b", "true");
        assert_eq!(data.exit_mode(), "");
        assert_eq!(data.test_case_name(), "a>b => true");
    }

    #[test]
    fn returns_label_uses_expected_display() {
        let data = TestData::returns("1 + 2", 3).unwrap();
        assert_eq!(data.result(), "3");
        assert_eq!(data.test_case_name(), "1 + 2 => returns 3");
        assert_eq!(data.expected(), Some(Arg::Int(3)));
    }

    #[test]
    fn returns_rejects_null_expected() {
        let err = TestData::returns("x", Arg::Null).unwrap_err();
        assert_eq!(err, ModelError::null_argument("expected"));
    }

    #[test]
    fn throws_label_uses_error_kind() {
        let data = TestData::throws("divide by zero", ExpectedError::new("DivideByZero"));
        assert_eq!(data.test_case_name(), "divide by zero => throws DivideByZero");
        assert_eq!(data.expected().unwrap().kind(), ArgKind::Error);
    }

    #[test]
    fn payload_chain_preserves_order() {
        let data = TestData::new("d", "r").with_arg(1).with_arg("two").with_args([3.0, 4.0]);
        assert_eq!(
            data.args(),
            &[Arg::Int(1), Arg::from("two"), Arg::Float(3.0), Arg::Float(4.0)]
        );
        assert_eq!(data.arity(), 4);
    }

    #[test]
    fn equality_is_structural() {
        let a = TestData::new("a>b", "true").with_arg(1).with_arg(2);
        let b = TestData::new("a>b", "true").with_arg(1).with_arg(2);
        let c = TestData::new("a>b", "true").with_arg(2).with_arg(1);
        let d = TestData::new("b<a", "true").with_arg(1).with_arg(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn contained_by_matches_by_value() {
        let cases = vec![TestData::new("x", "y").with_arg(1), TestData::new("z", "w")];
        assert!(TestData::new("x", "y").with_arg(1).contained_by(&cases));
        assert!(!TestData::new("x", "y").contained_by(&cases));
    }

    #[test]
    fn type_descriptor_lists_kinds() {
        let data = TestData::returns("len", 3_u32).unwrap().with_arg("abc");
        assert_eq!(
            data.type_descriptor(),
            TypeDescriptor {
                expected: Some(ArgKind::UInt),
                args: vec![ArgKind::Str],
            }
        );
    }

    #[test]
    fn serde_round_trip_keeps_derived_result() {
        let data = TestData::throws("bad", ExpectedError::new("Invalid")).with_arg(1);
        let json = serde_json::to_string(&data).unwrap();
        let back: TestData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn deserialize_plain_requires_result() {
        let err = serde_json::from_str::<TestData>(r#"{"definition":"d"}"#).unwrap_err();
        assert!(err.to_string().contains("result"));
    }

    #[test]
    fn deserialize_rejects_conflicting_expectation() {
        let json = r#"{"definition":"d","returns":{"int":1},"throws":{"kind":"E"}}"#;
        assert!(serde_json::from_str::<TestData>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_result_beside_derived_one() {
        let returns = r#"{"definition":"d","result":"2","returns":{"int":1}}"#;
        let err = serde_json::from_str::<TestData>(returns).unwrap_err();
        assert!(err.to_string().contains("only one of"));

        let throws = r#"{"definition":"d","result":"E","throws":{"kind":"E"}}"#;
        assert!(serde_json::from_str::<TestData>(throws).is_err());
    }

    #[test]
    fn record_with_result_and_returns_is_conflicting() {
        let record = TestDataRecord {
            definition: "d".to_string(),
            result: Some("1".to_string()),
            returns: Some(Arg::Int(1)),
            throws: None,
            args: Vec::new(),
        };
        assert_eq!(
            TestData::try_from(record).unwrap_err(),
            ModelError::ConflictingExpectation
        );
    }
}
