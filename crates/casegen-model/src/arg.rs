//! Argument values
//!
//! Provides [`Arg`], the closed set of primitive values a test case can carry,
//! [`ArgKind`] as its static type descriptor, and [`ExpectedError`] for cases
//! that expect a failure.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// One test method argument
///
/// Equality and hashing are structural. Floats compare by bit pattern so that
/// `Arg` can key hashed collections (`NaN == NaN`, `0.0 != -0.0`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    /// Absent value
    Null,

    /// Boolean
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer
    UInt(u64),

    /// Floating point
    Float(f64),

    /// Single character
    Char(char),

    /// Text
    Str(String),

    /// Ordered sequence
    List(Vec<Arg>),

    /// Error instance
    Error(ExpectedError),
}

/// Static type descriptor of an [`Arg`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// [`Arg::Null`]
    Null,
    /// [`Arg::Bool`]
    Bool,
    /// [`Arg::Int`]
    Int,
    /// [`Arg::UInt`]
    UInt,
    /// [`Arg::Float`]
    Float,
    /// [`Arg::Char`]
    Char,
    /// [`Arg::Str`]
    Str,
    /// [`Arg::List`]
    List,
    /// [`Arg::Error`]
    Error,
}

impl Arg {
    /// Type descriptor
    #[must_use]
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Null => ArgKind::Null,
            Self::Bool(_) => ArgKind::Bool,
            Self::Int(_) => ArgKind::Int,
            Self::UInt(_) => ArgKind::UInt,
            Self::Float(_) => ArgKind::Float,
            Self::Char(_) => ArgKind::Char,
            Self::Str(_) => ArgKind::Str,
            Self::List(_) => ArgKind::List,
            Self::Error(_) => ArgKind::Error,
        }
    }

    /// Check for [`Arg::Null`]
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text content, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Signed view of an integer value
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Error content, if this is an error
    #[inline]
    #[must_use]
    pub fn as_error(&self) -> Option<&ExpectedError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Arg {}

impl Hash for Arg {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::UInt(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Char(v) => v.hash(state),
            Self::Str(v) => v.hash(state),
            Self::List(v) => v.hash(state),
            Self::Error(v) => v.hash(state),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Error(e) => write!(f, "{e}"),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::UInt(u64::from(v))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Arg {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<ExpectedError> for Arg {
    fn from(v: ExpectedError) -> Self {
        Self::Error(v)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Error a test case expects its subject to raise
///
/// # Example
/// ```
/// use casegen_model::ExpectedError;
///
/// let err = ExpectedError::new("ArgumentOutOfRange")
///     .with_param_name("index")
///     .with_message("index must be positive");
/// assert_eq!(err.kind(), "ArgumentOutOfRange");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpectedError {
    /// Error type name
    kind: String,

    /// Expected message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    /// Name of the parameter the error is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    param_name: Option<String>,
}

impl ExpectedError {
    /// Create error of the given type
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
            param_name: None,
        }
    }

    /// Set expected message
    #[inline]
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set parameter name
    #[inline]
    #[must_use]
    pub fn with_param_name(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = Some(param_name.into());
        self
    }

    /// Error type name
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Expected message
    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        self.param_name.as_deref()
    }
}

impl Display for ExpectedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => f.write_str(&self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_primitives() {
        assert_eq!(Arg::from(3_i32), Arg::Int(3));
        assert_eq!(Arg::from(3_u8), Arg::UInt(3));
        assert_eq!(Arg::from("x"), Arg::Str("x".into()));
        assert_eq!(Arg::from(None::<i32>), Arg::Null);
        assert_eq!(Arg::from(vec![1, 2]), Arg::List(vec![Arg::Int(1), Arg::Int(2)]));
    }

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Arg::Float(f64::NAN), Arg::Float(f64::NAN));
        assert_ne!(Arg::Float(0.0), Arg::Float(-0.0));
    }

    #[test]
    fn int_and_uint_are_distinct() {
        assert_ne!(Arg::Int(1), Arg::UInt(1));
        assert_eq!(Arg::UInt(1).as_i64(), Some(1));
    }

    #[test]
    fn hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Arg::Float(1.5));
        set.insert(Arg::Float(1.5));
        set.insert(Arg::from("a"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Arg::Null.to_string(), "null");
        assert_eq!(Arg::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Arg::from(-4).to_string(), "-4");
    }

    #[test]
    fn kind_descriptor() {
        assert_eq!(Arg::from(true).kind(), ArgKind::Bool);
        assert_eq!(Arg::from(ExpectedError::new("E")).kind(), ArgKind::Error);
    }

    #[test]
    fn expected_error_display() {
        let plain = ExpectedError::new("Overflow");
        let detailed = plain.clone().with_message("too big");

        assert_eq!(plain.to_string(), "Overflow");
        assert_eq!(detailed.to_string(), "Overflow: too big");
        assert_ne!(plain, detailed);
    }
}
