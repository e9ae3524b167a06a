//! Decoded value types.
//!
//! This module defines the [`Value`] enum, which represents any value the
//! wire format can carry, along with the [`Key`] type used by keyed
//! containers and the class-instance shapes ([`ObjectValue`],
//! [`IncompleteClass`]).
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use bstr::ByteSlice;

/// A sequential container: a genuine positional list.
pub type Array = Vec<Value>;

/// A keyed container, ordered by [`Key`].
pub type Dict = BTreeMap<Key, Value>;

/// A decoded value.
///
/// One decode call produces one fresh `Value` tree. The two string-like
/// variants are driven by [`StringEncoding`]: `Utf8` yields
/// [`Value::String`], `Binary` yields [`Value::Bytes`].
///
/// # Examples
///
/// ```
/// use phpmodem::{decode, Value};
///
/// let v = decode(b"a:2:{i:0;s:1:\"a\";i:1;s:1:\"b\";}").unwrap();
/// assert_eq!(
///     v,
///     Value::Array(vec![Value::String("a".into()), Value::String("b".into())])
/// );
/// ```
///
/// [`StringEncoding`]: crate::StringEncoding
// Enable serde support for tests and when the optional `serde` feature is
// activated by downstream crates.  The `cfg_attr` conditional keeps the core
// crate free of a serde dependency in normal builds.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Text decoded from the wire bytes (`encoding: Utf8`).
    String(String),
    /// Raw wire bytes (`encoding: Binary`).
    Bytes(Vec<u8>),
    Array(Array),
    Dict(Dict),
    /// A resolved class instance in its generic folded shape.
    Object(ObjectValue),
    /// The placeholder produced for an unresolved class in non-strict mode.
    Incomplete(IncompleteClass),
}

/// An integer or string container key, the only key categories the wire
/// format can produce.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

/// A resolved plain-class instance folded into class name plus fields.
///
/// This is what [`GenericObject`](crate::GenericObject) produces; custom
/// [`ClassObject`](crate::ClassObject) implementations may fold into any
/// [`Value`] they choose.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    /// The class name as it appeared on the wire.
    pub name: String,
    /// The decoded fields, keyed by property name.
    pub fields: Dict,
}

/// A stand-in for an instance of a class the scope could not resolve.
///
/// Carries the original class name and every decoded field, but is
/// distinguishable from a real instance by pattern match.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IncompleteClass {
    /// The class name that failed to resolve.
    pub name: String,
    /// The decoded fields (empty for a self-serializing class, whose payload
    /// is discarded).
    pub fields: Dict,
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Dict> for Value {
    fn from(v: Dict) -> Self {
        Self::Dict(v)
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use phpmodem::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Bool(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Dict`].
    ///
    /// [`Dict`]: Value::Dict
    #[must_use]
    pub fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(..))
    }

    /// The boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use phpmodem::{decode, Value};
    ///
    /// assert_eq!(decode(b"i:42;").unwrap().as_int(), Some(42));
    /// ```
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload, if any.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The raw-bytes payload, if any.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The sequential elements, if this is an [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The keyed entries, if this is a [`Dict`].
    ///
    /// [`Dict`]: Value::Dict
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => write!(f, "{s:?}"),
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &Dict) -> fmt::Result {
    f.write_str("{")?;
    let mut first = true;
    for (k, v) in fields {
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        write!(f, "{k}: {v}")?;
    }
    f.write_str("}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "{:?}", b.as_bstr()),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Dict(map) => write_fields(f, map),
            Value::Object(obj) => {
                write!(f, "{} ", obj.name)?;
                write_fields(f, &obj.fields)
            }
            Value::Incomplete(inc) => {
                write!(f, "incomplete {} ", inc.name)?;
                write_fields(f, &inc.fields)
            }
        }
    }
}
