use alloc::string::String;

use thiserror::Error;

/// Error returned when decoding fails.
///
/// A failed decode produces no usable value; the error carries the category
/// of the failure and the byte offset at which it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    /// Byte offset into the input at which decoding failed.
    pub offset: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The category of this failure.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// The categories of decode failure.
///
/// Only [`ClassNotFound`] is affected by [`strict`]: with `strict: false` the
/// decoder substitutes an incomplete-class placeholder instead of failing.
/// Every other kind is fatal regardless of options.
///
/// [`ClassNotFound`]: ErrorKind::ClassNotFound
/// [`strict`]: crate::DecodeOptions::strict
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An expected delimiter or token is absent at the cursor.
    #[error("expected {0:?}")]
    Expected(&'static str),
    /// A literal or length prefix does not parse.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    /// The input ends before the value it declares.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A type discriminator outside the recognized set.
    #[error("unknown type tag {0:?}")]
    UnknownTypeTag(char),
    /// A class tag named a class absent from the scope (strict mode only).
    #[error("class {0:?} not found in scope")]
    ClassNotFound(String),
    /// A resolved self-serializing class instance has no way to accept its
    /// payload.
    #[error("no unserialize capability on class {0:?}")]
    MissingUnserialize(String),
}
