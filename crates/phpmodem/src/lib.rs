//! A decoder for PHP's `serialize()` byte format.
//!
//! Decoding is a pure, synchronous, single-pass transform from bytes to a
//! [`Value`] tree: scalars, arrays (sequential or keyed), and class
//! instances resolved against a caller-supplied [`Scope`]. There is no
//! encoder here, no I/O, and no partial result on failure.
//!
//! ```rust
//! use phpmodem::{decode, Value};
//!
//! let v = decode(b"a:2:{i:0;i:10;i:1;d:2.5;}").unwrap();
//! assert_eq!(v, Value::Array(vec![Value::Int(10), Value::Float(2.5)]));
//! ```
//!
//! Class tags resolve through a [`Scope`]; unknown classes are an error in
//! strict mode and a safe [`IncompleteClass`] placeholder otherwise:
//!
//! ```rust
//! use phpmodem::{decode_with, DecodeOptions, Scope, Value};
//!
//! let options = DecodeOptions { strict: false, ..DecodeOptions::default() };
//! let v = decode_with(b"O:3:\"Foo\":0:{}", &Scope::new(), &options).unwrap();
//! assert!(matches!(v, Value::Incomplete(inc) if inc.name == "Foo"));
//! ```
//!
//! Recursion depth is proportional to input nesting, and declared lengths
//! are bounded only by the input itself; cap the buffer size before
//! decoding untrusted data.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod error;
mod options;
mod scanner;
mod scope;
mod value;

#[cfg(test)]
mod tests;

pub use error::{DecodeError, ErrorKind};
pub use options::{DecodeOptions, StringEncoding};
pub use scope::{ClassObject, GenericObject, Scope};
pub use value::{Array, Dict, IncompleteClass, Key, ObjectValue, Value};

/// Decodes one serialized value with an empty scope and default options.
///
/// Equivalent to [`decode_with`] with [`Scope::new`] and
/// [`DecodeOptions::default`]. Because the default is strict, any class tag
/// fails with [`ErrorKind::ClassNotFound`].
///
/// # Errors
///
/// Fails on malformed or truncated input, unknown type tags, and class tags
/// (no class resolves against an empty scope).
pub fn decode(input: impl AsRef<[u8]>) -> Result<Value, DecodeError> {
    decode_with(input, &Scope::new(), &DecodeOptions::default())
}

/// Decodes one serialized value from `input`.
///
/// The top-level value is decoded completely and the rest of the buffer is
/// ignored: trailing bytes are not an error, and nothing past the value's
/// closing delimiter is read.
///
/// # Errors
///
/// Fails on malformed or truncated input, unknown type tags, unresolved
/// classes in strict mode, and resolved self-serializing classes whose
/// instance lacks an unserialize capability.
pub fn decode_with(
    input: impl AsRef<[u8]>,
    scope: &Scope,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let mut scanner = scanner::Scanner::new(input.as_ref());
    decoder::decode_value(&mut scanner, scope, options)
}
