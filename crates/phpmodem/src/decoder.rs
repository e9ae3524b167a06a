//! The semantic decoding layer.
//!
//! Everything the format *means* is decided here: the type dispatcher that
//! interprets each tagged token, the pair loop that reconstructs composites,
//! the end-of-container shape classification, and class resolution against
//! the caller's scope. The byte-level mechanics live in [`crate::scanner`].
//!
//! Decoding is a single forward pass: every branch consumes a monotonically
//! increasing cursor range and returns exactly one value. There is no
//! backtracking and no partial result on failure.

use alloc::{boxed::Box, string::String, vec, vec::Vec};

use bstr::ByteSlice;

use crate::{
    error::{DecodeError, ErrorKind},
    options::{DecodeOptions, StringEncoding},
    scanner::{Scanner, Tag},
    scope::{ClassObject, Scope},
    value::{Dict, IncompleteClass, Key, Value},
};

/// Transient key/value pair collected while reconstructing a composite.
///
/// Discarded once folded into the parent collection.
struct Pair {
    key: Value,
    value: Value,
}

// ------------------------------------------------------------------------------------------------
// Type dispatcher
// ------------------------------------------------------------------------------------------------

/// Decodes the single value at the cursor, recursing for composites.
pub(crate) fn decode_value(
    scanner: &mut Scanner<'_>,
    scope: &Scope,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    match scanner.current_tag()? {
        Tag::Null => {
            scanner.expect(";")?;
            Ok(Value::Null)
        }
        Tag::Bool => {
            let raw = scanner.read_exactly(1)?;
            // Producers in the wild emit bytes other than '0' here; anything
            // but '1' reads as false.
            let value = raw[0] == b'1';
            scanner.expect(";")?;
            Ok(Value::Bool(value))
        }
        Tag::Int => {
            let start = scanner.offset();
            let raw = scanner.read_until(b';')?;
            let n = core::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| {
                    DecodeError::new(ErrorKind::MalformedInput("invalid integer literal"), start)
                })?;
            Ok(Value::Int(n))
        }
        Tag::Float => {
            let start = scanner.offset();
            let raw = scanner.read_until(b';')?;
            // `INF`, `-INF` and `NAN` parse through the standard float path.
            let n = core::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.parse::<f64>().ok())
                .ok_or_else(|| {
                    DecodeError::new(ErrorKind::MalformedInput("invalid float literal"), start)
                })?;
            Ok(Value::Float(n))
        }
        Tag::Str => {
            // The declared length is a byte count: slice raw bytes first,
            // decode text after.
            let raw = scanner.read_delimited_by_length("\"", "\"", |sc, n| sc.read_exactly(n))?;
            let value = decode_text(raw, options);
            scanner.expect(";")?;
            Ok(value)
        }
        Tag::ArrayOrObject => {
            let at = scanner.offset();
            let pairs =
                scanner.read_delimited_by_length("{", "}", |sc, n| decode_pairs(sc, n, scope, options))?;
            fold_pairs(pairs, at)
        }
        Tag::PlainClass => {
            let at = scanner.offset();
            let name = read_class_name(scanner)?;
            scanner.expect(":")?;
            let pairs =
                scanner.read_delimited_by_length("{", "}", |sc, n| decode_pairs(sc, n, scope, options))?;
            match resolve_class(name, scope, options.strict, at)? {
                Resolved::Instance(_, mut shell) => {
                    for Pair { key, value } in pairs {
                        shell.set_field(key_of(key, at)?, value);
                    }
                    Ok(shell.finish())
                }
                Resolved::Placeholder(name) => {
                    let mut fields = Dict::new();
                    for Pair { key, value } in pairs {
                        fields.insert(key_of(key, at)?, value);
                    }
                    Ok(Value::Incomplete(IncompleteClass { name, fields }))
                }
            }
        }
        Tag::SerializableClass => {
            let at = scanner.offset();
            let name = read_class_name(scanner)?;
            scanner.expect(":")?;
            let payload = scanner.read_delimited_by_length("{", "}", |sc, n| sc.read_exactly(n))?;
            match resolve_class(name, scope, options.strict, at)? {
                Resolved::Instance(name, mut shell) => match shell.unserialize(payload) {
                    Some(()) => Ok(shell.finish()),
                    None => Err(DecodeError::new(ErrorKind::MissingUnserialize(name), at)),
                },
                // A placeholder has no custom decoder to hand the payload
                // to; the bytes are dropped and the placeholder carries no
                // fields.
                Resolved::Placeholder(name) => Ok(Value::Incomplete(IncompleteClass {
                    name,
                    fields: Dict::new(),
                })),
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Composite reconstruction
// ------------------------------------------------------------------------------------------------

/// Decodes `count` key/value pairs.
///
/// Keys and values are decoded recursively as generic values; a scalar's
/// terminating `;` is consumed by its own branch, so a missing key/value
/// separator surfaces from the key's decode. The pair separator consumed
/// here is best-effort: PHP omits it after container closers, other
/// producers emit it.
fn decode_pairs(
    scanner: &mut Scanner<'_>,
    count: usize,
    scope: &Scope,
    options: &DecodeOptions,
) -> Result<Vec<Pair>, DecodeError> {
    // Declared counts are untrusted; capacity grows only as pairs decode.
    let mut pairs = Vec::new();
    for _ in 0..count {
        let key = decode_value(scanner, scope, options)?;
        let value = decode_value(scanner, scope, options)?;
        if scanner.peek_byte() == Some(b';') {
            scanner.advance(1);
        }
        pairs.push(Pair { key, value });
    }
    Ok(pairs)
}

/// Decides the container shape once all pairs are known.
///
/// A genuine positional list requires the key set to be exactly `0..n`, in
/// any order. String, negative, sparse, or duplicate integer keys all fold
/// into a keyed map.
fn fold_pairs(pairs: Vec<Pair>, offset: usize) -> Result<Value, DecodeError> {
    let n = pairs.len();
    let mut seen = vec![false; n];
    let mut sequential = true;
    for pair in &pairs {
        let slot = match pair.key {
            Value::Int(k) => usize::try_from(k).ok().filter(|&i| i < n && !seen[i]),
            _ => None,
        };
        match slot {
            Some(i) => seen[i] = true,
            None => {
                sequential = false;
                break;
            }
        }
    }

    if sequential {
        let mut slots = vec![Value::Null; n];
        for Pair { key, value } in pairs {
            if let Value::Int(k) = key {
                if let Ok(i) = usize::try_from(k) {
                    slots[i] = value;
                }
            }
        }
        Ok(Value::Array(slots))
    } else {
        let mut dict = Dict::new();
        for Pair { key, value } in pairs {
            // Last write wins for duplicate keys.
            dict.insert(key_of(key, offset)?, value);
        }
        Ok(Value::Dict(dict))
    }
}

/// Folds a decoded key value into a container key.
///
/// The wire format only produces integer and string keys; anything else is a
/// malformation, not a policy choice.
fn key_of(key: Value, offset: usize) -> Result<Key, DecodeError> {
    match key {
        Value::Int(n) => Ok(Key::Int(n)),
        Value::String(s) => Ok(Key::Str(s)),
        Value::Bytes(b) => Ok(Key::Str(b.to_str_lossy().into_owned())),
        _ => Err(DecodeError::new(
            ErrorKind::MalformedInput("container key must be an integer or string"),
            offset,
        )),
    }
}

// ------------------------------------------------------------------------------------------------
// Class resolution
// ------------------------------------------------------------------------------------------------

enum Resolved {
    /// A real instance constructed from the scope.
    Instance(String, Box<dyn ClassObject>),
    /// The class is unknown and strict mode is off.
    Placeholder(String),
}

fn resolve_class(
    name: String,
    scope: &Scope,
    strict: bool,
    offset: usize,
) -> Result<Resolved, DecodeError> {
    if let Some(shell) = scope.instantiate(&name) {
        return Ok(Resolved::Instance(name, shell));
    }
    if strict {
        return Err(DecodeError::new(ErrorKind::ClassNotFound(name), offset));
    }
    Ok(Resolved::Placeholder(name))
}

/// Class names are identifiers matched against scope keys, not data: they
/// decode as lossy UTF-8 regardless of the encoding option.
fn read_class_name(scanner: &mut Scanner<'_>) -> Result<String, DecodeError> {
    let raw = scanner.read_delimited_by_length("\"", "\"", |sc, n| sc.read_exactly(n))?;
    Ok(raw.to_str_lossy().into_owned())
}

fn decode_text(raw: &[u8], options: &DecodeOptions) -> Value {
    match options.encoding {
        StringEncoding::Utf8 => Value::String(raw.to_str_lossy().into_owned()),
        StringEncoding::Binary => Value::Bytes(raw.to_vec()),
    }
}
