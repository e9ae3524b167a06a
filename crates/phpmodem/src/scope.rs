//! Class resolution and instance capabilities.
//!
//! The wire format tags class instances with a bare class name. What that
//! name *means* is entirely up to the caller: a [`Scope`] maps names to
//! zero-argument construction capabilities, and the constructed shell is
//! populated one field at a time without the decoder ever learning the
//! class's shape.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::value::{Dict, Key, ObjectValue, Value};

/// A live instance shell being populated by the decoder.
///
/// For a plain class the decoder calls [`set_field`] once per decoded field,
/// in wire order; for a self-serializing class it calls [`unserialize`] once
/// with the opaque payload. Either way, [`finish`] then folds the shell into
/// the output tree.
///
/// [`set_field`]: ClassObject::set_field
/// [`unserialize`]: ClassObject::unserialize
/// [`finish`]: ClassObject::finish
pub trait ClassObject {
    /// Assign one decoded field onto the instance.
    fn set_field(&mut self, key: Key, value: Value);

    /// Accept the opaque payload of a self-serializing class.
    ///
    /// The payload is the raw byte region between the braces, not decoded by
    /// this crate in any way. Returning `None` signals that the class has no
    /// custom wire format, which the decoder reports as
    /// [`ErrorKind::MissingUnserialize`](crate::ErrorKind::MissingUnserialize).
    fn unserialize(&mut self, payload: &[u8]) -> Option<()> {
        let _ = payload;
        None
    }

    /// Fold the populated shell into a decoded value.
    fn finish(self: Box<Self>) -> Value;
}

type Constructor = Box<dyn Fn() -> Box<dyn ClassObject> + Send + Sync>;

/// Caller-supplied registry mapping class names to construction capabilities.
///
/// Names are case-sensitive. The scope is read-only during decoding and can
/// be shared across concurrent decode calls on different buffers, provided
/// each registered constructor is itself reentrant.
///
/// # Examples
///
/// ```
/// use phpmodem::{decode_with, DecodeOptions, Scope, Value};
///
/// let mut scope = Scope::new();
/// scope.register_generic("Foo");
///
/// let v = decode_with(
///     b"O:3:\"Foo\":1:{s:1:\"a\";i:1;}",
///     &scope,
///     &DecodeOptions::default(),
/// )
/// .unwrap();
/// assert!(matches!(v, Value::Object(obj) if obj.name == "Foo"));
/// ```
#[derive(Default)]
pub struct Scope {
    classes: BTreeMap<String, Constructor>,
}

impl Scope {
    /// An empty scope: every class tag is unresolved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zero-argument constructor for `name`.
    pub fn register<F, T>(&mut self, name: impl Into<String>, construct: F) -> &mut Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: ClassObject + 'static,
    {
        self.classes
            .insert(name.into(), Box::new(move || Box::new(construct())));
        self
    }

    /// Register `name` with the generic field-map shell ([`GenericObject`]).
    pub fn register_generic(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        let class = name.clone();
        self.register(name, move || GenericObject::new(class.clone()))
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Construct a fresh shell for `name`, if registered.
    pub(crate) fn instantiate(&self, name: &str) -> Option<Box<dyn ClassObject>> {
        self.classes.get(name).map(|construct| construct())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("classes", &self.classes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A shell that keeps fields generically, folding into [`Value::Object`].
///
/// This is the stdClass-style default for callers that want class instances
/// in the tree without modeling each class.
#[derive(Debug)]
pub struct GenericObject {
    name: String,
    fields: Dict,
}

impl GenericObject {
    /// A shell for class `name` with no fields yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Dict::new(),
        }
    }
}

impl ClassObject for GenericObject {
    fn set_field(&mut self, key: Key, value: Value) {
        self.fields.insert(key, value);
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Object(ObjectValue {
            name: self.name,
            fields: self.fields,
        })
    }
}
