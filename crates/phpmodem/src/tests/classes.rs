use alloc::{boxed::Box, vec, vec::Vec};

use crate::{
    ClassObject, DecodeOptions, Dict, ErrorKind, Key, Scope, Value, decode, decode_with,
};

fn lenient() -> DecodeOptions {
    DecodeOptions {
        strict: false,
        ..DecodeOptions::default()
    }
}

const FOO_ONE_FIELD: &[u8] = b"O:3:\"Foo\":1:{s:1:\"a\";i:1;}";

#[test]
fn strict_mode_rejects_unknown_classes() {
    let err = decode(FOO_ONE_FIELD).unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::ClassNotFound("Foo".into()));
}

#[test]
fn lenient_mode_substitutes_a_placeholder() {
    let v = decode_with(FOO_ONE_FIELD, &Scope::new(), &lenient()).unwrap();
    let Value::Incomplete(inc) = v else {
        panic!("expected a placeholder, got {v:?}");
    };
    assert_eq!(inc.name, "Foo");
    assert_eq!(inc.fields.get(&Key::Str("a".into())), Some(&Value::Int(1)));
    assert_eq!(inc.fields.len(), 1);
}

#[test]
fn registered_classes_resolve_to_objects() {
    let mut scope = Scope::new();
    scope.register_generic("Foo");
    let v = decode_with(FOO_ONE_FIELD, &scope, &DecodeOptions::default()).unwrap();
    let Value::Object(obj) = v else {
        panic!("expected an object, got {v:?}");
    };
    assert_eq!(obj.name, "Foo");
    assert_eq!(obj.fields.get(&Key::Str("a".into())), Some(&Value::Int(1)));
}

#[derive(Debug, Default)]
struct Point {
    x: i64,
    y: i64,
}

impl ClassObject for Point {
    fn set_field(&mut self, key: Key, value: Value) {
        match (key, value) {
            (Key::Str(k), Value::Int(n)) if k == "x" => self.x = n,
            (Key::Str(k), Value::Int(n)) if k == "y" => self.y = n,
            _ => {}
        }
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Array(vec![Value::Int(self.x), Value::Int(self.y)])
    }
}

#[test]
fn typed_shells_receive_fields_one_at_a_time() {
    let mut scope = Scope::new();
    scope.register("Point", Point::default);
    let v = decode_with(
        b"O:5:\"Point\":2:{s:1:\"x\";i:3;s:1:\"y\";i:4;}",
        &scope,
        &DecodeOptions::default(),
    )
    .unwrap();
    assert_eq!(v, Value::Array(vec![Value::Int(3), Value::Int(4)]));
}

#[derive(Debug, Default)]
struct Blob(Vec<u8>);

impl ClassObject for Blob {
    fn set_field(&mut self, _key: Key, _value: Value) {}

    fn unserialize(&mut self, payload: &[u8]) -> Option<()> {
        self.0 = payload.to_vec();
        Some(())
    }

    fn finish(self: Box<Self>) -> Value {
        Value::Bytes(self.0)
    }
}

#[test]
fn self_serializing_payload_is_handed_over_verbatim() {
    let mut scope = Scope::new();
    scope.register("Blob", Blob::default);
    // The payload region is opaque: delimiters inside it are data.
    let v = decode_with(
        b"C:4:\"Blob\":11:{i:1;\"a\\\";}x}",
        &scope,
        &DecodeOptions::default(),
    )
    .unwrap();
    assert_eq!(v, Value::Bytes(b"i:1;\"a\\\";}x".to_vec()));
}

#[test]
fn missing_unserialize_capability_is_fatal_even_when_lenient() {
    let mut scope = Scope::new();
    // GenericObject has no custom wire format.
    scope.register_generic("Cfg");
    for options in [DecodeOptions::default(), lenient()] {
        let err = decode_with(b"C:3:\"Cfg\":4:{abcd}", &scope, &options).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MissingUnserialize("Cfg".into()));
    }
}

#[test]
fn unresolved_self_serializing_class_discards_its_payload() {
    let v = decode_with(b"C:3:\"Cfg\":4:{abcd}", &Scope::new(), &lenient()).unwrap();
    assert_eq!(
        v,
        Value::Incomplete(crate::IncompleteClass {
            name: "Cfg".into(),
            fields: Dict::new(),
        })
    );
}

#[test]
fn unresolved_self_serializing_class_is_rejected_when_strict() {
    let err = decode(b"C:3:\"Cfg\":4:{abcd}").unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::ClassNotFound("Cfg".into()));
}

#[test]
fn class_names_are_case_sensitive() {
    let mut scope = Scope::new();
    scope.register_generic("foo");
    assert!(scope.contains("foo"));
    assert!(!scope.contains("Foo"));
    let err = decode_with(FOO_ONE_FIELD, &scope, &DecodeOptions::default()).unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::ClassNotFound("Foo".into()));
}

#[test]
fn objects_nest_inside_containers() {
    let mut scope = Scope::new();
    scope.register_generic("Foo");
    let v = decode_with(
        b"a:1:{i:0;O:3:\"Foo\":1:{s:1:\"a\";b:1;}}",
        &scope,
        &DecodeOptions::default(),
    )
    .unwrap();
    let Value::Array(items) = v else {
        panic!("expected an array, got {v:?}");
    };
    assert!(matches!(&items[0], Value::Object(obj) if obj.name == "Foo"));
}
