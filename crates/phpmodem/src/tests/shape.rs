//! Container shape classification: sequential list vs keyed map.

use alloc::{format, string::String, vec, vec::Vec};

use quickcheck_macros::quickcheck;

use crate::{Dict, Key, Value, decode};

fn dict(entries: impl IntoIterator<Item = (Key, Value)>) -> Value {
    Value::Dict(entries.into_iter().collect::<Dict>())
}

#[test]
fn contiguous_zero_based_keys_fold_to_a_list() {
    let v = decode(b"a:3:{i:0;i:10;i:1;i:11;i:2;i:12;}").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![Value::Int(10), Value::Int(11), Value::Int(12)])
    );
}

#[test]
fn classification_is_order_independent() {
    // Same key set, reordered: same shape, elements placed by key.
    let v = decode(b"a:2:{i:1;s:1:\"b\";i:0;s:1:\"a\";}").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![Value::String("a".into()), Value::String("b".into())])
    );
}

#[test]
fn sparse_integer_keys_fold_to_a_map() {
    let v = decode(b"a:2:{i:0;s:1:\"a\";i:2;s:1:\"c\";}").unwrap();
    assert_eq!(
        v,
        dict([
            (Key::Int(0), Value::String("a".into())),
            (Key::Int(2), Value::String("c".into())),
        ])
    );
}

#[test]
fn string_keys_fold_to_a_map() {
    let v = decode(b"a:1:{s:1:\"a\";i:1;}").unwrap();
    assert_eq!(v, dict([(Key::Str("a".into()), Value::Int(1))]));
}

#[test]
fn mixed_keys_fold_to_a_map() {
    let v = decode(b"a:2:{i:0;b:1;s:1:\"k\";b:0;}").unwrap();
    assert_eq!(
        v,
        dict([
            (Key::Int(0), Value::Bool(true)),
            (Key::Str("k".into()), Value::Bool(false)),
        ])
    );
}

#[test]
fn negative_keys_fold_to_a_map() {
    let v = decode(b"a:1:{i:-1;i:5;}").unwrap();
    assert_eq!(v, dict([(Key::Int(-1), Value::Int(5))]));
}

#[test]
fn duplicate_keys_fold_to_a_map_with_the_last_value() {
    let v = decode(b"a:2:{i:0;i:1;i:0;i:2;}").unwrap();
    assert_eq!(v, dict([(Key::Int(0), Value::Int(2))]));
}

#[quickcheck]
fn any_rotation_of_a_contiguous_key_set_folds_to_the_same_list(
    values: Vec<i8>,
    rotation: usize,
) -> bool {
    let n = values.len();
    let rotation = rotation % n.max(1);
    let mut entries = String::new();
    for j in 0..n {
        let i = (j + rotation) % n;
        entries.push_str(&format!("i:{i};i:{};", values[i]));
    }
    let input = format!("a:{n}:{{{entries}}}");

    let expected = Value::Array(values.iter().map(|&v| Value::Int(i64::from(v))).collect());
    decode(input.as_bytes()) == Ok(expected)
}
