//! Unit tests for Value

use core_types::Value;

#[test]
fn undefined_is_falsy() {
    assert!(!Value::Undefined.is_truthy());
}

#[test]
fn nonzero_int_is_truthy() {
    assert!(Value::Int(-3).is_truthy());
    assert!(!Value::Int(0).is_truthy());
}

#[test]
fn boolean_truthiness_matches_inner() {
    assert!(Value::Boolean(true).is_truthy());
    assert!(!Value::Boolean(false).is_truthy());
}

#[test]
fn nan_is_falsy() {
    assert!(!Value::Number(f64::NAN).is_truthy());
}

#[test]
fn values_compare_by_variant_and_content() {
    assert_eq!(Value::Int(7), Value::Int(7));
    assert_ne!(Value::Int(7), Value::Number(7.0));
    assert_ne!(Value::Str("a".to_string()), Value::Str("b".to_string()));
}

#[test]
fn clone_preserves_content() {
    let v = Value::Str("payload".to_string());
    assert_eq!(v.clone(), v);
}
