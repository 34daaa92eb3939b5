#![cfg(feature = "serde")]

//! Integration tests for serde support.

use rstest::rstest;
use seqflow::Step;

#[rstest]
#[case(Step::Yielded(3))]
#[case(Step::Done(Some(7)))]
#[case(Step::Done(None))]
fn test_step_json_roundtrip(#[case] step: Step<i32>) {
    let json = serde_json::to_string(&step).unwrap();
    let restored: Step<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, step);
}

/// Steps serialize as externally tagged variants.
#[rstest]
fn test_step_json_shape() {
    assert_eq!(serde_json::to_string(&Step::Yielded("a")).unwrap(), r#"{"Yielded":"a"}"#);
    assert_eq!(serde_json::to_string(&Step::<i32>::done()).unwrap(), r#"{"Done":null}"#);
}

#[cfg(feature = "compose")]
#[rstest]
fn test_fluent_value_json_roundtrip() {
    use seqflow::compose::Value;

    let values = vec![Value::Bool(true), Value::Count(4), Value::Item(Some('x'))];
    let json = serde_json::to_string(&values).unwrap();
    let restored: Vec<Value<char>> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, values);
}
