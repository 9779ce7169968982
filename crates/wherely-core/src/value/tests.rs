use crate::value::{FieldValue, Value};

#[test]
fn primitives_widen_into_value_families() {
    assert_eq!(7i8.to_value(), Value::Int(7));
    assert_eq!((-3i32).to_value(), Value::Int(-3));
    assert_eq!(9u16.to_value(), Value::Uint(9));
    assert_eq!(true.to_value(), Value::Bool(true));
    assert_eq!(1.5f32.to_value(), Value::Float64(1.5));
}

#[test]
fn option_none_is_null() {
    let missing: Option<i64> = None;

    assert_eq!(missing.to_value(), Value::Null);
    assert_eq!(Some("x").to_value(), Value::Text("x".to_string()));
}

#[test]
fn list_collects_in_order() {
    let value = Value::list([3, 1, 2]);

    assert_eq!(
        value,
        Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
    );
    assert_eq!(value.to_string(), "(3, 1, 2)");
}

#[test]
fn text_display_is_quoted() {
    assert_eq!("ACTIVE".to_value().to_string(), "'ACTIVE'");
    assert_eq!(Value::Null.to_string(), "NULL");
}
