use proptest::prelude::*;
use proxima_types::KeyValue;
use serde_json::json;

// ── Single keys ──────────────────────────────────────────────────

#[test]
fn number_key_renders_literally() {
    assert_eq!(KeyValue::single(10).to_segment().unwrap(), "10");
}

#[test]
fn bool_key_renders_literally() {
    assert_eq!(KeyValue::single(true).to_segment().unwrap(), "true");
}

#[test]
fn string_key_is_single_quoted() {
    assert_eq!(KeyValue::single("ALFKI").to_segment().unwrap(), "'ALFKI'");
}

#[test]
fn embedded_quote_is_doubled() {
    assert_eq!(
        KeyValue::single("O'Brien").to_segment().unwrap(),
        "'O''Brien'"
    );
}

#[test]
fn object_key_is_rejected() {
    assert!(KeyValue::single(json!({"a": 1})).to_segment().is_err());
}

#[test]
fn null_key_is_rejected() {
    assert!(KeyValue::single(json!(null)).to_segment().is_err());
}

// ── Compound keys ────────────────────────────────────────────────

#[test]
fn compound_key_joins_named_components() {
    let key = KeyValue::compound(vec![
        ("OrderId".to_string(), json!(10)),
        ("ProductId".to_string(), json!(7)),
    ]);
    assert_eq!(key.to_segment().unwrap(), "OrderId=10,ProductId=7");
}

#[test]
fn compound_key_keeps_build_order() {
    let key = KeyValue::compound(vec![
        ("B".to_string(), json!(2)),
        ("A".to_string(), json!(1)),
    ]);
    assert_eq!(key.to_segment().unwrap(), "B=2,A=1");
}

#[test]
fn empty_compound_key_is_rejected() {
    assert!(KeyValue::compound(vec![]).to_segment().is_err());
}

#[test]
fn compound_key_with_bad_component_is_rejected() {
    let key = KeyValue::compound(vec![("A".to_string(), json!([1, 2]))]);
    assert!(key.to_segment().is_err());
}

// ── Equality & display ───────────────────────────────────────────

#[test]
fn equal_keys_compare_equal() {
    assert_eq!(KeyValue::single(10), KeyValue::single(10));
    assert_ne!(KeyValue::single(10), KeyValue::single(11));
}

#[test]
fn compound_order_matters_for_equality() {
    let ab = KeyValue::compound(vec![
        ("A".to_string(), json!(1)),
        ("B".to_string(), json!(2)),
    ]);
    let ba = KeyValue::compound(vec![
        ("B".to_string(), json!(2)),
        ("A".to_string(), json!(1)),
    ]);
    assert_ne!(ab, ba);
}

#[test]
fn display_matches_segment() {
    let key = KeyValue::single("ALFKI");
    assert_eq!(key.to_string(), "'ALFKI'");
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// A string key segment is always fully quoted and never leaves a
    /// lone quote inside.
    #[test]
    fn string_key_quoting_is_balanced(s in "[a-zA-Z0-9' ]{0,40}") {
        let segment = KeyValue::single(s.as_str()).to_segment().unwrap();
        prop_assert!(segment.starts_with('\''));
        prop_assert!(segment.ends_with('\''));
        let interior = &segment[1..segment.len() - 1];
        prop_assert_eq!(interior.matches('\'').count() % 2, 0);
    }

    /// Equal keys always hash-render to the same segment.
    #[test]
    fn equal_keys_render_identically(n in any::<i64>()) {
        let a = KeyValue::single(n);
        let b = KeyValue::single(n);
        prop_assert_eq!(a.to_segment().unwrap(), b.to_segment().unwrap());
    }
}
