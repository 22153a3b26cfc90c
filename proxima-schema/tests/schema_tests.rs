use proxima_schema::{Cardinality, Member, SchemaRegistry, StructuredType, ValueType};
use proxima_types::TypeName;

fn order_type() -> StructuredType {
    StructuredType::new(TypeName::new("Northwind", "Order"))
        .key_element("Id", 0)
        .scalar("Id", ValueType::Number)
        .scalar("Total", ValueType::Decimal)
        .complex("ShipTo", TypeName::new("Northwind", "Address"))
        .stream("Invoice")
        .navigation(
            "Customer",
            Cardinality::Single,
            TypeName::new("Northwind", "Customer"),
            "Customers",
        )
        .navigation(
            "Items",
            Cardinality::Collection,
            TypeName::new("Northwind", "OrderItem"),
            "OrderItems",
        )
}

// ── Member resolution ────────────────────────────────────────────

#[test]
fn scalar_member_resolves() {
    let order = order_type();
    match order.member("Total") {
        Some(Member::Scalar(m)) => {
            assert_eq!(m.name, "Total");
            assert_eq!(m.value_type, ValueType::Decimal);
            assert!(m.complex_type.is_none());
        }
        other => panic!("expected scalar member, got {other:?}"),
    }
}

#[test]
fn complex_member_carries_its_type() {
    let order = order_type();
    match order.member("ShipTo") {
        Some(Member::Scalar(m)) => {
            assert_eq!(m.value_type, ValueType::Complex);
            assert_eq!(
                m.complex_type.as_ref().unwrap(),
                &TypeName::new("Northwind", "Address")
            );
        }
        other => panic!("expected complex member, got {other:?}"),
    }
}

#[test]
fn stream_member_resolves() {
    let order = order_type();
    assert!(matches!(order.member("Invoice"), Some(Member::Stream(_))));
}

#[test]
fn navigation_member_resolves() {
    let order = order_type();
    match order.member("Customer") {
        Some(Member::Navigation(m)) => {
            assert_eq!(m.cardinality, Cardinality::Single);
            assert_eq!(m.target_type, TypeName::new("Northwind", "Customer"));
            assert_eq!(m.target_set, "Customers");
        }
        other => panic!("expected navigation member, got {other:?}"),
    }
}

#[test]
fn unknown_member_is_none() {
    assert!(order_type().member("Nope").is_none());
}

#[test]
fn member_names_cover_all_declarations() {
    let order = order_type();
    let names: Vec<&str> = order.member_names().collect();
    assert_eq!(
        names,
        vec!["Customer", "Id", "Invoice", "Items", "ShipTo", "Total"]
    );
}

// ── Media declaration ────────────────────────────────────────────

#[test]
fn with_stream_marks_media_entity() {
    let plain = StructuredType::new(TypeName::new("Northwind", "Customer"));
    assert!(!plain.has_stream());

    let media = StructuredType::new(TypeName::new("Northwind", "Photo")).with_stream();
    assert!(media.has_stream());
}

// ── Key ordering ─────────────────────────────────────────────────

#[test]
fn ordered_key_sorts_by_position() {
    let table = StructuredType::new(TypeName::new("Northwind", "Span"))
        .key_element("C", 2)
        .key_element("A", 0)
        .key_element("B", 1);
    let names: Vec<&str> = table.ordered_key().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn duplicate_positions_break_ties_by_name() {
    let table = StructuredType::new(TypeName::new("Northwind", "Span"))
        .key_element("Z", 0)
        .key_element("A", 0);
    let names: Vec<&str> = table.ordered_key().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "Z"]);
}

#[test]
fn has_key_reflects_declarations() {
    assert!(order_type().has_key());
    assert!(!StructuredType::new(TypeName::new("Northwind", "Address")).has_key());
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn register_and_lookup() {
    let mut registry = SchemaRegistry::new();
    let shared = registry.register(order_type());

    let looked_up = registry.get(&TypeName::new("Northwind", "Order")).unwrap();
    assert!(std::sync::Arc::ptr_eq(&shared, &looked_up));
    assert_eq!(registry.len(), 1);
}

#[test]
fn require_fails_for_unknown_type() {
    let registry = SchemaRegistry::new();
    assert!(registry.require(&TypeName::new("Northwind", "Order")).is_err());
    assert!(registry.is_empty());
}

#[test]
fn re_register_replaces_table() {
    let mut registry = SchemaRegistry::new();
    registry.register(order_type());
    registry.register(StructuredType::new(TypeName::new("Northwind", "Order")));

    let table = registry.get(&TypeName::new("Northwind", "Order")).unwrap();
    assert!(table.member("Total").is_none());
    assert_eq!(registry.len(), 1);
}
