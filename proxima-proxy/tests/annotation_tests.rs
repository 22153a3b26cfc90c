use proxima_proxy::{EntityHandle, Session};
use proxima_schema::{SchemaRegistry, StructuredType, ValueType};
use proxima_types::{AttachStatus, ResourceAddress, TypeName};
use proxima_wire::mock::MockClient;
use proxima_wire::{WireAnnotation, WireEntity};
use serde_json::json;
use std::rc::Rc;

const ROOT: &str = "https://northwind.test/svc";

fn order_table() -> StructuredType {
    StructuredType::new(TypeName::new("Northwind", "Order"))
        .key_element("Id", 0)
        .scalar("Id", ValueType::Number)
        .scalar("Total", ValueType::Decimal)
}

fn make_session() -> Rc<Session> {
    let client = Rc::new(MockClient::new(ROOT));
    let mut schemas = SchemaRegistry::new();
    schemas.register(order_table());
    Session::with_memory_context(client, schemas)
}

fn make_order(session: &Rc<Session>, payload: WireEntity) -> EntityHandle {
    let schema = session
        .schemas()
        .require(&TypeName::new("Northwind", "Order"))
        .unwrap();
    EntityHandle::from_payload(
        payload,
        ResourceAddress::new(ROOT).join("Orders"),
        schema,
        Rc::clone(session),
    )
    .unwrap()
}

fn annotated_payload() -> WireEntity {
    let mut payload = WireEntity::new(TypeName::new("Northwind", "Order"));
    payload.set_property("Id", json!(10));
    payload
        .annotations
        .push(WireAnnotation::new("com.svc.readonly", json!(true)));
    payload
        .annotations
        .push(WireAnnotation::new("com.svc.hint", json!(null)));
    payload
}

// ── Entity-level annotations ─────────────────────────────────────

#[test]
fn payload_annotation_is_readable_by_term() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    assert_eq!(order.annotation("com.svc.readonly"), Some(json!(true)));
    assert_eq!(order.annotation("com.svc.unknown"), None);
}

#[test]
fn present_null_annotation_reads_absent() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    assert_eq!(order.annotation("com.svc.hint"), None);
}

#[test]
fn written_annotation_shadows_payload() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order.set_annotation("com.svc.readonly", json!(false));
    assert_eq!(order.annotation("com.svc.readonly"), Some(json!(false)));
}

#[test]
fn annotation_write_transitions_to_changed() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order.set_annotation("com.svc.flag", json!(1));
    assert_eq!(
        session.context().status_of(order.instance_id()),
        Some(AttachStatus::Changed)
    );
}

#[test]
fn removed_annotation_falls_back_to_payload() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order.set_annotation("com.svc.readonly", json!(false));
    order.remove_annotation("com.svc.readonly");
    assert_eq!(order.annotation("com.svc.readonly"), Some(json!(true)));
}

#[test]
fn annotation_terms_list_payload_terms() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    assert_eq!(
        order.annotation_terms(),
        vec!["com.svc.readonly".to_string(), "com.svc.hint".to_string()]
    );
}

#[test]
fn annotations_view_mirrors_entity_accessors() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    let view = order.annotations();

    view.set("com.svc.flag", json!(7));
    assert_eq!(view.get("com.svc.flag"), Some(json!(7)));
    assert_eq!(order.annotation("com.svc.flag"), Some(json!(7)));

    view.remove("com.svc.flag");
    assert_eq!(view.get("com.svc.flag"), None);
    assert_eq!(view.terms(), order.annotation_terms());
}

// ── Per-member registries ────────────────────────────────────────

#[test]
fn property_registry_is_shared_across_lookups() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order
        .property_annotations("Total")
        .set("com.svc.unit", json!("EUR"));
    assert_eq!(
        order.property_annotations("Total").get("com.svc.unit"),
        Some(json!("EUR"))
    );
}

#[test]
fn property_and_navigation_registries_are_distinct() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order
        .property_annotations("Total")
        .set("com.svc.unit", json!("EUR"));
    assert_eq!(order.navigation_annotations("Total").get("com.svc.unit"), None);
}

#[test]
fn registries_per_member_are_independent() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());

    order
        .property_annotations("Total")
        .set("com.svc.unit", json!("EUR"));
    assert!(order.property_annotations("Id").is_empty());
}

#[test]
fn registry_terms_are_sorted() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    let registry = order.property_annotations("Total");

    registry.set("com.svc.b", json!(2));
    registry.set("com.svc.a", json!(1));
    assert_eq!(
        registry.terms(),
        vec!["com.svc.a".to_string(), "com.svc.b".to_string()]
    );
}

#[test]
fn registry_remove_returns_removed_value() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    let registry = order.property_annotations("Total");

    registry.set("com.svc.unit", json!("EUR"));
    assert_eq!(registry.remove("com.svc.unit"), Some(json!("EUR")));
    assert!(registry.is_empty());
}

#[test]
fn rebind_drops_member_registries() {
    let session = make_session();
    let order = make_order(&session, annotated_payload());
    order
        .property_annotations("Total")
        .set("com.svc.unit", json!("EUR"));

    order.rebind(annotated_payload());
    assert_eq!(
        order.property_annotations("Total").get("com.svc.unit"),
        None
    );
}
