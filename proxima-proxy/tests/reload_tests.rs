use proxima_proxy::{EntityHandle, ProxyError, Session, StructuredValue};
use proxima_schema::{SchemaRegistry, StructuredType, ValueType};
use proxima_types::{KeyValue, ResourceAddress, TypeName};
use proxima_wire::mock::MockClient;
use proxima_wire::WireEntity;
use serde_json::{json, Value};
use std::rc::Rc;

const ROOT: &str = "https://northwind.test/svc";

fn order_table() -> StructuredType {
    StructuredType::new(TypeName::new("Northwind", "Order"))
        .key_element("Id", 0)
        .scalar("Id", ValueType::Number)
        .scalar("Total", ValueType::Decimal)
}

fn make_session() -> (Rc<MockClient>, Rc<Session>) {
    let client = Rc::new(MockClient::new(ROOT));
    let mut schemas = SchemaRegistry::new();
    schemas.register(order_table());
    let session = Session::with_memory_context(client.clone(), schemas);
    (client, session)
}

fn order_payload(id: i64, total: f64) -> WireEntity {
    let mut payload = WireEntity::new(TypeName::new("Northwind", "Order"));
    payload.set_property("Id", json!(id));
    payload.set_property("Total", json!(total));
    payload
}

fn make_order(session: &Rc<Session>, id: i64) -> EntityHandle {
    let schema = session
        .schemas()
        .require(&TypeName::new("Northwind", "Order"))
        .unwrap();
    EntityHandle::from_payload(
        order_payload(id, 42.5),
        ResourceAddress::new(ROOT).join("Orders"),
        schema,
        Rc::clone(session),
    )
    .unwrap()
}

fn order_address(id: i64) -> ResourceAddress {
    ResourceAddress::new(format!("{ROOT}/Orders({id})"))
}

fn get_json(entity: &EntityHandle, name: &str) -> Value {
    entity.get(name).unwrap().as_property().unwrap().to_json()
}

// ── Success ──────────────────────────────────────────────────────

#[test]
fn reload_replaces_payload_and_resets_overlays() {
    let (client, session) = make_session();
    client.stage_entity(&order_address(10), order_payload(10, 60.0), None);

    let order = make_order(&session, 10);
    order.set("Total", json!(99).into()).unwrap();
    assert!(order.is_changed());

    order.load().unwrap();
    assert!(!order.is_changed());
    assert!(order.pending_properties().is_empty());
    assert!(order.pending_links().is_empty());
    assert_eq!(get_json(&order, "Total"), json!(60.0));
    assert_eq!(client.retrieve_calls(), 1);
}

#[test]
fn reload_captures_concurrency_token() {
    let (client, session) = make_session();
    client.stage_entity(&order_address(10), order_payload(10, 60.0), Some("W/\"8\""));

    let order = make_order(&session, 10);
    order.load().unwrap();
    assert_eq!(order.etag().as_deref(), Some("W/\"8\""));
}

#[test]
fn reload_honors_pending_query_restrictions() {
    let (client, session) = make_session();
    let restricted = ResourceAddress::new(format!(
        "{ROOT}/Orders(10)?$expand=Customer&$select=Total"
    ));
    client.stage_entity(&restricted, order_payload(10, 60.0), None);

    let order = make_order(&session, 10);
    order.expand(&["Customer"]).select(&["Total"]);
    order.load().unwrap();
    assert_eq!(get_json(&order, "Total"), json!(60.0));
}

#[test]
fn clear_query_options_reloads_from_bare_address() {
    let (client, session) = make_session();
    client.stage_entity(&order_address(10), order_payload(10, 60.0), None);

    let order = make_order(&session, 10);
    order.expand(&["Customer"]);
    order.clear_query_options();
    order.load().unwrap();
    assert_eq!(client.retrieve_calls(), 1);
}

// ── Failure ──────────────────────────────────────────────────────

#[test]
fn reload_without_address_fails() {
    let (_, session) = make_session();
    let schema = session
        .schemas()
        .require(&TypeName::new("Northwind", "Order"))
        .unwrap();
    let entity = EntityHandle::create(schema, session);

    assert!(matches!(
        entity.load(),
        Err(ProxyError::InvalidArgument { .. })
    ));
}

#[test]
fn reload_of_missing_entity_fails() {
    let (client, session) = make_session();
    client.stage_missing(&order_address(10));

    let order = make_order(&session, 10);
    let error = order.load().unwrap_err();
    match error {
        ProxyError::InvalidArgument { type_name, key, .. } => {
            assert_eq!(type_name, "Northwind.Order");
            assert_eq!(key, "10");
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }
}

#[test]
fn transport_failure_is_wrapped_with_identity() {
    let (client, session) = make_session();
    client.stage_failure(&order_address(10));

    let order = make_order(&session, 10);
    let error = order.load().unwrap_err();
    match error {
        ProxyError::InvalidArgument { type_name, key, reason } => {
            assert_eq!(type_name, "Northwind.Order");
            assert_eq!(key, "10");
            assert!(reason.contains("Orders(10)"));
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }
}

#[test]
fn failed_reload_leaves_pending_changes_in_place() {
    let (client, session) = make_session();
    client.stage_failure(&order_address(10));

    let order = make_order(&session, 10);
    order.set("Total", json!(99).into()).unwrap();
    let _ = order.load();

    assert!(order.is_changed());
    assert_eq!(get_json(&order, "Total"), json!(99));
}

// ── Key mismatch ─────────────────────────────────────────────────

#[test]
fn key_mismatch_fails_with_invalid_argument() {
    let (client, session) = make_session();
    client.stage_entity(&order_address(10), order_payload(11, 60.0), None);

    let order = make_order(&session, 10);
    assert!(matches!(
        order.load(),
        Err(ProxyError::InvalidArgument { .. })
    ));
}

#[test]
fn key_mismatch_leaves_payload_replaced_and_overlays_reset() {
    // No rollback: the handler is re-hydrated from the mismatching
    // payload, only the failure tells the caller its identity is suspect.
    let (client, session) = make_session();
    client.stage_entity(&order_address(10), order_payload(11, 60.0), None);

    let order = make_order(&session, 10);
    order.set("Total", json!(99).into()).unwrap();
    let _ = order.load().unwrap_err();

    assert_eq!(order.payload().property("Id"), Some(&json!(11)));
    assert!(!order.is_changed());
}

#[test]
fn keyless_identity_accepts_any_reloaded_key() {
    let (client, session) = make_session();
    let schema = session
        .schemas()
        .require(&TypeName::new("Northwind", "Order"))
        .unwrap();
    let mut payload = WireEntity::new(TypeName::new("Northwind", "Order"));
    payload.edit_link = Some(order_address(10));

    let order = EntityHandle::from_payload(
        payload,
        ResourceAddress::new(ROOT).join("Orders"),
        schema,
        Rc::clone(&session),
    )
    .unwrap();
    assert!(order.uuid().key().is_none());

    client.stage_entity(&order_address(10), order_payload(10, 60.0), None);
    order.load().unwrap();
    assert_eq!(order.uuid().key(), Some(&KeyValue::single(10)));
}
