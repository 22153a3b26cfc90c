//! Property-based tests for the overlay tag discipline and the compound
//! key builder.
//!
//! The overlay invariants hold for every operation sequence: caching never
//! changes dirtiness, checkpointing always cleans, clearing always resets
//! to clean-and-empty. The key builder emits components in (position,
//! name) order no matter how they were declared.

use proptest::prelude::*;
use proxima_proxy::{build_compound_key, ChangeOverlay, CompoundKeySource, KeyComponent};
use proxima_proxy::PropertyValue;
use proxima_types::KeyValue;
use serde_json::{json, Value};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

#[derive(Debug, Clone)]
enum OverlayOp {
    Insert(String, i64),
    Cache(String, i64),
    Checkpoint,
}

fn overlay_op_strategy() -> impl Strategy<Value = OverlayOp> {
    let name = prop::sample::select(vec!["A", "B", "C", "D", "E"]);
    prop_oneof![
        (name.clone(), any::<i64>()).prop_map(|(n, v)| OverlayOp::Insert(n.to_string(), v)),
        (name, any::<i64>()).prop_map(|(n, v)| OverlayOp::Cache(n.to_string(), v)),
        Just(OverlayOp::Checkpoint),
    ]
}

struct PositionedSource {
    components: Vec<KeyComponent>,
    failing: Vec<String>,
}

impl CompoundKeySource for PositionedSource {
    fn components(&self) -> Vec<KeyComponent> {
        self.components.clone()
    }

    fn component_value(&self, name: &str) -> Result<Value, String> {
        if self.failing.iter().any(|f| f == name) {
            return Err("no accessor".to_string());
        }
        Ok(json!(name.len() as i64))
    }
}

// =============================================================================
// OVERLAY TAG DISCIPLINE
// =============================================================================

proptest! {
    /// Caching a member the overlay has never seen before preserves
    /// dirtiness in both directions. (Caching a value that restores the
    /// checkpointed content can read clean; that is the hash
    /// approximation, not a caching effect.)
    #[test]
    fn cache_of_fresh_member_preserves_dirtiness(
        ops in prop::collection::vec(overlay_op_strategy(), 0..20),
        value in any::<i64>(),
    ) {
        let mut overlay = ChangeOverlay::new();
        for op in ops {
            match op {
                OverlayOp::Insert(n, v) => overlay.insert(n, PropertyValue::Json(json!(v))),
                OverlayOp::Cache(n, v) => overlay.cache(n, PropertyValue::Json(json!(v))),
                OverlayOp::Checkpoint => overlay.checkpoint(),
            }
        }

        let dirty_before = overlay.is_dirty();
        overlay.cache("Fresh", PropertyValue::Json(json!(value)));
        prop_assert_eq!(overlay.is_dirty(), dirty_before);
    }

    /// A checkpoint always reads clean, whatever came before it.
    #[test]
    fn checkpoint_always_cleans(
        ops in prop::collection::vec(overlay_op_strategy(), 0..20),
    ) {
        let mut overlay = ChangeOverlay::new();
        for op in ops {
            match op {
                OverlayOp::Insert(n, v) => overlay.insert(n, PropertyValue::Json(json!(v))),
                OverlayOp::Cache(n, v) => overlay.cache(n, PropertyValue::Json(json!(v))),
                OverlayOp::Checkpoint => overlay.checkpoint(),
            }
        }

        overlay.checkpoint();
        prop_assert!(!overlay.is_dirty());
    }

    /// Clearing resets to clean-and-empty from any state.
    #[test]
    fn clear_always_resets(
        ops in prop::collection::vec(overlay_op_strategy(), 0..20),
    ) {
        let mut overlay = ChangeOverlay::new();
        for op in ops {
            match op {
                OverlayOp::Insert(n, v) => overlay.insert(n, PropertyValue::Json(json!(v))),
                OverlayOp::Cache(n, v) => overlay.cache(n, PropertyValue::Json(json!(v))),
                OverlayOp::Checkpoint => overlay.checkpoint(),
            }
        }

        overlay.clear();
        prop_assert!(!overlay.is_dirty());
        prop_assert!(overlay.is_empty());
    }
}

// =============================================================================
// COMPOUND KEY ORDERING
// =============================================================================

proptest! {
    /// Components come out sorted by (position, name) regardless of the
    /// declaration order.
    #[test]
    fn key_components_sort_by_position_then_name(
        positions in prop::collection::vec(0u32..8, 1..6),
    ) {
        let components: Vec<KeyComponent> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| KeyComponent::new(format!("K{i}"), *p))
            .collect();
        let source = PositionedSource { components: components.clone(), failing: vec![] };

        let KeyValue::Compound(built) = build_compound_key(&source) else {
            panic!("compound source must build a compound key");
        };

        let mut expected: Vec<(u32, String)> = components
            .iter()
            .map(|c| (c.position, c.name.clone()))
            .collect();
        expected.sort();
        let expected_names: Vec<String> = expected.into_iter().map(|(_, n)| n).collect();
        let built_names: Vec<String> = built.into_iter().map(|(n, _)| n).collect();
        prop_assert_eq!(built_names, expected_names);
    }

    /// Failing components are skipped; the rest keep their order.
    #[test]
    fn failing_components_never_reorder_the_rest(
        positions in prop::collection::vec(0u32..8, 2..6),
        fail_index in 0usize..6,
    ) {
        let components: Vec<KeyComponent> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| KeyComponent::new(format!("K{i}"), *p))
            .collect();
        let failing = vec![format!("K{}", fail_index % components.len())];
        let source = PositionedSource { components: components.clone(), failing: failing.clone() };

        let KeyValue::Compound(built) = build_compound_key(&source) else {
            panic!("compound source must build a compound key");
        };

        prop_assert_eq!(built.len(), components.len() - 1);
        prop_assert!(built.iter().all(|(n, _)| n != &failing[0]));

        let mut expected: Vec<(u32, String)> = components
            .iter()
            .filter(|c| c.name != failing[0])
            .map(|c| (c.position, c.name.clone()))
            .collect();
        expected.sort();
        let expected_names: Vec<String> = expected.into_iter().map(|(_, n)| n).collect();
        let built_names: Vec<String> = built.into_iter().map(|(n, _)| n).collect();
        prop_assert_eq!(built_names, expected_names);
    }
}
