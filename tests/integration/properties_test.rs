//! Property tests for the store and resolver laws.

use super::deterministic_resolver;
use proptest::prelude::*;
use request_templates::store::VariableStore;
use request_templates::value::TemplateValue;
use serde_json::{json, Map};

/// Arbitrary JSON values whose strings contain no placeholders.
fn arb_plain_value() -> impl Strategy<Value = TemplateValue> {
    let leaf = prop_oneof![
        Just(TemplateValue::Null),
        any::<bool>().prop_map(TemplateValue::Bool),
        any::<i64>().prop_map(TemplateValue::from),
        "[a-zA-Z0-9 _./-]{0,12}".prop_map(TemplateValue::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(TemplateValue::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|entries| {
                TemplateValue::Object(entries.into_iter().collect::<Map<_, _>>())
            }),
        ]
    })
}

fn arb_store() -> impl Strategy<Value = VariableStore> {
    (
        prop::collection::vec(("[a-z]{1,6}", arb_plain_value()), 0..6),
        prop::collection::vec(("[a-z]{1,6}", arb_plain_value()), 0..6),
    )
        .prop_map(|(global, local)| {
            let mut store = VariableStore::new();
            for (key, value) in global {
                store.set_global(key, value);
            }
            for (key, value) in local {
                store.set_local(key, value);
            }
            store
        })
}

proptest! {
    #[test]
    fn plain_values_resolve_to_themselves(value in arb_plain_value()) {
        let store = VariableStore::new();
        let resolver = deterministic_resolver(&store);
        prop_assert_eq!(resolver.resolve(&value).unwrap(), value);
    }

    #[test]
    fn whole_placeholder_returns_stored_value(key in "[a-z]{1,8}", value in arb_plain_value()) {
        let mut store = VariableStore::new();
        store.set_local(key.clone(), value.clone());
        let resolver = deterministic_resolver(&store);

        let template = TemplateValue::String(format!("{{{{{}}}}}", key));
        prop_assert_eq!(resolver.resolve(&template).unwrap(), value);
    }

    #[test]
    fn resolution_does_not_mutate_input(store in arb_store(), value in arb_plain_value()) {
        let resolver = deterministic_resolver(&store);
        let template = json!({"value": value, "missing": "{{absent|1}}"});
        let before = template.clone();

        let _ = resolver.resolve(&template);
        prop_assert_eq!(template, before);
    }

    #[test]
    fn snapshot_round_trip(store in arb_store()) {
        let restored = VariableStore::from_snapshot(store.export_snapshot());
        prop_assert_eq!(&restored, &store);

        let mut imported = VariableStore::new();
        imported.import_snapshot(store.export_snapshot());
        prop_assert_eq!(imported, store);
    }

    #[test]
    fn local_shadows_global(key in "[a-z]{1,8}", global in arb_plain_value(), local in arb_plain_value()) {
        let mut store = VariableStore::new();
        store.set_global(key.clone(), global.clone());
        store.set_local(key.clone(), local.clone());
        prop_assert_eq!(store.get(&key), Some(&local));

        store.clear_local();
        prop_assert_eq!(store.get(&key), Some(&global));
    }
}
