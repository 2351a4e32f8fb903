use proptest::prelude::*;
use serde_json::json;
use zutil_value::{deep_clone, merge, Value};

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        "[a-z]{0,8}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..6).prop_map(|map| {
                serde_json::Value::Object(map.into_iter().collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn clone_is_idempotent(doc in arb_json()) {
        let value = Value::from(&doc);
        let once = deep_clone(&value);
        let twice = deep_clone(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(twice.to_json().unwrap(), doc);
    }

    #[test]
    fn clone_is_independent(doc in arb_json()) {
        let value = Value::from(&doc);
        let copy = deep_clone(&value);
        if let Some(obj) = copy.as_object() {
            obj.insert("__added__", 1);
        }
        if let Some(arr) = copy.as_array() {
            arr.push(Value::Null);
        }
        prop_assert_eq!(value.to_json().unwrap(), doc);
    }

    #[test]
    fn merge_scalar_is_right_biased(a in any::<i32>(), b in any::<i32>()) {
        let target = Value::from(json!({"k": a}));
        merge(&target, &[Value::from(json!({"k": b}))]);
        prop_assert_eq!(target.to_json().unwrap(), json!({"k": b}));
    }
}
