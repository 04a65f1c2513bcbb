//! Property-Based Tests for Request Validation
//!
//! Uses proptest to check that type validation accepts exactly the string-valued payloads.

use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::error::ContactError;
use crate::models::{ContactPayload, RECOGNIZED_FIELDS};

// == Strategies ==
fn string_value_strategy() -> impl Strategy<Value = Value> {
    "[a-zA-Z0-9 @._-]{0,24}".prop_map(Value::String)
}

fn non_string_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        prop::collection::vec("[a-z]{0,4}", 0..3)
            .prop_map(|items| Value::Array(items.into_iter().map(Value::String).collect())),
        Just(Value::Object(Map::new())),
    ]
}

/// A subset of recognized fields, each mapped to a string value
fn string_payload_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(
        (prop::sample::select(RECOGNIZED_FIELDS.to_vec()), string_value_strategy()),
        1..6,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any non-empty object whose recognized fields are strings is accepted,
    // and every present field is carried through unchanged.
    #[test]
    fn prop_string_fields_accepted(object in string_payload_strategy()) {
        let payload = ContactPayload::from_value(&Value::Object(object.clone())).unwrap();
        let update = payload.into_update();

        let expect = |name: &str| object.get(name).and_then(|v| v.as_str()).map(str::to_string);
        prop_assert_eq!(update.username, expect("username"));
        prop_assert_eq!(update.first_name, expect("first_name"));
        prop_assert_eq!(update.last_name, expect("last_name"));
        prop_assert_eq!(update.email, expect("email"));
    }

    // A single non-string recognized field makes the whole payload a bad request.
    #[test]
    fn prop_non_string_field_rejected(
        mut object in string_payload_strategy(),
        field in prop::sample::select(RECOGNIZED_FIELDS.to_vec()),
        bad in non_string_value_strategy()
    ) {
        object.insert(field.to_string(), bad);
        let result = ContactPayload::from_value(&Value::Object(object));
        prop_assert!(matches!(result, Err(ContactError::BadRequest(_))));
    }
}
