//! Join key resolution properties over arbitrary specifications.

use std::collections::BTreeMap;
use std::thread;

use feast_entity::{
    decode, decode_all, decode_entity_bytes, encode_entity, EntitySpecV2, InvalidReason,
    JoinKeySpec, ValueType,
};
use proptest::prelude::*;

fn value_type() -> impl Strategy<Value = ValueType> {
    prop::sample::select(vec![
        ValueType::Unspecified,
        ValueType::Bytes,
        ValueType::String,
        ValueType::Int32,
        ValueType::Int64,
        ValueType::Double,
        ValueType::Float,
        ValueType::Bool,
        ValueType::UnixTimestamp,
        ValueType::BytesList,
        ValueType::StringList,
        ValueType::Int64List,
        ValueType::Null,
    ])
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn join_keys() -> impl Strategy<Value = BTreeMap<String, ValueType>> {
    prop::collection::btree_map(name(), value_type(), 1..6)
}

fn spec_with(
    name: &str,
    legacy_key: &str,
    legacy_type: ValueType,
    join_keys: &BTreeMap<String, ValueType>,
) -> EntitySpecV2 {
    EntitySpecV2 {
        name: name.to_string(),
        join_key: legacy_key.to_string(),
        value_type: legacy_type.into(),
        join_keys: join_keys
            .iter()
            .map(|(key, vt)| (key.clone(), JoinKeySpec::new(key.clone(), *vt)))
            .collect(),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn mapping_is_copied_exactly(
        entity in name(),
        legacy_key in "[a-z_]{0,12}",
        legacy_type in value_type(),
        keys in join_keys(),
    ) {
        let spec = spec_with(&entity, &legacy_key, legacy_type, &keys);
        let decoded = decode(&spec).unwrap();
        prop_assert_eq!(decoded.name(), entity.as_str());
        prop_assert_eq!(decoded.join_keys(), &keys);
    }

    #[test]
    fn legacy_pair_becomes_single_entry(
        entity in name(),
        legacy_key in name(),
        legacy_type in value_type(),
    ) {
        let spec = spec_with(&entity, &legacy_key, legacy_type, &BTreeMap::new());
        let decoded = decode(&spec).unwrap();
        prop_assert_eq!(
            decoded.join_keys(),
            &BTreeMap::from([(legacy_key.clone(), legacy_type)])
        );
    }

    #[test]
    fn no_join_key_is_rejected(entity in name(), legacy_type in value_type()) {
        let spec = spec_with(&entity, "", legacy_type, &BTreeMap::new());
        let err = decode(&spec).unwrap_err();
        prop_assert_eq!(err.reason, InvalidReason::NoJoinKey);
        prop_assert_eq!(err.entity, Some(entity));
    }

    #[test]
    fn decoding_is_idempotent(
        entity in name(),
        legacy_key in "[a-z_]{0,12}",
        legacy_type in value_type(),
        keys in prop::collection::btree_map(name(), value_type(), 0..4),
    ) {
        let spec = spec_with(&entity, &legacy_key, legacy_type, &keys);
        prop_assert_eq!(decode(&spec), decode(&spec));
    }

    #[test]
    fn bytes_preserve_name_and_join_keys(entity in name(), keys in join_keys()) {
        let spec = spec_with(&entity, "", ValueType::Unspecified, &keys);
        let decoded = decode(&spec).unwrap();
        let reread = decode_entity_bytes(&encode_entity(&decoded)).unwrap();
        prop_assert_eq!(reread.name(), decoded.name());
        prop_assert_eq!(reread.join_keys(), decoded.join_keys());
    }
}

#[test]
fn scenario_legacy_driver() {
    let spec = EntitySpecV2::legacy("driver", "driver_id", ValueType::Int64);
    let entity = decode(&spec).unwrap();
    assert_eq!(entity.name(), "driver");
    assert_eq!(
        entity.join_keys(),
        &BTreeMap::from([("driver_id".to_string(), ValueType::Int64)])
    );
}

#[test]
fn scenario_trip_with_mapping() {
    let mut spec = EntitySpecV2::with_join_keys(
        "trip",
        [("driver_id", ValueType::Int64), ("rider_id", ValueType::String)],
    );
    spec.join_key = String::new();
    spec.value_type = ValueType::Unspecified.into();

    let entity = decode(&spec).unwrap();
    assert_eq!(entity.name(), "trip");
    assert_eq!(
        entity.join_keys(),
        &BTreeMap::from([
            ("driver_id".to_string(), ValueType::Int64),
            ("rider_id".to_string(), ValueType::String),
        ])
    );
}

#[test]
fn scenario_empty_specification() {
    let spec = EntitySpecV2::legacy("", "", ValueType::Unspecified);
    let err = decode(&spec).unwrap_err();
    assert_eq!(err.reason, InvalidReason::MissingName);
}

#[test]
fn parallel_decoding_matches_sequential() {
    let specs: Vec<EntitySpecV2> = (0..64)
        .map(|i| match i % 3 {
            0 => EntitySpecV2::legacy(format!("entity_{i}"), format!("key_{i}"), ValueType::Int64),
            1 => EntitySpecV2::with_join_keys(
                format!("entity_{i}"),
                [(format!("a_{i}"), ValueType::String), (format!("b_{i}"), ValueType::Int32)],
            ),
            _ => EntitySpecV2::legacy(format!("entity_{i}"), "", ValueType::Int64),
        })
        .collect();

    let sequential = decode_all(&specs);
    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = specs
            .chunks(8)
            .map(|chunk| scope.spawn(move || decode_all(chunk)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(parallel, sequential);
    assert_eq!(sequential.iter().filter(|r| r.is_err()).count(), 21);
}
