//! Entity specification → entity model decoding.
//!
//! Join key resolution has one decision point: a non-empty `join_keys`
//! mapping is authoritative and copied as-is; only when it is empty is a
//! single key synthesized from the deprecated `join_key`/`value_type` pair.
//! The two are never merged.
//!
//! Everything here is pure. Specifications are borrowed immutably and no
//! state survives a call, so batches can be decoded from any number of
//! threads without coordination.

use std::collections::BTreeMap;

use prost_types::Timestamp;
use time::OffsetDateTime;
use tracing::{debug, trace};

use crate::error::{InvalidReason, InvalidSpecification};
use crate::model::{Entity, ValueType};
use crate::proto::{EntityMeta, EntityProto, EntitySpecV2};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Decodes a specification into an entity.
///
/// The entity's name is copied verbatim. Its join keys are resolved with
/// [`resolve_join_keys`]. Metadata is not part of the specification; see
/// [`decode_entity`] for the full envelope.
pub fn decode(spec: &EntitySpecV2) -> Result<Entity, InvalidSpecification> {
    if spec.name.is_empty() {
        return Err(InvalidSpecification::new("", InvalidReason::MissingName));
    }

    let join_keys = resolve_join_keys(spec)?;

    Ok(Entity {
        name: spec.name.clone(),
        project: spec.project.clone(),
        join_key: spec.join_key.clone(),
        join_keys,
        description: spec.description.clone(),
        tags: spec.tags.clone(),
        owner: spec.owner.clone(),
        created_timestamp: None,
        last_updated_timestamp: None,
    })
}

/// Resolves the join keys of a specification.
///
/// Returns the `join_keys` mapping when it is non-empty, otherwise a single
/// entry built from the legacy `join_key` and `value_type`. The result is
/// never empty.
pub fn resolve_join_keys(
    spec: &EntitySpecV2,
) -> Result<BTreeMap<String, ValueType>, InvalidSpecification> {
    if !spec.join_keys.is_empty() {
        if !spec.join_key.is_empty() && !legacy_matches_mapping(spec) {
            debug!(
                entity = %spec.name,
                legacy_join_key = %spec.join_key,
                legacy_value_type = spec.value_type,
                "legacy join key disagrees with join_keys; using join_keys"
            );
        }
        return spec
            .join_keys
            .iter()
            .map(|(name, key)| {
                value_type(spec, name, key.value_type).map(|value_type| (name.clone(), value_type))
            })
            .collect();
    }

    if spec.join_key.is_empty() {
        return Err(InvalidSpecification::new(&spec.name, InvalidReason::NoJoinKey));
    }

    trace!(entity = %spec.name, join_key = %spec.join_key, "resolving legacy join key");
    let value_type = value_type(spec, &spec.join_key, spec.value_type)?;
    Ok(BTreeMap::from([(spec.join_key.clone(), value_type)]))
}

/// Decodes a full registry envelope: the specification plus its metadata.
///
/// A missing specification is reported as a missing name.
pub fn decode_entity(proto: &EntityProto) -> Result<Entity, InvalidSpecification> {
    let Some(spec) = &proto.spec else {
        return Err(InvalidSpecification::new("", InvalidReason::MissingName));
    };

    let mut entity = decode(spec)?;
    if let Some(meta) = &proto.meta {
        apply_meta(&mut entity, meta)?;
    }
    Ok(entity)
}

/// Decodes each specification independently, preserving order.
///
/// A malformed specification yields an `Err` in its slot and does not
/// affect the others.
pub fn decode_all<'a, I>(specs: I) -> Vec<Result<Entity, InvalidSpecification>>
where
    I: IntoIterator<Item = &'a EntitySpecV2>,
{
    specs.into_iter().map(decode).collect()
}

fn legacy_matches_mapping(spec: &EntitySpecV2) -> bool {
    spec.join_keys
        .get(&spec.join_key)
        .is_some_and(|key| key.value_type == spec.value_type)
}

fn value_type(
    spec: &EntitySpecV2,
    join_key: &str,
    value: i32,
) -> Result<ValueType, InvalidSpecification> {
    ValueType::try_from(value).map_err(|_| {
        InvalidSpecification::new(
            &spec.name,
            InvalidReason::UnknownValueType {
                join_key: join_key.to_string(),
                value,
            },
        )
    })
}

fn apply_meta(entity: &mut Entity, meta: &EntityMeta) -> Result<(), InvalidSpecification> {
    entity.created_timestamp = meta
        .created_timestamp
        .as_ref()
        .map(|ts| to_datetime(&entity.name, ts, "created_timestamp"))
        .transpose()?;
    entity.last_updated_timestamp = meta
        .last_updated_timestamp
        .as_ref()
        .map(|ts| to_datetime(&entity.name, ts, "last_updated_timestamp"))
        .transpose()?;
    Ok(())
}

fn to_datetime(
    entity: &str,
    ts: &Timestamp,
    field: &'static str,
) -> Result<OffsetDateTime, InvalidSpecification> {
    let invalid = || InvalidSpecification::new(entity, InvalidReason::InvalidTimestamp { field });

    if !(0..NANOS_PER_SECOND).contains(&i128::from(ts.nanos)) {
        return Err(invalid());
    }
    let nanos = i128::from(ts.seconds) * NANOS_PER_SECOND + i128::from(ts.nanos);
    OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| invalid())
}
