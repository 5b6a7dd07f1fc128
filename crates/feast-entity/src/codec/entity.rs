//! Entity encoding/decoding over the registry's protobuf wire format.

use prost::Message;
use prost_types::Timestamp;
use time::OffsetDateTime;
use tracing::debug;

use crate::decode::decode_entity;
use crate::error::DecodeError;
use crate::limits::{MAX_ENTITY_SIZE, MAX_JOIN_KEYS};
use crate::model::Entity;
use crate::proto::{EntityMeta, EntityProto, EntitySpecV2, JoinKeySpec};
use crate::validate::validate_entity;

// =============================================================================
// DECODING
// =============================================================================

/// Options for decoding entities from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum accepted message length in bytes.
    pub max_size: usize,
    /// Maximum accepted number of entries in `join_keys`.
    pub max_join_keys: usize,
    /// Run [`validate_entity`] on the decoded entity.
    pub validate: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_size: MAX_ENTITY_SIZE,
            max_join_keys: MAX_JOIN_KEYS,
            validate: false,
        }
    }
}

impl DecodeOptions {
    /// Default limits with validation turned on.
    pub fn strict() -> Self {
        Self {
            validate: true,
            ..Self::default()
        }
    }
}

/// Decodes an entity envelope with default options.
pub fn decode_entity_bytes(input: &[u8]) -> Result<Entity, DecodeError> {
    decode_entity_with_options(input, DecodeOptions::default())
}

/// Decodes an entity envelope.
pub fn decode_entity_with_options(
    input: &[u8],
    options: DecodeOptions,
) -> Result<Entity, DecodeError> {
    if input.len() > options.max_size {
        debug!(len = input.len(), max = options.max_size, "rejecting oversized entity message");
        return Err(DecodeError::TooLarge {
            len: input.len(),
            max: options.max_size,
        });
    }

    let proto = EntityProto::decode(input)?;

    if let Some(spec) = proto
        .spec
        .as_ref()
        .filter(|spec| spec.join_keys.len() > options.max_join_keys)
    {
        debug!(entity = %spec.name, count = spec.join_keys.len(), "rejecting entity with too many join keys");
        return Err(DecodeError::TooManyJoinKeys {
            entity: spec.name.clone(),
            count: spec.join_keys.len(),
            max: options.max_join_keys,
        });
    }

    let entity = decode_entity(&proto)?;
    if options.validate {
        validate_entity(&entity)?;
    }
    Ok(entity)
}

// =============================================================================
// ENCODING
// =============================================================================

impl Entity {
    /// Converts the entity back to its registry envelope.
    ///
    /// Writes the `join_keys` mapping and, for readers that predate it, the
    /// legacy `join_key`/`value_type` pair taken from the primary join key.
    pub fn to_proto(&self) -> EntityProto {
        let join_keys = self
            .join_keys
            .iter()
            .map(|(name, value_type)| (name.clone(), JoinKeySpec::new(name.clone(), *value_type)))
            .collect();
        let (join_key, value_type) = self
            .primary_join_key()
            .map(|(name, value_type)| (name.to_string(), value_type))
            .unwrap_or_default();

        let meta = (self.created_timestamp.is_some() || self.last_updated_timestamp.is_some())
            .then(|| EntityMeta {
                created_timestamp: self.created_timestamp.map(to_timestamp),
                last_updated_timestamp: self.last_updated_timestamp.map(to_timestamp),
            });

        EntityProto {
            spec: Some(EntitySpecV2 {
                name: self.name.clone(),
                value_type: value_type.into(),
                description: self.description.clone(),
                join_key,
                tags: self.tags.clone(),
                project: self.project.clone(),
                owner: self.owner.clone(),
                join_keys,
            }),
            meta,
        }
    }
}

/// Encodes an entity to its registry envelope bytes.
pub fn encode_entity(entity: &Entity) -> Vec<u8> {
    entity.to_proto().encode_to_vec()
}

fn to_timestamp(datetime: OffsetDateTime) -> Timestamp {
    Timestamp {
        seconds: datetime.unix_timestamp(),
        nanos: datetime.nanosecond() as i32,
    }
}
