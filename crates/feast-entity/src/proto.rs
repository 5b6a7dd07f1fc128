//! Wire binding for the registry's entity messages.
//!
//! These mirror `feast/core/Entity.proto`. Field numbers are fixed by the
//! registry protocol; the structs are declared with `prost` derives instead
//! of generated from the `.proto` so the crate builds without `protoc`.

use std::collections::BTreeMap;

use prost_types::Timestamp;

use crate::model::ValueType;

/// Entity envelope as stored in the registry.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EntityProto {
    #[prost(message, optional, tag = "1")]
    pub spec: Option<EntitySpecV2>,
    #[prost(message, optional, tag = "2")]
    pub meta: Option<EntityMeta>,
}

/// Serialized entity specification.
///
/// `join_key` and `value_type` are the deprecated single-key pair; newer
/// writers populate `join_keys` and keep the pair for older readers.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EntitySpecV2 {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "ValueType", tag = "2")]
    pub value_type: i32,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, tag = "4")]
    pub join_key: String,
    #[prost(btree_map = "string, string", tag = "8")]
    pub tags: BTreeMap<String, String>,
    #[prost(string, tag = "9")]
    pub project: String,
    #[prost(string, tag = "10")]
    pub owner: String,
    #[prost(btree_map = "string, message", tag = "11")]
    pub join_keys: BTreeMap<String, JoinKeySpec>,
}

/// Per-key entry of [`EntitySpecV2::join_keys`].
#[derive(Clone, PartialEq, prost::Message)]
pub struct JoinKeySpec {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "ValueType", tag = "2")]
    pub value_type: i32,
    #[prost(string, tag = "3")]
    pub description: String,
}

/// Registry-maintained metadata.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EntityMeta {
    #[prost(message, optional, tag = "1")]
    pub created_timestamp: Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub last_updated_timestamp: Option<Timestamp>,
}

impl EntitySpecV2 {
    /// Creates a spec using only the legacy single-key pair.
    pub fn legacy(
        name: impl Into<String>,
        join_key: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            join_key: join_key.into(),
            value_type: value_type.into(),
            ..Default::default()
        }
    }

    /// Creates a spec using only the join-keys mapping.
    pub fn with_join_keys<I, K>(name: impl Into<String>, join_keys: I) -> Self
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        let join_keys = join_keys
            .into_iter()
            .map(|(key, value_type)| {
                let key = key.into();
                let spec = JoinKeySpec::new(key.clone(), value_type);
                (key, spec)
            })
            .collect();
        Self {
            name: name.into(),
            join_keys,
            ..Default::default()
        }
    }
}

impl JoinKeySpec {
    /// Creates a join key entry without a description.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            description: String::new(),
        }
    }
}
