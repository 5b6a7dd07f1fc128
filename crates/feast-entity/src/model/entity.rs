//! The in-memory entity model consumed by retrieval and join logic.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use time::OffsetDateTime;

use crate::model::ValueType;

/// One entity type in a feature store catalog.
///
/// Constructed by the decoder (or [`EntityBuilder`](crate::model::EntityBuilder))
/// and read-only afterwards. `join_keys` is never empty.
///
/// Equality covers the name, join keys, description, tags and owner. The
/// legacy `join_key`, the project and the registry timestamps are ignored.
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) name: String,
    pub(crate) project: String,
    pub(crate) join_key: String,
    pub(crate) join_keys: BTreeMap<String, ValueType>,
    pub(crate) description: String,
    pub(crate) tags: BTreeMap<String, String>,
    pub(crate) owner: String,
    pub(crate) created_timestamp: Option<OffsetDateTime>,
    pub(crate) last_updated_timestamp: Option<OffsetDateTime>,
}

impl Entity {
    /// The entity name, exactly as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The project the registry filed this entity under, if recorded.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The deprecated single join key, kept for older readers.
    ///
    /// Not authoritative: use [`join_keys`](Self::join_keys).
    pub fn join_key(&self) -> &str {
        &self.join_key
    }

    /// Join key names mapped to their value types.
    pub fn join_keys(&self) -> &BTreeMap<String, ValueType> {
        &self.join_keys
    }

    pub fn join_key_names(&self) -> impl Iterator<Item = &str> {
        self.join_keys.keys().map(String::as_str)
    }

    pub fn value_types(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.join_keys.values().copied()
    }

    /// Returns the value type of `join_key`, if the entity has that key.
    pub fn join_key_value_type(&self, join_key: &str) -> Option<ValueType> {
        self.join_keys.get(join_key).copied()
    }

    /// The first join key in iteration order, which is what the legacy
    /// single-key fields carry when the entity is written back out.
    pub fn primary_join_key(&self) -> Option<(&str, ValueType)> {
        self.join_keys
            .iter()
            .next()
            .map(|(name, value_type)| (name.as_str(), *value_type))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn created_timestamp(&self) -> Option<OffsetDateTime> {
        self.created_timestamp
    }

    pub fn last_updated_timestamp(&self) -> Option<OffsetDateTime> {
        self.last_updated_timestamp
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.join_keys == other.join_keys
            && self.description == other.description
            && self.tags == other.tags
            && self.owner == other.owner
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.join_keys.hash(state);
    }
}
