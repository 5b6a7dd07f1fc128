//! Builder API for constructing entities in application code.
//!
//! # Example
//!
//! ```rust
//! use feast_entity::model::{EntityBuilder, ValueType};
//!
//! let entity = EntityBuilder::new("trip")
//!     .join_key("driver_id", ValueType::Int64)
//!     .join_key("rider_id", ValueType::String)
//!     .owner("rides@example.com")
//!     .tag("team", "rides")
//!     .build();
//!
//! assert_eq!(entity.join_keys().len(), 2);
//! assert_eq!(entity.join_key(), "driver_id");
//! ```

use std::collections::BTreeMap;

use time::OffsetDateTime;
use tracing::warn;

use crate::model::{Entity, ValueType};

/// Builder for [`Entity`].
///
/// Typed keys added with [`join_key`](Self::join_key) take precedence over a
/// [`legacy_join_key`](Self::legacy_join_key). With neither, the entity is
/// keyed by its own name. Untyped keys take [`value_type`](Self::value_type),
/// or `Unspecified` when that is not set either.
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    name: String,
    project: String,
    join_keys: BTreeMap<String, ValueType>,
    legacy_join_key: Option<String>,
    value_type: Option<ValueType>,
    description: String,
    tags: BTreeMap<String, String>,
    owner: String,
    created_timestamp: Option<OffsetDateTime>,
    last_updated_timestamp: Option<OffsetDateTime>,
}

impl EntityBuilder {
    /// Creates a builder for the named entity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a typed join key. A repeated name replaces the earlier type.
    pub fn join_key(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.join_keys.insert(name.into(), value_type);
        self
    }

    /// Adds several typed join keys.
    pub fn join_keys<I, K>(mut self, join_keys: I) -> Self
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        self.join_keys
            .extend(join_keys.into_iter().map(|(name, vt)| (name.into(), vt)));
        self
    }

    /// Sets the single untyped join key of the older API.
    pub fn legacy_join_key(mut self, name: impl Into<String>) -> Self {
        self.legacy_join_key = Some(name.into());
        self
    }

    /// Type used for an untyped (legacy or defaulted) join key.
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Adds a tag. A repeated key replaces the earlier value.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn created_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.created_timestamp = Some(timestamp);
        self
    }

    pub fn last_updated_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.last_updated_timestamp = Some(timestamp);
        self
    }

    /// Builds the entity.
    pub fn build(self) -> Entity {
        let join_keys = if !self.join_keys.is_empty() {
            self.join_keys
        } else {
            let key = self.legacy_join_key.unwrap_or_else(|| self.name.clone());
            if self.value_type.is_none() {
                warn!(
                    entity = %self.name,
                    join_key = %key,
                    "entity value_type is not set; join key type defaults to unspecified"
                );
            }
            BTreeMap::from([(key, self.value_type.unwrap_or_default())])
        };

        let join_key = join_keys.keys().next().cloned().unwrap_or_default();

        Entity {
            name: self.name,
            project: self.project,
            join_key,
            join_keys,
            description: self.description,
            tags: self.tags,
            owner: self.owner,
            created_timestamp: self.created_timestamp,
            last_updated_timestamp: self.last_updated_timestamp,
        }
    }
}
