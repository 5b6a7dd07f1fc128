//! Data model types for registry entities.
//!
//! - Value types (join key type tags)
//! - Entities (the decoded, read-only model)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod entity;
pub mod value_type;

pub use builder::EntityBuilder;
pub use entity::Entity;
pub use value_type::ValueType;
