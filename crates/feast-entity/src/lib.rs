//! Backward-compatible decoding of feature store entity specifications.
//!
//! A registry stores each entity as an `Entity { spec, meta }` protobuf
//! envelope. Older writers identify an entity with a single `join_key` and
//! `value_type`; newer writers add a `join_keys` mapping of independently
//! typed keys and keep the single pair for older readers. This crate turns
//! either shape into one [`Entity`] model.
//!
//! # Quick Start
//!
//! ```rust
//! use feast_entity::{decode, EntitySpecV2, ValueType};
//!
//! // A store that still writes the legacy single key.
//! let spec = EntitySpecV2::legacy("driver", "driver_id", ValueType::Int64);
//! let driver = decode(&spec).unwrap();
//! assert_eq!(driver.join_key_value_type("driver_id"), Some(ValueType::Int64));
//!
//! // A store that writes the mapping. The legacy pair, if any, is ignored.
//! let spec = EntitySpecV2::with_join_keys(
//!     "trip",
//!     [("driver_id", ValueType::Int64), ("rider_id", ValueType::String)],
//! );
//! let trip = decode(&spec).unwrap();
//! assert_eq!(trip.join_keys().len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Entity model, value types, builder
//! - [`proto`]: Wire binding of the registry messages
//! - [`decode`]: Specification → entity resolution
//! - [`codec`]: Bytes ⇄ entity
//! - [`validate`]: Local semantic validation
//! - [`error`]: Error types
//! - [`limits`]: Limits for decoding untrusted bytes
//!
//! # Resolution
//!
//! A non-empty `join_keys` mapping is authoritative. Only when it is empty
//! is a single key synthesized from `join_key` and `value_type`. A
//! specification with no name, or with neither form of join key, fails
//! with [`InvalidSpecification`]; an entity without join keys is never
//! constructed.

pub mod codec;
pub mod decode;
pub mod error;
pub mod limits;
pub mod model;
pub mod proto;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{decode_entity_bytes, decode_entity_with_options, encode_entity, DecodeOptions};
pub use decode::{decode, decode_all, decode_entity, resolve_join_keys};
pub use error::{DecodeError, ErrorCode, InvalidReason, InvalidSpecification, ValidationError};
pub use model::{Entity, EntityBuilder, ValueType};
pub use proto::{EntityMeta, EntityProto, EntitySpecV2, JoinKeySpec};
pub use validate::validate_entity;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
