//! Binary encoding/decoding of registry entity envelopes.

pub mod entity;

pub use entity::{
    decode_entity_bytes, decode_entity_with_options, encode_entity, DecodeOptions,
};
