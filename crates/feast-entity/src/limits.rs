//! Limits applied when decoding entities from untrusted bytes.
//!
//! These are the defaults of [`DecodeOptions`](crate::codec::DecodeOptions).

/// Maximum encoded size of one entity envelope (1 MiB).
pub const MAX_ENTITY_SIZE: usize = 1024 * 1024;

/// Maximum number of join keys on one entity.
pub const MAX_JOIN_KEYS: usize = 256;
