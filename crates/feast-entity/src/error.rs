//! Error types for entity decoding and validation.

use thiserror::Error;

/// Stable error codes, suitable for logs and registry load reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Specification has no name
    MissingName,
    /// E002: No join key can be resolved
    NoJoinKey,
    /// E003: Value type number outside the known enum
    UnknownValueType,
    /// E004: Metadata timestamp out of range
    InvalidTimestamp,
    /// E005: Malformed or oversized wire data
    MalformedEncoding,
    /// E006: Entity failed local validation
    Validation,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MissingName => "E001",
            ErrorCode::NoJoinKey => "E002",
            ErrorCode::UnknownValueType => "E003",
            ErrorCode::InvalidTimestamp => "E004",
            ErrorCode::MalformedEncoding => "E005",
            ErrorCode::Validation => "E006",
        }
    }
}

/// Why a specification could not be turned into an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("[E001] entity specification has no name")]
    MissingName,

    #[error("[E002] neither join_keys nor the legacy join_key is set")]
    NoJoinKey,

    #[error("[E003] join key {join_key:?} has unknown value type {value}")]
    UnknownValueType { join_key: String, value: i32 },

    #[error("[E004] {field} is out of range")]
    InvalidTimestamp { field: &'static str },
}

/// A specification that cannot produce a usable entity.
///
/// Always returned to the caller; whether to skip the entity or fail the
/// whole catalog load is the registry loader's decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entity specification{}: {}", display_entity(.entity), .reason)]
pub struct InvalidSpecification {
    /// The offending entity name, when the specification carried one.
    pub entity: Option<String>,
    pub reason: InvalidReason,
}

fn display_entity(entity: &Option<String>) -> String {
    match entity {
        Some(name) => format!(" {name:?}"),
        None => String::new(),
    }
}

impl InvalidSpecification {
    pub(crate) fn new(entity: &str, reason: InvalidReason) -> Self {
        let entity = (!entity.is_empty()).then(|| entity.to_string());
        Self { entity, reason }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.reason {
            InvalidReason::MissingName => ErrorCode::MissingName,
            InvalidReason::NoJoinKey => ErrorCode::NoJoinKey,
            InvalidReason::UnknownValueType { .. } => ErrorCode::UnknownValueType,
            InvalidReason::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp,
        }
    }
}

/// Error from local semantic validation of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the entity does not have a name")]
    MissingName,

    #[error("the entity {entity:?} does not have any join keys")]
    NoJoinKeys { entity: String },

    #[error("the entity {entity:?} has an empty join key name")]
    EmptyJoinKeyName { entity: String },

    #[error("the entity {entity:?} join key {join_key:?} has an invalid type")]
    InvalidJoinKeyType { entity: String, join_key: String },
}

/// Error while decoding an entity from bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("[E005] malformed entity message: {0}")]
    Malformed(#[from] prost::DecodeError),

    #[error("[E005] entity message length {len} exceeds maximum {max}")]
    TooLarge { len: usize, max: usize },

    #[error("[E005] entity {entity:?} declares {count} join keys (maximum {max})")]
    TooManyJoinKeys {
        entity: String,
        count: usize,
        max: usize,
    },

    #[error(transparent)]
    Invalid(#[from] InvalidSpecification),

    #[error("[E006] {0}")]
    Validation(#[from] ValidationError),
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Invalid(err) => err.code(),
            DecodeError::Validation(_) => ErrorCode::Validation,
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_specification_display() {
        let err = InvalidSpecification::new("driver", InvalidReason::NoJoinKey);
        assert_eq!(err.entity.as_deref(), Some("driver"));
        assert_eq!(
            err.to_string(),
            "invalid entity specification \"driver\": [E002] neither join_keys nor the legacy join_key is set"
        );

        let err = InvalidSpecification::new("", InvalidReason::MissingName);
        assert_eq!(err.entity, None);
        assert_eq!(
            err.to_string(),
            "invalid entity specification: [E001] entity specification has no name"
        );
    }

    #[test]
    fn test_codes() {
        let err = InvalidSpecification::new("x", InvalidReason::MissingName);
        assert_eq!(err.code().code(), "E001");
        let err = DecodeError::from(InvalidSpecification::new("x", InvalidReason::NoJoinKey));
        assert_eq!(err.code(), ErrorCode::NoJoinKey);
        let err = DecodeError::TooLarge { len: 10, max: 5 };
        assert_eq!(err.code().code(), "E005");
        let err = DecodeError::from(ValidationError::MissingName);
        assert_eq!(err.code().code(), "E006");
    }
}
