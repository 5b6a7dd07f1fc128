//! Local semantic validation for entities.
//!
//! Decoding only guarantees that an entity has a name and at least one join
//! key. Validation is stricter: it also rejects empty join key names and
//! join keys whose type was never specified. Registries typically run it
//! when an entity is applied, not when an existing catalog is loaded.

use crate::error::ValidationError;
use crate::model::{Entity, ValueType};

/// Validates an entity.
pub fn validate_entity(entity: &Entity) -> Result<(), ValidationError> {
    if entity.name().is_empty() {
        return Err(ValidationError::MissingName);
    }

    if entity.join_keys().is_empty() {
        return Err(ValidationError::NoJoinKeys {
            entity: entity.name().to_string(),
        });
    }

    for (join_key, value_type) in entity.join_keys() {
        if join_key.is_empty() {
            return Err(ValidationError::EmptyJoinKeyName {
                entity: entity.name().to_string(),
            });
        }
        if *value_type == ValueType::Unspecified {
            return Err(ValidationError::InvalidJoinKeyType {
                entity: entity.name().to_string(),
                join_key: join_key.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::model::EntityBuilder;
    use crate::proto::EntitySpecV2;

    #[test]
    fn test_valid_entity() {
        let entity = EntityBuilder::new("driver")
            .join_key("driver_id", ValueType::Int64)
            .build();
        assert!(validate_entity(&entity).is_ok());
    }

    #[test]
    fn test_missing_name() {
        let entity = EntityBuilder::new("")
            .join_key("driver_id", ValueType::Int64)
            .build();
        assert_eq!(validate_entity(&entity), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_unspecified_type() {
        let entity = EntityBuilder::new("customer").build();
        assert_eq!(
            validate_entity(&entity),
            Err(ValidationError::InvalidJoinKeyType {
                entity: "customer".to_string(),
                join_key: "customer".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_join_key_name() {
        // The mapping is copied as-is by the decoder, empty names included.
        let spec = EntitySpecV2::with_join_keys("trip", [("", ValueType::String)]);
        let entity = decode(&spec).unwrap();
        assert_eq!(
            validate_entity(&entity),
            Err(ValidationError::EmptyJoinKeyName {
                entity: "trip".to_string()
            })
        );
    }

    #[test]
    fn test_list_types_are_valid() {
        let entity = EntityBuilder::new("session")
            .join_key("event_ids", ValueType::Int64List)
            .build();
        assert!(validate_entity(&entity).is_ok());
    }
}
