//! Entity Materializer
//!
//! Turns raw JSON records into typed entities. The concrete type is chosen by
//! the record's `meta.entityType` tag; the full record is then decoded into a
//! fresh instance from the registry.

use serde_json::Value;

use super::registry::Registry;
use super::types::{set_nil_is_empty, Entity, EntityType};
use crate::error::{Result, YextError};

/// Materialize every record in order, stopping at the first failure
pub fn to_entity_types(registry: &Registry, records: Vec<Value>) -> Result<Vec<Box<dyn Entity>>> {
    records
        .into_iter()
        .map(|record| to_entity_type(registry, record))
        .collect()
}

/// Materialize a single raw record
pub fn to_entity_type(registry: &Registry, record: Value) -> Result<Box<dyn Entity>> {
    let entity_type = entity_type_of(&record)?;

    // Unregistered tags are a hard failure; there is no generic fallback type.
    let mut entity = registry.create(&entity_type)?;

    if let Err(source) = entity.populate(record.clone()) {
        return Err(YextError::Reencoding {
            entity_type,
            record,
            source,
        });
    }

    set_nil_is_empty(&mut *entity);
    Ok(entity)
}

/// Read the type tag from `meta.entityType`
pub fn entity_type_of(record: &Value) -> Result<EntityType> {
    let Value::Object(fields) = record else {
        return Err(YextError::MalformedEntity(record.clone()));
    };

    let Some(Value::Object(meta)) = fields.get("meta") else {
        return Err(YextError::MissingMetadata(record.clone()));
    };

    match meta.get("entityType") {
        Some(Value::String(tag)) => Ok(EntityType::new(tag.as_str())),
        _ => Err(YextError::MissingTypeTag(Value::Object(meta.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::event::Event;
    use crate::entity::location::LocationEntity;
    use crate::entity::types::get_nil_is_empty;
    use serde_json::json;

    fn location_record(id: &str, name: &str) -> Value {
        json!({
            "meta": {"id": id, "entityType": "location", "accountId": "me"},
            "name": name,
            "address": {"line1": "1 Madison Ave", "city": "New York", "region": "NY"},
            "categoryIds": ["1", "2"]
        })
    }

    #[test]
    fn test_materializes_location() {
        let registry = Registry::with_defaults();
        let entity = to_entity_type(&registry, location_record("loc-1", "HQ")).unwrap();

        assert_eq!(entity.entity_type(), EntityType::location());
        assert_eq!(entity.entity_id(), "loc-1");

        let location = entity.downcast_ref::<LocationEntity>().unwrap();
        assert_eq!(location.name.as_deref(), Some("HQ"));
        assert_eq!(
            location.address.as_ref().and_then(|a| a.city.as_deref()),
            Some("New York")
        );
        assert_eq!(location.meta.account_id.as_deref(), Some("me"));
    }

    #[test]
    fn test_materialized_location_is_nil_normalized() {
        let registry = Registry::with_defaults();
        let mut entity = to_entity_type(&registry, location_record("loc-1", "HQ")).unwrap();

        assert!(get_nil_is_empty(&mut *entity));
        let location = entity.downcast_ref::<LocationEntity>().unwrap();
        assert_eq!(location.description(), Some(""));
        assert_eq!(location.main_phone(), Some(""));
    }

    #[test]
    fn test_event_without_normalization_is_left_untouched() {
        let registry = Registry::with_defaults();
        let record = json!({
            "meta": {"id": "evt-1", "entityType": "event"},
            "name": "Launch",
            "time": {"start": "2019-03-01T18:30", "end": "2019-03-01T21:00"}
        });
        let mut entity = to_entity_type(&registry, record).unwrap();

        assert!(!get_nil_is_empty(&mut *entity));
        let event = entity.downcast_ref::<Event>().unwrap();
        assert_eq!(event.name.as_deref(), Some("Launch"));
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let registry = Registry::with_defaults();
        let err = to_entity_type(&registry, json!(["not", "a", "record"])).unwrap_err();
        assert!(matches!(err, YextError::MalformedEntity(_)));
    }

    #[test]
    fn test_missing_meta() {
        let registry = Registry::with_defaults();
        let err = to_entity_type(&registry, json!({"name": "HQ"})).unwrap_err();
        assert!(matches!(err, YextError::MissingMetadata(_)));
    }

    #[test]
    fn test_missing_entity_type() {
        let registry = Registry::with_defaults();
        let err = to_entity_type(&registry, json!({"meta": {"id": "1"}})).unwrap_err();
        match err {
            YextError::MissingTypeTag(meta) => assert_eq!(meta, json!({"id": "1"})),
            other => panic!("expected MissingTypeTag, got {other:?}"),
        }
    }

    #[test]
    fn test_unregistered_tag_is_not_degraded() {
        let registry = Registry::with_defaults();
        let record = json!({"meta": {"id": "1", "entityType": "atm"}});
        let err = to_entity_type(&registry, record).unwrap_err();
        assert!(matches!(err, YextError::UnknownTypeKind(ref t) if t.as_str() == "atm"));
    }

    #[test]
    fn test_type_mismatch_is_reencoding_error() {
        let registry = Registry::with_defaults();
        let record = json!({
            "meta": {"id": "1", "entityType": "location"},
            "name": 42
        });
        let err = to_entity_type(&registry, record).unwrap_err();
        match err {
            YextError::Reencoding {
                entity_type,
                record,
                ..
            } => {
                assert_eq!(entity_type, EntityType::location());
                assert_eq!(record["name"], 42);
                assert_eq!(record["meta"]["id"], "1");
            }
            other => panic!("expected Reencoding, got {other:?}"),
        }
    }

    #[test]
    fn test_record_is_decoded_over_factory_instance() {
        let mut registry = Registry::with_defaults();
        registry.register_factory(EntityType::location(), || {
            let mut location = LocationEntity::default();
            location.meta.folder_id = Some("default-folder".into());
            location.main_phone = Some("0000000000".into());
            Box::new(location) as Box<dyn Entity>
        });

        let record = json!({
            "meta": {"id": "1", "entityType": "location"},
            "mainPhone": "8885551234"
        });
        let entity = to_entity_type(&registry, record).unwrap();
        let location = entity.downcast_ref::<LocationEntity>().unwrap();

        // Preset state survives where the record is silent
        assert_eq!(location.meta.folder_id.as_deref(), Some("default-folder"));
        assert_eq!(location.meta.id.as_deref(), Some("1"));
        assert_eq!(location.main_phone.as_deref(), Some("8885551234"));
    }

    #[test]
    fn test_batch_preserves_order() {
        let registry = Registry::with_defaults();
        let records = vec![
            location_record("a", "First"),
            json!({"meta": {"id": "b", "entityType": "event"}}),
            location_record("c", "Third"),
        ];
        let entities = to_entity_types(&registry, records).unwrap();
        let ids: Vec<String> = entities.iter().map(|e| e.entity_id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(entities[1].is::<Event>());
    }

    #[test]
    fn test_batch_fails_fast_on_first_bad_record() {
        let registry = Registry::with_defaults();
        let records = vec![
            location_record("a", "First"),
            json!("oops"),
            json!({"meta": {}}),
        ];
        let err = to_entity_types(&registry, records).unwrap_err();
        assert!(matches!(err, YextError::MalformedEntity(Value::String(ref s)) if s == "oops"));
    }

    #[test]
    fn test_materialize_is_idempotent_through_serialization() {
        let registry = Registry::with_defaults();
        let first = to_entity_type(&registry, location_record("loc-9", "Annex")).unwrap();
        let reencoded = first.to_value().unwrap();
        let second = to_entity_type(&registry, reencoded).unwrap();

        assert_eq!(
            first.downcast_ref::<LocationEntity>(),
            second.downcast_ref::<LocationEntity>()
        );
    }
}
