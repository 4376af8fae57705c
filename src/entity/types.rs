//! Core entity abstractions
//!
//! Every concrete entity variant implements [`Entity`]. The serde plumbing
//! needed to populate, serialize and downcast a boxed entity is provided by a
//! blanket [`EntityData`] impl, so variants only describe their own identity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::fmt;

pub const ENTITYTYPE_LOCATION: &str = "location";
pub const ENTITYTYPE_EVENT: &str = "event";

/// String discriminator selecting a concrete entity variant (`meta.entityType`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn location() -> Self {
        Self::new(ENTITYTYPE_LOCATION)
    }

    pub fn event() -> Self {
        Self::new(ENTITYTYPE_EVENT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for EntityType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Metadata block shared by every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Optional capability: read absent optional fields back as empty values.
///
/// Variants that keep "missing from the JSON" distinct from "present but
/// empty" implement this and expose it through [`Entity::nil_normalization`].
pub trait SupportsNilNormalization {
    fn set_nil_is_empty(&mut self, nil_is_empty: bool);
    fn nil_is_empty(&self) -> bool;
}

/// Serde and `Any` plumbing for boxed entities. Implemented for every
/// serializable type; do not implement by hand.
pub trait EntityData: Any + Send + Sync {
    /// Decode `record` over the current state of `self`. Fields the record
    /// omits keep their current serialized value.
    fn populate(&mut self, record: Value) -> serde_json::Result<()>;
    fn to_value(&self) -> serde_json::Result<Value>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> EntityData for T
where
    T: Serialize + DeserializeOwned + Any + Send + Sync,
{
    fn populate(&mut self, record: Value) -> serde_json::Result<()> {
        let mut merged = serde_json::to_value(&*self)?;
        merge_record(&mut merged, record);
        *self = serde_json::from_value(merged)?;
        Ok(())
    }

    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Overlay `record` onto `base`, descending into nested objects
fn merge_record(base: &mut Value, record: Value) {
    match (base, record) {
        (Value::Object(base), Value::Object(record)) => {
            for (key, value) in record {
                match base.get_mut(&key) {
                    Some(existing) => merge_record(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, record) => *base = record,
    }
}

/// A statically typed Yext entity
pub trait Entity: EntityData + fmt::Debug {
    /// Type tag this variant is registered under
    fn entity_type(&self) -> EntityType;

    /// Server-assigned identifier, empty if not yet created
    fn entity_id(&self) -> String;

    /// The nil-normalization capability, if this variant has one
    fn nil_normalization(&mut self) -> Option<&mut dyn SupportsNilNormalization> {
        None
    }
}

impl<'a> dyn Entity + 'a {
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Entity>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Invoke the nil-normalization hook when the variant supports it
pub fn set_nil_is_empty(entity: &mut dyn Entity) {
    if let Some(normalizable) = entity.nil_normalization() {
        normalizable.set_nil_is_empty(true);
    }
}

/// Current nil-normalization flag, `false` for variants without the capability
pub fn get_nil_is_empty(entity: &mut dyn Entity) -> bool {
    entity
        .nil_normalization()
        .map(|n| n.nil_is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_serializes_as_plain_string() {
        let value = serde_json::to_value(EntityType::location()).unwrap();
        assert_eq!(value, Value::String("location".to_string()));
    }

    #[test]
    fn test_merge_record_keeps_omitted_nested_fields() {
        let mut base = serde_json::json!({"meta": {"folderId": "f", "id": "old"}, "name": "a"});
        merge_record(
            &mut base,
            serde_json::json!({"meta": {"id": "new"}, "name": null, "closed": true}),
        );
        assert_eq!(
            base,
            serde_json::json!({"meta": {"folderId": "f", "id": "new"}, "name": null, "closed": true})
        );
    }

    #[test]
    fn test_meta_omits_absent_fields() {
        let meta = EntityMeta {
            id: Some("123".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value, serde_json::json!({"id": "123"}));
    }
}
