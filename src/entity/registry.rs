//! Entity Registry - map type tags to entity factories
//!
//! The registry decides which concrete type a raw record becomes. Each tag maps
//! to a factory that builds a fresh, default-valued instance; the stored
//! descriptor itself is never handed out.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::event::Event;
use super::location::LocationEntity;
use super::types::{Entity, EntityType};
use crate::error::{Result, YextError};

/// Factory producing a brand-new entity instance
pub type EntityFactory = Arc<dyn Fn() -> Box<dyn Entity> + Send + Sync>;

/// Maps entity type tags to factories
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<EntityType, EntityFactory>,
}

impl Registry {
    /// Empty registry with no known entity types
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in entity types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<LocationEntity>(EntityType::location());
        registry.register::<Event>(EntityType::event());
        registry
    }

    /// Register `T` under `tag`. Re-registering a tag replaces the previous entry.
    pub fn register<T>(&mut self, tag: impl Into<EntityType>)
    where
        T: Entity + Default,
    {
        self.register_factory(tag, || Box::new(T::default()) as Box<dyn Entity>);
    }

    /// Register a custom factory under `tag`
    pub fn register_factory<F>(&mut self, tag: impl Into<EntityType>, factory: F)
    where
        F: Fn() -> Box<dyn Entity> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if self.factories.insert(tag.clone(), Arc::new(factory)).is_some() {
            tracing::debug!("Replaced registered entity type: {}", tag);
        }
    }

    /// Build a fresh instance for `tag`
    pub fn create(&self, tag: &EntityType) -> Result<Box<dyn Entity>> {
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| YextError::UnknownTypeKind(tag.clone()))?;
        Ok(factory())
    }

    pub fn contains(&self, tag: &EntityType) -> bool {
        self.factories.contains_key(tag)
    }

    /// All registered tags, sorted
    pub fn entity_types(&self) -> Vec<&EntityType> {
        let mut tags: Vec<&EntityType> = self.factories.keys().collect();
        tags.sort();
        tags
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entity_types", &self.entity_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::types::EntityMeta;

    #[test]
    fn test_defaults_register_location_and_event() {
        let registry = Registry::with_defaults();
        assert!(registry.contains(&EntityType::location()));
        assert!(registry.contains(&EntityType::event()));
        assert_eq!(
            registry.entity_types(),
            vec![&EntityType::event(), &EntityType::location()]
        );
    }

    #[test]
    fn test_create_returns_independent_instances() {
        let registry = Registry::with_defaults();
        let mut first = registry.create(&EntityType::location()).unwrap();
        let second = registry.create(&EntityType::location()).unwrap();

        let location = first.downcast_mut::<LocationEntity>().unwrap();
        location.name = Some("Mutated".into());
        location.meta.id = Some("loc-1".into());

        let untouched = second.downcast_ref::<LocationEntity>().unwrap();
        assert_eq!(untouched, &LocationEntity::default());
        assert_eq!(second.entity_id(), "");
    }

    #[test]
    fn test_create_unknown_tag_fails() {
        let registry = Registry::with_defaults();
        let err = registry.create(&EntityType::new("healthcareProfessional")).unwrap_err();
        assert!(matches!(err, YextError::UnknownTypeKind(ref t) if t.as_str() == "healthcareProfessional"));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = Registry::new();
        assert!(registry.entity_types().is_empty());
        assert!(registry.create(&EntityType::location()).is_err());
    }

    #[test]
    fn test_reregistering_tag_replaces_factory() {
        let mut registry = Registry::with_defaults();
        registry.register_factory(EntityType::location(), || {
            Box::new(Event {
                meta: EntityMeta {
                    id: Some("from-factory".into()),
                    ..Default::default()
                },
                ..Default::default()
            }) as Box<dyn Entity>
        });

        let entity = registry.create(&EntityType::location()).unwrap();
        assert!(entity.is::<Event>());
        assert_eq!(entity.entity_id(), "from-factory");
        assert_eq!(registry.entity_types().len(), 2);
    }
}
