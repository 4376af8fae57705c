//! Typed entity model
//!
//! The Yext API returns entities as untyped JSON objects. This module turns
//! them into statically typed values.
//!
//! # Module Structure
//!
//! - [`types`] - The [`Entity`] trait, type tags and shared metadata
//! - [`registry`] - Maps type tags to factories for concrete entity types
//! - [`materialize`] - Converts raw records into registered entity types
//! - [`location`] / [`event`] - Built-in entity variants
//!
//! # Example
//!
//! ```ignore
//! use yext::entity::{to_entity_type, LocationEntity, Registry};
//!
//! let registry = Registry::with_defaults();
//! let entity = to_entity_type(&registry, raw_record)?;
//! if let Some(location) = entity.downcast_ref::<LocationEntity>() {
//!     println!("{:?}", location.name());
//! }
//! ```

pub mod event;
pub mod location;
pub mod materialize;
pub mod registry;
pub mod types;

pub use event::{Event, EventTime};
pub use location::{Address, LocationEntity, Website};
pub use materialize::{entity_type_of, to_entity_type, to_entity_types};
pub use registry::{EntityFactory, Registry};
pub use types::{
    get_nil_is_empty, set_nil_is_empty, Entity, EntityData, EntityMeta, EntityType,
    SupportsNilNormalization, ENTITYTYPE_EVENT, ENTITYTYPE_LOCATION,
};
