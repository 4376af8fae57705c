//! Client for the Yext REST API
//!
//! Lists, fetches and writes entities and custom fields. Entities arrive as
//! untyped JSON and are materialized into registered concrete types by their
//! `meta.entityType` tag; list endpoints are walked to completion with either
//! offset or page-token pagination.
//!
//! # Module Structure
//!
//! - [`api`] - Transport, credentials and HTTP client
//! - [`entity`] - Entity trait, type registry and materializer
//! - [`resource`] - Entity and custom field services, pagination drivers
//! - [`config`] - Persistent configuration with environment overrides
//! - [`error`] - Error type shared by the whole crate

pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod resource;

pub use entity::{Entity, EntityType, Event, LocationEntity, Registry};
pub use error::{Result, YextError};
pub use resource::{CustomField, EntityListOptions, ListOptions, Yext};
