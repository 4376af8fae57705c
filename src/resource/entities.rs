//! Entities resource
//!
//! Lists, fetches and writes entities. Raw records from the API are turned
//! into registered entity types through the materializer.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use super::options::{
    add_entity_list_options, add_list_options, add_query_params, EntityListOptions, ListOptions,
};
use super::pagination::{token_list_helper, TokenPage};
use super::{null_as_default, strip_fields};
use crate::api::{ResponseMeta, Transport};
use crate::entity::{to_entity_type, to_entity_types, Entity, EntityType, Registry};
use crate::error::{Result, YextError};

const ENTITY_PATH: &str = "entities";

/// Largest page the entities endpoint serves
pub const ENTITY_LIST_MAX_LIMIT: usize = 50;

/// One page of the entities listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: usize,
    /// Records as returned by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_token: String,
    /// `entities` materialized into registered types
    #[serde(skip)]
    pub typed_entities: Vec<Box<dyn Entity>>,
}

pub struct EntityService {
    transport: Arc<dyn Transport>,
    registry: Registry,
}

impl EntityService {
    /// Create the service with the built-in entity types registered
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            registry: Registry::with_defaults(),
        }
    }

    /// Register an additional entity type. Must happen before listing.
    pub fn register_entity<T>(&mut self, tag: impl Into<EntityType>)
    where
        T: Entity + Default,
    {
        self.registry.register::<T>(tag);
    }

    /// Fresh, empty instance of the type registered under `tag`
    pub fn create_entity(&self, tag: &EntityType) -> Result<Box<dyn Entity>> {
        self.registry.create(tag)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Fetch every entity, following page tokens to the end
    pub async fn list_all(&self, opts: Option<&EntityListOptions>) -> Result<Vec<Box<dyn Entity>>> {
        let base = opts.cloned().unwrap_or_default();
        let paging = ListOptions::with_limit(ENTITY_LIST_MAX_LIMIT);

        let entities = token_list_helper(
            |list_options| {
                let mut page_opts = base.clone();
                page_opts.list_options = list_options;
                async move {
                    let (resp, _) = self.list(Some(&page_opts)).await?;
                    Ok::<_, YextError>(TokenPage {
                        items: resp.typed_entities,
                        next_token: resp.page_token,
                    })
                }
            },
            &paging,
        )
        .await?;

        tracing::info!("Listed {} entities", entities.len());
        Ok(entities)
    }

    /// Fetch a single page of entities
    pub async fn list(
        &self,
        opts: Option<&EntityListOptions>,
    ) -> Result<(EntityListResponse, ResponseMeta)> {
        let mut path = ENTITY_PATH.to_string();
        if let Some(opts) = opts {
            path = add_entity_list_options(&path, opts);
            path = add_list_options(&path, &opts.list_options);
        }

        let (body, meta) = self.transport.do_request(Method::GET, &path).await?;
        let mut resp: EntityListResponse = serde_json::from_value(body)?;

        resp.typed_entities = to_entity_types(&self.registry, resp.entities.clone())?;

        Ok((resp, meta))
    }

    /// Fetch one entity by id
    pub async fn get(&self, id: &str) -> Result<(Box<dyn Entity>, ResponseMeta)> {
        let path = format!("{}/{}", ENTITY_PATH, urlencoding::encode(id));
        let (body, meta) = self.transport.do_request(Method::GET, &path).await?;
        let entity = to_entity_type(&self.registry, body)?;
        Ok((entity, meta))
    }

    /// Create a new entity. Any server-assigned id on the input is not sent.
    pub async fn create(&self, entity: &dyn Entity) -> Result<ResponseMeta> {
        let mut payload = entity.to_value()?;
        strip_fields(&mut payload, &["id"]);
        if let Some(meta) = payload.get_mut("meta") {
            strip_fields(meta, &["id"]);
        }

        let path = add_query_params(
            ENTITY_PATH,
            &[("entityType", entity.entity_type().to_string())],
        );
        let (_, meta) = self
            .transport
            .do_request_json(Method::POST, &path, &payload)
            .await?;
        Ok(meta)
    }

    /// Update an existing entity. The id and type discriminator are not sent.
    pub async fn edit(&self, entity: &dyn Entity) -> Result<ResponseMeta> {
        let id = entity.entity_id();
        if id.is_empty() {
            return Err(YextError::InvalidRequest(
                "cannot edit an entity without an id".to_string(),
            ));
        }

        let mut payload = entity.to_value()?;
        strip_fields(&mut payload, &["id", "type"]);
        if let Some(meta) = payload.get_mut("meta") {
            strip_fields(meta, &["id", "entityType"]);
        }

        let path = format!("{}/{}", ENTITY_PATH, urlencoding::encode(&id));
        let (_, meta) = self
            .transport
            .do_request_json(Method::PUT, &path, &payload)
            .await?;
        Ok(meta)
    }

    pub async fn delete(&self, id: &str) -> Result<ResponseMeta> {
        let path = format!("{}/{}", ENTITY_PATH, urlencoding::encode(id));
        let (_, meta) = self.transport.do_request(Method::DELETE, &path).await?;
        Ok(meta)
    }
}
