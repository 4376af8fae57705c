//! Custom fields resource

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::options::{add_list_options, ListOptions};
use super::pagination::{list_helper, OffsetPage};
use super::{null_as_default, payload_without};
use crate::api::{ResponseMeta, Transport};
use crate::entity::EntityType;
use crate::error::{Result, YextError};

const CUSTOM_FIELD_PATH: &str = "customfields";

/// Largest page the custom fields endpoint serves
pub const CUSTOM_FIELD_LIST_MAX_LIMIT: usize = 1000;

pub const CUSTOMFIELDTYPE_BOOLEAN: &str = "BOOLEAN";
pub const CUSTOMFIELDTYPE_TEXT: &str = "TEXT";
pub const CUSTOMFIELDTYPE_MULTILINE_TEXT: &str = "MULTILINE_TEXT";
pub const CUSTOMFIELDTYPE_SINGLE_OPTION: &str = "SINGLE_OPTION";
pub const CUSTOMFIELDTYPE_MULTI_OPTION: &str = "MULTI_OPTION";
pub const CUSTOMFIELDTYPE_DATE: &str = "DATE";
pub const CUSTOMFIELDTYPE_URL: &str = "URL";
pub const CUSTOMFIELDTYPE_NUMBER: &str = "NUMBER";
pub const CUSTOMFIELDTYPE_PHOTO: &str = "PHOTO";
pub const CUSTOMFIELDTYPE_LIST: &str = "LIST";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomFieldOption {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// One of the `CUSTOMFIELDTYPE_*` values
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CustomFieldOption>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "alternateLanguageBehavior")]
    pub alternate_language_behaviour: String,
    #[serde(default)]
    pub entity_availability: Vec<EntityType>,
}

impl CustomField {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// One page of the custom fields listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomField>,
}

pub struct CustomFieldService {
    transport: Arc<dyn Transport>,
}

impl CustomFieldService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch every custom field, walking offsets until exhausted
    pub async fn list_all(&self) -> Result<Vec<CustomField>> {
        let custom_fields = list_helper(
            |opts| async move {
                let (resp, _) = self.list(&opts).await?;
                Ok::<_, YextError>(OffsetPage {
                    count: resp.count,
                    items: resp.custom_fields,
                })
            },
            &ListOptions::with_limit(CUSTOM_FIELD_LIST_MAX_LIMIT),
        )
        .await?;

        tracing::info!("Listed {} custom fields", custom_fields.len());
        Ok(custom_fields)
    }

    /// Fetch a single page of custom fields
    pub async fn list(&self, opts: &ListOptions) -> Result<(CustomFieldResponse, ResponseMeta)> {
        let path = add_list_options(CUSTOM_FIELD_PATH, opts);
        let (body, meta) = self.transport.do_request(Method::GET, &path).await?;
        Ok((serde_json::from_value(body)?, meta))
    }

    pub async fn get(&self, id: &str) -> Result<(CustomField, ResponseMeta)> {
        let path = format!("{}/{}", CUSTOM_FIELD_PATH, urlencoding::encode(id));
        let (body, meta) = self.transport.do_request(Method::GET, &path).await?;
        Ok((serde_json::from_value(body)?, meta))
    }

    /// Create a custom field. The id is assigned by the server and never sent.
    pub async fn create(&self, cf: &CustomField) -> Result<ResponseMeta> {
        let payload = payload_without(cf, &["id"])?;
        let (_, meta) = self
            .transport
            .do_request_json(Method::POST, CUSTOM_FIELD_PATH, &payload)
            .await?;
        Ok(meta)
    }

    /// Update a custom field. The id and type cannot change and are not sent.
    pub async fn edit(&self, cf: &CustomField) -> Result<ResponseMeta> {
        if cf.id().is_empty() {
            return Err(YextError::InvalidRequest(
                "cannot edit a custom field without an id".to_string(),
            ));
        }

        let payload = payload_without(cf, &["id", "type"])?;
        let path = format!("{}/{}", CUSTOM_FIELD_PATH, urlencoding::encode(cf.id()));
        let (_, meta) = self
            .transport
            .do_request_json(Method::PUT, &path, &payload)
            .await?;
        Ok(meta)
    }

    pub async fn delete(&self, id: &str) -> Result<ResponseMeta> {
        let path = format!("{}/{}", CUSTOM_FIELD_PATH, urlencoding::encode(id));
        let (_, meta) = self.transport.do_request(Method::DELETE, &path).await?;
        Ok(meta)
    }
}
