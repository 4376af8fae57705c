//! Resource services
//!
//! Thin per-resource verbs on top of a [`Transport`]. List responses are fed
//! through the entity materializer and the pagination drivers.
//!
//! # Architecture
//!
//! - [`options`] - List options and query string helpers
//! - [`pagination`] - Offset/limit and page-token pagination drivers
//! - [`entities`] - The `entities` resource, with typed entity materialization
//! - [`custom_fields`] - The `customfields` resource
//!
//! # Example
//!
//! ```ignore
//! use yext::api::ClientConfig;
//! use yext::resource::Yext;
//!
//! async fn list_everything() -> yext::Result<()> {
//!     let yext = Yext::from_config(&ClientConfig::new("api-key", "me"))?;
//!     let entities = yext.entities.list_all(None).await?;
//!     let fields = yext.custom_fields.list_all().await?;
//!     println!("{} entities, {} custom fields", entities.len(), fields.len());
//!     Ok(())
//! }
//! ```

pub mod custom_fields;
pub mod entities;
pub mod options;
pub mod pagination;

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ClientConfig, Transport, YextClient};
use crate::error::Result;

pub use custom_fields::{CustomField, CustomFieldOption, CustomFieldResponse, CustomFieldService};
pub use entities::{EntityListResponse, EntityService};
pub use options::{EntityListOptions, ListOptions};
pub use pagination::{list_helper, token_list_helper, OffsetPage, TokenPage};

/// All resource services, sharing one transport
pub struct Yext {
    pub entities: EntityService,
    pub custom_fields: CustomFieldService,
}

impl Yext {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            entities: EntityService::new(transport.clone()),
            custom_fields: CustomFieldService::new(transport),
        }
    }

    /// Build the services on top of a [`YextClient`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = YextClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Decode an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Serialize `value` and drop the named top-level fields
pub(crate) fn payload_without<T: serde::Serialize + ?Sized>(
    value: &T,
    fields: &[&str],
) -> Result<Value> {
    let mut payload = serde_json::to_value(value)?;
    strip_fields(&mut payload, fields);
    Ok(payload)
}

/// Remove the named fields from a JSON object; other values are left alone
pub(crate) fn strip_fields(payload: &mut Value, fields: &[&str]) {
    if let Value::Object(map) = payload {
        for field in fields {
            map.remove(*field);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for service tests

    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::api::{ResponseMeta, Transport};
    use crate::error::Result;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Replays queued responses in order and records every request
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, response: Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(response));
            self
        }

        pub fn fail(self, error: crate::error::YextError) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn next(&self, method: Method, path: &str, body: Option<&Value>) -> Result<(Value, ResponseMeta)> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))?;
            Ok((
                response,
                ResponseMeta {
                    status: 200,
                    url: path.to_string(),
                    uuid: None,
                },
            ))
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn do_request(&self, method: Method, path: &str) -> Result<(Value, ResponseMeta)> {
            self.next(method, path, None)
        }

        async fn do_request_json(
            &self,
            method: Method,
            path: &str,
            body: &Value,
        ) -> Result<(Value, ResponseMeta)> {
            self.next(method, path, Some(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_without_strips_top_level_only() {
        let value = json!({"id": "1", "type": "TEXT", "meta": {"id": "1"}, "name": "n"});
        let payload = payload_without(&value, &["id", "type"]).unwrap();
        assert_eq!(payload, json!({"meta": {"id": "1"}, "name": "n"}));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "null_as_default")]
        token: String,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let page: Page = serde_json::from_value(json!({"token": null, "items": null})).unwrap();
        assert_eq!(page.token, "");
        assert!(page.items.is_empty());

        let page: Page = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page.token, "");

        let page: Page = serde_json::from_value(json!({"token": "t", "items": [1]})).unwrap();
        assert_eq!(page.token, "t");
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_strip_fields_ignores_non_objects() {
        let mut value = json!(["id"]);
        strip_fields(&mut value, &["id"]);
        assert_eq!(value, json!(["id"]));
    }
}
