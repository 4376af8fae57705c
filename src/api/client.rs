//! Yext Client
//!
//! Main client for interacting with the Yext API, combining credentials,
//! URL construction and HTTP functionality into a [`Transport`].

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::http::{redact_url, HttpResponse, YextHttpClient};
use super::transport::{ResponseMeta, Transport};
use crate::error::{Result, YextError};

pub const DEFAULT_BASE_URL: &str = "https://api.yext.com/v2";
pub const DEFAULT_VERSION: &str = "20180226";

/// Connection settings for a single Yext account
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub account_id: String,
    /// API root, without the `accounts/{id}` suffix
    pub base_url: String,
    /// Version date sent as the `v` query parameter
    pub version: String,
}

impl ClientConfig {
    pub fn new(api_key: &str, account_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            account_id: account_id.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Build the account-scoped base URL, always ending in `/`
    pub fn account_url(&self) -> Result<Url> {
        if self.api_key.is_empty() {
            return Err(YextError::Config("api key is empty".to_string()));
        }
        let account = if self.account_id.is_empty() {
            "me"
        } else {
            self.account_id.as_str()
        };
        let root = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!(
            "{}/accounts/{}/",
            root,
            urlencoding::encode(account)
        ))?)
    }
}

/// Main Yext client
#[derive(Clone)]
pub struct YextClient {
    pub http: YextHttpClient,
    account_url: Url,
    api_key: String,
    version: String,
}

impl YextClient {
    /// Create a new Yext client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let account_url = config.account_url()?;
        let http = YextHttpClient::new()?;

        Ok(Self {
            http,
            account_url,
            api_key: config.api_key.clone(),
            version: config.version.clone(),
        })
    }

    pub fn account_url(&self) -> &Url {
        &self.account_url
    }

    /// Resolve a resource path (which may carry its own query) against the
    /// account URL and append the credentials and version parameters
    pub fn resource_url(&self, path: &str) -> Result<Url> {
        let mut url = self.account_url.join(path.trim_start_matches('/'))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("v", &self.version);
        Ok(url)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(Value, ResponseMeta)> {
        let url = self.resource_url(path)?;
        let response = self.http.execute(method, url.as_str(), body).await?;
        Ok(unwrap_envelope(response, redact_url(url.as_str())))
    }
}

/// Split a `{"meta": {...}, "response": {...}}` envelope into payload and metadata
fn unwrap_envelope(response: HttpResponse, url: String) -> (Value, ResponseMeta) {
    let HttpResponse { status, body } = response;

    let uuid = body
        .get("meta")
        .and_then(|m| m.get("uuid"))
        .and_then(|u| u.as_str())
        .map(|s| s.to_string());

    let payload = match body {
        Value::Object(mut map) if map.contains_key("response") => {
            map.remove("response").unwrap_or(Value::Null)
        }
        other => other,
    };

    (payload, ResponseMeta { status, url, uuid })
}

#[async_trait]
impl Transport for YextClient {
    async fn do_request(&self, method: Method, path: &str) -> Result<(Value, ResponseMeta)> {
        self.call(method, path, None).await
    }

    async fn do_request_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<(Value, ResponseMeta)> {
        self.call(method, path, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> YextClient {
        YextClient::new(&ClientConfig::new("secret", "12345")).unwrap()
    }

    #[test]
    fn test_resource_url_adds_credentials_and_version() {
        let url = client().resource_url("entities").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.yext.com/v2/accounts/12345/entities?api_key=secret&v=20180226"
        );
    }

    #[test]
    fn test_resource_url_keeps_existing_query() {
        let url = client()
            .resource_url("entities?entityType=location")
            .unwrap();
        assert_eq!(
            url.query(),
            Some("entityType=location&api_key=secret&v=20180226")
        );
        assert_eq!(url.path(), "/v2/accounts/12345/entities");
    }

    #[test]
    fn test_default_account_is_me() {
        let config = ClientConfig::new("secret", "").with_base_url("http://localhost:9000/");
        assert_eq!(
            config.account_url().unwrap().as_str(),
            "http://localhost:9000/accounts/me/"
        );
    }

    #[test]
    fn test_empty_api_key_is_config_error() {
        let err = YextClient::new(&ClientConfig::new("", "me")).err().unwrap();
        assert!(matches!(err, YextError::Config(_)));
    }

    #[test]
    fn test_unwrap_envelope() {
        let response = HttpResponse {
            status: 200,
            body: json!({"meta": {"uuid": "u-1", "errors": []}, "response": {"count": 0}}),
        };
        let (payload, meta) = unwrap_envelope(response, "http://x/entities".into());
        assert_eq!(payload, json!({"count": 0}));
        assert_eq!(meta.uuid.as_deref(), Some("u-1"));
        assert_eq!(meta.status, 200);
    }

    #[test]
    fn test_unwrap_envelope_passes_bare_bodies_through() {
        let response = HttpResponse {
            status: 204,
            body: Value::Null,
        };
        let (payload, meta) = unwrap_envelope(response, "http://x".into());
        assert_eq!(payload, Value::Null);
        assert_eq!(meta.uuid, None);
    }
}
