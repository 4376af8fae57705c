//! Transport abstraction
//!
//! Resource services never talk to reqwest directly; they go through
//! [`Transport`], which performs one HTTP call and hands back the decoded
//! response body.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;

/// Transport-level details of a completed request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMeta {
    pub status: u16,
    /// Final request URL, with credentials removed
    pub url: String,
    /// Request id assigned by the server, if reported
    pub uuid: Option<String>,
}

/// Performs HTTP calls against the API, relative to the account base URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a request without a body and return the decoded response payload
    async fn do_request(&self, method: Method, path: &str) -> Result<(Value, ResponseMeta)>;

    /// Issue a request carrying `body` as JSON
    async fn do_request_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<(Value, ResponseMeta)>;
}
