//! HTTP utilities for Yext REST API calls

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use crate::error::{Result, YextError};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Strip the `api_key` query parameter from a URL before it is logged
pub(crate) fn redact_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .filter(|(k, _)| k != "api_key")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            if pairs.is_empty() {
                parsed.set_query(None);
            } else {
                parsed.query_pairs_mut().clear().extend_pairs(pairs);
            }
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

/// Collect the messages from a Yext error envelope:
/// `{"meta": {"errors": [{"code": 2000, "message": "..."}]}}`
fn error_messages(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = value
        .get("meta")?
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| {
            let message = e.get("message")?.as_str()?;
            Some(match e.get("code").and_then(|c| c.as_i64()) {
                Some(code) => format!("{} (code {})", message, code),
                None => message.to_string(),
            })
        })
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// Raw outcome of a successful HTTP call
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

/// HTTP client wrapper for Yext API calls
#[derive(Clone)]
pub struct YextHttpClient {
    client: Client,
}

impl YextHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("yext-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a request with an optional JSON body
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse> {
        tracing::debug!("{} {}", method, redact_url(url));

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<HttpResponse> {
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            let message = error_messages(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
            return Err(YextError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(HttpResponse {
                status: status.as_u16(),
                body: Value::Null,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body: serde_json::from_str(&body)?,
        })
    }
}

/// Format a Yext API error for display
pub fn format_api_error(error: &YextError) -> String {
    match error.status() {
        Some(401) => return "Authentication failed. Check your Yext API key.".to_string(),
        Some(403) => return "Permission denied for this account.".to_string(),
        Some(404) => return "Resource not found.".to_string(),
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(500) | Some(503) => {
            return "Yext service temporarily unavailable. Please try again.".to_string()
        }
        _ => {}
    }

    if let YextError::Api { message, .. } = error {
        return message.clone();
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
