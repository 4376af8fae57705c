//! Error types for Yext API operations.

use serde_json::Value;
use thiserror::Error;

use crate::entity::EntityType;

/// Result type for Yext client operations.
pub type Result<T> = std::result::Result<T, YextError>;

/// Errors that can occur while talking to the Yext API or materializing its data.
#[derive(Debug, Error)]
pub enum YextError {
    /// A list or get response element was not a JSON object
    #[error("malformed entity, expected an object: {0}")]
    MalformedEntity(Value),

    #[error("unable to find meta attribute in {0}")]
    MissingMetadata(Value),

    #[error("unable to find entityType attribute in {0}")]
    MissingTypeTag(Value),

    #[error("unknown entity type: {0}")]
    UnknownTypeKind(EntityType),

    /// The record's fields could not be transferred into the resolved concrete type
    #[error("decoding entity of type {entity_type}: {source}")]
    Reencoding {
        entity_type: EntityType,
        /// The raw record that failed to decode
        record: Value,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be built from the caller's input
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl YextError {
    /// HTTP status of an API error, if this error came back from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            YextError::Api { status, .. } => Some(*status),
            YextError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error was raised while turning a raw record into an entity.
    pub fn is_materialization(&self) -> bool {
        matches!(
            self,
            YextError::MalformedEntity(_)
                | YextError::MissingMetadata(_)
                | YextError::MissingTypeTag(_)
                | YextError::UnknownTypeKind(_)
                | YextError::Reencoding { .. }
        )
    }
}
