//! Yext API interaction module
//!
//! This module provides the transport used by the resource services:
//! credential handling, URL construction and the HTTP client.
//!
//! # Module Structure
//!
//! - [`transport`] - The [`Transport`] trait resource services call through
//! - [`client`] - Account-scoped client implementing [`Transport`]
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use yext::api::{ClientConfig, Transport, YextClient};
//! use reqwest::Method;
//!
//! async fn example() -> yext::Result<()> {
//!     let client = YextClient::new(&ClientConfig::new("api-key", "me"))?;
//!     let (body, _meta) = client.do_request(Method::GET, "entities").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod transport;

pub use client::{ClientConfig, YextClient, DEFAULT_BASE_URL, DEFAULT_VERSION};
pub use http::{format_api_error, YextHttpClient};
pub use transport::{ResponseMeta, Transport};
