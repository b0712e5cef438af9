// REST Transport Port (Interface)

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-request options carried by a service handle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra HTTP headers
    pub headers: BTreeMap<String, String>,
    /// Overrides the transport's default request timeout
    pub timeout: Option<Duration>,
}

/// JSON-over-HTTP transport
///
/// Implementations own credentials and connection settings. Failures are
/// reported as `CoreError::Transport` (network) or `CoreError::Server`
/// (non-success status).
#[async_trait]
pub trait RestTransport: Send + Sync {
    /// GET `url` with the given query pairs and decode the JSON body
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        options: &RequestOptions,
    ) -> Result<Value>;

    /// POST a JSON body to `url` and decode the JSON response
    async fn post_json(&self, url: &str, body: &Value, options: &RequestOptions) -> Result<Value>;
}
