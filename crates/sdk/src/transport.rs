//! HTTP transport over reqwest

use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use async_trait::async_trait;
use iserver_core::port::{RequestOptions, RestTransport};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// `RestTransport` backed by a pooled reqwest client
///
/// Appends `token=<token>` to every request when a token is configured.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }

    fn prepare(&self, mut request: RequestBuilder, options: &RequestOptions) -> RequestBuilder {
        request = request.header(ACCEPT, "application/json");
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = http_error_body(response.text().await);
            return Err(SdkError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    /// GET returning the SDK error type
    pub async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        options: &RequestOptions,
    ) -> Result<Value> {
        debug!(url = %url, "GET");
        let request = self.prepare(self.client.get(url).query(query), options);
        self.send(request).await
    }

    /// POST returning the SDK error type
    pub async fn post(&self, url: &str, body: &Value, options: &RequestOptions) -> Result<Value> {
        debug!(url = %url, "POST");
        let request = self.prepare(self.client.post(url).json(body), options);
        self.send(request).await
    }
}

#[async_trait]
impl RestTransport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        options: &RequestOptions,
    ) -> iserver_core::Result<Value> {
        Ok(self.get(url, query, options).await?)
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        options: &RequestOptions,
    ) -> iserver_core::Result<Value> {
        Ok(self.post(url, body, options).await?)
    }
}

/// Body text for an HTTP error, keeping the read failure if there was one
fn http_error_body(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn transport(token: Option<&str>) -> ReqwestTransport {
        ReqwestTransport::new(&ClientConfig {
            token: token.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_token_is_appended() {
        let transport = transport(Some("s3cret"));
        let request = transport
            .prepare(
                transport
                    .client
                    .get("http://host/svc/jobs")
                    .query(&[("_t", "1")]),
                &RequestOptions::default(),
            )
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://host/svc/jobs?_t=1&token=s3cret");
        assert_eq!(request.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_unreadable_error_body_is_reported() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let body = http_error_body(Err(err));

        assert!(body.starts_with("<unreadable body: "));
        assert_eq!(http_error_body(Ok("denied".to_string())), "denied");
    }

    #[test]
    fn test_request_options_are_applied() {
        let transport = transport(None);
        let mut headers = BTreeMap::new();
        headers.insert("X-Request-Source".to_string(), "sdk".to_string());
        let options = RequestOptions {
            headers,
            timeout: Some(Duration::from_secs(3)),
        };

        let request = transport
            .prepare(transport.client.get("http://host/svc/jobs"), &options)
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://host/svc/jobs");
        assert_eq!(request.headers()["X-Request-Source"], "sdk");
        assert_eq!(request.timeout(), Some(&Duration::from_secs(3)));
    }

    #[test]
    fn test_unreachable_host_is_a_transport_error() {
        let transport = transport(None);
        let err = tokio_test::block_on(transport.get(
            "http://127.0.0.1:9/iserver/services",
            &[],
            &RequestOptions::default(),
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            SdkError::Connection(_) | SdkError::Transport(_)
        ));
    }
}
