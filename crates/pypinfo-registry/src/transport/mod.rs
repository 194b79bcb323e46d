//! Transport seam between the client and the wire.
//!
//! `Transport` is "send one method call, get one value back". The HTTP
//! implementation posts XML-RPC documents with reqwest; tests substitute
//! their own implementation to capture calls.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use tracing::debug;
use url::Url;

use pypinfo_core::error::PypiError;
use pypinfo_core::types::Value;

use crate::client::ClientConfig;
use crate::{xmlrpc, RegistryResult};

/// Something that can carry one remote procedure call
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `method` with positional `params` and return the decoded result
    async fn call(&self, method: &str, params: Vec<Value>) -> RegistryResult<Value>;
}

/// XML-RPC over HTTPS
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Underlying HTTP client
    client: Client,
    /// Endpoint every call is posted to
    endpoint: Url,
}

impl HttpTransport {
    /// Build the HTTP client for the configured endpoint
    pub fn new(config: &ClientConfig) -> RegistryResult<Self> {
        let endpoint = config.endpoint()?;

        let mut builder = ClientBuilder::new()
            .gzip(true)
            .user_agent(config.user_agent.as_str());

        // No timeout unless asked for; reqwest's default is none
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| PypiError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> RegistryResult<Value> {
        let body = xmlrpc::encode_call(method, &params);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| PypiError::network(format!("Failed to call {}: {}", method, e), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PypiError::Protocol {
                url: self.endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            PypiError::network(format!("Failed to read {} response: {}", method, e), e)
        })?;
        debug!("{} answered with {} bytes", method, text.len());

        xmlrpc::decode_response(&text)
    }
}
