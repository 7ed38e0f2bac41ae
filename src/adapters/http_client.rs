use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::config::NetBoxConfig;
use crate::domain::DomainError;
use crate::ports::HttpClient;

/// reqwest-backed HTTP client that authenticates against the NetBox API.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with the token and timeout from `config`.
    pub fn new(config: &NetBoxConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("netbox-reports/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(Self::default_headers(config)?)
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            url = %config.url,
            timeout_secs = config.timeout_secs,
            authenticated = !config.token.is_empty(),
            "HTTP client initialized"
        );

        Ok(Self { client })
    }

    fn default_headers(config: &NetBoxConfig) -> Result<HeaderMap, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !config.token.is_empty() {
            let mut value = HeaderValue::from_str(&format!("Token {}", config.token.expose()))
                .map_err(|e| DomainError::Config(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DomainError> {
        debug!(url = url, "GET");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(format!("Invalid response from {}: {}", url, e)))
    }
}
