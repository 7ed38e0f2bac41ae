use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::DomainError;

/// HTTP client port for all requests to the inventory API.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and deserialize the response as JSON.
    ///
    /// Non-2xx responses are returned as `DomainError::HttpStatus`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DomainError>;
}
