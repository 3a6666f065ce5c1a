use std::time::Duration;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{NetworkError, Result};

/// Status code plus the decoded body, when the body decoded at all.
/// Backends answer failures with the same JSON shape as successes, so a
/// non-2xx status is not an error at this layer.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

pub struct HttpClient {
    client: Client,
    config: Config,
}

impl HttpClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NetworkError::Config(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.expose());
        }
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        let url = self.config.url(path);
        debug!("GET {}", url);
        let request = self.authorize(self.client.get(&url).query(query));
        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest("GET request failed", e))?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let url = self.config.url(path);
        debug!("POST {}", url);
        let request = self.authorize(self.client.post(&url).json(body));
        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest("POST request failed", e))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<ApiResponse<T>> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest("Failed to read body", e))?;

        let body = match serde_json::from_str(&text) {
            Ok(body) => Some(body),
            Err(e) => {
                debug!("Response body ({}) did not decode: {}", status, e);
                None
            }
        };

        Ok(ApiResponse { status, body })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
