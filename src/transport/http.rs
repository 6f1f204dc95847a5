//! Chat-completions transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::codec::GenerationRequest;
use crate::config::RecipeConfig;
use crate::error::RecetteError;

use super::{RawResponse, Transport};

/// POSTs requests to `<base_url>/chat/completions`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RecetteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(|e| RecetteError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &RecipeConfig) -> Result<Self, RecetteError> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Build default headers for a Bearer-token API.
///
/// A key that is not valid header text is an error, never a missing header.
pub fn bearer_headers(api_key: &str) -> Result<HeaderMap, RecetteError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut val = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
        RecetteError::MissingCredential("API key is not valid HTTP header text".into())
    })?;
    val.set_sensitive(true);
    headers.insert(AUTHORIZATION, val);
    Ok(headers)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, RecetteError> {
        let url = self.endpoint();
        let headers = bearer_headers(request.credential().expose())?;
        debug!(model = request.model(), %url, "sending generation request");

        let resp = self
            .client
            .post(&url)
            .headers(headers)
            .json(&request.to_body())
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        debug!(status, bytes = body.len(), "generation response received");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let transport = HttpTransport::new("http://localhost:1234/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn bearer_headers_carry_key_and_json_content_type() {
        let headers = bearer_headers("sk-test").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn bearer_headers_refuse_control_characters() {
        let err = bearer_headers("sk-a\nb").unwrap_err();
        assert!(matches!(err, RecetteError::MissingCredential(_)));
    }
}
