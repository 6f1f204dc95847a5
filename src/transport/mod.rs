//! Transport trait and the reqwest-backed implementation.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::codec::GenerationRequest;
use crate::error::RecetteError;

/// Status and body of a service response, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a generation request to the service.
///
/// Any HTTP status counts as a response; only transport-level failures
/// (connect, DNS, timeout, broken body) are errors, reported as
/// [`RecetteError::Network`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, RecetteError>;
}
