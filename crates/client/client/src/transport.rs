//! HTTP transport seam.
//!
//! The client owns one long-lived [`Transport`]. Every call hands it a
//! fresh, fully built [`TransportRequest`], so concurrent calls on the same
//! client never share request state.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use ecom_sdk_core::Method;

#[cfg(feature = "http-client")]
use ecom_sdk_core::TransportOptions;

/// A fully built HTTP request.
#[derive(Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs in the order they were attached.
    pub headers: Vec<(String, String)>,
    /// Serialized body, if any.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Returns the first header with the given name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

/// Raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body decoded as UTF-8 text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure of the HTTP exchange itself.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Transport diagnostic text.
    pub message: String,
    /// Last status code the transport saw, if any.
    pub status: Option<u16>,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Sends HTTP requests on behalf of the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw reply.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by a pooled `reqwest::Client`.
#[cfg(feature = "http-client")]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http-client")]
impl ReqwestTransport {
    /// Builds the underlying client from transport options.
    pub fn new(options: &TransportOptions) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(options.effective_user_agent());
        if let Some(timeout) = options.timeout_duration() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = options.connect_timeout_duration() {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http-client")]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            // reqwest derives Content-Length from the body
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string(), Some(status)))?;

        Ok(TransportResponse { status, body })
    }
}
