//! Request and response types shared by the SDK crates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{EcomError, EcomResult};
use crate::params::Params;

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of a single API call.
///
/// Built by the client operations and handed to the request builder.
///
/// # Example
///
/// ```rust
/// use ecom_sdk_core::{Method, RequestSpec};
/// use serde_json::json;
///
/// let spec = RequestSpec::post("/api/settings/v1/callback")
///     .param("callbackUrl", json!("https://shop.example/notify"));
/// assert_eq!(spec.method, Method::Post);
/// assert!(!spec.raw_response);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    /// Path appended to the client host, including any query string.
    pub path: String,
    /// HTTP method, GET unless set.
    pub method: Method,
    /// JSON body, only sent for non-GET calls when non-empty.
    pub body: Params,
    /// Return the body unparsed.
    pub raw_response: bool,
}

impl RequestSpec {
    /// Creates a GET request for `path` with an empty body.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::Post)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::Delete)
    }

    /// Sets the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replaces the body.
    pub fn body(mut self, body: Params) -> Self {
        self.body = body;
        self
    }

    /// Adds a body parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Requests the body to be returned unparsed.
    pub fn raw(mut self) -> Self {
        self.raw_response = true;
        self
    }

    /// Whether a JSON body is attached when this request is sent.
    pub fn sends_body(&self) -> bool {
        !self.body.is_empty() && self.method != Method::Get
    }
}

/// Successful outcome of an API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Decoded JSON reply.
    Json(Value),
    /// The API accepted the call and sent no body.
    Accepted,
    /// Unparsed reply of a raw call.
    Raw(String),
}

impl ApiResponse {
    /// Returns the decoded JSON, if this is a JSON reply.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw body, if this is a raw reply.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ApiResponse::Raw(body) => Some(body),
            _ => None,
        }
    }

    /// Whether the API accepted the call without a body.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ApiResponse::Accepted)
    }

    /// Converts into a JSON value: `Accepted` becomes `true`, a raw body
    /// becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            ApiResponse::Json(value) => value,
            ApiResponse::Accepted => Value::Bool(true),
            ApiResponse::Raw(body) => Value::String(body),
        }
    }

    /// Deserializes the reply into a typed model.
    pub fn json<T: DeserializeOwned>(self) -> EcomResult<T> {
        serde_json::from_value(self.into_value()).map_err(EcomError::from)
    }
}

/// Fiscal receipt type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptType {
    /// Receipt for an income (sale).
    Sell,
    /// Receipt for a refund.
    Refund,
}

impl ReceiptType {
    /// Returns the API name of the receipt type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptType::Sell => "sell",
            ReceiptType::Refund => "refund",
        }
    }
}

impl AsRef<str> for ReceiptType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
