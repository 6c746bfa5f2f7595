//! Request building and response classification.
//!
//! [`prepare`] turns a [`RequestSpec`] into a transport request with the
//! headers every API call carries. [`classify`] maps the raw reply onto
//! [`ApiResponse`] or one of the three [`EcomError`] kinds.

use serde_json::Value;

use ecom_sdk_core::constants::{fields, headers};
use ecom_sdk_core::{ApiResponse, EcomError, EcomResult, RequestSpec};

use crate::config::ClientConfig;
use crate::transport::{TransportError, TransportRequest, TransportResponse};

/// Builds the transport request for `spec`.
///
/// A JSON body is attached only when the body is non-empty and the method
/// is not GET.
pub(crate) fn prepare(spec: &RequestSpec, config: &ClientConfig) -> EcomResult<TransportRequest> {
    let mut header_list = vec![
        ("Accept".to_string(), headers::ACCEPT_JSON.to_string()),
        (
            "Authorization".to_string(),
            format!("{}{}", headers::BEARER_PREFIX, config.secret_key()),
        ),
    ];

    let body = if spec.sends_body() {
        let bytes = serde_json::to_vec(&spec.body)?;
        header_list.push((
            "Content-Type".to_string(),
            headers::CONTENT_TYPE_JSON.to_string(),
        ));
        header_list.push(("Content-Length".to_string(), bytes.len().to_string()));
        Some(bytes)
    } else {
        None
    };

    Ok(TransportRequest {
        method: spec.method,
        url: format!("{}{}", config.host(), spec.path),
        headers: header_list,
        body,
    })
}

/// Classifies a transport outcome.
pub(crate) fn classify(
    spec: &RequestSpec,
    outcome: Result<TransportResponse, TransportError>,
) -> EcomResult<ApiResponse> {
    let response = outcome.map_err(|e| EcomError::transport(e.message, e.status))?;

    if spec.raw_response {
        return Ok(ApiResponse::Raw(response.body));
    }

    if response.body.is_empty() {
        return Ok(ApiResponse::Accepted);
    }

    let json: Value = serde_json::from_str(&response.body)
        .map_err(|e| EcomError::invalid_response(e.to_string(), Some(response.status)))?;
    if json.is_null() {
        return Err(EcomError::invalid_response(
            "response body is JSON null",
            Some(response.status),
        ));
    }

    if let Some(code) = present(&json, fields::ERROR_CODE) {
        let description = present(&json, fields::DESCRIPTION).map(text);
        return Err(EcomError::api(text(code), description, Some(response.status)));
    }

    Ok(ApiResponse::Json(json))
}

fn present<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    json.get(key).filter(|v| !v.is_null())
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
