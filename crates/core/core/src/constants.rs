//! Fixed values of the ecommerce payment API.
//!
//! Hosts, base paths, header values and signing parameters live here so
//! that no other module hard-codes them.

/// Client fingerprint name sent in the `User-Agent` header.
pub const CLIENT_NAME: &str = "rust_sdk";

/// Client fingerprint version sent in the `User-Agent` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between values of the canonical signature string.
pub const VALUE_SEPARATOR: &str = "|";

/// Name of the HMAC digest used for notification signatures.
pub const SIGNATURE_ALGORITHM: &str = "sha256";

/// Datetime format used by the API (`2024-01-01T10:00:00+03:00`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Production API host.
pub const HOST_PROD: &str = "https://e-commerce.raiffeisen.ru";

/// Test API host.
pub const HOST_TEST: &str = "https://test.ecom.raiffeisen.ru";

/// Default path of the hosted payment form.
pub const PAYMENT_FORM_URI: &str = "/pay";

/// Default base path of the payment API.
pub const PAYMENT_API_URI: &str = "/api/payment/v1";

/// Default base path of the payments API.
pub const PAYMENTS_API_URI: &str = "/api/payments/v1";

/// Default base path of the fiscal API.
pub const FISCAL_API_URI: &str = "/api/fiscal/v1";

/// Default base path of the settings API.
pub const SETTINGS_API_URI: &str = "/api/settings/v1";

/// Default event name of payment notifications.
pub const DEFAULT_EVENT: &str = "payment";

/// HTTP header values attached by the request builder.
pub mod headers {
    /// `Accept` value of every request.
    pub const ACCEPT_JSON: &str = "application/json";

    /// `Content-Type` value of requests carrying a JSON body.
    pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

    /// Scheme prefix of the `Authorization` header.
    pub const BEARER_PREFIX: &str = "Bearer ";
}

/// Field names used in request bodies, queries and responses.
pub mod fields {
    pub const PUBLIC_ID: &str = "publicId";
    pub const AMOUNT: &str = "amount";
    pub const ORDER_ID: &str = "orderId";
    pub const CALLBACK_URL: &str = "callbackUrl";
    pub const RECEIPT_TYPE: &str = "receiptType";
    pub const ERROR_CODE: &str = "errorCode";
    pub const DESCRIPTION: &str = "description";
}

/// Returns the default `User-Agent` of the client, e.g. `rust_sdk-0.1.0`.
pub fn user_agent() -> String {
    format!("{}-{}", CLIENT_NAME, CLIENT_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_fingerprint() {
        let agent = user_agent();
        assert!(agent.starts_with("rust_sdk-"));
        assert!(agent.ends_with(CLIENT_VERSION));
    }
}
