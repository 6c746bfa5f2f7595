//! # Ecom SDK
//!
//! Client SDK for the Raiffeisen ecommerce payment API.
//!
//! The SDK signs nothing on the way out: API calls carry the merchant
//! secret as a bearer token. On the way in, payment notifications are
//! checked against an HMAC-SHA256 signature of five fixed fields.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ecom_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> EcomResult<()> {
//!     ecom_sdk::init_tracing();
//!
//!     let client = EcomClient::new("secret_key", "public_id")?;
//!
//!     // Send the buyer to the hosted form
//!     let url = client.pay_url(100, "order-42", &Params::new());
//!
//!     // Later, check how it went
//!     let transaction = client.get_order_transaction("order-42").await?;
//!     println!("{url} -> {:?}", transaction);
//!
//!     Ok(())
//! }
//! ```

pub use ecom_sdk_client as client;
pub use ecom_sdk_core as core;
pub use ecom_sdk_webhooks as webhooks;

pub use ecom_sdk_client::{ClientConfig, EcomClient};
pub use ecom_sdk_core::{EcomError, EcomResult, EcomSettings};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ecom_sdk_client::{
        ClientConfig, EcomClient, Transport, TransportError, TransportRequest, TransportResponse,
    };
    pub use ecom_sdk_core::{
        params, ApiResponse, EcomError, EcomResult, EcomSettings, Environment, ErrorKind, Method,
        Params, ReceiptType, RequestSpec,
    };
    pub use ecom_sdk_webhooks::{EventSigner, WebhookError, WebhookEvent, WebhookReceiver};
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when the variable is unset. Does nothing if a
/// global subscriber is already installed.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_builds_pay_url() {
        let settings = EcomSettings::new("sk", "pub");
        let client = EcomClient::from_settings(settings).unwrap();
        let url = client.pay_url(5, "o-1", &Params::new());
        assert_eq!(url, "https://e-commerce.raiffeisen.ru/pay/?publicId=pub&amount=5&orderId=o-1");
    }

    #[test]
    fn test_init_tracing_twice() {
        super::init_tracing();
        super::init_tracing();
    }
}
