//! # Ecom SDK Client
//!
//! Async client for the ecommerce payment API.
//!
//! Every operation builds a [`RequestSpec`](ecom_sdk_core::RequestSpec),
//! sends it through the client's [`Transport`] and classifies the reply
//! into an [`ApiResponse`](ecom_sdk_core::ApiResponse) or an
//! [`EcomError`](ecom_sdk_core::EcomError).
//!
//! ## Features
//!
//! - `http-client` (default): [`ReqwestTransport`] and the constructors
//!   that build one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ecom_sdk_client::EcomClient;
//!
//! let client = EcomClient::new(secret_key, public_id)?;
//! client.post_callback_url("https://shop.example/notify").await?;
//! let refund = client.post_order_refund("order-42", "refund-1", 150).await?;
//! ```

mod client;
mod config;
pub mod pay;
mod request;
mod transport;

pub use client::EcomClient;
pub use config::ClientConfig;
pub use pay::{build_pay_url, pay_params};
pub use transport::{Transport, TransportError, TransportRequest, TransportResponse};

#[cfg(feature = "http-client")]
pub use transport::ReqwestTransport;
