//! API client and its operations.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use ecom_sdk_core::constants::fields;
use ecom_sdk_core::{build_query, params, ApiResponse, EcomResult, RequestSpec};
use ecom_sdk_webhooks::{verify_event_signature, EventSigner, WebhookEvent, WebhookReceiver};

use crate::config::ClientConfig;
use crate::request;
use crate::transport::Transport;

#[cfg(feature = "http-client")]
use crate::transport::ReqwestTransport;
#[cfg(feature = "http-client")]
use ecom_sdk_core::{EcomError, EcomSettings};

/// Client for the ecommerce payment API.
///
/// # Example
///
/// ```rust,ignore
/// use ecom_sdk_client::EcomClient;
///
/// let client = EcomClient::new("secret_key", "public_id")?;
/// let order = client.get_order("order-42").await?;
/// let url = client.pay_url(100, "order-43", &Default::default());
/// ```
pub struct EcomClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl EcomClient {
    /// Creates a client for the production host.
    #[cfg(feature = "http-client")]
    pub fn new(secret_key: impl Into<String>, public_id: impl Into<String>) -> EcomResult<Self> {
        Self::from_config(ClientConfig::new(secret_key, public_id))
    }

    /// Creates a client with a reqwest transport built from the config.
    #[cfg(feature = "http-client")]
    pub fn from_config(config: ClientConfig) -> EcomResult<Self> {
        let transport = ReqwestTransport::new(config.transport_options())
            .map_err(|e| EcomError::transport(e.message, e.status))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client from loaded settings.
    #[cfg(feature = "http-client")]
    pub fn from_settings(settings: EcomSettings) -> EcomResult<Self> {
        Self::from_config(ClientConfig::from_settings(settings))
    }

    /// Creates a client on top of an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the merchant public id.
    pub fn public_id(&self) -> &str {
        self.config.public_id()
    }

    /// Returns the API host.
    pub fn host(&self) -> &str {
        self.config.host()
    }

    /// Returns the shared transport handle.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Whether a non-empty secret key is set.
    pub fn has_secret_key(&self) -> bool {
        self.config.has_secret_key()
    }

    /// Replaces the secret key.
    pub fn set_secret_key(&mut self, secret_key: impl Into<String>) {
        self.config.set_secret_key(secret_key);
    }

    /// Replaces the public id.
    pub fn set_public_id(&mut self, public_id: impl Into<String>) {
        self.config.set_public_id(public_id);
    }

    /// Replaces the API host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.set_host(host);
    }

    /// Sends one API call and classifies the reply.
    pub async fn execute(&self, spec: RequestSpec) -> EcomResult<ApiResponse> {
        let request = request::prepare(&spec, &self.config)?;
        tracing::debug!(method = %request.method, url = %request.url, "Sending API request");

        let outcome = self.transport.send(request).await;
        if let Err(e) = &outcome {
            tracing::warn!(
                method = %spec.method,
                path = %spec.path,
                status = ?e.status,
                error = %e.message,
                "API request failed in transport"
            );
        }

        let result = request::classify(&spec, outcome);
        if let Err(e) = &result {
            tracing::debug!(path = %spec.path, kind = ?e.kind(), error = %e, "API call returned an error");
        }
        result
    }

    // ==================== Notifications ====================

    /// Checks a payment notification signature against this merchant.
    pub fn check_event_signature(&self, signature: &str, event: &WebhookEvent) -> bool {
        verify_event_signature(
            signature,
            event,
            self.config.public_id(),
            self.config.secret_key(),
        )
    }

    /// Returns a signer bound to the current credentials.
    pub fn event_signer(&self) -> EventSigner {
        EventSigner::new(self.config.secret_key(), self.config.public_id())
    }

    /// Returns a receiver bound to the current credentials.
    pub fn webhook_receiver(&self) -> WebhookReceiver {
        WebhookReceiver::with_signer(self.event_signer())
    }

    // ==================== Settings ====================

    /// Sets the URL payment notifications are sent to.
    pub async fn post_callback_url(&self, callback_url: &str) -> EcomResult<ApiResponse> {
        let path = format!("{}/callback", self.config.paths().settings);
        let spec = RequestSpec::post(path).param(fields::CALLBACK_URL, callback_url);
        self.execute(spec).await
    }

    // ==================== Payments ====================

    /// Gets the transaction status of an order.
    pub async fn get_order_transaction(&self, order_id: &str) -> EcomResult<ApiResponse> {
        let path = format!(
            "{}/orders/{}/transaction",
            self.config.paths().payments,
            segment(order_id)
        );
        self.execute(RequestSpec::get(path)).await
    }

    /// Refunds `amount` of an order under the caller chosen refund id.
    pub async fn post_order_refund(
        &self,
        order_id: &str,
        refund_id: &str,
        amount: impl Into<Value>,
    ) -> EcomResult<ApiResponse> {
        let spec = RequestSpec::post(self.refund_path(order_id, refund_id))
            .param(fields::AMOUNT, amount);
        self.execute(spec).await
    }

    /// Gets the status of a refund.
    pub async fn get_order_refund(&self, order_id: &str, refund_id: &str) -> EcomResult<ApiResponse> {
        self.execute(RequestSpec::get(self.refund_path(order_id, refund_id)))
            .await
    }

    // ==================== Orders ====================

    /// Gets an order.
    pub async fn get_order(&self, order_id: &str) -> EcomResult<ApiResponse> {
        self.execute(RequestSpec::get(self.order_path(order_id)))
            .await
    }

    /// Deletes an unpaid order.
    pub async fn delete_order(&self, order_id: &str) -> EcomResult<ApiResponse> {
        self.execute(RequestSpec::delete(self.order_path(order_id)))
            .await
    }

    // ==================== Fiscal ====================

    /// Lists the fiscal receipts of an order, optionally by receipt type.
    ///
    /// The `receiptType` query is sent only for a non-empty type.
    pub async fn get_order_receipts(
        &self,
        order_id: &str,
        receipt_type: Option<&str>,
    ) -> EcomResult<ApiResponse> {
        let mut path = format!(
            "{}/orders/{}/receipts",
            self.config.paths().fiscal,
            segment(order_id)
        );
        if let Some(kind) = receipt_type.filter(|k| !k.is_empty()) {
            path.push('?');
            path.push_str(&build_query(&params([(fields::RECEIPT_TYPE, kind)])));
        }
        self.execute(RequestSpec::get(path)).await
    }

    /// Gets the fiscal receipt of a refund.
    pub async fn get_order_refund_receipt(
        &self,
        order_id: &str,
        refund_id: &str,
    ) -> EcomResult<ApiResponse> {
        let path = format!(
            "{}/orders/{}/refunds/{}/receipt",
            self.config.paths().fiscal,
            segment(order_id),
            segment(refund_id)
        );
        self.execute(RequestSpec::get(path)).await
    }

    fn order_path(&self, order_id: &str) -> String {
        format!("{}/orders/{}", self.config.paths().payment, segment(order_id))
    }

    fn refund_path(&self, order_id: &str, refund_id: &str) -> String {
        format!(
            "{}/orders/{}/refunds/{}",
            self.config.paths().payments,
            segment(order_id),
            segment(refund_id)
        )
    }
}

impl std::fmt::Debug for EcomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcomClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Percent-encodes one path segment.
fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
