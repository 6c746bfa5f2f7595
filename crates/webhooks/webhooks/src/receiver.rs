//! Webhook receiver for verifying incoming payment notifications.

use serde_json::Value;

use crate::error::{WebhookError, WebhookResult};
use crate::event::WebhookEvent;
use crate::signature::EventSigner;

/// Webhook receiver for verifying incoming notifications.
///
/// Wraps an [`EventSigner`] and turns a raw request body plus the signature
/// the API sent alongside it into a verified [`WebhookEvent`].
#[derive(Debug)]
pub struct WebhookReceiver {
    signer: EventSigner,
}

impl WebhookReceiver {
    /// Creates a new webhook receiver.
    pub fn new(secret_key: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            signer: EventSigner::new(secret_key, public_id),
        }
    }

    /// Creates a receiver around an existing signer.
    pub fn with_signer(signer: EventSigner) -> Self {
        Self { signer }
    }

    /// Parses the body and verifies its signature.
    pub fn verify(&self, signature: &str, payload: &[u8]) -> WebhookResult<WebhookEvent> {
        let event = WebhookEvent::from_slice(payload)?;
        self.check(signature, event)
    }

    /// Verifies an already decoded JSON body.
    pub fn verify_value(&self, signature: &str, payload: Value) -> WebhookResult<WebhookEvent> {
        let event = WebhookEvent::from_value(payload)?;
        self.check(signature, event)
    }

    /// Verifies a parsed notification.
    pub fn verify_event(&self, signature: &str, event: &WebhookEvent) -> bool {
        self.signer.verify(signature, event)
    }

    /// Returns the inner signer.
    pub fn signer(&self) -> &EventSigner {
        &self.signer
    }

    fn check(&self, signature: &str, event: WebhookEvent) -> WebhookResult<WebhookEvent> {
        if !self.signer.verify(signature, &event) {
            return Err(WebhookError::InvalidSignature);
        }
        tracing::debug!(
            event = %event.event_name(),
            order_id = ?event.transaction.order_id_str(),
            "Verified payment notification"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID: &str = "a682b6908e2cb28098ec1eef2eb1b54ac5b0ffd06a9f78d0934f2ee3e167fb1d";

    fn body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "event": "payment",
            "transaction": {
                "amount": 1,
                "orderId": "test_transaction_order_id",
                "status": {
                    "value": "test_transaction_status_value",
                    "date": "test_transaction_status_date"
                },
                "paymentMethod": "sbp"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_verify_valid_body() {
        let receiver = WebhookReceiver::new("test_secret_key", "test_public_id");
        let event = receiver.verify(VALID, &body()).unwrap();
        assert_eq!(event.transaction.order_id_str(), Some("test_transaction_order_id"));
    }

    #[test]
    fn test_verify_wrong_signature() {
        let receiver = WebhookReceiver::new("test_secret_key", "test_public_id");
        let err = receiver.verify("foo", &body()).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_invalid_payload() {
        let receiver = WebhookReceiver::new("test_secret_key", "test_public_id");
        let err = receiver.verify(VALID, b"<html>").unwrap_err();
        assert!(matches!(err, WebhookError::InvalidPayload(_)));
    }

    #[test]
    fn test_verify_value() {
        let receiver = WebhookReceiver::new("test_secret_key", "test_public_id");
        let value: Value = serde_json::from_slice(&body()).unwrap();
        assert!(receiver.verify_value(VALID, value).is_ok());
    }

    #[test]
    fn test_verify_non_string_event() {
        let receiver = WebhookReceiver::new("test_secret_key", "test_public_id");
        let mut value: Value = serde_json::from_slice(&body()).unwrap();
        value["event"] = json!({"kind": "payment"});

        let event = receiver.verify_value(VALID, value).unwrap();
        assert_eq!(event.event_name(), "payment");
    }
}
