//! # Ecom SDK Webhooks
//!
//! Payment notification handling for the ecommerce SDK:
//! - Notification model tolerant to missing and unknown fields
//! - Canonical signature payload over five fixed fields
//! - HMAC-SHA256 signature generation and constant-time verification
//! - Receiver that parses and verifies raw notification bodies
//!
//! ## Example
//!
//! ```rust,ignore
//! use ecom_sdk_webhooks::WebhookReceiver;
//!
//! let receiver = WebhookReceiver::new(secret_key, public_id);
//! let event = receiver.verify(&signature_header, &request_body)?;
//! println!("order {} is {:?}", event.transaction.order_id, event.transaction.status.value);
//! ```

mod error;
mod event;
mod receiver;
mod signature;

pub use error::{WebhookError, WebhookResult};
pub use event::{Transaction, TransactionStatus, WebhookEvent};
pub use receiver::WebhookReceiver;
pub use signature::{
    canonical_value, sign_event, verify_event_signature, EventSigner, SignaturePayload,
    SIGNED_FIELDS,
};
