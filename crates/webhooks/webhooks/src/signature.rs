//! HMAC signature generation and verification for payment notifications.
//!
//! The signed text is built from five fixed fields of the notification,
//! sorted by field name, with their values joined by `|`:
//!
//! ```text
//! amount | order | publicId | transaction.status.date | transaction.status.value
//! ```
//!
//! The digest is the lowercase hex HMAC-SHA256 of that text, keyed with the
//! merchant secret key.

use std::collections::BTreeMap;
use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use ecom_sdk_core::constants::VALUE_SEPARATOR;
use ecom_sdk_core::number_to_string;

use crate::event::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Names of the signed fields.
pub const SIGNED_FIELDS: [&str; 5] = [
    "amount",
    "publicId",
    "order",
    "transaction.status.value",
    "transaction.status.date",
];

/// The signed fields of a notification, sorted by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePayload {
    entries: BTreeMap<&'static str, String>,
}

impl SignaturePayload {
    /// Extracts the signed fields of `event` for merchant `public_id`.
    pub fn from_event(event: &WebhookEvent, public_id: &str) -> Self {
        let transaction = &event.transaction;
        let entries = BTreeMap::from([
            ("amount", canonical_value(&transaction.amount)),
            ("publicId", public_id.to_string()),
            ("order", canonical_value(&transaction.order_id)),
            (
                "transaction.status.value",
                canonical_value(&transaction.status.value),
            ),
            (
                "transaction.status.date",
                canonical_value(&transaction.status.date),
            ),
        ]);
        Self { entries }
    }

    /// Returns the coerced value of a signed field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs in signing order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Returns the text the HMAC is computed over.
    pub fn canonical_string(&self) -> String {
        self.entries
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR)
    }
}

/// Coerces a notification value to the text used in the signature.
///
/// `null` and `false` become empty, `true` becomes `1`, numbers use the API
/// rendering and strings are taken verbatim.
pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(number) => number_to_string(number),
        Value::String(text) => text.clone(),
        nested => nested.to_string(),
    }
}

/// Computes the expected signature of `event`.
pub fn sign_event(event: &WebhookEvent, public_id: &str, secret_key: &str) -> String {
    let payload = SignaturePayload::from_event(event, public_id);
    hmac_hex(secret_key.as_bytes(), payload.canonical_string().as_bytes())
}

/// Checks a notification signature.
///
/// Never fails: a malformed or absent field is hashed as empty text and the
/// comparison simply returns `false` on mismatch.
pub fn verify_event_signature(
    signature: &str,
    event: &WebhookEvent,
    public_id: &str,
    secret_key: &str,
) -> bool {
    let expected = sign_event(event, public_id, secret_key);
    let valid = constant_time_compare(&expected, signature);
    if !valid {
        tracing::debug!(
            public_id = %public_id,
            event = %event.event_name(),
            "Notification signature mismatch"
        );
    }
    valid
}

/// Signer bound to one merchant account.
pub struct EventSigner {
    secret: SecretString,
    public_id: String,
}

impl EventSigner {
    /// Creates a new signer with the given secret key and public id.
    pub fn new(secret_key: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret_key.into()),
            public_id: public_id.into(),
        }
    }

    /// Returns the public id the signer is bound to.
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// Generates the signature for the given notification.
    pub fn sign(&self, event: &WebhookEvent) -> String {
        sign_event(event, &self.public_id, self.secret.expose_secret())
    }

    /// Verifies a signature against the notification.
    pub fn verify(&self, signature: &str, event: &WebhookEvent) -> bool {
        verify_event_signature(signature, event, &self.public_id, self.secret.expose_secret())
    }
}

impl fmt::Debug for EventSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSigner")
            .field("secret", &"[REDACTED]")
            .field("public_id", &self.public_id)
            .finish()
    }
}

fn hmac_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
