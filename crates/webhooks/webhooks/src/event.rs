//! Payment notification model.
//!
//! The shape is fixed by the API but accepted as sent. Every field is
//! optional: a missing or `null` field is kept as JSON `null` so the signer
//! can canonicalize it exactly as the sending side does. A `transaction` or
//! `status` section that is not an object reads as empty. Unknown fields
//! are preserved in the `extra` maps and never take part in signing.

use chrono::{DateTime, FixedOffset};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use ecom_sdk_core::constants::{DATETIME_FORMAT, DEFAULT_EVENT};
use ecom_sdk_core::number_to_string;

use crate::error::WebhookResult;

/// Payment notification sent to the merchant callback URL.
///
/// # Example
///
/// ```rust
/// use ecom_sdk_webhooks::WebhookEvent;
///
/// let event = WebhookEvent::from_slice(br#"{
///     "event": "payment",
///     "transaction": {"amount": 10.5, "orderId": "o-1", "status": {"value": "SUCCESS"}}
/// }"#).unwrap();
///
/// assert_eq!(event.transaction.order_id_str(), Some("o-1"));
/// assert!(event.transaction.status.date.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event name as sent, `payment` when absent.
    #[serde(default = "default_event")]
    pub event: Value,

    /// Transaction the notification is about.
    #[serde(default, deserialize_with = "object_or_default")]
    pub transaction: Transaction,

    /// Fields not covered by this model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transaction part of a notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount as sent by the API (number or string).
    #[serde(default)]
    pub amount: Value,

    /// Merchant order identifier.
    #[serde(default, rename = "orderId")]
    pub order_id: Value,

    /// Transaction status.
    #[serde(default, deserialize_with = "object_or_default")]
    pub status: TransactionStatus,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Status code, e.g. `SUCCESS`.
    #[serde(default)]
    pub value: Value,

    /// Status change time in the API datetime format.
    #[serde(default)]
    pub date: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for WebhookEvent {
    fn default() -> Self {
        Self {
            event: default_event(),
            transaction: Transaction::default(),
            extra: Map::new(),
        }
    }
}

impl WebhookEvent {
    /// Creates a payment notification from its signed fields.
    pub fn payment(
        amount: impl Into<Value>,
        order_id: impl Into<Value>,
        status_value: impl Into<Value>,
        status_date: impl Into<Value>,
    ) -> Self {
        Self {
            event: default_event(),
            transaction: Transaction {
                amount: amount.into(),
                order_id: order_id.into(),
                status: TransactionStatus {
                    value: status_value.into(),
                    date: status_date.into(),
                    extra: Map::new(),
                },
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Parses a notification from a raw request body.
    pub fn from_slice(body: &[u8]) -> WebhookResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Converts an already decoded JSON document.
    pub fn from_value(value: Value) -> WebhookResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the event name, `payment` when it is absent or not a string.
    pub fn event_name(&self) -> &str {
        self.event.as_str().unwrap_or(DEFAULT_EVENT)
    }
}

impl Transaction {
    /// Returns the order id when it was sent as a string.
    pub fn order_id_str(&self) -> Option<&str> {
        self.order_id.as_str()
    }

    /// Returns the amount rendered as text, `None` when absent.
    pub fn amount_text(&self) -> Option<String> {
        match &self.amount {
            Value::Null => None,
            Value::Number(n) => Some(number_to_string(n)),
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TransactionStatus {
    /// Returns the status code when it was sent as a string.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Parses the status date.
    ///
    /// Accepts the API format (`2024-01-01T10:00:00+03:00`) and falls back
    /// to RFC 3339.
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.date.as_str()?;
        DateTime::parse_from_str(raw, DATETIME_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }
}

fn default_event() -> Value {
    Value::String(DEFAULT_EVENT.to_string())
}

fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        section @ Value::Object(_) => serde_json::from_value(section).map_err(D::Error::custom),
        _ => Ok(T::default()),
    }
}
