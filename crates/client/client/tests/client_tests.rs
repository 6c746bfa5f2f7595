//! Integration tests for the ecommerce API client
//!
//! Tests cover:
//! - Request shape of every API operation
//! - Response classification through the client
//! - Pay URL and pay form builders
//! - Notification signature checks through the client

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecom_sdk_client::*;
use ecom_sdk_core::{params, ApiPaths, ErrorKind, Method, Params, ReceiptType};
use ecom_sdk_webhooks::WebhookEvent;
use serde_json::{json, Value};

/// Transport that records every request and answers with a canned reply.
struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    reply: Result<TransportResponse, TransportError>,
}

impl MockTransport {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(TransportResponse::new(status, body)),
        })
    }

    fn failing(message: &str, status: Option<u16>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(TransportError::new(message, status)),
        })
    }

    fn last(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}

const HOST: &str = "https://e-commerce.raiffeisen.ru";

fn client_with(transport: Arc<MockTransport>) -> EcomClient {
    let config = ClientConfig::new("test_secret_key", "test_public_id");
    EcomClient::with_transport(config, transport)
}

fn body_of(request: &TransportRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request has no body")).unwrap()
}

mod operation_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_callback_url() {
        let transport = MockTransport::replying(200, "");
        let client = client_with(transport.clone());

        let response = client
            .post_callback_url("https://shop.example/notify")
            .await
            .unwrap();
        assert!(response.is_accepted());

        let request = transport.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{}/api/settings/v1/callback", HOST));
        assert_eq!(body_of(&request), json!({"callbackUrl": "https://shop.example/notify"}));
        assert_eq!(request.header("Authorization"), Some("Bearer test_secret_key"));
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_order_transaction() {
        let transport = MockTransport::replying(200, r#"{"code":"SUCCESS"}"#);
        let client = client_with(transport.clone());

        let response = client.get_order_transaction("order-1").await.unwrap();
        assert_eq!(response.as_json(), Some(&json!({"code": "SUCCESS"})));

        let request = transport.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            format!("{}/api/payments/v1/orders/order-1/transaction", HOST)
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_post_order_refund() {
        let transport = MockTransport::replying(200, r#"{"refundStatus":"IN_PROGRESS"}"#);
        let client = client_with(transport.clone());

        client.post_order_refund("order-1", "refund-1", 10.5).await.unwrap();

        let request = transport.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            format!("{}/api/payments/v1/orders/order-1/refunds/refund-1", HOST)
        );
        assert_eq!(body_of(&request), json!({"amount": 10.5}));
        assert_eq!(request.header("Content-Type"), Some("application/json;charset=UTF-8"));
    }

    #[tokio::test]
    async fn test_get_order_refund() {
        let transport = MockTransport::replying(200, "{}");
        let client = client_with(transport.clone());

        client.get_order_refund("order-1", "refund-1").await.unwrap();

        let request = transport.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            format!("{}/api/payments/v1/orders/order-1/refunds/refund-1", HOST)
        );
    }

    #[tokio::test]
    async fn test_get_and_delete_order() {
        let transport = MockTransport::replying(200, "{}");
        let client = client_with(transport.clone());

        client.get_order("order-1").await.unwrap();
        let request = transport.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, format!("{}/api/payment/v1/orders/order-1", HOST));

        client.delete_order("order-1").await.unwrap();
        let request = transport.last();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, format!("{}/api/payment/v1/orders/order-1", HOST));
        assert!(request.body.is_none());

        assert_eq!(transport.count(), 2);
    }

    #[tokio::test]
    async fn test_get_order_receipts() {
        let transport = MockTransport::replying(200, "[]");
        let client = client_with(transport.clone());

        client.get_order_receipts("order-1", None).await.unwrap();
        assert_eq!(
            transport.last().url,
            format!("{}/api/fiscal/v1/orders/order-1/receipts", HOST)
        );

        client.get_order_receipts("order-1", Some("")).await.unwrap();
        assert_eq!(
            transport.last().url,
            format!("{}/api/fiscal/v1/orders/order-1/receipts", HOST)
        );

        client
            .get_order_receipts("order-1", Some(ReceiptType::Refund.as_str()))
            .await
            .unwrap();
        assert_eq!(
            transport.last().url,
            format!("{}/api/fiscal/v1/orders/order-1/receipts?receiptType=refund", HOST)
        );
    }

    #[tokio::test]
    async fn test_get_order_refund_receipt() {
        let transport = MockTransport::replying(200, "{}");
        let client = client_with(transport.clone());

        client.get_order_refund_receipt("order-1", "refund-1").await.unwrap();
        assert_eq!(
            transport.last().url,
            format!("{}/api/fiscal/v1/orders/order-1/refunds/refund-1/receipt", HOST)
        );
    }

    #[tokio::test]
    async fn test_path_segments_are_encoded() {
        let transport = MockTransport::replying(200, "{}");
        let client = client_with(transport.clone());

        client.get_order("a/b c").await.unwrap();
        assert_eq!(
            transport.last().url,
            format!("{}/api/payment/v1/orders/a%2Fb%20c", HOST)
        );
    }

    #[tokio::test]
    async fn test_custom_host_and_paths() {
        let transport = MockTransport::replying(200, "{}");
        let paths = ApiPaths {
            payment: "/v2/payment".into(),
            ..ApiPaths::default()
        };
        let config = ClientConfig::new("sk", "pub")
            .with_host("http://localhost:8080")
            .with_paths(paths);
        let client = EcomClient::with_transport(config, transport.clone());

        client.get_order("o").await.unwrap();
        assert_eq!(transport.last().url, "http://localhost:8080/v2/payment/orders/o");
    }

    #[tokio::test]
    async fn test_credentials_can_be_replaced() {
        let transport = MockTransport::replying(200, "{}");
        let mut client = client_with(transport.clone());

        client.set_secret_key("rotated_key");
        client.set_host("https://test.ecom.raiffeisen.ru");
        client.get_order("o").await.unwrap();

        let request = transport.last();
        assert_eq!(request.header("Authorization"), Some("Bearer rotated_key"));
        assert!(request.url.starts_with("https://test.ecom.raiffeisen.ru/"));
    }
}

mod classification_tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = MockTransport::failing("test transport error", Some(0));
        let client = client_with(transport);

        let err = client.get_order("o").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "test transport error");
        assert_eq!(err.status(), Some(0));
    }

    #[tokio::test]
    async fn test_empty_body_is_accepted() {
        let client = client_with(MockTransport::replying(200, ""));
        let response = client.delete_order("o").await.unwrap();
        assert_eq!(response.into_value(), json!(true));
    }

    #[tokio::test]
    async fn test_whitespace_body_is_invalid_response() {
        let client = client_with(MockTransport::replying(200, "  \n"));
        let err = client.delete_order("o").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_null_body_is_invalid_response() {
        let client = client_with(MockTransport::replying(200, "null"));
        let err = client.get_order("o").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_api_error_with_description() {
        let client = client_with(MockTransport::replying(
            400,
            r#"{"errorCode":"X","description":"Y"}"#,
        ));
        let err = client.get_order("o").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApiError);
        assert_eq!(err.message(), "Y");
        assert_eq!(err.error_code(), Some("X"));
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_api_error_without_description() {
        let client = client_with(MockTransport::replying(200, r#"{"errorCode":"X"}"#));
        let err = client.get_order("o").await.unwrap_err();
        assert_eq!(err.message(), "X");
    }

    #[tokio::test]
    async fn test_status_alone_is_not_an_error() {
        let client = client_with(MockTransport::replying(500, r#"{"code":"SUCCESS"}"#));
        let response = client.get_order("o").await.unwrap();
        assert_eq!(response.as_json(), Some(&json!({"code": "SUCCESS"})));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let client = client_with(MockTransport::replying(200, "not json"));
        let err = client.get_order("o").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_typed_response() {
        #[derive(serde::Deserialize)]
        struct Order {
            id: String,
            amount: f64,
        }

        let client = client_with(MockTransport::replying(200, r#"{"id":"o","amount":12.5}"#));
        let order: Order = client.get_order("o").await.unwrap().json().unwrap();
        assert_eq!(order.id, "o");
        assert_eq!(order.amount, 12.5);
    }
}

mod pay_tests {
    use super::*;

    #[test]
    fn test_pay_url() {
        let client = client_with(MockTransport::replying(200, ""));
        let query = params([("test_param_key", "test_param_value")]);

        assert_eq!(
            client.pay_url(1, "test_order_id", &query),
            "https://e-commerce.raiffeisen.ru/pay/?publicId=test_public_id&amount=1&orderId=test_order_id&test_param_key=test_param_value"
        );
    }

    #[test]
    fn test_pay_url_defaults_win() {
        let client = client_with(MockTransport::replying(200, ""));
        let query = params([("orderId", json!("other")), ("comment", json!("a&b"))]);

        assert_eq!(
            client.pay_url(json!(2.5), "o-1", &query),
            "https://e-commerce.raiffeisen.ru/pay/?publicId=test_public_id&amount=2.5&orderId=o-1&comment=a%26b"
        );
    }

    #[test]
    fn test_pay_form_request() {
        let client = client_with(MockTransport::replying(200, ""));
        let spec = client.pay_form_request(1, "o-1", &Params::new());

        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.path, "/pay");
        assert!(spec.raw_response);
        assert_eq!(
            Value::Object(spec.body),
            json!({"publicId": "test_public_id", "amount": 1, "orderId": "o-1"})
        );
    }

    #[tokio::test]
    async fn test_post_pay_form_returns_raw_page() {
        let transport = MockTransport::replying(200, "<html>pay</html>");
        let client = client_with(transport.clone());

        let page = client
            .post_pay_form(1, "o-1", &params([("locale", "ru")]))
            .await
            .unwrap();
        assert_eq!(page, "<html>pay</html>");

        let request = transport.last();
        assert_eq!(request.url, format!("{}/pay", HOST));
        assert_eq!(
            body_of(&request),
            json!({"publicId": "test_public_id", "amount": 1, "orderId": "o-1", "locale": "ru"})
        );
    }
}

mod signature_tests {
    use super::*;

    fn event() -> WebhookEvent {
        WebhookEvent::payment(
            json!(1),
            json!("test_transaction_order_id"),
            "test_transaction_status_value",
            "test_transaction_status_date",
        )
    }

    #[test]
    fn test_check_event_signature() {
        let client = client_with(MockTransport::replying(200, ""));
        let signature = "a682b6908e2cb28098ec1eef2eb1b54ac5b0ffd06a9f78d0934f2ee3e167fb1d";

        assert!(client.check_event_signature(signature, &event()));
        assert!(!client.check_event_signature("test_wrong_signature", &event()));
    }

    #[test]
    fn test_receiver_from_client() {
        let client = client_with(MockTransport::replying(200, ""));
        let signature = client.event_signer().sign(&event());
        let body = serde_json::to_vec(&event()).unwrap();

        let received = client.webhook_receiver().verify(&signature, &body).unwrap();
        assert_eq!(received.transaction.order_id, json!("test_transaction_order_id"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = client_with(MockTransport::replying(200, ""));
        assert!(!format!("{:?}", client).contains("test_secret_key"));
    }
}
