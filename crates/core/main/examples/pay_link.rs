//! Builds a pay link and checks a sample payment notification.
//!
//! Reads credentials from `ECOM_SECRET_KEY` / `ECOM_PUBLIC_ID`.
//!
//! ```sh
//! ECOM_SECRET_KEY=... ECOM_PUBLIC_ID=... cargo run --example pay_link -- order-42 150
//! ```

use ecom_sdk::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ecom_sdk::init_tracing();

    let mut args = std::env::args().skip(1);
    let order_id = args.next().unwrap_or_else(|| "order-1".to_string());
    let amount: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(1.0);

    let settings = EcomSettings::from_env()?;
    let client = EcomClient::from_settings(settings)?;

    let extra = params([("successUrl", json!("https://shop.example/success"))]);
    println!("Pay link: {}", client.pay_url(amount, &order_id, &extra));

    let event = WebhookEvent::payment(amount, order_id.as_str(), "SUCCESS", "2024-01-01T10:00:00+03:00");
    let signature = client.event_signer().sign(&event);
    println!("Expected notification signature: {}", signature);
    println!("Signature valid: {}", client.check_event_signature(&signature, &event));

    match client.get_order_transaction(&order_id).await {
        Ok(response) => println!("Transaction: {}", response.into_value()),
        Err(e) => println!("Lookup failed ({:?}): {}", e.kind(), e),
    }

    Ok(())
}
