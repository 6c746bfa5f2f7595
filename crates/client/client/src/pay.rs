//! Pay URL and pay form builders.
//!
//! Both merge the `publicId`, `amount` and `orderId` defaults with caller
//! supplied parameters. The defaults always win; extra keys follow in the
//! caller's order.

use serde_json::Value;

use ecom_sdk_core::constants::fields;
use ecom_sdk_core::{build_query, merge_defaults, params, EcomResult, Params, RequestSpec};

use crate::client::EcomClient;

/// Builds the merged pay form parameters.
pub fn pay_params(public_id: &str, amount: Value, order_id: &str, extra: &Params) -> Params {
    let defaults = params([
        (fields::PUBLIC_ID, Value::from(public_id)),
        (fields::AMOUNT, amount),
        (fields::ORDER_ID, Value::from(order_id)),
    ]);
    merge_defaults(defaults, extra)
}

/// Joins a host, the pay form path and encoded parameters into a pay URL.
///
/// The pay form is served with a trailing slash, so the result always
/// reads `{host}{path}/?{query}`.
pub fn build_pay_url(host: &str, pay_form_path: &str, params: &Params) -> String {
    format!(
        "{}{}/?{}",
        host,
        pay_form_path.trim_end_matches('/'),
        build_query(params)
    )
}

impl EcomClient {
    /// Returns the URL a buyer opens to pay `amount` for `order_id`.
    pub fn pay_url(&self, amount: impl Into<Value>, order_id: &str, query: &Params) -> String {
        let merged = pay_params(self.public_id(), amount.into(), order_id, query);
        build_pay_url(self.host(), &self.config().paths().pay_form, &merged)
    }

    /// Builds the POST submission of the pay form.
    pub fn pay_form_request(
        &self,
        amount: impl Into<Value>,
        order_id: &str,
        body: &Params,
    ) -> RequestSpec {
        let merged = pay_params(self.public_id(), amount.into(), order_id, body);
        RequestSpec::post(self.config().paths().pay_form.clone())
            .body(merged)
            .raw()
    }

    /// Submits the pay form and returns the page it answers with.
    pub async fn post_pay_form(
        &self,
        amount: impl Into<Value>,
        order_id: &str,
        body: &Params,
    ) -> EcomResult<String> {
        let spec = self.pay_form_request(amount, order_id, body);
        let response = self.execute(spec).await?;
        Ok(response.as_raw().unwrap_or_default().to_string())
    }
}
