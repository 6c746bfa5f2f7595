//! RFC 3986 query string encoding.
//!
//! Follows the HTML form convention the API expects: null values are
//! skipped, booleans are sent as `1` / `0` and nested arrays or objects are
//! flattened into `key[sub]=value` pairs.

use serde_json::{Number, Value};

use crate::params::Params;

/// Encodes parameters as a query string, without the leading `?`.
pub fn build_query(params: &Params) -> String {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        push_pairs(&mut pairs, key.clone(), value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_pairs(pairs, format!("{}[{}]", key, sub), item);
            }
        }
        Value::Bool(flag) => pairs.push(encode_pair(&key, if *flag { "1" } else { "0" })),
        Value::Number(number) => pairs.push(encode_pair(&key, &number_to_string(number))),
        Value::String(text) => pairs.push(encode_pair(&key, text)),
    }
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

/// Renders a JSON number the way the API's form and signature code does.
///
/// Integers print as is. Floats use 14 significant digits: fixed notation
/// for decimal exponents in `-4..14` with trailing zeros removed, and
/// `1.0E+20` style scientific notation otherwise.
pub fn number_to_string(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) => float_to_string(float),
        None => number.to_string(),
    }
}

const FLOAT_PRECISION: i32 = 14;

fn float_to_string(float: f64) -> String {
    if float.is_nan() {
        return "NAN".to_string();
    }
    if float.is_infinite() {
        return if float > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if float == 0.0 {
        return if float.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // d.ddddddddddddde<exp>, rounded to the precision
    let rendered = format!("{:.*e}", (FLOAT_PRECISION - 1) as usize, float.abs());
    let (mantissa, exponent) = match rendered.split_once('e') {
        Some(parts) => parts,
        None => return rendered,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exp) => exp,
        Err(_) => return rendered,
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if float < 0.0 { "-" } else { "" };

    if exponent < -4 || exponent >= FLOAT_PRECISION {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}.{}E{}{}", sign, lead, rest, exp_sign, exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = (exponent + 1) as usize;
    if digits.len() <= int_len {
        format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}
