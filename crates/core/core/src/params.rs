//! Ordered parameter maps for request bodies and queries.

use serde_json::{Map, Value};

/// Ordered mapping of parameter name to JSON value.
///
/// `serde_json` is built with `preserve_order`, so iteration follows
/// insertion order. Queries and bodies are emitted in that order.
pub type Params = Map<String, Value>;

/// Merges caller supplied parameters into a set of defaults.
///
/// Keys present in `defaults` keep their default value and position.
/// Keys only present in `overrides` are appended in the order the caller
/// gave them.
pub fn merge_defaults(defaults: Params, overrides: &Params) -> Params {
    let mut merged = defaults;
    for (key, value) in overrides {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Builds a [`Params`] map from key/value pairs.
pub fn params<K, V, I>(pairs: I) -> Params
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_win_and_keep_position() {
        let defaults = params([("publicId", json!("pub")), ("amount", json!(1))]);
        let overrides = params([("amount", json!(99)), ("comment", json!("hi"))]);

        let merged = merge_defaults(defaults, &overrides);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["publicId", "amount", "comment"]);
        assert_eq!(merged["amount"], json!(1));
        assert_eq!(merged["comment"], json!("hi"));
    }

    #[test]
    fn test_extensions_keep_caller_order() {
        let overrides = params([("z", "1"), ("a", "2"), ("m", "3")]);
        let merged = merge_defaults(Params::new(), &overrides);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_overrides() {
        let defaults = params([("orderId", "o-1")]);
        assert_eq!(merge_defaults(defaults.clone(), &Params::new()), defaults);
    }
}
