// Item extraction from list-shaped response bodies.

use serde_json::Value;

/// Pull the item list out of a response body.
///
/// List endpoints answer either with a bare array or with an object carrying
/// the array under `items`; older servers use a resource-named key instead,
/// which callers pass as `alt_key`. Returns None when the body has no list
/// shape at all, in which case the caller renders the body as-is.
pub fn extract_items<'a>(value: &'a Value, alt_key: &str) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }

    let obj = value.as_object()?;
    if let Some(Value::Array(items)) = obj.get("items") {
        return Some(items);
    }
    if let Some(Value::Array(items)) = obj.get(alt_key) {
        return Some(items);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_bare_array() {
        let body = json!([{"id": "1"}, {"id": "2"}]);
        let items = extract_items(&body, "spaces").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_items_items_key() {
        let body = json!({"items": [{"id": "1"}], "meta": {"hasNextPage": false}});
        let items = extract_items(&body, "spaces").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "1");
    }

    #[test]
    fn test_extract_items_alt_key() {
        let body = json!({"spaces": [{"id": "a"}, {"id": "b"}, {"id": "c"}]});
        let items = extract_items(&body, "spaces").unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_extract_items_prefers_items_over_alt_key() {
        let body = json!({"items": [{"id": "1"}], "spaces": [{"id": "a"}, {"id": "b"}]});
        let items = extract_items(&body, "spaces").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_items_none_for_plain_object() {
        let body = json!({"id": "1", "name": "Engineering"});
        assert!(extract_items(&body, "spaces").is_none());
    }

    #[test]
    fn test_extract_items_none_for_scalar() {
        assert!(extract_items(&json!("hello"), "spaces").is_none());
        assert!(extract_items(&json!(42), "spaces").is_none());
    }
}
