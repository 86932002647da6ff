use reqwest::Method;
use serde_json::Value;

/// A single API call described by the command layer.
///
/// Handlers only say what to send; the client owns authentication, retry,
/// and error mapping. The Docmost API is POST-centric, so both constructors
/// build POST requests and differ only in retry eligibility.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub idempotent: bool,
    /// Every workspace endpoint needs a session token; the client refuses
    /// to send such a request unauthenticated rather than collecting a 401.
    pub requires_auth: bool,
}

impl ApiRequest {
    /// Read-style call (list, info, search). Eligible for a single retry
    /// on transient failure.
    pub fn fetch(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: None,
            idempotent: true,
            requires_auth: true,
        }
    }

    /// Mutating call (create, update, delete, membership changes).
    /// Never retried.
    pub fn mutate(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: None,
            idempotent: false,
            requires_auth: true,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter. Parameters are serialized in the order
    /// they were added.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the cursor for a paginated endpoint. The server reads `page`
    /// and `limit` from the JSON body, alongside any existing filters.
    pub fn with_paging(mut self, page: u64, limit: usize) -> Self {
        let mut map = match self.body.take() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        map.insert("page".into(), Value::from(page));
        map.insert("limit".into(), Value::from(limit));
        self.body = Some(Value::Object(map));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_is_idempotent() {
        let request = ApiRequest::fetch("/spaces/list");
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/spaces/list");
        assert!(request.idempotent);
        assert!(request.requires_auth);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_mutate_is_not_idempotent() {
        let request = ApiRequest::mutate("/pages/create");
        assert_eq!(request.method, Method::POST);
        assert!(!request.idempotent);
        assert!(request.requires_auth);
    }

    #[test]
    fn test_with_body() {
        let request = ApiRequest::fetch("/pages/info").with_body(json!({"pageId": "p1"}));
        assert_eq!(request.body, Some(json!({"pageId": "p1"})));
    }

    #[test]
    fn test_with_paging_merges_into_body() {
        let request = ApiRequest::fetch("/pages/list")
            .with_body(json!({"spaceId": "s1"}))
            .with_paging(2, 50);
        assert_eq!(
            request.body,
            Some(json!({"spaceId": "s1", "page": 2, "limit": 50}))
        );
    }

    #[test]
    fn test_with_paging_without_body() {
        let request = ApiRequest::fetch("/spaces/list").with_paging(1, 20);
        assert_eq!(request.body, Some(json!({"page": 1, "limit": 20})));
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let request = ApiRequest::fetch("/search")
            .with_query("spaceId", "s1")
            .with_query("scope", "pages")
            .with_query("archived", "false");

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["spaceId", "scope", "archived"]);
    }
}
