use crate::api::request::ApiRequest;
use crate::error::{ApiError, AppError, AuthError};
use crate::storage::config::EffectiveConfig;
use crate::utils::retry::{RETRY_DELAY, RetryPolicy};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::{HeaderMap, RETRY_AFTER, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("docmost/", env!("CARGO_PKG_VERSION"));
/// Backoff hint reported when a 429 carries no usable Retry-After header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;
/// Cookie the server sets on successful login.
const AUTH_COOKIE: &str = "authToken";

#[derive(Debug, Clone)]
pub struct DocmostClient {
    client: Client,
    pub base_url: String,
    pub token: Option<String>,
    retry: RetryPolicy,
}

impl DocmostClient {
    // Create client with default settings
    pub fn new(config: &EffectiveConfig) -> Result<Self, ApiError> {
        Self::with_retry(config, RetryPolicy::default())
    }

    pub fn with_retry(config: &EffectiveConfig, retry: RetryPolicy) -> Result<Self, ApiError> {
        let client = build_http_client()?;

        Ok(DocmostClient {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            retry,
        })
    }

    pub fn build_request(&self, request: &ApiRequest) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), url);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        // The API expects a JSON body on every call, `{}` when there is
        // nothing to send.
        match &request.body {
            Some(body) => builder.json(body),
            None => builder.json(&json!({})),
        }
    }

    /// Execute a request and return the response payload with the standard
    /// `{"data", "success", "status"}` envelope already unwrapped.
    ///
    /// A request that requires authentication fails before any network
    /// activity when no token is configured. Network and 5xx failures are
    /// retried once after a short delay, but only for idempotent requests.
    /// 4xx outcomes are never retried.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        if request.requires_auth && self.token.is_none() {
            return Err(ApiError::Unauthorized {
                endpoint: request.path.clone(),
                server_message: "no access token".to_string(),
            });
        }

        match self.send(request).await {
            Err(error) if self.retry.should_retry(&error, request.idempotent) => {
                debug!(
                    "transient failure on {}, retrying once after {:?}: {}",
                    request.path, RETRY_DELAY, error
                );
                tokio::time::sleep(RETRY_DELAY).await;
                self.send(request).await
            }
            outcome => outcome,
        }
    }

    async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        debug!("{} {}", request.method, request.path);
        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(|e| network_error(&request.path, &e))?;

        handle_response(response, &request.path).await
    }

    /// Authenticate against `{api_url}/auth/login` and return the access
    /// token. Stand-alone because login runs before any token exists.
    ///
    /// The server reports the token in the `authToken` cookie; older
    /// releases return it in the response body instead, so both are tried.
    pub async fn login(api_url: &str, email: &str, password: &str) -> Result<String, AppError> {
        let endpoint = "/auth/login";
        let client = build_http_client()?;
        let url = format!("{}{}", api_url.trim_end_matches('/'), endpoint);

        debug!("POST {}", endpoint);
        let response = client
            .post(&url)
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(|e| network_error(endpoint, &e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !status.is_success() {
            return Err(error_from_response(response, endpoint).await.into());
        }

        let headers = response.headers().clone();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        token_from_cookies(&headers)
            .or_else(|| token_from_body(&body))
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ApiError::Network {
            message: format!("Failed to create HTTP client: {}", e),
        })
}

async fn handle_response(response: Response, endpoint: &str) -> Result<Value, ApiError> {
    if response.status().is_success() {
        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Network {
                message: format!("Failed to parse response from {}: {}", endpoint, e),
            })?;
        Ok(unwrap_envelope(payload))
    } else {
        Err(error_from_response(response, endpoint).await)
    }
}

/// Map a non-success response onto the error taxonomy.
async fn error_from_response(response: Response, endpoint: &str) -> ApiError {
    let status = response.status().as_u16();
    let retry_after = parse_retry_after(response.headers());
    let body_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 => ApiError::Unauthorized {
            endpoint: endpoint.to_string(),
            server_message: error_message(&body_text),
        },
        403 => ApiError::Forbidden {
            endpoint: endpoint.to_string(),
        },
        404 => ApiError::NotFound {
            endpoint: endpoint.to_string(),
        },
        400 | 422 => ApiError::Validation {
            endpoint: endpoint.to_string(),
            details: serde_json::from_str(&body_text).unwrap_or(Value::String(body_text)),
        },
        429 => ApiError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        status => ApiError::Server {
            status,
            endpoint: endpoint.to_string(),
        },
    }
}

fn network_error(endpoint: &str, error: &reqwest::Error) -> ApiError {
    let message = if error.is_timeout() {
        format!(
            "request to {} timed out after {}s",
            endpoint, DEFAULT_TIMEOUT_SECS
        )
    } else if error.is_connect() {
        format!("connection to {} failed: {}", endpoint, error)
    } else {
        format!("{}: {}", endpoint, error)
    };
    ApiError::Network { message }
}

/// Responses arrive as `{"data": ..., "success": true, "status": 200}`.
/// Strip the envelope when all three keys are present; pass anything else
/// through untouched.
fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map)
            if map.contains_key("data")
                && map.contains_key("success")
                && map.contains_key("status") =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Pull the human-readable message out of a JSON error body, falling back
/// to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

/// Retry-After is either delta-seconds or an HTTP date.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    let date = DateTime::parse_from_rfc2822(value).ok()?;
    let delta = date.signed_duration_since(Utc::now()).num_seconds();
    Some(delta.max(0) as u64)
}

fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(cookie) = value.to_str() else {
            continue;
        };
        let pair = cookie.split(';').next().unwrap_or("");
        if let Some((name, token)) = pair.split_once('=') {
            if name.trim() == AUTH_COOKIE && !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

fn token_from_body(body: &Value) -> Option<String> {
    let nested = body
        .get("data")
        .and_then(|data| data.get("tokens"))
        .and_then(|tokens| {
            tokens
                .get("accessToken")
                .or_else(|| tokens.get("access_token"))
        })
        .and_then(Value::as_str);

    nested
        .or_else(|| {
            ["token", "accessToken", "access_token"]
                .iter()
                .find_map(|key| body.get(key).and_then(Value::as_str))
        })
        .map(String::from)
}
