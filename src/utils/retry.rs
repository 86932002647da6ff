use crate::error::ApiError;
use std::time::Duration;

/// Delay before the single bounded retry.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Retry policy for API operations: at most one retry, only for transient
/// failure classes, and only when the operation is idempotent.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub enabled: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether a failed first attempt may be retried once.
    pub fn should_retry(&self, error: &ApiError, idempotent: bool) -> bool {
        if !self.enabled || !idempotent {
            return false;
        }

        match error {
            // Unmapped 4xx codes also land in Server; they are never transient.
            ApiError::Server { status, .. } => *status >= 500,
            ApiError::Network { .. } => true,
            ApiError::Unauthorized { .. }
            | ApiError::Forbidden { .. }
            | ApiError::NotFound { .. }
            | ApiError::Validation { .. }
            | ApiError::RateLimited { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server_error() -> ApiError {
        ApiError::Server {
            status: 503,
            endpoint: "/spaces".to_string(),
        }
    }

    #[test]
    fn test_retries_transient_errors_when_idempotent() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&server_error(), true));
        assert!(policy.should_retry(
            &ApiError::Network {
                message: "connection reset".to_string(),
            },
            true,
        ));
    }

    #[test]
    fn test_never_retries_non_idempotent_operations() {
        let policy = RetryPolicy::default();
        assert!(!policy.should_retry(&server_error(), false));
    }

    #[test]
    fn test_never_retries_client_errors() {
        let policy = RetryPolicy::default();
        let errors = [
            ApiError::Unauthorized {
                endpoint: "/users/me".to_string(),
                server_message: String::new(),
            },
            ApiError::Forbidden {
                endpoint: "/workspace/update".to_string(),
            },
            ApiError::NotFound {
                endpoint: "/pages/info".to_string(),
            },
            ApiError::Validation {
                endpoint: "/spaces/create".to_string(),
                details: json!({}),
            },
            ApiError::RateLimited { retry_after_secs: 5 },
        ];
        for error in &errors {
            assert!(!policy.should_retry(error, true), "retried {}", error);
        }
    }

    #[test]
    fn test_never_retries_non_5xx_server_status() {
        let policy = RetryPolicy::default();
        let conflict = ApiError::Server {
            status: 409,
            endpoint: "/spaces/create".to_string(),
        };
        assert!(!policy.should_retry(&conflict, true));
    }

    #[test]
    fn test_disabled_policy_never_retries() {
        let policy = RetryPolicy::disabled();
        assert!(!policy.should_retry(&server_error(), true));
    }
}
