use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {source}")]
    Input { source: std::io::Error },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required for {endpoint}: {server_message}")]
    Unauthorized {
        endpoint: String,
        server_message: String,
    },
    #[error("Access denied for {endpoint}")]
    Forbidden { endpoint: String },
    #[error("Not found: {endpoint}")]
    NotFound { endpoint: String },
    #[error("Validation failed for {endpoint}: {details}")]
    Validation {
        endpoint: String,
        details: serde_json::Value,
    },
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("Server error {status} for {endpoint}")]
    Server { status: u16, endpoint: String },
    #[error("Network error: {message}")]
    Network { message: String },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: Invalid credentials")]
    InvalidCredentials,
    #[error("No token received from server")]
    MissingToken,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration read error at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("No API URL configured")]
    MissingUrl,
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// Process exit code for this error, stable for scripting.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Cli(_) => 1,
            AppError::Config(_) => 2,
            AppError::Storage(_) => 2,
            AppError::Auth(_) => 3,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => 3,
                ApiError::NotFound { .. } => 4,
                ApiError::Validation { .. } => 5,
                ApiError::RateLimited { .. } => 6,
                ApiError::Server { .. } => 7,
                ApiError::Network { .. } => 8,
            },
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. })
            | AppError::Auth(AuthError::InvalidCredentials) => {
                Some("Run 'docmost login' to authenticate and store a token".to_string())
            }
            AppError::Api(ApiError::RateLimited { retry_after_secs }) => {
                Some(format!("Wait {}s before retrying", retry_after_secs))
            }
            AppError::Api(ApiError::Network { .. }) => {
                Some("Check your internet or Docmost connection and try again".to_string())
            }
            AppError::Config(ConfigError::MissingUrl) => {
                Some("Set 'url' in the config file, DOCMOST_URL, or pass --url".to_string())
            }
            _ => None,
        }
    }
}
