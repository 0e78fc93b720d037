use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Unauthorized { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{failed} of {total} explores returned SQL errors")]
    ExploresFailed { failed: usize, total: usize },
}

/// A failed explore query, as reported by the `looker_error` marker
#[derive(Error, Debug, Clone, PartialEq)]
#[error("SQL error in {model}/{explore} (query {query_id}): {message}")]
pub struct SqlError {
    pub model: String,
    pub explore: String,
    pub query_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Critical,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. }) => Some(
                "Check LOOKER_CLIENT_ID / LOOKER_CLIENT_SECRET and that the API user can use dev mode"
                    .to_string(),
            ),
            AppError::Api(ApiError::Timeout { .. }) => Some(
                "Check the Looker host and API port, or raise --query-timeout".to_string(),
            ),
            AppError::Api(ApiError::Http { status: 404, endpoint, .. })
                if endpoint.contains("git_branch") =>
            {
                Some("Make sure the project name is right and the branch is pushed".to_string())
            }
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove the config file, or run 'fonz config set'".to_string())
            }
            AppError::Validation(_) => {
                Some("See the failures listed above for the generated SQL errors".to_string())
            }
            _ => None,
        }
    }
}
