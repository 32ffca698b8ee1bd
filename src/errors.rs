#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("invalid config: {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Rejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
