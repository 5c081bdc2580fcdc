use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareError {
    /// A required input was empty or out of range. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    #[error("Field `{field}` expects a {expected} value")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data URI: {0}")]
    DataUri(String),
}

impl CareError {
    pub fn validation(message: impl Into<String>) -> Self {
        CareError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CareError>;
