use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountingError {
    #[error("Invalid input for '{field}': {details}")]
    InvalidInput { field: String, details: String },

    #[error("Budget category '{0}' was provided more than once")]
    DuplicateBudgetCategory(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Chat completion failed: {0}")]
    ChatFailed(String),

    #[cfg(feature = "llm")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AccountingError>;
