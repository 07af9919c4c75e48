use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleViewError {
    #[error("Invalid entity path: {0}")]
    InvalidPath(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
