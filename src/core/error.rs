use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwinError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, TwinError>;
