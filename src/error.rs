use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request signature does not match the payload")]
    InvalidSignature,

    #[error("Completion API error ({status}): {message}")]
    CompletionApi { status: StatusCode, message: String },

    #[error("Completion response error: {0}")]
    CompletionResponse(String),

    #[error("Graph API error ({status}): {message}")]
    GraphApi { status: StatusCode, message: String },

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
