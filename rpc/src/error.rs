//! RPC error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("daemon error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RpcError>;
