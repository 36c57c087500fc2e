//! Economics error types

use thiserror::Error;

/// Errors from profile lookup and validation.
///
/// Missing optional data (no price, no hashrate, short history) is not
/// an error anywhere in this crate; it surfaces as `None`/omitted rows.
#[derive(Error, Debug)]
pub enum EconomicsError {
    #[error("unknown coin: {0}")]
    UnknownCoin(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
