//! Daemon and price-feed plumbing
//!
//! Blocking JSON-RPC clients for the three daemon families the tools
//! speak to, daemon config-file parsing, the multi-provider fiat price
//! feed and the difficulty-history log reader. Everything here returns
//! already-resolved plain values; the economics crate never performs
//! I/O itself.

pub mod bitcoin;
pub mod client;
pub mod config;
pub mod cryptonote;
pub mod difflog;
pub mod error;
pub mod ethereum;
pub mod price;
pub mod snapshot;

pub use client::RpcClient;
pub use error::{Result, RpcError};
pub use price::PriceFeed;
pub use snapshot::ChainSnapshot;
