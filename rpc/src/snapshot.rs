//! Point-in-time chain facts

use serde::Serialize;
use serde_json::Value;

/// Everything the display and profitability paths need from one
/// daemon poll. Fetched fresh per invocation, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    pub height: u64,
    /// PoW difficulty; hybrid chains report a PoS component alongside.
    pub difficulty: f64,
    pub pos_difficulty: Option<f64>,
    /// 0 = unknown.
    pub network_hashrate: f64,
    pub balance: f64,
    /// Daemon error string, empty when healthy.
    pub errors: String,
    pub testnet: Option<bool>,
    /// The raw info object, for verbose display of every key.
    pub raw: Value,
}
