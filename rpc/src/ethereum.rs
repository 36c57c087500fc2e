//! Ethereum-family daemon access
//!
//! Everything is hex-quantity strings on the wire; balances are wei
//! (1 ether = 1e18 wei).

use serde_json::{json, Value};

use crate::client::RpcClient;
use crate::error::{Result, RpcError};

pub struct Daemon {
    rpc: RpcClient,
}

impl Daemon {
    pub fn connect(url: &str) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::new(url, None)?,
        })
    }

    pub fn block_number(&self) -> Result<u64> {
        Ok(hex_quantity(&self.rpc.call_args("eth_blockNumber", &[])?)? as u64)
    }

    pub fn latest_difficulty(&self) -> Result<f64> {
        let block = self
            .rpc
            .call_args("eth_getBlockByNumber", &[json!("latest"), json!(false)])?;
        let difficulty = block
            .get("difficulty")
            .ok_or_else(|| RpcError::Malformed("block carries no difficulty".into()))?;
        Ok(hex_quantity(difficulty)? as f64)
    }

    pub fn hashrate(&self) -> Result<f64> {
        Ok(hex_quantity(&self.rpc.call_args("eth_hashrate", &[])?)? as f64)
    }

    pub fn accounts(&self) -> Result<Vec<String>> {
        let list = self.rpc.call_args("eth_accounts", &[])?;
        Ok(list
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Balance in whole ether.
    pub fn balance(&self, address: &str) -> Result<f64> {
        let wei = self
            .rpc
            .call_args("eth_getBalance", &[json!(address), json!("latest")])?;
        Ok(from_hex_wei(&string_of(&wei)?))
    }

    /// Returns the transaction hash. The sending account must already
    /// be unlocked on the daemon side.
    pub fn send_transaction(&self, from: &str, to: &str, amount_ether: f64) -> Result<String> {
        let tx = json!({
            "from": from,
            "to": to,
            "value": to_hex_wei(amount_ether),
        });
        string_of(&self.rpc.call_args("eth_sendTransaction", &[tx])?)
    }

    pub fn peer_count(&self) -> Result<u64> {
        Ok(hex_quantity(&self.rpc.call_args("net_peerCount", &[])?)? as u64)
    }
}

fn string_of(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RpcError::Malformed(format!("expected a hex string, got {value}")))
}

/// Parse a `0x…` quantity; difficulties and balances can exceed u64.
pub fn hex_quantity(value: &Value) -> Result<u128> {
    let s = value
        .as_str()
        .ok_or_else(|| RpcError::Malformed(format!("expected a hex quantity, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16)
        .map_err(|e| RpcError::Malformed(format!("bad hex quantity {s}: {e}")))
}

/// Hex wei string to whole ether.
pub fn from_hex_wei(s: &str) -> f64 {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16)
        .map(|wei| wei as f64 * 1e-18)
        .unwrap_or(0.0)
}

/// Whole ether to the hex wei string the daemon expects.
pub fn to_hex_wei(ether: f64) -> String {
    format!("{:#x}", (ether * 1e18) as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_quantities_parse() {
        assert_eq!(hex_quantity(&json!("0x10")).unwrap(), 16);
        assert_eq!(hex_quantity(&json!("ff")).unwrap(), 255);
        assert!(hex_quantity(&json!("0xzz")).is_err());
        assert!(hex_quantity(&json!(16)).is_err());
    }

    #[test]
    fn wei_conversions() {
        assert_eq!(from_hex_wei("0xde0b6b3a7640000"), 1.0);
        assert_eq!(to_hex_wei(1.0), "0xde0b6b3a7640000");
        // Sub-ether amounts survive the round trip to wei precision.
        let hex = to_hex_wei(0.001);
        assert!((from_hex_wei(&hex) - 0.001).abs() < 1e-12);
    }
}
