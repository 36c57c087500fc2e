//! Cryptonote-family daemon and wallet access
//!
//! The daemons answer on `/json_rpc` without credentials; the wallet
//! is a separate process with its own port.

use economics::CoinProfile;
use serde_json::{json, Value};

use crate::client::{field_f64, field_u64, RpcClient};
use crate::error::{Result, RpcError};

pub struct Daemon {
    rpc: RpcClient,
}

/// The slice of `getlastblockheader` the tools use.
#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    pub height: u64,
    /// Reward in atomic units; scale by the profile's atomic unit.
    pub reward_atomic: u64,
    pub difficulty: f64,
}

impl Daemon {
    pub fn connect(profile: &CoinProfile, url_override: Option<&str>) -> Result<Self> {
        let url = match url_override {
            Some(url) => url.to_string(),
            None => {
                let port = profile.rpc_port.ok_or_else(|| {
                    RpcError::Config(format!("{} has no default RPC port", profile.name))
                })?;
                format!("http://127.0.0.1:{port}/json_rpc")
            }
        };
        Ok(Self {
            rpc: RpcClient::new(url, None)?,
        })
    }

    pub fn last_block_header(&self) -> Result<BlockHeader> {
        let reply = self.rpc.call("getlastblockheader", json!({}))?;
        let header = reply
            .get("block_header")
            .ok_or_else(|| RpcError::Malformed("reply carries no block_header".into()))?;
        Ok(BlockHeader {
            height: field_u64(header, "height")?,
            reward_atomic: field_u64(header, "reward")?,
            difficulty: field_f64(header, "difficulty")?,
        })
    }

    /// `(alias, address)` pairs from chains with a name registry.
    pub fn all_aliases(&self) -> Result<Vec<(String, String)>> {
        let reply = self.rpc.call("get_all_alias_details", json!({}))?;
        if reply.get("status").and_then(Value::as_str) != Some("OK") {
            return Ok(Vec::new());
        }
        let aliases = reply
            .get("aliases")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(aliases
            .iter()
            .filter_map(|entry| {
                let alias = entry.get("alias")?.as_str()?;
                let address = entry.get("address")?.as_str()?;
                Some((alias.to_string(), address.to_string()))
            })
            .collect())
    }
}

/// The standalone wallet's RPC endpoint.
pub struct Wallet {
    rpc: RpcClient,
}

impl Wallet {
    pub fn connect(profile: &CoinProfile) -> Result<Self> {
        let port = profile.wallet_rpc_port.ok_or_else(|| {
            RpcError::Config(format!("{} has no wallet RPC port", profile.name))
        })?;
        Ok(Self {
            rpc: RpcClient::new(format!("http://127.0.0.1:{port}/json_rpc"), None)?,
        })
    }

    pub fn transfers(&self) -> Result<Value> {
        self.rpc.call("get_transfers", json!({}))
    }
}
