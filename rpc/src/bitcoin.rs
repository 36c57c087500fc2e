//! Bitcoin-family daemon access
//!
//! Typed wrappers over the daemon and wallet calls the `coinfo` tool
//! uses. The daemons disagree on plenty of small things (hybrid
//! difficulty objects, extended-precision amount strings, which
//! hashrate call exists); those quirks are absorbed here.

use economics::{CoinProfile, HashrateSource};
use serde_json::{json, Value};

use crate::client::{field_f64, RpcClient};
use crate::config::daemon_endpoint;
use crate::error::{Result, RpcError};
use crate::snapshot::ChainSnapshot;

pub struct Daemon {
    rpc: RpcClient,
}

/// PoW difficulty, with the PoS component hybrid chains also report.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyReading {
    pub pow: f64,
    pub pos: Option<f64>,
}

impl Daemon {
    pub fn connect(profile: &CoinProfile, url_override: Option<&str>) -> Result<Self> {
        let endpoint = daemon_endpoint(profile, url_override)?;
        Ok(Self {
            rpc: RpcClient::new(endpoint.url, endpoint.auth)?,
        })
    }

    pub fn get_info(&self) -> Result<Value> {
        self.rpc.call_args("getinfo", &[])
    }

    /// Scalar for plain PoW chains, an object keyed by proof kind for
    /// hybrids. Every derived figure uses the PoW component.
    pub fn difficulty(&self) -> Result<DifficultyReading> {
        let value = self.rpc.call_args("getdifficulty", &[])?;
        match value {
            Value::Object(map) => {
                let pow = map
                    .get("proof-of-work")
                    .and_then(Value::as_f64)
                    .ok_or_else(|| {
                        RpcError::Malformed("hybrid difficulty lacks proof-of-work".into())
                    })?;
                let pos = map.get("proof-of-stake").and_then(Value::as_f64);
                Ok(DifficultyReading { pow, pos })
            }
            other => other
                .as_f64()
                .map(|pow| DifficultyReading { pow, pos: None })
                .ok_or_else(|| RpcError::Malformed("non-numeric difficulty".into())),
        }
    }

    fn mining_info_field(&self, key: &str) -> Result<f64> {
        let info = self.rpc.call_args("getmininginfo", &[])?;
        field_f64(&info, key)
    }

    /// Local miner rate, via the call the coin's client actually has.
    pub fn local_hashrate(&self, source: HashrateSource) -> Result<f64> {
        match source {
            HashrateSource::None => Ok(0.0),
            HashrateSource::MiningInfo => match self.mining_info_field("hashespersec") {
                Ok(rate) => Ok(rate),
                // Older clients only know the standalone call.
                Err(_) => self
                    .rpc
                    .call_args("gethashespersec", &[])?
                    .as_f64()
                    .ok_or_else(|| RpcError::Malformed("non-numeric hashespersec".into())),
            },
            HashrateSource::BlocksPerDay => self.mining_info_field("blocksperday"),
            HashrateSource::PrimesPerSec => self
                .rpc
                .call_args("getprimespersec", &[])?
                .as_f64()
                .ok_or_else(|| RpcError::Malformed("non-numeric primespersec".into())),
        }
    }

    /// 0 when the client doesn't report it.
    pub fn network_hashrate(&self) -> f64 {
        self.mining_info_field("networkhashps").unwrap_or(0.0)
    }

    /// One poll of everything the info display needs.
    pub fn snapshot(&self) -> Result<ChainSnapshot> {
        let info = self.get_info()?;
        let height = info
            .get("blocks")
            .and_then(Value::as_u64)
            .ok_or_else(|| RpcError::Malformed("info carries no block count".into()))?;
        let difficulty = self.difficulty()?;

        let balance = match info.get("balance") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => parse_ep(s).unwrap_or(0.0),
            _ => 0.0,
        };
        let errors = info
            .get("errors")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let testnet = info.get("testnet").and_then(Value::as_bool);

        Ok(ChainSnapshot {
            height,
            difficulty: difficulty.pow,
            pos_difficulty: difficulty.pos,
            network_hashrate: self.network_hashrate(),
            balance,
            errors,
            testnet,
            raw: info,
        })
    }

    /// Walk back from the tip to the most recent proof-of-work block
    /// and use its mint as the reward estimate. Capped at 1000 blocks
    /// so a long proof-of-stake run doesn't turn into a full scan.
    pub fn last_pow_reward(&self, tip: u64) -> Result<f64> {
        let floor = tip.saturating_sub(1_000);
        let mut height = tip;
        while height > floor {
            let hash = self.rpc.call_args("getblockhash", &[json!(height)])?;
            let block = self.rpc.call_args("getblock", &[hash])?;
            if block.get("flags").and_then(Value::as_str) == Some("proof-of-work") {
                return field_f64(&block, "mint");
            }
            height -= 1;
        }
        Ok(0.0)
    }

    /// Balance of a watched address via `listbalances`; the coinbase
    /// emission account of the coinbase-proportional chain.
    pub fn address_balance(&self, address: &str) -> Result<f64> {
        let reply = self
            .rpc
            .call_args("listbalances", &[json!(1), json!([address])])?;
        let entry = reply
            .get(0)
            .ok_or_else(|| RpcError::Malformed("empty listbalances reply".into()))?;
        match entry.get("balance") {
            Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => {
                parse_ep(s).ok_or_else(|| RpcError::Malformed("bad balance encoding".into()))
            }
            _ => Err(RpcError::Malformed("listbalances entry lacks balance".into())),
        }
    }

    // Wallet operations

    pub fn list_transactions(
        &self,
        account: Option<&str>,
        count: Option<u64>,
    ) -> Result<Vec<Value>> {
        let params = match (account, count) {
            (Some(acc), Some(n)) => vec![json!(acc), json!(n)],
            (Some(acc), None) => vec![json!(acc)],
            _ => Vec::new(),
        };
        as_array(self.rpc.call_args("listtransactions", &params)?)
    }

    pub fn send_to_address(&self, address: &str, amount: Value) -> Result<Value> {
        self.rpc.call_args("sendtoaddress", &[json!(address), amount])
    }

    pub fn pay_tx_fee(&self) -> Result<f64> {
        field_f64(&self.get_info()?, "paytxfee")
    }

    pub fn set_tx_fee(&self, fee: f64) -> Result<()> {
        self.rpc.call_args("settxfee", &[json!(fee)])?;
        Ok(())
    }

    pub fn new_address(&self, account: Option<&str>) -> Result<String> {
        let params: Vec<Value> = account.map(|a| vec![json!(a)]).unwrap_or_default();
        as_string(self.rpc.call_args("getnewaddress", &params)?)
    }

    pub fn addresses_by_account(&self, account: &str) -> Result<Vec<String>> {
        let list = as_array(self.rpc.call_args("getaddressesbyaccount", &[json!(account)])?)?;
        Ok(list
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }

    /// Single-address clients answer this instead of the per-account
    /// address list.
    pub fn account_address(&self, account: &str) -> Result<String> {
        as_string(self.rpc.call_args("getaccountaddress", &[json!(account)])?)
    }

    pub fn get_account(&self, address: &str) -> Result<String> {
        as_string(self.rpc.call_args("getaccount", &[json!(address)])?)
    }

    /// Account-name -> balance object.
    pub fn list_accounts(&self) -> Result<Value> {
        self.rpc.call_args("listaccounts", &[])
    }

    pub fn list_received(&self) -> Result<Vec<Value>> {
        as_array(self.rpc.call_args("listreceivedbyaccount", &[])?)
    }

    pub fn list_address_groupings(&self) -> Result<Vec<Value>> {
        as_array(self.rpc.call_args("listaddressgroupings", &[])?)
    }

    pub fn dump_priv_key(&self, address: &str) -> Result<String> {
        as_string(self.rpc.call_args("dumpprivkey", &[json!(address)])?)
    }

    pub fn dump_wallet(&self, path: &str) -> Result<()> {
        self.rpc.call_args("dumpwallet", &[json!(path)])?;
        Ok(())
    }

    pub fn import_priv_key(&self, key: &str, account: Option<&str>) -> Result<()> {
        let params = match account {
            Some(acc) => vec![json!(key), json!(acc)],
            None => vec![json!(key)],
        };
        self.rpc.call_args("importprivkey", &params)?;
        Ok(())
    }

    pub fn peer_info(&self) -> Result<Vec<Value>> {
        as_array(self.rpc.call_args("getpeerinfo", &[])?)
    }

    pub fn backup_wallet(&self, path: &str) -> Result<()> {
        self.rpc.call_args("backupwallet", &[json!(path)])?;
        Ok(())
    }
}

fn as_array(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(RpcError::Malformed(format!(
            "expected a list, got {other}"
        ))),
    }
}

fn as_string(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(RpcError::Malformed(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Extended-precision amount encoding (`<decimal>ep`) some daemons use
/// in place of JSON numbers.
pub fn parse_ep(s: &str) -> Option<f64> {
    s.strip_suffix("ep").unwrap_or(s).trim().parse().ok()
}

/// Encode an amount the way the daemon expects it back.
pub fn format_ep(x: f64) -> String {
    format!("{x:.10}ep")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ep_amounts_round_trip() {
        assert_eq!(parse_ep("12.5ep"), Some(12.5));
        assert_eq!(parse_ep("0.0000000001ep"), Some(1e-10));
        // Plain numbers parse too.
        assert_eq!(parse_ep("3.25"), Some(3.25));
        assert_eq!(parse_ep("junk"), None);

        assert_eq!(format_ep(12.5), "12.5000000000ep");
        assert_eq!(parse_ep(&format_ep(0.1)), Some(0.1));
    }
}
