//! Blocking JSON-RPC client
//!
//! One client speaks to all three daemon families; only the endpoint
//! path and the auth differ. Requests are sequential, one id counter
//! per client.

use std::cell::Cell;
use std::time::Duration;

use log::debug;
use serde_json::{json, Value};

use crate::error::{Result, RpcError};

const RPC_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RpcClient {
    url: String,
    auth: Option<(String, String)>,
    http: reqwest::blocking::Client,
    next_id: Cell<u64>,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, auth: Option<(String, String)>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()?;
        Ok(Self {
            url: url.into(),
            auth,
            http,
            next_id: Cell::new(0),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC call and unwrap its `result`.
    pub fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        debug!("rpc {} -> {}", self.url, method);

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut request = self.http.post(&self.url).json(&body);
        if let Some((user, password)) = &self.auth {
            request = request.basic_auth(user, Some(password));
        }

        let response: Value = request.send()?.json()?;
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(RpcError::Server { code, message });
        }
        response
            .get("result")
            .cloned()
            .ok_or_else(|| RpcError::Malformed(format!("{method}: response carries no result")))
    }

    /// Positional-parameter convenience wrapper.
    pub fn call_args(&self, method: &str, params: &[Value]) -> Result<Value> {
        self.call(method, Value::Array(params.to_vec()))
    }
}

/// Helpers for pulling typed fields out of loosely shaped responses.
pub(crate) fn field_f64(value: &Value, key: &str) -> Result<f64> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| RpcError::Malformed(format!("missing numeric field {key}")))
}

pub(crate) fn field_u64(value: &Value, key: &str) -> Result<u64> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| RpcError::Malformed(format!("missing integer field {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_field_helpers() {
        let value = json!({"height": 7, "difficulty": 1.5});
        assert_eq!(field_u64(&value, "height").unwrap(), 7);
        assert_eq!(field_f64(&value, "difficulty").unwrap(), 1.5);
        assert!(field_f64(&value, "absent").is_err());
    }
}
