//! Daemon config parsing and endpoint resolution
//!
//! Bitcoin-family daemons keep their RPC credentials in a flat
//! `key=value` file under the coin's dot-directory; this is not toml
//! and gets its own small parser.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use economics::CoinProfile;

use crate::error::{Result, RpcError};

/// `$HOME`-anchored path for a daemon file.
pub fn home_path(relative: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_default();
    Path::new(&home).join(relative)
}

/// Parse `key=value` lines; `#` comments and malformed lines are
/// skipped rather than rejected, as the daemons themselves do.
pub fn parse_daemon_conf(path: &Path) -> Result<HashMap<String, String>> {
    let contents = std::fs::read_to_string(path)?;
    let mut settings = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        settings.insert(key.to_string(), value.trim().to_string());
    }

    Ok(settings)
}

/// Resolved connection parameters for one daemon.
pub struct Endpoint {
    pub url: String,
    pub auth: Option<(String, String)>,
}

/// Where to reach the coin's daemon: an explicit URL override wins,
/// credential-free daemons connect straight to their default port, and
/// everything else reads `rpcuser`/`rpcpassword`/`rpcport` from the
/// coin's config file.
pub fn daemon_endpoint(profile: &CoinProfile, url_override: Option<&str>) -> Result<Endpoint> {
    if let Some(url) = url_override {
        return Ok(Endpoint {
            url: url.to_string(),
            auth: None,
        });
    }

    let port = profile.rpc_port.ok_or_else(|| {
        RpcError::Config(format!("{} has no default RPC port; pass --url", profile.name))
    })?;

    if profile.no_auth {
        return Ok(Endpoint {
            url: format!("http://127.0.0.1:{port}/"),
            auth: None,
        });
    }

    let conf_name = profile.data_dir.unwrap_or(profile.name);
    let conf = home_path(&format!("{}/{}.conf", profile.daemon_dir(), conf_name));
    let settings = parse_daemon_conf(&conf)
        .map_err(|e| RpcError::Config(format!("cannot read {}: {e}", conf.display())))?;

    let user = settings
        .get("rpcuser")
        .ok_or_else(|| RpcError::Config(format!("no rpcuser in {}", conf.display())))?;
    let password = settings
        .get("rpcpassword")
        .ok_or_else(|| RpcError::Config(format!("no rpcpassword in {}", conf.display())))?;
    let port = settings
        .get("rpcport")
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(port);

    Ok(Endpoint {
        url: format!("http://127.0.0.1:{port}/"),
        auth: Some((user.clone(), password.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_key_value_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file, "rpcuser=alice").unwrap();
        writeln!(file, "rpcpassword = hunter2 ").unwrap();
        writeln!(file, "rpcport=18332").unwrap();
        writeln!(file, "not a setting").unwrap();
        writeln!(file, "  # indented comment").unwrap();

        let settings = parse_daemon_conf(file.path()).unwrap();
        assert_eq!(settings["rpcuser"], "alice");
        assert_eq!(settings["rpcpassword"], "hunter2");
        assert_eq!(settings["rpcport"], "18332");
        assert_eq!(settings.len(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_daemon_conf(Path::new("/nonexistent/coin.conf")).is_err());
    }

    #[test]
    fn url_override_wins() {
        let registry = economics::Registry::builtin().unwrap();
        let profile = registry.get("bitcoin").unwrap();
        let ep = daemon_endpoint(profile, Some("http://example:9000/")).unwrap();
        assert_eq!(ep.url, "http://example:9000/");
        assert!(ep.auth.is_none());
    }

    #[test]
    fn credential_free_daemon_uses_default_port() {
        let registry = economics::Registry::builtin().unwrap();
        let profile = registry.get("vcash").unwrap();
        let ep = daemon_endpoint(profile, None).unwrap();
        assert_eq!(ep.url, "http://127.0.0.1:9195/");
        assert!(ep.auth.is_none());
    }
}
