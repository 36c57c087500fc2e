//! Wallet subcommands for `coinfo`
//!
//! Sends get extra friction on purpose: the command line makes
//! accidental duplicates too easy, so earlier payments to the same
//! address are listed and the transaction must be confirmed by typing
//! a random challenge string.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use cointools_cli::output::print_columns;
use cointools_rpc::bitcoin::{format_ep, parse_ep, Daemon};
use cointools_rpc::config::home_path;
use economics::CoinProfile;
use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;
use serde_json::{json, Value};

pub fn send(
    profile: &CoinProfile,
    daemon: &Daemon,
    address: &str,
    amount: f64,
    txfee: Option<f64>,
) -> Result<()> {
    let default_fee = daemon.pay_tx_fee().unwrap_or(0.0);
    let fee = match txfee {
        Some(fee) => {
            daemon.set_tx_fee(fee)?;
            fee
        }
        None => default_fee,
    };

    println!(
        "About to send {} {amount} to {address} with txfee {fee}",
        profile.ticker
    );

    // Sends show up under the empty account name.
    if let Ok(transactions) = daemon.list_transactions(Some(""), None) {
        for item in &transactions {
            if item.get("address").and_then(Value::as_str) == Some(address) {
                println!(
                    "Warning! {} already sent to this address on {}",
                    tx_amount(item).abs(),
                    tx_time(item)
                );
            }
        }
    }

    let mut rng = rand::rng();
    let length = rng.random_range(6..15);
    let challenge = Alphanumeric.sample_string(&mut rng, length);
    print!("Please type {challenge} to confirm the transaction: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;

    if input.trim() == challenge {
        let amount_value = if uses_ep_amounts(profile) {
            Value::String(format_ep(amount))
        } else {
            json!(amount)
        };
        match daemon.send_to_address(address, amount_value) {
            Ok(txid) => {
                println!("Sent {amount} to {address} with txid");
                println!("{}", display_value(&txid));
            }
            Err(err) => println!("Send failed: {err}"),
        }
    } else {
        println!("Confirmation failed, not sending.");
    }

    // Restore the daemon's default fee whether or not we sent.
    if txfee.is_some() {
        daemon.set_tx_fee(default_fee)?;
    }
    Ok(())
}

pub fn export_keys(profile: &CoinProfile, daemon: &Daemon) -> Result<()> {
    // dumpwallet is the complete method when the client has it; the
    // fallbacks each see only a subset of the keys, so both run and
    // the results are de-duplicated.
    let keys = match dump_wallet_keys(profile, daemon) {
        Ok(keys) => keys,
        Err(err) => {
            println!("No dumpwallet method available, list of keys may be incomplete");
            log::debug!("dumpwallet export failed: {err}");

            let mut keys = Vec::new();
            // Grouped addresses cover generated coins, but skip
            // zero-balance addresses.
            match grouped_keys(daemon) {
                Ok(grouped) => keys.extend(grouped),
                Err(_) => println!(
                    "Warning: missing listaddressgroupings method, list of keys may be incomplete\n"
                ),
            }
            // The account walk catches the zero-balance leftovers.
            match account_keys(daemon) {
                Ok(by_account) => {
                    for item in by_account {
                        if !keys.contains(&item) {
                            keys.push(item);
                        }
                    }
                }
                Err(_) => println!(
                    "Warning: missing listaccounts method, list of keys may be incomplete\n"
                ),
            }
            keys
        }
    };

    print_columns(&keys, " ");
    Ok(())
}

fn dump_wallet_keys(profile: &CoinProfile, daemon: &Daemon) -> Result<Vec<Vec<String>>> {
    if wallet_dump_is_csv(profile) {
        // Key,Address,Type lines after a header row.
        let path = home_path(&format!("{}/data/wallet.csv", profile.daemon_dir()));
        daemon.dump_wallet(&path.to_string_lossy())?;
        let contents = std::fs::read_to_string(&path)?;
        let _ = std::fs::remove_file(&path);

        let mut keys = Vec::new();
        for line in contents.lines().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 3 {
                continue;
            }
            let account = if fields[2].trim() == "label" {
                daemon.get_account(fields[1]).unwrap_or_default()
            } else {
                String::new()
            };
            keys.push(vec![fields[0].to_string(), account]);
        }
        Ok(keys)
    } else {
        let path = home_path(&format!("{}/walletdump.txt", profile.daemon_dir()));
        daemon.dump_wallet(&path.to_string_lossy())?;
        let contents = std::fs::read_to_string(&path)?;
        let _ = std::fs::remove_file(&path);

        let mut keys = Vec::new();
        for line in contents.lines() {
            // Key lines carry addr=... at the end; everything else is
            // headers and comments.
            if !line.contains("addr=") {
                continue;
            }
            let Some(privkey) = line.split_whitespace().next() else {
                continue;
            };
            let account = match line.find("label=") {
                Some(pos) => {
                    let rest = &line[pos + "label=".len()..];
                    match rest.find(" #") {
                        Some(end) => rest[..end].trim().to_string(),
                        None => rest.trim().to_string(),
                    }
                }
                None => String::new(),
            };
            keys.push(vec![privkey.to_string(), account]);
        }
        Ok(keys)
    }
}

fn grouped_keys(daemon: &Daemon) -> cointools_rpc::Result<Vec<Vec<String>>> {
    let mut keys = Vec::new();
    for group in daemon.list_address_groupings()? {
        let Some(entries) = group.as_array() else {
            continue;
        };
        for entry in entries {
            let Some(fields) = entry.as_array() else {
                continue;
            };
            let Some(address) = fields.first().and_then(Value::as_str) else {
                continue;
            };
            let privkey = daemon.dump_priv_key(address)?;
            let account = fields
                .get(2)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            keys.push(vec![privkey, account]);
        }
    }
    Ok(keys)
}

fn account_keys(daemon: &Daemon) -> cointools_rpc::Result<Vec<Vec<String>>> {
    let mut keys = Vec::new();
    let accounts = daemon.list_accounts()?;
    let Some(map) = accounts.as_object() else {
        return Ok(keys);
    };
    for account in map.keys() {
        for address in daemon.addresses_by_account(account)? {
            let privkey = daemon.dump_priv_key(&address)?;
            keys.push(vec![privkey, account.clone()]);
        }
    }
    Ok(keys)
}

pub fn import_keys(daemon: &Daemon, file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;

    for (index, line) in contents.lines().enumerate() {
        let lineno = index + 1;
        // Account names may contain spaces, so split only once.
        let mut parts = line.splitn(2, ' ');
        let Some(privkey) = parts.next().filter(|key| !key.is_empty()) else {
            continue;
        };
        if !(51..=52).contains(&privkey.len()) {
            println!("Invalid private key {privkey} on line {lineno} ignored");
            continue;
        }
        let account = parts.next().map(str::trim).filter(|acc| !acc.is_empty());
        daemon.import_priv_key(privkey, account)?;
        // Imports are slow on most daemons; show progress.
        println!("Key # {lineno} imported");
    }
    Ok(())
}

pub fn list_transactions(
    daemon: &Daemon,
    account: Option<&str>,
    count: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let transactions = daemon.list_transactions(account, count)?;

    let mut rows = Vec::new();
    for item in &transactions {
        let confirmations = item
            .get("confirmations")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let category = item
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let unconfirmed = confirmations < 1 || category == "immature";

        let mut row = vec![
            tx_time(item),
            category
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            item.get("account")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            format!("{}", tx_amount(item)),
            if unconfirmed { "*".into() } else { String::new() },
        ];
        if verbose {
            row.push(
                item.get("address")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            );
            row.push(confirmations.to_string());
        }
        rows.push(row);
    }

    print_columns(&rows, " ");
    Ok(())
}

pub fn list_accounts(daemon: &Daemon) -> Result<()> {
    let accounts = daemon.list_accounts()?;
    let Some(map) = accounts.as_object() else {
        return Ok(());
    };
    let rows: Vec<(String, String)> = map
        .iter()
        .map(|(account, balance)| (account.clone(), display_value(balance)))
        .collect();
    cointools_cli::output::print_pairs(&rows);
    Ok(())
}

pub fn list_received(daemon: &Daemon) -> Result<()> {
    let received = daemon.list_received()?;
    let rows: Vec<(String, String)> = received
        .iter()
        .map(|item| {
            (
                item.get("account")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                item.get("amount")
                    .map(display_value)
                    .unwrap_or_default(),
            )
        })
        .collect();
    cointools_cli::output::print_pairs(&rows);
    Ok(())
}

pub fn by_account(profile: &CoinProfile, daemon: &Daemon, account: &str) -> Result<()> {
    if wallet_dump_is_csv(profile) {
        // Single-address client; only dumpwallet knows them all.
        println!("{}", daemon.account_address(account)?);
    } else {
        for address in daemon.addresses_by_account(account)? {
            println!("{address}");
        }
    }
    Ok(())
}

pub fn peers(daemon: &Daemon) -> Result<()> {
    // The address list carries occasional duplicate IPs.
    let mut ips = BTreeSet::new();
    for peer in daemon.peer_info()? {
        if let Some(addr) = peer.get("addr").and_then(Value::as_str) {
            ips.insert(addr.split(':').next().unwrap_or(addr).to_string());
        }
    }
    for ip in ips {
        println!("{ip}");
    }
    Ok(())
}

/// Chains whose amounts travel as extended-precision strings.
pub fn uses_ep_amounts(profile: &CoinProfile) -> bool {
    profile.name == "cryptonite"
}

/// Chains whose wallet dump is CSV with a single wallet address.
fn wallet_dump_is_csv(profile: &CoinProfile) -> bool {
    profile.name == "vcash"
}

fn tx_amount(item: &Value) -> f64 {
    match item.get("amount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_ep(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn tx_time(item: &Value) -> String {
    let secs = item.get("time").and_then(Value::as_i64).unwrap_or(0);
    match Local.timestamp_opt(secs, 0).single() {
        Some(time) => time.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => secs.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
