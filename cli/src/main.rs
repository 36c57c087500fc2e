//! `coinfo` — Bitcoin-family daemon query and wallet tool
//!
//! Connects to the local daemon (or a given URL), prints chain and
//! wallet facts, and derives the economics: block reward, supply
//! share, expected block time and mining profitability. Wallet
//! operations ride along as subcommands.

mod wallet;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::Value;

use cointools_cli::output::{print_pairs, print_report};
use cointools_cli::settings::Settings;
use cointools_rpc::bitcoin::Daemon;
use cointools_rpc::{difflog, ChainSnapshot, PriceFeed};
use economics::{
    format_duration, CoinFamily, CoinProfile, Registry, ReportRow, SupplyEstimate,
};

/// Emission account of the coinbase-proportional chain; both its
/// reward and supply derive from this address's remaining balance.
const COINBASE_EMISSION_ADDRESS: &str = "CGTta3M4t3yXu8uRgkKvaWd2d8DQvDPnpL";

#[derive(Parser)]
#[command(name = "coinfo")]
#[command(about = "Query coin daemons: chain facts, rewards, mining economics", version)]
struct Cli {
    /// Coin to connect to
    #[arg(short, long, default_value = "bitcoin")]
    coin: String,

    /// Connect to this URL instead of the local daemon
    #[arg(short, long)]
    url: Option<String>,

    /// Base currency for coin and kWh prices
    #[arg(long)]
    basecur: Option<String>,

    /// Set difficulty manually for the mining calculator
    #[arg(short, long)]
    difficulty: Option<f64>,

    /// Hashes/sec from external miners (blocks per day on block-rate
    /// chains)
    #[arg(short = 'r', long)]
    hashrate: Option<f64>,

    /// Power usage of the miners, for the cost rows
    #[arg(short = 'W', long)]
    watts: Option<f64>,

    /// Electricity price per kWh, for the cost rows
    #[arg(short = 'w', long)]
    kwh_price: Option<f64>,

    /// Print every info key plus balance shares and hashrate shares
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send coins, with duplicate warnings and a typed confirmation
    Send {
        address: String,
        amount: f64,
        /// One-off transaction fee instead of the daemon default
        #[arg(long)]
        txfee: Option<f64>,
    },
    /// Export all private keys with their account labels
    ExportKeys,
    /// Import private keys from an export-formatted file
    ImportKeys { file: PathBuf },
    /// List recent transactions, optionally by account and count
    Transactions {
        account: Option<String>,
        count: Option<u64>,
    },
    /// List accounts with balances
    Accounts,
    /// List totals received by account
    Received,
    /// Get a new address, optionally under an account
    NewAddress { account: Option<String> },
    /// List the addresses of an account
    ByAccount { account: String },
    /// List unique peer addresses
    Peers,
    /// Back up the wallet to a file on the daemon host
    Backup { file: String },
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load();

    let registry = Registry::builtin()?;
    let profile = registry.get(&cli.coin)?;
    if profile.family != CoinFamily::Bitcoin {
        bail!(
            "{} speaks another daemon dialect; use {} instead",
            profile.name,
            match profile.family {
                CoinFamily::Cryptonote => "cninfo",
                _ => "ethinfo",
            }
        );
    }

    let daemon = Daemon::connect(profile, cli.url.as_deref())?;

    match &cli.command {
        Some(Command::Send {
            address,
            amount,
            txfee,
        }) => wallet::send(profile, &daemon, address, *amount, *txfee),
        Some(Command::ExportKeys) => wallet::export_keys(profile, &daemon),
        Some(Command::ImportKeys { file }) => wallet::import_keys(&daemon, file),
        Some(Command::Transactions { account, count }) => {
            wallet::list_transactions(&daemon, account.as_deref(), *count, cli.verbose)
        }
        Some(Command::Accounts) => wallet::list_accounts(&daemon),
        Some(Command::Received) => wallet::list_received(&daemon),
        Some(Command::NewAddress { account }) => {
            println!("{}", daemon.new_address(account.as_deref())?);
            Ok(())
        }
        Some(Command::ByAccount { account }) => wallet::by_account(profile, &daemon, account),
        Some(Command::Peers) => wallet::peers(&daemon),
        Some(Command::Backup { file }) => {
            daemon.backup_wallet(file)?;
            Ok(())
        }
        None => info(&cli, &settings, profile, &daemon),
    }
}

fn info(cli: &Cli, settings: &Settings, profile: &CoinProfile, daemon: &Daemon) -> Result<()> {
    let basecur = cli
        .basecur
        .clone()
        .or_else(|| settings.basecur.clone())
        .unwrap_or_else(|| "EUR".to_string());
    let watts = cli.watts.or(settings.watts).unwrap_or(0.0);
    let kwh_price = cli.kwh_price.or(settings.kwh_price).unwrap_or(0.0);

    let snapshot = daemon.snapshot()?;
    let forced_diff = cli.difficulty.is_some();
    let difficulty = cli.difficulty.unwrap_or(snapshot.difficulty);

    // A manual difficulty is an experiment; don't second-guess it
    // with the history trend.
    let mean_diff = if forced_diff {
        None
    } else {
        difflog::mean_difficulty(profile, difficulty)
    };

    let reward = reward_for(profile, daemon, &snapshot, difficulty)?;

    let hashrate = match cli.hashrate {
        Some(rate) => rate,
        None => daemon.local_hashrate(profile.hashrate_source).unwrap_or(0.0),
    };

    let mut rows: Vec<(String, String)> = Vec::new();
    if cli.verbose {
        if let Some(map) = snapshot.raw.as_object() {
            for (key, value) in map {
                rows.push((key.clone(), display_value(value)));
            }
        }
    } else {
        rows.push(("balance".into(), format!("{}", snapshot.balance)));
        if let Some(testnet) = snapshot.testnet {
            rows.push(("testnet".into(), testnet.to_string()));
        }
    }
    // Some daemons leave difficulty out of the info object.
    if !cli.verbose || snapshot.raw.get("difficulty").is_none() {
        rows.push(("difficulty".into(), format!("{difficulty}")));
    }
    if let Some(md) = mean_diff {
        rows.push(("meandiff".into(), format!("{md}")));
    }
    if cli.verbose {
        // No point echoing a manually supplied rate.
        if cli.hashrate.is_none() {
            let label = match profile.hashrate_source {
                economics::HashrateSource::BlocksPerDay => "blocksperday",
                economics::HashrateSource::PrimesPerSec => "primespersec",
                _ => "hashespersec",
            };
            rows.push((label.into(), format!("{hashrate}")));
        }
        if snapshot.network_hashrate > 0.0 {
            rows.push((
                "networkhashrate".into(),
                format!("{}", snapshot.network_hashrate),
            ));
        }
        if let Some(reward) = reward {
            rows.push(("block reward".into(), format!("{reward} {}", profile.ticker)));
        }
    }
    print_pairs(&rows);

    let price_feed = PriceFeed::new()?;
    let mut fiat_price = 0.0;
    if cli.verbose {
        fiat_price = price_feed.coin_price(profile.name, profile.ticker, &basecur);
        print_balance_share(profile, daemon, &snapshot, fiat_price, &basecur)?;

        if snapshot.network_hashrate > 0.0 && hashrate > 0.0 {
            let share = hashrate / snapshot.network_hashrate;
            println!(
                "\nYour hashrate represents about {} % or 1/{} of the network",
                share * 100.0,
                (1.0 / share).round() as u64
            );
        }
    }

    let mut tail: Vec<ReportRow> = Vec::new();
    if let (Some(model), Some(reward)) = (profile.block_time, reward) {
        let projected_diff = mean_diff.unwrap_or(difficulty);
        if let Some(block_time) = model.block_time(projected_diff, hashrate) {
            let miner_reward = profile.dev_tax.miner_share(reward, snapshot.height);
            tail = economics::profit(
                block_time,
                miner_reward,
                profile.ticker,
                watts,
                kwh_price,
                fiat_price,
                &basecur,
                || price_feed.coin_price(profile.name, profile.ticker, &basecur),
            );
        }
    }
    if !tail.is_empty() {
        println!();
        print_report(&tail);
    }

    if let Some(eta) = profile.next_adjustment_eta(snapshot.height) {
        let (value, unit) = format_duration(eta);
        println!("\nNext difficulty expected in {value} {unit}");
    }

    if !snapshot.errors.is_empty() {
        println!("\n{} {}", "Error".red(), snapshot.errors);
    }

    Ok(())
}

/// Reward from the local schedule, or the daemon-reported figure for
/// the chains that have no computable one. `None` means the row and
/// the profitability report are omitted.
fn reward_for(
    profile: &CoinProfile,
    daemon: &Daemon,
    snapshot: &ChainSnapshot,
    difficulty: f64,
) -> Result<Option<f64>> {
    if profile.regime.is_some() {
        return Ok(Some(economics::block_reward(
            profile,
            difficulty,
            snapshot.height,
        )?));
    }
    match profile.name {
        "cryptonite" => {
            let coinbase = daemon.address_balance(COINBASE_EMISSION_ADDRESS)?;
            Ok(Some(economics::cryptonite_reward(coinbase)))
        }
        "vcash" => Ok(Some(daemon.last_pow_reward(snapshot.height)?)),
        _ => Ok(None),
    }
}

/// What the wallet balance amounts to, against the current and final
/// supply and in fiat. Anything unknowable is left out.
fn print_balance_share(
    profile: &CoinProfile,
    daemon: &Daemon,
    snapshot: &ChainSnapshot,
    fiat_price: f64,
    basecur: &str,
) -> Result<()> {
    let supply = supply_for(profile, daemon, snapshot)?;

    let mut lines = Vec::new();
    if snapshot.balance > 0.0 {
        if let Some(total) = supply.current.filter(|t| *t > 0.0) {
            let share = snapshot.balance / total;
            lines.push(format!(
                "{} % or 1/{} of all current {}",
                share * 100.0,
                (1.0 / share).round() as u64,
                profile.ticker
            ));
        }
        if let Some(max) = supply.max.filter(|m| *m > 0.0) {
            let share = snapshot.balance / max;
            lines.push(format!(
                "{} % or 1/{} of all {} ever",
                share * 100.0,
                (1.0 / share).round() as u64,
                profile.ticker
            ));
        }
    }

    let fiat_balance = fiat_price * snapshot.balance;
    if !lines.is_empty() || fiat_balance > 0.0 {
        println!("\nYour balance represents about");
        if fiat_balance > 0.0 {
            println!(
                "{fiat_balance} {basecur} (1 {} = {fiat_price} {basecur})",
                profile.ticker
            );
        }
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}

fn supply_for(
    profile: &CoinProfile,
    daemon: &Daemon,
    snapshot: &ChainSnapshot,
) -> Result<SupplyEstimate> {
    if profile.name == "cryptonite" {
        let coinbase = daemon.address_balance(COINBASE_EMISSION_ADDRESS)?;
        return Ok(economics::cryptonite_supply(coinbase));
    }
    // Proof-of-stake daemons report their own supply figure.
    let live_hint = snapshot.raw.get("moneysupply").and_then(Value::as_f64);
    Ok(economics::total_supply(profile, snapshot.height, live_hint)?)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
