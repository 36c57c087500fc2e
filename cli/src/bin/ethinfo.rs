//! `ethinfo` — Ethereum-family daemon query and send tool
//!
//! Mainline pays a fixed reward, classic a decaying one; both use
//! `block_time = difficulty / hashrate`. Sends go through an unlocked
//! daemon account, and `--lastsend` forwards a fraction of newly
//! received funds using a balance checkpoint file in the keystore.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use cointools_cli::output::{print_pairs, print_report};
use cointools_rpc::config::home_path;
use cointools_rpc::ethereum::Daemon;
use cointools_rpc::{difflog, PriceFeed};
use economics::{block_reward, CoinProfile, Registry};

#[derive(Parser)]
#[command(name = "ethinfo")]
#[command(about = "Query Ethereum daemons", version)]
struct Cli {
    /// Connect to the classic chain
    #[arg(short, long)]
    classic: bool,

    /// Daemon URL
    #[arg(short, long, default_value = "http://localhost:8545")]
    url: String,

    /// Index of the local account, 0 = coinbase
    #[arg(short, long, default_value_t = -1)]
    account_id: i64,

    /// Base currency for coin and kWh prices
    #[arg(long, default_value = "EUR")]
    basecur: String,

    /// Set difficulty manually for mining estimation
    #[arg(short, long, default_value_t = 0.0)]
    diff: f64,

    /// Hashes/sec from external miners
    #[arg(short = 'r', long, default_value_t = 0.0)]
    hashrate: f64,

    /// Send `ADDRESS AMOUNT`; the account must be unlocked
    #[arg(short, long, num_args = 2, value_names = ["ADDRESS", "AMOUNT"])]
    sendto: Option<Vec<String>>,

    /// Send a fraction of newly received funds to this address
    #[arg(short, long)]
    lastsend: Option<String>,

    /// Fraction of new income for lastsend
    #[arg(short, long, default_value_t = 0.5)]
    fraction: f64,

    /// Lower limit for a lastsend transfer
    #[arg(short, long, default_value_t = 1.0)]
    minsend: f64,

    /// Power usage of the miners, for the cost rows
    #[arg(short = 'W', long)]
    watts: Option<f64>,

    /// Electricity price per kWh, for the cost rows
    #[arg(short = 'w', long)]
    kwh_price: Option<f64>,

    #[arg(short, long)]
    verbose: bool,
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

    let registry = Registry::builtin()?;
    let coin = if cli.classic {
        "ethereum-classic"
    } else {
        "ethereum"
    };
    let profile = registry.get(coin)?;

    let daemon = Daemon::connect(&cli.url)?;

    let accounts = daemon.accounts()?;
    let mut balances = Vec::new();
    for address in &accounts {
        balances.push(daemon.balance(address)?);
    }
    let total_balance: f64 = balances.iter().sum();

    let height = daemon.block_number()?;
    let chain_difficulty = daemon.latest_difficulty()?;
    let reward = block_reward(profile, chain_difficulty, height)?;

    if cli.account_id >= 0 {
        let from = accounts
            .get(cli.account_id as usize)
            .with_context(|| format!("no local account #{}", cli.account_id))?;

        if let Some(args) = &cli.sendto {
            let amount: f64 = args[1].parse().context("amount must be a number")?;
            return send(profile, &daemon, from, &args[0], amount);
        }
        if let Some(to) = &cli.lastsend {
            return lastsend(profile, &daemon, from, to, cli.fraction, cli.minsend);
        }
    }

    let hashrate = if cli.hashrate > 0.0 {
        cli.hashrate
    } else {
        daemon.hashrate()?
    };

    let mut rows = vec![
        ("hashrate".to_string(), format!("{hashrate}")),
        ("blocks".to_string(), height.to_string()),
        ("difficulty".to_string(), format!("{chain_difficulty}")),
        ("peers".to_string(), daemon.peer_count()?.to_string()),
        ("blockreward".to_string(), format!("{reward}")),
        ("total balance".to_string(), format!("{total_balance}")),
    ];
    for (i, balance) in balances.iter().enumerate() {
        rows.push((format!("balance {i}"), format!("{balance}")));
    }
    if cli.account_id >= 0 {
        if let Some(address) = accounts.get(cli.account_id as usize) {
            rows.push((format!("account {} address", cli.account_id), address.clone()));
        }
    }

    // Both chains share the mainline difficulty log.
    let mean_diff = difflog::mean_difficulty(registry.get("ethereum")?, chain_difficulty);
    if let Some(md) = mean_diff {
        rows.push(("meandiff".to_string(), format!("{md}")));
    }

    print_pairs(&rows);

    let price_feed = PriceFeed::new()?;
    let mut fiat_price = 0.0;
    if cli.verbose {
        fiat_price = price_feed.coin_price(profile.name, profile.ticker, &cli.basecur);
        if fiat_price > 0.0 {
            println!("\nYour balance represents about");
            println!(
                "{} {} (1 {} = {fiat_price} {})",
                fiat_price * total_balance,
                cli.basecur,
                profile.ticker,
                cli.basecur
            );
        }
    }

    if hashrate > 0.0 {
        let difficulty = if cli.diff > 0.0 {
            cli.diff
        } else {
            mean_diff.unwrap_or(chain_difficulty)
        };
        let block_time = difficulty / hashrate;
        let report = economics::profit(
            block_time,
            reward,
            profile.ticker,
            cli.watts.unwrap_or(0.0),
            cli.kwh_price.unwrap_or(0.0),
            fiat_price,
            &cli.basecur,
            || price_feed.coin_price(profile.name, profile.ticker, &cli.basecur),
        );
        println!();
        print_report(&report);
    }

    Ok(())
}

fn balance_checkpoint(profile: &CoinProfile, from: &str) -> PathBuf {
    home_path(&format!("{}/keystore/{from}.balance", profile.daemon_dir()))
}

fn send(profile: &CoinProfile, daemon: &Daemon, from: &str, to: &str, amount: f64) -> Result<()> {
    println!(
        "About to send {amount} {} from {from} to {to}",
        profile.ticker
    );
    print!("OK (yes/no)? ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;
    if input.trim() != "yes" {
        return Ok(());
    }

    // The balance won't update until the transaction lands; estimate
    // the checkpoint low to cover fees.
    let balance = daemon.balance(from)? - amount - 0.001;

    let txid = daemon.send_transaction(from, to, amount)?;
    println!("Transaction sent: {txid}");

    let checkpoint = balance_checkpoint(profile, from);
    if let Some(parent) = checkpoint.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    std::fs::write(&checkpoint, format!("{balance}\n"))?;
    Ok(())
}

fn lastsend(
    profile: &CoinProfile,
    daemon: &Daemon,
    from: &str,
    to: &str,
    fraction: f64,
    minsend: f64,
) -> Result<()> {
    let checkpoint = balance_checkpoint(profile, from);
    let old_balance = std::fs::read_to_string(&checkpoint)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let new_balance = daemon.balance(from)?;
    let amount = (new_balance - old_balance) * fraction;

    if amount >= minsend {
        send(profile, daemon, from, to, amount)
    } else {
        println!(
            "Not enough new funds received: got {}, need {}",
            new_balance - old_balance,
            minsend / fraction
        );
        Ok(())
    }
}
