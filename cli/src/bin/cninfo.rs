//! `cninfo` — Cryptonote-family daemon query tool
//!
//! The daemon reports the reward itself, so the economics here are
//! the emission-cap supply estimate and the profitability projection;
//! `block_time = difficulty / hashrate` on these chains.

use anyhow::{bail, Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use cointools_cli::output::{print_pairs, print_report};
use cointools_rpc::cryptonote::{Daemon, Wallet};
use cointools_rpc::{difflog, PriceFeed};
use economics::{cryptonote_supply, CoinFamily, Registry};

#[derive(Parser)]
#[command(name = "cninfo")]
#[command(about = "Query Cryptonote coin daemons", version)]
struct Cli {
    /// Coin daemon to connect to
    #[arg(short, long, default_value = "monero")]
    coin: String,

    /// Connect to this URL instead of the local daemon
    #[arg(short, long)]
    url: Option<String>,

    /// Base currency for coin and kWh prices
    #[arg(long, default_value = "EUR")]
    basecur: String,

    /// Set difficulty manually for the mining estimation
    #[arg(short, long)]
    diff: Option<f64>,

    /// Hashes/sec from external miners
    #[arg(short = 'r', long)]
    hashrate: Option<f64>,

    /// Power usage of the miners, for the cost rows
    #[arg(short = 'W', long)]
    watts: Option<f64>,

    /// Electricity price per kWh, for the cost rows
    #[arg(short = 'w', long)]
    kwh_price: Option<f64>,

    /// List the chain's registered address aliases
    #[arg(long)]
    list_aliases: bool,

    /// List recent wallet transfers
    #[arg(short, long)]
    transactions: bool,

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
    let profile = registry.get(&cli.coin)?;
    if profile.family != CoinFamily::Cryptonote {
        bail!("{} is not a Cryptonote coin", profile.name);
    }
    let params = profile
        .cryptonote
        .context("profile carries no emission parameters")?;

    if cli.transactions {
        let wallet = Wallet::connect(profile)?;
        println!("{}", wallet.transfers()?);
        return Ok(());
    }

    let daemon = Daemon::connect(profile, cli.url.as_deref())?;

    if cli.list_aliases {
        let rows = daemon.all_aliases()?;
        print_pairs(&rows);
        return Ok(());
    }

    let header = daemon.last_block_header()?;
    let reward = header.reward_atomic as f64 * params.atomic_unit;
    let difficulty = cli.diff.unwrap_or(header.difficulty);

    let mut rows = vec![
        ("blocks".to_string(), header.height.to_string()),
        ("blockreward".to_string(), format!("{reward}")),
        ("difficulty".to_string(), format!("{difficulty}")),
    ];

    let mean_diff = if cli.diff.is_some() {
        None
    } else {
        difflog::mean_difficulty(profile, difficulty)
    };
    if let Some(md) = mean_diff {
        rows.push(("meandiff".to_string(), format!("{md}")));
    }

    // Basic-scheme estimate; tail emission is not modeled.
    let supply = cryptonote_supply(reward, params.atomic_unit, params.reward_divisor);
    rows.push(("moneysupply".to_string(), format!("{supply}")));

    let price_feed = PriceFeed::new()?;
    let mut fiat_price = 0.0;
    if cli.verbose {
        fiat_price = price_feed.coin_price(profile.name, profile.ticker, &cli.basecur);
        if fiat_price > 0.0 {
            rows.push((format!("{} price", cli.basecur), format!("{fiat_price}")));
        }
    }

    print_pairs(&rows);

    if let Some(hashrate) = cli.hashrate.filter(|rate| *rate > 0.0) {
        let projected = mean_diff.unwrap_or(difficulty);
        let block_time = projected / hashrate;
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
