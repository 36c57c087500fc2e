use economics::*;

#[test]
fn bitcoin_halving_schedule() {
    let registry = Registry::builtin().unwrap();
    let bitcoin = registry.get("bitcoin").unwrap();

    // Known schedule: 50 at genesis, 25 after the first halving,
    // 12.5 after the second.
    assert_eq!(block_reward(bitcoin, 1e12, 0).unwrap(), 50.0);
    assert_eq!(block_reward(bitcoin, 1e12, 210_001).unwrap(), 25.0);
    assert_eq!(block_reward(bitcoin, 1e12, 420_001).unwrap(), 12.5);

    // 21 million coin cap.
    let est = total_supply(bitcoin, 0, None).unwrap();
    assert_eq!(est.current, Some(0.0));
    assert_eq!(est.max, Some(21_000_000.0));
}

#[test]
fn staircase_coin_schedule() {
    let registry = Registry::builtin().unwrap();
    let dogecoin = registry.get("dogecoin").unwrap();

    assert_eq!(block_reward(dogecoin, 1.0, 0).unwrap(), 500_000.0);
    assert_eq!(block_reward(dogecoin, 1.0, 99_999).unwrap(), 500_000.0);
    assert_eq!(block_reward(dogecoin, 1.0, 100_000).unwrap(), 250_000.0);
    // Open-ended tail step.
    assert_eq!(block_reward(dogecoin, 1.0, 10_000_000).unwrap(), 10_000.0);

    // Supply over one and a half steps.
    let est = total_supply(dogecoin, 150_000, None).unwrap();
    assert_eq!(
        est.current,
        Some(100_000.0 * 500_000.0 + 50_000.0 * 250_000.0)
    );
    assert_eq!(est.max, None);
}

#[test]
fn difficulty_driven_rewards_ignore_height() {
    let registry = Registry::builtin().unwrap();
    let peercoin = registry.get("peercoin").unwrap();

    let at_genesis = block_reward(peercoin, 16.0, 0).unwrap();
    let much_later = block_reward(peercoin, 16.0, 5_000_000).unwrap();
    assert_eq!(at_genesis, much_later);
    assert_eq!(at_genesis, 4_999.5);
}

#[test]
fn daemon_reported_coins_have_no_local_schedule() {
    let registry = Registry::builtin().unwrap();
    let vcash = registry.get("vcash").unwrap();
    assert!(vcash.regime.is_none());
    assert!(block_reward(vcash, 1.0, 100).is_err());
}

#[test]
fn full_profitability_pipeline() {
    let registry = Registry::builtin().unwrap();
    let bitcoin = registry.get("bitcoin").unwrap();

    let height = 420_001;
    let difficulty = 1.0;
    let hashrate = 2f64.powi(32); // one block per second at difficulty 1

    let reward = block_reward(bitcoin, difficulty, height).unwrap();
    let block_time = bitcoin
        .block_time
        .unwrap()
        .block_time(difficulty, hashrate)
        .unwrap();
    assert_eq!(block_time, 1.0);

    let rows = profit(block_time, reward, bitcoin.ticker, 0.0, 0.0, 0.0, "EUR", || 2.0);
    assert_eq!(rows[0].value, "1 s");
    // 12.5 coins per second.
    assert_eq!(rows[1].value, format!("{} BTC/day", 12.5 * 86_400.0));
    assert_eq!(rows[3].value, format!("{} EUR/day", 12.5 * 86_400.0 * 2.0));
}

#[test]
fn mean_difficulty_feeds_the_projection() {
    // A rising difficulty log extrapolates above its last sample.
    let samples = [
        DifficultySample {
            timestamp: 1_000.0,
            difficulty: 100.0,
        },
        DifficultySample {
            timestamp: 2_000.0,
            difficulty: 110.0,
        },
        DifficultySample {
            timestamp: 3_000.0,
            difficulty: 120.0,
        },
    ];
    let est = estimate_difficulty(&samples, 4_000.0).unwrap();
    assert!((est - 130.0).abs() < 1e-9);
}

#[test]
fn cryptonote_family_profile() {
    let registry = Registry::builtin().unwrap();
    let monero = registry.get("monero").unwrap();
    assert_eq!(monero.family, CoinFamily::Cryptonote);

    let params = monero.cryptonote.unwrap();
    let supply = cryptonote_supply(0.6, params.atomic_unit, params.reward_divisor);
    // Remaining emission of 0.6 * 2^20 atomic units short of the cap.
    let cap = u64::MAX as f64 * params.atomic_unit;
    assert!((supply - (cap - 0.6 * 1_048_576.0)).abs() < 1e-3);
}

#[test]
fn dev_tax_reduces_miner_take() {
    let tax = DevTax::Flat(5.0);
    let reward = 50.0;
    assert_eq!(tax.miner_share(reward, 0), 47.5);
}
