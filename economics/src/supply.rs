//! Circulating and final supply estimation
//!
//! Integrates the reward schedules over height. Daemon-reported supply
//! figures, when available, override the computed estimate verbatim.

use log::warn;
use serde::Serialize;

use crate::constants::EMISSION_CAP_ATOMIC;
use crate::error::Result;
use crate::profile::{CoinProfile, CustomFormula, RewardRegime};
use crate::reward::exp_decay;
use crate::RewardStairs;

/// Supply figures derived from a reward schedule. Either side is
/// absent when the schedule does not determine it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupplyEstimate {
    pub current: Option<f64>,
    pub max: Option<f64>,
}

/// Supply at `height` for one coin.
///
/// `live_hint` is a total-supply figure already reported by the daemon
/// and takes precedence over the computed estimate; it is never
/// blended with it.
pub fn total_supply(
    profile: &CoinProfile,
    height: u64,
    live_hint: Option<f64>,
) -> Result<SupplyEstimate> {
    let mut est = schedule_supply(profile, height)?;
    if let Some(live) = live_hint {
        est.current = Some(live);
    }
    est.current = est.current.map(|v| clamped(profile, "current", v));
    est.max = est.max.map(|v| clamped(profile, "max", v));
    Ok(est)
}

fn clamped(profile: &CoinProfile, which: &str, value: f64) -> f64 {
    if value < 0.0 {
        warn!(
            "negative {which} supply {value} for {}, profile parameters are inconsistent",
            profile.name
        );
        return 0.0;
    }
    value
}

fn schedule_supply(profile: &CoinProfile, height: u64) -> Result<SupplyEstimate> {
    match &profile.regime {
        Some(RewardRegime::Staircase { stairs }) => Ok(staircase_supply(height, stairs)),
        Some(RewardRegime::Decay {
            initial,
            interval,
            base,
        }) => decay_supply(height, *initial, *interval, *base),
        Some(RewardRegime::Fixed { reward }) => Ok(SupplyEstimate {
            current: Some(height as f64 * reward),
            max: None,
        }),
        // The dust term is a rounding artifact; emission is flat for
        // supply purposes.
        Some(RewardRegime::Custom(CustomFormula::CumulativeSqrt { initial })) => {
            Ok(SupplyEstimate {
                current: Some(height as f64 * initial),
                max: None,
            })
        }
        Some(RewardRegime::Custom(CustomFormula::RampedDecay {
            initial,
            interval,
            base,
            window,
        })) => {
            let mut est = decay_supply(height, *initial, *interval, *base)?;
            est.current = est.current.map(|c| c - ramp_deficit(*initial, *window, height));
            est.max = est.max.map(|m| m - ramp_deficit(*initial, *window, u64::MAX));
            Ok(est)
        }
        // Difficulty-driven schedules don't integrate over height.
        _ => Ok(SupplyEstimate {
            current: None,
            max: None,
        }),
    }
}

fn decay_supply(height: u64, initial: f64, interval: u64, base: f64) -> Result<SupplyEstimate> {
    let reward = exp_decay(initial, height, interval, base)?;
    let full_cycles = height / interval;

    // Geometric series over finished halving cycles, plus the blocks
    // of the current cycle at the current reward.
    let completed =
        (1.0 - base.powf(full_cycles as f64)) / (1.0 - base) * interval as f64 * initial;
    let partial = (height - full_cycles * interval) as f64 * reward;

    Ok(SupplyEstimate {
        current: Some(completed + partial),
        max: Some(interval as f64 / (1.0 - base) * initial),
    })
}

fn staircase_supply(height: u64, stairs: &RewardStairs) -> SupplyEstimate {
    // Step containing `height`; validation pins limits[0] to 0.
    let cycle = stairs
        .limits
        .iter()
        .rposition(|limit| height >= *limit)
        .unwrap_or(0);

    let mut total = 0.0;
    for j in 0..cycle {
        total += (stairs.limits[j + 1] - stairs.limits[j]) as f64 * stairs.rewards[j];
    }
    total += (height - stairs.limits[cycle]) as f64 * stairs.rewards[cycle];

    // A staircase is only exhaustible when its tail pays nothing.
    let max = if stairs.rewards.last() == Some(&0.0) {
        let mut m = 0.0;
        for j in 0..stairs.limits.len() - 1 {
            m += (stairs.limits[j + 1] - stairs.limits[j]) as f64 * stairs.rewards[j];
        }
        Some(m)
    } else {
        None
    };

    SupplyEstimate {
        current: Some(total),
        max,
    }
}

/// Coins the flat-initial geometric baseline overcounts during a
/// linear ramp-up window. The decay interval dwarfs the window, so the
/// baseline reward across the ramp is `initial`; the deficit is the
/// definite sum of `(1 - h/window) * initial` for h below the window.
fn ramp_deficit(initial: f64, window: u64, height: u64) -> f64 {
    let m = height.min(window) as f64;
    let w = window as f64;
    initial * (m - m * (m - 1.0) / (2.0 * w))
}

/// Basic Cryptonote emission estimate: the chain mints toward a
/// 2^64 - 1 atomic-unit cap, and the current reward encodes the
/// remaining emission over the speed divisor. Only an estimate; tail
/// emission is not modeled.
pub fn cryptonote_supply(block_reward: f64, atomic_unit: f64, reward_divisor: f64) -> f64 {
    EMISSION_CAP_ATOMIC * atomic_unit - block_reward * reward_divisor
}

/// Final supply of the coinbase-emission chain: 2^64 - 1 units of 1e-10.
pub const COINBASE_FINAL_SUPPLY: f64 = EMISSION_CAP_ATOMIC * 1e-10;

const COINBASE_REWARD_FACTOR: f64 = 243.1;

/// Reward of the coinbase-emission chain, proportional to the balance
/// still held on the emission account.
pub fn cryptonite_reward(coinbase_balance: f64) -> f64 {
    COINBASE_REWARD_FACTOR * coinbase_balance / COINBASE_FINAL_SUPPLY
}

/// Supply of the coinbase-emission chain: whatever has left the
/// emission account is circulating.
pub fn cryptonite_supply(coinbase_balance: f64) -> SupplyEstimate {
    SupplyEstimate {
        current: Some(COINBASE_FINAL_SUPPLY - coinbase_balance),
        max: Some(COINBASE_FINAL_SUPPLY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Registry;

    #[test]
    fn decay_supply_at_genesis_is_zero() {
        let est = decay_supply(0, 50.0, 210_000, 0.5).unwrap();
        assert_eq!(est.current, Some(0.0));
        assert_eq!(est.max, Some(21_000_000.0));
    }

    #[test]
    fn decay_supply_converges_toward_max() {
        let mut last = 0.0;
        for cycles in 1..40u64 {
            let est = decay_supply(cycles * 210_000, 50.0, 210_000, 0.5).unwrap();
            let current = est.current.unwrap();
            assert!(current >= last, "supply shrank at cycle {cycles}");
            assert!(current <= 21_000_000.0 + 1e-6);
            last = current;
        }
        assert!((last - 21_000_000.0).abs() < 1.0);
    }

    #[test]
    fn fixed_supply_is_linear() {
        let registry = Registry::builtin().unwrap();
        let namecoin = registry.get("namecoin").unwrap();
        let est = total_supply(namecoin, 1_000, None).unwrap();
        assert_eq!(est.current, Some(50_000.0));
        assert_eq!(est.max, None);
    }

    #[test]
    fn staircase_supply_accumulates_steps() {
        let stairs = RewardStairs {
            limits: vec![0, 100, 300],
            rewards: vec![10.0, 5.0, 1.0],
        };
        // 100 blocks at 10, 150 blocks at 5.
        let est = staircase_supply(250, &stairs);
        assert_eq!(est.current, Some(100.0 * 10.0 + 150.0 * 5.0));
        assert_eq!(est.max, None);
    }

    #[test]
    fn terminating_staircase_has_max() {
        let stairs = RewardStairs {
            limits: vec![0, 100, 300],
            rewards: vec![10.0, 5.0, 0.0],
        };
        let est = staircase_supply(50, &stairs);
        assert_eq!(est.max, Some(100.0 * 10.0 + 200.0 * 5.0));
    }

    #[test]
    fn live_hint_overrides_estimate() {
        let registry = Registry::builtin().unwrap();
        let bitcoin = registry.get("bitcoin").unwrap();
        let est = total_supply(bitcoin, 210_000, Some(123.0)).unwrap();
        assert_eq!(est.current, Some(123.0));
        // Max stays computed.
        assert_eq!(est.max, Some(21_000_000.0));
    }

    #[test]
    fn negative_hint_is_clamped() {
        let registry = Registry::builtin().unwrap();
        let bitcoin = registry.get("bitcoin").unwrap();
        let est = total_supply(bitcoin, 0, Some(-5.0)).unwrap();
        assert_eq!(est.current, Some(0.0));
    }

    #[test]
    fn difficulty_driven_schedule_has_no_supply() {
        let registry = Registry::builtin().unwrap();
        let peercoin = registry.get("peercoin").unwrap();
        let est = total_supply(peercoin, 500_000, None).unwrap();
        assert_eq!(est.current, None);
        assert_eq!(est.max, None);
    }

    #[test]
    fn ramp_deficit_caps_at_window() {
        let full = ramp_deficit(12.5, 20_000, u64::MAX);
        assert_eq!(full, ramp_deficit(12.5, 20_000, 20_000));
        // Roughly half the window's flat emission.
        assert!((full - 12.5 * 20_001.0 / 2.0).abs() < 1e-6);
        // Before the window it grows with height.
        assert!(ramp_deficit(12.5, 20_000, 10_000) < full);
    }

    #[test]
    fn ramped_supply_stays_below_plain_decay() {
        let registry = Registry::builtin().unwrap();
        let zcash = registry.get("zcash").unwrap();
        let est = total_supply(zcash, 100_000, None).unwrap();
        let baseline = decay_supply(100_000, 12.5, 840_000, 0.5).unwrap();
        assert!(est.current.unwrap() < baseline.current.unwrap());
        assert!(est.max.unwrap() < baseline.max.unwrap());
    }

    #[test]
    fn cryptonote_estimate_tracks_reward() {
        let atomic = 1e-12;
        let divisor = (1u64 << 20) as f64;
        let supply = cryptonote_supply(0.6, atomic, divisor);
        assert!((supply - (EMISSION_CAP_ATOMIC * atomic - 0.6 * divisor)).abs() < 1e-6);
        // A fully emitted chain approaches the cap.
        assert!(cryptonote_supply(0.0, atomic, divisor) > supply);
    }

    #[test]
    fn coinbase_chain_supply_is_complementary() {
        let est = cryptonite_supply(COINBASE_FINAL_SUPPLY / 2.0);
        assert_eq!(est.current, Some(COINBASE_FINAL_SUPPLY / 2.0));
        assert_eq!(est.max, Some(COINBASE_FINAL_SUPPLY));
        // Reward scales with the remaining emission balance.
        assert!(cryptonite_reward(COINBASE_FINAL_SUPPLY) > cryptonite_reward(1.0));
    }
}
