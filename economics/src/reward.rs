//! Block reward schedules
//!
//! The generic regimes (fixed, halving decay, staircase) cover most
//! chains; the rest pin their historical payout rules as named closed
//! forms on `CustomFormula`.

use crate::error::{EconomicsError, Result};
use crate::profile::{CoinProfile, CustomFormula, RewardRegime, RewardStairs};

/// Exponential halving/decay reward.
///
/// The cycle index divides by `period - 2`; that is the halving
/// interval convention the historical schedules were computed with and
/// must not be "corrected". The index is clamped to the first cycle so
/// the genesis block pays `initial`.
pub fn exp_decay(initial: f64, blocks: u64, period: u64, base: f64) -> Result<f64> {
    if period <= 2 {
        return Err(EconomicsError::InvalidParameter(format!(
            "decay period must exceed 2, got {period}"
        )));
    }
    let p = (blocks as f64 / (period - 2) as f64).ceil().max(1.0);
    Ok(initial * base.powf(p - 1.0))
}

/// Reward for the staircase step containing `height`: the last
/// threshold not exceeding it. Stairs are validated at profile
/// construction (first limit 0, strictly ascending), so the scan
/// always lands on a step.
pub fn staired_reward(height: u64, stairs: &RewardStairs) -> f64 {
    let mut reward = stairs.rewards[0];
    for (limit, r) in stairs.limits.iter().zip(&stairs.rewards) {
        if height >= *limit {
            reward = *r;
        } else {
            break;
        }
    }
    reward
}

/// Round down to the next cent boundary.
fn floor_cents(hundredths: f64) -> f64 {
    hundredths.floor() / 100.0
}

impl RewardRegime {
    /// Reward at `height` given the instantaneous difficulty.
    pub fn reward(&self, difficulty: f64, height: u64) -> Result<f64> {
        match self {
            RewardRegime::Fixed { reward } => Ok(*reward),
            RewardRegime::Decay {
                initial,
                interval,
                base,
            } => exp_decay(*initial, height, *interval, *base),
            RewardRegime::Staircase { stairs } => Ok(staired_reward(height, stairs)),
            RewardRegime::Custom(formula) => formula.reward(difficulty, height),
        }
    }
}

impl CustomFormula {
    /// Evaluate the closed form. Several of these depend on the live
    /// difficulty rather than the height.
    pub fn reward(&self, difficulty: f64, height: u64) -> Result<f64> {
        match self {
            // sqrt(sqrt(9999^4 / difficulty)), floored to the cent
            CustomFormula::FourthRootDifficulty => {
                Ok(floor_cents(999_900.0 / difficulty.powf(0.25)))
            }
            // 999 / difficulty^2, floored to the cent
            CustomFormula::InverseSquareDifficulty => {
                Ok(floor_cents(99_900.0 / (difficulty * difficulty)))
            }
            CustomFormula::DampedDifficulty => {
                let damped = (difficulty + 2_600.0) / 9.0;
                Ok((2_222_222.0 / (damped * damped)).max(5.0))
            }
            CustomFormula::DifficultyDecay { interval } => {
                exp_decay(difficulty, height, *interval, 0.5)
            }
            CustomFormula::CumulativeSqrt { initial } => {
                Ok(initial + (height as f64 * difficulty * 256.0).sqrt().round() * 1e-8)
            }
            CustomFormula::ForkSchedule { forks } => {
                // Validation guarantees a fork at height 0.
                let fork = forks
                    .iter()
                    .rev()
                    .find(|f| height >= f.from_height)
                    .ok_or_else(|| {
                        EconomicsError::InvalidParameter("empty fork schedule".into())
                    })?;
                exp_decay(fork.initial, height - fork.from_height, fork.interval, fork.base)
            }
            CustomFormula::RampedDecay {
                initial,
                interval,
                base,
                window,
            } => {
                let ramp = (height as f64 / *window as f64).min(1.0);
                Ok(ramp * exp_decay(*initial, height, *interval, *base)?)
            }
        }
    }
}

/// Reward at `height` for a coin with a locally computable schedule.
///
/// Coins whose reward is only reported by the daemon carry no regime;
/// callers use the live figure for those instead.
pub fn block_reward(profile: &CoinProfile, difficulty: f64, height: u64) -> Result<f64> {
    match &profile.regime {
        Some(regime) => regime.reward(difficulty, height),
        None => Err(EconomicsError::InvalidParameter(format!(
            "{} has no local reward schedule",
            profile.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DecayFork;

    #[test]
    fn decay_genesis_pays_initial() {
        assert_eq!(exp_decay(50.0, 0, 210_000, 0.5).unwrap(), 50.0);
        assert_eq!(exp_decay(8_000.0, 0, 10_080, 0.995).unwrap(), 8_000.0);
    }

    #[test]
    fn decay_rejects_degenerate_period() {
        assert!(exp_decay(50.0, 100, 2, 0.5).is_err());
        assert!(exp_decay(50.0, 100, 0, 0.5).is_err());
    }

    #[test]
    fn decay_halves_at_known_heights() {
        // Bitcoin constants; exercises the period - 2 cycle convention
        // at real halving boundaries.
        assert_eq!(exp_decay(50.0, 210_001, 210_000, 0.5).unwrap(), 25.0);
        assert_eq!(exp_decay(50.0, 420_001, 210_000, 0.5).unwrap(), 12.5);
    }

    #[test]
    fn decay_is_non_increasing() {
        let mut last = f64::INFINITY;
        for height in (0..2_000_000).step_by(50_000) {
            let r = exp_decay(50.0, height, 210_000, 0.5).unwrap();
            assert!(r <= last, "reward rose at height {height}");
            last = r;
        }
    }

    fn stairs() -> RewardStairs {
        RewardStairs {
            limits: vec![0, 100_000, 200_000],
            rewards: vec![500_000.0, 250_000.0, 125_000.0],
        }
    }

    #[test]
    fn staircase_steps_at_thresholds() {
        let s = stairs();
        for (i, limit) in s.limits.iter().enumerate() {
            assert_eq!(staired_reward(*limit, &s), s.rewards[i]);
            if i > 0 {
                assert_eq!(staired_reward(limit - 1, &s), s.rewards[i - 1]);
            }
        }
    }

    #[test]
    fn staircase_tail_is_last_reward() {
        assert_eq!(staired_reward(10_000_000, &stairs()), 125_000.0);
    }

    #[test]
    fn fourth_root_difficulty_floors_to_cents() {
        // difficulty 16 -> 999900 / 2 = 499950 hundredths
        let r = CustomFormula::FourthRootDifficulty.reward(16.0, 0).unwrap();
        assert_eq!(r, 4_999.5);
        // An irrational fourth root must round down, not to nearest.
        let r = CustomFormula::FourthRootDifficulty.reward(10.0, 0).unwrap();
        assert_eq!(r, (999_900.0 / 10f64.powf(0.25)).floor() / 100.0);
    }

    #[test]
    fn inverse_square_difficulty() {
        let r = CustomFormula::InverseSquareDifficulty
            .reward(10.0, 0)
            .unwrap();
        assert_eq!(r, 9.99);
    }

    #[test]
    fn damped_difficulty_has_floor() {
        // Very high difficulty bottoms out at the 5-coin floor.
        let r = CustomFormula::DampedDifficulty.reward(1e9, 0).unwrap();
        assert_eq!(r, 5.0);
        // Low difficulty pays above the floor.
        let r = CustomFormula::DampedDifficulty.reward(100.0, 0).unwrap();
        assert!(r > 5.0);
    }

    #[test]
    fn fork_schedule_picks_latest_fork() {
        let formula = CustomFormula::ForkSchedule {
            forks: vec![
                DecayFork {
                    from_height: 0,
                    initial: 512.0,
                    interval: 10_080,
                    base: 0.94,
                },
                DecayFork {
                    from_height: 120_000,
                    initial: 250.0,
                    interval: 1_440,
                    base: 0.9,
                },
                DecayFork {
                    from_height: 150_000,
                    initial: 25.0,
                    interval: 10_080,
                    base: 0.99,
                },
            ],
        };
        // First block of each segment pays that segment's initial.
        assert_eq!(formula.reward(1.0, 0).unwrap(), 512.0);
        assert_eq!(formula.reward(1.0, 120_000).unwrap(), 250.0);
        assert_eq!(formula.reward(1.0, 150_000).unwrap(), 25.0);
    }

    #[test]
    fn ramped_decay_scales_linearly_then_decays() {
        let formula = CustomFormula::RampedDecay {
            initial: 12.5,
            interval: 840_000,
            base: 0.5,
            window: 20_000,
        };
        assert_eq!(formula.reward(1.0, 0).unwrap(), 0.0);
        assert_eq!(formula.reward(1.0, 10_000).unwrap(), 6.25);
        assert_eq!(formula.reward(1.0, 20_000).unwrap(), 12.5);
        // Past the window the ramp factor is pinned at 1.
        assert_eq!(formula.reward(1.0, 30_000).unwrap(), 12.5);
    }

    #[test]
    fn cumulative_sqrt_adds_dust() {
        let formula = CustomFormula::CumulativeSqrt { initial: 25.0 };
        let r = formula.reward(4.0, 100).unwrap();
        let expected = 25.0 + (100.0f64 * 4.0 * 256.0).sqrt().round() * 1e-8;
        assert_eq!(r, expected);
    }
}
