//! Per-coin consensus profiles
//!
//! Every derived figure in this crate is parameterized by a
//! `CoinProfile`. The builtin registry is constructed once at startup
//! and validated before use, so the formula code never re-checks its
//! inputs, and nothing reads coin constants from ambient state.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{EconomicsError, Result};

/// Which daemon dialect the coin speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoinFamily {
    Bitcoin,
    Cryptonote,
    Ethereum,
}

/// Reward staircase: constant rewards over disjoint height ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardStairs {
    /// Ascending step thresholds, first one 0.
    pub limits: Vec<u64>,
    /// Reward paid from the matching threshold up to the next.
    pub rewards: Vec<f64>,
}

/// One segment of a hard-fork decay schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayFork {
    pub from_height: u64,
    pub initial: f64,
    pub interval: u64,
    pub base: f64,
}

/// The closed-form reward functions that don't fit the generic
/// regimes. Each is pinned to the historical payout schedule of its
/// chain; see the match arms in `reward.rs` for the exact formulas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CustomFormula {
    /// Reward falls with the fourth root of difficulty, cent-floored.
    FourthRootDifficulty,
    /// Reward falls with the square of difficulty, cent-floored.
    InverseSquareDifficulty,
    /// Inverse-square of an offset-damped difficulty, with a floor.
    DampedDifficulty,
    /// Halving decay keyed off the live difficulty instead of a
    /// constant initial reward.
    DifficultyDecay { interval: u64 },
    /// Constant base plus a sqrt(height * difficulty) dust term.
    CumulativeSqrt { initial: f64 },
    /// Decay schedule re-based at hard-fork heights; the last segment
    /// at or below the height applies.
    ForkSchedule { forks: Vec<DecayFork> },
    /// Linear ramp over the first `window` blocks, then plain decay.
    RampedDecay {
        initial: f64,
        interval: u64,
        base: f64,
        window: u64,
    },
}

/// How the block reward at a height is determined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RewardRegime {
    /// Constant reward, no halving.
    Fixed { reward: f64 },
    /// Reward multiplied by `base` every `interval` blocks.
    Decay { initial: f64, interval: u64, base: f64 },
    /// Table-driven steps.
    Staircase { stairs: RewardStairs },
    /// Coin-specific closed form.
    Custom(CustomFormula),
}

/// Expected seconds per block for a given difficulty and local rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockTimeModel {
    /// `difficulty * 2^shift / hashrate`
    PowScaled { shift: u32 },
    /// `difficulty / hashrate`
    Direct,
    /// `e^difficulty / hashrate`; prime-chain difficulty is a log scale.
    ExpDifficulty,
    /// The supplied rate is blocks per day, not hashes per second.
    BlocksPerDay,
}

impl BlockTimeModel {
    /// `None` when the rate is unknown or zero.
    pub fn block_time(&self, difficulty: f64, rate: f64) -> Option<f64> {
        if rate <= 0.0 {
            return None;
        }
        Some(match self {
            BlockTimeModel::PowScaled { shift } => {
                difficulty * 2f64.powi(*shift as i32) / rate
            }
            BlockTimeModel::Direct => difficulty / rate,
            BlockTimeModel::ExpDifficulty => difficulty.exp() / rate,
            BlockTimeModel::BlocksPerDay => 86_400.0 / rate,
        })
    }
}

/// Where the local mining rate comes from when not supplied manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashrateSource {
    /// The client exposes no local miner.
    None,
    /// `getmininginfo` `hashespersec`, falling back to `gethashespersec`.
    MiningInfo,
    /// `getmininginfo` `blocksperday`.
    BlocksPerDay,
    /// `getprimespersec`.
    PrimesPerSec,
}

/// Share of the block reward diverted to a development fund.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DevTax {
    None,
    Flat(f64),
    /// `(from_height, percent)` steps, ascending.
    Schedule(Vec<(u64, f64)>),
}

impl DevTax {
    pub fn percent_at(&self, height: u64) -> f64 {
        match self {
            DevTax::None => 0.0,
            DevTax::Flat(pct) => *pct,
            DevTax::Schedule(steps) => steps
                .iter()
                .rev()
                .find(|(from, _)| height >= *from)
                .map(|(_, pct)| *pct)
                .unwrap_or(0.0),
        }
    }

    /// Miner's effective cut of `reward` at `height`.
    pub fn miner_share(&self, reward: f64, height: u64) -> f64 {
        reward * (1.0 - self.percent_at(height) / 100.0)
    }
}

/// Cryptonote emission parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CryptonoteParams {
    /// Value of one atomic unit in whole coins.
    pub atomic_unit: f64,
    /// Emission speed divisor applied to the current reward.
    pub reward_divisor: f64,
}

/// Immutable consensus and connection constants for one coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinProfile {
    pub name: &'static str,
    pub ticker: &'static str,
    pub family: CoinFamily,
    /// `None` when the reward is only available from the daemon
    /// (Cryptonote headers, PoS mint scans, coinbase-proportional).
    pub regime: Option<RewardRegime>,
    pub blocks_per_hour: f64,
    /// 0 = continuous/dynamic difficulty adjustment.
    pub adjust_blocks: u64,
    /// Default daemon RPC port. Kept wide: some clients ship with
    /// out-of-range defaults and expect them verbatim in the URL.
    pub rpc_port: Option<u32>,
    /// Default wallet RPC port, for chains with a separate wallet.
    pub wallet_rpc_port: Option<u32>,
    /// Dot-directory name under $HOME when it differs from `name`.
    pub data_dir: Option<&'static str>,
    /// Daemon exposes RPC without credentials.
    pub no_auth: bool,
    /// `None` when no sensible mining estimate exists for the chain.
    pub block_time: Option<BlockTimeModel>,
    pub hashrate_source: HashrateSource,
    pub cryptonote: Option<CryptonoteParams>,
    pub dev_tax: DevTax,
}

impl CoinProfile {
    /// Home-relative dot-directory of the daemon, e.g. `.bitcoin`.
    pub fn daemon_dir(&self) -> String {
        format!(".{}", self.data_dir.unwrap_or(self.name))
    }

    /// Seconds until the next difficulty retarget; `None` for
    /// continuously adjusting chains.
    pub fn next_adjustment_eta(&self, height: u64) -> Option<f64> {
        if self.adjust_blocks == 0 {
            return None;
        }
        let remaining = self.adjust_blocks - height % self.adjust_blocks;
        Some(remaining as f64 / self.blocks_per_hour * 3_600.0)
    }

    fn validate(&self) -> Result<()> {
        if let Some(regime) = &self.regime {
            validate_regime(self.name, regime)?;
        }
        if self.adjust_blocks > 0 && self.blocks_per_hour <= 0.0 {
            return Err(EconomicsError::InvalidParameter(format!(
                "{}: retargeting chain needs a positive block rate",
                self.name
            )));
        }
        Ok(())
    }
}

fn invalid(coin: &str, reason: &str) -> EconomicsError {
    EconomicsError::InvalidParameter(format!("{coin}: {reason}"))
}

fn validate_decay(coin: &str, interval: u64, base: f64) -> Result<()> {
    if interval <= 2 {
        return Err(invalid(coin, "decay interval must exceed 2"));
    }
    if !(base > 0.0 && base < 1.0) {
        return Err(invalid(coin, "decay base must lie in (0, 1)"));
    }
    Ok(())
}

fn validate_regime(coin: &str, regime: &RewardRegime) -> Result<()> {
    match regime {
        RewardRegime::Fixed { reward } => {
            if *reward < 0.0 {
                return Err(invalid(coin, "fixed reward must not be negative"));
            }
        }
        RewardRegime::Decay { interval, base, .. } => validate_decay(coin, *interval, *base)?,
        RewardRegime::Staircase { stairs } => {
            if stairs.limits.is_empty() {
                return Err(invalid(coin, "empty reward staircase"));
            }
            if stairs.limits.len() != stairs.rewards.len() {
                return Err(invalid(coin, "staircase limit/reward length mismatch"));
            }
            if stairs.limits[0] != 0 {
                return Err(invalid(coin, "staircase must start at height 0"));
            }
            if stairs.limits.windows(2).any(|w| w[0] >= w[1]) {
                return Err(invalid(coin, "staircase thresholds must ascend"));
            }
        }
        RewardRegime::Custom(CustomFormula::DifficultyDecay { interval }) => {
            validate_decay(coin, *interval, 0.5)?
        }
        RewardRegime::Custom(CustomFormula::ForkSchedule { forks }) => {
            if forks.is_empty() {
                return Err(invalid(coin, "empty fork schedule"));
            }
            if forks[0].from_height != 0 {
                return Err(invalid(coin, "fork schedule must start at height 0"));
            }
            if forks.windows(2).any(|w| w[0].from_height >= w[1].from_height) {
                return Err(invalid(coin, "fork heights must ascend"));
            }
            for fork in forks {
                validate_decay(coin, fork.interval, fork.base)?;
            }
        }
        RewardRegime::Custom(CustomFormula::RampedDecay {
            interval,
            base,
            window,
            ..
        }) => {
            validate_decay(coin, *interval, *base)?;
            if *window == 0 {
                return Err(invalid(coin, "ramp window must be positive"));
            }
        }
        RewardRegime::Custom(_) => {}
    }
    Ok(())
}

/// The per-coin profile table, validated at construction.
pub struct Registry {
    coins: HashMap<&'static str, CoinProfile>,
}

impl Registry {
    /// Build and validate the builtin table.
    pub fn builtin() -> Result<Self> {
        let mut coins = HashMap::new();
        for profile in builtin_profiles() {
            profile.validate()?;
            coins.insert(profile.name, profile);
        }
        Ok(Self { coins })
    }

    pub fn get(&self, name: &str) -> Result<&CoinProfile> {
        self.coins
            .get(name)
            .ok_or_else(|| EconomicsError::UnknownCoin(name.to_string()))
    }

    /// Sorted coin names, for help output.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.coins.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn base(name: &'static str, ticker: &'static str) -> CoinProfile {
    CoinProfile {
        name,
        ticker,
        family: CoinFamily::Bitcoin,
        regime: None,
        blocks_per_hour: 60.0,
        adjust_blocks: 0,
        rpc_port: None,
        wallet_rpc_port: None,
        data_dir: None,
        no_auth: false,
        block_time: Some(BlockTimeModel::PowScaled { shift: 32 }),
        hashrate_source: HashrateSource::MiningInfo,
        cryptonote: None,
        dev_tax: DevTax::None,
    }
}

fn decay(initial: f64, interval: u64) -> Option<RewardRegime> {
    Some(RewardRegime::Decay {
        initial,
        interval,
        base: 0.5,
    })
}

fn fixed(reward: f64) -> Option<RewardRegime> {
    Some(RewardRegime::Fixed { reward })
}

fn stairs(limits: &[u64], rewards: &[f64]) -> Option<RewardRegime> {
    Some(RewardRegime::Staircase {
        stairs: RewardStairs {
            limits: limits.to_vec(),
            rewards: rewards.to_vec(),
        },
    })
}

fn builtin_profiles() -> Vec<CoinProfile> {
    const XMR_ATOMIC: f64 = 1e-12;

    vec![
        CoinProfile {
            regime: decay(25.0, 420_000),
            blocks_per_hour: 6.0,
            adjust_blocks: 8,
            rpc_port: Some(12341),
            data_dir: Some("AuroraCoin"),
            ..base("auroracoin", "AUR")
        },
        CoinProfile {
            regime: decay(50.0, 210_000),
            blocks_per_hour: 6.0,
            adjust_blocks: 2016,
            rpc_port: Some(8332),
            hashrate_source: HashrateSource::None,
            ..base("bitcoin", "BTC")
        },
        CoinProfile {
            regime: decay(50.0, 210_000),
            blocks_per_hour: 24.0,
            adjust_blocks: 8064,
            rpc_port: Some(243),
            ..base("blakebitcoin", "BBTC")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::CumulativeSqrt {
                initial: 25.0,
            })),
            blocks_per_hour: 20.0,
            adjust_blocks: 20,
            rpc_port: Some(8772),
            ..base("blakecoin", "BLC")
        },
        CoinProfile {
            regime: decay(88.0, 2_628_000),
            rpc_port: Some(8108),
            ..base("chncoin", "CNC")
        },
        // Emits from a pre-mined coinbase account; both reward and
        // supply need the live coinbase balance.
        CoinProfile {
            rpc_port: Some(8252),
            block_time: Some(BlockTimeModel::PowScaled { shift: 20 }),
            ..base("cryptonite", "XCN")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::DampedDifficulty)),
            blocks_per_hour: 24.0,
            rpc_port: Some(9998),
            ..base("dash", "DASH")
        },
        CoinProfile {
            regime: stairs(
                &[0, 43_201, 744_001, 1_448_001, 2_145_601, 2_846_401],
                &[8.0, 1.25, 0.75, 0.5, 0.25, 0.01],
            ),
            blocks_per_hour: 20.0,
            adjust_blocks: 20,
            rpc_port: Some(74532),
            ..base("dirac", "XDQ")
        },
        CoinProfile {
            regime: stairs(
                &[0, 100_000, 200_000, 300_000, 400_000, 500_000, 600_000],
                &[
                    500_000.0, 250_000.0, 125_000.0, 62_500.0, 31_250.0, 15_625.0, 10_000.0,
                ],
            ),
            rpc_port: Some(22555),
            hashrate_source: HashrateSource::None,
            ..base("dogecoin", "DOGE")
        },
        CoinProfile {
            regime: fixed(700.0),
            adjust_blocks: 100,
            rpc_port: Some(10444),
            ..base("ecoin", "ECN")
        },
        CoinProfile {
            regime: stairs(&[0, 525_600, 1_051_200], &[20.0, 10.0, 5.0]),
            rpc_port: Some(6852),
            ..base("electron", "ELT")
        },
        CoinProfile {
            regime: stairs(&[0, 1_120_706], &[8.0, 4.0]),
            blocks_per_hour: 90.0,
            rpc_port: Some(22621),
            data_dir: Some("ExclusiveCoin"),
            hashrate_source: HashrateSource::None,
            ..base("exclusivecoin", "EXCL")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::DifficultyDecay {
                interval: 420_000,
            })),
            blocks_per_hour: 24.0,
            rpc_port: Some(31397),
            block_time: Some(BlockTimeModel::ExpDifficulty),
            hashrate_source: HashrateSource::PrimesPerSec,
            ..base("gapcoin", "GAP")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::ForkSchedule {
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
            })),
            rpc_port: Some(1441),
            ..base("groestlcoin", "GRS")
        },
        CoinProfile {
            regime: decay(50.0, 840_000),
            blocks_per_hour: 24.0,
            adjust_blocks: 2016,
            rpc_port: Some(9332),
            hashrate_source: HashrateSource::None,
            ..base("litecoin", "LTC")
        },
        CoinProfile {
            regime: stairs(
                &[0, 2_000, 175_000, 350_000, 525_000, 650_000, 800_000, 975_000],
                &[0.48, 48.0, 24.0, 12.0, 6.0, 3.0, 1.5, 1.0],
            ),
            blocks_per_hour: 20.0,
            adjust_blocks: 20,
            rpc_port: Some(12000),
            ..base("lithium", "LIT")
        },
        CoinProfile {
            regime: decay(48.0, 1_051_200),
            blocks_per_hour: 120.0,
            rpc_port: Some(8669),
            ..base("maxcoin", "MAX")
        },
        CoinProfile {
            regime: fixed(50.0),
            blocks_per_hour: 6.0,
            adjust_blocks: 2016,
            rpc_port: Some(8332),
            ..base("namecoin", "NMC")
        },
        // Work-block reward is sqrt(sqrt(9999^4 / difficulty)),
        // rounded down to the cent.
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::FourthRootDifficulty)),
            blocks_per_hour: 6.0,
            rpc_port: Some(9902),
            data_dir: Some("ppcoin"),
            ..base("peercoin", "PPC")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::CumulativeSqrt {
                initial: 32_768.0,
            })),
            blocks_per_hour: 20.0,
            adjust_blocks: 20,
            rpc_port: Some(74532),
            ..base("photon", "PHO")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::InverseSquareDifficulty)),
            rpc_port: Some(9912),
            block_time: Some(BlockTimeModel::BlocksPerDay),
            hashrate_source: HashrateSource::BlocksPerDay,
            ..base("primecoin", "XPM")
        },
        CoinProfile {
            regime: decay(50.0, 100_000),
            blocks_per_hour: 12.0,
            adjust_blocks: 12,
            rpc_port: Some(1218),
            ..base("primio", "Primio")
        },
        // Difficulty measures prime constellations; no hashrate
        // conversion makes sense.
        CoinProfile {
            regime: decay(50.0, 840_000),
            blocks_per_hour: 24.0,
            adjust_blocks: 288,
            rpc_port: Some(28332),
            block_time: None,
            ..base("riecoin", "RIC")
        },
        // Mostly proof of stake; the PoW reward is not meaningful.
        CoinProfile {
            regime: fixed(0.0),
            rpc_port: Some(18812),
            data_dir: Some("ShibeCoin"),
            ..base("shibecoin", "Shibe")
        },
        CoinProfile {
            regime: decay(32.0, 262_800),
            blocks_per_hour: 30.0,
            rpc_port: Some(21230),
            ..base("skeincoin", "SKC")
        },
        CoinProfile {
            regime: decay(500_000.0, 100_000),
            blocks_per_hour: 24.0,
            adjust_blocks: 2,
            rpc_port: Some(5108),
            data_dir: Some("Slothcoin"),
            ..base("slothcoin", "Sloth")
        },
        CoinProfile {
            regime: decay(50.0, 840_000),
            blocks_per_hour: 24.0,
            adjust_blocks: 336,
            rpc_port: Some(9178),
            data_dir: Some("TjcoinV2"),
            ..base("tjcoin", "TJC")
        },
        CoinProfile {
            regime: fixed(0.1),
            blocks_per_hour: 30.0,
            adjust_blocks: 20,
            rpc_port: Some(19738),
            ..base("universalmolecule", "UMO")
        },
        // Reward comes from scanning back to the last proof-of-work
        // block; the daemon runs credential-free RPC.
        CoinProfile {
            blocks_per_hour: 25.0,
            rpc_port: Some(9195),
            data_dir: Some("Vcash"),
            no_auth: true,
            ..base("vcash", "XVC")
        },
        CoinProfile {
            regime: decay(50.0, 840_000),
            blocks_per_hour: 24.0,
            rpc_port: Some(5888),
            ..base("vertcoin", "VTC")
        },
        // 8000 coins per block, reduced by 0.5% every week of blocks.
        CoinProfile {
            regime: Some(RewardRegime::Decay {
                initial: 8_000.0,
                interval: 10_080,
                base: 0.995,
            }),
            rpc_port: Some(22815),
            ..base("virtacoin", "VTA")
        },
        CoinProfile {
            regime: Some(RewardRegime::Custom(CustomFormula::RampedDecay {
                initial: 12.5,
                interval: 840_000,
                base: 0.5,
                window: 20_000,
            })),
            blocks_per_hour: 24.0,
            rpc_port: Some(8232),
            block_time: Some(BlockTimeModel::PowScaled { shift: 13 }),
            hashrate_source: HashrateSource::None,
            ..base("zcash", "ZEC")
        },
        // Cryptonote family
        CoinProfile {
            family: CoinFamily::Cryptonote,
            blocks_per_hour: 15.0,
            rpc_port: Some(11181),
            no_auth: true,
            block_time: Some(BlockTimeModel::Direct),
            hashrate_source: HashrateSource::None,
            cryptonote: Some(CryptonoteParams {
                atomic_unit: XMR_ATOMIC,
                reward_divisor: (1u64 << 18) as f64,
            }),
            ..base("aeon", "AEON")
        },
        CoinProfile {
            family: CoinFamily::Cryptonote,
            blocks_per_hour: 30.0,
            rpc_port: Some(10102),
            wallet_rpc_port: Some(10103),
            data_dir: Some("boolb"),
            no_auth: true,
            block_time: Some(BlockTimeModel::Direct),
            hashrate_source: HashrateSource::None,
            cryptonote: Some(CryptonoteParams {
                atomic_unit: XMR_ATOMIC,
                reward_divisor: (1u64 << 20) as f64,
            }),
            ..base("boolberry", "BBR")
        },
        CoinProfile {
            family: CoinFamily::Cryptonote,
            blocks_per_hour: 30.0,
            rpc_port: Some(18081),
            data_dir: Some("bitmonero"),
            no_auth: true,
            block_time: Some(BlockTimeModel::Direct),
            hashrate_source: HashrateSource::None,
            cryptonote: Some(CryptonoteParams {
                atomic_unit: XMR_ATOMIC,
                reward_divisor: (1u64 << 20) as f64,
            }),
            ..base("monero", "XMR")
        },
        // Ethereum family
        CoinProfile {
            family: CoinFamily::Ethereum,
            regime: fixed(3.0),
            blocks_per_hour: 240.0,
            rpc_port: Some(8545),
            no_auth: true,
            block_time: Some(BlockTimeModel::Direct),
            hashrate_source: HashrateSource::None,
            ..base("ethereum", "ETH")
        },
        CoinProfile {
            family: CoinFamily::Ethereum,
            regime: Some(RewardRegime::Decay {
                initial: 5.0,
                interval: 5_000_000,
                base: 0.8,
            }),
            blocks_per_hour: 240.0,
            rpc_port: Some(8545),
            data_dir: Some("ethereum-classic/mainnet"),
            no_auth: true,
            block_time: Some(BlockTimeModel::Direct),
            hashrate_source: HashrateSource::None,
            ..base("ethereum-classic", "ETC")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_validates() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.get("bitcoin").is_ok());
        assert!(registry.get("monero").is_ok());
        assert!(registry.get("ethereum-classic").is_ok());
    }

    #[test]
    fn unknown_coin_is_an_error() {
        let registry = Registry::builtin().unwrap();
        let err = registry.get("florincoin").unwrap_err();
        assert!(matches!(err, EconomicsError::UnknownCoin(_)));
    }

    #[test]
    fn rejects_non_ascending_stairs() {
        let profile = CoinProfile {
            regime: stairs(&[0, 200, 100], &[3.0, 2.0, 1.0]),
            ..base("brokencoin", "BRK")
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_stairs_not_starting_at_zero() {
        let profile = CoinProfile {
            regime: stairs(&[10, 200], &[3.0, 2.0]),
            ..base("brokencoin", "BRK")
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_decay_interval() {
        let profile = CoinProfile {
            regime: decay(50.0, 2),
            ..base("brokencoin", "BRK")
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn daemon_dir_uses_override() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.get("bitcoin").unwrap().daemon_dir(), ".bitcoin");
        assert_eq!(registry.get("monero").unwrap().daemon_dir(), ".bitmonero");
        assert_eq!(registry.get("peercoin").unwrap().daemon_dir(), ".ppcoin");
    }

    #[test]
    fn next_adjustment_eta_counts_down() {
        let registry = Registry::builtin().unwrap();
        let bitcoin = registry.get("bitcoin").unwrap();
        // 2016-block retarget, 6 blocks per hour.
        let eta = bitcoin.next_adjustment_eta(2000).unwrap();
        assert_eq!(eta, 16.0 / 6.0 * 3_600.0);
        // Continuous adjustment has no ETA.
        assert!(registry.get("vertcoin").unwrap().next_adjustment_eta(2000).is_none());
    }

    #[test]
    fn block_time_models() {
        let pow = BlockTimeModel::PowScaled { shift: 32 };
        assert_eq!(pow.block_time(1.0, 4_294_967_296.0), Some(1.0));
        assert_eq!(pow.block_time(1.0, 0.0), None);

        let direct = BlockTimeModel::Direct;
        assert_eq!(direct.block_time(1_000.0, 10.0), Some(100.0));

        let per_day = BlockTimeModel::BlocksPerDay;
        assert_eq!(per_day.block_time(123.0, 48.0), Some(1_800.0));
    }

    #[test]
    fn dev_tax_schedules() {
        assert_eq!(DevTax::None.percent_at(1_000), 0.0);
        assert_eq!(DevTax::Flat(10.0).miner_share(100.0, 0), 90.0);

        let schedule = DevTax::Schedule(vec![(0, 20.0), (100_000, 10.0), (200_000, 0.0)]);
        assert_eq!(schedule.percent_at(0), 20.0);
        assert_eq!(schedule.percent_at(150_000), 10.0);
        assert_eq!(schedule.percent_at(999_999), 0.0);
    }
}
