//! Coin economics core
//!
//! Pure numeric models shared by the cointools binaries:
//! - Block reward schedules (halving decay, staircases, per-coin closed forms)
//! - Circulating and final supply estimation
//! - Mining profitability projection
//! - Difficulty trend regression
//! - Duration scaling for display
//!
//! Nothing in this crate performs I/O; live chain facts (height,
//! difficulty, hashrate, prices) come in as plain arguments.

pub mod duration;
pub mod error;
pub mod profile;
pub mod profit;
pub mod regression;
pub mod reward;
pub mod supply;

pub use duration::format_duration;
pub use error::{EconomicsError, Result};
pub use profile::{
    BlockTimeModel, CoinFamily, CoinProfile, CryptonoteParams, CustomFormula, DecayFork, DevTax,
    HashrateSource, Registry, RewardRegime, RewardStairs,
};
pub use profit::{profit, ReportRow};
pub use regression::{estimate_difficulty, fit_linear, DifficultySample, LinearFit};
pub use reward::{block_reward, exp_decay, staired_reward};
pub use supply::{
    cryptonite_reward, cryptonite_supply, cryptonote_supply, total_supply, SupplyEstimate,
};

/// Shared numeric constants
pub mod constants {
    /// Seconds in a day
    pub const SECS_PER_DAY: f64 = 86_400.0;

    /// Emission cap of 2^64 - 1 atomic units, shared by the
    /// Cryptonote-style chains.
    pub const EMISSION_CAP_ATOMIC: f64 = u64::MAX as f64;
}
