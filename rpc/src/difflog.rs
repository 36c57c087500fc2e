//! Difficulty-history logs
//!
//! An external cron job appends `timestamp difficulty` lines to a
//! `difflog` file in the daemon's data directory. The file is owned by
//! that job; this module only reads it.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use economics::{estimate_difficulty, CoinProfile, DifficultySample};

use crate::config::home_path;
use crate::error::Result;

/// Logs older than this are stale: difficulty retargets too often for
/// a few-hour-old trend to predict anything.
pub const MAX_LOG_AGE_SECS: u64 = 10_000;

/// Read the sample lines, collapsing duplicates. A missing or stale
/// log reads as no samples.
pub fn read_difficulty_history(path: &Path) -> Result<Vec<DifficultySample>> {
    if !is_fresh(path) {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)?;
    let unique: BTreeSet<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut samples = Vec::new();
    for line in unique {
        let mut fields = line.split_whitespace();
        let (Some(ts), Some(diff)) = (fields.next(), fields.next()) else {
            continue;
        };
        let (Ok(timestamp), Ok(difficulty)) = (ts.parse(), diff.parse()) else {
            continue;
        };
        samples.push(DifficultySample {
            timestamp,
            difficulty,
        });
    }
    Ok(samples)
}

fn is_fresh(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = meta.modified() else {
        return false;
    };
    match modified.elapsed() {
        Ok(age) => age.as_secs() < MAX_LOG_AGE_SECS,
        // A timestamp from the future still counts as fresh.
        Err(_) => true,
    }
}

/// Trend-extrapolated difficulty for the coin, or `None` without a
/// fresh log of at least two distinct samples. The live difficulty
/// joins the history as one more valid data point.
pub fn mean_difficulty(profile: &CoinProfile, current: f64) -> Option<f64> {
    let path = home_path(&format!("{}/difflog", profile.daemon_dir()));
    let mut samples = read_difficulty_history(&path).ok()?;
    if samples.len() < 2 {
        return None;
    }
    let now = unix_now();
    if current > 0.0 {
        samples.push(DifficultySample {
            timestamp: now,
            difficulty: current,
        });
    }
    estimate_difficulty(&samples, now)
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn reads_and_deduplicates_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1000 50.5").unwrap();
        writeln!(file, "2000 60.5").unwrap();
        writeln!(file, "2000 60.5").unwrap();
        writeln!(file, "garbage line").unwrap();
        writeln!(file).unwrap();
        file.flush().unwrap();

        let samples = read_difficulty_history(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, 1000.0);
        assert_eq!(samples[1].difficulty, 60.5);
    }

    #[test]
    fn missing_log_reads_empty() {
        let samples = read_difficulty_history(Path::new("/nonexistent/difflog")).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn stale_log_is_discarded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1000 50.5").unwrap();
        writeln!(file, "2000 60.5").unwrap();
        file.flush().unwrap();

        let old = SystemTime::now() - Duration::from_secs(MAX_LOG_AGE_SECS + 100);
        file.as_file().set_modified(old).unwrap();

        let samples = read_difficulty_history(file.path()).unwrap();
        assert!(samples.is_empty());
    }
}
