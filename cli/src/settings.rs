//! Optional user defaults
//!
//! `~/.cointools.toml` carries the values nobody wants to retype per
//! invocation (base currency, rig power draw, electricity price).
//! Command-line flags always win over the file.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub basecur: Option<String>,
    #[serde(default)]
    pub watts: Option<f64>,
    #[serde(default)]
    pub kwh_price: Option<f64>,
}

impl Settings {
    /// A missing file is the common case and reads as all-defaults; a
    /// malformed one is ignored with a warning.
    pub fn load() -> Self {
        Self::load_from(&default_path())
    }

    fn load_from(path: &PathBuf) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring malformed {}: {e}", path.display());
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }
}

fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(".cointools.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_settings() {
        let settings: Settings = toml::from_str("basecur = \"USD\"\nwatts = 650.0\n").unwrap();
        assert_eq!(settings.basecur.as_deref(), Some("USD"));
        assert_eq!(settings.watts, Some(650.0));
        assert_eq!(settings.kwh_price, None);
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let settings = Settings::load_from(&PathBuf::from("/nonexistent/cointools.toml"));
        assert!(settings.basecur.is_none());
    }

    #[test]
    fn malformed_file_reads_as_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "basecur = [not toml").unwrap();
        let settings = Settings::load_from(&file.path().to_path_buf());
        assert!(settings.basecur.is_none());
    }
}
