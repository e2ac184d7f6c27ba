//! Headless driver configuration.
use std::env;
use std::path::PathBuf;

/// Scenario run when none is named.
pub const DEFAULT_SCENARIO: &str = "beam_duel";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Content directory; the content compiled into the binary is used when unset.
    pub data_dir: Option<PathBuf>,
    pub scenario: String,
    /// Replaces the scenario's own seed.
    pub seed: Option<u64>,
    /// Also write logs to `lantern.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            scenario: DEFAULT_SCENARIO.to_string(),
            seed: None,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LANTERN_DATA_DIR` - Directory holding `config.toml` and `scenarios/` (default: embedded)
    /// - `LANTERN_SCENARIO` - Scenario file stem (default: `beam_duel`)
    /// - `LANTERN_SEED` - Seed override (default: the scenario's seed)
    /// - `LANTERN_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("LANTERN_DATA_DIR").map(PathBuf::from);
        if let Some(scenario) = lookup("LANTERN_SCENARIO").filter(|s| !s.trim().is_empty()) {
            config.scenario = scenario;
        }
        config.seed = lookup("LANTERN_SEED").and_then(|seed| seed.parse().ok());
        config.log_dir = lookup("LANTERN_LOG_DIR").map(PathBuf::from);

        config
    }
}
