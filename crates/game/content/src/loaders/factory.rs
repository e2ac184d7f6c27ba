//! Content factory for loading everything an encounter needs from a data directory.

use std::path::{Path, PathBuf};

use lantern_core::BossConfig;
use tracing::debug;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::scenario::Scenario;

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

const EMBEDDED_SCENARIOS: &[(&str, &str)] = &[
    (
        "altar_awakening",
        include_str!("../../data/scenarios/altar_awakening.ron"),
    ),
    ("beam_duel", include_str!("../../data/scenarios/beam_duel.ron")),
    (
        "dark_ambush",
        include_str!("../../data/scenarios/dark_ambush.ron"),
    ),
    (
        "silent_crossing",
        include_str!("../../data/scenarios/silent_crossing.ron"),
    ),
];

/// Content factory that loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     ├── altar_awakening.ron
///     └── beam_duel.ron
/// ```
///
/// The files shipped with this crate are also compiled in, see
/// [`ContentFactory::embedded_config`] and [`ContentFactory::embedded_scenario`].
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load boss configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BossConfig> {
        let path = self.data_dir.join("config.toml");
        debug!(path = %path.display(), "loading boss config");
        ConfigLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        debug!(path = %path.display(), "loading scenario");
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The config shipped with this crate.
    pub fn embedded_config() -> LoadResult<BossConfig> {
        ConfigLoader::from_toml_str(EMBEDDED_CONFIG)
    }

    /// A scenario shipped with this crate, by file stem.
    pub fn embedded_scenario(name: &str) -> LoadResult<Scenario> {
        let (_, content) = EMBEDDED_SCENARIOS
            .iter()
            .find(|(stem, _)| *stem == name)
            .ok_or_else(|| anyhow::anyhow!("No embedded scenario named '{}'", name))?;
        ScenarioLoader::from_ron_str(content)
    }

    /// File stems of the scenarios shipped with this crate.
    pub fn embedded_scenario_names() -> impl Iterator<Item = &'static str> {
        EMBEDDED_SCENARIOS.iter().map(|(stem, _)| *stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(ContentFactory::embedded_config().unwrap(), BossConfig::default());
    }

    #[test]
    fn every_embedded_scenario_parses() {
        for name in ContentFactory::embedded_scenario_names() {
            let scenario = ContentFactory::embedded_scenario(name)
                .unwrap_or_else(|e| panic!("{name}: {e:#}"));
            assert_eq!(scenario.name, name);
        }
        assert!(ContentFactory::embedded_scenario("nope").is_err());
    }

    #[test]
    fn loads_from_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[tuning]\nmax_health = 60.0\n").unwrap();
        fs::create_dir(dir.path().join("scenarios")).unwrap();
        fs::write(
            dir.path().join("scenarios").join("short.ron"),
            r#"(name: "short", seed: 3, player_start: (x: 500.0, y: 400.0), segments: [(ticks: 4)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().tuning.max_health, 60.0);
        assert_eq!(factory.load_scenario("short").unwrap().total_ticks(), 4);
        assert!(factory.load_scenario("missing").is_err());
    }
}
