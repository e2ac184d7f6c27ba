//! Scenario loader.

use std::path::Path;

use anyhow::{Context, ensure};

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for [`Scenario`] timelines from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::from_ron_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse and check a scenario from RON text.
    pub fn from_ron_str(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::check(&scenario)?;

        Ok(scenario)
    }

    fn check(scenario: &Scenario) -> LoadResult<()> {
        ensure!(!scenario.name.trim().is_empty(), "scenario has no name");
        ensure!(
            !scenario.segments.is_empty(),
            "scenario '{}' has no segments",
            scenario.name
        );
        ensure!(
            scenario.player_start.is_finite(),
            "scenario '{}' has a non-finite player start",
            scenario.name
        );
        if let Some(position) = scenario.boss_position {
            ensure!(
                position.is_finite(),
                "scenario '{}' has a non-finite boss position",
                scenario.name
            );
        }
        if let Some(health) = scenario.boss_health {
            ensure!(
                health.is_finite() && health > 0.0,
                "scenario '{}' boss health must be positive, got {}",
                scenario.name,
                health
            );
        }
        if let Some(battery) = scenario.battery {
            ensure!(
                (0.0..=100.0).contains(&battery),
                "scenario '{}' battery must be within 0..=100, got {}",
                scenario.name,
                battery
            );
        }
        Ok(())
    }
}
