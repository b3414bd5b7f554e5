//! Advisor configuration that the CLI and orchestrator layer on top of.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Cap K on how many models a candidate plan may materialize at once.
    /// The candidate count grows combinatorially in this, so keep it small.
    pub max_materializations: usize,

    /// Root of the dbt project to inspect; defaults to the working directory.
    pub project_dir: Option<String>,

    /// Profile name to read from `profiles.yml` (overrides the default).
    pub profile: Option<String>,

    /// Target within the profile's outputs (overrides the profile's own choice).
    pub target: Option<String>,

    /// Multiply each model's maintenance fraction into its creation cost.
    /// Off by default; the fraction itself always defaults to neutral (1).
    pub apply_maintenance_fraction: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_materializations: 2,
            project_dir: None,
            profile: None,
            target: None,
            apply_maintenance_fraction: false,
        }
    }
}

impl AdvisorConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `VIEWPICK_MAX_MATERIALIZATIONS`: cap K
    /// - `VIEWPICK_PROJECT_DIR`: dbt project root
    /// - `VIEWPICK_PROFILE`: profile name in profiles.yml
    /// - `VIEWPICK_TARGET`: target within the profile's outputs
    /// - `VIEWPICK_APPLY_MAINTENANCE_FRACTION`: "1"/"true" to enable
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("VIEWPICK_MAX_MATERIALIZATIONS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_materializations = v;
            }
        }

        if let Ok(s) = std::env::var("VIEWPICK_PROJECT_DIR") {
            cfg.project_dir = Some(s);
        }

        if let Ok(s) = std::env::var("VIEWPICK_PROFILE") {
            cfg.profile = Some(s);
        }

        if let Ok(s) = std::env::var("VIEWPICK_TARGET") {
            cfg.target = Some(s);
        }

        if let Ok(s) = std::env::var("VIEWPICK_APPLY_MAINTENANCE_FRACTION") {
            cfg.apply_maintenance_fraction = s == "1" || s.eq_ignore_ascii_case("true");
        }

        cfg
    }

    /// The cap must allow at least one materialization; the enumerator's
    /// contract starts at K = 1.
    pub fn validate(&self) -> Result<()> {
        if self.max_materializations < 1 {
            return Err(Error::Config(format!(
                "max_materializations must be at least 1, got {}",
                self.max_materializations
            )));
        }
        Ok(())
    }
}
