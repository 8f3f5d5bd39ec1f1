//! Simulation configuration
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes. The defaults reproduce the classic run: 25 couples-to-be aged
//! 19, certain fertility, 210 years.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::{
    error::{SimError, SimResult},
    systems::{BirthRates, FertileWindow},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_fertility_rate")]
    pub fertility_rate: f64,
    #[serde(default = "default_male_birth_probability")]
    pub male_birth_probability: f64,
    #[serde(default = "default_begin_childbirth_age")]
    pub begin_childbirth_age: usize,
    #[serde(default = "default_end_childbirth_age")]
    pub end_childbirth_age: usize,
    #[serde(default = "default_max_age")]
    pub max_age: usize,
    #[serde(default = "default_max_marriage_gap")]
    pub max_marriage_gap: usize,
    #[serde(default = "default_years")]
    pub years: u64,
    #[serde(default = "default_initial_generations")]
    pub initial_generations: usize,
    #[serde(default)]
    pub seed_cohort: SeedCohort,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub integer_width: IntegerWidth,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Singles placed in the initial table before the first year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCohort {
    pub age: usize,
    pub unmarried_male: u64,
    pub unmarried_female: u64,
}

impl Default for SeedCohort {
    fn default() -> Self {
        Self {
            age: 19,
            unmarried_male: 25,
            unmarried_female: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerWidth {
    /// Counts never overflow.
    #[default]
    Arbitrary,
    /// `u64` counts; exceeding them stops the run with an overflow error.
    Fixed64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Zero disables snapshots.
    #[serde(default)]
    pub every_years: u64,
    #[serde(default = "default_snapshot_dir")]
    pub output_dir: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            every_years: 0,
            output_dir: default_snapshot_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    pub fn max_level(&self) -> SimResult<Level> {
        self.level
            .parse()
            .map_err(|_| SimError::InvalidConfig(format!("unknown log level '{}'", self.level)))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_fertility_rate() -> f64 {
    1.0
}

fn default_male_birth_probability() -> f64 {
    0.5
}

fn default_begin_childbirth_age() -> usize {
    20
}

fn default_end_childbirth_age() -> usize {
    60
}

fn default_max_age() -> usize {
    120
}

fn default_max_marriage_gap() -> usize {
    5
}

fn default_years() -> u64 {
    210
}

fn default_initial_generations() -> usize {
    20
}

fn default_random_seed() -> u64 {
    7
}

fn default_snapshot_dir() -> String {
    "snapshots".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fertility_rate: default_fertility_rate(),
            male_birth_probability: default_male_birth_probability(),
            begin_childbirth_age: default_begin_childbirth_age(),
            end_childbirth_age: default_end_childbirth_age(),
            max_age: default_max_age(),
            max_marriage_gap: default_max_marriage_gap(),
            years: default_years(),
            initial_generations: default_initial_generations(),
            seed_cohort: SeedCohort::default(),
            random_seed: default_random_seed(),
            integer_width: IntegerWidth::default(),
            snapshot: SnapshotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(data)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [
            ("fertility_rate", self.fertility_rate),
            ("male_birth_probability", self.male_birth_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }

        if self.begin_childbirth_age >= self.end_childbirth_age {
            return Err(SimError::InvalidConfig(format!(
                "begin_childbirth_age ({}) must be below end_childbirth_age ({})",
                self.begin_childbirth_age, self.end_childbirth_age
            )));
        }

        if self.end_childbirth_age > self.max_age + 1 {
            return Err(SimError::InvalidConfig(format!(
                "end_childbirth_age ({}) exceeds max_age + 1 ({})",
                self.end_childbirth_age,
                self.max_age + 1
            )));
        }

        if self.initial_generations == 0 || self.initial_generations > self.max_age + 1 {
            return Err(SimError::InvalidConfig(format!(
                "initial_generations must be between 1 and {}, got {}",
                self.max_age + 1,
                self.initial_generations
            )));
        }

        if self.seed_cohort.age >= self.initial_generations {
            return Err(SimError::InvalidConfig(format!(
                "seed cohort age {} is outside the initial table of {} generations",
                self.seed_cohort.age, self.initial_generations
            )));
        }

        self.logging.max_level()?;
        Ok(())
    }

    pub fn fertile_window(&self) -> FertileWindow {
        FertileWindow::new(self.begin_childbirth_age, self.end_childbirth_age)
    }

    pub fn birth_rates(&self) -> BirthRates {
        BirthRates {
            fertility_rate: self.fertility_rate,
            male_birth_probability: self.male_birth_probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.fertility_rate, 1.0);
        assert_eq!(config.male_birth_probability, 0.5);
        assert_eq!(config.fertile_window(), FertileWindow::new(20, 60));
        assert_eq!(config.max_age, 120);
        assert_eq!(config.max_marriage_gap, 5);
        assert_eq!(config.years, 210);
        assert_eq!(config.seed_cohort.age, 19);
        assert_eq!(config.integer_width, IntegerWidth::Arbitrary);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml_str(
            "fertility_rate: 0.25\nyears: 12\ninteger_width: fixed64\nsnapshot:\n  every_years: 3\n",
        )
        .unwrap();

        assert_eq!(config.fertility_rate, 0.25);
        assert_eq!(config.years, 12);
        assert_eq!(config.integer_width, IntegerWidth::Fixed64);
        assert_eq!(config.snapshot.every_years, 3);
        assert_eq!(config.snapshot.output_dir, "snapshots");
        assert_eq!(config.max_age, 120);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            random_seed: 1234,
            max_marriage_gap: 3,
            ..Config::default()
        };

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("agepool.yaml");
        config.to_yaml(&path).unwrap();

        let loaded = Config::from_yaml(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_rate = Config {
            fertility_rate: 1.5,
            ..Config::default()
        };
        assert!(matches!(bad_rate.validate(), Err(SimError::InvalidConfig(_))));

        let inverted = Config {
            begin_childbirth_age: 60,
            end_childbirth_age: 20,
            ..Config::default()
        };
        assert!(inverted.validate().is_err());

        let seed_outside = Config {
            initial_generations: 10,
            ..Config::default()
        };
        assert!(seed_outside.validate().is_err());

        let too_long = Config {
            initial_generations: 200,
            ..Config::default()
        };
        assert!(too_long.validate().is_err());

        let noisy = Config {
            logging: LoggingConfig {
                level: "chatty".into(),
            },
            ..Config::default()
        };
        assert!(noisy.validate().is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Config::from_yaml("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
