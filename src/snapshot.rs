use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::SnapshotConfig, count::Count, error::SimResult, table::PopulationTable};

/// Serialisable view of the table. Counts are decimal strings so arbitrary
/// precision values survive JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub year: u64,
    pub generated_at: DateTime<Utc>,
    pub total_population: String,
    pub cohorts: Vec<CohortSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSnapshot {
    pub age: usize,
    pub unmarried_male: String,
    pub unmarried_female: String,
    pub married_male: String,
    pub married_female: String,
}

impl PopulationSnapshot {
    pub fn capture<C: Count>(year: u64, table: &PopulationTable<C>) -> SimResult<Self> {
        let cohorts = table
            .cohorts()
            .enumerate()
            .map(|(age, cohort)| CohortSnapshot {
                age,
                unmarried_male: cohort.unmarried_male.to_string(),
                unmarried_female: cohort.unmarried_female.to_string(),
                married_male: cohort.married_male.to_string(),
                married_female: cohort.married_female.to_string(),
            })
            .collect();
        Ok(Self {
            year,
            generated_at: Utc::now(),
            total_population: table.total_population()?.to_string(),
            cohorts,
        })
    }
}

/// Writes `year_NNNNNN.json` every `every_years` years.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    every_years: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, every_years: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            every_years,
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(&config.output_dir, config.every_years)
    }

    pub fn is_due(&self, year: u64) -> bool {
        self.every_years != 0 && year % self.every_years == 0
    }

    pub fn maybe_write<C: Count>(
        &self,
        year: u64,
        table: &PopulationTable<C>,
    ) -> Result<Option<PathBuf>> {
        if !self.is_due(year) {
            return Ok(None);
        }

        let snapshot = PopulationSnapshot::capture(year, table)?;
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create snapshot dir {}",
                self.output_dir.display()
            )
        })?;
        let path = self.output_dir.join(format!("year_{year:06}.json"));
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(Some(path))
    }
}
