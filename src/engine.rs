use anyhow::Result;
use num_bigint::BigUint;
use rand::RngCore;
use tracing::{debug, info};

use crate::{
    cohort::Cohort,
    config::Config,
    count::Count,
    error::{SimError, SimResult},
    rng::SimRng,
    snapshot::{PopulationSnapshot, SnapshotWriter},
    systems::{ChildbirthSystem, MarriageOutcome, MarriageSystem, Newborns},
    table::PopulationTable,
};

/// What happened during one year cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary<C> {
    /// Years completed, starting at 1.
    pub year: u64,
    pub marriages: MarriageOutcome<C>,
    pub newborns: Newborns<C>,
    /// Cohort that aged past the maximum age this year.
    pub dropped: Option<Cohort<C>>,
    pub total_population: C,
}

/// Owns the population table and advances it one year at a time.
pub struct Simulator<C = BigUint, R = SimRng> {
    config: Config,
    table: PopulationTable<C>,
    rng: R,
    year: u64,
    marriage: MarriageSystem,
    childbirth: ChildbirthSystem,
    snapshot_writer: Option<SnapshotWriter>,
}

impl<C: Count, R: RngCore> Simulator<C, R> {
    /// Builds the initial table from the configured seed cohort.
    pub fn new(config: Config, rng: R) -> SimResult<Self> {
        config.validate()?;
        let mut table = PopulationTable::with_generations(config.initial_generations);
        let seed = &config.seed_cohort;
        *table.cohort_mut(seed.age)? = Cohort::singles(
            C::from_u64(seed.unmarried_male),
            C::from_u64(seed.unmarried_female),
        );
        Self::with_table(config, table, rng)
    }

    /// Starts from an arbitrary table instead of the seed cohort.
    pub fn with_table(config: Config, table: PopulationTable<C>, rng: R) -> SimResult<Self> {
        config.validate()?;
        if table.len() > config.max_age + 1 {
            return Err(SimError::InvalidConfig(format!(
                "table holds {} cohorts but max_age allows {}",
                table.len(),
                config.max_age + 1
            )));
        }
        Ok(Self {
            marriage: MarriageSystem::new(config.fertile_window(), config.max_marriage_gap),
            childbirth: ChildbirthSystem::new(config.fertile_window(), config.birth_rates()),
            config,
            table,
            rng,
            year: 0,
            snapshot_writer: None,
        })
    }

    pub fn with_snapshot_writer(mut self, writer: SnapshotWriter) -> Self {
        self.snapshot_writer = Some(writer);
        self
    }

    /// Ages the table by one year, then runs marriage and childbirth.
    pub fn advance_year(&mut self) -> SimResult<YearSummary<C>> {
        let dropped = self.table.age_up(self.config.max_age);

        let marriages = self.marriage.run(&mut self.table)?;
        let newborns = self.childbirth.run(&self.table, &mut self.rng)?;
        {
            let infants = self.table.cohort_mut(0)?;
            infants.unmarried_male = newborns.male.clone();
            infants.unmarried_female = newborns.female.clone();
        }

        self.year += 1;
        let total_population = self.table.total_population()?;
        debug!(
            year = self.year,
            %total_population,
            births_male = %newborns.male,
            births_female = %newborns.female,
            dropped = dropped.is_some(),
            "year complete"
        );

        Ok(YearSummary {
            year: self.year,
            marriages,
            newborns,
            dropped,
            total_population,
        })
    }

    pub fn run(&mut self, years: u64) -> Result<()> {
        self.run_with_hook(years, |_| {})
    }

    /// Advances `years` years, calling `hook` after each one. Stops at the
    /// first error.
    pub fn run_with_hook<F>(&mut self, years: u64, mut hook: F) -> Result<()>
    where
        F: FnMut(&YearSummary<C>),
    {
        info!(
            years,
            start_year = self.year,
            cohorts = self.table.len(),
            "simulation starting"
        );
        for _ in 0..years {
            let summary = self.advance_year()?;
            if let Some(writer) = &self.snapshot_writer {
                if let Some(path) = writer.maybe_write(summary.year, &self.table)? {
                    debug!(path = %path.display(), "snapshot written");
                }
            }
            hook(&summary);
        }
        let total_population = self.table.total_population()?;
        info!(year = self.year, %total_population, "simulation finished");
        Ok(())
    }

    pub fn year(&self) -> u64 {
        self.year
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &PopulationTable<C> {
        &self.table
    }

    pub fn population_of_age(&self, age: usize) -> SimResult<C> {
        self.table.population_of_age(age)
    }

    pub fn total_population(&self) -> SimResult<C> {
        self.table.total_population()
    }

    pub fn snapshot(&self) -> SimResult<PopulationSnapshot> {
        PopulationSnapshot::capture(self.year, &self.table)
    }

    pub fn system_names(&self) -> [&str; 2] {
        [self.marriage.name(), self.childbirth.name()]
    }
}
