use tracing::trace;

use crate::{
    cohort::Sex,
    count::Count,
    error::{SimError, SimResult},
    table::PopulationTable,
};

use super::FertileWindow;

/// Pairs formed in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarriageOutcome<C> {
    pub same_age: C,
    pub cross_age: C,
}

impl<C: Count> MarriageOutcome<C> {
    pub fn total(&self) -> Option<C> {
        self.same_age.try_add(&self.cross_age)
    }
}

/// Pairs unmarried men and women of fertile age, oldest cohorts first.
///
/// Each cohort first marries within itself, then its leftover singles look
/// for partners up to `max_gap` years younger. Older partners are never
/// considered.
pub struct MarriageSystem {
    window: FertileWindow,
    max_gap: usize,
}

impl MarriageSystem {
    pub fn new(window: FertileWindow, max_gap: usize) -> Self {
        Self { window, max_gap }
    }

    pub fn name(&self) -> &str {
        "marriage"
    }

    pub fn run<C: Count>(&self, table: &mut PopulationTable<C>) -> SimResult<MarriageOutcome<C>> {
        let mut outcome = MarriageOutcome::default();
        for age in self.window.ages_descending(table.max_index()) {
            let same_age = self.pair_same_age(table, age)?;
            outcome.same_age = accumulate(&outcome.same_age, &same_age, age)?;

            for sex in [Sex::Male, Sex::Female] {
                let cross_age = self.pair_younger(table, age, sex)?;
                outcome.cross_age = accumulate(&outcome.cross_age, &cross_age, age)?;
            }
        }
        Ok(outcome)
    }

    fn pair_same_age<C: Count>(&self, table: &mut PopulationTable<C>, age: usize) -> SimResult<C> {
        let cohort = table.cohort(age)?;
        let pairs = cohort
            .unmarried_male
            .clone()
            .min(cohort.unmarried_female.clone());
        if !pairs.is_zero() {
            table.marry(age, Sex::Male, &pairs)?;
            table.marry(age, Sex::Female, &pairs)?;
            trace!(age, %pairs, "same-age marriages");
        }
        Ok(pairs)
    }

    /// Marries leftover singles of `sex` at `age` to singles of the opposite
    /// sex in the `max_gap` younger cohorts, nearest age first.
    fn pair_younger<C: Count>(
        &self,
        table: &mut PopulationTable<C>,
        age: usize,
        sex: Sex,
    ) -> SimResult<C> {
        let partner_sex = sex.opposite();
        let mut formed = C::zero();
        for gap in 1..=self.max_gap {
            let Some(younger) = age.checked_sub(gap) else {
                break;
            };
            if younger < self.window.begin {
                break;
            }
            let seeking = table.cohort(age)?.unmarried(sex).clone();
            if seeking.is_zero() {
                break;
            }
            let available = table.cohort(younger)?.unmarried(partner_sex).clone();
            if available.is_zero() {
                continue;
            }

            let pairs = seeking.min(available);
            table.marry(age, sex, &pairs)?;
            table.marry(younger, partner_sex, &pairs)?;
            trace!(age, younger, ?sex, %pairs, "cross-age marriages");
            formed = accumulate(&formed, &pairs, age)?;
        }
        Ok(formed)
    }
}

fn accumulate<C: Count>(total: &C, pairs: &C, age: usize) -> SimResult<C> {
    total.try_add(pairs).ok_or(SimError::SumOverflow { age })
}
