use std::collections::VecDeque;

use crate::{
    cohort::{Cohort, Field, Sex},
    count::Count,
    error::{SimError, SimResult},
};

/// Cohorts ordered by age; index 0 holds the newborns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationTable<C> {
    cohorts: VecDeque<Cohort<C>>,
}

impl<C: Count> PopulationTable<C> {
    /// Table of `generations` empty cohorts, ages `0..generations`.
    pub fn with_generations(generations: usize) -> Self {
        let cohorts = (0..generations).map(|_| Cohort::empty()).collect();
        Self { cohorts }
    }

    pub fn from_cohorts(cohorts: impl IntoIterator<Item = Cohort<C>>) -> Self {
        Self {
            cohorts: cohorts.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// Oldest age currently represented.
    pub fn max_index(&self) -> Option<usize> {
        self.cohorts.len().checked_sub(1)
    }

    pub fn cohort(&self, age: usize) -> SimResult<&Cohort<C>> {
        let len = self.cohorts.len();
        self.cohorts
            .get(age)
            .ok_or(SimError::OutOfRange { age, len })
    }

    pub fn cohort_mut(&mut self, age: usize) -> SimResult<&mut Cohort<C>> {
        let len = self.cohorts.len();
        self.cohorts
            .get_mut(age)
            .ok_or(SimError::OutOfRange { age, len })
    }

    pub fn cohorts(&self) -> impl Iterator<Item = &Cohort<C>> + '_ {
        self.cohorts.iter()
    }

    /// Shifts every cohort one year older and opens an empty age-0 cohort.
    /// Returns the cohort that aged past `max_age`, if any.
    pub fn age_up(&mut self, max_age: usize) -> Option<Cohort<C>> {
        self.cohorts.push_front(Cohort::empty());
        if self.cohorts.len() > max_age + 1 {
            self.cohorts.remove(max_age + 1)
        } else {
            None
        }
    }

    /// Moves `n` individuals of `sex` at `age` from unmarried to married.
    pub fn marry(&mut self, age: usize, sex: Sex, n: &C) -> SimResult<()> {
        let cohort = self.cohort_mut(age)?;
        let single = Field::unmarried(sex);
        let wed = Field::married(sex);
        let remaining = cohort
            .get(single)
            .try_sub(n)
            .ok_or(SimError::Underflow { age, field: single })?;
        let married = cohort
            .get(wed)
            .try_add(n)
            .ok_or(SimError::Overflow { age, field: wed })?;
        *cohort.get_mut(single) = remaining;
        *cohort.get_mut(wed) = married;
        Ok(())
    }

    pub fn population_of_age(&self, age: usize) -> SimResult<C> {
        self.cohort(age)?
            .total()
            .ok_or(SimError::SumOverflow { age })
    }

    pub fn total_population(&self) -> SimResult<C> {
        let mut total = C::zero();
        for age in 0..self.cohorts.len() {
            let cohort_total = self.population_of_age(age)?;
            total = total
                .try_add(&cohort_total)
                .ok_or(SimError::SumOverflow { age })?;
        }
        Ok(total)
    }
}
