use rand::Rng;
use tracing::trace;

use crate::{
    cohort::Field,
    count::Count,
    error::{SimError, SimResult},
    rng::RngExt,
    table::PopulationTable,
};

use super::FertileWindow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthRates {
    /// Chance that a married woman gives birth in a year.
    pub fertility_rate: f64,
    /// Chance that a newborn is male.
    pub male_birth_probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Newborns<C> {
    pub male: C,
    pub female: C,
}

impl<C: Count> Newborns<C> {
    pub fn total(&self) -> Option<C> {
        self.male.try_add(&self.female)
    }
}

/// Draws births for every married woman of fertile age.
///
/// Single births only. Each mother takes one draw against the fertility
/// rate and, on a birth, a second draw for the child's sex.
pub struct ChildbirthSystem {
    window: FertileWindow,
    rates: BirthRates,
}

impl ChildbirthSystem {
    pub fn new(window: FertileWindow, rates: BirthRates) -> Self {
        Self { window, rates }
    }

    pub fn name(&self) -> &str {
        "childbirth"
    }

    pub fn run<C, R>(&self, table: &PopulationTable<C>, rng: &mut R) -> SimResult<Newborns<C>>
    where
        C: Count,
        R: Rng,
    {
        let one = C::one();
        let mut newborns = Newborns::default();
        for age in self.window.ages_descending(table.max_index()) {
            let mothers = &table.cohort(age)?.married_female;
            let mut drawn = C::zero();
            while drawn < *mothers {
                if rng.chance(self.rates.fertility_rate) {
                    if rng.chance(self.rates.male_birth_probability) {
                        newborns.male = increment(&newborns.male, &one, Field::UnmarriedMale)?;
                    } else {
                        newborns.female =
                            increment(&newborns.female, &one, Field::UnmarriedFemale)?;
                    }
                }
                drawn = drawn.try_add(&one).ok_or(SimError::Overflow {
                    age,
                    field: Field::MarriedFemale,
                })?;
            }
            trace!(age, %mothers, "childbirth draws complete");
        }
        Ok(newborns)
    }
}

fn increment<C: Count>(count: &C, one: &C, field: Field) -> SimResult<C> {
    count
        .try_add(one)
        .ok_or(SimError::Overflow { age: 0, field })
}
