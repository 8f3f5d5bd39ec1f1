use std::fmt;

use serde::{Deserialize, Serialize};

use crate::count::Count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

/// One of the four counts a cohort carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    UnmarriedMale,
    UnmarriedFemale,
    MarriedMale,
    MarriedFemale,
}

impl Field {
    pub fn unmarried(sex: Sex) -> Self {
        match sex {
            Sex::Male => Field::UnmarriedMale,
            Sex::Female => Field::UnmarriedFemale,
        }
    }

    pub fn married(sex: Sex) -> Self {
        match sex {
            Sex::Male => Field::MarriedMale,
            Sex::Female => Field::MarriedFemale,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::UnmarriedMale => "unmarried male",
            Field::UnmarriedFemale => "unmarried female",
            Field::MarriedMale => "married male",
            Field::MarriedFemale => "married female",
        };
        f.write_str(label)
    }
}

/// Everyone of a single age, split by sex and marital status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cohort<C> {
    pub unmarried_male: C,
    pub unmarried_female: C,
    pub married_male: C,
    pub married_female: C,
}

impl<C: Count> Cohort<C> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singles(male: C, female: C) -> Self {
        Self {
            unmarried_male: male,
            unmarried_female: female,
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &C {
        match field {
            Field::UnmarriedMale => &self.unmarried_male,
            Field::UnmarriedFemale => &self.unmarried_female,
            Field::MarriedMale => &self.married_male,
            Field::MarriedFemale => &self.married_female,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut C {
        match field {
            Field::UnmarriedMale => &mut self.unmarried_male,
            Field::UnmarriedFemale => &mut self.unmarried_female,
            Field::MarriedMale => &mut self.married_male,
            Field::MarriedFemale => &mut self.married_female,
        }
    }

    pub fn unmarried(&self, sex: Sex) -> &C {
        self.get(Field::unmarried(sex))
    }

    /// Counts in display order: unmarried male, unmarried female, married
    /// male, married female.
    pub fn counts(&self) -> [&C; 4] {
        [
            &self.unmarried_male,
            &self.unmarried_female,
            &self.married_male,
            &self.married_female,
        ]
    }

    /// Sum of all four counts, `None` on overflow.
    pub fn total(&self) -> Option<C> {
        self.counts()
            .into_iter()
            .try_fold(C::zero(), |acc, count| acc.try_add(count))
    }

    /// Headcount of one sex regardless of marital status.
    pub fn headcount(&self, sex: Sex) -> Option<C> {
        self.get(Field::unmarried(sex))
            .try_add(self.get(Field::married(sex)))
    }
}
