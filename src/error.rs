use thiserror::Error;

use crate::cohort::Field;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("age {age} is outside the population table (length {len})")]
    OutOfRange { age: usize, len: usize },

    #[error("{field} count at age {age} exceeds the capacity of the count type")]
    Overflow { age: usize, field: Field },

    #[error("population sum overflows the count type at age {age}")]
    SumOverflow { age: usize },

    #[error("{field} count at age {age} would drop below zero")]
    Underflow { age: usize, field: Field },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
