//! Head-count arithmetic for cohort fields.
//!
//! Cohorts are generic over the integer type that stores their counts.
//! [`BigUint`] never overflows and is the default; `u64` is the fixed-width
//! option and reports overflow through `None` from [`Count::try_add`].

use std::fmt;

use num_bigint::BigUint;

pub trait Count: Clone + Ord + Default + fmt::Debug + fmt::Display {
    fn one() -> Self;

    fn from_u64(value: u64) -> Self;

    fn is_zero(&self) -> bool;

    /// `None` when the sum does not fit the count type.
    fn try_add(&self, rhs: &Self) -> Option<Self>;

    /// `None` when `rhs` is larger than `self`.
    fn try_sub(&self, rhs: &Self) -> Option<Self>;

    fn zero() -> Self {
        Self::default()
    }
}

impl Count for BigUint {
    fn one() -> Self {
        BigUint::from(1u32)
    }

    fn from_u64(value: u64) -> Self {
        BigUint::from(value)
    }

    fn is_zero(&self) -> bool {
        self.bits() == 0
    }

    fn try_add(&self, rhs: &Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn try_sub(&self, rhs: &Self) -> Option<Self> {
        if rhs > self {
            None
        } else {
            Some(self - rhs)
        }
    }
}

impl Count for u64 {
    fn one() -> Self {
        1
    }

    fn from_u64(value: u64) -> Self {
        value
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn try_add(&self, rhs: &Self) -> Option<Self> {
        u64::checked_add(*self, *rhs)
    }

    fn try_sub(&self, rhs: &Self) -> Option<Self> {
        u64::checked_sub(*self, *rhs)
    }
}
