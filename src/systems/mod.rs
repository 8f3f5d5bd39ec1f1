mod childbirth;
mod marriage;

pub use childbirth::{BirthRates, ChildbirthSystem, Newborns};
pub use marriage::{MarriageOutcome, MarriageSystem};

/// Ages `[begin, end)` that take part in marriage and childbirth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FertileWindow {
    pub begin: usize,
    pub end: usize,
}

impl FertileWindow {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn contains(&self, age: usize) -> bool {
        (self.begin..self.end).contains(&age)
    }

    /// Fertile ages present in a table whose oldest index is `max_index`,
    /// oldest first.
    pub fn ages_descending(&self, max_index: Option<usize>) -> impl Iterator<Item = usize> {
        let top = match (max_index, self.end.checked_sub(1)) {
            (Some(max_index), Some(last_fertile)) => Some(max_index.min(last_fertile)),
            _ => None,
        };
        let range = match top {
            Some(top) if top >= self.begin => self.begin..top + 1,
            _ => 0..0,
        };
        range.rev()
    }
}
