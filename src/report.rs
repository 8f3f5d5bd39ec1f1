//! Console rendering of a finished run.

use std::fmt::Write;

use crate::{count::Count, table::PopulationTable};

/// `index` counts from zero.
pub fn finished_year_line(index: u64) -> String {
    format!("Finished year {index}")
}

/// One line per cohort: `age : [um, uf, mm, mf]`.
pub fn render_table<C: Count>(table: &PopulationTable<C>) -> String {
    let mut out = String::new();
    for (age, cohort) in table.cohorts().enumerate() {
        let [um, uf, mm, mf] = cohort.counts();
        // writing to a String cannot fail
        let _ = writeln!(out, "{age:>2} : [{um}, {uf}, {mm}, {mf}]");
    }
    out
}
