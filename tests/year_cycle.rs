use agepool::{
    rng::seeded, Cohort, Config, Count, PopulationTable, Sex, SimError, Simulator,
};
use num_bigint::BigUint;

fn config(fertility_rate: f64) -> Config {
    Config {
        fertility_rate,
        ..Config::default()
    }
}

fn table_with(entries: &[(usize, Cohort<u64>)], len: usize) -> PopulationTable<u64> {
    let mut table = PopulationTable::with_generations(len);
    for (age, cohort) in entries {
        *table.cohort_mut(*age).unwrap() = cohort.clone();
    }
    table
}

#[test]
fn founding_cohort_pairs_up_and_gives_birth() {
    let mut sim: Simulator<BigUint> = Simulator::new(config(1.0), seeded(2024)).unwrap();
    assert_eq!(sim.table().len(), 20);

    let summary = sim.advance_year().unwrap();

    let adults = sim.table().cohort(20).unwrap();
    assert_eq!(adults.married_male, BigUint::from(25u32));
    assert_eq!(adults.married_female, BigUint::from(25u32));
    assert!(adults.unmarried_male.is_zero());
    assert!(adults.unmarried_female.is_zero());

    let infants = sim.table().cohort(0).unwrap();
    let births = infants
        .unmarried_male
        .clone()
        + infants.unmarried_female.clone();
    assert_eq!(births, BigUint::from(25u32));
    assert_eq!(summary.newborns.total(), Some(births));
    assert_eq!(sim.total_population().unwrap(), BigUint::from(75u32));
}

#[test]
fn births_are_bounded_by_married_women() {
    let mut sim: Simulator<u64> = Simulator::new(config(0.4), seeded(9)).unwrap();
    let summary = sim.advance_year().unwrap();
    let births = summary.newborns.total().unwrap();
    assert!(births <= 25, "at most one birth per married woman, got {births}");
    assert_eq!(sim.total_population().unwrap(), 50 + births);
}

#[test]
fn every_year_conserves_population() {
    let mut sim: Simulator<u64> = Simulator::new(config(0.2), seeded(5)).unwrap();
    for _ in 0..60 {
        let before = sim.total_population().unwrap();
        let summary = sim.advance_year().unwrap();
        let dropped = summary
            .dropped
            .as_ref()
            .map(|cohort| cohort.total().unwrap())
            .unwrap_or(0);
        let after = sim.total_population().unwrap();
        assert_eq!(after, before - dropped + summary.newborns.total().unwrap());
        assert_eq!(after, summary.total_population);
    }
}

#[test]
fn marriage_never_changes_headcount_by_sex() {
    let table = table_with(
        &[
            (33, Cohort::singles(14, 3)),
            (31, Cohort::singles(2, 9)),
            (29, Cohort::singles(0, 6)),
            (26, Cohort::singles(11, 1)),
            (24, Cohort::singles(0, 12)),
        ],
        40,
    );
    let mut sim = Simulator::with_table(config(0.0), table, seeded(1)).unwrap();
    let before: Vec<_> = sim
        .table()
        .cohorts()
        .map(|c| (c.headcount(Sex::Male), c.headcount(Sex::Female)))
        .collect();

    sim.advance_year().unwrap();

    // Everyone moved up one age; compare each cohort with its younger self.
    let after: Vec<_> = sim
        .table()
        .cohorts()
        .skip(1)
        .map(|c| (c.headcount(Sex::Male), c.headcount(Sex::Female)))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn ages_outside_the_fertile_window_only_shift() {
    let mut old = Cohort::singles(4u64, 4);
    old.married_female = 6;
    old.married_male = 6;
    let table = table_with(&[(5, Cohort::singles(3, 3)), (70, old.clone())], 80);
    let mut sim = Simulator::with_table(config(1.0), table, seeded(8)).unwrap();

    let summary = sim.advance_year().unwrap();

    assert_eq!(*sim.table().cohort(6).unwrap(), Cohort::singles(3, 3));
    assert_eq!(*sim.table().cohort(71).unwrap(), old);
    assert_eq!(summary.newborns.total(), Some(0));
    assert_eq!(summary.marriages.total(), Some(0));
}

#[test]
fn runs_without_births_are_reproducible_for_any_seed() {
    let table = table_with(
        &[
            (18, Cohort::singles(40, 31)),
            (22, Cohort::singles(5, 17)),
            (27, Cohort::singles(23, 2)),
        ],
        30,
    );
    let mut a = Simulator::with_table(config(0.0), table.clone(), seeded(1)).unwrap();
    let mut b = Simulator::with_table(config(0.0), table, seeded(999)).unwrap();
    a.run(25).unwrap();
    b.run(25).unwrap();
    assert_eq!(a.table(), b.table());
    assert_eq!(a.total_population().unwrap(), 118);
}

#[test]
fn fixed_width_counts_report_overflow() {
    let mut cohort = Cohort::singles(1u64, 1);
    cohort.married_female = u64::MAX;
    let table = table_with(&[(24, cohort)], 30);
    let mut sim = Simulator::with_table(config(0.0), table, seeded(1)).unwrap();
    let err = sim.advance_year().unwrap_err();
    assert!(matches!(err, SimError::Overflow { age: 25, .. }), "{err}");
}

#[test]
fn out_of_range_queries_fail() {
    let sim: Simulator<u64> = Simulator::new(config(1.0), seeded(1)).unwrap();
    assert_eq!(
        sim.population_of_age(20),
        Err(SimError::OutOfRange { age: 20, len: 20 })
    );
}
