use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use num_bigint::BigUint;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use agepool::{
    config::{Config, IntegerWidth},
    report,
    rng,
    snapshot::SnapshotWriter,
    Count, Simulator,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Age-structured population simulator")]
struct Cli {
    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of years to simulate
    #[arg(long)]
    years: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Store counts in u64 instead of arbitrary precision integers
    #[arg(long)]
    fixed_width: bool,

    /// Directory for yearly JSON snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Write a snapshot every N years (0 disables)
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Log level for diagnostics on stderr
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if self.fixed_width {
            config.integer_width = IntegerWidth::Fixed64;
        }
        if let Some(dir) = &self.snapshot_dir {
            config.snapshot.output_dir = dir.display().to_string();
        }
        if let Some(every) = self.snapshot_every {
            config.snapshot.every_years = every;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_yaml(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.logging.max_level()?)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        years = config.years,
        seed = config.random_seed,
        width = ?config.integer_width,
        "agepool starting"
    );

    match config.integer_width {
        IntegerWidth::Arbitrary => simulate::<BigUint>(config),
        IntegerWidth::Fixed64 => simulate::<u64>(config),
    }
}

fn simulate<C: Count>(config: Config) -> Result<()> {
    let years = config.years;
    let writer = SnapshotWriter::from_config(&config.snapshot);
    let rng = rng::seeded(config.random_seed);
    let mut sim = Simulator::<C, _>::new(config, rng)?.with_snapshot_writer(writer);

    sim.run_with_hook(years, |summary| {
        println!("{}", report::finished_year_line(summary.year - 1));
    })?;

    print!("{}", report::render_table(sim.table()));
    println!("{}", sim.total_population()?);
    Ok(())
}
