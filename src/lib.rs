pub mod cohort;
pub mod config;
pub mod count;
pub mod engine;
pub mod error;
pub mod report;
pub mod rng;
pub mod snapshot;
pub mod systems;
pub mod table;

pub use cohort::{Cohort, Field, Sex};
pub use config::Config;
pub use count::Count;
pub use engine::{Simulator, YearSummary};
pub use error::{SimError, SimResult};
pub use table::PopulationTable;
