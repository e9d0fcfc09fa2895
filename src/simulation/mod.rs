pub mod clock;
pub mod dispersion;
pub mod runner;

pub use clock::{StepClock, StepMode};
pub use dispersion::{run_dispersion, DispersionRun, DispersionSummary};
pub use runner::{step, FlightReport, Simulation};
