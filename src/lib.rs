pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{
    DispersionConfig, DriverConfig, EnvironmentConfig, GuidanceConfig, SimulationConfig,
    VehicleConfig,
};
pub use constants::*;
pub use control::environment::Environment;
pub use control::guidance::{BurnEstimate, GuidanceCommand, GuidanceController, GuidancePhase};
pub use control::landing::{classify_landing, LandingOutcome};
pub use control::planet::Planet;
pub use control::propulsion::PropulsionSystem;
pub use control::rocket::{create_vehicle, ImpactSnapshot, VehicleState};
pub use errors::{Result, SimulationError};

// Re-export the driver
pub use simulation::{run_dispersion, step, FlightReport, Simulation, StepMode};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::forces::ForceBreakdown;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightRecorder, FlightSample};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
