use std::{
    env,
    path::{Path, PathBuf},
};

use clap::Parser;
use hoverslam_simulation::{
    run_dispersion, FlightRecorder, LandingOutcome, Simulation, SimulationConfig, StepMode,
    MIN_FRAME_RATE,
};
use log::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Suicide-burn landing simulation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file (TOML). Defaults to config/default.toml when present.
    config: Option<PathBuf>,

    /// Step with the wall clock instead of the fixed simulation frequency.
    #[arg(long)]
    real_time: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            SimulationConfig::load(DEFAULT_CONFIG_PATH)?
        }
        None => {
            info!("No configuration file found, using built-in scenario");
            SimulationConfig::default()
        }
    };
    if args.real_time {
        config.driver.mode = StepMode::RealTime {
            min_frame_rate: MIN_FRAME_RATE,
        };
    }

    let mut simulation = Simulation::new(config.clone())?;
    let mut recorder = FlightRecorder::new();
    let report = simulation.run_with(|vehicle, controller| {
        recorder.record(vehicle, controller.phase());
    })?;
    recorder.log_summary();

    match report.outcome {
        LandingOutcome::Landed => info!("The eagle has landed."),
        LandingOutcome::Crashed => warn!("Rapid unscheduled disassembly."),
        LandingOutcome::InFlight => warn!("Still airborne at the end of the run."),
    }
    if let Some(impact) = report.impact {
        info!(
            "Touchdown at t={:.2}s with {:.2} m/s, {:.2} kg left on board",
            impact.time, impact.velocity, impact.mass
        );
    }

    if let Some(dispersion) = &config.dispersion {
        let summary = run_dispersion(&config, dispersion)?;
        info!(
            "Monte Carlo landing ratio: {:.1}%",
            summary.landed_ratio() * 100.0
        );
    }

    Ok(())
}
