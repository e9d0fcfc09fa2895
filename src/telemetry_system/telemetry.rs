use log::info;

use crate::control::guidance::GuidancePhase;
use crate::control::rocket::VehicleState;

/// One row of the flight log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSample {
    pub time: f64,
    pub altitude: f64,
    pub horizontal_position: f64,
    pub vertical_velocity: f64,
    pub horizontal_velocity: f64,
    pub throttle: f64,
    pub mass: f64,
    pub fuel_left: f64,
    pub air_pressure: f64,
    pub attitude_angle: f64,
}

impl FlightSample {
    pub fn from_state(state: &VehicleState) -> Self {
        FlightSample {
            time: state.time,
            altitude: state.altitude(),
            horizontal_position: state.position.x,
            vertical_velocity: state.vertical_velocity(),
            horizontal_velocity: state.velocity.x,
            throttle: state.throttle,
            mass: state.mass,
            fuel_left: state.fuel_remaining(),
            air_pressure: state.forces.atmosphere.pressure,
            attitude_angle: state.attitude_angle,
        }
    }
}

/// Read-only observer of a flight: keeps the per-step log, running extremes
/// and guidance phase changes.
pub struct FlightRecorder {
    pub samples: Vec<FlightSample>,
    max_speed: f64,
    max_acceleration: f64,
    min_altitude: f64,
    min_fuel: f64,
    phase_changes: Vec<(GuidancePhase, f64)>,
}

impl Default for FlightRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightRecorder {
    pub fn new() -> Self {
        FlightRecorder {
            samples: Vec::new(),
            max_speed: 0.0,
            max_acceleration: 0.0,
            min_altitude: f64::INFINITY,
            min_fuel: f64::INFINITY,
            phase_changes: Vec::new(),
        }
    }

    pub fn record(&mut self, state: &VehicleState, phase: GuidancePhase) {
        let sample = FlightSample::from_state(state);

        self.max_speed = self.max_speed.max(state.velocity.magnitude());
        self.max_acceleration = self
            .max_acceleration
            .max(state.forces.acceleration.magnitude());
        self.min_altitude = self.min_altitude.min(sample.altitude);
        self.min_fuel = self.min_fuel.min(sample.fuel_left);

        match self.phase_changes.last() {
            Some((last, _)) if *last == phase => {}
            _ => self.phase_changes.push((phase, state.time)),
        }

        self.samples.push(sample);
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    pub fn min_altitude(&self) -> f64 {
        self.min_altitude
    }

    pub fn min_fuel(&self) -> f64 {
        self.min_fuel
    }

    pub fn phase_changes(&self) -> &[(GuidancePhase, f64)] {
        &self.phase_changes
    }

    pub fn log_summary(&self) {
        info!("--- Flight Summary ---");
        info!("Samples: {}", self.samples.len());
        info!("Max Speed: {:.2} m/s", self.max_speed);
        info!("Max Acceleration: {:.2} m/s²", self.max_acceleration);
        info!("Min Altitude: {}", format_altitude(self.min_altitude));
        info!("Min Fuel: {:.2} kg", self.min_fuel);
        for (phase, time) in &self.phase_changes {
            info!("Guidance {:?} from {}", phase, format_time(*time));
        }
    }
}

pub fn format_time(elapsed_time: f64) -> String {
    if elapsed_time >= 60.0 {
        let minutes = (elapsed_time / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}m {:.2}s", minutes, seconds)
    } else {
        format!("{:.2}s", elapsed_time)
    }
}

pub fn format_altitude(altitude: f64) -> String {
    if altitude >= 1000.0 {
        format!("{:.2} km", altitude / 1000.0)
    } else {
        format!("{:.2} m", altitude)
    }
}
