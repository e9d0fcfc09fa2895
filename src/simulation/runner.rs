use std::time::Duration;

use log::{info, warn};

use crate::{
    config::SimulationConfig,
    control::{
        environment::Environment,
        guidance::{GuidanceController, GuidancePhase},
        landing::{classify_landing, LandingOutcome},
        rocket::{create_vehicle, ImpactSnapshot, VehicleState},
    },
    errors::Result,
    trajectory_system::kinematics::{self, validate_time_step},
};

use super::clock::{StepClock, StepMode};

const REAL_TIME_FRAME_PERIOD: Duration = Duration::from_millis(16);

/// One simulation step: guidance decides the throttle from the pre-step
/// state, then the integrator applies it for `delta_time`. Either the whole
/// step happens or an error is returned and nothing changes.
pub fn step(
    vehicle: &VehicleState,
    controller: &GuidanceController,
    environment: &Environment,
    delta_time: f64,
) -> Result<(VehicleState, GuidanceController)> {
    validate_time_step(delta_time)?;
    if delta_time == 0.0 {
        return Ok((vehicle.clone(), *controller));
    }

    let (command, next_controller) = controller.update(vehicle);
    let next_vehicle = kinematics::step(
        vehicle,
        environment,
        command.throttle,
        command.attitude_angle,
        delta_time,
    )?;

    Ok((next_vehicle, next_controller))
}

/// Summary of a finished (or abandoned) flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightReport {
    pub outcome: LandingOutcome,
    pub impact: Option<ImpactSnapshot>,
    pub flight_time: f64,
    pub fuel_spent: f64,
    pub final_mass: f64,
    pub burn_start_time: Option<f64>,
    pub final_phase: GuidancePhase,
    pub min_altitude: f64,
    pub steps: u64,
}

/// One vehicle, its guidance and the environment it flies in.
pub struct Simulation {
    config: SimulationConfig,
    environment: Environment,
    vehicle: VehicleState,
    controller: GuidanceController,
    clock: StepClock,
    steps: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let environment = Environment::new(&config.environment)?;
        let vehicle = create_vehicle(&config.vehicle, &environment)?;
        let controller = GuidanceController::new(config.guidance)?;
        let clock = StepClock::new(config.driver.mode);

        Ok(Simulation {
            config,
            environment,
            vehicle,
            controller,
            clock,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn controller(&self) -> &GuidanceController {
        &self.controller
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.vehicle.has_impacted() || self.vehicle.time >= self.config.driver.max_time
    }

    /// Advances by `delta_time`. On error the simulation is left untouched.
    pub fn advance(&mut self, delta_time: f64) -> Result<()> {
        let (vehicle, controller) =
            step(&self.vehicle, &self.controller, &self.environment, delta_time).map_err(|e| {
                warn!("Rejected step at t={:.3}s: {}", self.vehicle.time, e);
                e
            })?;

        self.vehicle = vehicle;
        self.controller = controller;
        if delta_time > 0.0 {
            self.steps += 1;
        }
        Ok(())
    }

    /// Puts a fresh, fully fuelled vehicle and an idle controller back at the
    /// initial conditions.
    pub fn restart(&mut self) -> Result<()> {
        self.vehicle = create_vehicle(&self.config.vehicle, &self.environment)?;
        self.controller = GuidanceController::new(self.config.guidance)?;
        self.clock.reset();
        self.steps = 0;
        Ok(())
    }

    pub fn run_to_impact(&mut self) -> Result<FlightReport> {
        self.run_with(|_, _| {})
    }

    /// Steps until impact or `max_time`, calling `observer` after every step.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<FlightReport>
    where
        F: FnMut(&VehicleState, &GuidanceController),
    {
        let real_time = matches!(self.clock.mode(), StepMode::RealTime { .. });
        info!(
            "Running simulation from y = {:.1} m, vy = {:.1} m/s ({:?})",
            self.vehicle.position.y,
            self.vehicle.velocity.y,
            self.clock.mode()
        );

        while !self.is_finished() {
            let delta_time = self.clock.next_interval();
            self.advance(delta_time)?;
            observer(&self.vehicle, &self.controller);

            if real_time {
                std::thread::sleep(REAL_TIME_FRAME_PERIOD);
            }
        }

        if !self.vehicle.has_impacted() {
            warn!(
                "Simulation stopped at t={:.1}s without touchdown",
                self.vehicle.time
            );
        }

        let report = self.report();
        info!(
            "Flight finished: {:?} after {} steps, {:.2} kg fuel spent",
            report.outcome, report.steps, report.fuel_spent
        );
        Ok(report)
    }

    pub fn report(&self) -> FlightReport {
        let driver = &self.config.driver;
        FlightReport {
            outcome: classify_landing(
                &self.vehicle,
                driver.landing_pad_radius,
                driver.max_safe_velocity,
            ),
            impact: self.vehicle.impact,
            flight_time: self.vehicle.time,
            fuel_spent: self.vehicle.fuel_spent(),
            final_mass: self.vehicle.mass,
            burn_start_time: self.controller.burn_start_time(),
            final_phase: self.controller.phase(),
            min_altitude: self.vehicle.min_altitude,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleConfig;
    use crate::errors::SimulationError;

    fn nominal() -> Simulation {
        Simulation::new(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_advance_moves_vehicle_and_counts_steps() {
        let mut sim = nominal();
        sim.advance(0.01).unwrap();
        sim.advance(0.01).unwrap();

        assert_eq!(sim.steps(), 2);
        assert!(sim.vehicle().position.y < 4_000.0);
        assert!((sim.vehicle().time - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_zero_step_changes_nothing() {
        let sim = nominal();
        let (vehicle, controller) =
            step(sim.vehicle(), sim.controller(), sim.environment(), 0.0).unwrap();
        assert_eq!(&vehicle, sim.vehicle());
        assert_eq!(&controller, sim.controller());
    }

    #[test]
    fn test_zero_step_is_not_counted() {
        let mut sim = nominal();
        sim.advance(0.0).unwrap();
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.vehicle().time, 0.0);

        sim.advance(0.01).unwrap();
        sim.advance(0.0).unwrap();
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.report().steps, 1);
    }

    #[test]
    fn test_rejected_step_leaves_simulation_untouched() {
        let mut sim = nominal();
        sim.advance(0.01).unwrap();
        let before = sim.vehicle().clone();

        let result = sim.advance(-0.01);

        assert!(matches!(result, Err(SimulationError::InvalidStep(_))));
        assert_eq!(sim.vehicle(), &before);
        assert_eq!(sim.steps(), 1);
    }

    #[test]
    fn test_restart_restores_initial_conditions() {
        let mut sim = nominal();
        let initial = sim.vehicle().clone();
        sim.run_to_impact().unwrap();
        assert!(sim.vehicle().has_impacted());

        sim.restart().unwrap();

        assert_eq!(sim.vehicle(), &initial);
        assert_eq!(sim.controller().phase(), GuidancePhase::Idle);
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn test_run_stops_at_max_time() {
        let mut config = SimulationConfig::default();
        config.vehicle = VehicleConfig {
            initial_y_velocity: 0.0,
            ..VehicleConfig::default()
        };
        config.driver.max_time = 1.0;
        let mut sim = Simulation::new(config).unwrap();

        let report = sim.run_to_impact().unwrap();

        assert_eq!(report.outcome, LandingOutcome::InFlight);
        assert!(report.impact.is_none());
        assert!(report.flight_time >= 1.0 && report.flight_time < 1.02);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let mut sim = nominal();
        let mut observed = 0u64;
        let report = sim.run_with(|_, _| observed += 1).unwrap();
        assert_eq!(observed, report.steps);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.vehicle.max_thrust = -5.0;
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
