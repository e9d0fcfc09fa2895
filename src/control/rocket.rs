use crate::{
    config::VehicleConfig,
    errors::Result,
    trajectory_system::{aerodynamics::Aerodynamics, forces::ForceBreakdown},
    utils::vector2d::Vector2D,
};

use super::{environment::Environment, propulsion::PropulsionSystem};

/// Values frozen at the step the vehicle first reaches the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactSnapshot {
    pub time: f64,     // s
    pub velocity: f64, // m/s, vertical, negative when descending
    pub mass: f64,     // kg
    pub x: f64,        // m
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub propulsion: PropulsionSystem,
    pub aerodynamics: Aerodynamics,
    pub wet_mass: f64,
    pub mass: f64,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub throttle: f64,
    /// Thrust angle from vertical, degrees.
    pub attitude_angle: f64,
    pub time: f64,
    pub impact: Option<ImpactSnapshot>,
    pub min_altitude: f64,
    pub forces: ForceBreakdown,
}

/// Builds a fully fuelled vehicle at the configured initial conditions.
pub fn create_vehicle(
    config: &VehicleConfig,
    environment: &Environment,
) -> Result<VehicleState> {
    config.validate()?;

    let position = Vector2D::new(config.initial_x, config.initial_y);
    let forces = ForceBreakdown {
        atmosphere: environment.conditions_at(position.y),
        ..ForceBreakdown::default()
    };

    Ok(VehicleState {
        propulsion: PropulsionSystem::from_config(config),
        aerodynamics: Aerodynamics::from_config(config),
        wet_mass: config.wet_mass,
        mass: config.wet_mass,
        position,
        velocity: Vector2D::new(config.initial_x_velocity, config.initial_y_velocity),
        throttle: 0.0,
        attitude_angle: 0.0,
        time: 0.0,
        impact: None,
        min_altitude: position.y,
        forces,
    })
}

impl VehicleState {
    pub fn has_impacted(&self) -> bool {
        self.impact.is_some()
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.velocity.y
    }

    pub fn dry_mass(&self) -> f64 {
        self.propulsion.dry_mass
    }

    pub fn fuel_remaining(&self) -> f64 {
        self.propulsion.fuel_remaining(self.mass)
    }

    pub fn fuel_spent(&self) -> f64 {
        self.wet_mass - self.mass
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.propulsion.is_out_of_fuel(self.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;
    use crate::errors::SimulationError;

    fn environment() -> Environment {
        Environment::new(&EnvironmentConfig::default()).unwrap()
    }

    #[test]
    fn test_vehicle_initial_state() {
        let vehicle = create_vehicle(&VehicleConfig::default(), &environment()).unwrap();

        assert_eq!(vehicle.position, Vector2D::new(0.0, 4_000.0));
        assert_eq!(vehicle.velocity, Vector2D::new(0.0, -500.0));
        assert_eq!(vehicle.mass, 200.0);
        assert_eq!(vehicle.dry_mass(), 10.0);
        assert_eq!(vehicle.fuel_remaining(), 190.0);
        assert_eq!(vehicle.fuel_spent(), 0.0);
        assert_eq!(vehicle.throttle, 0.0);
        assert_eq!(vehicle.attitude_angle, 0.0);
        assert_eq!(vehicle.min_altitude, 4_000.0);
        assert!(!vehicle.has_impacted());
        assert!(vehicle.forces.atmosphere.pressure < 1013.25);
    }

    #[test]
    fn test_invalid_vehicle_rejected() {
        let config = VehicleConfig {
            dry_mass: 250.0,
            ..VehicleConfig::default()
        };
        let result = create_vehicle(&config, &environment());
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_vehicle_must_start_above_ground() {
        let config = VehicleConfig {
            initial_y: 0.0,
            initial_y_velocity: 0.0,
            ..VehicleConfig::default()
        };
        assert!(create_vehicle(&config, &environment()).is_err());
    }
}
