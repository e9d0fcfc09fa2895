use crate::config::VehicleConfig;
use crate::utils::vector2d::Vector2D;

/// Single throttleable engine feeding from one tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionSystem {
    pub max_thrust: f64, // N
    pub fuel_flow: f64,  // kg/s at full throttle
    pub dry_mass: f64,   // kg
}

impl PropulsionSystem {
    pub fn new(max_thrust: f64, fuel_flow: f64, dry_mass: f64) -> Self {
        PropulsionSystem {
            max_thrust,
            fuel_flow,
            dry_mass,
        }
    }

    pub fn from_config(config: &VehicleConfig) -> Self {
        PropulsionSystem::new(config.max_thrust, config.fuel_flow, config.dry_mass)
    }

    pub fn is_out_of_fuel(&self, mass: f64) -> bool {
        mass <= self.dry_mass
    }

    pub fn fuel_remaining(&self, mass: f64) -> f64 {
        (mass - self.dry_mass).max(0.0)
    }

    pub fn max_acceleration(&self, mass: f64) -> f64 {
        self.max_thrust / mass
    }

    /// Thrust vector for the commanded throttle, tilted `attitude_angle`
    /// degrees from vertical. A dry tank produces no thrust whatever the
    /// command.
    pub fn engine_force(&self, mass: f64, throttle: f64, attitude_angle: f64) -> Vector2D {
        if self.is_out_of_fuel(mass) {
            Vector2D::zero()
        } else {
            Vector2D::from_attitude(attitude_angle, self.max_thrust * throttle)
        }
    }

    /// Mass after burning at `throttle` for `delta_time`. Never drops below
    /// the dry mass.
    pub fn consume(&self, mass: f64, throttle: f64, delta_time: f64) -> f64 {
        if self.is_out_of_fuel(mass) {
            self.dry_mass
        } else {
            (mass - self.fuel_flow * throttle * delta_time).max(self.dry_mass)
        }
    }
}
