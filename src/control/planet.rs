use crate::config::EnvironmentConfig;
use crate::constants::MIN_RADIAL_DISTANCE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub mass: f64,   // kg
    pub radius: f64, // m
    pub gravitational_constant: f64,
}

impl Planet {
    pub fn new(mass: f64, radius: f64, gravitational_constant: f64) -> Self {
        Planet {
            mass,
            radius,
            gravitational_constant,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Planet::new(
            config.planet_mass,
            config.planet_radius,
            config.gravitational_constant,
        )
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at_altitude(0.0)
    }

    /// Inverse-square gravity. The radial distance is floored at
    /// `MIN_RADIAL_DISTANCE` so altitudes at or below the planet centre stay
    /// finite.
    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        let distance = (self.radius + altitude).max(MIN_RADIAL_DISTANCE);
        self.gravitational_constant * self.mass / distance.powi(2)
    }
}
