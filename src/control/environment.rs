use crate::config::EnvironmentConfig;
use crate::constants::{CELSIUS_TO_KELVIN, HECTOPASCAL, SPECIFIC_GAS_CONSTANT_AIR};
use crate::control::planet::Planet;
use crate::errors::Result;

/// Atmospheric state at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtmosphericConditions {
    pub pressure: f64, // hPa
    pub density: f64,  // kg/m³
    pub gravity: f64,  // m/s²
}

/// Isothermal atmosphere over a spherical planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub planet: Planet,
    pub sea_level_pressure: f64, // hPa
    pub temperature: f64,        // °C
    pub universal_gas_constant: f64,
    pub molar_mass: f64,
}

impl Environment {
    pub fn new(config: &EnvironmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Environment {
            planet: Planet::from_config(config),
            sea_level_pressure: config.sea_level_pressure,
            temperature: config.temperature,
            universal_gas_constant: config.universal_gas_constant,
            molar_mass: config.molar_mass,
        })
    }

    /// Barometric formula with gravity taken at sea level.
    pub fn pressure_at_altitude(&self, altitude: f64) -> f64 {
        let g0 = self.planet.surface_gravity();
        let exponent = -g0 * self.molar_mass * altitude
            / (self.universal_gas_constant * (self.temperature + CELSIUS_TO_KELVIN));
        self.sea_level_pressure * exponent.exp()
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        self.planet.gravity_at_altitude(altitude)
    }

    pub fn conditions_at(&self, altitude: f64) -> AtmosphericConditions {
        let pressure = self.pressure_at_altitude(altitude);
        AtmosphericConditions {
            pressure,
            density: density_from_pressure(pressure, self.temperature),
            gravity: self.gravity_at_altitude(altitude),
        }
    }
}

/// Ideal-gas density of dry air from pressure in hPa and temperature in °C.
pub fn density_from_pressure(pressure: f64, temperature: f64) -> f64 {
    pressure * HECTOPASCAL / (SPECIFIC_GAS_CONSTANT_AIR * (temperature + CELSIUS_TO_KELVIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn standard() -> Environment {
        Environment::new(&EnvironmentConfig::default()).unwrap()
    }

    #[test]
    fn test_sea_level_conditions() {
        let conditions = standard().conditions_at(0.0);
        assert_relative_eq!(conditions.pressure, 1013.25);
        assert_abs_diff_eq!(conditions.density, 1.225, epsilon = 1e-3);
        assert_abs_diff_eq!(conditions.gravity, 9.7969, epsilon = 1e-4);
    }

    #[test]
    fn test_pressure_at_altitude_matches_barometric_formula() {
        let env = standard();
        let g0 = env.planet.surface_gravity();
        let exponent = -g0 * env.molar_mass * 4_000.0 / (env.universal_gas_constant * 288.15);
        let expected = 1013.25 * exponent.exp();
        assert_relative_eq!(env.pressure_at_altitude(4_000.0), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(env.pressure_at_altitude(4_000.0), 630.9, epsilon = 0.1);
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let env = standard();
        let low = env.conditions_at(100.0).density;
        let high = env.conditions_at(10_000.0).density;
        assert!(high < low);
        assert!(high > 0.0);
    }

    #[test]
    fn test_density_from_pressure() {
        assert_relative_eq!(
            density_from_pressure(1000.0, 0.0),
            100_000.0 / (287.058 * 273.15)
        );
    }

    #[test]
    fn test_vacuum_has_no_density() {
        let env = Environment::new(&EnvironmentConfig {
            sea_level_pressure: 0.0,
            ..EnvironmentConfig::default()
        })
        .unwrap();
        assert_eq!(env.conditions_at(500.0).density, 0.0);
    }

    #[test]
    fn test_absolute_zero_rejected_at_construction() {
        let result = Environment::new(&EnvironmentConfig {
            temperature: -300.0,
            ..EnvironmentConfig::default()
        });
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }
}
