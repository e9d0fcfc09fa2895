//! Scenario configuration: vehicle, environment, guidance tuning and driver
//! settings, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    CELSIUS_TO_KELVIN, GRAVITATIONAL_CONSTANT, LANDING_PAD_RADIUS, MAX_SAFE_TOUCHDOWN_VELOCITY,
    MAX_SIMULATION_TIME, MOLAR_MASS_AIR, PLANET_MASS, PLANET_RADIUS, SEA_LEVEL_PRESSURE,
    SEA_LEVEL_TEMPERATURE, SIMULATION_FREQUENCY, UNIVERSAL_GAS_CONSTANT,
};
use crate::errors::{Result, SimulationError};
use crate::simulation::clock::StepMode;

/// Rocket parameters and initial conditions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub max_thrust: f64,       // N
    pub wet_mass: f64,         // kg
    pub dry_mass: f64,         // kg
    pub fuel_flow: f64,        // kg/s at full throttle
    pub x_surface_area: f64,   // m²
    pub y_surface_area: f64,   // m²
    pub x_drag_coefficient: f64,
    pub y_drag_coefficient: f64,
    pub initial_x: f64,          // m
    pub initial_y: f64,          // m
    pub initial_x_velocity: f64, // m/s
    pub initial_y_velocity: f64, // m/s
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig {
            max_thrust: 40_000.0,
            wet_mass: 200.0,
            dry_mass: 10.0,
            fuel_flow: 10.0,
            x_surface_area: 1.0,
            y_surface_area: 1.0,
            x_drag_coefficient: 0.8,
            y_drag_coefficient: 0.8,
            initial_x: 0.0,
            initial_y: 4_000.0,
            initial_x_velocity: 0.0,
            initial_y_velocity: -500.0,
        }
    }
}

impl VehicleConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite(
            "vehicle",
            &[
                ("max_thrust", self.max_thrust),
                ("wet_mass", self.wet_mass),
                ("dry_mass", self.dry_mass),
                ("fuel_flow", self.fuel_flow),
                ("x_surface_area", self.x_surface_area),
                ("y_surface_area", self.y_surface_area),
                ("x_drag_coefficient", self.x_drag_coefficient),
                ("y_drag_coefficient", self.y_drag_coefficient),
                ("initial_x", self.initial_x),
                ("initial_y", self.initial_y),
                ("initial_x_velocity", self.initial_x_velocity),
                ("initial_y_velocity", self.initial_y_velocity),
            ],
        )?;

        ensure(self.max_thrust > 0.0, || {
            format!("max_thrust must be positive, got {} N", self.max_thrust)
        })?;
        ensure(self.dry_mass > 0.0, || {
            format!("dry_mass must be positive, got {} kg", self.dry_mass)
        })?;
        ensure(self.dry_mass <= self.wet_mass, || {
            format!(
                "dry_mass ({} kg) exceeds wet_mass ({} kg)",
                self.dry_mass, self.wet_mass
            )
        })?;
        ensure(self.fuel_flow >= 0.0, || {
            format!("fuel_flow must not be negative, got {} kg/s", self.fuel_flow)
        })?;
        ensure(self.x_surface_area >= 0.0 && self.y_surface_area >= 0.0, || {
            "surface areas must not be negative".to_string()
        })?;
        ensure(
            self.x_drag_coefficient >= 0.0 && self.y_drag_coefficient >= 0.0,
            || "drag coefficients must not be negative".to_string(),
        )?;
        ensure(self.initial_y > 0.0, || {
            format!("initial_y must be above ground, got {} m", self.initial_y)
        })
    }
}

/// Planet and atmosphere. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub sea_level_pressure: f64, // hPa
    pub temperature: f64,        // °C, isothermal
    pub planet_mass: f64,        // kg
    pub planet_radius: f64,      // m
    pub gravitational_constant: f64,
    pub universal_gas_constant: f64,
    pub molar_mass: f64, // kg/mol
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig {
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            temperature: SEA_LEVEL_TEMPERATURE,
            planet_mass: PLANET_MASS,
            planet_radius: PLANET_RADIUS,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            universal_gas_constant: UNIVERSAL_GAS_CONSTANT,
            molar_mass: MOLAR_MASS_AIR,
        }
    }
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite(
            "environment",
            &[
                ("sea_level_pressure", self.sea_level_pressure),
                ("temperature", self.temperature),
                ("planet_mass", self.planet_mass),
                ("planet_radius", self.planet_radius),
                ("gravitational_constant", self.gravitational_constant),
                ("universal_gas_constant", self.universal_gas_constant),
                ("molar_mass", self.molar_mass),
            ],
        )?;

        ensure(self.temperature > -CELSIUS_TO_KELVIN, || {
            format!(
                "temperature must be above absolute zero, got {} °C",
                self.temperature
            )
        })?;
        ensure(self.sea_level_pressure >= 0.0, || {
            format!(
                "sea_level_pressure must not be negative, got {} hPa",
                self.sea_level_pressure
            )
        })?;
        ensure(self.planet_mass > 0.0 && self.planet_radius > 0.0, || {
            "planet mass and radius must be positive".to_string()
        })?;
        ensure(
            self.gravitational_constant > 0.0
                && self.universal_gas_constant > 0.0
                && self.molar_mass > 0.0,
            || "physical constants must be positive".to_string(),
        )
    }
}

/// Tuning of the landing burn.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Throttle fraction used to estimate the ignition point. Higher is more
    /// fuel efficient but leaves less margin.
    pub target_landing_throttle: f64,
    /// Lowest throttle the lit engine can hold without shutting down.
    pub stationary_throttle: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        GuidanceConfig {
            target_landing_throttle: 0.9,
            stationary_throttle: 0.4,
        }
    }
}

impl GuidanceConfig {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.target_landing_throttle > 0.0 && self.target_landing_throttle <= 1.0,
            || {
                format!(
                    "target_landing_throttle must be in (0, 1], got {}",
                    self.target_landing_throttle
                )
            },
        )?;
        ensure((0.0..=1.0).contains(&self.stationary_throttle), || {
            format!(
                "stationary_throttle must be in [0, 1], got {}",
                self.stationary_throttle
            )
        })
    }
}

/// Settings for the loop that drives the core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub mode: StepMode,
    pub max_time: f64,           // s
    pub landing_pad_radius: f64, // m
    pub max_safe_velocity: f64,  // m/s
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            mode: StepMode::Fixed {
                frequency_hz: SIMULATION_FREQUENCY,
            },
            max_time: MAX_SIMULATION_TIME,
            landing_pad_radius: LANDING_PAD_RADIUS,
            max_safe_velocity: MAX_SAFE_TOUCHDOWN_VELOCITY,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        self.mode.validate()?;
        ensure(self.max_time.is_finite() && self.max_time > 0.0, || {
            format!("max_time must be positive, got {} s", self.max_time)
        })?;
        ensure(self.landing_pad_radius >= 0.0, || {
            "landing_pad_radius must not be negative".to_string()
        })?;
        ensure(self.max_safe_velocity > 0.0, || {
            "max_safe_velocity must be positive".to_string()
        })
    }
}

/// Uniform dispersion of the initial conditions for Monte Carlo sweeps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DispersionConfig {
    pub runs: usize,
    pub seed: u64,
    pub workers: usize,
    pub altitude_spread: f64,            // ± m
    pub vertical_velocity_spread: f64,   // ± m/s
    pub horizontal_velocity_spread: f64, // ± m/s
}

impl Default for DispersionConfig {
    fn default() -> Self {
        DispersionConfig {
            runs: 100,
            seed: 0,
            workers: 4,
            altitude_spread: 500.0,
            vertical_velocity_spread: 50.0,
            horizontal_velocity_spread: 0.0,
        }
    }
}

impl DispersionConfig {
    pub fn validate(&self) -> Result<()> {
        ensure(self.workers > 0, || "workers must be at least 1".to_string())?;
        ensure(
            [
                self.altitude_spread,
                self.vertical_velocity_spread,
                self.horizontal_velocity_spread,
            ]
            .iter()
            .all(|spread| spread.is_finite() && *spread >= 0.0),
            || "dispersion spreads must be finite and not negative".to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub vehicle: VehicleConfig,
    pub environment: EnvironmentConfig,
    pub guidance: GuidanceConfig,
    pub driver: DriverConfig,
    pub dispersion: Option<DispersionConfig>,
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.vehicle.validate()?;
        self.environment.validate()?;
        self.guidance.validate()?;
        self.driver.validate()?;
        if let Some(dispersion) = &self.dispersion {
            dispersion.validate()?;
        }
        Ok(())
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfig(message()))
    }
}

fn ensure_finite(section: &str, values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(SimulationError::InvalidConfig(format!(
            "{section}.{name} must be finite, got {value}"
        ))),
        None => Ok(()),
    }
}
