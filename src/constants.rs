// Physical Constants
pub const PLANET_MASS: f64 = 5.9722e24; // kg
pub const PLANET_RADIUS: f64 = 6_378_500.0; // meters
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11; // N⋅m²/kg²

// Atmospheric Constants
pub const MOLAR_MASS_AIR: f64 = 0.0289644; // kg/mol
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.31432; // J/(mol⋅K)
pub const SPECIFIC_GAS_CONSTANT_AIR: f64 = 287.058; // J/(kg⋅K)
pub const CELSIUS_TO_KELVIN: f64 = 273.15;
pub const HECTOPASCAL: f64 = 100.0; // Pa per hPa
pub const SEA_LEVEL_PRESSURE: f64 = 1013.25; // hPa
pub const SEA_LEVEL_TEMPERATURE: f64 = 15.0; // °C

// Numeric guards
pub const MIN_RADIAL_DISTANCE: f64 = 1.0; // m
pub const DESCENT_RATE_EPSILON: f64 = 1e-6; // m/s
pub const MIN_TIME_TO_GROUND: f64 = 1e-9; // s

// Simulation Parameters
pub const SIMULATION_FREQUENCY: f64 = 100.0; // Hz
pub const MIN_FRAME_RATE: f64 = 1.0; // fps
pub const MAX_SIMULATION_TIME: f64 = 3600.0; // s

// Landing Evaluation
pub const LANDING_PAD_RADIUS: f64 = 40.0; // m
pub const MAX_SAFE_TOUCHDOWN_VELOCITY: f64 = 10.0; // m/s
