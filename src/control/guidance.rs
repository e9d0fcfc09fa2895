use log::{debug, info};

use crate::config::GuidanceConfig;
use crate::constants::{DESCENT_RATE_EPSILON, MIN_TIME_TO_GROUND};
use crate::errors::Result;

use super::rocket::VehicleState;

/// Landing burn progress. Only moves forward: `Idle -> Burning -> Ended`,
/// or straight from `Idle` to `Ended` if the vehicle starts climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuidancePhase {
    Idle,
    Burning,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceCommand {
    pub throttle: f64,
    pub attitude_angle: f64,
}

impl GuidanceCommand {
    pub fn engine_off() -> Self {
        GuidanceCommand {
            throttle: 0.0,
            attitude_angle: 0.0,
        }
    }
}

/// Closed-form estimate of the landing burn from the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnEstimate {
    pub max_acceleration: f64,     // m/s²
    pub time_to_ground: f64,       // s, coasting at the current rate
    pub landing_time: f64,         // s, to null the descent at target throttle
    pub landing_displacement: f64, // m
    /// Throttle that closes the gap between the braking distance and the
    /// coasting distance over `time_to_ground`.
    pub target_throttle: f64,
}

impl BurnEstimate {
    /// `None` while the vehicle is not descending: the time to ground is
    /// undefined and no burn is needed.
    pub fn compute(vehicle: &VehicleState, target_landing_throttle: f64) -> Option<Self> {
        let descent_rate = -vehicle.velocity.y;
        if descent_rate <= DESCENT_RATE_EPSILON {
            return None;
        }

        let max_acceleration = vehicle.propulsion.max_acceleration(vehicle.mass);
        let braking_acceleration = max_acceleration * target_landing_throttle;

        let time_to_ground = (vehicle.position.y / descent_rate).max(MIN_TIME_TO_GROUND);
        let landing_time = descent_rate / braking_acceleration;
        let landing_displacement = descent_rate * landing_time
            + 0.5 * braking_acceleration * landing_time * landing_time;

        let coast_displacement = descent_rate * time_to_ground;
        let target_throttle = ((landing_displacement - coast_displacement)
            / (0.5 * time_to_ground * time_to_ground))
            / max_acceleration;

        Some(BurnEstimate {
            max_acceleration,
            time_to_ground,
            landing_time,
            landing_displacement,
            target_throttle,
        })
    }

    /// Ignition trigger: the throttle needed to stop by touchdown has reached
    /// the efficiency target.
    pub fn landing_burn_condition(&self, target_landing_throttle: f64) -> bool {
        self.target_throttle >= target_landing_throttle
    }
}

/// Suicide-burn guidance. Holds only the burn phase; each call to
/// [`GuidanceController::update`] returns the command for this step and the
/// controller to use for the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceController {
    config: GuidanceConfig,
    phase: GuidancePhase,
    burn_start_time: Option<f64>,
}

impl GuidanceController {
    pub fn new(config: GuidanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(GuidanceController {
            config,
            phase: GuidancePhase::Idle,
            burn_start_time: None,
        })
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    pub fn phase(&self) -> GuidancePhase {
        self.phase
    }

    pub fn burn_started(&self) -> bool {
        self.burn_start_time.is_some()
    }

    pub fn burn_ended(&self) -> bool {
        self.phase == GuidancePhase::Ended
    }

    pub fn burn_start_time(&self) -> Option<f64> {
        self.burn_start_time
    }

    pub fn update(&self, vehicle: &VehicleState) -> (GuidanceCommand, GuidanceController) {
        let mut next = *self;

        if vehicle.has_impacted() {
            return (GuidanceCommand::engine_off(), next);
        }

        if vehicle.velocity.y > 0.0 {
            if next.phase != GuidancePhase::Ended {
                info!(
                    "Ascending at t={:.2}s (vy = {:.2} m/s), landing guidance aborted",
                    vehicle.time, vehicle.velocity.y
                );
                next.phase = GuidancePhase::Ended;
            }
            return (GuidanceCommand::engine_off(), next);
        }

        if next.phase == GuidancePhase::Ended {
            return (GuidanceCommand::engine_off(), next);
        }

        let estimate = BurnEstimate::compute(vehicle, self.config.target_landing_throttle);
        let burn_condition = estimate
            .map(|e| e.landing_burn_condition(self.config.target_landing_throttle))
            .unwrap_or(false);
        let target_throttle = estimate.map(|e| e.target_throttle).unwrap_or(0.0);

        if burn_condition && next.phase == GuidancePhase::Idle {
            info!(
                "Landing burn ignition at t={:.2}s, altitude {:.2} m, vy = {:.2} m/s",
                vehicle.time, vehicle.position.y, vehicle.velocity.y
            );
            next.phase = GuidancePhase::Burning;
            next.burn_start_time = Some(vehicle.time);
        }

        // Once lit the engine stays lit until touchdown or ascent, even if
        // the condition clears.
        let throttle = match next.phase {
            GuidancePhase::Burning => self.clamp_throttle(target_throttle),
            _ => 0.0,
        };

        debug!(
            "t={:.3}s phase={:?} target_throttle={:.4} throttle={:.4}",
            vehicle.time, next.phase, target_throttle, throttle
        );

        (
            GuidanceCommand {
                throttle,
                attitude_angle: 0.0,
            },
            next,
        )
    }

    fn clamp_throttle(&self, target_throttle: f64) -> f64 {
        target_throttle.clamp(self.config.stationary_throttle, 1.0)
    }
}
