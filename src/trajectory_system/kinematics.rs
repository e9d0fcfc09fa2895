use log::{info, trace};

use crate::{
    control::{
        environment::Environment,
        rocket::{ImpactSnapshot, VehicleState},
    },
    errors::{Result, SimulationError},
};

use super::forces::compute_forces;

/// Rejects time steps that cannot be integrated. Zero is allowed.
pub fn validate_time_step(delta_time: f64) -> Result<()> {
    if !delta_time.is_finite() || delta_time < 0.0 {
        return Err(SimulationError::InvalidStep(format!(
            "time step must be finite and non-negative, got {delta_time} s"
        )));
    }
    Ok(())
}

fn validate_command(throttle: f64, attitude_angle: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&throttle) {
        return Err(SimulationError::InvalidStep(format!(
            "throttle must be in [0, 1], got {throttle}"
        )));
    }
    if !attitude_angle.is_finite() {
        return Err(SimulationError::InvalidStep(format!(
            "attitude angle must be finite, got {attitude_angle}"
        )));
    }
    Ok(())
}

/// Advances `state` by `delta_time` under the given throttle and attitude
/// angle and returns the new state. Invalid input fails before anything is
/// computed; a zero step returns the state unchanged.
///
/// Forces come from the pre-step state. Velocity is updated first and the
/// position update uses the new velocity plus the `0.5 * a * dt²` term.
/// Reaching the ground records the impact snapshot; from then on the vehicle
/// stays pinned there with the engine off and only the clock advances.
pub fn step(
    state: &VehicleState,
    environment: &Environment,
    throttle: f64,
    attitude_angle: f64,
    delta_time: f64,
) -> Result<VehicleState> {
    validate_time_step(delta_time)?;
    validate_command(throttle, attitude_angle)?;

    if delta_time == 0.0 {
        return Ok(state.clone());
    }

    if state.has_impacted() {
        let mut landed = state.clone();
        landed.time += delta_time;
        landed.throttle = 0.0;
        landed.forces = compute_forces(&landed, environment, 0.0, landed.attitude_angle);
        return Ok(landed);
    }

    let mut next = state.clone();
    next.throttle = throttle;
    next.attitude_angle = attitude_angle;

    let forces = compute_forces(state, environment, throttle, attitude_angle);
    let acceleration = forces.acceleration;

    next.time += delta_time;
    next.velocity = next.velocity + acceleration * delta_time;
    next.position =
        next.position + next.velocity * delta_time + acceleration * (0.5 * delta_time * delta_time);
    next.mass = next.propulsion.consume(state.mass, throttle, delta_time);
    next.min_altitude = next.min_altitude.min(next.position.y);
    next.forces = forces;

    if next.position.y <= 0.0 {
        if next.impact.is_none() {
            let impact = ImpactSnapshot {
                time: next.time,
                velocity: next.velocity.y,
                mass: next.mass,
                x: next.position.x,
            };
            info!(
                "Impact at t={:.2}s: vertical velocity {:.2} m/s, x = {:.2} m, mass {:.2} kg",
                impact.time, impact.velocity, impact.x, impact.mass
            );
            next.impact = Some(impact);
        }
        next.position.y = 0.0;
        next.velocity.x = 0.0;
        next.velocity.y = 0.0;
        next.throttle = 0.0;
    }

    trace!(
        "t={:.3}s y={:.2} vy={:.2} throttle={:.3} mass={:.2}",
        next.time,
        next.position.y,
        next.velocity.y,
        next.throttle,
        next.mass
    );

    Ok(next)
}
