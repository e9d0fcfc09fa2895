use crate::control::environment::{AtmosphericConditions, Environment};
use crate::control::rocket::VehicleState;
use crate::utils::vector2d::Vector2D;

/// Everything the force model derives for one step. Kept on the vehicle
/// for telemetry; the integrator only consumes `acceleration`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceBreakdown {
    pub atmosphere: AtmosphericConditions,
    pub engine: Vector2D,       // N
    pub drag: Vector2D,         // N
    pub gravity: f64,           // N, vertical
    pub net: Vector2D,          // N
    pub acceleration: Vector2D, // m/s²
}

/// Forces on `state` for the given throttle and attitude angle (degrees
/// from vertical). Pure: the state is not touched.
pub fn compute_forces(
    state: &VehicleState,
    environment: &Environment,
    throttle: f64,
    attitude_angle: f64,
) -> ForceBreakdown {
    let atmosphere = environment.conditions_at(state.position.y);

    let engine = state
        .propulsion
        .engine_force(state.mass, throttle, attitude_angle);
    let drag = state
        .aerodynamics
        .calculate_drag(state.velocity, atmosphere.density);
    let gravity = -atmosphere.gravity * state.mass;

    let net: Vector2D = [engine, drag, Vector2D::new(0.0, gravity)]
        .into_iter()
        .sum();

    ForceBreakdown {
        atmosphere,
        engine,
        drag,
        gravity,
        net,
        acceleration: net / state.mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvironmentConfig, VehicleConfig};
    use crate::control::rocket::create_vehicle;
    use approx::assert_relative_eq;

    fn setup(vehicle: VehicleConfig) -> (VehicleState, Environment) {
        let environment = Environment::new(&EnvironmentConfig::default()).unwrap();
        let state = create_vehicle(&vehicle, &environment).unwrap();
        (state, environment)
    }

    #[test]
    fn test_at_rest_only_gravity_acts() {
        let (state, env) = setup(VehicleConfig {
            initial_y_velocity: 0.0,
            ..VehicleConfig::default()
        });

        let forces = compute_forces(&state, &env, 0.0, 0.0);

        assert_eq!(forces.drag, Vector2D::zero());
        assert_eq!(forces.engine, Vector2D::zero());
        assert_relative_eq!(forces.acceleration.x, 0.0);
        assert_relative_eq!(
            forces.acceleration.y,
            -env.gravity_at_altitude(4_000.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_full_throttle_descent() {
        let (state, env) = setup(VehicleConfig::default());

        let forces = compute_forces(&state, &env, 1.0, 0.0);
        let expected_drag = 0.5 * 0.8 * forces.atmosphere.density * 500.0_f64.powi(2);

        assert_relative_eq!(forces.engine.y, 40_000.0);
        assert_relative_eq!(forces.drag.y, expected_drag, epsilon = 1e-9);
        assert_relative_eq!(forces.gravity, -forces.atmosphere.gravity * 200.0);
        assert_relative_eq!(
            forces.acceleration.y,
            (40_000.0 + expected_drag + forces.gravity) / 200.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_tilted_thrust_pushes_sideways() {
        let (state, env) = setup(VehicleConfig::default());

        let forces = compute_forces(&state, &env, 0.5, 90.0);

        assert_relative_eq!(forces.engine.x, 20_000.0, epsilon = 1e-9);
        assert!(forces.engine.y.abs() < 1e-9);
        assert_relative_eq!(forces.acceleration.x, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dry_vehicle_ignores_throttle() {
        let (mut state, env) = setup(VehicleConfig::default());
        state.mass = state.propulsion.dry_mass;

        let forces = compute_forces(&state, &env, 1.0, 0.0);

        assert_eq!(forces.engine, Vector2D::zero());
        assert_relative_eq!(
            forces.acceleration.y,
            (forces.drag.y + forces.gravity) / state.mass,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_does_not_mutate_state() {
        let (state, env) = setup(VehicleConfig::default());
        let before = state.clone();
        let _ = compute_forces(&state, &env, 1.0, 10.0);
        assert_eq!(state, before);
    }
}
