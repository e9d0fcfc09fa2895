use super::rocket::VehicleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingOutcome {
    InFlight,
    Landed,
    Crashed,
}

/// Landed when the touchdown was slower than `max_safe_velocity` and inside
/// the pad; crashed otherwise.
pub fn classify_landing(
    state: &VehicleState,
    landing_pad_radius: f64,
    max_safe_velocity: f64,
) -> LandingOutcome {
    match state.impact {
        None => LandingOutcome::InFlight,
        Some(impact)
            if impact.velocity.abs() < max_safe_velocity
                && impact.x.abs() <= landing_pad_radius =>
        {
            LandingOutcome::Landed
        }
        Some(_) => LandingOutcome::Crashed,
    }
}
