use crate::config::VehicleConfig;
use crate::utils::vector2d::Vector2D;

/// Drag model with an independent reference area and coefficient per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: Vector2D,
    pub surface_area: Vector2D, // m²
}

impl Aerodynamics {
    pub fn new(drag_coefficient: Vector2D, surface_area: Vector2D) -> Self {
        Aerodynamics {
            drag_coefficient,
            surface_area,
        }
    }

    pub fn from_config(config: &VehicleConfig) -> Self {
        Aerodynamics::new(
            Vector2D::new(config.x_drag_coefficient, config.y_drag_coefficient),
            Vector2D::new(config.x_surface_area, config.y_surface_area),
        )
    }

    pub fn calculate_drag(&self, velocity: Vector2D, air_density: f64) -> Vector2D {
        Vector2D::new(
            axis_drag(
                self.drag_coefficient.x,
                air_density,
                velocity.x,
                self.surface_area.x,
            ),
            axis_drag(
                self.drag_coefficient.y,
                air_density,
                velocity.y,
                self.surface_area.y,
            ),
        )
    }
}

/// `0.5 * Cd * rho * v² * A`, opposing the motion along one axis.
fn axis_drag(drag_coefficient: f64, air_density: f64, velocity: f64, area: f64) -> f64 {
    if velocity == 0.0 {
        return 0.0;
    }
    let magnitude = 0.5 * drag_coefficient * air_density * velocity.powi(2) * area;
    -magnitude * velocity.signum()
}
