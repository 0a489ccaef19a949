use super::outcome::{clamp, Degeneracy, Outcome};
use crate::config::{Gains, PhysicalConstants};
use crate::frame::rotation_matrix;
use nalgebra::Vector3;

/// Vertical PD stage producing a collective thrust command.
///
/// The commanded world-frame vertical acceleration is divided by `b_z`, the
/// vertical component of the body thrust axis, so that a tilted vehicle still
/// produces the requested climb acceleration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltitudeController {
    gains: Gains,
    mass: f64,
    max_thrust: f64,
    epsilon: f64,
}

impl AltitudeController {
    pub fn new(gains: Gains, physical: &PhysicalConstants) -> Self {
        Self {
            gains,
            mass: physical.mass,
            max_thrust: physical.max_thrust,
            epsilon: physical.epsilon,
        }
    }

    /// Generate the collective thrust command (N, positive up).
    ///
    /// # Arguments
    ///
    /// * `altitude_cmd` - Desired altitude (m, positive up)
    /// * `vertical_velocity_cmd` - Desired climb rate (m/s, positive up)
    /// * `altitude` - Current altitude (m, positive up)
    /// * `vertical_velocity` - Current climb rate (m/s, positive up)
    /// * `attitude` - Current `(roll, pitch, yaw)` in radians
    /// * `acceleration_ff` - Vertical feed-forward acceleration (m/s², positive up)
    ///
    /// # Returns
    ///
    /// Thrust clamped to `[0, max_thrust]`. When the vehicle is edge-on
    /// (`|b_z| <= epsilon`) the thrust is zero and the outcome carries
    /// [`Degeneracy::Attitude`].
    pub fn altitude_control(
        &self,
        altitude_cmd: f64,
        vertical_velocity_cmd: f64,
        altitude: f64,
        vertical_velocity: f64,
        attitude: &Vector3<f64>,
        acceleration_ff: f64,
    ) -> Outcome<f64> {
        let b_z = rotation_matrix(attitude)[(2, 2)];

        if b_z.abs() <= self.epsilon {
            log::warn!("b_z = {b_z:.3e}, cannot compute thrust");
            return Outcome::degenerate(0.0, Degeneracy::Attitude);
        }

        let error_z = altitude_cmd - altitude;
        let error_z_dot = vertical_velocity_cmd - vertical_velocity;
        let u_1_bar = self.gains.control(error_z, error_z_dot, acceleration_ff);

        let (thrust, saturated) = clamp(self.mass * u_1_bar / b_z, 0.0, self.max_thrust);
        if saturated {
            log::debug!("thrust saturated at {thrust:.3} N");
        }

        Outcome::saturated(thrust, saturated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn controller() -> AltitudeController {
        AltitudeController::new(Gains::pd(8.0, 4.0), &PhysicalConstants::default())
    }

    #[test]
    fn test_zero_error_zero_feed_forward() {
        let outcome = controller().altitude_control(5.0, 0.0, 5.0, 0.0, &Vector3::zeros(), 0.0);
        assert_eq!(outcome, Outcome::nominal(0.0));
    }

    #[test]
    fn test_hover_feed_forward() {
        let outcome = controller().altitude_control(5.0, 0.0, 5.0, 0.0, &Vector3::zeros(), 9.81);
        assert_relative_eq!(outcome.command, 0.5 * 9.81, epsilon = 1e-12);
        assert!(!outcome.saturated);
    }

    #[test]
    fn test_tilt_compensation() {
        let roll: f64 = 0.4;
        let outcome =
            controller().altitude_control(5.0, 0.0, 5.0, 0.0, &Vector3::new(roll, 0.0, 0.0), 9.81);
        assert_relative_eq!(outcome.command, 0.5 * 9.81 / roll.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_clamped_to_range() {
        let high = controller().altitude_control(1000.0, 0.0, 0.0, 0.0, &Vector3::zeros(), 0.0);
        assert_eq!(high.command, 10.0);
        assert!(high.saturated);

        let low = controller().altitude_control(0.0, 0.0, 1000.0, 0.0, &Vector3::zeros(), 0.0);
        assert_eq!(low.command, 0.0);
        assert!(low.saturated);
    }

    #[test]
    fn test_edge_on_returns_zero() {
        for attitude in [
            Vector3::new(FRAC_PI_2, 0.0, 0.0),
            Vector3::new(0.0, FRAC_PI_2, 0.3),
        ] {
            let outcome = controller().altitude_control(10.0, 1.0, 0.0, 0.0, &attitude, 9.81);
            assert_eq!(outcome.command, 0.0);
            assert_eq!(outcome.degenerate, Some(Degeneracy::Attitude));
        }
    }
}
