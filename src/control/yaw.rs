use crate::config::Gains;
use crate::frame::normalize_angle;

/// Proportional yaw controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YawController {
    gains: Gains,
}

impl YawController {
    pub fn new(gains: Gains) -> Self {
        Self { gains }
    }

    /// Calculate the target yaw-rate in radians/second to reach the commanded yaw from the current yaw (in radians).
    ///
    /// The error is wrapped into `[-π, π)` first so the vehicle always turns the short way.
    pub fn yaw_control(&self, yaw_cmd: f64, yaw: f64) -> f64 {
        let yaw_error = normalize_angle(yaw_cmd - yaw);
        self.gains.p_control(yaw_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_error() {
        let controller = YawController::new(Gains::p(5.5));
        assert_eq!(controller.yaw_control(1.2, 1.2), 0.0);
    }

    #[test]
    fn test_wraps_across_pi() {
        let controller = YawController::new(Gains::p(2.0));

        // From just below +π to just above -π is a short positive turn
        let rate = controller.yaw_control(-PI + 0.1, PI - 0.1);
        assert_relative_eq!(rate, 0.4, epsilon = 1e-12);

        let rate = controller.yaw_control(1.5 * PI, 0.0);
        assert_relative_eq!(rate, -PI, epsilon = 1e-12);
    }
}
