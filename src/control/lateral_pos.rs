use crate::config::{AxisPair, Gains};
use nalgebra::Vector2;

/// Horizontal position/velocity PD stage producing a commanded north/east
/// acceleration. Output is unclipped; tilt limits are applied downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LateralPositionController {
    x: Gains,
    y: Gains,
}

impl LateralPositionController {
    pub fn new(gains: AxisPair) -> Self {
        Self {
            x: gains.first(),
            y: gains.second(),
        }
    }

    /// Generate horizontal acceleration commands in the local frame (m/s²).
    pub fn lateral_position_control(
        &self,
        local_position_cmd: Vector2<f64>,
        local_velocity_cmd: Vector2<f64>,
        local_position: Vector2<f64>,
        local_velocity: Vector2<f64>,
        acceleration_ff: Vector2<f64>,
    ) -> Vector2<f64> {
        let err_p = local_position_cmd - local_position;
        let err_dot = local_velocity_cmd - local_velocity;

        Vector2::new(
            self.x.control(err_p.x, err_dot.x, acceleration_ff.x),
            self.y.control(err_p.y, err_dot.y, acceleration_ff.y),
        )
    }
}
