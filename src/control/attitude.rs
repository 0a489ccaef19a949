use super::outcome::{clamp, Degeneracy, Outcome};
use crate::config::{AxisPair, Gains, PhysicalConstants};
use crate::frame::rotation_matrix;
use nalgebra::{Matrix2, Vector2, Vector3};

/// Roll-pitch stage: converts a commanded north/east acceleration into body
/// roll and pitch rate commands.
pub struct RollPitchController {
    roll: Gains,
    pitch: Gains,
    mass: f64,
    max_tilt: f64,
    epsilon: f64,
}

impl RollPitchController {
    pub fn new(gains: AxisPair, physical: &PhysicalConstants) -> Self {
        Self {
            roll: gains.first(),
            pitch: gains.second(),
            mass: physical.mass,
            max_tilt: physical.max_tilt,
            epsilon: physical.epsilon,
        }
    }

    /// Calculate the roll-rate and pitch-rate commands in the body frame in radians/second.
    ///
    /// # Arguments
    ///
    /// * `acceleration_cmd` - Desired `(north, east)` acceleration (m/s²)
    /// * `attitude` - Current `(roll, pitch, yaw)` in radians
    /// * `thrust_cmd` - Collective thrust command (N, positive up)
    ///
    /// # Control Law
    ///
    /// The desired tilt components are `b_c = a / (-T / m)`, clamped to
    /// `±max_tilt`. A P law on `b_c - (R02, R12)` yields world-frame tilt
    /// rates, which are mapped to body rates by
    ///
    /// [p, q] = 1/R22 * [[R10, -R00], [R11, -R01]] * [b_x_dot, b_y_dot]
    ///
    /// # Notes
    ///
    /// Zero thrust leaves no authority over tilt and an edge-on attitude makes
    /// the mapping singular. Both return zero rates with the matching
    /// [`Degeneracy`].
    pub fn roll_pitch_control(
        &self,
        acceleration_cmd: Vector2<f64>,
        attitude: &Vector3<f64>,
        thrust_cmd: f64,
    ) -> Outcome<Vector2<f64>> {
        if thrust_cmd.abs() <= self.epsilon {
            log::warn!("thrust_cmd = {thrust_cmd:.3e}, cannot compute roll/pitch rates");
            return Outcome::degenerate(Vector2::zeros(), Degeneracy::Thrust);
        }

        let rot_mat = rotation_matrix(attitude);
        let r22 = rot_mat[(2, 2)];

        if r22.abs() <= self.epsilon {
            log::warn!("R22 = {r22:.3e}, cannot compute roll/pitch rates");
            return Outcome::degenerate(Vector2::zeros(), Degeneracy::Attitude);
        }

        // Current tilt
        let b_a_x = rot_mat[(0, 2)];
        let b_a_y = rot_mat[(1, 2)];

        // Thrust is positive up but acts along body down, hence the sign flip
        let c = -thrust_cmd / self.mass;
        let (b_c_x, x_saturated) = clamp(acceleration_cmd.x / c, -self.max_tilt, self.max_tilt);
        let (b_c_y, y_saturated) = clamp(acceleration_cmd.y / c, -self.max_tilt, self.max_tilt);
        let saturated = x_saturated || y_saturated;
        if saturated {
            log::debug!("tilt target saturated at ({b_c_x:.3}, {b_c_y:.3})");
        }

        let b_c_dot = Vector2::new(
            self.roll.p_control(b_c_x - b_a_x),
            self.pitch.p_control(b_c_y - b_a_y),
        );

        let rot_mat1 = Matrix2::new(
            rot_mat[(1, 0)],
            -rot_mat[(0, 0)],
            rot_mat[(1, 1)],
            -rot_mat[(0, 1)],
        ) / r22;

        Outcome::saturated(rot_mat1 * b_c_dot, saturated)
    }
}
