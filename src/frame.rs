use nalgebra::{Rotation3, Vector3};
use std::f64::consts::PI;

/// Body-to-world rotation for a `(roll, pitch, yaw)` attitude.
///
/// The primitive rotations are applied roll first, then pitch, then yaw,
/// i.e. `R = Rz(yaw) * Ry(pitch) * Rx(roll)`. With this convention `R[(2, 2)]`
/// is the cosine of the combined tilt and `R[(0, 2)]`, `R[(1, 2)]` are the
/// north/east components of the body z axis.
pub fn rotation_matrix(attitude: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_euler_angles(attitude.x, attitude.y, attitude.z)
}

/// Wraps an angle into `[-π, π)`.
///
/// `3π/2` maps to `-π/2`, never back onto `3π/2`.
pub fn normalize_angle(x: f64) -> f64 {
    let mut wrapped = (x + PI) % (2.0 * PI);

    // `%` keeps the sign of the dividend
    if wrapped < 0.0 {
        wrapped += 2.0 * PI;
    }

    // Rounding can push `wrapped + 2π` onto exactly 2π
    if wrapped >= 2.0 * PI {
        wrapped -= 2.0 * PI;
    }

    wrapped - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_attitude_is_identity() {
        let r = rotation_matrix(&Vector3::zeros());
        assert_relative_eq!(r.into_inner(), nalgebra::Matrix3::<f64>::identity());
    }

    #[test]
    fn test_tilt_column() {
        let roll: f64 = 0.3;
        let pitch: f64 = -0.2;
        let r = rotation_matrix(&Vector3::new(roll, pitch, 0.0));

        assert_relative_eq!(r[(2, 2)], roll.cos() * pitch.cos(), epsilon = 1e-12);
        assert_relative_eq!(r[(0, 2)], roll.cos() * pitch.sin(), epsilon = 1e-12);
        assert_relative_eq!(r[(1, 2)], -roll.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle_wraps_past_pi() {
        assert_relative_eq!(normalize_angle(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(0.25), 0.25, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(PI), -PI, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle_range_and_idempotence() {
        let mut x = -20.0;
        while x < 20.0 {
            let once = normalize_angle(x);
            assert!((-PI..PI).contains(&once), "{} -> {}", x, once);
            assert_relative_eq!(normalize_angle(once), once, epsilon = 1e-12);
            x += 0.173;
        }
    }
}
