use nalgebra::Vector3;

/// Estimated vehicle state, supplied fresh each control cycle.
///
/// # Fields
///
/// * `position` - Local NED position `(north, east, down)` (meters)
/// * `velocity` - Local NED velocity (m/s)
/// * `attitude` - Euler angles `(roll, pitch, yaw)` (radians)
/// * `body_rate` - Angular velocity `(p, q, r)` about the body axes (rad/s)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: Vector3<f64>,
    pub body_rate: Vector3<f64>,
}

impl VehicleState {
    /// A motionless, level vehicle at `position`.
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Height above the local origin (m, positive up).
    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    /// Climb rate (m/s, positive up).
    pub fn vertical_velocity(&self) -> f64 {
        -self.velocity.z
    }

    /// Converts the state to a fixed-size array for numerical integration.
    ///
    /// Order: [north, east, down, v_north, v_east, v_down, roll, pitch, yaw, p, q, r]
    pub fn to_array(&self) -> [f64; 12] {
        let mut arr = [0.0; 12];
        arr[0..3].copy_from_slice(self.position.as_slice());
        arr[3..6].copy_from_slice(self.velocity.as_slice());
        arr[6..9].copy_from_slice(self.attitude.as_slice());
        arr[9..12].copy_from_slice(self.body_rate.as_slice());
        arr
    }

    /// Rebuilds a state from the layout produced by [`VehicleState::to_array`].
    pub fn from_array(arr: &[f64; 12]) -> Self {
        Self {
            position: Vector3::new(arr[0], arr[1], arr[2]),
            velocity: Vector3::new(arr[3], arr[4], arr[5]),
            attitude: Vector3::new(arr[6], arr[7], arr[8]),
            body_rate: Vector3::new(arr[9], arr[10], arr[11]),
        }
    }
}
