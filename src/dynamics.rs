use crate::config::PhysicalConstants;
use crate::control::ControlCommand;
use crate::frame::rotation_matrix;
use crate::state::VehicleState;
use crate::Error;
use nalgebra::Vector3;

/// Rigid-body model of a multirotor in the local NED frame.
///
/// This is the plant the controller is flown against in demos and tests. It
/// consumes the cascade's [`ControlCommand`] directly, so no motor mixing is
/// involved: thrust acts along the body -z axis and the moments act about the
/// body axes.
///
/// # Fields
///
/// * `physical` - Mass, gravity and moments of inertia
/// * `command` - Thrust (N) and body moments (N⋅m), held constant over a step
pub struct VehicleOde {
    pub physical: PhysicalConstants,
    pub command: ControlCommand,
}

impl fast_ode::DifferentialEquation<12> for VehicleOde {
    /// Computes the time derivatives of the state vector.
    ///
    /// The method implements:
    /// 1. Position derivatives: ẋ = v
    /// 2. Velocity derivatives: v̇ = R·(0, 0, -T)/m + (0, 0, g)
    /// 3. Attitude derivatives: Euler angle kinematic equations
    /// 4. Angular velocity derivatives: Euler's rotational equations
    ///
    /// The yaw rate is zeroed at θ = ±π/2 (gimbal lock).
    fn ode_dot_y(&self, _t: f64, y: &fast_ode::Coord<12>) -> (fast_ode::Coord<12>, bool) {
        let state = VehicleState::from_array(&y.0);

        let phi = state.attitude.x; // roll
        let theta = state.attitude.y; // pitch
        let p = state.body_rate.x;
        let q = state.body_rate.y;
        let r = state.body_rate.z;

        let cos_phi = phi.cos();
        let sin_phi = phi.sin();
        let cos_theta = theta.cos();
        let tan_theta = theta.tan();

        let physical = &self.physical;
        let thrust_world =
            rotation_matrix(&state.attitude) * Vector3::new(0.0, 0.0, -self.command.thrust);
        let acceleration = thrust_world / physical.mass + Vector3::new(0.0, 0.0, physical.gravity);

        let mut dot_y = [0.0; 12];

        // Position derivatives (velocities)
        dot_y[0..3].copy_from_slice(state.velocity.as_slice());

        // Velocity derivatives (accelerations)
        dot_y[3..6].copy_from_slice(acceleration.as_slice());

        // Attitude derivatives (Euler angle rates)
        dot_y[6] = p + q * sin_phi * tan_theta + r * cos_phi * tan_theta; // φ̇
        dot_y[7] = q * cos_phi - r * sin_phi; // θ̇
        dot_y[8] = if cos_theta.abs() > 1e-6 {
            q * sin_phi / cos_theta + r * cos_phi / cos_theta // ψ̇
        } else {
            0.0
        };

        // Angular velocity derivatives (Euler's equations)
        let ixx = physical.moment_of_inertia.x;
        let iyy = physical.moment_of_inertia.y;
        let izz = physical.moment_of_inertia.z;
        let moments = &self.command.moments;

        dot_y[9] = (moments.x + (iyy - izz) * q * r) / ixx; // ṗ
        dot_y[10] = (moments.y + (izz - ixx) * r * p) / iyy; // q̇
        dot_y[11] = (moments.z + (ixx - iyy) * p * q) / izz; // ṙ

        (fast_ode::Coord(dot_y), true)
    }
}

/// Integrates the vehicle under a constant command over `time_span`.
///
/// # Arguments
///
/// * `initial_state` - State at the start of the span
/// * `physical` - Physical parameters of the vehicle
/// * `command` - Thrust and moments held over the span (zero-order hold)
/// * `time_span` - `(t_start, t_end)` in seconds
/// * `tolerance` - Absolute tolerance for the adaptive integrator
///
/// # Errors
///
/// [`Error::Integration`] when the solver stops before `t_end`.
///
/// # Example
///
/// let hover = ControlCommand { thrust: 0.5 * 9.81, moments: Vector3::zeros() };
/// let next = simulate(state, &PhysicalConstants::default(), hover, (0.0, 0.01), 1e-6)?;
pub fn simulate(
    initial_state: VehicleState,
    physical: &PhysicalConstants,
    command: ControlCommand,
    time_span: (f64, f64),
    tolerance: f64,
) -> Result<VehicleState, Error> {
    let ode = VehicleOde {
        physical: *physical,
        command,
    };

    let initial_coord = fast_ode::Coord(initial_state.to_array());

    let result = fast_ode::solve_ivp(
        &ode,
        time_span,
        initial_coord,
        |_, _| true,
        tolerance,
        tolerance * 10.0,
    );

    match result {
        fast_ode::IvpResult::FinalTimeReached(final_coord) => {
            Ok(VehicleState::from_array(&final_coord.0))
        }
        _ => Err(Error::Integration),
    }
}
