use crate::config::ControllerConfig;
use crate::state::VehicleState;
use crate::trajectory::{Trajectory, TrajectoryCommand};
use crate::Error;
use nalgebra::{Vector2, Vector3};

mod altitude;
pub use altitude::AltitudeController;

mod attitude;
pub use attitude::RollPitchController;

mod body_rate;
pub use body_rate::BodyRateController;

mod feedback;

mod lateral_pos;
pub use lateral_pos::LateralPositionController;

mod outcome;
pub use outcome::{Degeneracy, Diagnostics, Outcome};

mod yaw;
pub use yaw::YawController;

/// Terminal output of the cascade, consumed by an external mixer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlCommand {
    /// Collective thrust (N, positive up)
    pub thrust: f64,
    /// Body moments `(Mx, My, Mz)` (N⋅m)
    pub moments: Vector3<f64>,
}

/// Everything produced by one control cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeOutput {
    pub command: ControlCommand,
    /// The trajectory sample the cycle tracked
    pub reference: TrajectoryCommand,
    /// Commanded body rates `(p, q, r)` fed to the inner loop (rad/s)
    pub body_rate_cmd: Vector3<f64>,
    pub diagnostics: Diagnostics,
}

/// A cascaded nonlinear controller for multirotor flight.
///
/// The cascade tracks a position/yaw trajectory through intermediate
/// acceleration, attitude and body-rate stages:
///
/// Trajectory → Lateral Position → Roll-Pitch ─┐
/// Trajectory → Altitude (thrust) ─────────────┤→ Body Rate → Moments
/// Trajectory → Yaw (yaw rate) ────────────────┘
///
/// Every stage is a pure function of its inputs and the configuration fixed at
/// construction, so a controller can be shared across threads and independent
/// instances never interact.
///
/// # Frames
///
/// Positions and velocities are local NED. The vertical stage works in "+up"
/// quantities, so altitude is `-down` and the gravity magnitude is fed forward
/// to hold a hover with zero tracking error.
pub struct NonlinearController {
    config: ControllerConfig,
    altitude: AltitudeController,
    yaw: YawController,
    body_rate: BodyRateController,
    roll_pitch: RollPitchController,
    lateral: LateralPositionController,
}

impl Default for NonlinearController {
    fn default() -> Self {
        Self::from_valid(ControllerConfig::default())
    }
}

impl NonlinearController {
    /// Creates a controller after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a gain is non-finite or a physical
    /// limit is not positive.
    ///
    /// # Example
    ///
    /// let config = ControllerConfig::from_yaml_str("physical:\n  mass: 1.2\n")?;
    /// let controller = NonlinearController::new(config)?;
    pub fn new(config: ControllerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ControllerConfig) -> Self {
        let gains = &config.gains;
        let physical = &config.physical;

        Self {
            altitude: AltitudeController::new(gains.altitude, physical),
            yaw: YawController::new(gains.yaw),
            body_rate: BodyRateController::new(gains.body_rate_pq, gains.body_rate_r, physical),
            roll_pitch: RollPitchController::new(gains.roll_pitch, physical),
            lateral: LateralPositionController::new(gains.lateral),
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Generate a commanded position, velocity and yaw from the trajectory at `current_time`.
    pub fn trajectory_control(
        &self,
        trajectory: &Trajectory,
        current_time: f64,
    ) -> TrajectoryCommand {
        trajectory.sample(current_time)
    }

    /// Generate horizontal acceleration commands (m/s²) in the local frame.
    pub fn lateral_position_control(
        &self,
        local_position_cmd: Vector2<f64>,
        local_velocity_cmd: Vector2<f64>,
        local_position: Vector2<f64>,
        local_velocity: Vector2<f64>,
        acceleration_ff: Vector2<f64>,
    ) -> Vector2<f64> {
        self.lateral.lateral_position_control(
            local_position_cmd,
            local_velocity_cmd,
            local_position,
            local_velocity,
            acceleration_ff,
        )
    }

    /// Generate the collective thrust command (N, positive up).
    ///
    /// See [`AltitudeController::altitude_control`].
    pub fn altitude_control(
        &self,
        altitude_cmd: f64,
        vertical_velocity_cmd: f64,
        altitude: f64,
        vertical_velocity: f64,
        attitude: &Vector3<f64>,
        acceleration_ff: f64,
    ) -> Outcome<f64> {
        self.altitude.altitude_control(
            altitude_cmd,
            vertical_velocity_cmd,
            altitude,
            vertical_velocity,
            attitude,
            acceleration_ff,
        )
    }

    /// Generate body roll and pitch rate commands (rad/s).
    ///
    /// See [`RollPitchController::roll_pitch_control`].
    pub fn roll_pitch_control(
        &self,
        acceleration_cmd: Vector2<f64>,
        attitude: &Vector3<f64>,
        thrust_cmd: f64,
    ) -> Outcome<Vector2<f64>> {
        self.roll_pitch
            .roll_pitch_control(acceleration_cmd, attitude, thrust_cmd)
    }

    /// Generate body moment commands (N⋅m).
    pub fn body_rate_control(
        &self,
        body_rate_cmd: Vector3<f64>,
        body_rate: Vector3<f64>,
    ) -> Outcome<Vector3<f64>> {
        self.body_rate.body_rate_control(body_rate_cmd, body_rate)
    }

    /// Generate the yaw-rate command (rad/s).
    pub fn yaw_control(&self, yaw_cmd: f64, yaw: f64) -> f64 {
        self.yaw.yaw_control(yaw_cmd, yaw)
    }

    /// Runs one control cycle with no acceleration feed-forward.
    pub fn run_control(
        &self,
        trajectory: &Trajectory,
        current_time: f64,
        state: &VehicleState,
    ) -> CascadeOutput {
        self.run_control_with_feed_forward(trajectory, current_time, state, Vector3::zeros())
    }

    /// Runs one control cycle, from trajectory sampling down to body moments.
    ///
    /// # Control Sequence
    ///
    /// 1. **Trajectory**: sample position, velocity and yaw at `current_time`
    /// 2. **Altitude**: thrust from the vertical error, gravity fed forward
    /// 3. **Lateral Position**: north/east acceleration command
    /// 4. **Roll-Pitch**: acceleration to body roll/pitch rates
    /// 5. **Yaw**: yaw rate from the wrapped heading error
    /// 6. **Body Rate**: moments from the body-rate error
    ///
    /// # Arguments
    ///
    /// * `trajectory` - Reference waypoints (NED)
    /// * `current_time` - Time at which to sample the trajectory (s)
    /// * `state` - Current estimated vehicle state
    /// * `acceleration_ff` - Reference NED acceleration (m/s²)
    ///
    /// # Returns
    ///
    /// The command together with the tracked reference and the conditions
    /// raised by each stage. Degenerate stages contribute zero commands; the
    /// cycle itself never fails.
    pub fn run_control_with_feed_forward(
        &self,
        trajectory: &Trajectory,
        current_time: f64,
        state: &VehicleState,
        acceleration_ff: Vector3<f64>,
    ) -> CascadeOutput {
        let reference = self.trajectory_control(trajectory, current_time);

        // Vertical branch in +up quantities
        let thrust = self.altitude_control(
            -reference.position.z,
            -reference.velocity.z,
            state.altitude(),
            state.vertical_velocity(),
            &state.attitude,
            self.config.physical.gravity - acceleration_ff.z,
        );

        let acceleration_cmd = self.lateral_position_control(
            reference.position.xy(),
            reference.velocity.xy(),
            state.position.xy(),
            state.velocity.xy(),
            acceleration_ff.xy(),
        );

        let roll_pitch = self.roll_pitch_control(acceleration_cmd, &state.attitude, thrust.command);
        let yaw_rate = self.yaw_control(reference.yaw, state.attitude.z);

        let body_rate_cmd = Vector3::new(roll_pitch.command.x, roll_pitch.command.y, yaw_rate);
        let moments = self.body_rate_control(body_rate_cmd, state.body_rate);

        CascadeOutput {
            command: ControlCommand {
                thrust: thrust.command,
                moments: moments.command,
            },
            reference,
            body_rate_cmd,
            diagnostics: Diagnostics {
                altitude: thrust.degenerate,
                roll_pitch: roll_pitch.degenerate,
                thrust_saturated: thrust.saturated,
                tilt_saturated: roll_pitch.saturated,
                moment_saturated: moments.saturated,
            },
        }
    }
}
