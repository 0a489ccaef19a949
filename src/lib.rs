//! # uav-control
//! A cascaded nonlinear flight controller for multirotor vehicles.
//!
//! Given a reference trajectory and the estimated vehicle state, the
//! [`NonlinearController`] produces a collective thrust and three body moments
//! each control cycle. The cascade runs:
//!
//! - [`trajectory`]: samples position, velocity and yaw commands by time
//! - lateral position: north/east PD law to a commanded acceleration
//! - altitude: vertical PD law to a tilt-compensated thrust
//! - roll-pitch: acceleration to body roll/pitch rates through the rotation matrix
//! - yaw: wrapped heading error to a yaw-rate command
//! - body rate: rate error to inertia-scaled, clamped moments
//!
//! Degenerate attitudes and zero thrust never abort a cycle; they are reported
//! through [`Outcome`] and [`Diagnostics`] alongside a safe zero command.
//!
//! [`dynamics`] provides a rigid-body plant for flying the controller in
//! closed loop.

pub mod config;
pub use config::{AxisPair, ControllerConfig, GainSchedule, Gains, PhysicalConstants};

pub mod control;
pub use control::{CascadeOutput, ControlCommand, Degeneracy, Diagnostics, NonlinearController, Outcome};

pub mod dynamics;

mod error;
pub use error::Error;

pub mod frame;

pub mod state;
pub use state::VehicleState;

pub mod trajectory;
pub use trajectory::{Trajectory, TrajectoryCommand, Waypoint};
