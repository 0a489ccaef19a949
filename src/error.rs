/// Errors raised while building a controller, a trajectory, or running the plant model.
///
/// The control cascade itself never fails: degenerate inputs are reported
/// through [`Outcome`](crate::control::Outcome) instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A gain or physical constant is out of range
    #[error("invalid controller configuration: {0}")]
    InvalidConfig(String),
    /// Waypoints are empty, mismatched, non-finite or out of order
    #[error("invalid trajectory: {0}")]
    InvalidTrajectory(String),
    /// The YAML configuration could not be parsed
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The ODE solver did not reach the end of the requested span
    #[error("integration failed")]
    Integration,
}
