//! Time-indexed waypoint sequences and the sampler that turns them into
//! position, velocity and yaw commands.

use crate::Error;
use nalgebra::Vector3;

/// One trajectory sample in the local NED frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Timestamp (s)
    pub time: f64,
    /// NED position (m)
    pub position: Vector3<f64>,
    /// Yaw (rad)
    pub yaw: f64,
}

impl Waypoint {
    pub fn new(time: f64, position: Vector3<f64>, yaw: f64) -> Self {
        Self {
            time,
            position,
            yaw,
        }
    }
}

/// Commanded position, velocity and yaw for the current instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrajectoryCommand {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub yaw: f64,
}

/// Ordered, non-empty sequence of waypoints with non-decreasing timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    /// Builds a trajectory, rejecting empty, non-finite or out-of-order input.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, Error> {
        if waypoints.is_empty() {
            return Err(Error::InvalidTrajectory("no waypoints".to_string()));
        }

        for (index, waypoint) in waypoints.iter().enumerate() {
            let finite = waypoint.time.is_finite()
                && waypoint.yaw.is_finite()
                && waypoint.position.iter().all(|v| v.is_finite());
            if !finite {
                return Err(Error::InvalidTrajectory(format!(
                    "waypoint {index} has a non-finite component"
                )));
            }
        }

        if let Some(index) = waypoints.windows(2).position(|w| w[1].time < w[0].time) {
            return Err(Error::InvalidTrajectory(format!(
                "time decreases between waypoints {} and {}",
                index,
                index + 1
            )));
        }

        Ok(Self { waypoints })
    }

    /// Builds a trajectory from parallel position, yaw and time slices.
    pub fn from_slices(
        positions: &[Vector3<f64>],
        yaws: &[f64],
        times: &[f64],
    ) -> Result<Self, Error> {
        if positions.len() != yaws.len() || positions.len() != times.len() {
            return Err(Error::InvalidTrajectory(format!(
                "length mismatch: {} positions, {} yaws, {} times",
                positions.len(),
                yaws.len(),
                times.len()
            )));
        }

        let waypoints = positions
            .iter()
            .zip(yaws)
            .zip(times)
            .map(|((&position, &yaw), &time)| Waypoint::new(time, position, yaw))
            .collect();

        Self::new(waypoints)
    }

    /// A single waypoint held forever.
    pub fn hold(position: Vector3<f64>, yaw: f64) -> Self {
        Self {
            waypoints: vec![Waypoint::new(0.0, position, yaw)],
        }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Samples the trajectory at `now`.
    ///
    /// Finds the waypoint nearest in time (lowest index on ties). When `now`
    /// is before it, the command interpolates from the previous waypoint and
    /// takes the previous waypoint's yaw. Otherwise it interpolates toward the
    /// next waypoint and takes the nearest waypoint's yaw; past the last
    /// waypoint the position is held with zero velocity.
    ///
    /// Before the first waypoint, across zero-length spans, and for a
    /// non-finite `now`, the nearest waypoint is held. Sampling never fails.
    pub fn sample(&self, now: f64) -> TrajectoryCommand {
        let waypoints = &self.waypoints;

        if !now.is_finite() {
            log::warn!("non-finite trajectory time {now}, holding first waypoint");
            return hold_at(&waypoints[0]);
        }

        let nearest = self.nearest_index(now);
        let reference = &waypoints[nearest];

        if now < reference.time {
            if nearest == 0 {
                return hold_at(reference);
            }
            let previous = &waypoints[nearest - 1];
            interpolate(previous, reference, now, previous.yaw)
        } else {
            match waypoints.get(nearest + 1) {
                Some(next) => interpolate(reference, next, now, reference.yaw),
                None => hold_at(reference),
            }
        }
    }

    fn nearest_index(&self, now: f64) -> usize {
        let waypoints = &self.waypoints;

        // First waypoint at or after `now`
        let upper = waypoints.partition_point(|w| w.time < now);

        if upper == 0 {
            return 0;
        }

        let below = &waypoints[upper - 1];
        let lower = match waypoints.get(upper) {
            Some(above) if above.time - now < now - below.time => return upper,
            _ => upper - 1,
        };

        // Ties across duplicate timestamps resolve to the first of the group
        waypoints[..=lower].partition_point(|w| w.time < below.time)
    }
}

fn hold_at(waypoint: &Waypoint) -> TrajectoryCommand {
    TrajectoryCommand {
        position: waypoint.position,
        velocity: Vector3::zeros(),
        yaw: waypoint.yaw,
    }
}

fn interpolate(from: &Waypoint, to: &Waypoint, now: f64, yaw: f64) -> TrajectoryCommand {
    let span = to.time - from.time;
    if span <= 0.0 {
        return TrajectoryCommand {
            yaw,
            ..hold_at(from)
        };
    }

    let velocity = (to.position - from.position) / span;
    TrajectoryCommand {
        position: from.position + velocity * (now - from.time),
        velocity,
        yaw,
    }
}

/// Slice form of [`Trajectory::sample`].
///
/// Malformed input (empty or mismatched slices) is logged and yields a zero
/// command at the origin rather than an error.
pub fn trajectory_control(
    positions: &[Vector3<f64>],
    yaws: &[f64],
    times: &[f64],
    now: f64,
) -> TrajectoryCommand {
    match Trajectory::from_slices(positions, yaws, times) {
        Ok(trajectory) => trajectory.sample(now),
        Err(err) => {
            log::warn!("cannot sample trajectory: {err}");
            TrajectoryCommand::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_point() -> Trajectory {
        Trajectory::new(vec![
            Waypoint::new(0.0, Vector3::new(0.0, 0.0, 0.0), 0.1),
            Waypoint::new(2.0, Vector3::new(2.0, 0.0, 0.0), 0.2),
        ])
        .unwrap()
    }

    #[test]
    fn test_sample_at_waypoint_uses_forward_slope() {
        let cmd = two_point().sample(0.0);
        assert_relative_eq!(cmd.position, Vector3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(cmd.velocity, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(cmd.yaw, 0.1);
    }

    #[test]
    fn test_sample_before_nearest_uses_earlier_yaw() {
        // 1.5 is nearest to t = 2.0 and precedes it
        let cmd = two_point().sample(1.5);
        assert_relative_eq!(cmd.position, Vector3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(cmd.velocity, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(cmd.yaw, 0.1);
    }

    #[test]
    fn test_sample_after_nearest_uses_current_yaw() {
        let trajectory = Trajectory::new(vec![
            Waypoint::new(0.0, Vector3::zeros(), 0.1),
            Waypoint::new(2.0, Vector3::new(2.0, 0.0, 0.0), 0.2),
            Waypoint::new(4.0, Vector3::new(2.0, 4.0, 0.0), 0.3),
        ])
        .unwrap();

        let cmd = trajectory.sample(2.5);
        assert_relative_eq!(cmd.position, Vector3::new(2.0, 1.0, 0.0));
        assert_relative_eq!(cmd.velocity, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(cmd.yaw, 0.2);
    }

    #[test]
    fn test_sample_past_end_holds() {
        let cmd = two_point().sample(10.0);
        assert_relative_eq!(cmd.position, Vector3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(cmd.velocity, Vector3::zeros());
        assert_eq!(cmd.yaw, 0.2);

        let at_end = two_point().sample(2.0);
        assert_relative_eq!(at_end.velocity, Vector3::zeros());
    }

    #[test]
    fn test_sample_before_start_holds_first() {
        let cmd = two_point().sample(-3.0);
        assert_relative_eq!(cmd.position, Vector3::zeros());
        assert_relative_eq!(cmd.velocity, Vector3::zeros());
        assert_eq!(cmd.yaw, 0.1);
    }

    #[test]
    fn test_midpoint_tie_picks_lower_index() {
        // t = 1.0 is equidistant; the earlier waypoint wins and `now` is after it
        let cmd = two_point().sample(1.0);
        assert_relative_eq!(cmd.position, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(cmd.yaw, 0.1);
    }

    #[test]
    fn test_zero_length_span_holds() {
        let trajectory = Trajectory::new(vec![
            Waypoint::new(0.0, Vector3::zeros(), 0.0),
            Waypoint::new(1.0, Vector3::new(1.0, 0.0, 0.0), 0.5),
            Waypoint::new(1.0, Vector3::new(3.0, 0.0, 0.0), 0.7),
        ])
        .unwrap();

        let cmd = trajectory.sample(1.0);
        assert_relative_eq!(cmd.position, Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(cmd.velocity, Vector3::zeros());
        assert_eq!(cmd.yaw, 0.5);
        assert!(cmd.position.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_finite_time_holds_first() {
        let cmd = two_point().sample(f64::NAN);
        assert_relative_eq!(cmd.position, Vector3::zeros());
        assert_relative_eq!(cmd.velocity, Vector3::zeros());
    }

    #[test]
    fn test_single_waypoint() {
        let trajectory = Trajectory::hold(Vector3::new(0.0, 0.0, -5.0), 0.3);
        for now in [-1.0, 0.0, 7.5] {
            let cmd = trajectory.sample(now);
            assert_relative_eq!(cmd.position, Vector3::new(0.0, 0.0, -5.0));
            assert_relative_eq!(cmd.velocity, Vector3::zeros());
            assert_eq!(cmd.yaw, 0.3);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Trajectory::new(vec![]),
            Err(Error::InvalidTrajectory(_))
        ));
        assert!(matches!(
            Trajectory::new(vec![
                Waypoint::new(1.0, Vector3::zeros(), 0.0),
                Waypoint::new(0.5, Vector3::zeros(), 0.0),
            ]),
            Err(Error::InvalidTrajectory(_))
        ));
        assert!(matches!(
            Trajectory::from_slices(&[Vector3::zeros()], &[0.0, 1.0], &[0.0]),
            Err(Error::InvalidTrajectory(_))
        ));
    }

    #[test]
    fn test_slice_form_matches() {
        let positions = [Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0)];
        let cmd = trajectory_control(&positions, &[0.1, 0.2], &[0.0, 2.0], 0.0);
        assert_relative_eq!(cmd.velocity, Vector3::new(1.0, 0.0, 0.0));

        let fallback = trajectory_control(&[], &[], &[], 1.0);
        assert_eq!(fallback, TrajectoryCommand::default());
    }
}
