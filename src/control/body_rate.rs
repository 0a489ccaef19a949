use super::outcome::{clamp, Outcome};
use crate::config::{AxisPair, Gains, PhysicalConstants};
use nalgebra::Vector3;

/// Inner-loop body-rate stage.
pub struct BodyRateController {
    p: Gains,
    q: Gains,
    r: Gains,
    moi: Vector3<f64>,
    max_torque: f64,
}

impl BodyRateController {
    pub fn new(pq: AxisPair, r: Gains, physical: &PhysicalConstants) -> Self {
        Self {
            p: pq.first(),
            q: pq.second(),
            r,
            moi: physical.moment_of_inertia,
            max_torque: physical.max_torque,
        }
    }

    /// Generate the roll, pitch, yaw moment commands in the body frame in Newtons*meters
    ///
    /// Each axis is `MOI * k_p * (cmd - rate)`, clamped independently to `±max_torque`.
    pub fn body_rate_control(
        &self,
        body_rate_cmd: Vector3<f64>,
        body_rate: Vector3<f64>,
    ) -> Outcome<Vector3<f64>> {
        let error = body_rate_cmd - body_rate;
        let raw = Vector3::new(
            self.moi.x * self.p.p_control(error.x),
            self.moi.y * self.q.p_control(error.y),
            self.moi.z * self.r.p_control(error.z),
        );

        let mut saturated = false;
        let moments = raw.map(|moment| {
            let (moment, hit) = clamp(moment, -self.max_torque, self.max_torque);
            saturated |= hit;
            moment
        });

        if saturated {
            log::debug!("moments saturated at {:?}", moments.as_slice());
        }

        Outcome::saturated(moments, saturated)
    }
}
