use crate::config::Gains;

impl Gains {
    /// Proportional-derivative law with an additive feed-forward term.
    ///
    /// `k_p * error + k_d * error_dot + feed_forward`
    pub fn control(&self, error: f64, error_dot: f64, feed_forward: f64) -> f64 {
        self.k_p * error + self.k_d * error_dot + feed_forward
    }

    /// Proportional-only restriction of [`Gains::control`].
    pub fn p_control(&self, error: f64) -> f64 {
        self.control(error, 0.0, 0.0)
    }
}
