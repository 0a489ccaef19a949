/// Singular configurations where a stage cannot compute its command.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    /// The vehicle is edge-on: `|R[2][2]|` is within epsilon of zero
    #[error("attitude is edge-on, vertical tilt component within epsilon")]
    Attitude,
    /// The thrust command is within epsilon of zero, leaving no tilt authority
    #[error("thrust command within epsilon, no tilt authority")]
    Thrust,
}

/// Result of a single stage: the command plus any conditions hit producing it.
///
/// A degenerate stage still returns a well-formed (zero) command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome<T> {
    pub command: T,
    pub degenerate: Option<Degeneracy>,
    /// At least one component was clamped to its physical bound
    pub saturated: bool,
}

impl<T> Outcome<T> {
    pub fn nominal(command: T) -> Self {
        Self {
            command,
            degenerate: None,
            saturated: false,
        }
    }

    pub fn saturated(command: T, saturated: bool) -> Self {
        Self {
            command,
            degenerate: None,
            saturated,
        }
    }

    pub fn degenerate(command: T, reason: Degeneracy) -> Self {
        Self {
            command,
            degenerate: Some(reason),
            saturated: false,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }
}

/// Per-cycle summary of every condition raised across the cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub altitude: Option<Degeneracy>,
    pub roll_pitch: Option<Degeneracy>,
    pub thrust_saturated: bool,
    pub tilt_saturated: bool,
    pub moment_saturated: bool,
}

impl Diagnostics {
    pub fn is_degenerate(&self) -> bool {
        self.altitude.is_some() || self.roll_pitch.is_some()
    }

    pub fn is_saturated(&self) -> bool {
        self.thrust_saturated || self.tilt_saturated || self.moment_saturated
    }
}

/// Clamps `value` into `[low, high]`, reporting whether it moved.
pub(crate) fn clamp(value: f64, low: f64, high: f64) -> (f64, bool) {
    let clamped = value.max(low).min(high);
    (clamped, clamped != value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_reports_saturation() {
        assert_eq!(clamp(0.5, 0.0, 1.0), (0.5, false));
        assert_eq!(clamp(3.0, 0.0, 1.0), (1.0, true));
        assert_eq!(clamp(-3.0, -1.0, 1.0), (-1.0, true));
    }

    #[test]
    fn test_degeneracy_display() {
        assert!(Degeneracy::Thrust.to_string().contains("thrust"));
    }
}
