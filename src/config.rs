//! Gains and physical constants, fixed for the lifetime of a controller.

use crate::Error;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Proportional and derivative gain for one axis.
///
/// A `k_d` of zero turns the law into a pure proportional controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    pub k_p: f64,
    #[serde(default)]
    pub k_d: f64,
}

impl Gains {
    /// Proportional-derivative gains.
    pub const fn pd(k_p: f64, k_d: f64) -> Self {
        Self { k_p, k_d }
    }

    /// Proportional-only gains.
    pub const fn p(k_p: f64) -> Self {
        Self { k_p, k_d: 0.0 }
    }

    fn validate(&self, name: &str) -> Result<(), Error> {
        if !self.k_p.is_finite() || !self.k_d.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "{name} gains must be finite (k_p = {}, k_d = {})",
                self.k_p, self.k_d
            )));
        }
        Ok(())
    }
}

/// Gains for a pair of symmetric axes (x/y, roll/pitch, p/q).
///
/// `Shared` is structural coupling: one configured value drives both axes.
/// `Independent` gives each axis its own tuning, even when the values happen
/// to be equal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "coupling", rename_all = "snake_case")]
pub enum AxisPair {
    Shared(Gains),
    Independent { first: Gains, second: Gains },
}

impl AxisPair {
    pub fn first(&self) -> Gains {
        match *self {
            AxisPair::Shared(gains) => gains,
            AxisPair::Independent { first, .. } => first,
        }
    }

    pub fn second(&self) -> Gains {
        match *self {
            AxisPair::Shared(gains) => gains,
            AxisPair::Independent { second, .. } => second,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, AxisPair::Shared(_))
    }

    fn validate(&self, name: &str) -> Result<(), Error> {
        self.first().validate(name)?;
        self.second().validate(name)
    }
}

/// Tuning for every stage of the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainSchedule {
    /// Vertical position/velocity PD law
    pub altitude: Gains,
    /// Yaw angle P law
    pub yaw: Gains,
    /// North/east position/velocity PD laws
    pub lateral: AxisPair,
    /// Tilt P laws for the north (roll) and east (pitch) components
    pub roll_pitch: AxisPair,
    /// Body-rate P laws for p and q
    pub body_rate_pq: AxisPair,
    /// Body-rate P law for r
    pub body_rate_r: Gains,
}

impl Default for GainSchedule {
    fn default() -> Self {
        Self {
            altitude: Gains::pd(8.0, 4.0),
            yaw: Gains::p(5.5),
            lateral: AxisPair::Shared(Gains::pd(5.0, 4.0)),
            roll_pitch: AxisPair::Shared(Gains::p(8.0)),
            body_rate_pq: AxisPair::Shared(Gains::p(20.0)),
            body_rate_r: Gains::p(7.5),
        }
    }
}

/// Physical properties and safety limits of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Vehicle mass (kg)
    pub mass: f64,
    /// Magnitude of gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Principal moments of inertia about the body axes (kg⋅m²)
    pub moment_of_inertia: Vector3<f64>,
    /// Upper bound on collective thrust (N)
    pub max_thrust: f64,
    /// Bound on each body moment (N⋅m)
    pub max_torque: f64,
    /// Bound on each commanded tilt component
    pub max_tilt: f64,
    /// Singularity detection threshold
    pub epsilon: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            mass: 0.5,
            gravity: 9.81,
            moment_of_inertia: Vector3::new(0.005, 0.005, 0.01),
            max_thrust: 10.0,
            max_torque: 1.0,
            max_tilt: 1.0,
            epsilon: 1.0e-4,
        }
    }
}

impl PhysicalConstants {
    fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("mass", self.mass),
            ("moment_of_inertia.x", self.moment_of_inertia.x),
            ("moment_of_inertia.y", self.moment_of_inertia.y),
            ("moment_of_inertia.z", self.moment_of_inertia.z),
            ("max_thrust", self.max_thrust),
            ("max_torque", self.max_torque),
            ("max_tilt", self.max_tilt),
            ("epsilon", self.epsilon),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "gravity must be a finite magnitude, got {}",
                self.gravity
            )));
        }

        Ok(())
    }
}

/// Complete controller configuration.
///
/// Every field has a default, so a YAML document only needs to name what it
/// overrides:
///
/// gains:
///   altitude: { k_p: 6.0, k_d: 3.0 }
///   lateral: { coupling: independent, first: { k_p: 5.0, k_d: 4.0 }, second: { k_p: 4.0, k_d: 3.5 } }
/// physical:
///   mass: 1.2
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub gains: GainSchedule,
    pub physical: PhysicalConstants,
}

impl ControllerConfig {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML configuration from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all gains are finite and all physical limits are positive.
    pub fn validate(&self) -> Result<(), Error> {
        let gains = &self.gains;
        gains.altitude.validate("altitude")?;
        gains.yaw.validate("yaw")?;
        gains.lateral.validate("lateral")?;
        gains.roll_pitch.validate("roll_pitch")?;
        gains.body_rate_pq.validate("body_rate_pq")?;
        gains.body_rate_r.validate("body_rate_r")?;
        self.physical.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.gains.lateral.is_shared());
        assert_eq!(config.gains.body_rate_pq.first(), Gains::p(20.0));
        assert_eq!(config.physical.mass, 0.5);
    }

    #[test]
    fn test_yaml_overrides_and_defaults() {
        let yaml = r#"
gains:
  altitude: { k_p: 6.0, k_d: 3.0 }
  yaw: { k_p: 2.0 }
  lateral:
    coupling: independent
    first: { k_p: 5.0, k_d: 4.0 }
    second: { k_p: 4.0, k_d: 3.5 }
physical:
  mass: 1.2
  moment_of_inertia: [0.01, 0.01, 0.02]
"#;
        let config = ControllerConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.gains.altitude, Gains::pd(6.0, 3.0));
        assert_eq!(config.gains.yaw, Gains::p(2.0));
        assert!(!config.gains.lateral.is_shared());
        assert_eq!(config.gains.lateral.second(), Gains::pd(4.0, 3.5));
        assert!(config.gains.roll_pitch.is_shared());
        assert_eq!(config.physical.mass, 1.2);
        assert_eq!(config.physical.moment_of_inertia.z, 0.02);
        assert_eq!(config.physical.max_thrust, 10.0);
    }

    #[test]
    fn test_shared_pair_from_yaml() {
        let yaml = "gains:\n  roll_pitch: { coupling: shared, k_p: 6.5 }\n";
        let config = ControllerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.gains.roll_pitch, AxisPair::Shared(Gains::p(6.5)));
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let result = ControllerConfig::from_yaml_str("physical:\n  mass: 0.0\n");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_gain() {
        let mut config = ControllerConfig::default();
        config.gains.body_rate_r = Gains::p(f64::NAN);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = ControllerConfig::from_yaml_str("gains: [1, 2");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
