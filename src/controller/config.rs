use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, Result};

/// Vertical velocity a grounded body is pinned to each frame.
///
/// Slightly negative so the mover keeps sweeping into the floor and the
/// grounded flag does not flicker.
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

/// Design-time settings of a first-person controller.
///
/// Angles are in degrees, speeds in units per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub move_speed: f32,
    /// Vertical acceleration, negative pulls down
    pub gravity: f32,
    /// Degrees per unit of look input (per second when `look_uses_frame_time`)
    pub look_sensitivity: f32,
    pub look_uses_frame_time: bool,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub grounded_vertical_velocity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: -9.81,
            look_sensitivity: 120.0,
            look_uses_frame_time: false,
            pitch_min: -80.0,
            pitch_max: 80.0,
            grounded_vertical_velocity: GROUNDED_VERTICAL_VELOCITY,
        }
    }
}

impl ControllerConfig {
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_look_sensitivity(mut self, look_sensitivity: f32) -> Self {
        self.look_sensitivity = look_sensitivity;
        self
    }

    pub fn with_look_uses_frame_time(mut self, enabled: bool) -> Self {
        self.look_uses_frame_time = enabled;
        self
    }

    pub fn with_pitch_limits(mut self, min: f32, max: f32) -> Self {
        self.pitch_min = min;
        self.pitch_max = max;
        self
    }

    pub fn with_grounded_vertical_velocity(mut self, velocity: f32) -> Self {
        self.grounded_vertical_velocity = velocity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("look_sensitivity", self.look_sensitivity),
            ("pitch_min", self.pitch_min),
            ("pitch_max", self.pitch_max),
            ("grounded_vertical_velocity", self.grounded_vertical_velocity),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ControllerError::InvalidConfig(format!("{name} must be finite, got {value}")));
        }
        if self.pitch_min > self.pitch_max {
            return Err(ControllerError::InvalidConfig(format!(
                "pitch_min ({}) is above pitch_max ({})",
                self.pitch_min, self.pitch_max
            )));
        }
        if self.move_speed < 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "move_speed must not be negative, got {}",
                self.move_speed
            )));
        }
        if self.look_sensitivity < 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "look_sensitivity must not be negative, got {}",
                self.look_sensitivity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ControllerConfig::default();
        assert_eq!(c.move_speed, 5.0);
        assert_eq!(c.gravity, -9.81);
        assert_eq!(c.look_sensitivity, 120.0);
        assert!(!c.look_uses_frame_time);
        assert_eq!((c.pitch_min, c.pitch_max), (-80.0, 80.0));
        assert_eq!(c.grounded_vertical_velocity, -2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_pitch_limits() {
        let c = ControllerConfig::default().with_pitch_limits(10.0, -10.0);
        assert!(matches!(c.validate(), Err(ControllerError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_non_finite_values() {
        let c = ControllerConfig::default().with_gravity(f32::NAN);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("gravity"));

        let c = ControllerConfig::default().with_move_speed(f32::INFINITY);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_negative_speed_and_sensitivity() {
        assert!(ControllerConfig::default().with_move_speed(-1.0).validate().is_err());
        assert!(ControllerConfig::default().with_look_sensitivity(-0.5).validate().is_err());
    }

    #[test]
    fn equal_pitch_limits_are_allowed() {
        let c = ControllerConfig::default().with_pitch_limits(0.0, 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: ControllerConfig =
            serde_json::from_str(r#"{ "move_speed": 7.5, "look_uses_frame_time": true }"#).unwrap();
        assert_eq!(c.move_speed, 7.5);
        assert!(c.look_uses_frame_time);
        assert_eq!(c.gravity, -9.81);
        assert_eq!(c.pitch_max, 80.0);
    }
}
