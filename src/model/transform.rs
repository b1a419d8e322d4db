use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position and orientation of a scene node, relative to its parent.
///
/// Axis convention: +Y is up, forward is +Z and right is +X for an
/// unrotated transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Rotation about the vertical axis in degrees, normalized to `[0, 360)`.
    ///
    /// Reads back the yaw component of a yaw-pitch-roll decomposition, so a
    /// body placed with any heading reports that heading.
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        yaw.to_degrees().rem_euclid(360.0)
    }
}

/// Rotation of `degrees` about +Y. Positive yaw turns forward toward +X.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Rotation of `degrees` about +X. Positive pitch tilts forward toward -Y.
pub fn pitch_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_x(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_basis() {
        let t = Transform::IDENTITY;
        assert!(approx(t.forward(), Vec3::Z));
        assert!(approx(t.right(), Vec3::X));
        assert!(approx(t.up(), Vec3::Y));
    }

    #[test]
    fn positive_yaw_turns_forward_toward_right() {
        let t = Transform::IDENTITY.with_rotation(yaw_rotation(90.0));
        assert!(approx(t.forward(), Vec3::X));
        assert!(approx(t.right(), Vec3::NEG_Z));
    }

    #[test]
    fn positive_pitch_looks_down() {
        let t = Transform::IDENTITY.with_rotation(pitch_rotation(30.0));
        assert!(t.forward().y < 0.0);
    }

    #[test]
    fn yaw_read_back_is_normalized() {
        let t = Transform::IDENTITY.with_rotation(yaw_rotation(-90.0));
        assert!((t.yaw_degrees() - 270.0).abs() < 1e-3);

        let t = Transform::IDENTITY.with_rotation(yaw_rotation(45.0));
        assert!((t.yaw_degrees() - 45.0).abs() < 1e-3);
    }
}
