use glam::Vec3;
use tracing::debug;

use crate::model::Transform;

/// Collision-aware mover for a capsule-shaped body.
///
/// The controller only decides where the body wants to go; sweeping,
/// collision response and ground detection belong to the implementor.
pub trait CapsuleMover {
    /// Whether the last move ended in contact with walkable ground.
    fn is_grounded(&self) -> bool;

    /// Move `body` by `displacement`, resolving collisions on the way, and
    /// refresh the grounded state.
    fn move_by(&mut self, body: &mut Transform, displacement: Vec3);
}

impl<M: CapsuleMover + ?Sized> CapsuleMover for Box<M> {
    fn is_grounded(&self) -> bool {
        (**self).is_grounded()
    }

    fn move_by(&mut self, body: &mut Transform, displacement: Vec3) {
        (**self).move_by(body, displacement)
    }
}

/// Horizontal limits of the walkable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

/// Capsule mover over an infinite flat floor.
///
/// The body position is the capsule center, like a character controller
/// whose pivot sits halfway up the collider.
#[derive(Debug, Clone)]
pub struct FlatGroundMover {
    pub height: f32,
    pub radius: f32,
    pub ground_height: f32,
    /// Distance above the floor that still counts as standing on it
    pub skin_width: f32,
    pub bounds: Option<WorldBounds>,
    grounded: bool,
}

impl Default for FlatGroundMover {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.3,
            ground_height: 0.0,
            skin_width: 0.08,
            bounds: None,
            grounded: false,
        }
    }
}

impl FlatGroundMover {
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: WorldBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Center height at which the capsule bottom rests on the floor.
    pub fn rest_height(&self) -> f32 {
        self.ground_height + self.height * 0.5
    }
}

impl CapsuleMover for FlatGroundMover {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, body: &mut Transform, displacement: Vec3) {
        let mut target = body.position + displacement;

        let rest = self.rest_height();
        if target.y < rest {
            target.y = rest;
        }

        if let Some(b) = self.bounds {
            target.x = keep_inside(target.x, b.min_x, b.max_x, self.radius);
            target.z = keep_inside(target.z, b.min_z, b.max_z, self.radius);
        }

        let was_grounded = self.grounded;
        self.grounded = displacement.y <= 0.0 && target.y - rest <= self.skin_width;
        if self.grounded != was_grounded {
            if self.grounded {
                debug!(y = target.y, "capsule landed");
            } else {
                debug!(y = target.y, "capsule left ground");
            }
        }

        body.position = target;
    }
}

/// Clamp a capsule center to `[min, max]` shrunk by `radius`. A range
/// narrower than the capsule pins it to the middle.
fn keep_inside(v: f32, min: f32, max: f32, radius: f32) -> f32 {
    let lo = min + radius;
    let hi = max - radius;
    if lo > hi {
        (min + max) * 0.5
    } else {
        v.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_floor_and_reports_ground() {
        let mut mover = FlatGroundMover::new(0.0);
        let mut body = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
        mover.move_by(&mut body, Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(body.position.y, 0.9);
        assert!(mover.is_grounded());
    }

    #[test]
    fn airborne_above_skin_width() {
        let mut mover = FlatGroundMover::new(0.0);
        let mut body = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        mover.move_by(&mut body, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(body.position.y, 4.5);
        assert!(!mover.is_grounded());
    }

    #[test]
    fn moving_up_is_never_grounded() {
        let mut mover = FlatGroundMover::new(0.0);
        let mut body = Transform::from_position(Vec3::new(0.0, 0.9, 0.0));
        mover.move_by(&mut body, Vec3::new(0.0, 0.01, 0.0));
        assert!(!mover.is_grounded());
    }

    #[test]
    fn horizontal_moves_respect_bounds() {
        let mut mover = FlatGroundMover::new(0.0).with_bounds(WorldBounds {
            min_x: -1.0,
            max_x: 1.0,
            min_z: -1.0,
            max_z: 1.0,
        });
        let mut body = Transform::from_position(Vec3::new(0.0, 0.9, 0.0));
        mover.move_by(&mut body, Vec3::new(10.0, -0.1, -10.0));
        assert!((body.position.x - 0.7).abs() < 1e-6);
        assert!((body.position.z + 0.7).abs() < 1e-6);
        assert!(mover.is_grounded());
    }

    #[test]
    fn bounds_narrower_than_capsule_pin_to_middle() {
        let mut mover = FlatGroundMover::new(0.0).with_bounds(WorldBounds {
            min_x: 0.0,
            max_x: 0.5,
            min_z: -4.0,
            max_z: 4.0,
        });
        let mut body = Transform::from_position(Vec3::new(0.1, 0.9, 0.0));
        mover.move_by(&mut body, Vec3::new(0.01, -0.1, 0.0));
        assert!((body.position.x - 0.25).abs() < 1e-6);
        assert_eq!(body.position.z, 0.0);
        assert!(mover.is_grounded());
    }
}
