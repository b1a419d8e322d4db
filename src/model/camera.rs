use glam::{Mat4, Vec3};

use super::{NodeId, Scene};

/// Projection parameters for the node the controller pitches.
///
/// Placement comes from the scene graph; this only knows how to look
/// through it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fov_y: 60f32.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn eye(scene: &Scene, node: NodeId) -> Option<Vec3> {
        Some(scene.world_matrix(node)?.transform_point3(Vec3::ZERO))
    }

    /// World-space viewing direction of the camera node.
    pub fn world_forward(scene: &Scene, node: NodeId) -> Option<Vec3> {
        Some(scene.world_matrix(node)?.transform_vector3(Vec3::Z).normalize())
    }

    pub fn view_proj(&self, scene: &Scene, node: NodeId) -> Option<Mat4> {
        let world = scene.world_matrix(node)?;
        let eye = world.transform_point3(Vec3::ZERO);
        let forward = world.transform_vector3(Vec3::Z);
        let up = world.transform_vector3(Vec3::Y);
        let view = Mat4::look_to_rh(eye, forward, up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        Some(proj * view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{pitch_rotation, yaw_rotation, NodeKind, Transform};

    #[test]
    fn forward_follows_body_yaw_and_camera_pitch() {
        let mut scene = Scene::new();
        let body = scene.spawn(
            "body",
            NodeKind::Empty,
            Transform::IDENTITY.with_rotation(yaw_rotation(90.0)),
        );
        let eye = scene
            .spawn_child(
                body,
                "eye",
                NodeKind::Camera,
                Transform::from_position(Vec3::new(0.0, 1.6, 0.0)).with_rotation(pitch_rotation(45.0)),
            )
            .unwrap();

        let fwd = Camera::world_forward(&scene, eye).unwrap();
        assert!(fwd.x > 0.5);
        assert!(fwd.y < -0.5);
        assert!(fwd.z.abs() < 1e-5);
        assert!((Camera::eye(&scene, eye).unwrap() - Vec3::new(0.0, 1.6, 0.0)).length() < 1e-5);
    }

    #[test]
    fn view_proj_maps_point_ahead_into_clip_space() {
        let mut scene = Scene::new();
        let eye = scene.spawn("eye", NodeKind::Camera, Transform::IDENTITY);
        let cam = Camera::new(800, 600);

        let vp = cam.view_proj(&scene, eye).unwrap();
        let clip = vp * Vec3::new(0.0, 0.0, 10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }

    #[test]
    fn missing_node_has_no_view() {
        let scene = Scene::new();
        assert!(Camera::new(1, 1).view_proj(&scene, NodeId(0)).is_none());
    }
}
