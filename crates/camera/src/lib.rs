#![warn(missing_docs)]
//! Reference camera for pointer-event projection and cursor placement.

use glam::{Mat4, Vec3};

/// Perspective camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction vector (where the camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Project a world point to pixel coordinates.
    ///
    /// Returns `None` when the point is at or behind the camera plane.
    pub fn world_to_screen(&self, point: Vec3, screen_size: (u32, u32)) -> Option<(f32, f32)> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * screen_size.0 as f32;
        let y = (1.0 - ndc.y) * 0.5 * screen_size.1 as f32; // Flip Y
        Some((x, y))
    }

    /// Convert pixel coordinates to a world-space ray direction from the camera.
    ///
    /// Returns (origin, normalized direction).
    pub fn screen_to_ray(&self, screen_pos: (f32, f32), screen_size: (u32, u32)) -> (Vec3, Vec3) {
        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let x = (2.0 * screen_pos.0) / screen_size.0 as f32 - 1.0;
        let y = 1.0 - (2.0 * screen_pos.1) / screen_size.1 as f32; // Flip Y

        // Compute ray in clip space
        let ray_clip = Vec3::new(x, y, -1.0);

        // Convert to view space
        let inv_proj = self.projection_matrix().inverse();
        let ray_eye = inv_proj.project_point3(ray_clip);
        let ray_eye = Vec3::new(ray_eye.x, ray_eye.y, -1.0);

        // Convert to world space
        let inv_view = self.view_matrix().inverse();
        let ray_world = inv_view.transform_vector3(ray_eye).normalize();

        (self.position, ray_world)
    }

    /// Unproject pixel coordinates to the world point `depth` units in
    /// front of the camera along its viewing axis.
    pub fn screen_to_world(&self, screen_pos: (f32, f32), screen_size: (u32, u32), depth: f32) -> Vec3 {
        let (origin, direction) = self.screen_to_ray(screen_pos, screen_size);
        // Walk along the pixel ray until the forward-axis depth matches
        let t = depth / direction.dot(self.forward());
        origin + direction * t
    }
}
