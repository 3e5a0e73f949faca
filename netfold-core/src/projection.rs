/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Distance the camera moves along its view direction per zoom command.
const ZOOM_STEP: f32 = 0.5;

/// Perspective camera used for label projection and rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    home: Point3<f32>,
}

impl Camera {
    /// `home` is the shape's initial viewpoint, restored by `reset_view`.
    pub fn new(width: u32, height: u32, home: Point3<f32>) -> Self {
        Self {
            position: home,
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 1000.0,
            home,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Move toward the target. Camera commands are orthogonal to the
    /// animation driver.
    pub fn zoom_in(&mut self) {
        let dir = (self.target - self.position).normalize();
        self.position += dir * ZOOM_STEP;
    }

    /// Move away from the target.
    pub fn zoom_out(&mut self) {
        let dir = (self.target - self.position).normalize();
        self.position -= dir * ZOOM_STEP;
    }

    /// Restore the home viewpoint.
    pub fn reset_view(&mut self) {
        self.position = self.home;
        self.target = Point3::origin();
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a world-space point to pixel coordinates.
    ///
    /// Returns `(x, y, depth)`, or `None` when the point is behind the
    /// camera or outside the view frustum.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix();
        let clip = mvp * point.to_homogeneous();

        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}
