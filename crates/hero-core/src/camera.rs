//! Perspective camera and group orientation for the point field.

use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +z axis looking at the origin.
    pub fn looking_at_origin(camera_z: f32, fovy_deg: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, camera_z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: fovy_deg.to_radians(),
            znear,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio from pixel dimensions. Zero-area sizes leave
    /// the projection untouched and return `false`.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }
}

/// Model matrix for the point group tilted by `(rx, ry)` radians.
#[inline]
pub fn group_rotation(rotation: Vec2) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, 0.0)
}

/// Surface size in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Physical size for a CSS size at `device_pixel_ratio`, with the ratio
    /// capped to keep fill cost bounded on dense displays.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64, max_ratio: f64) -> Self {
        let dpr = device_pixel_ratio.clamp(0.0, max_ratio.max(0.0));
        Self {
            width: (css_width.max(0.0) * dpr).round() as u32,
            height: (css_height.max(0.0) * dpr).round() as u32,
        }
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}
