//! Pinhole camera for primary ray generation.

use crate::Ray;
use glint_core::CameraDescription;
use glint_math::Vec3;

/// Pinhole camera mapping normalized image coordinates to world rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,   // Vertical field of view in degrees
    aspect: f32, // Image width / height

    // Cached computed values (set by update())
    look: Vec3,
    u: Vec3,
    v: Vec3,
}

impl Camera {
    /// Create a camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect: 1.0,
            look: -Vec3::Z,
            u: Vec3::X,
            v: Vec3::Y,
        };
        camera.update();
        camera
    }

    pub fn from_description(description: &CameraDescription) -> Self {
        Camera::new()
            .with_position(description.position, description.look_at, description.up)
            .with_lens(description.fov, description.aspect_ratio)
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aspect: f32) -> Self {
        self.vfov = vfov;
        self.aspect = aspect;
        self.update();
        self
    }

    /// Recompute the view basis and image-plane spans.
    fn update(&mut self) {
        self.look = (self.look_at - self.look_from).normalize_or_zero();

        let right = self.look.cross(self.vup).normalize_or_zero();
        let up = right.cross(self.look);

        // Image plane one unit in front of the eye
        let height = 2.0 * (self.vfov.to_radians() / 2.0).tan();
        self.v = up * height;
        self.u = right * height * self.aspect;
    }

    /// Primary ray through normalized image coordinates.
    ///
    /// `(0, 0)` is the bottom-left corner of the image plane, `(1, 1)` the top-right.
    pub fn ray_through(&self, x: f32, y: f32) -> Ray {
        let direction = self.look + (x - 0.5) * self.u + (y - 0.5) * self.v;
        Ray::new(self.look_from, direction)
    }

    /// Image width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
