//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Placement and lens settings a [`Camera`] is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    // Image shape
    pub aspect_ratio: f32,

    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,       // Vertical field of view in degrees
    pub aperture: f32,   // Lens diameter, 0 = pinhole
    pub focus_dist: f32, // Distance from camera to plane of perfect focus
}

impl CameraConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Derive the camera.
    pub fn build(&self) -> Camera {
        Camera::new(self)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built; all viewport geometry is precomputed.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Derive the camera frame and viewport from `config`.
    pub fn new(config: &CameraConfig) -> Self {
        // Calculate viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = u * viewport_width * config.focus_dist;
        let vertical = v * viewport_height * config.focus_dist;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - w * config.focus_dist;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate a ray through normalized viewport coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner and (1, 1) the upper-right. The origin
    /// is jittered across the lens disk for depth of field.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// Camera position in world space.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal camera frame (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Half the aperture.
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraConfig::default().build()
    }
}
