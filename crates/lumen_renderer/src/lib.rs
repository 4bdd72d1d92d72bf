//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes of spheres with diffuse, metal and
//! glass materials.
//!
//! Randomness is never global: every sampling call takes an explicit
//! generator, so renders are reproducible from a seed.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod sampling;
pub mod scene;
mod sphere;

pub use camera::{Camera, CameraConfig};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{diffuse_direction, reflect, refract, Color, Material, ScatterResult};
pub use output::{save_image, save_png, save_ppm, write_ppm, OutputFormat};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_parallel, render_pixel,
    sky_gradient, ColumnOrder, ImageBuffer, RenderConfig, MAX_IMAGE_PIXELS, SHADOW_ACNE_EPSILON,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
