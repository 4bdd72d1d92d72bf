//! Sphere primitive for ray tracing.

use crate::{hittable::HitRecord, Material};
use lumen_math::{Interval, Ray, Vec3};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius is kept as-is: it flips the outward normal, which turns
/// the sphere inside out. Nesting one inside a positive sphere of the same
/// center makes a hollow shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Get the sphere's center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Get the sphere's signed radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the shared material.
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Nearest intersection with a parameter in the closed range `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}
