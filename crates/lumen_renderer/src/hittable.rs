//! Hittable objects and HitRecord for ray-object intersection.

use crate::{Material, Sphere};
use lumen_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Returned by value from `hit`; borrows the material from the scene.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the outward normal against the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let (front_face, normal) = face_normal(ray, outward_normal);
        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Resolve which side was hit and flip the normal to face the ray.
#[inline]
fn face_normal(ray: &Ray, outward_normal: Vec3) -> (bool, Vec3) {
    // If the ray and normal point in the same direction, we're inside
    let front_face = ray.direction().dot(outward_normal) < 0.0;
    let normal = if front_face {
        outward_normal
    } else {
        -outward_normal
    };
    (front_face, normal)
}

/// Anything a ray can intersect.
#[derive(Debug, Clone)]
pub enum Hittable {
    Sphere(Sphere),
    List(HittableList),
}

impl Hittable {
    /// Closest intersection with `ray` whose parameter lies in `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Hittable::Sphere(sphere)
    }
}

impl From<HittableList> for Hittable {
    fn from(list: HittableList) -> Self {
        Hittable::List(list)
    }
}

/// An ordered list of hittable objects.
///
/// Hit testing is a linear scan over every member.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Hittable>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Hittable>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Hittable> {
        self.objects.iter()
    }

    /// Closest intersection among all members.
    ///
    /// Each test is bounded by the nearest hit found so far.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl FromIterator<Hittable> for HittableList {
    fn from_iter<I: IntoIterator<Item = Hittable>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
