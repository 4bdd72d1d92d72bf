//! Materials describing how light scatters off a surface.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use lumen_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a scatter that was not absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel energy kept by this bounce
    pub attenuation: Color,
    /// The ray leaving the surface
    pub scattered: Ray,
}

/// Surface scattering laws.
///
/// Materials are immutable; spheres share them through `Arc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian {
        /// Surface reflectance per channel
        albedo: Color,
    },
    /// Specular reflector.
    Metal {
        /// Metal color
        albedo: Color,
        /// Roughness, 0.0 = perfect mirror, 1.0 = very rough
        fuzz: f32,
    },
    /// Transparent refractor (glass, water).
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
        ior: f32,
    },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material. Fuzz is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a Dielectric material.
    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns None if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let direction = diffuse_direction(rec.normal, random_unit_vector(rng));
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // Rays pushed below the surface are absorbed
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { ior } => {
                let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Lambertian bounce direction: normal plus a unit jitter.
///
/// Falls back to the normal when the two cancel out.
#[inline]
pub fn diffuse_direction(normal: Vec3, jitter: Vec3) -> Vec3 {
    let direction = normal + jitter;
    if direction.near_zero() {
        normal
    } else {
        direction
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
fn reflectance(cosine: f32, ratio: f32) -> f32 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ConstRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(material: &Material, normal: Vec3, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            t: 1.0,
            front_face,
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal { albedo: Color::ONE, fuzz: 1.0 }
        );
    }

    #[test]
    fn test_diffuse_direction_fallback() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(diffuse_direction(n, -n), n);
        assert_eq!(diffuse_direction(n, Vec3::X), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_lambertian_never_zero_direction() {
        // Build a normal that exactly cancels the jitter the pinned generator will draw
        let jitter = random_unit_vector(&mut ConstRng(0x4000_0000));
        let normal = -jitter;

        let mat = Material::lambertian(Color::new(0.5, 0.5, 0.5));
        let rec = record(&mat, normal, true);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -normal);

        let result = mat
            .scatter(&ray, &rec, &mut ConstRng(0x4000_0000))
            .expect("lambertian always scatters");
        assert_eq!(result.scattered.direction(), normal);
        assert!(result.scattered.direction().length() > 0.0);
        assert_eq!(result.attenuation, Color::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let mat = Material::lambertian(Color::ONE);
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, -Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(!result.scattered.direction().near_zero());
        }
    }

    #[test]
    fn test_metal_zero_fuzz_is_mirror() {
        let mat = Material::metal(Color::new(0.8, 0.6, 0.2), 0.0);
        let normal = Vec3::Y;
        let rec = record(&mat, normal, true);
        let d = Vec3::new(2.0, -3.0, 0.5);
        let ray = Ray::new(Vec3::new(-2.0, 3.0, -0.5), d);
        let mut rng = StdRng::seed_from_u64(9);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), reflect(d.normalize(), normal));
        assert_eq!(result.attenuation, Color::new(0.8, 0.6, 0.2));
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        // Grazing ray: mirror direction lies in the tangent plane, fuzz can't lift it
        let mat = Material::metal(Color::ONE, 0.0);
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rng = StdRng::seed_from_u64(2);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_dielectric_matched_index_passes_straight() {
        let mat = Material::dielectric(1.0);
        let normal = Vec3::Y;

        for &(x, front_face) in &[(0.0, true), (0.3, true), (1.0, false), (2.5, true), (6.0, false)] {
            let d = Vec3::new(x, -1.0, 0.25);
            let n = if front_face { normal } else { -normal };
            let d = if front_face { d } else { -d };
            let rec = record(&mat, n, front_face);
            let ray = Ray::new(Vec3::ZERO, d);

            // A draw near 1.0 keeps Schlick from choosing reflection
            let result = mat.scatter(&ray, &rec, &mut ConstRng::high()).unwrap();
            let out = result.scattered.direction();
            assert!(
                (out - d.normalize()).length() < 1e-5,
                "direction {out:?} bent away from {:?}",
                d.normalize()
            );
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a steep angle must reflect, whatever the draw
        let mat = Material::dielectric(1.5);
        let rec = record(&mat, Vec3::Y, false);
        let d = Vec3::new(1.0, -0.2, 0.0);
        let ray = Ray::new(Vec3::ZERO, d);

        let result = mat.scatter(&ray, &rec, &mut ConstRng::high()).unwrap();
        let expected = reflect(d.normalize(), Vec3::Y);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_dielectric_normal_incidence_refracts() {
        let mat = Material::dielectric(1.5);
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, -Vec3::Y);

        // r0 = 0.04 at normal incidence, a high draw refracts
        let result = mat.scatter(&ray, &rec, &mut ConstRng::high()).unwrap();
        assert!((result.scattered.direction() - (-Vec3::Y)).length() < 1e-6);
    }

    #[test]
    fn test_schlick_reflectance() {
        assert!(reflectance(1.0, 1.0).abs() < 1e-7);
        assert!((reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-6);
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
