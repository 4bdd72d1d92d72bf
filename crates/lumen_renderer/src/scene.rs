//! Built-in scenes and their camera placements.

use crate::sampling::{gen_f32, gen_range, random_vec3, random_vec3_range};
use crate::{CameraConfig, Color, HittableList, Material, Sphere, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Four spheres on a large ground sphere.
///
/// The left glass sphere is hollow: a negative-radius sphere sits inside it
/// with the same center and the same material.
pub fn practice_scene() -> HittableList {
    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let left = Arc::new(Material::dielectric(1.5));
    let right = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left.clone()));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.4, left));
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right));
    world
}

/// Camera looking down at the practice scene, focused on its center sphere.
pub fn practice_camera(aspect_ratio: f32) -> CameraConfig {
    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    CameraConfig::new()
        .with_aspect_ratio(aspect_ratio)
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 0.1, (look_from - look_at).length())
}

/// Ground plane covered in a grid of small random spheres plus three large
/// feature spheres (glass, diffuse, metal).
pub fn random_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the metal feature sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng) * random_vec3(rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    log::debug!("Random scene has {} spheres", world.len());
    world
}

/// Wide shot of the random scene from a low angle.
pub fn random_camera(aspect_ratio: f32) -> CameraConfig {
    CameraConfig::new()
        .with_aspect_ratio(aspect_ratio)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
}
