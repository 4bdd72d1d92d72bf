//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a bounce budget
//! - Anti-aliasing via jittered multi-sampling
//! - A sequential driver and a scanline-parallel driver

use crate::{Camera, Color, Hittable, RenderError, RenderResult};
use crate::sampling::gen_f32;
use lumen_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// Minimum accepted hit distance; keeps scattered rays off their own surface.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Largest image, in pixels, a render will allocate.
pub const MAX_IMAGE_PIXELS: usize = 1 << 28;

/// Order in which columns of a scanline are traced and stored.
///
/// Buffer column 0 is always stored first. With [`ColumnOrder::RightToLeft`]
/// it holds the rightmost viewport column (`i = width - 1`), so the saved
/// image is the horizontal mirror of the camera's view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrder {
    /// `i` from `width - 1` down to `0`
    #[default]
    RightToLeft,
    /// `i` from `0` up to `width - 1`
    LeftToRight,
}

impl ColumnOrder {
    /// Viewport column `i` traced for buffer column `x`.
    #[inline]
    pub fn column(self, x: u32, width: u32) -> u32 {
        match self {
            ColumnOrder::RightToLeft => width - 1 - x,
            ColumnOrder::LeftToRight => x,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: i32,
    /// Column traversal within a scanline
    pub column_order: ColumnOrder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            column_order: ColumnOrder::default(),
        }
    }
}

impl RenderConfig {
    /// Image aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Check the settings before rendering.
    ///
    /// The driver divides by `width - 1` and `height - 1`, so both must be
    /// at least 2. The pixel count is capped at [`MAX_IMAGE_PIXELS`].
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width < 2 || self.image_height < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        let pixels = (self.image_width as usize).checked_mul(self.image_height as usize);
        if !pixels.is_some_and(|n| n <= MAX_IMAGE_PIXELS) {
            return Err(RenderError::InvalidConfig(format!(
                "image of {}x{} pixels exceeds the limit of {} pixels",
                self.image_width, self.image_height, MAX_IMAGE_PIXELS
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if self.max_depth < 0 {
            return Err(RenderError::InvalidConfig(format!(
                "max depth must not be negative, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. Each bounce multiplies the light
/// gathered further along the path by the material's attenuation. `depth`
/// strictly decreases, so the recursion ends after at most `depth` calls.
pub fn ray_color(ray: &Ray, world: &Hittable, depth: i32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the bounce limit, no more light is gathered
    if depth <= 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Blends white (looking down) into sky blue (looking up) by the vertical
/// component of the unit direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` counts columns from the left and rows from the bottom. Returns
/// the average of all samples. Dimensions below 2 are treated as 2.
pub fn render_pixel(
    camera: &Camera,
    world: &Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = (config.image_width.max(2) - 1) as f32;
    let height = (config.image_height.max(2) - 1) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width;
        let v = (j as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Image buffer of averaged linear colors.
///
/// Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to gamma-corrected RGB bytes in buffer order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }
}

/// Render the entire scene on the calling thread.
///
/// Rows go from the top of the image (`j = height - 1`) down to the bottom,
/// columns in `config.column_order`, all samples drawing from `rng`.
pub fn render(
    camera: &Camera,
    world: &Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for row in 0..config.image_height {
        let j = config.image_height - 1 - row;
        log::debug!("Scanlines remaining: {}", j);
        for x in 0..config.image_width {
            let i = config.column_order.column(x, config.image_width);
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(x, row, color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render the entire scene with one rayon task per scanline.
///
/// Each row draws from its own generator seeded from `seed` and the row
/// index, so the result depends only on the seed, not on the thread count.
pub fn render_parallel(
    camera: &Camera,
    world: &Hittable,
    config: &RenderConfig,
    seed: u64,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} on {} threads",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    image
        .pixels
        .par_chunks_mut(config.image_width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            let j = config.image_height - 1 - row as u32;
            let mut rng = StdRng::seed_from_u64(row_seed(seed, row as u64));
            for (x, pixel) in pixels.iter_mut().enumerate() {
                let i = config.column_order.column(x as u32, config.image_width);
                *pixel = render_pixel(camera, world, i, j, config, &mut rng);
            }
        });

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

/// Independent stream seed for one scanline.
#[inline]
fn row_seed(seed: u64, row: u64) -> u64 {
    seed ^ row.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
