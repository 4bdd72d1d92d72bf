//! Image output: plain-text PPM and PNG.
//!
//! Both formats go through [`color_to_rgb8`], so channel values are
//! `floor(256 * clamp(sqrt(c), 0, 0.999))` of the averaged linear color.

use crate::renderer::color_to_rgb8;
use crate::{ImageBuffer, RenderError, RenderResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text "P3" portable pixmap
    Ppm,
    /// 8-bit RGB PNG
    Png,
}

impl OutputFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ppm" => Ok(OutputFormat::Ppm),
            "png" => Ok(OutputFormat::Png),
            _ => Err(RenderError::UnsupportedFormat(format!(
                "'{}' (expected .ppm or .png)",
                path.display()
            ))),
        }
    }
}

/// Write `image` as a P3 PPM.
///
/// Header `P3`, `<width> <height>`, `255`, then one `r g b` line per pixel
/// with the top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save `image` as a PPM file.
pub fn save_ppm(image: &ImageBuffer, path: &Path) -> RenderResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    Ok(())
}

/// Save `buffer` as a PNG file.
pub fn save_png(buffer: &ImageBuffer, path: &Path) -> RenderResult<()> {
    let rgb = image::RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb8())
        .ok_or_else(|| {
            RenderError::InvalidConfig(format!(
                "pixel buffer does not match {}x{}",
                buffer.width, buffer.height
            ))
        })?;
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save `image`, choosing the encoding from the file extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> RenderResult<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Ppm => save_ppm(image, path),
        OutputFormat::Png => save_png(image, path),
    }?;
    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render, CameraConfig, Color, Hittable, HittableList, Material, RenderConfig, Sphere, Vec3,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn parse_ppm(text: &str) -> (u32, u32, Vec<[u32; 3]>) {
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        let dims: Vec<u32> = lines
            .next()
            .unwrap()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(lines.next(), Some("255"));

        let pixels = lines
            .map(|line| {
                let v: Vec<u32> = line.split_whitespace().map(|s| s.parse().unwrap()).collect();
                assert_eq!(v.len(), 3);
                [v[0], v[1], v[2]]
            })
            .collect();
        (dims[0], dims[1], pixels)
    }

    #[test]
    fn test_ppm_layout() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.25, 1.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 255 255\n128 0 0\n0 128 255\n0 0 0\n"
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.ppm")).unwrap(), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("a/b/OUT.PNG")).unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.exr")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    fn sample_buffer() -> ImageBuffer {
        let mut buffer = ImageBuffer::new(2, 2);
        buffer.set(0, 0, Color::ONE);
        buffer.set(1, 0, Color::new(0.25, 0.0, 0.0));
        buffer.set(0, 1, Color::new(0.0, 0.25, 1.0));
        buffer.set(1, 1, Color::new(0.04, 0.5, 0.09));
        buffer
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lumen-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_image_png() {
        let buffer = sample_buffer();
        let path = temp_path("save.png");

        save_image(&buffer, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decoded.dimensions(), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(decoded.get_pixel(x, y).0, color_to_rgb8(buffer.get(x, y)));
            }
        }
    }

    #[test]
    fn test_save_image_ppm() {
        let buffer = sample_buffer();
        let path = temp_path("save.ppm");

        save_image(&buffer, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let (width, height, pixels) = parse_ppm(&text);
        assert_eq!((width, height), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                let expected = color_to_rgb8(buffer.get(x, y)).map(u32::from);
                assert_eq!(pixels[(y * width + x) as usize], expected);
            }
        }
    }

    #[test]
    fn test_save_image_rejects_unknown_extension() {
        let path = temp_path("save.exr");
        assert!(matches!(
            save_image(&sample_buffer(), &path),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_one_sphere_render_center_darker_than_corners() {
        let mut list = HittableList::new();
        list.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
        ));
        let world: Hittable = list.into();

        let config = RenderConfig {
            image_width: 21,
            image_height: 11,
            samples_per_pixel: 1,
            max_depth: 1,
            ..RenderConfig::default()
        };
        let camera = CameraConfig::new()
            .with_aspect_ratio(config.aspect_ratio())
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .build();
        let mut rng = StdRng::seed_from_u64(2024);

        let image = render(&camera, &world, &config, &mut rng).unwrap();
        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        let (width, height, pixels) = parse_ppm(&String::from_utf8(out).unwrap());

        assert_eq!((width, height), (21, 11));
        assert_eq!(pixels.len(), 21 * 11);

        let at = |x: u32, y: u32| pixels[(y * width + x) as usize];
        let center = at(10, 5);
        for corner in [at(0, 0), at(20, 0), at(0, 10), at(20, 10)] {
            for c in 0..3 {
                assert!(
                    center[c] < corner[c],
                    "center {center:?} not darker than corner {corner:?}"
                );
            }
        }
    }
}
