//! Image output.
//!
//! Converts linear colors to 8-bit with gamma 2 and writes them as plain
//! PPM (`P3`) or PNG.

use crate::{Color, ImageBuffer, OutputError};
use orb_math::Interval;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Channel range before scaling; the open top keeps 1.0 from reaching 256.
const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm,
    Png,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "ppm" => Ok(OutputFormat::Ppm),
            "png" => Ok(OutputFormat::Png),
            _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
        }
    }
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

/// Convert one linear channel to a byte.
#[inline]
pub fn encode_channel(linear: f32) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

fn encode_color(color: Color) -> [u8; 3] {
    [
        encode_channel(color.x),
        encode_channel(color.y),
        encode_channel(color.z),
    ]
}

/// Write an image as plain-text PPM, one pixel per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = encode_color(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_png(image: &ImageBuffer, path: &Path) -> Result<(), OutputError> {
    let png = image::RgbImage::from_fn(image.width, image.height, |x, y| {
        image::Rgb(encode_color(image.get(x, y)))
    });
    png.save(path)?;
    Ok(())
}

/// Save an image, choosing the encoder from the path extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<(), OutputError> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Ppm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, &mut writer)?;
        }
        OutputFormat::Png => write_png(image, path)?,
    }

    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_encode_channel_bounds() {
        assert_eq!(encode_channel(0.0), 0);
        assert_eq!(encode_channel(1.0), 255);
        // Overexposed and negative values stay in range
        assert_eq!(encode_channel(4.0), 255);
        assert_eq!(encode_channel(-0.5), 0);
        assert_eq!(encode_channel(0.25), 128);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(1.0, 0.0, 0.25));
        image.set(1, 0, Color::new(0.0, 1.0, 0.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 128\n0 255 0\n");
    }

    #[test]
    fn test_render_output_is_byte_identical_per_seed() {
        use crate::{render, Camera, HittableList, Lambertian, Point3, Sphere, Vec3};
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use std::sync::Arc;

        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
        )));
        let frame = Camera::new()
            .with_image(1.0, 20)
            .with_quality(1, 10)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .initialize();

        let encode = |seed: u64| {
            let image = render(&frame, &world, &mut StdRng::seed_from_u64(seed));
            let mut out = Vec::new();
            write_ppm(&image, &mut out).unwrap();
            out
        };

        assert_eq!(encode(31337), encode(31337));
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.ppm")).unwrap(), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")).unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.exr")),
            Err(OutputError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_save_image_roundtrip_ppm() {
        let path = std::env::temp_dir().join(format!("orb_output_test_{}.ppm", std::process::id()));
        let image = ImageBuffer::new(3, 2);

        save_image(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.starts_with("P3\n3 2\n255\n"));
        assert_eq!(text.lines().count(), 3 + 6);
    }
}
