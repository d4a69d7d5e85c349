//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use crate::{CameraFrame, Color, HitRecord, Hittable, Ray};
use orb_math::Interval;
use rand::RngCore;
use std::time::Instant;

/// Smallest accepted hit distance; keeps bounced rays off their own surface.
const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating attenuation.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), &mut rec) {
        return sky_gradient(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        // Absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average of `samples_per_pixel` traced samples.
pub fn render_pixel(
    frame: &CameraFrame,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..frame.samples_per_pixel {
        let ray = frame.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, frame.max_depth, rng);
    }

    pixel_color * frame.samples_scale()
}

/// Image buffer of linear colors, stored row-major.
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

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }
}

/// Render the entire scene to an image buffer on the calling thread.
///
/// Pixels are visited in row-major order with a single random stream, so
/// the result is fully determined by the state of `rng`.
pub fn render(frame: &CameraFrame, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let mut image = ImageBuffer::new(frame.image_width, frame.image_height);
    let start = Instant::now();

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}",
        frame.image_width,
        frame.image_height,
        frame.samples_per_pixel,
        frame.max_depth
    );

    for y in 0..frame.image_height {
        log::debug!("Scanlines remaining: {}", frame.image_height - y);
        for x in 0..frame.image_width {
            let color = render_pixel(frame, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
