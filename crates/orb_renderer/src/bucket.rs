//! Bucket-based parallel rendering.
//!
//! Divides the image into full-width bands of scanlines (buckets) that are
//! rendered independently on the rayon pool. Each bucket owns a disjoint
//! slice of the output buffer and its own random stream derived from the
//! render seed and the bucket index, so the image depends only on the seed.

use crate::renderer::render_pixel;
use crate::{CameraFrame, Color, Hittable, ImageBuffer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A band of scanlines to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Y coordinate of the bucket's first scanline
    pub y: u32,
    /// Width of the bucket in pixels (always the image width)
    pub width: u32,
    /// Number of scanlines in the bucket
    pub height: u32,
    /// Index of this bucket, top to bottom
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Seed for this bucket's random stream.
    pub fn seed(&self, render_seed: u64) -> u64 {
        render_seed ^ (self.index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default number of scanlines per bucket.
pub const DEFAULT_BUCKET_ROWS: u32 = 8;

/// Split an image into buckets of `rows` scanlines, top to bottom.
///
/// The last bucket is shorter when the height is not a multiple of `rows`.
pub fn generate_buckets(width: u32, height: u32, rows: u32) -> Vec<Bucket> {
    let rows = rows.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let bh = rows.min(height - y);
        buckets.push(Bucket::new(y, width, bh, buckets.len()));
        y += rows;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    frame: &CameraFrame,
    world: &dyn Hittable,
    render_seed: u64,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(bucket.seed(render_seed));
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for x in 0..bucket.width {
            pixels.push(render_pixel(frame, world, x, bucket.y + local_y, &mut rng));
        }
    }

    pixels
}

/// Render the entire scene on the current rayon pool.
///
/// The output is identical for a given `seed` regardless of the number of
/// worker threads.
pub fn render_parallel(frame: &CameraFrame, world: &dyn Hittable, seed: u64) -> ImageBuffer {
    let mut image = ImageBuffer::new(frame.image_width, frame.image_height);
    if image.pixels.is_empty() {
        return image;
    }

    let buckets = generate_buckets(frame.image_width, frame.image_height, DEFAULT_BUCKET_ROWS);
    let chunk_len = frame.image_width as usize * DEFAULT_BUCKET_ROWS as usize;
    let remaining = AtomicUsize::new(frame.image_height as usize);
    let start = Instant::now();

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} in {} buckets on {} threads",
        frame.image_width,
        frame.image_height,
        frame.samples_per_pixel,
        frame.max_depth,
        buckets.len(),
        rayon::current_num_threads()
    );

    image
        .pixels
        .par_chunks_mut(chunk_len)
        .zip(buckets.par_iter())
        .for_each(|(out, bucket)| {
            let pixels = render_bucket(bucket, frame, world, seed);
            out.copy_from_slice(&pixels);

            let left = remaining.fetch_sub(bucket.height as usize, Ordering::Relaxed)
                - bucket.height as usize;
            log::debug!("Scanlines remaining: {}", left);
        });

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
