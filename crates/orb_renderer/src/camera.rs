//! Camera for ray generation.
//!
//! `Camera` holds the user-facing settings. `Camera::initialize` turns them
//! into a `CameraFrame`, the read-only pixel-to-ray mapping used while
//! rendering.

use crate::CameraError;
use orb_math::{gen_f32, near_zero, random_in_unit_disk, Point3, Ray, Vec3};
use rand::RngCore;

/// Camera settings.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    aspect_ratio: f32,
    image_width: u32,
    samples_per_pixel: u32,
    max_depth: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Variation angle of rays through each pixel, in degrees
    focus_dist: f32,    // Distance from camera to plane of perfect focus
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }

    /// Set image shape: width in pixels and width/height ratio.
    pub fn with_image(mut self, aspect_ratio: f32, image_width: u32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn vup(&self) -> Vec3 {
        self.vup
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn defocus_angle(&self) -> f32 {
        self.defocus_angle
    }

    pub fn focus_dist(&self) -> f32 {
        self.focus_dist
    }

    /// Image height derived from width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    /// Check the preconditions `initialize` relies on.
    ///
    /// Rendering with a camera that fails validation produces NaNs or a
    /// degenerate basis instead of an error.
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.samples_per_pixel == 0 {
            return Err(CameraError::ZeroSamples);
        }
        if self.image_width == 0 {
            return Err(CameraError::ZeroWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        let image_height = self.image_height();
        if self.image_width.checked_mul(image_height).is_none() {
            return Err(CameraError::ImageTooLarge {
                width: self.image_width,
                height: image_height,
            });
        }

        let view = self.look_from - self.look_at;
        if near_zero(view) {
            return Err(CameraError::DegenerateView);
        }
        if near_zero(self.vup.cross(view.normalize())) {
            return Err(CameraError::ParallelUp);
        }

        Ok(())
    }

    /// Derive the pixel grid and lens basis for rendering.
    pub fn initialize(&self) -> CameraFrame {
        let image_height = self.image_height();
        let center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / image_height as f32);

        let (u, v, w) = camera_basis(self.look_from, self.look_at, self.vup);

        // Image rows grow downward while v points up
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / self.image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = center - self.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();

        log::debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            self.image_width,
            image_height,
            viewport_width,
            viewport_height,
            defocus_radius
        );

        CameraFrame {
            image_width: self.image_width,
            image_height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            samples_scale: 1.0 / self.samples_per_pixel as f32,
            defocus_angle: self.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived camera state, computed once per render and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    samples_scale: f32,
    defocus_angle: f32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl CameraFrame {
    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts on the defocus disk (or at the center for a pinhole
    /// camera) and passes through a random point inside the pixel.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

/// Orthonormal camera basis `(u, v, w)`: right, up, and backward.
fn camera_basis(look_from: Point3, look_at: Point3, vup: Vec3) -> (Vec3, Vec3, Vec3) {
    let w = (look_from - look_at).normalize();
    let u = vup.cross(w).normalize();
    let v = w.cross(u);
    (u, v, w)
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::new();

        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_eq!(camera.image_width(), 100);
        assert_eq!(camera.image_height(), 100);
        assert_eq!(camera.samples_per_pixel(), 10);
        assert_eq!(camera.max_depth(), 10);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_image_height_derivation() {
        assert_eq!(Camera::new().with_image(3.0, 100).image_height(), 33);
        assert_eq!(Camera::new().with_image(16.0 / 9.0, 400).image_height(), 225);
        // Degenerate ratios still yield one row
        assert_eq!(Camera::new().with_image(1000.0, 100).image_height(), 1);
        assert_eq!(Camera::new().with_image(f32::INFINITY, 100).image_height(), 1);
    }

    #[test]
    fn test_camera_initialize() {
        let camera = Camera::new()
            .with_image(4.0 / 3.0, 800)
            .with_position(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .with_lens(90.0, 0.0, 1.0);

        let frame = camera.initialize();
        let (u, v, w) = camera_basis(camera.look_from(), camera.look_at(), camera.vup());

        assert_eq!(frame.center, Point3::ZERO);
        assert_eq!(frame.image_height, 600);
        assert!((u - Vec3::X).length() < 1e-6);
        assert!((v - Vec3::Y).length() < 1e-6);
        assert!((w - Vec3::Z).length() < 1e-6);
        assert!((frame.samples_scale() - 0.1).abs() < 1e-7);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new().with_position(
            Point3::new(13.0, 2.0, 3.0),
            Point3::ZERO,
            Vec3::Y,
        );
        let (u, v, w) = camera_basis(camera.look_from(), camera.look_at(), camera.vup());

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(u.dot(v).abs() < 1e-5);
        assert!(v.dot(w).abs() < 1e-5);
        assert!(w.dot(u).abs() < 1e-5);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let camera = Camera::new().with_lens(40.0, 2.0, 3.4);
        let a = camera.initialize();
        let b = camera.initialize();

        assert_eq!(a.pixel00_loc, b.pixel00_loc);
        assert_eq!(a.pixel_delta_u, b.pixel_delta_u);
        assert_eq!(a.defocus_disk_v, b.defocus_disk_v);
    }

    #[test]
    fn test_camera_ray_direction() {
        let frame = Camera::new()
            .with_image(1.0, 100)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .initialize();

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = frame.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Point3::ZERO);
        assert!(ray.direction().z < 0.0);
        assert!(ray.direction().x.abs() < 0.02 && ray.direction().y.abs() < 0.02);

        // Row 0 is the top of the image
        let top = frame.get_ray(50, 0, &mut rng);
        assert!(top.direction().y > 0.9);
    }

    #[test]
    fn test_pinhole_rays_share_origin() {
        let frame = Camera::new()
            .with_position(Point3::new(1.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
            .initialize();
        let mut rng = StdRng::seed_from_u64(9);

        for (i, j) in [(0, 0), (99, 0), (0, 99), (42, 17)] {
            assert_eq!(frame.get_ray(i, j, &mut rng).origin(), Point3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_defocus_origins_stay_on_disk() {
        let focus_dist = 10.0;
        let defocus_angle: f32 = 10.0;
        let frame = Camera::new()
            .with_lens(90.0, defocus_angle, focus_dist)
            .initialize();
        let radius = focus_dist * (defocus_angle / 2.0).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(5);

        let mut moved = false;
        for _ in 0..200 {
            let origin = frame.get_ray(10, 10, &mut rng).origin();
            // Disk lies in the camera's u/v plane around the center
            assert!(origin.z.abs() < 1e-6);
            assert!(origin.length() <= radius + 1e-4);
            moved |= origin.length() > 1e-3;
        }
        assert!(moved);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(matches!(
            Camera::new().with_quality(0, 10).validate(),
            Err(CameraError::ZeroSamples)
        ));
        assert!(matches!(
            Camera::new().with_image(1.0, 0).validate(),
            Err(CameraError::ZeroWidth)
        ));
        assert!(matches!(
            Camera::new().with_image(-2.0, 100).validate(),
            Err(CameraError::InvalidAspectRatio(_))
        ));
        assert!(matches!(
            Camera::new().with_image(1.0, 70_000).validate(),
            Err(CameraError::ImageTooLarge { width: 70_000, height: 70_000 })
        ));
        assert!(Camera::new().with_image(16.0 / 9.0, 60_000).validate().is_ok());
        assert!(matches!(
            Camera::new().with_position(Point3::ONE, Point3::ONE, Vec3::Y).validate(),
            Err(CameraError::DegenerateView)
        ));
        assert!(matches!(
            Camera::new()
                .with_position(Point3::ZERO, Point3::new(0.0, -5.0, 0.0), Vec3::Y)
                .validate(),
            Err(CameraError::ParallelUp)
        ));
    }
}
