//! Orb Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres. Rays are generated by
//! a thin-lens camera, intersected against a list of hittables, and bounced
//! by Lambertian, metal, and dielectric materials until they escape to the
//! sky or run out of depth.

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, DEFAULT_BUCKET_ROWS};
pub use camera::{Camera, CameraFrame};
pub use error::{CameraError, OutputError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{encode_channel, linear_to_gamma, save_image, write_ppm, OutputFormat};
pub use renderer::{ray_color, render, render_pixel, ImageBuffer};
pub use sphere::Sphere;

/// Re-export math types from orb_math
pub use orb_math::{Interval, Point3, Ray, Vec3};
