//! Orb math types.
//!
//! Vectors come from glam; this crate adds the ray, the parameter interval and
//! the RNG-driven sampling helpers shared by the renderer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sample;

pub use interval::Interval;
pub use ray::Ray;
pub use sample::{
    gen_f32, gen_range_f32, near_zero, random_in_unit_disk, random_unit_vector, reflect, refract,
};

/// A position in world space.
pub type Point3 = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_point3_is_vec3() {
        let p: Point3 = Vec3::new(1.0, 2.0, 3.0);
        let q = p + Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(q, Point3::new(5.0, 7.0, 9.0));
    }
}
