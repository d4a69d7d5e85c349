//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use orb_math::{Interval, Point3};
use std::sync::Arc;

/// A sphere primitive.
///
/// The material is shared: any number of spheres may hold the same `Arc`.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radii are clamped to zero; hollow shells are not supported.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The shared material handle.
    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use orb_math::Vec3;

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5))),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::new(0.001, f32::INFINITY);

        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, interval, &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-6); // Should hit at t=0.5
        assert!((rec.p - Point3::new(0.0, 0.0, -0.5)).length() < 1e-6);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_ahead();

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let interval = Interval::new(0.001, f32::INFINITY);

        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, interval, &mut rec));
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = unit_sphere_ahead();

        // Both roots are negative
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere_ahead();

        // Start at the center: the near root is negative, the far root is 0.5
        let ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!(!rec.front_face);
        // Normal faces back toward the ray origin
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.25).abs() < 1e-6);
        assert!((rec.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(
            Point3::ZERO,
            -1.0,
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_shared_material() {
        let material: Arc<dyn Material> = Arc::new(Lambertian::new(Vec3::ONE));
        let a = Sphere::new(Point3::ZERO, 1.0, material.clone());
        let b = Sphere::new(Point3::X, 1.0, material.clone());

        assert!(Arc::ptr_eq(a.material(), b.material()));
        assert_eq!(Arc::strong_count(&material), 3);
    }
}
