//! Built-in scenes.

use std::sync::Arc;

use clap::ValueEnum;
use orb_math::{gen_f32, gen_range_f32, Point3, Vec3};
use orb_renderer::{Camera, Color, Dielectric, Lambertian, Material, Metal, Sphere};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Ground, a diffuse center sphere, glass on the left, fuzzy gold on the right
    Quickstart,
    /// Three large spheres surrounded by a field of small random ones
    Cover,
}

impl Preset {
    /// Build the scene. `seed` only affects presets with random placement.
    pub fn build(self, seed: u64) -> Scene {
        match self {
            Preset::Quickstart => quickstart(),
            Preset::Cover => cover(&mut StdRng::seed_from_u64(seed)),
        }
    }
}

fn quickstart() -> Scene {
    let material_ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let material_center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let material_left: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let material_right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let spheres = vec![
        Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, material_ground),
        Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, material_center),
        Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, material_left),
        Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, material_right),
    ];

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50);

    Scene::from_spheres(camera, spheres)
}

fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

fn cover(rng: &mut dyn RngCore) -> Scene {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    let mut spheres = vec![Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)];

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the metal feature sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                glass.clone()
            };
            spheres.push(Sphere::new(center, 0.2, material));
        }
    }

    spheres.push(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));
    spheres.push(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    spheres.push(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = Camera::new()
        .with_image(16.0 / 9.0, 400)
        .with_quality(50, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene::from_spheres(camera, spheres)
}
