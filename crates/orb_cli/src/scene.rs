//! JSON scene files.
//!
//! A scene file names its materials once and refers to them by name from
//! each sphere, so spheres sharing a name share one material instance.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use orb_math::{Point3, Vec3};
use orb_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
}

/// A camera and the objects it looks at.
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
}

impl Scene {
    pub fn from_spheres(camera: Camera, spheres: Vec<Sphere>) -> Self {
        let mut world = HittableList::new();
        for sphere in spheres {
            world.add(Box::new(sphere));
        }
        Self { camera, world }
    }
}

/// Camera overrides; absent fields keep the `Camera` defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    pub aspect_ratio: Option<f32>,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub vfov: Option<f32>,
    pub look_from: Option<[f32; 3]>,
    pub look_at: Option<[f32; 3]>,
    pub vup: Option<[f32; 3]>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
}

impl CameraSettings {
    pub fn apply(&self, camera: Camera) -> Camera {
        let point = |v: Option<[f32; 3]>, fallback: Vec3| v.map(Vec3::from).unwrap_or(fallback);

        let look_from = point(self.look_from, camera.look_from());
        let look_at = point(self.look_at, camera.look_at());
        let vup = point(self.vup, camera.vup());
        let vfov = self.vfov.unwrap_or(camera.vfov());
        let defocus_angle = self.defocus_angle.unwrap_or(camera.defocus_angle());
        let focus_dist = self.focus_dist.unwrap_or(camera.focus_dist());
        let aspect_ratio = self.aspect_ratio.unwrap_or(camera.aspect_ratio());
        let image_width = self.image_width.unwrap_or(camera.image_width());
        let samples = self.samples_per_pixel.unwrap_or(camera.samples_per_pixel());
        let max_depth = self.max_depth.unwrap_or(camera.max_depth());

        camera
            .with_image(aspect_ratio, image_width)
            .with_quality(samples, max_depth)
            .with_position(look_from, look_at, vup)
            .with_lens(vfov, defocus_angle, focus_dist)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialSpec {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialSpec {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialSpec::Lambertian { albedo } => Arc::new(Lambertian::new(Color::from(albedo))),
            MaterialSpec::Metal { albedo, fuzz } => Arc::new(Metal::new(Color::from(albedo), fuzz)),
            MaterialSpec::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(refraction_index))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SphereSpec {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

#[derive(Debug, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: HashMap<String, MaterialSpec>,
    #[serde(default)]
    pub spheres: Vec<SphereSpec>,
}

/// Build every named material exactly once.
fn build_materials(specs: &HashMap<String, MaterialSpec>) -> HashMap<&str, Arc<dyn Material>> {
    specs
        .iter()
        .map(|(name, spec)| (name.as_str(), spec.build()))
        .collect()
}

fn build_spheres(
    specs: &[SphereSpec],
    materials: &HashMap<&str, Arc<dyn Material>>,
) -> Result<Vec<Sphere>, SceneError> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            if spec.radius.is_nan() || spec.radius <= 0.0 {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: spec.radius,
                });
            }
            let material = materials
                .get(spec.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial(spec.material.clone()))?;

            Ok(Sphere::new(
                Point3::from(spec.center),
                spec.radius,
                Arc::clone(material),
            ))
        })
        .collect()
}

impl SceneFile {
    pub fn into_scene(self) -> Result<Scene, SceneError> {
        let materials = build_materials(&self.materials);
        let spheres = build_spheres(&self.spheres, &materials)?;
        let camera = self.camera.apply(Camera::new());

        log::debug!(
            "Scene: {} materials, {} spheres",
            materials.len(),
            spheres.len()
        );
        Ok(Scene::from_spheres(camera, spheres))
    }
}

/// Parse a scene from JSON text.
pub fn parse_scene(json: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = serde_json::from_str(json)?;
    file.into_scene()
}

/// Load a scene from a JSON file.
pub fn load_scene(path: &Path) -> Result<Scene, SceneError> {
    let text = std::fs::read_to_string(path)?;
    log::info!("Loading scene {}", path.display());
    parse_scene(&text)
}
