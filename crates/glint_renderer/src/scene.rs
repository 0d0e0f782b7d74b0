//! Traceable scene: objects, lights and camera.

use crate::{
    hittable::{Geometry, HitRecord, Hittable},
    Camera, Color, Light, Material, Ray, SceneObject, Sphere, UnitBox,
};
use glint_core::{LoadError, LoadResult, SceneDescription, Shape};
use glint_math::{Interval, Mat4};
use std::collections::HashMap;
use std::sync::Arc;

/// A scene ready to be traced.
///
/// Immutable during a render pass, so it can be shared across worker threads.
pub struct Scene {
    name: String,
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    /// Unclamped sum of every ambient light's color
    ambient: Color,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            name: String::new(),
            objects: Vec::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
            camera,
        }
    }

    /// Build a scene from a loaded description.
    ///
    /// Named materials are shared between the objects that reference them.
    pub fn from_description(description: &SceneDescription) -> LoadResult<Self> {
        let mut scene = Scene::new(Camera::from_description(&description.camera));
        scene.name = description.name.clone();

        let mut named: HashMap<&str, Arc<Material>> = HashMap::new();
        for material in &description.materials {
            named
                .entry(material.name.as_str())
                .or_insert_with(|| Arc::new(material.clone()));
        }

        for (i, object) in description.objects.iter().enumerate() {
            let material = match &object.material {
                glint_core::MaterialRef::Named(name) => named
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| LoadError::UnknownMaterial {
                        object: i,
                        material: name.clone(),
                    })?,
                glint_core::MaterialRef::Inline(material) => Arc::new(material.clone()),
            };

            let geometry: Box<dyn Geometry> = match object.shape {
                Shape::Box => Box::new(UnitBox),
                Shape::Sphere => Box::new(Sphere::unit()),
            };

            scene.add_object(geometry, object.transform.to_matrix(), material);
        }

        for light in &description.lights {
            scene.add_light(Light::from_description(light));
        }

        log::info!(
            "Built scene '{}': {} objects, {} lights",
            scene.name,
            scene.objects.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Scene name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a primitive and return its index.
    pub fn add_object(
        &mut self,
        geometry: Box<dyn Geometry>,
        transform: Mat4,
        material: Arc<Material>,
    ) -> usize {
        let id = self.objects.len();
        self.objects.push(SceneObject::new(id, geometry, transform, material));
        id
    }

    /// Add a light. Ambient lights are folded into the ambient sum.
    pub fn add_light(&mut self, light: Light) {
        if let Light::Ambient { color } = light {
            self.ambient += color;
        }
        self.lights.push(light);
    }

    /// Get an object by index.
    pub fn object(&self, id: usize) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Get the number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All lights, ambient ones included.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total ambient light, clamped to [0, 1] per channel.
    pub fn ambient_sum(&self) -> Color {
        self.ambient.clamp(Color::ZERO, Color::ONE)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Closest hit along `ray` at any non-negative distance.
    pub fn nearest_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.intersect(ray, Interval::FORWARD)
    }

    /// Closest hit along `ray` with a parameter inside `ray_t`.
    ///
    /// Objects are scanned in insertion order; at equal distance the first
    /// one wins.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.closest_hit(ray, ray_t, None)
    }

    /// Like [`Scene::intersect`] but ignoring the object with index `skip`.
    pub fn intersect_excluding(
        &self,
        ray: &Ray,
        ray_t: Interval,
        skip: usize,
    ) -> Option<HitRecord<'_>> {
        self.closest_hit(ray, ray_t, Some(skip))
    }

    fn closest_hit(
        &self,
        ray: &Ray,
        ray_t: Interval,
        skip: Option<usize>,
    ) -> Option<HitRecord<'_>> {
        if ray.is_degenerate() {
            return None;
        }

        let mut closest: Option<HitRecord<'_>> = None;
        for object in &self.objects {
            if Some(object.id()) == skip {
                continue;
            }
            let range = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, range) {
                if closest.as_ref().map_or(true, |c| rec.t < c.t) {
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}
