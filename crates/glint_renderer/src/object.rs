//! Transformed primitives placed in a scene.
//!
//! Geometry lives in its canonical local frame. Each object carries a
//! local-to-world transform; rays are taken to local space for the
//! intersection test and the hit is mapped back to world space.

use crate::{
    hittable::{Geometry, HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Interval, Mat3, Mat4, Mat4Ext};
use std::sync::Arc;

/// A primitive with a transform and a shared material.
pub struct SceneObject {
    /// Index of this object in its scene
    id: usize,

    /// Shape in local space
    geometry: Box<dyn Geometry>,

    /// World-to-local transform (for ray transformation)
    inv_transform: Mat4,

    /// Maps local normals to world space
    normal_matrix: Mat3,

    /// Material shared with every other object that uses it
    material: Arc<Material>,
}

impl SceneObject {
    /// Create an object from local geometry and its local-to-world transform.
    ///
    /// The transform must be invertible.
    pub fn new(
        id: usize,
        geometry: Box<dyn Geometry>,
        transform: Mat4,
        material: Arc<Material>,
    ) -> Self {
        Self {
            id,
            geometry,
            inv_transform: transform.inverse(),
            normal_matrix: transform.normal_matrix(),
            material,
        }
    }

    /// Index of this object in its scene.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The object's material.
    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for SceneObject {
    /// 1. Transform ray to local space (using inv_transform)
    /// 2. Test against the local geometry
    /// 3. Rescale t and transform the normal back to world space
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        if ray.is_degenerate() {
            return None;
        }

        let (local_ray, scale) = self.inv_transform.transform_ray(ray);
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }

        let local_hit = self.geometry.intersect_local(&local_ray)?;
        let t = local_hit.t / scale;
        if !ray_t.contains(t) {
            return None;
        }

        let normal = (self.normal_matrix * local_hit.normal).normalize_or_zero();
        Some(HitRecord::new(ray, t, normal, &self.material, self.id))
    }
}
