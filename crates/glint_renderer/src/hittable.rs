//! Geometry trait, Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use glint_math::{Interval, Vec3};

/// Result of intersecting a ray with geometry in its own local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance along the (unit-direction) local ray
    pub t: f32,
    /// Outward unit normal in local space
    pub normal: Vec3,
}

/// Shapes defined in a canonical local frame.
///
/// Implementations only report the nearest valid hit in front of the ray
/// origin. Offsetting secondary rays to avoid self-intersection is the
/// caller's job.
pub trait Geometry: Send + Sync {
    fn intersect_local(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// Record of a ray-object intersection in world space.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal (not flipped toward the ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face, i.e. is entering the object
    pub front_face: bool,
    /// Material of the struck surface
    pub material: &'a Material,
    /// Index of the struck object in its scene
    pub object: usize,
}

impl<'a> HitRecord<'a> {
    /// Build a record from a world-space ray parameter and outward normal.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: &'a Material,
        object: usize,
    ) -> Self {
        Self {
            t,
            p: ray.at(t),
            normal: outward_normal,
            // If the ray and normal point in the same direction, we're inside
            front_face: ray.direction().dot(outward_normal) < 0.0,
            material,
            object,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest hit of `ray` with a parameter inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_face_from_outward_normal() {
        let material = Material::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);

        let entering = HitRecord::new(&ray, 4.5, Vec3::Z, &material, 0);
        assert!(entering.front_face);
        assert_eq!(entering.p, Vec3::new(0.0, 0.0, 0.5));
        // The normal is kept outward
        assert_eq!(entering.normal, Vec3::Z);

        let exiting = HitRecord::new(&ray, 5.5, -Vec3::Z, &material, 0);
        assert!(!exiting.front_face);
        assert_eq!(exiting.normal, -Vec3::Z);
    }
}
