//! Sphere primitive for ray tracing.

use crate::hittable::{Geometry, SurfaceHit};
use crate::Ray;
use glint_math::{Interval, Vec3, RAY_EPSILON};

/// A sphere primitive.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Sphere with the same extent as the unit box: radius 0.5 at the origin.
    pub fn unit() -> Self {
        Self::new(Vec3::ZERO, 0.5)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::unit()
    }
}

impl Geometry for Sphere {
    fn intersect_local(&self, ray: &Ray) -> Option<SurfaceHit> {
        if ray.is_degenerate() || self.radius == 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let ray_t = Interval::new(RAY_EPSILON, f32::INFINITY);

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(SurfaceHit {
            t: root,
            normal: (ray.at(root) - self.center) / self.radius,
        })
    }
}
