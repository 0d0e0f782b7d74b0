// Transform utilities for Mat4
//
// Extends glam::Mat4 with the object/world conversions the tracer needs.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use glam::{Mat3, Mat4, Vec3};
use crate::Ray;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Matrix that maps surface normals through this (local-to-world) transform.
    ///
    /// This is the inverse-transpose of the upper 3x3, which keeps normals
    /// perpendicular to surfaces under non-uniform scale.
    fn normal_matrix(&self) -> Mat3;

    /// Transform a ray by this matrix.
    ///
    /// Returns the transformed ray (with a re-normalized direction) and the
    /// length the unit direction had after transformation. A parameter `t`
    /// measured along the transformed ray corresponds to `t / scale` along the
    /// original ray.
    fn transform_ray(&self, ray: &Ray) -> (Ray, f32);
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.inverse()).transpose()
    }

    fn transform_ray(&self, ray: &Ray) -> (Ray, f32) {
        let origin = self.transform_point3(ray.origin());
        // Direction as w=0 - translation should not affect it
        let direction: Vec3 = self.transform_vector3(ray.direction());
        let scale = direction.length();
        (Ray::new(origin, direction), scale)
    }
}
