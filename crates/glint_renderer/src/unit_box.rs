//! Axis-aligned unit box primitive.

use crate::hittable::{Geometry, SurfaceHit};
use crate::Ray;
use glint_math::{Vec3, RAY_EPSILON};

/// Box spanning [-0.5, 0.5] on every local axis.
///
/// Placed, rotated and sized in the world through its object transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitBox;

impl UnitBox {
    pub const MIN: f32 = -0.5;
    pub const MAX: f32 = 0.5;
}

impl Geometry for UnitBox {
    /// Slab-method intersection.
    ///
    /// Each axis contributes an entry and exit plane. The latest entry and
    /// earliest exit bound the segment inside the box. A ray that starts inside
    /// reports its exit face.
    fn intersect_local(&self, ray: &Ray) -> Option<SurfaceHit> {
        if ray.is_degenerate() {
            return None;
        }

        let p = ray.origin();
        let d = ray.direction();

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut normal_near = Vec3::ZERO;
        let mut normal_far = Vec3::ZERO;

        for axis in 0..3 {
            if d[axis].abs() < RAY_EPSILON {
                // Parallel to this slab: miss unless already between its planes
                if p[axis] < Self::MIN || p[axis] > Self::MAX {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d[axis];
            let mut t1 = (Self::MIN - p[axis]) * inv_d;
            let mut t2 = (Self::MAX - p[axis]) * inv_d;

            let mut n1 = Vec3::ZERO;
            let mut n2 = Vec3::ZERO;
            n1[axis] = -1.0;
            n2[axis] = 1.0;

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
                std::mem::swap(&mut n1, &mut n2);
            }

            if t1 > t_near {
                t_near = t1;
                normal_near = n1;
            }
            if t2 < t_far {
                t_far = t2;
                normal_far = n2;
            }

            if t_near > t_far || t_far < RAY_EPSILON {
                return None;
            }
        }

        if t_near >= 0.0 {
            Some(SurfaceHit {
                t: t_near,
                normal: normal_near,
            })
        } else {
            // Origin inside the box
            Some(SurfaceHit {
                t: t_far,
                normal: normal_far,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_entry_and_exit_along_axis() {
        // Enters the top face at t=1.5, leaves the bottom face at t=2.5
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        let entry = UnitBox.intersect_local(&ray).unwrap();
        assert!(approx(entry.t, 1.5));
        assert_eq!(entry.normal, Vec3::Y);

        // Probe again from just inside: reports the exit plane
        let inside = Ray::new(ray.at(1.5 + 0.01), -Vec3::Y);
        let exit = UnitBox.intersect_local(&inside).unwrap();
        assert!(approx(exit.t, 1.0 - 0.01));
        assert_eq!(exit.normal, -Vec3::Y);
    }

    #[test]
    fn test_every_face_normal() {
        let axes = [Vec3::X, Vec3::Y, Vec3::Z];
        for axis in axes {
            for sign in [1.0, -1.0] {
                let outward = axis * sign;
                let ray = Ray::new(outward * 3.0, -outward);
                let hit = UnitBox.intersect_local(&ray).unwrap();
                assert!(approx(hit.t, 2.5));
                assert_eq!(hit.normal, outward);
            }
        }
    }

    #[test]
    fn test_origin_at_center() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = UnitBox.intersect_local(&ray).unwrap();
        assert!(approx(hit.t, 0.5));
        assert_eq!(hit.normal, Vec3::X);
    }

    #[test]
    fn test_parallel_outside_slab_misses() {
        // Travels along Z but sits above the box in Y
        let ray = Ray::new(Vec3::new(0.0, 0.75, -3.0), Vec3::Z);
        assert!(UnitBox.intersect_local(&ray).is_none());

        // Same ray inside the Y slab hits
        let ray = Ray::new(Vec3::new(0.0, 0.25, -3.0), Vec3::Z);
        let hit = UnitBox.intersect_local(&ray).unwrap();
        assert!(approx(hit.t, 2.5));
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_box_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
        assert!(UnitBox.intersect_local(&ray).is_none());
    }

    #[test]
    fn test_diagonal_miss() {
        // Passes beside a corner: the X and Z slab spans never overlap
        let ray = Ray::new(Vec3::new(-2.5, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let hit = UnitBox.intersect_local(&ray);
        assert!(hit.is_none());
    }

    #[test]
    fn test_degenerate_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(UnitBox.intersect_local(&ray).is_none());
    }

    #[test]
    fn test_random_rays_toward_box_land_on_surface() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            // Origin on a sphere of radius 4, aimed at a point inside the box
            let origin = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize_or_zero()
                * 4.0;
            if origin == Vec3::ZERO {
                continue;
            }
            let target = Vec3::new(
                rng.gen_range(-0.45..0.45),
                rng.gen_range(-0.45..0.45),
                rng.gen_range(-0.45..0.45),
            );
            let ray = Ray::new(origin, target - origin);
            let hit = UnitBox.intersect_local(&ray).expect("ray aimed inside the box must hit");

            let p = ray.at(hit.t);
            assert!(hit.t > 0.0);
            assert!((p.abs().max_element() - 0.5).abs() < 1e-4);

            // The normal names the face the point lies on
            let face = p.dot(hit.normal);
            assert!((face - 0.5).abs() < 1e-4);
            assert!(hit.normal.dot(ray.direction()) < 0.0);
        }
    }
}
