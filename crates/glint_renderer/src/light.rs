//! Light sources and their shading queries.

use crate::{Color, Ray, Scene};
use glint_core::{AttenuationCoefficients, LightDescription};
use glint_math::{Interval, Vec3, RAY_EPSILON};

/// A light source.
///
/// Ambient lights only feed [`Scene::ambient_sum`]; their per-point queries
/// return zero and shading skips them.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Parallel light traveling along `orientation` (unit length)
    Directional { orientation: Vec3, color: Color },
    /// Light radiating from `position`
    Point { position: Vec3, color: Color },
    /// Constant light everywhere
    Ambient { color: Color },
}

impl Light {
    /// Create a directional light. `orientation` is the direction light travels.
    pub fn directional(orientation: Vec3, color: Color) -> Self {
        Light::Directional {
            orientation: orientation.normalize_or_zero(),
            color,
        }
    }

    /// Create a point light.
    pub fn point(position: Vec3, color: Color) -> Self {
        Light::Point { position, color }
    }

    /// Create an ambient light.
    pub fn ambient(color: Color) -> Self {
        Light::Ambient { color }
    }

    pub fn from_description(description: &LightDescription) -> Self {
        match *description {
            LightDescription::Directional { direction, color } => {
                Light::directional(direction, color)
            }
            LightDescription::Point { position, color } => Light::point(position, color),
            LightDescription::Ambient { color } => Light::ambient(color),
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }

    /// Unit direction from `p` toward the light.
    pub fn direction(&self, p: Vec3) -> Vec3 {
        match *self {
            Light::Directional { orientation, .. } => -orientation,
            Light::Point { position, .. } => (position - p).normalize_or_zero(),
            Light::Ambient { .. } => Vec3::ZERO,
        }
    }

    /// Light color arriving at `p` before attenuation.
    pub fn color(&self, _p: Vec3) -> Color {
        match *self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Ambient { color } => color,
        }
    }

    /// Distance falloff at `p`, in [0, 1].
    pub fn distance_attenuation(&self, p: Vec3, coefficients: &AttenuationCoefficients) -> f32 {
        match *self {
            // Infinitely far away: no falloff
            Light::Directional { .. } => 1.0,
            Light::Point { position, .. } => coefficients.falloff(position.distance(p)),
            Light::Ambient { .. } => 0.0,
        }
    }

    /// Fraction of the light that reaches `p` past the scene's geometry.
    ///
    /// Binary: white when unoccluded, black when blocked.
    pub fn shadow_attenuation(&self, p: Vec3, scene: &Scene) -> Color {
        match *self {
            Light::Directional { .. } => {
                let shadow_ray = self.shadow_ray(p);
                if scene.nearest_intersection(&shadow_ray).is_some() {
                    Color::ZERO
                } else {
                    Color::ONE
                }
            }
            Light::Point { position, .. } => {
                let shadow_ray = self.shadow_ray(p);
                let light_distance = position.distance(shadow_ray.origin());
                // Only geometry strictly between the point and the light blocks it
                match scene.intersect(&shadow_ray, Interval::new(0.0, light_distance)) {
                    Some(hit) if hit.t < light_distance => Color::ZERO,
                    _ => Color::ONE,
                }
            }
            Light::Ambient { .. } => Color::ZERO,
        }
    }

    /// Ray from `p`, nudged toward the light to avoid self-shadowing.
    fn shadow_ray(&self, p: Vec3) -> Ray {
        let direction = self.direction(p);
        Ray::new(p + direction * RAY_EPSILON, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Material, UnitBox};
    use glint_core::Transform;
    use glint_math::Mat4;
    use std::sync::Arc;

    fn occluder_scene(at: Vec3) -> Scene {
        let mut scene = Scene::new(Camera::new());
        scene.add_object(
            Box::new(UnitBox),
            Transform::from_translation(at).to_matrix(),
            Arc::new(Material::default()),
        );
        scene
    }

    #[test]
    fn test_directional_queries() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Color::ONE);
        let p = Vec3::new(3.0, 0.0, -7.0);

        assert_eq!(light.direction(p), Vec3::Y);
        assert_eq!(light.direction(Vec3::ZERO), Vec3::Y);
        let coeffs = AttenuationCoefficients::new(0.0, 1.0, 1.0);
        assert_eq!(light.distance_attenuation(p, &coeffs), 1.0);
        assert_eq!(light.color(p), Color::ONE);
    }

    #[test]
    fn test_point_queries() {
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Color::new(1.0, 0.5, 0.25));
        let p = Vec3::new(0.0, 1.0, 0.0);

        assert!((light.direction(p) - Vec3::Y).length() < 1e-6);
        let coeffs = AttenuationCoefficients::new(0.5, 0.25, 0.0);
        // 1 / (0.5 + 0.25 * 4) = 2/3
        assert!((light.distance_attenuation(p, &coeffs) - 2.0 / 3.0).abs() < 1e-6);
        // Never brighter than the source
        let strong = AttenuationCoefficients::new(0.1, 0.0, 0.0);
        assert_eq!(light.distance_attenuation(p, &strong), 1.0);
    }

    #[test]
    fn test_ambient_queries_are_zero() {
        let light = Light::ambient(Color::splat(0.3));
        let scene = Scene::new(Camera::new());

        assert!(light.is_ambient());
        assert_eq!(light.direction(Vec3::ONE), Vec3::ZERO);
        assert_eq!(light.distance_attenuation(Vec3::ONE, &AttenuationCoefficients::default()), 0.0);
        assert_eq!(light.shadow_attenuation(Vec3::ONE, &scene), Color::ZERO);
    }

    #[test]
    fn test_directional_shadow() {
        // Light from above, box overhead at y=3
        let scene = occluder_scene(Vec3::new(0.0, 3.0, 0.0));
        let light = Light::directional(-Vec3::Y, Color::ONE);

        assert_eq!(light.shadow_attenuation(Vec3::ZERO, &scene), Color::ZERO);
        assert_eq!(light.shadow_attenuation(Vec3::new(5.0, 0.0, 0.0), &scene), Color::ONE);
    }

    #[test]
    fn test_point_shadow_ignores_geometry_beyond_light() {
        let scene = occluder_scene(Vec3::new(0.0, 3.0, 0.0));

        // Light between the point and the box: not shadowed
        let below = Light::point(Vec3::new(0.0, 1.0, 0.0), Color::ONE);
        assert_eq!(below.shadow_attenuation(Vec3::ZERO, &scene), Color::ONE);

        // Box between the point and the light: shadowed
        let above = Light::point(Vec3::new(0.0, 6.0, 0.0), Color::ONE);
        assert_eq!(above.shadow_attenuation(Vec3::ZERO, &scene), Color::ZERO);
    }

    #[test]
    fn test_surface_does_not_shadow_itself() {
        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, Arc::new(Material::default()));
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE);

        // Point on the top face, lit from above
        assert_eq!(light.shadow_attenuation(Vec3::new(0.0, 0.5, 0.0), &scene), Color::ONE);
    }

    #[test]
    fn test_from_description() {
        let light = Light::from_description(&LightDescription::Directional {
            direction: Vec3::new(0.0, 0.0, -3.0),
            color: Color::ONE,
        });
        assert_eq!(
            light,
            Light::Directional {
                orientation: -Vec3::Z,
                color: Color::ONE
            }
        );
    }
}
