//! Local illumination of a surface (Phong).

use crate::{hittable::HitRecord, Color, Material, Ray, Scene};
use glint_core::TraceConfig;

/// Local shading of a surface point.
pub trait Shade {
    /// Color leaving the surface at `hit` toward the origin of `ray`,
    /// from emission, ambient light and every direct light source.
    ///
    /// Reflected and refracted transport is not included.
    fn shade(&self, scene: &Scene, ray: &Ray, hit: &HitRecord, config: &TraceConfig) -> Color;
}

impl Shade for Material {
    fn shade(&self, scene: &Scene, ray: &Ray, hit: &HitRecord, config: &TraceConfig) -> Color {
        let d = ray.direction();
        let n = hit.normal;
        let p = hit.p;

        let mut color = self.emissive + scene.ambient_sum() * self.ambient;

        // Transparency takes away from the surface's own reflectance
        let surface = (Color::ONE - self.transmissive).clamp(Color::ZERO, Color::ONE);
        let exponent = self.specular_exponent();

        for light in scene.lights().iter().filter(|light| !light.is_ambient()) {
            let l = light.direction(p);
            let n_dot_l = n.dot(l);

            let diffuse = self.diffuse * n_dot_l.max(0.0);
            let r = (2.0 * n_dot_l * n - l).normalize_or_zero();
            let specular = self.specular * (-d).dot(r).max(0.0).powf(exponent);

            let local = (diffuse + specular) * surface;
            if local == Color::ZERO {
                continue;
            }

            let distance = light.distance_attenuation(p, &config.attenuation);
            if distance <= 0.0 {
                continue;
            }
            let atten = light.shadow_attenuation(p, scene) * distance;

            color += atten * light.color(p) * local;
        }

        color.clamp(Color::ZERO, Color::ONE)
    }
}
