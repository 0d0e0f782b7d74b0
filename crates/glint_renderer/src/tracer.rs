//! Recursive Whitted-style tracing.
//!
//! A hit is shaded locally, then optionally spawns one mirror ray and one
//! refracted ray. Each branch carries its own medium stack and path weight,
//! so siblings never see each other's bookkeeping. Recursion stops at the
//! configured depth or once both branches have become too dim to matter.

use crate::{hittable::HitRecord, Color, Ray, Scene, Shade};
use glint_core::TraceConfig;
use glint_math::{Interval, Vec3, RAY_EPSILON};

/// Color returned for rays that escape the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// How far past an exit point to look for a touching surface.
pub const PROBE_DISTANCE: f32 = 4.0 * RAY_EPSILON;

/// Refractive indices of the volumes a ray is nested in, innermost last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediumStack {
    indices: Vec<f32>,
}

impl MediumStack {
    /// Index of the surrounding medium.
    pub const AIR: f32 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Stack holding a single medium.
    pub fn with_base(index: f32) -> Self {
        Self { indices: vec![index] }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Index of the innermost medium, air when nothing is on the stack.
    pub fn current(&self) -> f32 {
        self.indices.last().copied().unwrap_or(Self::AIR)
    }

    /// Copy of this stack with `index` entered.
    pub fn pushed(&self, index: f32) -> Self {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self { indices }
    }

    /// Copy of this stack with the innermost medium left.
    pub fn popped(&self) -> Self {
        let mut indices = self.indices.clone();
        indices.pop();
        Self { indices }
    }
}

/// Running per-channel products of the reflective and transmissive
/// coefficients met along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathWeight {
    pub reflectance: Color,
    pub transmittance: Color,
}

impl PathWeight {
    /// Weight of a primary ray.
    pub const FULL: PathWeight = PathWeight {
        reflectance: Color::ONE,
        transmittance: Color::ONE,
    };

    /// Weight after a mirror bounce off a surface with reflectance `kr`.
    pub fn reflected(self, kr: Color) -> Self {
        Self {
            reflectance: self.reflectance * kr,
            ..self
        }
    }

    /// Weight after crossing a surface with transmittance `kt`.
    pub fn transmitted(self, kt: Color) -> Self {
        Self {
            transmittance: self.transmittance * kt,
            ..self
        }
    }

    /// Fraction of a contribution that survives to the primary ray.
    pub fn throughput(&self) -> Color {
        self.reflectance * self.transmittance
    }

    /// True when every channel is below `threshold` or carries nothing.
    pub fn is_negligible(&self, threshold: f32) -> bool {
        let throughput = self.throughput();
        (throughput.cmplt(Color::splat(threshold)) | throughput.cmple(Color::ZERO)).all()
    }
}

impl Default for PathWeight {
    fn default() -> Self {
        Self::FULL
    }
}

/// Mirror `d` about `n`.
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Refract unit direction `d` through a surface with incident-side unit
/// normal `n`, where `eta` is the ratio of the incident to the transmitted
/// index.
///
/// Returns `None` on total internal reflection.
pub fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    if !eta.is_finite() || eta <= 0.0 {
        return None;
    }

    let cos_i = -d.dot(n);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i).max(0.0);
    if sin2_t > 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin2_t).max(0.0).sqrt();
    Some((eta * d + (eta * cos_i - cos_t) * n).normalize_or_zero())
}

/// Color seen through normalized image coordinates `(x, y)`.
pub fn trace(scene: &Scene, x: f32, y: f32, config: &TraceConfig) -> Color {
    let ray = scene.camera().ray_through(x, y);
    trace_ray(scene, &ray, PathWeight::FULL, 0, &MediumStack::new(), config)
        .clamp(Color::ZERO, Color::ONE)
}

/// Color carried back along `ray`.
///
/// `depth` counts the bounces already taken, `media` the volumes the ray
/// currently travels through.
pub fn trace_ray(
    scene: &Scene,
    ray: &Ray,
    weight: PathWeight,
    depth: u32,
    media: &MediumStack,
    config: &TraceConfig,
) -> Color {
    let Some(hit) = scene.nearest_intersection(ray) else {
        return BACKGROUND;
    };

    let material = hit.material;
    let d = ray.direction();
    let mut color = material.shade(scene, ray, &hit, config);

    let reflected_weight = weight.reflected(material.reflective);
    let refracted_weight = weight.transmitted(material.transmissive);
    let reflect_live = !reflected_weight.is_negligible(config.threshold);
    let refract_live = !refracted_weight.is_negligible(config.threshold);

    if depth >= config.max_depth || !(reflect_live || refract_live) {
        return color.clamp(Color::ZERO, Color::ONE);
    }

    // A ray with no history that hits a back face started inside this object
    let media = if media.is_empty() {
        MediumStack::with_base(if hit.front_face {
            MediumStack::AIR
        } else {
            material.index
        })
    } else {
        media.clone()
    };

    let n1 = media.current();
    let (normal, n2, refracted_media) = if hit.front_face {
        (hit.normal, material.index, media.pushed(material.index))
    } else {
        let outside = media.popped();
        match adjacent_medium(scene, &hit, d) {
            Some(index) => (-hit.normal, index, outside.pushed(index)),
            None => (-hit.normal, outside.current(), outside),
        }
    };

    if reflect_live {
        let reflected_ray = Ray::new(hit.p + normal * RAY_EPSILON, reflect(d, normal));
        let reflected = trace_ray(
            scene,
            &reflected_ray,
            reflected_weight,
            depth + 1,
            &media,
            config,
        );
        color += reflected * material.reflective;
    }

    if refract_live {
        if let Some(direction) = refract(d, normal, n1 / n2) {
            let refracted_ray = Ray::new(hit.p - normal * RAY_EPSILON, direction);
            let refracted = trace_ray(
                scene,
                &refracted_ray,
                refracted_weight,
                depth + 1,
                &refracted_media,
                config,
            );
            color += refracted * material.transmissive;
        }
    }

    color.clamp(Color::ZERO, Color::ONE)
}

/// Index of an object whose front face touches the exit point `hit`, if the
/// ray passes straight from one volume into the next.
fn adjacent_medium(scene: &Scene, hit: &HitRecord, incident: Vec3) -> Option<f32> {
    let probe = Ray::new(hit.p - incident * RAY_EPSILON, incident);
    scene
        .intersect_excluding(&probe, Interval::new(0.0, PROBE_DISTANCE), hit.object)
        .filter(|next| next.front_face)
        .map(|next| next.material.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hittable::Hittable, Camera, Light, Material, UnitBox};
    use glint_core::Transform;
    use glint_math::Mat4;
    use std::sync::Arc;

    fn approx(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    fn config(max_depth: u32) -> TraceConfig {
        TraceConfig {
            max_depth,
            ..Default::default()
        }
    }

    fn emitter() -> Arc<Material> {
        Arc::new(Material {
            emissive: Color::ONE,
            ..Default::default()
        })
    }

    fn glass(index: f32, kt: f32) -> Arc<Material> {
        Arc::new(Material {
            transmissive: Color::splat(kt),
            index,
            ..Default::default()
        })
    }

    fn start(scene: &Scene, ray: &Ray, config: &TraceConfig) -> Color {
        trace_ray(scene, ray, PathWeight::FULL, 0, &MediumStack::new(), config)
    }

    #[test]
    fn test_miss_is_background() {
        let empty = Scene::new(Camera::new());
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(start(&empty, &ray, &config(5)), BACKGROUND);

        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, emitter());
        scene.add_light(Light::ambient(Color::ONE));
        let away = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
        assert_eq!(start(&scene, &away, &config(5)), Color::ZERO);
    }

    #[test]
    fn test_opaque_surface_matches_local_shading_at_any_depth() {
        let material = Material {
            ambient: Color::splat(0.1),
            diffuse: Color::new(0.5, 0.4, 0.3),
            specular: Color::splat(0.2),
            shininess: 0.25,
            ..Default::default()
        };
        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, Arc::new(material));
        scene.add_light(Light::ambient(Color::splat(0.3)));
        scene.add_light(Light::directional(Vec3::new(1.0, -2.0, 0.5), Color::ONE));

        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        let hit = scene.nearest_intersection(&ray).unwrap();
        let local = hit.material.shade(&scene, &ray, &hit, &config(5));
        assert!(local.max_element() > 0.0);

        for depth in [1, 3, 10] {
            assert_eq!(start(&scene, &ray, &config(depth)), local);
        }
    }

    #[test]
    fn test_absorptive_material_never_branches() {
        let material = Material {
            ambient: Color::splat(0.2),
            ..Material::new("matte", Color::splat(0.5))
        };
        assert!(material.is_absorptive());

        let weight = PathWeight::FULL;
        assert!(weight.reflected(material.reflective).is_negligible(0.0));
        assert!(weight.transmitted(material.transmissive).is_negligible(0.0));

        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, Arc::new(material));
        // Visible from the matte top face if anything were reflected
        scene.add_object(
            Box::new(UnitBox),
            Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)).to_matrix(),
            emitter(),
        );
        scene.add_light(Light::ambient(Color::splat(0.5)));
        scene.add_light(Light::directional(-Vec3::Y, Color::splat(0.5)));

        let config = TraceConfig {
            max_depth: 50,
            threshold: 0.0,
            ..Default::default()
        };
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        let hit = scene.nearest_intersection(&ray).unwrap();
        let local = hit.material.shade(&scene, &ray, &hit, &config);
        assert!(local.max_element() > 0.0);
        assert_eq!(start(&scene, &ray, &config), local);
    }

    #[test]
    fn test_full_weight_mirror_traced_at_unit_threshold() {
        let mirror = Material {
            reflective: Color::ONE,
            ..Default::default()
        };
        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, Arc::new(mirror));
        scene.add_object(
            Box::new(UnitBox),
            Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)).to_matrix(),
            emitter(),
        );

        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        let config = TraceConfig {
            max_depth: 5,
            threshold: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(approx(start(&scene, &ray, &config), Color::ONE));
    }

    #[test]
    fn test_depth_zero_is_local_only() {
        let mirror = Material {
            ambient: Color::splat(0.4),
            reflective: Color::splat(0.5),
            ..Default::default()
        };
        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, Arc::new(mirror));
        // Emitter above the eye, only visible in the mirror
        scene.add_object(
            Box::new(UnitBox),
            Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)).to_matrix(),
            emitter(),
        );
        scene.add_light(Light::ambient(Color::splat(0.5)));

        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y);
        assert!(approx(start(&scene, &ray, &config(0)), Color::splat(0.2)));
        assert!(approx(start(&scene, &ray, &config(1)), Color::splat(0.7)));
    }

    #[test]
    fn test_transmission_through_glass_slab() {
        let mut scene = Scene::new(Camera::new());
        scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, glass(1.5, 0.5));
        scene.add_object(
            Box::new(UnitBox),
            Mat4::from_scale_rotation_translation(
                Vec3::new(20.0, 20.0, 1.0),
                Default::default(),
                Vec3::new(0.0, 0.0, -3.0),
            ),
            emitter(),
        );

        // Normal incidence: straight through, dimmed once per crossing
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        assert!(approx(start(&scene, &ray, &config(5)), Color::splat(0.25)));

        // Not enough depth to reach the emitter
        assert!(approx(start(&scene, &ray, &config(1)), Color::ZERO));
    }

    #[test]
    fn test_total_internal_reflection_adds_no_refraction() {
        let build = |index: f32| {
            let mut scene = Scene::new(Camera::new());
            scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, glass(index, 1.0));
            scene.add_object(
                Box::new(UnitBox),
                Mat4::from_scale_rotation_translation(
                    Vec3::new(1.0, 20.0, 20.0),
                    Default::default(),
                    Vec3::new(3.0, 0.0, 0.0),
                ),
                emitter(),
            );
            scene
        };

        // From inside the box, meeting the +x face at 60 degrees
        let ray = Ray::new(
            Vec3::new(0.3, -0.45, 0.0),
            Vec3::new(0.5, 3.0_f32.sqrt() / 2.0, 0.0),
        );

        // Matched indices: the ray leaves and reaches the emitter
        assert!(approx(start(&build(1.0), &ray, &config(5)), Color::ONE));
        // Glass to air at 60 degrees is past the critical angle
        assert_eq!(start(&build(1.5), &ray, &config(5)), Color::ZERO);
    }

    #[test]
    fn test_refract() {
        // Unchanged at normal incidence
        let d = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((d + Vec3::Y).length() < 1e-6);

        // Bends toward the normal entering a denser medium
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let d = refract(incident, Vec3::Y, 1.0 / 1.5).unwrap();
        let sin_t = d.x;
        assert!((sin_t - incident.x / 1.5).abs() < 1e-5);
        assert!((d.length() - 1.0).abs() < 1e-5);

        // Past the critical angle leaving it
        assert!(refract(incident, Vec3::Y, 1.5).is_none());
        assert!(refract(incident, Vec3::Y, f32::INFINITY).is_none());
    }

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_medium_stack_branches_are_independent() {
        let base = MediumStack::new();
        assert!(base.is_empty());
        assert_eq!(base.current(), MediumStack::AIR);

        let glass = MediumStack::with_base(MediumStack::AIR).pushed(1.5);
        let water = glass.pushed(1.33);
        assert_eq!(glass.len(), 2);
        assert_eq!(water.current(), 1.33);
        assert_eq!(water.popped(), glass);
        assert_eq!(glass.current(), 1.5);

        // Leaving the last medium falls back to air
        let empty = MediumStack::with_base(1.5).popped();
        assert!(empty.is_empty());
        assert_eq!(empty.current(), MediumStack::AIR);
        assert_eq!(empty.popped().current(), MediumStack::AIR);
    }

    #[test]
    fn test_path_weight_throughput() {
        let weight = PathWeight::FULL
            .reflected(Color::new(0.5, 0.1, 0.0))
            .transmitted(Color::new(0.5, 0.1, 1.0));
        assert!(approx(weight.throughput(), Color::new(0.25, 0.01, 0.0)));
        assert!(!weight.is_negligible(0.01));
        // A channel exactly at the threshold still counts
        assert!(!weight.is_negligible(0.25));
        assert!(weight.is_negligible(0.3));

        // Nothing carried is negligible even at a zero threshold
        assert!(PathWeight::FULL.reflected(Color::ZERO).is_negligible(0.0));
        assert!(!PathWeight::FULL.is_negligible(1.0));
    }

    #[test]
    fn test_adjacent_medium_probe() {
        let build = |gap: f32| {
            let mut scene = Scene::new(Camera::new());
            scene.add_object(Box::new(UnitBox), Mat4::IDENTITY, glass(1.5, 1.0));
            scene.add_object(
                Box::new(UnitBox),
                Transform::from_translation(Vec3::new(0.0, 0.0, -1.0 - gap)).to_matrix(),
                glass(1.33, 1.0),
            );
            scene
        };

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let touching = build(0.0);
        let exit = touching.object(0).unwrap().hit(&ray, Interval::FORWARD).unwrap();
        assert!(!exit.front_face);
        assert_eq!(adjacent_medium(&touching, &exit, ray.direction()), Some(1.33));

        let apart = build(0.1);
        let exit = apart.object(0).unwrap().hit(&ray, Interval::FORWARD).unwrap();
        assert_eq!(adjacent_medium(&apart, &exit, ray.direction()), None);
    }
}
