//! Scene file loading.
//!
//! Scenes are stored as JSON (see [`SceneDescription`] for the layout).
//! Loading parses the file and then validates everything the renderer relies
//! on, so a successfully loaded description can always be built into a scene.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use crate::scene::{LightDescription, Material, MaterialRef, SceneDescription};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {object} references unknown material '{material}'")]
    UnknownMaterial { object: usize, material: String },

    #[error("Invalid scene: {what}")]
    Invalid { what: String },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn invalid(what: impl Into<String>) -> LoadError {
    LoadError::Invalid { what: what.into() }
}

/// Load a scene file.
///
/// If the file does not name the scene, the file stem is used.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/glass_box.json")?;
/// println!("Loaded {} objects, {} lights", scene.object_count(), scene.light_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    load_scene_from_str(&content, name)
}

/// Parse and validate a scene from JSON text.
///
/// `default_name` is used when the JSON does not carry a `name`.
pub fn load_scene_from_str(content: &str, default_name: &str) -> LoadResult<SceneDescription> {
    let mut scene: SceneDescription = serde_json::from_str(content)?;
    if scene.name.is_empty() {
        scene.name = default_name.to_string();
    }

    validate_scene(&scene)?;

    log::info!(
        "Loaded scene '{}': {} materials, {} objects, {} lights",
        scene.name,
        scene.materials.len(),
        scene.object_count(),
        scene.light_count()
    );

    Ok(scene)
}

fn is_finite(v: Vec3) -> bool {
    v.is_finite()
}

fn validate_material(material: &Material, context: &str) -> LoadResult<()> {
    if !(material.index.is_finite() && material.index > 0.0) {
        return Err(invalid(format!(
            "{context}: index of refraction must be positive, got {}",
            material.index
        )));
    }
    if !(material.shininess.is_finite() && material.shininess >= 0.0) {
        return Err(invalid(format!(
            "{context}: shininess must be non-negative, got {}",
            material.shininess
        )));
    }
    let coefficients = [
        material.emissive,
        material.ambient,
        material.diffuse,
        material.specular,
        material.reflective,
        material.transmissive,
    ];
    if !coefficients.iter().all(|c| is_finite(*c)) {
        return Err(invalid(format!("{context}: coefficients must be finite")));
    }
    Ok(())
}

/// Check a parsed scene for values the renderer cannot use.
pub fn validate_scene(scene: &SceneDescription) -> LoadResult<()> {
    let camera = &scene.camera;
    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(invalid(format!(
            "camera fov must be in (0, 180) degrees, got {}",
            camera.fov
        )));
    }
    if !(camera.aspect_ratio.is_finite() && camera.aspect_ratio > 0.0) {
        return Err(invalid(format!(
            "camera aspect ratio must be positive, got {}",
            camera.aspect_ratio
        )));
    }
    let view = camera.look_at - camera.position;
    if view.length_squared() == 0.0 || !is_finite(view) {
        return Err(invalid("camera position and look_at must differ"));
    }
    if view.cross(camera.up).length_squared() < 1e-12 {
        return Err(invalid("camera up vector must not be parallel to the view direction"));
    }

    let mut names = HashSet::new();
    for material in &scene.materials {
        if material.name.is_empty() {
            return Err(invalid("named materials must have a name"));
        }
        if !names.insert(material.name.as_str()) {
            log::warn!("Duplicate material '{}', first definition wins", material.name);
        }
        validate_material(material, &format!("material '{}'", material.name))?;
    }

    for (i, object) in scene.objects.iter().enumerate() {
        match &object.material {
            MaterialRef::Named(name) if scene.find_material(name).is_none() => {
                return Err(LoadError::UnknownMaterial {
                    object: i,
                    material: name.clone(),
                });
            }
            MaterialRef::Inline(material) => {
                validate_material(material, &format!("object {i}"))?;
            }
            MaterialRef::Named(_) => {}
        }

        let t = &object.transform;
        if !(is_finite(t.translation) && is_finite(t.rotation) && is_finite(t.scale)) {
            return Err(invalid(format!("object {i}: transform must be finite")));
        }
        if t.scale.x == 0.0 || t.scale.y == 0.0 || t.scale.z == 0.0 {
            return Err(invalid(format!("object {i}: scale components must be non-zero")));
        }
    }

    for (i, light) in scene.lights.iter().enumerate() {
        let (geometry, color) = match light {
            LightDescription::Directional { direction, color } => {
                if direction.length_squared() == 0.0 {
                    return Err(invalid(format!("light {i}: directional light needs a direction")));
                }
                (*direction, *color)
            }
            LightDescription::Point { position, color } => (*position, *color),
            LightDescription::Ambient { color } => (Vec3::ZERO, *color),
        };
        if !(is_finite(geometry) && is_finite(color)) {
            return Err(invalid(format!("light {i}: values must be finite")));
        }
    }

    Ok(())
}
