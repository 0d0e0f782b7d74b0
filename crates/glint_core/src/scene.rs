//! Scene description types for Glint.
//!
//! These types describe a scene the way it is authored on disk: materials,
//! objects with transforms, lights and a camera. They are renderer-agnostic;
//! `glint_renderer` turns a [`SceneDescription`] into a traceable scene.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// A Phong material.
///
/// Every coefficient is an RGB triple so each channel can be tuned
/// independently. Coefficients are not required to sum to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    /// Material name, used by objects to reference it
    pub name: String,

    /// Light emitted by the surface itself
    pub emissive: Color,

    /// Response to the scene's ambient light
    pub ambient: Color,

    /// Lambertian response
    pub diffuse: Color,

    /// Phong highlight response
    pub specular: Color,

    /// Mirror reflection weight
    pub reflective: Color,

    /// Refraction weight (0=opaque)
    pub transmissive: Color,

    /// Highlight sharpness in [0, 1], scaled by 128 into the Phong exponent
    pub shininess: f32,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            emissive: Color::ZERO,
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            reflective: Color::ZERO,
            transmissive: Color::ZERO,
            shininess: 0.0,
            index: 1.0,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// The Phong exponent used for highlights.
    pub fn specular_exponent(&self) -> f32 {
        self.shininess * 128.0
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive.max_element() > 0.0
    }

    /// True when neither reflection nor refraction can carry light further.
    pub fn is_absorptive(&self) -> bool {
        self.reflective.max_element() <= 0.0 && self.transmissive.max_element() <= 0.0
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation as XYZ Euler angles in degrees
    pub rotation: Vec3,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set a uniform scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Convert to a 4x4 local-to-world matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// Geometry of an object in its local space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box spanning [-0.5, 0.5] on every axis
    Box,
    /// Sphere of radius 0.5 centered at the origin
    Sphere,
}

/// Either the name of a material in [`SceneDescription::materials`] or an
/// inline material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(Material),
}

impl Default for MaterialRef {
    fn default() -> Self {
        MaterialRef::Inline(Material::default())
    }
}

/// A placed primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    #[serde(default)]
    pub name: String,

    pub shape: Shape,

    #[serde(default)]
    pub transform: Transform,

    #[serde(default)]
    pub material: MaterialRef,
}

impl ObjectDescription {
    /// Create an untransformed object with a named material.
    pub fn new(shape: Shape, material: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            shape,
            transform: Transform::default(),
            material: MaterialRef::Named(material.into()),
        }
    }

    /// Set the object transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

fn white() -> Color {
    Color::ONE
}

/// A light source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    /// Light arriving from infinitely far away along `direction`
    Directional {
        direction: Vec3,
        #[serde(default = "white")]
        color: Color,
    },
    /// Light radiating from a single point
    Point {
        position: Vec3,
        #[serde(default = "white")]
        color: Color,
    },
    /// Constant light everywhere
    Ambient {
        #[serde(default = "white")]
        color: Color,
    },
}

/// A pinhole camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDescription {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub fov: f32,

    /// Image width divided by image height
    pub aspect_ratio: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 45.0,
            aspect_ratio: 1.0,
        }
    }
}

/// A complete scene: camera, materials, objects and lights.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    pub name: String,

    pub camera: CameraDescription,

    /// Named materials shared by objects
    pub materials: Vec<Material>,

    pub objects: Vec<ObjectDescription>,

    pub lights: Vec<LightDescription>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a named material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add an object.
    pub fn add_object(&mut self, object: ObjectDescription) {
        self.objects.push(object);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: LightDescription) {
        self.lights.push(light);
    }

    /// Look up a named material.
    pub fn find_material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Resolve an object's material reference.
    pub fn resolve_material<'a>(&'a self, material: &'a MaterialRef) -> Option<&'a Material> {
        match material {
            MaterialRef::Named(name) => self.find_material(name),
            MaterialRef::Inline(material) => Some(material),
        }
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
