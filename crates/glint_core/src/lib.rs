//! Glint Core - scene description and configuration for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `Material`, lights, objects, camera
//! - **Scene loading**: JSON parsing with validation
//! - **Trace configuration**: recursion depth, energy threshold, light falloff
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_scene, TraceConfig};
//!
//! let scene = load_scene("scenes/glass_box.json")?;
//! let config = TraceConfig::default();
//! println!("Loaded {} objects", scene.object_count());
//! ```

pub mod config;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use config::{AttenuationCoefficients, ConfigError, TraceConfig};
pub use loader::{load_scene, load_scene_from_str, validate_scene, LoadError, LoadResult};
pub use scene::{
    CameraDescription, Color, LightDescription, Material, MaterialRef, ObjectDescription,
    SceneDescription, Shape, Transform,
};
