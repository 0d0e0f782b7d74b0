//! Glint Renderer - recursive CPU ray tracing
//!
//! A Whitted-style ray tracer: Phong shading with shadows, plus mirror
//! reflection and refraction through nested transparent media.
//!
//! Scenes come from `glint_core` descriptions. Objects are unit boxes and
//! spheres placed by a transform; lookups are a brute-force scan.

mod bucket;
mod camera;
mod hittable;
mod light;
mod material;
mod object;
mod renderer;
mod scene;
mod sphere;
mod tracer;
mod unit_box;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{Geometry, HitRecord, Hittable, SurfaceHit};
pub use light::Light;
pub use material::Shade;
pub use object::SceneObject;
pub use renderer::{pixel_coordinates, quantize, ImageBuffer, RayTracer, DEFAULT_BUFFER_WIDTH};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{
    reflect, refract, trace, trace_ray, MediumStack, PathWeight, BACKGROUND, PROBE_DISTANCE,
};
pub use unit_box::UnitBox;

/// Re-export the scene data types from glint_core
pub use glint_core::{Color, Material, TraceConfig};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
