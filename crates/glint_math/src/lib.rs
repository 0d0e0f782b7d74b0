// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// Distance used to nudge secondary rays off a surface and to decide when a
/// direction component is parallel to a slab.
pub const RAY_EPSILON: f32 = 1e-4;
