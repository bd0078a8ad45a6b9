//! Specula Renderer - CPU Whitted-style ray tracing.
//!
//! Analytic intersection against planes, spheres and quadrics, local
//! diffuse/specular shading with hard shadows, and bounded recursive
//! mirror reflection. No acceleration structure: every query is a linear
//! scan over the scene's primitives.

mod camera;
mod illumination;
mod intersect;
mod renderer;
mod tracer;
mod visibility;

pub use camera::Viewport;
pub use illumination::{angular_attenuation, illuminate, light_contribution, SurfacePoint};
pub use intersect::{intersect_plane, intersect_quadric, intersect_sphere, Surface};
pub use renderer::{
    color_to_pixel, render, render_into, render_pixel, RenderConfig, RenderError, RenderResult,
    DEFAULT_MAX_DEPTH,
};
pub use tracer::{TraceStats, Tracer};
pub use visibility::{occluded, raycast, Hit};

/// Re-export Vec3 and common math types from specula_math
pub use specula_math::{Interval, Ray, Vec3};
