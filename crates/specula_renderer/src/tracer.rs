//! Bounded recursive reflection.

use specula_core::{Color, Scene};
use specula_math::{reflect, Ray, Vec3};

use crate::illumination::{illuminate, SurfacePoint};
use crate::intersect::Surface;
use crate::visibility::raycast;

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Primary rays that hit a primitive
    pub primary_hits: u64,
    /// Reflection rays cast
    pub reflection_rays: u64,
    /// Deepest bounce level that was shaded
    pub deepest_bounce: u32,
}

impl TraceStats {
    /// Combine counters from two independent traces.
    pub fn merge(self, other: TraceStats) -> TraceStats {
        TraceStats {
            primary_hits: self.primary_hits + other.primary_hits,
            reflection_rays: self.reflection_rays + other.reflection_rays,
            deepest_bounce: self.deepest_bounce.max(other.deepest_bounce),
        }
    }
}

/// Whitted-style tracer over a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    eye: Vec3,
    max_depth: u32,
}

impl<'a> Tracer<'a> {
    /// Create a tracer that shades at most `max_depth` bounce levels.
    pub fn new(scene: &'a Scene, max_depth: u32) -> Self {
        Self {
            scene,
            eye: scene.camera.origin,
            max_depth,
        }
    }

    /// The scene being traced.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Color of `point` on primitive `index`, reached by a ray travelling
    /// along `incoming` (unit length), at bounce level `depth`.
    ///
    /// Levels past `max_depth` are black. Otherwise the mirror direction is
    /// traced (skipping this primitive), its color is scaled by this
    /// primitive's reflectivity, and the result is fed into local
    /// illumination at this point. Specular highlights are always taken
    /// towards the camera, at every bounce level.
    pub fn trace(
        &self,
        index: usize,
        point: Vec3,
        incoming: Vec3,
        depth: u32,
        stats: &mut TraceStats,
    ) -> Color {
        if depth > self.max_depth {
            return Color::ZERO;
        }
        stats.deepest_bounce = stats.deepest_bounce.max(depth);

        let primitive = &self.scene.primitives[index];
        let normal = primitive.shape.normal_at(point);
        let reflected = reflect(incoming, normal).normalize();

        let ray = Ray::new(point, reflected);
        stats.reflection_rays += 1;
        let reflection = match raycast(&ray, &self.scene.primitives, Some(index)) {
            Some(hit) => {
                let bounce = self.trace(hit.index, ray.at(hit.t), reflected, depth + 1, stats);
                bounce * primitive.material.reflectivity
            }
            None => Color::ZERO,
        };

        let surface = SurfacePoint {
            point,
            normal,
            view: (self.eye - point).normalize(),
        };
        illuminate(self.scene, index, &surface, reflection)
    }
}
