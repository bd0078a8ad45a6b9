//! Frame rendering.
//!
//! Maps every pixel to a primary ray, traces the nearest hit, and writes the
//! resulting color into a caller-owned row-major buffer. Rows can be rendered
//! in parallel with rayon; each row is a disjoint slice of the buffer.

use std::time::Instant;

use rayon::prelude::*;
use specula_core::{Color, FrameBuffer, Pixel, Scene};
use specula_math::Interval;
use thiserror::Error;

use crate::camera::Viewport;
use crate::tracer::{TraceStats, Tracer};
use crate::visibility::raycast;

/// Default bounce limit for reflections.
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of shaded bounce levels (the primary hit is level 1)
    pub max_depth: u32,
    /// Render rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Set the bounce limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable row parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Errors from the frame renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixel buffer holds {actual} pixels but the camera needs {width}x{height} = {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Convert a normalized color to an 8-bit pixel.
pub fn color_to_pixel(color: Color) -> Pixel {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    Pixel::new(r, g, b)
}

/// Trace the primary ray for pixel (x, y).
///
/// Returns `None` when the ray hits nothing, so the caller's background stays.
pub fn render_pixel(
    tracer: &Tracer,
    viewport: &Viewport,
    x: u32,
    y: u32,
    stats: &mut TraceStats,
) -> Option<Pixel> {
    let ray = viewport.get_ray(x, y);
    let hit = raycast(&ray, &tracer.scene().primitives, None)?;
    stats.primary_hits += 1;

    let color = tracer.trace(hit.index, ray.at(hit.t), ray.direction, 1, stats);
    Some(color_to_pixel(color))
}

fn render_row(tracer: &Tracer, viewport: &Viewport, y: u32, row: &mut [Pixel]) -> TraceStats {
    let mut stats = TraceStats::default();
    for (x, pixel) in row.iter_mut().enumerate() {
        if let Some(color) = render_pixel(tracer, viewport, x as u32, y, &mut stats) {
            *pixel = color;
        }
    }
    stats
}

/// Render the scene into an existing row-major buffer.
///
/// Only pixels whose primary ray hits a primitive are written; everything
/// else keeps its prior value.
pub fn render_into(
    scene: &Scene,
    config: &RenderConfig,
    pixels: &mut [Pixel],
) -> RenderResult<TraceStats> {
    let camera = &scene.camera;
    let expected = camera.pixel_count();
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            width: camera.image_width,
            height: camera.image_height,
            expected,
            actual: pixels.len(),
        });
    }
    if expected == 0 {
        return Ok(TraceStats::default());
    }

    let start = Instant::now();
    let viewport = Viewport::new(camera);
    let tracer = Tracer::new(scene, config.max_depth);
    let width = camera.image_width as usize;

    let stats = if config.parallel {
        pixels
            .par_chunks_mut(width)
            .enumerate()
            .map(|(y, row)| render_row(&tracer, &viewport, y as u32, row))
            .reduce(TraceStats::default, TraceStats::merge)
    } else {
        pixels
            .chunks_mut(width)
            .enumerate()
            .map(|(y, row)| render_row(&tracer, &viewport, y as u32, row))
            .fold(TraceStats::default(), TraceStats::merge)
    };

    log::info!(
        "Rendered {}x{} in {:?}: {} primary hits, {} reflection rays, deepest bounce {}",
        camera.image_width,
        camera.image_height,
        start.elapsed(),
        stats.primary_hits,
        stats.reflection_rays,
        stats.deepest_bounce
    );

    Ok(stats)
}

/// Render the scene into a new buffer filled with `background`.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    background: Pixel,
) -> RenderResult<FrameBuffer> {
    let camera = &scene.camera;
    let mut image = FrameBuffer::new(camera.image_width, camera.image_height, background);
    render_into(scene, config, &mut image.pixels)?;
    Ok(image)
}
