//! Primary ray generation through the camera's viewport.

use specula_core::Camera;
use specula_math::{Ray, Vec3};

/// Pixel grid laid over the viewport plane.
///
/// The viewport is centered on the -Z axis at `viewport_distance` from the
/// eye, with +X to the right and +Y up. Rays go through pixel centers.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Viewport {
    /// Precompute the pixel grid for a camera.
    pub fn new(camera: &Camera) -> Self {
        let dx = camera.viewport_width / camera.image_width as f32;
        let dy = camera.viewport_height / camera.image_height as f32;

        let pixel_delta_u = Vec3::new(dx, 0.0, 0.0);
        let pixel_delta_v = Vec3::new(0.0, -dy, 0.0);

        // Upper left corner of the viewport, relative to the eye
        let viewport_upper_left = Vec3::new(
            -camera.viewport_width / 2.0,
            camera.viewport_height / 2.0,
            -camera.viewport_distance,
        );
        let pixel00_loc = camera.origin
            + viewport_upper_left
            + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            center: camera.origin,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// World-space point on the viewport at the center of pixel (i, j).
    pub fn pixel_center(&self, i: u32, j: u32) -> Vec3 {
        self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v
    }

    /// Primary ray for pixel (i, j), with a normalized direction.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        Ray::towards(self.center, self.pixel_center(i, j))
    }
}
