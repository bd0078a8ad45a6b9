//! Analytic ray/primitive intersection.
//!
//! Every routine returns the parametric distance `t` along a ray with a unit
//! direction, or `0.0` when there is nothing ahead of the origin. Callers
//! treat anything that is not strictly positive and finite as a miss.

use specula_core::Shape;
use specula_math::{Ray, Vec3};

/// Geometry a ray can be tested against.
pub trait Surface {
    /// Smallest positive hit distance, or a non-positive value for a miss.
    fn intersect(&self, ray: &Ray) -> f32;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;
}

impl Surface for Shape {
    fn intersect(&self, ray: &Ray) -> f32 {
        match self {
            Shape::Plane { normal, offset } => intersect_plane(ray, *normal, *offset),
            Shape::Sphere { center, radius } => intersect_sphere(ray, *center, *radius),
            Shape::Quadric { coefficients } => intersect_quadric(ray, coefficients),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Plane { normal, .. } => *normal,
            Shape::Sphere { center, .. } => (point - *center).normalize(),
            Shape::Quadric { coefficients } => quadric_gradient(coefficients, point).normalize(),
        }
    }
}

/// Ray/plane intersection for the plane `normal . p + offset = 0`.
///
/// A ray parallel to the plane (including one lying in it) is a miss.
pub fn intersect_plane(ray: &Ray, normal: Vec3, offset: f32) -> f32 {
    let denominator = normal.dot(ray.direction);
    if denominator == 0.0 {
        return 0.0;
    }

    -(normal.dot(ray.origin) + offset) / denominator
}

/// Ray/sphere intersection.
///
/// Returns the near root when it is not behind the origin, otherwise the far
/// root, which is the exit point for rays that start inside the sphere.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> f32 {
    let oc = ray.origin - center;
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 {
        return 0.0;
    }

    let sqrtd = discriminant.sqrt();
    let t0 = (-b - sqrtd) / 2.0;
    if t0 >= 0.0 {
        return t0;
    }

    (-b + sqrtd) / 2.0
}

/// Ray/quadric intersection for
/// `Ax² + By² + Cz² + Dxy + Exz + Fyz + Gx + Hy + Iz + J = 0`.
///
/// Degenerates to a linear solve when the quadratic term vanishes along the
/// ray. Prefers the smaller positive root, then the larger one.
pub fn intersect_quadric(ray: &Ray, k: &[f32; 10]) -> f32 {
    let [a, b, c, d, e, f, g, h, i, j] = *k;
    let Vec3 { x: x0, y: y0, z: z0 } = ray.origin;
    let Vec3 { x: xd, y: yd, z: zd } = ray.direction;

    let aq = a * xd * xd + b * yd * yd + c * zd * zd + d * xd * yd + e * xd * zd + f * yd * zd;

    let bq = 2.0 * a * x0 * xd
        + 2.0 * b * y0 * yd
        + 2.0 * c * z0 * zd
        + d * (x0 * yd + y0 * xd)
        + e * (x0 * zd + z0 * xd)
        + f * (y0 * zd + z0 * yd)
        + g * xd
        + h * yd
        + i * zd;

    let cq = a * x0 * x0
        + b * y0 * y0
        + c * z0 * z0
        + d * x0 * y0
        + e * x0 * z0
        + f * y0 * z0
        + g * x0
        + h * y0
        + i * z0
        + j;

    if aq == 0.0 {
        return -cq / bq;
    }

    let discriminant = bq * bq - 4.0 * aq * cq;
    if discriminant < 0.0 {
        return 0.0;
    }

    let sqrtd = discriminant.sqrt();
    let r0 = (-bq - sqrtd) / (2.0 * aq);
    let r1 = (-bq + sqrtd) / (2.0 * aq);
    let (near, far) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };

    if near > 0.0 {
        near
    } else {
        far
    }
}

/// Gradient of the quadric function at `p` (not normalized).
fn quadric_gradient(k: &[f32; 10], p: Vec3) -> Vec3 {
    let [a, b, c, d, e, f, g, h, i, _] = *k;
    Vec3::new(
        2.0 * a * p.x + d * p.y + e * p.z + g,
        2.0 * b * p.y + d * p.x + f * p.z + h,
        2.0 * c * p.z + e * p.x + f * p.y + i,
    )
}
