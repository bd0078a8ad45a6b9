//! Nearest-hit queries and shadow tests.

use specula_core::Primitive;
use specula_math::{from_points, Interval, Ray, Vec3};

use crate::intersect::Surface;

/// Record of the nearest intersection along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Index of the primitive in the scene's primitive list
    pub index: usize,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
    /// Distance along the ray
    pub t: f32,
}

/// Find the primitive with the smallest strictly positive hit distance.
///
/// `ignored` excludes one primitive by index, used so a ray leaving a surface
/// cannot immediately re-hit that surface. On equal distances the primitive
/// that comes first in `primitives` wins.
pub fn raycast<'a>(
    ray: &Ray,
    primitives: &'a [Primitive],
    ignored: Option<usize>,
) -> Option<Hit<'a>> {
    let mut nearest: Option<Hit<'a>> = None;
    let mut closest_so_far = f32::INFINITY;

    for (index, primitive) in primitives.iter().enumerate() {
        if ignored == Some(index) {
            continue;
        }

        let t = primitive.shape.intersect(ray);
        if Interval::AHEAD.surrounds(t) && t < closest_so_far {
            closest_so_far = t;
            nearest = Some(Hit {
                index,
                primitive,
                t,
            });
        }
    }

    nearest
}

/// True if something lies strictly between `point` and `light_position`.
pub fn occluded(
    point: Vec3,
    light_position: Vec3,
    primitives: &[Primitive],
    ignored: Option<usize>,
) -> bool {
    let to_light = from_points(point, light_position);
    let distance = to_light.length();
    let ray = Ray::new(point, to_light / distance);

    raycast(&ray, primitives, ignored)
        .is_some_and(|hit| Interval::new(0.0, distance).surrounds(hit.t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specula_core::{Material, Shape};

    fn sphere(z: f32, radius: f32) -> Primitive {
        Primitive::new(
            Shape::sphere(Vec3::new(0.0, 0.0, z), radius),
            Material::default(),
        )
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let primitives = vec![sphere(-10.0, 1.0), sphere(-5.0, 1.0)];
        let hit = raycast(&forward(), &primitives, None).unwrap();

        assert_eq!(hit.index, 1);
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let primitives = vec![sphere(-5.0, 1.0), sphere(-5.0, 1.0)];
        let hit = raycast(&forward(), &primitives, None).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_ignored_primitive_is_skipped() {
        let primitives = vec![sphere(-5.0, 1.0), sphere(-10.0, 1.0)];
        let hit = raycast(&forward(), &primitives, Some(0)).unwrap();

        assert_eq!(hit.index, 1);
        assert!((hit.t - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_hit() {
        assert!(raycast(&forward(), &[], None).is_none());

        let behind = vec![sphere(5.0, 1.0)];
        assert!(raycast(&forward(), &behind, None).is_none());
    }

    #[test]
    fn test_parallel_plane_is_not_hit() {
        let floor = Primitive::new(
            Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
            Material::default(),
        );
        assert!(raycast(&forward(), &[floor], None).is_none());
    }

    #[test]
    fn test_occluder_between_point_and_light() {
        let primitives = vec![sphere(-5.0, 1.0)];
        let point = Vec3::ZERO;

        // Light behind the sphere
        assert!(occluded(point, Vec3::new(0.0, 0.0, -10.0), &primitives, None));
        // Light in front of the sphere: the hit lies beyond the light
        assert!(!occluded(point, Vec3::new(0.0, 0.0, -2.0), &primitives, None));
        // Light off to the side
        assert!(!occluded(point, Vec3::new(0.0, 10.0, 0.0), &primitives, None));
        // Occluder excluded
        assert!(!occluded(point, Vec3::new(0.0, 0.0, -10.0), &primitives, Some(0)));
    }
}
