//! Local illumination: diffuse and specular terms with radial and spotlight
//! attenuation, plus shadow tests.

use specula_core::{Color, Light, LightKind, Material, Scene};
use specula_math::{from_points, reflect, Vec3};

use crate::visibility::occluded;

/// Geometry needed to shade one point.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    /// Position being shaded
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Unit vector from the point towards the viewer
    pub view: Vec3,
}

/// Spotlight falloff for a point seen from the light along `light_to_point`.
///
/// Point lights always return 1. Spot lights return 0 outside the cutoff cone
/// (or when the cutoff angle is zero), else `cos(angle)^exponent`.
pub fn angular_attenuation(light: &Light, light_to_point: Vec3) -> f32 {
    match light.kind {
        LightKind::Point => 1.0,
        LightKind::Spot {
            direction,
            theta,
            cos_theta,
            angular_exponent,
        } => {
            if theta == 0.0 {
                return 0.0;
            }
            let cos_angle = light_to_point.dot(direction);
            if cos_angle < cos_theta {
                0.0
            } else {
                cos_angle.powf(angular_exponent)
            }
        }
    }
}

/// Contribution of one light at a surface point, ignoring shadows.
///
/// Radial and angular attenuation scale the diffuse term only. The specular
/// term is gated by the spot cone and by `N.L > 0` but is not attenuated.
pub fn light_contribution(material: &Material, surface: &SurfacePoint, light: &Light) -> Color {
    let to_light = from_points(surface.point, light.position);
    let distance = to_light.length();
    let l = to_light / distance;

    let angular = angular_attenuation(light, -l);
    if angular == 0.0 {
        return Color::ZERO;
    }

    let n_dot_l = surface.normal.dot(l);
    if n_dot_l <= 0.0 {
        return Color::ZERO;
    }

    let radial = light.attenuation.factor(distance);
    let diffuse = material.diffuse_color * light.color * n_dot_l;

    let r = reflect(-l, surface.normal).normalize();
    let r_dot_v = r.dot(surface.view);
    let specular = if r_dot_v > 0.0 {
        material.specular_color * light.color * r_dot_v.powf(material.ns)
    } else {
        Color::ZERO
    };

    radial * angular * diffuse + specular
}

/// Shade a point on primitive `index`, combining every unshadowed light with
/// the reflection color already gathered for this point.
///
/// The summed light is weighted by the material's local weight
/// (`1 - reflectivity - refractivity`), added to `reflection`, and clamped to
/// [0, 1] per channel.
pub fn illuminate(scene: &Scene, index: usize, surface: &SurfacePoint, reflection: Color) -> Color {
    let material = &scene.primitives[index].material;

    let local = scene
        .lights
        .iter()
        .filter(|light| !occluded(surface.point, light.position, &scene.primitives, Some(index)))
        .fold(Color::ZERO, |sum, light| {
            sum + light_contribution(material, surface, light)
        });

    (local * material.local_weight() + reflection).clamp(Color::ZERO, Color::ONE)
}
