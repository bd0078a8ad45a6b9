//! Scene model for Specula.
//!
//! A scene is a camera, an ordered list of analytic primitives, and an
//! ordered list of lights. It is populated once (usually by the parser) and
//! then only borrowed by the renderer.

use specula_math::Vec3;

/// Color type alias (RGB values, normalized 0-1 while shading)
pub type Color = Vec3;

/// Specular exponent used when a scene entity does not set `ns`.
pub const DEFAULT_NS: f32 = 20.0;

/// Surface properties shared by every primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular highlight color (RGB, 0-1)
    pub specular_color: Color,

    /// Fraction of light mirror-reflected (0-1)
    pub reflectivity: f32,

    /// Fraction of light transmitted (0-1). Stored, not used by shading.
    pub refractivity: f32,

    /// Index of refraction. Stored, not used by shading.
    pub ior: f32,

    /// Specular exponent (shininess)
    pub ns: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
            ns: DEFAULT_NS,
        }
    }
}

impl Material {
    /// Create a material with only a diffuse color.
    pub fn diffuse(diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    /// Set the specular color and exponent.
    pub fn with_specular(mut self, specular_color: Color, ns: f32) -> Self {
        self.specular_color = specular_color;
        self.ns = ns;
        self
    }

    /// Set the reflectivity coefficient.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the refractivity coefficient and index of refraction.
    pub fn with_refraction(mut self, refractivity: f32, ior: f32) -> Self {
        self.refractivity = refractivity;
        self.ior = ior;
        self
    }

    /// Weight given to local (diffuse + specular) shading.
    ///
    /// This is `1 - reflectivity - refractivity`, clamped to [0, 1] so a
    /// material whose coefficients sum past one cannot produce negative light.
    pub fn local_weight(&self) -> f32 {
        (1.0 - self.reflectivity - self.refractivity).clamp(0.0, 1.0)
    }
}

/// Geometry of a primitive. The set of variants is closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Infinite plane `normal . p + offset = 0`.
    Plane { normal: Vec3, offset: f32 },

    /// Sphere with a center and a radius.
    Sphere { center: Vec3, radius: f32 },

    /// General quadric surface
    /// `Ax² + By² + Cz² + Dxy + Exz + Fyz + Gx + Hy + Iz + J = 0`,
    /// coefficients stored in order A..J.
    Quadric { coefficients: [f32; 10] },
}

impl Shape {
    /// Build a plane through `position` with the given normal.
    ///
    /// The normal is normalized here; the signed offset is `-(normal . position)`.
    pub fn plane(position: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Shape::Plane {
            normal,
            offset: -normal.dot(position),
        }
    }

    /// Build a sphere.
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere { center, radius }
    }

    /// Build a quadric from its ten coefficients.
    pub fn quadric(coefficients: [f32; 10]) -> Self {
        Shape::Quadric { coefficients }
    }

    /// Short lowercase name, as used in scene descriptions.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Plane { .. } => "plane",
            Shape::Sphere { .. } => "sphere",
            Shape::Quadric { .. } => "quadric",
        }
    }
}

/// A renderable object: geometry plus material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    /// Create a new primitive.
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }
}

/// Inverse-quadratic distance falloff: `1 / (a0 + a1·d + a2·d²)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialAttenuation {
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Default for RadialAttenuation {
    fn default() -> Self {
        Self {
            a0: 1.0,
            a1: 0.0,
            a2: 0.0,
        }
    }
}

impl RadialAttenuation {
    /// Create a new attenuation model.
    pub fn new(a0: f32, a1: f32, a2: f32) -> Self {
        Self { a0, a1, a2 }
    }

    /// Attenuation factor at distance `d`.
    pub fn factor(&self, d: f32) -> f32 {
        1.0 / (self.a0 + self.a1 * d + self.a2 * d * d)
    }
}

/// Point or spot emission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Point,
    Spot {
        /// Spot axis (unit length)
        direction: Vec3,
        /// Cutoff half-angle in radians
        theta: f32,
        /// Cached `cos(theta)`
        cos_theta: f32,
        /// Angular falloff exponent
        angular_exponent: f32,
    },
}

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub attenuation: RadialAttenuation,
    pub kind: LightKind,
}

impl Light {
    /// Create a point light with no distance falloff.
    pub fn point(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            attenuation: RadialAttenuation::default(),
            kind: LightKind::Point,
        }
    }

    /// Create a spot light. `theta_degrees` is the cutoff half-angle.
    pub fn spot(
        position: Vec3,
        color: Color,
        direction: Vec3,
        theta_degrees: f32,
        angular_exponent: f32,
    ) -> Self {
        let theta = theta_degrees.to_radians();
        Self {
            position,
            color,
            attenuation: RadialAttenuation::default(),
            kind: LightKind::Spot {
                direction: direction.normalize_or_zero(),
                theta,
                cos_theta: theta.cos(),
                angular_exponent,
            },
        }
    }

    /// Set the radial attenuation coefficients.
    pub fn with_attenuation(mut self, attenuation: RadialAttenuation) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// True for spot lights.
    pub fn is_spot(&self) -> bool {
        matches!(self.kind, LightKind::Spot { .. })
    }
}

/// Pinhole camera looking down -Z through a viewport rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Viewport width in world units
    pub viewport_width: f32,
    /// Viewport height in world units
    pub viewport_height: f32,
    /// Distance from the origin to the viewport plane
    pub viewport_distance: f32,
    /// Eye point
    pub origin: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            viewport_width: 1.0,
            viewport_height: 1.0,
            viewport_distance: 1.0,
            origin: Vec3::ZERO,
        }
    }
}

impl Camera {
    /// Create a camera with the given viewport size.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Default::default()
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.set_resolution(width, height);
        self
    }

    /// Set the viewport distance.
    pub fn with_viewport_distance(mut self, distance: f32) -> Self {
        self.viewport_distance = distance;
        self
    }

    /// Update image resolution.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.image_width = width;
        self.image_height = height;
    }

    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Pin the eye point to the world origin.
    ///
    /// The projection model only supports a camera at the origin, so loaders
    /// call this after populating the camera, discarding any parsed origin.
    pub fn anchor_at_world_origin(&mut self) {
        self.origin = Vec3::ZERO;
    }
}

/// A complete scene: camera, primitives, and lights.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,

    /// Primitives in scan order (ties during intersection go to the earlier one)
    pub primitives: Vec<Primitive>,

    /// Lights in evaluation order
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene with the given camera.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Add a primitive and return its index.
    pub fn add_primitive(&mut self, primitive: Primitive) -> usize {
        let id = self.primitives.len();
        self.primitives.push(primitive);
        id
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        let id = self.lights.len();
        self.lights.push(light);
        id
    }

    /// Get primitive count.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new(Camera::new(2.0, 2.0));

        let sphere = scene.add_primitive(Primitive::new(
            Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0),
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        let plane = scene.add_primitive(Primitive::new(
            Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
            Material::default(),
        ));
        scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE));

        assert_eq!(sphere, 0);
        assert_eq!(plane, 1);
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.light_count(), 1);
    }

    #[test]
    fn test_plane_offset_from_position() {
        let shape = Shape::plane(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        match shape {
            Shape::Plane { normal, offset } => {
                assert_eq!(normal, Vec3::Y);
                assert_eq!(offset, 2.0);
            }
            other => panic!("expected plane, got {:?}", other),
        }
    }

    #[test]
    fn test_local_weight() {
        let material = Material::default().with_reflectivity(0.25);
        assert_eq!(material.local_weight(), 0.75);

        let material = Material::default()
            .with_reflectivity(0.5)
            .with_refraction(0.25, 1.5);
        assert_eq!(material.local_weight(), 0.25);

        // Over-unity coefficients clamp instead of going negative
        let material = Material::default()
            .with_reflectivity(0.8)
            .with_refraction(0.6, 1.0);
        assert_eq!(material.local_weight(), 0.0);
    }

    #[test]
    fn test_radial_attenuation() {
        assert_eq!(RadialAttenuation::default().factor(10.0), 1.0);

        let att = RadialAttenuation::new(1.0, 0.0, 1.0);
        assert_eq!(att.factor(2.0), 0.2);
    }

    #[test]
    fn test_spot_light_caches_cosine() {
        let light = Light::spot(Vec3::ZERO, Color::ONE, Vec3::new(0.0, -2.0, 0.0), 60.0, 1.0);
        match light.kind {
            LightKind::Spot {
                direction,
                theta,
                cos_theta,
                ..
            } => {
                assert_eq!(direction, Vec3::new(0.0, -1.0, 0.0));
                assert!((theta - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
                assert!((cos_theta - 0.5).abs() < 1e-6);
            }
            LightKind::Point => panic!("expected spot light"),
        }
        assert!(light.is_spot());
    }

    #[test]
    fn test_camera_anchor() {
        let mut camera = Camera::new(1.0, 1.0).with_resolution(4, 3);
        camera.origin = Vec3::new(1.0, 2.0, 3.0);
        camera.anchor_at_world_origin();

        assert_eq!(camera.origin, Vec3::ZERO);
        assert_eq!(camera.pixel_count(), 12);
    }
}
