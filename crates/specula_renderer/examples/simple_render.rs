//! Simple Whitted ray tracer example.
//!
//! Builds a small scene in code (two spheres, a mirror floor and a quadric
//! cylinder), renders it, and saves a binary PPM.

use specula_core::{
    write_image, Camera, Color, Light, Material, OutputFormat, Pixel, Primitive,
    RadialAttenuation, Scene, Shape,
};
use specula_renderer::{render, RenderConfig, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    log::info!(
        "Scene built in {:?}: {} primitives, {} lights",
        start.elapsed(),
        scene.primitive_count(),
        scene.light_count()
    );

    let config = RenderConfig::default().with_max_depth(5);
    let image = render(&scene, &config, Pixel::new(20, 24, 32))?;

    let filename = "output.ppm";
    write_image(filename, &image, OutputFormat::Ppm { ascii: false })?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let camera = Camera::new(1.6, 0.9).with_resolution(800, 450);
    let mut scene = Scene::new(camera);

    // Mirror floor
    scene.add_primitive(Primitive::new(
        Shape::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
        Material::diffuse(Color::splat(0.3)).with_reflectivity(0.5),
    ));

    scene.add_primitive(Primitive::new(
        Shape::sphere(Vec3::new(-0.9, -0.2, -4.0), 0.8),
        Material::diffuse(Color::new(0.8, 0.2, 0.15))
            .with_specular(Color::ONE, 60.0)
            .with_reflectivity(0.15),
    ));
    scene.add_primitive(Primitive::new(
        Shape::sphere(Vec3::new(1.1, -0.5, -3.5), 0.5),
        Material::diffuse(Color::new(0.15, 0.3, 0.85)).with_specular(Color::splat(0.6), 20.0),
    ));

    // Vertical cylinder x^2 + (z + 7)^2 = 0.25
    scene.add_primitive(Primitive::new(
        Shape::quadric([1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 14.0, 48.75]),
        Material::diffuse(Color::new(0.2, 0.7, 0.3)).with_specular(Color::ONE, 30.0),
    ));

    scene.add_light(
        Light::point(Vec3::new(3.0, 4.0, 0.0), Color::ONE)
            .with_attenuation(RadialAttenuation::new(1.0, 0.02, 0.0)),
    );
    scene.add_light(Light::spot(
        Vec3::new(-1.0, 3.0, -3.0),
        Color::new(0.9, 0.8, 0.6),
        Vec3::new(0.0, -1.0, -0.3),
        30.0,
        4.0,
    ));

    scene
}
