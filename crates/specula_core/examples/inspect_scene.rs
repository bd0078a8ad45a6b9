//! Example: Load and inspect a scene description.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.txt

use std::env;

use specula_core::{load_scene, LightKind, Shape};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.txt");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!(
                "\n=== Viewport {:.2} x {:.2} ===",
                scene.camera.viewport_width, scene.camera.viewport_height
            );
            println!("Primitives: {}", scene.primitive_count());
            println!("Lights: {}", scene.light_count());

            println!("\n--- Primitives ---");
            for (i, primitive) in scene.primitives.iter().enumerate() {
                match primitive.shape {
                    Shape::Sphere { center, radius } => println!(
                        "  [{}] sphere at ({:.2}, {:.2}, {:.2}) r={:.2}",
                        i, center.x, center.y, center.z, radius
                    ),
                    Shape::Plane { normal, offset } => println!(
                        "  [{}] plane n=({:.2}, {:.2}, {:.2}) d={:.2}",
                        i, normal.x, normal.y, normal.z, offset
                    ),
                    Shape::Quadric { coefficients } => {
                        println!("  [{}] quadric {:?}", i, coefficients)
                    }
                }
                println!(
                    "       reflectivity {:.2}, refractivity {:.2}, ns {:.1}",
                    primitive.material.reflectivity,
                    primitive.material.refractivity,
                    primitive.material.ns
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                let kind = match light.kind {
                    LightKind::Point => "point".to_string(),
                    LightKind::Spot { theta, .. } => format!("spot {:.1}°", theta.to_degrees()),
                };
                let p = light.position;
                println!("  [{}] {} at ({:.2}, {:.2}, {:.2})", i, kind, p.x, p.y, p.z);
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
